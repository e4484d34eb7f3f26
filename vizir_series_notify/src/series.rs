// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized packed-circle series with extent notifications.

use std::hash::Hash;
use std::sync::Arc;

use vizir_series::{
    BandScale, CirclePackLayout, CirclePackMemo, CirclePackSpec, PackDatum, PositionScale,
};

use crate::{LayoutNotifier, NotifyError};

/// Drives a packed-circle series across updates.
///
/// Each [`update`](Self::update) reuses the previous layout when the data (by `Arc` identity),
/// x scale, and spec are unchanged. When the layout is recomputed and a notifier is attached,
/// its vertical extent is reported through the notifier.
#[derive(Debug)]
pub struct CirclePackSeries<K, S> {
    spec: CirclePackSpec<K>,
    memo: CirclePackMemo<K, S>,
    notifier: Option<LayoutNotifier>,
}

impl<K, S> CirclePackSeries<K, S>
where
    K: Eq + Hash + Clone,
    S: BandScale<K> + Clone + PartialEq,
{
    /// Creates a series with no notifier.
    pub fn new(spec: CirclePackSpec<K>) -> Self {
        Self {
            spec,
            memo: CirclePackMemo::new(),
            notifier: None,
        }
    }

    /// Attaches a notifier for recomputed layouts.
    #[must_use]
    pub fn with_notifier(mut self, notifier: LayoutNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns the current spec.
    pub fn spec(&self) -> &CirclePackSpec<K> {
        &self.spec
    }

    /// Replaces the spec. The next update recomputes if it differs.
    pub fn set_spec(&mut self, spec: CirclePackSpec<K>) {
        self.spec = spec;
    }

    /// Returns the most recent layout, if any.
    pub fn layout(&self) -> Option<&CirclePackLayout> {
        self.memo.cached()
    }

    /// Lays out `data`, scheduling a report if the layout was recomputed.
    ///
    /// A recomputation always supersedes the pending report, even when it produces none (empty
    /// layouts). If the y scale cannot map the new extent, the error is returned, nothing is left
    /// pending, and the layout is not cached. Returns `Ok(None)` while either scale is missing.
    pub fn update<V>(
        &mut self,
        data: &Arc<[PackDatum<K>]>,
        x_scale: Option<&S>,
        y_scale: Option<&V>,
    ) -> Result<Option<&CirclePackLayout>, NotifyError>
    where
        V: PositionScale<f64> + ?Sized,
    {
        let Some(y_scale) = y_scale else {
            return Ok(None);
        };
        let (recomputed, extent) = match self.memo.layout(&self.spec, data, x_scale)? {
            Some(memoized) => (memoized.recomputed, memoized.layout.extent),
            None => return Ok(None),
        };
        if recomputed
            && let Some(notifier) = self.notifier.as_mut()
            && let Err(err) = notifier.notify_extent(extent, y_scale)
        {
            // Forget the unreported layout so the next update recomputes and reports it.
            self.memo.clear();
            return Err(err.into());
        }
        Ok(self.memo.cached())
    }

    /// Cancels any pending report.
    pub fn cancel_pending(&mut self) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.cancel();
        }
    }
}
