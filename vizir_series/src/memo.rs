// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Last-result cache for packed-circle layouts.
//!
//! Packing is the expensive part of a series update, and hosts tend to re-run layout whenever
//! anything about a chart changes. [`CirclePackMemo`] keeps the most recent result and only
//! recomputes when the data, x scale, or spec changed.
//!
//! Data is compared by identity (`Arc::ptr_eq`), not by value: hand the memo a new `Arc` when
//! the records change. Scales and specs are compared with `PartialEq`; custom size accessors
//! are compared by identity.

extern crate alloc;

use alloc::sync::Arc;
use core::hash::Hash;

use crate::LayoutError;
use crate::circle_pack::{CirclePackLayout, CirclePackSpec, PackDatum};
use crate::scale::BandScale;

/// Caches the last packed-circle layout.
#[derive(Debug)]
pub struct CirclePackMemo<K, S> {
    last: Option<MemoEntry<K, S>>,
}

#[derive(Debug)]
struct MemoEntry<K, S> {
    data: Arc<[PackDatum<K>]>,
    scale: S,
    spec: CirclePackSpec<K>,
    layout: CirclePackLayout,
}

/// A layout served by [`CirclePackMemo::layout`].
#[derive(Clone, Copy, Debug)]
pub struct Memoized<'a> {
    /// The layout for the requested inputs.
    pub layout: &'a CirclePackLayout,
    /// Whether this call computed the layout (as opposed to serving it from the cache).
    pub recomputed: bool,
}

impl<K, S> Default for CirclePackMemo<K, S> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K, S> CirclePackMemo<K, S> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached layout.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Returns the cached layout, if any.
    pub fn cached(&self) -> Option<&CirclePackLayout> {
        self.last.as_ref().map(|entry| &entry.layout)
    }
}

impl<K, S> CirclePackMemo<K, S>
where
    K: Eq + Hash + Clone,
    S: BandScale<K> + Clone + PartialEq,
{
    /// Returns the layout of `data` against `x_scale`, recomputing only on a cache miss.
    ///
    /// Returns `Ok(None)` (leaving the cache untouched) when the scale is not available yet.
    /// Errors are not cached.
    pub fn layout(
        &mut self,
        spec: &CirclePackSpec<K>,
        data: &Arc<[PackDatum<K>]>,
        x_scale: Option<&S>,
    ) -> Result<Option<Memoized<'_>>, LayoutError> {
        let Some(x_scale) = x_scale else {
            return Ok(None);
        };

        let hit = self.last.as_ref().is_some_and(|entry| {
            Arc::ptr_eq(&entry.data, data) && entry.scale == *x_scale && entry.spec == *spec
        });

        if hit {
            log::debug!("circle pack memo: hit");
        } else {
            log::debug!("circle pack memo: miss, recomputing {} records", data.len());
            let Some(layout) = spec.layout(data, Some(x_scale))? else {
                return Ok(None);
            };
            self.last = Some(MemoEntry {
                data: Arc::clone(data),
                scale: x_scale.clone(),
                spec: spec.clone(),
                layout,
            });
        }

        Ok(self.last.as_ref().map(|entry| Memoized {
            layout: &entry.layout,
            recomputed: !hit,
        }))
    }
}
