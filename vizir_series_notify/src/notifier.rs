// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced reporting of a series' vertical extent.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use vizir_series::{LayoutError, PositionScale};

use crate::{DeferredTask, NotifyError};

/// Delay between a layout completing and its report being delivered.
pub const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_millis(10);

/// The vertical extent of a computed layout, in pixels and in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutReport {
    /// `(min_y, max_y)` of the laid-out geometry.
    pub range: (f64, f64),
    /// The value scale applied to both ends of `range`.
    pub domain: (f64, f64),
}

impl LayoutReport {
    /// Builds a report for `extent`, mapping both ends through `value_scale`.
    pub fn from_extent<S>(extent: (f64, f64), value_scale: &S) -> Result<Self, LayoutError>
    where
        S: PositionScale<f64> + ?Sized,
    {
        let (min_y, max_y) = extent;
        Ok(Self {
            range: (min_y, max_y),
            domain: (value_scale.position(&min_y)?, value_scale.position(&max_y)?),
        })
    }
}

/// Callback receiving [`LayoutReport`]s.
pub type ReportFn = dyn Fn(LayoutReport) + Send + Sync;

/// Delivers at most one pending [`LayoutReport`] to a callback after a short delay.
///
/// A report scheduled while another is pending replaces it. Dropping the notifier cancels the
/// pending report.
pub struct LayoutNotifier {
    callback: Arc<ReportFn>,
    task: DeferredTask,
}

impl fmt::Debug for LayoutNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNotifier")
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

impl LayoutNotifier {
    /// Creates a notifier on the current tokio runtime with [`DEFAULT_NOTIFY_DELAY`].
    pub fn new(callback: impl Fn(LayoutReport) + Send + Sync + 'static) -> Result<Self, NotifyError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_handle(runtime, callback))
    }

    /// Creates a notifier that spawns its timers on `runtime`.
    pub fn with_handle(
        runtime: Handle,
        callback: impl Fn(LayoutReport) + Send + Sync + 'static,
    ) -> Self {
        Self {
            callback: Arc::new(callback),
            task: DeferredTask::idle(runtime, DEFAULT_NOTIFY_DELAY),
        }
    }

    /// Sets the delay, cancelling any pending report.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.task.cancel();
        let runtime = self.task.runtime().clone();
        self.task = DeferredTask::idle(runtime, delay);
        self
    }

    /// Returns the delay before a report is delivered.
    pub fn delay(&self) -> Duration {
        self.task.delay()
    }

    /// Schedules `report`, replacing any report still pending.
    pub fn notify(&mut self, report: LayoutReport) {
        let callback = Arc::clone(&self.callback);
        if self.task.is_pending() {
            log::debug!("layout report superseded");
        }
        log::debug!("layout report scheduled: {report:?}");
        self.task.reschedule(move || callback(report));
    }

    /// Schedules a report for `extent`. Returns whether one was scheduled.
    ///
    /// Any pending report belongs to an older layout and is cancelled first, so an empty layout
    /// (`None`) or an extent the value scale cannot map leaves nothing pending.
    pub fn notify_extent<S>(
        &mut self,
        extent: Option<(f64, f64)>,
        value_scale: &S,
    ) -> Result<bool, LayoutError>
    where
        S: PositionScale<f64> + ?Sized,
    {
        let report = extent
            .map(|extent| LayoutReport::from_extent(extent, value_scale))
            .transpose();
        match report {
            Ok(Some(report)) => {
                self.notify(report);
                Ok(true)
            }
            Ok(None) => {
                self.cancel();
                Ok(false)
            }
            Err(err) => {
                self.cancel();
                Err(err)
            }
        }
    }

    /// Cancels the pending report, if any.
    pub fn cancel(&mut self) {
        if self.task.cancel() {
            log::debug!("layout report cancelled");
        }
    }

    /// Returns whether a report is waiting to be delivered.
    pub fn is_pending(&self) -> bool {
        self.task.is_pending()
    }
}
