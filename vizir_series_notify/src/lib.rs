// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced layout notifications for `vizir_series`.
//!
//! Layouts in `vizir_series` are synchronous and pure. Hosts that want to hear about the
//! vertical extent of a freshly computed layout (to grow an axis, say) use a
//! [`LayoutNotifier`]: reports are delivered on a tokio runtime after a short delay, and a new
//! report arriving inside that window replaces the pending one.
//!
//! [`CirclePackSeries`] wires a [`vizir_series::CirclePackMemo`] to a notifier so that only real
//! recomputations produce reports.

mod deferred;
mod error;
mod notifier;
mod series;

pub use deferred::DeferredTask;
pub use error::NotifyError;
pub use notifier::{DEFAULT_NOTIFY_DELAY, LayoutNotifier, LayoutReport, ReportFn};
pub use series::CirclePackSeries;
