// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by notifiers and series drivers.

use tokio::runtime::TryCurrentError;
use vizir_series::LayoutError;

/// Errors raised while driving a series with notifications.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// A notifier was created outside a tokio runtime.
    #[error("layout notifications need a running tokio runtime")]
    NoRuntime(#[from] TryCurrentError),
    /// The layout, or the report built from it, failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
