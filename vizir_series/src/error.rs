// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by scales and series layouts.

/// Errors returned when mapping keys through a scale or laying out a series.
///
/// A missing scale is not an error: layouts return `Ok(None)` until both scales exist.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A key is not part of the scale's domain (or is not a valid input for it).
    #[error("key is outside the scale domain")]
    OutOfDomain,
    /// A box width ratio outside `(0, 1]`.
    #[error("width ratio {0} is outside (0, 1]")]
    InvalidWidthRatio(f64),
    /// A maximum box width that is not finite and positive.
    #[error("maximum box width {0} must be finite and positive")]
    InvalidMaxBoxWidth(f64),
    /// A band scale reported a negative or non-finite band width.
    #[error("band width {0} must be finite and non-negative")]
    InvalidBandwidth(f64),
    /// A record resolved to a negative or non-finite circle size.
    #[error("record {index} has invalid size {size}")]
    InvalidSize {
        /// Input index of the offending record.
        index: usize,
        /// The size produced by the size accessor.
        size: f64,
    },
    /// An ordinal domain lists the same key twice.
    #[error("ordinal domain repeats the key at index {index}")]
    DuplicateDomainKey {
        /// Index of the second occurrence in the domain.
        index: usize,
    },
    /// The enclosing circle of a packed cluster could not be resolved.
    ///
    /// This only happens for numerically degenerate clusters, such as radii that span many
    /// orders of magnitude.
    #[error("no enclosing circle for category starting at record {first_index}")]
    Unenclosable {
        /// Input index of the first record of the affected category.
        first_index: usize,
    },
}
