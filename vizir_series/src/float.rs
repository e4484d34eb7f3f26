// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::sqrt` and friends live in `std`, not `core`. Layout code imports this trait
//! when `std` is disabled so the same method-call syntax dispatches to `libm`.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn sqrt(self) -> Self;
    fn floor(self) -> Self;
    fn round(self) -> Self;
    fn ln(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }

    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn round(self) -> Self {
        libm::round(self)
    }

    fn ln(self) -> Self {
        libm::log(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("vizir_series requires either the `std` or `libm` feature");
