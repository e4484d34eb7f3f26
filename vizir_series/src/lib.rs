// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engine for statistical chart series.
//!
//! This crate turns raw records plus axis scales into concrete geometry:
//! - **Packed circles** ([`CirclePackSpec`]): records grouped by category are packed into
//!   non-overlapping clusters centered on their category band.
//! - **Violin/box slots** ([`BoxLayoutSpec`]): one glyph slot per category, capped in width and
//!   re-centered inside its band.
//!
//! Layouts are pure: the same inputs always produce the same geometry, and nothing is retained
//! between calls (except in [`CirclePackMemo`], which exists to skip repeated work).
//! A layout whose scales are not available yet returns `Ok(None)` instead of failing.
//!
//! Rendering, styling, and event dispatch are out of scope; geometry records carry the indices a
//! renderer needs to wire those up.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod box_layout;
mod circle_pack;
mod enclose;
mod error;
mod event;
#[cfg(not(feature = "std"))]
mod float;
mod memo;
mod pack;
mod scale;

pub use box_layout::{
    BandMetrics, Bin, BinnedDatum, BoxGeometry, BoxLayout, BoxLayoutSpec, MAX_BOX_WIDTH,
    Orientation, WidthRatio,
};
pub use circle_pack::{
    CategoryCluster, CirclePackLayout, CirclePackSpec, DEFAULT_CIRCLE_SIZE, PackDatum,
    PackedCircle, SizeAccessor, SizeFn,
};
pub use error::LayoutError;
pub use event::SeriesEvent;
pub use memo::{CirclePackMemo, Memoized};
pub use scale::{
    BandScale, OrdinalScale, PositionScale, ScaleBand, ScaleContinuous, ScaleLinear, ScaleLog,
};
