// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical box layout for violin and box-plot glyphs.
//!
//! Each category gets one glyph slot inside its band. Wide bands are capped at a maximum box
//! width and the capped slot is re-centered inside the band; a width ratio then shrinks the slot
//! symmetrically. The glyph interior (the violin outline, whiskers, ...) is left to the renderer,
//! which consumes [`BinnedDatum::bin_data`] and the value scale passed through on
//! [`BoxLayout`].

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::LayoutError;
use crate::scale::{BandScale, ScaleContinuous};

/// Default cap on the width of a single box glyph.
pub const MAX_BOX_WIDTH: f64 = 50.0;

/// A pre-aggregated slice of a distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bin {
    /// Position of the bin on the value axis.
    pub value: f64,
    /// Number (or weight) of observations in the bin.
    pub count: f64,
}

impl Bin {
    /// Creates a bin.
    pub fn new(value: f64, count: f64) -> Self {
        Self { value, count }
    }
}

/// A single input record for a violin/box series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinnedDatum<K> {
    /// Category key.
    pub x: K,
    /// Distribution bins, ordered along the value axis.
    pub bin_data: Vec<Bin>,
}

impl<K> BinnedDatum<K> {
    /// Creates a record.
    pub fn new(x: K, bin_data: Vec<Bin>) -> Self {
        Self { x, bin_data }
    }

    /// Returns the smallest and largest finite bin value, if any.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.bin_data
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Which screen axis carries the categories.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Categories along x, values along y. Offsets are glyph `left` edges.
    #[default]
    Vertical,
    /// Categories along y, values along x. Offsets are glyph `top` edges.
    Horizontal,
}

impl Orientation {
    /// Maps a `horizontal` flag to an orientation.
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

/// Fraction of the (capped) band a glyph occupies, in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WidthRatio(f64);

impl WidthRatio {
    /// The whole capped band.
    pub const FULL: Self = Self(1.0);

    /// Validates a ratio in `(0, 1]`.
    pub fn new(ratio: f64) -> Result<Self, LayoutError> {
        if ratio > 0.0 && ratio <= 1.0 {
            Ok(Self(ratio))
        } else {
            Err(LayoutError::InvalidWidthRatio(ratio))
        }
    }

    /// Returns the ratio.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for WidthRatio {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for WidthRatio {
    type Error = LayoutError;

    fn try_from(ratio: f64) -> Result<Self, Self::Error> {
        Self::new(ratio)
    }
}

/// Band-level quantities shared by every glyph of one layout call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BandMetrics {
    /// Band width reported by the position scale.
    pub band_width: f64,
    /// Band width capped at the maximum box width.
    pub actual_width: f64,
    /// Shift that re-centers the capped slot inside the band (includes the scale offset).
    pub centering_offset: f64,
    /// Glyph width after applying the width ratio.
    pub width: f64,
}

/// Configuration for a violin/box series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxLayoutSpec {
    /// Fraction of the capped band each glyph occupies.
    pub width_ratio: WidthRatio,
    /// Which axis carries the categories.
    pub orientation: Orientation,
    /// Cap on the glyph slot width.
    pub max_box_width: f64,
}

impl Default for BoxLayoutSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxLayoutSpec {
    /// Creates a vertical spec using the full band, capped at [`MAX_BOX_WIDTH`].
    pub fn new() -> Self {
        Self {
            width_ratio: WidthRatio::FULL,
            orientation: Orientation::Vertical,
            max_box_width: MAX_BOX_WIDTH,
        }
    }

    /// Sets the width ratio.
    pub fn with_width_ratio(mut self, width_ratio: WidthRatio) -> Self {
        self.width_ratio = width_ratio;
        self
    }

    /// Sets the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the cap on the glyph slot width.
    pub fn with_max_box_width(mut self, max_box_width: f64) -> Self {
        self.max_box_width = max_box_width;
        self
    }

    /// Computes the band-level metrics for `position_scale`.
    pub fn band_metrics<K, S>(&self, position_scale: &S) -> Result<BandMetrics, LayoutError>
    where
        K: ?Sized,
        S: BandScale<K> + ?Sized,
    {
        if !(self.max_box_width.is_finite() && self.max_box_width > 0.0) {
            return Err(LayoutError::InvalidMaxBoxWidth(self.max_box_width));
        }
        let band_width = position_scale.bandwidth();
        if !(band_width.is_finite() && band_width >= 0.0) {
            return Err(LayoutError::InvalidBandwidth(band_width));
        }
        let actual_width = self.max_box_width.min(band_width);
        Ok(BandMetrics {
            band_width,
            actual_width,
            centering_offset: position_scale.offset() - (band_width - actual_width) / 2.0,
            width: actual_width * self.width_ratio.get(),
        })
    }

    /// Lays out one glyph slot per record.
    ///
    /// Returns `Ok(None)` until both scales are available. Fails with
    /// [`LayoutError::OutOfDomain`] if a record's category is not in the position scale.
    pub fn layout<'a, K, S>(
        &self,
        data: &'a [BinnedDatum<K>],
        position_scale: Option<&S>,
        value_scale: Option<&ScaleContinuous>,
    ) -> Result<Option<BoxLayout<'a, K>>, LayoutError>
    where
        S: BandScale<K> + ?Sized,
    {
        let (Some(position_scale), Some(value_scale)) = (position_scale, value_scale) else {
            return Ok(None);
        };

        let metrics = self.band_metrics(position_scale)?;
        let inset = (1.0 - self.width_ratio.get()) / 2.0 * metrics.actual_width;

        let boxes = data
            .iter()
            .enumerate()
            .map(|(index, datum)| {
                let position = position_scale.position(&datum.x).inspect_err(|_| {
                    log::debug!("box layout: record {index} is outside the category domain");
                })?;
                Ok(BoxGeometry {
                    index,
                    offset: position - metrics.centering_offset + inset,
                    width: metrics.width,
                    orientation: self.orientation,
                    datum,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        log::debug!(
            "box layout: {} glyphs, band {} capped to {}, width {}",
            boxes.len(),
            metrics.band_width,
            metrics.actual_width,
            metrics.width
        );
        Ok(Some(BoxLayout {
            orientation: self.orientation,
            metrics,
            value_scale: *value_scale,
            boxes,
        }))
    }
}

/// The glyph slot computed for one record.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoxGeometry<'a, K> {
    /// Input index of the record.
    pub index: usize,
    /// Leading edge of the slot on the category axis.
    pub offset: f64,
    /// Slot width on the category axis.
    pub width: f64,
    /// Which axis `offset` and `width` apply to.
    pub orientation: Orientation,
    /// The input record, for the renderer.
    pub datum: &'a BinnedDatum<K>,
}

impl<K> Clone for BoxGeometry<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for BoxGeometry<'_, K> {}

impl<K> BoxGeometry<'_, K> {
    /// The glyph's left edge, for vertical layouts.
    pub fn left(&self) -> Option<f64> {
        (self.orientation == Orientation::Vertical).then_some(self.offset)
    }

    /// The glyph's top edge, for horizontal layouts.
    pub fn top(&self) -> Option<f64> {
        (self.orientation == Orientation::Horizontal).then_some(self.offset)
    }

    /// Bounding rectangle of the glyph spanning `value_span` (in range space) on the value axis.
    pub fn glyph_rect(&self, value_span: (f64, f64)) -> Rect {
        let (v0, v1) = value_span;
        let (lo, hi) = (v0.min(v1), v0.max(v1));
        let (start, end) = (self.offset, self.offset + self.width);
        match self.orientation {
            Orientation::Vertical => Rect::new(start, lo, end, hi),
            Orientation::Horizontal => Rect::new(lo, start, hi, end),
        }
    }
}

/// Output of [`BoxLayoutSpec::layout`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoxLayout<'a, K> {
    /// Which axis carries the categories.
    pub orientation: Orientation,
    /// Band-level metrics shared by every glyph.
    pub metrics: BandMetrics,
    /// The value scale, passed through for the renderer.
    pub value_scale: ScaleContinuous,
    /// One slot per input record, in input order.
    pub boxes: Vec<BoxGeometry<'a, K>>,
}

impl<K> BoxLayout<'_, K> {
    /// Bounding rectangle of `geometry`'s glyph, spanning its bins' value extent.
    ///
    /// Returns `None` for records without finite bins.
    pub fn glyph_rect(&self, geometry: &BoxGeometry<'_, K>) -> Option<Rect> {
        let (lo, hi) = geometry.datum.value_extent()?;
        Some(geometry.glyph_rect((self.value_scale.map(lo), self.value_scale.map(hi))))
    }
}
