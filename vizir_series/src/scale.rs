// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale adapters for series layouts.
//!
//! Layouts need two things from an axis scale: a key-to-position mapping, and for
//! categorical axes the band width plus a constant offset. [`PositionScale`] and
//! [`BandScale`] describe that contract; the concrete scales in this module implement it.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::LayoutError;

/// Maps keys from a domain into range space.
///
/// Implementations must be deterministic and monotonic with respect to the domain order.
pub trait PositionScale<K: ?Sized> {
    /// Maps `key` into range space.
    ///
    /// Returns [`LayoutError::OutOfDomain`] if the key is not a valid input for this scale.
    fn position(&self, key: &K) -> Result<f64, LayoutError>;
}

/// A discrete scale that allocates a fixed-width band to each key.
pub trait BandScale<K: ?Sized>: PositionScale<K> {
    /// Width of a single band. Constant for a given scale instance.
    fn bandwidth(&self) -> f64;

    /// Constant correction applied by consumers that re-center glyphs inside a band.
    fn offset(&self) -> f64 {
        0.0
    }
}

/// A discrete band scale addressed by band index.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
    round: bool,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
            round: false,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Snaps band starts and widths to whole units.
    ///
    /// Leftover space is split evenly on both ends of the range.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Returns `(start, step, band_width)`.
    fn metrics(&self) -> (f64, f64, f64) {
        let (r0, r1) = self.range;
        let lo = r0.min(r1);
        if self.count == 0 {
            return (lo, 0.0, 0.0);
        }
        let n = self.count as f64;
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        let bw = if denom == 0.0 { 0.0 } else { span / denom };
        let step = bw * (1.0 + self.padding_inner);
        if !self.round {
            return (lo + bw * self.padding_outer, step, bw);
        }
        let step = step.floor();
        let bw = bw.floor();
        let used = step * (n - 1.0) + bw;
        ((lo + (span - used) / 2.0).round(), step, bw)
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.metrics().2
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.metrics().1
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (start, step, _) = self.metrics();
        start + step * index as f64
    }
}

impl PositionScale<usize> for ScaleBand {
    fn position(&self, index: &usize) -> Result<f64, LayoutError> {
        if *index >= self.count {
            return Err(LayoutError::OutOfDomain);
        }
        Ok(self.x(*index))
    }
}

impl BandScale<usize> for ScaleBand {
    fn bandwidth(&self) -> f64 {
        self.band_width()
    }
}

/// A band scale over an explicit, ordered domain of category keys.
///
/// Keys are compared with `PartialEq`; lookups scan the domain, which is expected to be small
/// (one entry per visible category).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrdinalScale<K> {
    domain: Vec<K>,
    band: ScaleBand,
    offset: f64,
}

impl<K: PartialEq> OrdinalScale<K> {
    /// Creates an ordinal scale assigning one band of `range` to each domain key, in order.
    ///
    /// Fails with [`LayoutError::DuplicateDomainKey`] if a key appears twice.
    pub fn new(domain: Vec<K>, range: (f64, f64)) -> Result<Self, LayoutError> {
        for (index, key) in domain.iter().enumerate() {
            if domain[..index].contains(key) {
                return Err(LayoutError::DuplicateDomainKey { index });
            }
        }
        let band = ScaleBand::new(range, domain.len());
        Ok(Self {
            domain,
            band,
            offset: 0.0,
        })
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.band = self.band.with_padding(inner, outer);
        self
    }

    /// Snaps band starts and widths to whole units.
    pub fn with_round(mut self, round: bool) -> Self {
        self.band = self.band.with_round(round);
        self
    }

    /// Sets the constant offset reported through [`BandScale::offset`].
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the domain keys in band order.
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Returns the underlying index-based band scale.
    pub fn band(&self) -> ScaleBand {
        self.band
    }

    /// Returns the band index of `key`, if it is in the domain.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.domain.iter().position(|k| k == key)
    }
}

impl<K: PartialEq> PositionScale<K> for OrdinalScale<K> {
    fn position(&self, key: &K) -> Result<f64, LayoutError> {
        let index = self.index_of(key).ok_or(LayoutError::OutOfDomain)?;
        Ok(self.band.x(index))
    }
}

impl<K: PartialEq> BandScale<K> for OrdinalScale<K> {
    fn bandwidth(&self) -> f64 {
        self.band.band_width()
    }

    fn offset(&self) -> f64 {
        self.offset
    }
}

/// A continuous scale instance used on value axes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
        }
    }
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleLog> for ScaleContinuous {
    fn from(value: ScaleLog) -> Self {
        Self::Log(value)
    }
}

impl PositionScale<f64> for ScaleContinuous {
    fn position(&self, x: &f64) -> Result<f64, LayoutError> {
        match self {
            Self::Linear(s) => s.position(x),
            Self::Log(s) => s.position(x),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
///
/// Values outside the domain extrapolate; the scale is not clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

impl PositionScale<f64> for ScaleLinear {
    fn position(&self, x: &f64) -> Result<f64, LayoutError> {
        if !x.is_finite() {
            return Err(LayoutError::OutOfDomain);
        }
        Ok(self.map(*x))
    }
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new log scale with base 10.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base. Invalid bases fall back to 10.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    /// Maps a value from domain space into range space.
    ///
    /// Non-positive values map to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let denom = self.log_base(d1) - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }
}

impl PositionScale<f64> for ScaleLog {
    fn position(&self, x: &f64) -> Result<f64, LayoutError> {
        if !x.is_finite() || *x <= 0.0 {
            return Err(LayoutError::OutOfDomain);
        }
        Ok(self.map(*x))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn band_positions_without_padding_tile_the_range() {
        let band = ScaleBand::new((0.0, 100.0), 4).with_padding(0.0, 0.0);
        assert_eq!(band.band_width(), 25.0);
        assert_eq!(band.x(0), 0.0);
        assert_eq!(band.x(3), 75.0);
        assert_eq!(band.position(&4), Err(LayoutError::OutOfDomain));
    }

    #[test]
    fn rounded_bands_are_whole_and_centered() {
        let band = ScaleBand::new((0.0, 100.0), 3)
            .with_padding(0.0, 0.0)
            .with_round(true);
        assert_eq!(band.band_width(), 33.0);
        assert_eq!(band.step(), 33.0);
        // 99 units used, 1 unit of slack split across both ends.
        assert_eq!(band.x(0), 1.0);
        assert_eq!(band.x(2), 67.0);
    }

    #[test]
    fn ordinal_scale_looks_up_keys_in_domain_order() {
        let scale = OrdinalScale::new(vec!["a", "b", "c"], (0.0, 90.0))
            .unwrap()
            .with_padding(0.0, 0.0)
            .with_offset(2.0);
        assert_eq!(scale.position(&"b"), Ok(30.0));
        assert_eq!(scale.bandwidth(), 30.0);
        assert_eq!(scale.offset(), 2.0);
        assert_eq!(scale.position(&"z"), Err(LayoutError::OutOfDomain));
    }

    #[test]
    fn ordinal_scale_rejects_duplicate_keys() {
        let err = OrdinalScale::new(vec![1, 2, 1], (0.0, 10.0)).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateDomainKey { index: 2 });
    }

    #[test]
    fn linear_scale_inverts_and_extrapolates() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.map(-10.0), 200.0);
        assert!((s.invert(s.map(3.5)) - 3.5).abs() < 1e-12);
        assert_eq!(s.position(&f64::NAN), Err(LayoutError::OutOfDomain));
    }

    #[test]
    fn log_scale_maps_endpoints_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(100.0) - 10.0).abs() < 1e-9);
        let s = ScaleContinuous::from(s);
        assert_eq!(s.position(&0.0), Err(LayoutError::OutOfDomain));
    }
}
