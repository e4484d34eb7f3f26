// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed-circle (beeswarm-like) series layout.
//!
//! Records sharing a category key are packed into a tight, non-overlapping cluster. Each cluster
//! is centered horizontally on its category's band and vertically on a baseline in local pack
//! space; callers map the resulting `y` through their value scale.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::{Circle, Point};
use smallvec::SmallVec;

use crate::LayoutError;
use crate::pack::pack_siblings;
use crate::scale::BandScale;

/// Circle size used when a record carries no size of its own.
pub const DEFAULT_CIRCLE_SIZE: f64 = 4.0;

/// A single input record for a packed-circle series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackDatum<K> {
    /// Category key; records with equal keys are packed together.
    pub x: K,
    /// Optional per-record circle radius.
    pub size: Option<f64>,
}

impl<K> PackDatum<K> {
    /// Creates a record without an explicit size.
    pub fn new(x: K) -> Self {
        Self { x, size: None }
    }

    /// Sets the circle radius for this record.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }
}

/// Signature of a custom size accessor: `(datum, index) -> radius`.
pub type SizeFn<K> = dyn Fn(&PackDatum<K>, usize) -> f64 + Send + Sync;

/// How each record's circle radius is determined.
pub enum SizeAccessor<K> {
    /// Use [`PackDatum::size`], falling back to the given radius when it is absent, zero, or NaN.
    Field {
        /// Radius for records without a size.
        fallback: f64,
    },
    /// Every circle gets the same radius.
    Constant(f64),
    /// Computes the radius from the record and its input index.
    Custom(Arc<SizeFn<K>>),
}

impl<K> SizeAccessor<K> {
    /// Wraps a closure as a custom accessor.
    pub fn custom(f: impl Fn(&PackDatum<K>, usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Resolves the radius of `datum` at input position `index`.
    pub fn size(&self, datum: &PackDatum<K>, index: usize) -> f64 {
        match self {
            Self::Field { fallback } => match datum.size {
                Some(size) if size != 0.0 && !size.is_nan() => size,
                _ => *fallback,
            },
            Self::Constant(size) => *size,
            Self::Custom(f) => f(datum, index),
        }
    }
}

impl<K> Default for SizeAccessor<K> {
    fn default() -> Self {
        Self::Field {
            fallback: DEFAULT_CIRCLE_SIZE,
        }
    }
}

impl<K> Clone for SizeAccessor<K> {
    fn clone(&self) -> Self {
        match self {
            Self::Field { fallback } => Self::Field {
                fallback: *fallback,
            },
            Self::Constant(size) => Self::Constant(*size),
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

/// Custom accessors compare by identity: two accessors are equal only if they share the same
/// closure allocation.
impl<K> PartialEq for SizeAccessor<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field { fallback: a }, Self::Field { fallback: b }) => a == b,
            (Self::Constant(a), Self::Constant(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<K> fmt::Debug for SizeAccessor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { fallback } => f
                .debug_struct("Field")
                .field("fallback", fallback)
                .finish(),
            Self::Constant(size) => f.debug_tuple("Constant").field(size).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A laid-out circle for one input record.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedCircle {
    /// Center x in the position scale's range space.
    pub x: f64,
    /// Center y in local pack space (relative to the baseline).
    pub y: f64,
    /// Circle radius.
    pub radius: f64,
    /// Index of the record this circle was produced from.
    pub source_index: usize,
}

impl PackedCircle {
    /// Returns the circle as a `kurbo` shape.
    pub fn circle(&self) -> Circle {
        Circle::new(Point::new(self.x, self.y), self.radius)
    }
}

/// The enclosing circle of one category's cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCluster {
    /// Input index of the first record in this category.
    pub first_index: usize,
    /// Number of records in this category.
    pub len: usize,
    /// Center x (the band center).
    pub x: f64,
    /// Center y (the baseline).
    pub y: f64,
    /// Radius of the enclosing circle.
    pub radius: f64,
}

/// Output of [`CirclePackSpec::layout`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CirclePackLayout {
    /// One circle per input record, in input order.
    pub circles: Vec<PackedCircle>,
    /// Minimum and maximum circle center `y`, or `None` for an empty series.
    pub extent: Option<(f64, f64)>,
    /// Per-category enclosing circles, in first-seen category order.
    pub clusters: Vec<CategoryCluster>,
}

/// Configuration for a packed-circle series.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePackSpec<K> {
    /// Circle radius accessor.
    pub size: SizeAccessor<K>,
    /// Vertical center of every cluster, in local pack space.
    pub baseline: f64,
}

impl<K> Default for CirclePackSpec<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> CirclePackSpec<K> {
    /// Creates a spec reading [`PackDatum::size`] with a fallback radius of
    /// [`DEFAULT_CIRCLE_SIZE`], centered on a baseline of `0`.
    pub fn new() -> Self {
        Self {
            size: SizeAccessor::default(),
            baseline: 0.0,
        }
    }

    /// Sets the size accessor.
    pub fn with_size(mut self, size: SizeAccessor<K>) -> Self {
        self.size = size;
        self
    }

    /// Sets the baseline clusters are vertically centered on.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }
}

impl<K: Eq + Hash> CirclePackSpec<K> {
    /// Lays out `data` against `x_scale`.
    ///
    /// Returns `Ok(None)` when the scale is not available yet. Fails if a record's key is not in
    /// the scale's domain or its size is negative or non-finite.
    pub fn layout<S>(
        &self,
        data: &[PackDatum<K>],
        x_scale: Option<&S>,
    ) -> Result<Option<CirclePackLayout>, LayoutError>
    where
        S: BandScale<K> + ?Sized,
    {
        let Some(x_scale) = x_scale else {
            return Ok(None);
        };

        let mut radii = Vec::with_capacity(data.len());
        for (index, datum) in data.iter().enumerate() {
            let size = self.size.size(datum, index);
            if !size.is_finite() || size < 0.0 {
                return Err(LayoutError::InvalidSize { index, size });
            }
            radii.push(size);
        }

        let groups = group_by_category(data);
        let band_width = x_scale.bandwidth();
        if !(band_width.is_finite() && band_width >= 0.0) {
            return Err(LayoutError::InvalidBandwidth(band_width));
        }
        let half_band = band_width / 2.0;
        let mut circles = alloc::vec![PackedCircle::default(); data.len()];
        let mut clusters = Vec::with_capacity(groups.len());
        let mut scratch: Vec<Circle> = Vec::new();

        for members in &groups {
            let first_index = members[0];
            let key = &data[first_index].x;
            let cx = x_scale.position(key).inspect_err(|_| {
                log::debug!("circle pack: record {first_index} is outside the x domain");
            })? + half_band;

            scratch.clear();
            scratch.extend(
                members
                    .iter()
                    .map(|&index| Circle::new(Point::ORIGIN, radii[index])),
            );
            let radius = pack_siblings(&mut scratch)
                .ok_or(LayoutError::Unenclosable { first_index })?;

            for (&index, packed) in members.iter().zip(&scratch) {
                circles[index] = PackedCircle {
                    x: cx + packed.center.x,
                    y: self.baseline + packed.center.y,
                    radius: packed.radius,
                    source_index: index,
                };
            }
            log::trace!(
                "circle pack: category at record {first_index} packed {} circles, radius {radius}",
                members.len()
            );
            clusters.push(CategoryCluster {
                first_index,
                len: members.len(),
                x: cx,
                y: self.baseline,
                radius,
            });
        }

        let extent = vertical_extent(&circles);
        log::debug!(
            "circle pack: {} records in {} categories, extent {extent:?}",
            data.len(),
            clusters.len()
        );
        Ok(Some(CirclePackLayout {
            circles,
            extent,
            clusters,
        }))
    }
}

type Members = SmallVec<[usize; 8]>;

/// Groups record indices by key, in first-seen key order.
fn group_by_category<K: Eq + Hash>(data: &[PackDatum<K>]) -> Vec<Members> {
    let mut slots: HashMap<&K, usize> = HashMap::new();
    let mut groups: Vec<Members> = Vec::new();
    for (index, datum) in data.iter().enumerate() {
        match slots.entry(&datum.x) {
            Entry::Occupied(slot) => groups[*slot.get()].push(index),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(smallvec::smallvec![index]);
            }
        }
    }
    groups
}

fn vertical_extent(circles: &[PackedCircle]) -> Option<(f64, f64)> {
    circles.iter().fold(None, |acc, c| match acc {
        None => Some((c.y, c.y)),
        Some((lo, hi)) => Some((lo.min(c.y), hi.max(c.y))),
    })
}
