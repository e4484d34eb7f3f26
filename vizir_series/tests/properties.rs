// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-module layout properties: count preservation, non-overlap, width capping, stability.

use vizir_series::{
    Bin, BinnedDatum, BoxLayoutSpec, CirclePackSpec, LayoutError, MAX_BOX_WIDTH, OrdinalScale,
    PackDatum, PackedCircle, ScaleContinuous, ScaleLinear, SizeAccessor, WidthRatio,
};

/// Small deterministic generator so size distributions are reproducible.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn categories() -> OrdinalScale<u32> {
    OrdinalScale::new((0..4).collect(), (0.0, 400.0)).unwrap()
}

fn assert_no_overlap_within_categories(data: &[PackDatum<u32>], circles: &[PackedCircle]) {
    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            if data[a.source_index].x != data[b.source_index].x {
                continue;
            }
            let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
            assert!(
                d >= a.radius + b.radius - 1e-6,
                "records {} and {} overlap: distance {d}, radii {} + {}",
                a.source_index,
                b.source_index,
                a.radius,
                b.radius
            );
        }
    }
}

fn pack(data: &[PackDatum<u32>]) -> Vec<PackedCircle> {
    CirclePackSpec::new()
        .layout(data, Some(&categories()))
        .unwrap()
        .unwrap()
        .circles
}

#[test]
fn equal_sizes_never_overlap() {
    let data: Vec<_> = (0..120).map(|i| PackDatum::new(i % 4)).collect();
    let circles = pack(&data);
    assert_eq!(circles.len(), data.len());
    assert_no_overlap_within_categories(&data, &circles);
}

#[test]
fn random_sizes_never_overlap() {
    let mut rng = Rng(7);
    let data: Vec<_> = (0..200)
        .map(|i| PackDatum::new(i % 3).with_size(0.5 + rng.next_f64() * 6.0))
        .collect();
    let circles = pack(&data);
    assert_eq!(circles.len(), data.len());
    assert_no_overlap_within_categories(&data, &circles);
}

#[test]
fn skewed_sizes_never_overlap() {
    let mut rng = Rng(42);
    let data: Vec<_> = (0..150)
        .map(|i| {
            let size = if i % 25 == 0 {
                40.0
            } else {
                0.2 + rng.next_f64().powi(4) * 3.0
            };
            PackDatum::new(i % 2).with_size(size)
        })
        .collect();
    let circles = pack(&data);
    assert_no_overlap_within_categories(&data, &circles);
}

#[test]
fn output_indices_mirror_input_order() {
    let data: Vec<_> = [3, 0, 3, 1, 0, 2, 2, 3]
        .into_iter()
        .map(PackDatum::new)
        .collect();
    let circles = pack(&data);
    for (i, c) in circles.iter().enumerate() {
        assert_eq!(c.source_index, i, "circle {i} is out of place");
    }
}

#[test]
fn clusters_are_centered_on_their_band() {
    let data: Vec<_> = (0..30).map(|i| PackDatum::new(i % 2)).collect();
    let out = CirclePackSpec::new()
        .with_size(SizeAccessor::Constant(3.0))
        .layout(&data, Some(&categories()))
        .unwrap()
        .unwrap();
    let scale = categories();
    for cluster in &out.clusters {
        let key = data[cluster.first_index].x;
        let band = scale.band();
        let expected = band.x(key as usize) + band.band_width() / 2.0;
        assert!((cluster.x - expected).abs() < 1e-9, "cluster {key} off center");
    }
    let (lo, hi) = out.extent.unwrap();
    assert!(lo < 0.0 && hi > 0.0, "clusters straddle the baseline: {lo}..{hi}");
}

#[test]
fn layout_is_stable_across_calls() {
    let mut rng = Rng(3);
    let data: Vec<_> = (0..80)
        .map(|i| PackDatum::new(i % 4).with_size(1.0 + rng.next_f64() * 4.0))
        .collect();
    assert_eq!(pack(&data), pack(&data));
}

#[test]
fn box_width_is_capped_and_shared() {
    let values: ScaleContinuous = ScaleLinear::new((0.0, 1.0), (0.0, 100.0)).into();
    let data: Vec<_> = (0..4_u32)
        .map(|k| BinnedDatum::new(k, vec![Bin::new(0.5, 1.0)]))
        .collect();
    for band_width in [10.0, 30.0, 50.0, 80.0, 200.0] {
        let scale = OrdinalScale::new((0..4_u32).collect(), (0.0, 4.0 * band_width))
            .unwrap()
            .with_padding(0.0, 0.0);
        let layout = BoxLayoutSpec::new()
            .with_width_ratio(WidthRatio::new(0.8).unwrap())
            .layout(&data, Some(&scale), Some(&values))
            .unwrap()
            .unwrap();
        let actual: f64 = band_width.min(MAX_BOX_WIDTH);
        assert_eq!(layout.metrics.actual_width, actual);
        let mut previous = f64::NEG_INFINITY;
        for g in &layout.boxes {
            assert!((g.width - actual * 0.8).abs() < 1e-12, "width {}", g.width);
            assert!(g.offset > previous, "offsets follow category order");
            previous = g.offset;
        }
    }
}

#[test]
fn invalid_width_ratio_is_rejected_at_construction() {
    assert_eq!(
        WidthRatio::new(-0.25),
        Err(LayoutError::InvalidWidthRatio(-0.25))
    );
}
