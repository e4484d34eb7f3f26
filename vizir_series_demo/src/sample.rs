// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic sample data.

use vizir_series::{Bin, BinnedDatum, PackDatum};

/// Lower and upper bound of generated values.
pub(crate) const VALUE_RANGE: (f64, f64) = (0.0, 100.0);

const BIN_COUNT: usize = 10;

/// Linear congruential generator; the same seed always yields the same sample.
#[derive(Debug)]
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in `[0, 1)`.
    pub(crate) fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }

    /// Roughly bell-shaped in `[0, 1)`.
    fn next_bell(&mut self) -> f64 {
        (self.next_f64() + self.next_f64() + self.next_f64()) / 3.0
    }
}

pub(crate) fn category_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("c{i}")).collect()
}

/// `per_category` records per key, interleaved, with sizes in `[1, 7)`.
pub(crate) fn pack_records(
    keys: &[String],
    per_category: usize,
    rng: &mut Lcg,
) -> Vec<PackDatum<String>> {
    let mut out = Vec::with_capacity(keys.len() * per_category);
    for _ in 0..per_category {
        for key in keys {
            out.push(PackDatum::new(key.clone()).with_size(1.0 + rng.next_f64() * 6.0));
        }
    }
    out
}

/// One binned distribution per key, built from `per_category` samples.
pub(crate) fn violin_records(
    keys: &[String],
    per_category: usize,
    rng: &mut Lcg,
) -> Vec<BinnedDatum<String>> {
    let (lo, hi) = VALUE_RANGE;
    let step = (hi - lo) / BIN_COUNT as f64;
    keys.iter()
        .map(|key| {
            let mut counts = [0_u32; BIN_COUNT];
            for _ in 0..per_category {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "the slot is clamped to the bin count below"
                )]
                let slot = (rng.next_bell() * BIN_COUNT as f64) as usize;
                counts[slot.min(BIN_COUNT - 1)] += 1;
            }
            let bins = counts
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(i, count)| Bin::new(lo + step * (i as f64 + 0.5), f64::from(*count)))
                .collect();
            BinnedDatum::new(key.clone(), bins)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_reproducible() {
        let keys = category_keys(2);
        let a = pack_records(&keys, 5, &mut Lcg::new(9));
        let b = pack_records(&keys, 5, &mut Lcg::new(9));
        assert_eq!(a, b, "same seed, same records");
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn violin_bins_count_every_sample() {
        let keys = category_keys(3);
        for datum in violin_records(&keys, 40, &mut Lcg::new(1)) {
            let total: f64 = datum.bin_data.iter().map(|b| b.count).sum();
            assert_eq!(total, 40.0, "bins of {} lose samples", datum.x);
        }
    }
}
