// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smallest enclosing circle of a set of circles.
//!
//! This is Welzl's move-to-front algorithm generalized to circles: the input is shuffled,
//! then each circle not already (weakly) enclosed extends a basis of at most three circles
//! that determines the current enclosing circle.
//!
//! The shuffle uses a fixed-seed linear congruential generator, so the result depends only on
//! the input.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Circle, Point};
use smallvec::{SmallVec, smallvec};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

type Basis = SmallVec<[Circle; 3]>;

/// Returns the smallest circle enclosing all of `circles`, or `None` if `circles` is empty or
/// numerically degenerate.
pub(crate) fn enclose(circles: &[Circle]) -> Option<Circle> {
    let mut circles: Vec<Circle> = circles.to_vec();
    shuffle(&mut circles, &mut Lcg::new());

    let mut basis = Basis::new();
    let mut enclosing: Option<Circle> = None;
    let mut i = 0;
    while i < circles.len() {
        let p = circles[i];
        if let Some(e) = enclosing
            && encloses_weak(e, p)
        {
            i += 1;
            continue;
        }
        basis = extend_basis(&basis, p)?;
        enclosing = Some(enclose_basis(&basis));
        i = 0;
    }
    enclosing
}

fn extend_basis(basis: &[Circle], p: Circle) -> Option<Basis> {
    if encloses_weak_all(p, basis) {
        return Some(smallvec![p]);
    }

    for &b in basis {
        if encloses_not(p, b) && encloses_weak_all(enclose_basis2(b, p), basis) {
            return Some(smallvec![b, p]);
        }
    }

    for (i, &bi) in basis.iter().enumerate() {
        for &bj in &basis[i + 1..] {
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return Some(smallvec![bi, bj, p]);
            }
        }
    }

    log::debug!("enclosing circle basis could not be extended");
    None
}

/// `a` does not fully contain `b`.
fn encloses_not(a: Circle, b: Circle) -> bool {
    let dr = a.radius - b.radius;
    dr < 0.0 || dr * dr < (b.center - a.center).hypot2()
}

/// `a` contains `b`, with a relative tolerance.
fn encloses_weak(a: Circle, b: Circle) -> bool {
    let dr = a.radius - b.radius + a.radius.max(b.radius).max(1.0) * 1e-9;
    dr > 0.0 && dr * dr > (b.center - a.center).hypot2()
}

fn encloses_weak_all(a: Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Circle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(*a, *b),
        [a, b, c] => enclose_basis3(*a, *b, *c),
        _ => unreachable!("a basis holds one to three circles"),
    }
}

fn enclose_basis2(a: Circle, b: Circle) -> Circle {
    let d = b.center - a.center;
    let r21 = b.radius - a.radius;
    let l = d.hypot2().sqrt();
    Circle::new(
        Point::new(
            (a.center.x + b.center.x + d.x / l * r21) / 2.0,
            (a.center.y + b.center.y + d.y / l * r21) / 2.0,
        ),
        (l + a.radius + b.radius) / 2.0,
    )
}

fn enclose_basis3(a: Circle, b: Circle, c: Circle) -> Circle {
    let (x1, y1, r1) = (a.center.x, a.center.y, a.radius);
    let (x2, y2, r2) = (b.center.x, b.center.y, b.radius);
    let (x3, y3, r3) = (c.center.x, c.center.y, c.radius);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = if qa.abs() > 1e-6 {
        -(qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        -(qc / qb)
    };
    Circle::new(Point::new(x1 + xa + xb * r, y1 + ya + yb * r), r)
}

/// Deterministic `[0, 1)` generator (Numerical Recipes constants, seed 1).
#[derive(Debug)]
struct Lcg(u64);

impl Lcg {
    const MUL: u64 = 1_664_525;
    const INC: u64 = 1_013_904_223;
    const MOD: u64 = 1 << 32;

    fn new() -> Self {
        Self(1)
    }

    fn next_f64(&mut self) -> f64 {
        self.0 = (Self::MUL * self.0 + Self::INC) % Self::MOD;
        self.0 as f64 / Self::MOD as f64
    }
}

/// Fisher-Yates shuffle driven by `rng`.
fn shuffle<T>(items: &mut [T], rng: &mut Lcg) {
    let mut m = items.len();
    while m > 0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the product is in [0, m) and m is a slice length"
        )]
        let i = (rng.next_f64() * m as f64) as usize;
        m -= 1;
        items.swap(m, i);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn contains(outer: Circle, inner: Circle) -> bool {
        let d = (inner.center - outer.center).hypot2().sqrt();
        d + inner.radius <= outer.radius + 1e-9
    }

    #[test]
    fn single_circle_encloses_itself() {
        let c = Circle::new((3.0, -2.0), 5.0);
        assert_eq!(enclose(&[c]), Some(c));
    }

    #[test]
    fn two_circles_share_a_diameter() {
        let a = Circle::new((-1.0, 0.0), 1.0);
        let b = Circle::new((2.0, 0.0), 2.0);
        let e = enclose(&[a, b]).unwrap();
        assert!((e.radius - 3.0).abs() < 1e-9, "radius {}", e.radius);
        assert!((e.center.x - 1.0).abs() < 1e-9, "center {:?}", e.center);
        assert!(contains(e, a) && contains(e, b), "{e:?}");
    }

    #[test]
    fn encloses_every_input_circle() {
        let circles = vec![
            Circle::new((0.0, 0.0), 1.0),
            Circle::new((4.0, 1.0), 2.0),
            Circle::new((-3.0, 2.5), 0.5),
            Circle::new((1.0, -4.0), 1.5),
            Circle::new((0.5, 0.5), 0.25),
        ];
        let e = enclose(&circles).unwrap();
        for &c in &circles {
            assert!(contains(e, c), "{c:?} escapes {e:?}");
        }
    }

    #[test]
    fn empty_input_has_no_enclosing_circle() {
        assert_eq!(enclose(&[]), None);
    }

    #[test]
    fn lcg_sequence_is_fixed() {
        let mut a = Lcg::new();
        let mut b = Lcg::new();
        for _ in 0..16 {
            let v = a.next_f64();
            assert!((0.0..1.0).contains(&v), "{v} out of range");
            assert_eq!(v, b.next_f64());
        }
    }
}
