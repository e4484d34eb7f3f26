// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-chain circle packing for a single group of sibling circles.
//!
//! Circles are placed one at a time, tangent to two adjacent circles of the *front chain* (the
//! cyclic boundary of the pack so far). If the candidate intersects another chain circle, the
//! chain is cut at that circle and placement is retried. After each insertion the chain pair
//! closest to the origin becomes the next anchor, which keeps the pack roughly circular.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Circle, Point};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::enclose::enclose;

/// Packs `circles` in place and centers the result on the origin.
///
/// Only radii are read; centers are overwritten. Circles are placed in slice order. Returns the
/// radius of the enclosing circle, or `None` if it could not be resolved.
pub(crate) fn pack_siblings(circles: &mut [Circle]) -> Option<f64> {
    let n = circles.len();
    if n == 0 {
        return Some(0.0);
    }

    circles[0].center = Point::ORIGIN;
    if n == 1 {
        return Some(circles[0].radius);
    }

    let (r0, r1) = (circles[0].radius, circles[1].radius);
    circles[0].center = Point::new(-r1, 0.0);
    circles[1].center = Point::new(r0, 0.0);
    if n == 2 {
        return Some(r0 + r1);
    }

    circles[2].center = place(circles[1], circles[0], circles[2].radius);

    let mut chain = FrontChain::new(n);
    chain.link(0, 1);
    chain.link(1, 2);
    chain.link(2, 0);

    let (mut a, mut b) = (0, 1);
    let mut i = 3;
    'pack: while i < n {
        circles[i].center = place(circles[a], circles[b], circles[i].radius);
        let c = circles[i];

        // Search outward from (a, b) for the closest chain circle intersecting `c`, measuring
        // closeness as accumulated radius along the chain in each direction.
        let mut j = chain.next[b];
        let mut k = chain.prev[a];
        let mut sj = circles[b].radius;
        let mut sk = circles[a].radius;
        loop {
            if sj <= sk {
                if intersects(circles[j], c) {
                    b = j;
                    chain.link(a, b);
                    continue 'pack;
                }
                sj += circles[j].radius;
                j = chain.next[j];
            } else {
                if intersects(circles[k], c) {
                    a = k;
                    chain.link(a, b);
                    continue 'pack;
                }
                sk += circles[k].radius;
                k = chain.prev[k];
            }
            if j == chain.next[k] {
                break;
            }
        }

        chain.link(a, i);
        chain.link(i, b);

        // Re-anchor on the chain pair whose weighted midpoint is closest to the origin.
        let mut best = a;
        let mut best_score = chain.score(circles, a);
        let mut node = chain.next[i];
        while node != i {
            let s = chain.score(circles, node);
            if s < best_score {
                best = node;
                best_score = s;
            }
            node = chain.next[node];
        }
        a = best;
        b = chain.next[a];
        i += 1;
    }

    let mut front = Vec::new();
    let mut node = b;
    loop {
        front.push(circles[node]);
        node = chain.next[node];
        if node == b {
            break;
        }
    }
    let e = enclose(&front)?;

    let shift = e.center.to_vec2();
    for c in circles.iter_mut() {
        c.center -= shift;
    }
    Some(e.radius)
}

/// Index-linked cyclic list over circle indices.
#[derive(Debug)]
struct FrontChain {
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl FrontChain {
    fn new(n: usize) -> Self {
        Self {
            next: vec![0; n],
            prev: vec![0; n],
        }
    }

    fn link(&mut self, from: usize, to: usize) {
        self.next[from] = to;
        self.prev[to] = from;
    }

    /// Squared distance from the origin to the radius-weighted midpoint of `node` and its
    /// successor.
    fn score(&self, circles: &[Circle], node: usize) -> f64 {
        let a = circles[node];
        let b = circles[self.next[node]];
        let ab = a.radius + b.radius;
        let dx = (a.center.x * b.radius + b.center.x * a.radius) / ab;
        let dy = (a.center.y * b.radius + b.center.y * a.radius) / ab;
        dx * dx + dy * dy
    }
}

/// Returns the center of a circle of radius `r` tangent to both `b` and `a`.
fn place(b: Circle, a: Circle, r: f64) -> Point {
    let dx = b.center.x - a.center.x;
    let dy = b.center.y - a.center.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 {
        return Point::new(a.center.x + r, a.center.y);
    }
    let a2 = (a.radius + r) * (a.radius + r);
    let b2 = (b.radius + r) * (b.radius + r);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        Point::new(b.center.x - x * dx - y * dy, b.center.y - x * dy + y * dx)
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        Point::new(a.center.x + x * dx - y * dy, a.center.y + x * dy + y * dx)
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.radius + b.radius - 1e-6;
    dr > 0.0 && dr * dr > (b.center - a.center).hypot2()
}
