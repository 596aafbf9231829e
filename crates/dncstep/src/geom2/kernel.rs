//! Stateless 2D predicates used by the solvers.
//!
//! Conventions
//! - Cartesian, y-up. `orientation(a, b, p) > 0` means `p` lies to the left of
//!   the directed line `a → b` (counter-clockwise turn).
//! - Squared distances everywhere; `sqrt` only where a length is compared
//!   against a coordinate offset (strip width, line distance).

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::types::{PointId, PointSet};

/// Squared Euclidean distance.
#[inline]
pub fn distance2(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (b - a).norm_squared()
}

/// Signed twice-area of triangle `a, b, p`: `cross(b - a, p - a)`.
#[inline]
pub fn orientation(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    ab.x * ap.y - ab.y * ap.x
}

/// Strictly left of `a → b` with slack `eps`; near-collinear counts as not-left.
#[inline]
pub fn is_left_of(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, eps: f64) -> bool {
    orientation(a, b, p) > eps
}

/// Distance from `p` to the line through `a` and `b`.
///
/// A zero-length edge uses denominator 1, i.e. returns `|orientation|` (= 0).
#[inline]
pub fn perpendicular_distance(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> f64 {
    let len = (b - a).norm();
    let denom = if len > 0.0 { len } else { 1.0 };
    orientation(a, b, p).abs() / denom
}

/// Candidates strictly left of `a → b`, excluding `a` and `b` themselves.
pub fn ids_left_of(
    points: &PointSet,
    a: PointId,
    b: PointId,
    candidates: &[PointId],
    eps: f64,
) -> Vec<PointId> {
    let pa = points.pos(a);
    let pb = points.pos(b);
    candidates
        .iter()
        .copied()
        .filter(|&id| id != a && id != b && is_left_of(pa, pb, points.pos(id), eps))
        .collect()
}

/// Order-independent key for the undirected edge `{a, b}`.
#[inline]
pub fn edge_key(a: PointId, b: PointId) -> (PointId, PointId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Lexicographic `(x, y)` comparison of two positions.
#[inline]
pub fn cmp_xy(a: Vector2<f64>, b: Vector2<f64>) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Leftmost and rightmost points (ties on x broken by y); first wins on exact ties.
pub fn extreme_x(points: &PointSet) -> Option<(PointId, PointId)> {
    let mut it = points.iter();
    let first = it.next()?;
    let (mut lo, mut hi) = (first, first);
    for p in it {
        if cmp_xy(p.pos, lo.pos) == Ordering::Less {
            lo = p;
        }
        if cmp_xy(p.pos, hi.pos) == Ordering::Greater {
            hi = p;
        }
    }
    Some((lo.id, hi.id))
}
