//! Point identity and the flat `id → Point` store shared by every solver.
//!
//! - `PointId`: process-unique integer handle; ordering is the numeric order.
//! - `Point`: immutable id + position (`Vector2<f64>`, y-up).
//! - `PointSet`: owns the points in input order plus an id index.
//!
//! References
//! - Code cross-refs: `kernel::{distance2, orientation}`, `rand::random_points`

use std::collections::HashMap;
use std::fmt;

use nalgebra::Vector2;

/// Identifier of a point inside a `PointSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A point in the plane. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub id: PointId,
    pub pos: Vector2<f64>,
}

impl Point {
    #[inline]
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self {
            id: PointId(id),
            pos: Vector2::new(x, y),
        }
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }
}

/// Errors surfaced when building a point set.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Two points share the same id.
    DuplicateId { id: PointId },
    /// A coordinate is NaN or infinite.
    NonFinite { id: PointId },
    /// No id left above the current maximum.
    IdsExhausted,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::DuplicateId { id } => write!(f, "point id {id} appears more than once"),
            InputError::NonFinite { id } => {
                write!(f, "point {id} has a non-finite coordinate")
            }
            InputError::IdsExhausted => write!(f, "no point id left above the current maximum"),
        }
    }
}

impl std::error::Error for InputError {}

/// Flat mapping `id → Point`, kept in input order.
///
/// Invariants:
/// - Ids are unique.
/// - Every coordinate is finite.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointSet {
    points: Vec<Point>,
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<PointId, usize>,
}

impl PointSet {
    /// Validate and index `points`.
    pub fn new(points: Vec<Point>) -> Result<Self, InputError> {
        let mut index = HashMap::with_capacity(points.len());
        for (k, p) in points.iter().enumerate() {
            if !(p.pos.x.is_finite() && p.pos.y.is_finite()) {
                return Err(InputError::NonFinite { id: p.id });
            }
            if index.insert(p.id, k).is_some() {
                return Err(InputError::DuplicateId { id: p.id });
            }
        }
        Ok(Self { points, index })
    }

    /// Build from raw coordinates, assigning ids `0..n` in order.
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self, InputError> {
        let points = coords
            .iter()
            .enumerate()
            .map(|(k, &(x, y))| Point::new(k, x, y))
            .collect();
        Self::new(points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.index.get(&id).map(|&k| &self.points[k])
    }

    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of a point known to be in the set.
    ///
    /// Panics if `id` is not part of the set; solver code only passes ids
    /// that came out of this set.
    #[inline]
    pub fn pos(&self, id: PointId) -> Vector2<f64> {
        self.points[self.index[&id]].pos
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// All ids in input order.
    pub fn ids(&self) -> Vec<PointId> {
        self.points.iter().map(|p| p.id).collect()
    }

    /// One past the current maximum id; `None` once `usize::MAX` is taken.
    pub fn next_id(&self) -> Option<PointId> {
        match self.points.iter().map(|p| p.id.0).max() {
            Some(max) => max.checked_add(1).map(PointId),
            None => Some(PointId(0)),
        }
    }

    /// A new set with one extra point appended under `next_id()`.
    pub fn with_point(&self, x: f64, y: f64) -> Result<Self, InputError> {
        let id = self.next_id().ok_or(InputError::IdsExhausted)?;
        let mut points = self.points.clone();
        points.push(Point::new(id.0, x, y));
        Self::new(points)
    }
}

impl std::ops::Index<PointId> for PointSet {
    type Output = Point;
    #[inline]
    fn index(&self, id: PointId) -> &Point {
        &self.points[self.index[&id]]
    }
}
