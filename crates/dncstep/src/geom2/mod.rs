//! 2D geometry kernel and point storage.
//!
//! Purpose
//! - Provide the stateless predicates (`distance2`, `orientation`, `is_left_of`,
//!   `perpendicular_distance`) and the validated `PointSet` every stepper reads.
//! - Keep numerics explicit: squared distances, strict eps-aware side tests.
//!
//! Code cross-refs: `closest_pair`, `quickhull`, `cfg::LEFT_EPS`

mod kernel;
pub mod rand;
mod types;

pub use kernel::{
    cmp_xy, distance2, edge_key, extreme_x, ids_left_of, is_left_of, orientation,
    perpendicular_distance,
};
pub use types::{InputError, Point, PointId, PointSet};

#[cfg(test)]
mod tests;
