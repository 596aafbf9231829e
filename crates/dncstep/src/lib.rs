//! Divide-and-conquer algorithms as explicit, externally driven state machines.
//!
//! Every solver is an immutable snapshot implementing `stepper::Stepper`: the
//! caller asks which of Divide, Conquer, Combine is enabled, applies one, and
//! gets a new snapshot back. Earlier snapshots stay valid, which is what undo,
//! replay and side-by-side views rely on.
//!
//! Solvers
//! - `closest_pair`: median split by x, brute-force base case, strip combine.
//! - `quickhull`: baseline split into two chains, pivot/partition, edge collection.
//! - `maxsub`: maximum subarray over index ranges.
//! - `mergesort`: stable merge sort over a working array.
//!
//! Coordinates are y-up Cartesian; see `geom2` for the predicates.

pub mod closest_pair;
pub mod geom2;
pub mod maxsub;
pub mod mergesort;
pub mod quickhull;
pub mod stepper;
pub mod tree;

mod cfg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::closest_pair::{ClosestPair, CpEvent, Pair};
    pub use crate::geom2::rand::{random_points, PointGenCfg, ReplayToken};
    pub use crate::geom2::{Point, PointId, PointSet};
    pub use crate::maxsub::{MaxSubEvent, MaxSubarray, Summary};
    pub use crate::mergesort::{MergeSort, MergeWrite, SortEvent};
    pub use crate::quickhull::{Chain, HullCfg, HullCfgError, HullEdge, HullEvent, Quickhull};
    pub use crate::stepper::{Action, Observer, Recorder, Stepper};
    pub use crate::tree::{NodeId, Tree};
}
