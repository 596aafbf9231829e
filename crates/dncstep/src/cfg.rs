//! Algorithm constants and tolerance defaults (internal).
//!
//! Policy
//! - Defaults are fixed constants; only the Quickhull side-test slack is
//!   exposed through `quickhull::HullCfg`.

/// Largest closest-pair subproblem solved by brute force.
pub(crate) const BASE_CASE_MAX: usize = 3;
/// Number of following strip points (in y order) compared against each strip point.
pub(crate) const STRIP_WINDOW: usize = 7;
/// Slack for the strict left-of test; near-collinear points count as not-left.
pub(crate) const LEFT_EPS: f64 = 1e-12;
