//! Global layer-order solver for folded crease patterns.
//!
//! Given a FOLD record with folded vertex coordinates and mountain/valley
//! assignments, decides for every pair of coplanar overlapping faces which
//! one sits above the other, subject to the non-penetration rules of flat
//! folding (transitivity, taco-tortilla, taco-taco).

pub mod constraints;
pub mod dsu;
pub mod exact;
pub mod examples;
pub mod format;
pub mod geom;
pub mod plane_group;
pub mod project;
pub mod record;
pub mod solver;

use thiserror::Error;

pub use plane_group::PlaneGroups;
pub use record::{EdgeAssignment, FoldRecord};
pub use solver::{LayerOrder, LayerSolver};

/// Tolerance for plane-equation matching.
pub const EPS: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum Error {
  #[error("FOLD field is required: {0}")]
  FoldMissingField(&'static str),
  #[error("FOLD arrays disagree on the number of {kind}: {left} vs {right}")]
  FoldLengthMismatch {
    kind: &'static str,
    left: usize,
    right: usize,
  },
  #[error("FOLD file references nonexistent {0} at index {1}")]
  FoldInvalidReference(&'static str, usize),
  #[error("FOLD input contains invalid coordinates")]
  FoldBadCoordinates,
  #[error("FOLD input contains invalid angle assignment")]
  FoldBadAngle,
  #[error("unknown edge assignment {0:?}")]
  FoldBadAssignment(String),
  #[error("faces_vertices[{face}][{position}] does not match edges_vertices[{edge}]")]
  EdgeFaceMismatch {
    face: usize,
    position: usize,
    edge: usize,
  },
  #[error("multiple faces claim the same side of edge {0}")]
  EdgeSlotConflict(usize),
  #[error("edges_faces[{0}] disagrees with the faces_edges traversal")]
  EdgesFacesDisagree(usize),
  #[error("face {0} is degenerate: {1}")]
  DegenerateFace(usize, &'static str),
  #[error("face {face} leaves its plane by {residual} (tolerance {tolerance})")]
  NonPlanarFace {
    face: usize,
    residual: f64,
    tolerance: f64,
  },
  #[error("layer order infeasible")]
  Unsatisfiable,
  #[error("SAT solver failure: {0}")]
  SolverFailure(String),
}

/// Knobs for the solve pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
  /// Maximum out-of-plane residual tolerated before a face is rejected
  /// as non-planar.
  pub planarity_tolerance: f64,
}

impl Default for SolverOptions {
  fn default() -> Self {
    SolverOptions {
      planarity_tolerance: EPS,
    }
  }
}
