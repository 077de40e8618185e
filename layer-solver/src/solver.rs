//! SAT dispatch and extraction of the pairwise layer order.

use std::collections::BTreeMap;

use log::debug;
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::TernaryVal;
use rustsat_glucose::simp::Glucose;

use crate::constraints::Encoding;
use crate::plane_group::PlaneGroups;
use crate::project::ProjectedGroups;
use crate::record::FoldRecord;
use crate::{Error, SolverOptions};

/// A fully assembled solve: the record, its plane groups, and the CNF
/// encoding, ready to be dispatched.
pub struct LayerSolver {
  record: FoldRecord,
  groups: PlaneGroups,
  encoding: Encoding,
}

impl LayerSolver {
  pub fn new(record: FoldRecord) -> Result<Self, Error> {
    Self::with_options(record, SolverOptions::default())
  }

  pub fn with_options(record: FoldRecord, options: SolverOptions) -> Result<Self, Error> {
    let groups = PlaneGroups::build_with(&record, options)?;
    debug!("plane groups:\n{}", groups);
    let proj = ProjectedGroups::build(&record, &groups)?;
    let encoding = Encoding::build(&record, &groups, &proj);
    debug!(
      "{} overlap variables across {} plane groups",
      encoding.overlaps_var.len(),
      groups.num_groups()
    );
    Ok(LayerSolver {
      record,
      groups,
      encoding,
    })
  }

  pub fn record(&self) -> &FoldRecord {
    &self.record
  }

  pub fn groups(&self) -> &PlaneGroups {
    &self.groups
  }

  pub fn encoding(&self) -> &Encoding {
    &self.encoding
  }

  /// Run the SAT solver and read back one valid stacking.
  pub fn solve(self) -> Result<LayerOrder, Error> {
    let Encoding {
      instance,
      overlaps_var,
      ..
    } = self.encoding;
    let (cnf, _) = instance.into_cnf();

    let mut solver = Glucose::default();
    solver
      .add_cnf(cnf)
      .map_err(|e| Error::SolverFailure(e.to_string()))?;
    match solver
      .solve()
      .map_err(|e| Error::SolverFailure(e.to_string()))?
    {
      SolverResult::Sat => {}
      SolverResult::Unsat => return Err(Error::Unsatisfiable),
      SolverResult::Interrupted => {
        return Err(Error::SolverFailure("solver interrupted".to_string()))
      }
    }
    let model = solver
      .full_solution()
      .map_err(|e| Error::SolverFailure(e.to_string()))?;

    let below = overlaps_var
      .iter()
      .map(|(&pair, &var)| (pair, model.var_value(var) == TernaryVal::True))
      .collect();
    Ok(LayerOrder { below })
  }
}

/// The solved pairwise order: one entry per overlap variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOrder {
  below: BTreeMap<(usize, usize), bool>,
}

impl LayerOrder {
  /// Is face `f1` below face `f2`? `None` when the pair never overlapped.
  pub fn below(&self, f1: usize, f2: usize) -> Option<bool> {
    let val = *self.below.get(&(f1.min(f2), f1.max(f2)))?;
    Some(if f1 < f2 { val } else { !val })
  }

  /// Entries in ascending pair order.
  pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), bool)> + '_ {
    self.below.iter().map(|(&pair, &val)| (pair, val))
  }

  pub fn len(&self) -> usize {
    self.below.len()
  }

  pub fn is_empty(&self) -> bool {
    self.below.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::examples;

  #[test]
  fn flat_square_solves_with_no_pairs() {
    let solver = LayerSolver::new(examples::flat_square()).unwrap();
    let order = solver.solve().unwrap();
    assert!(order.is_empty());
  }

  #[test]
  fn stacked_squares_are_ordered_by_the_valley() {
    let solver = LayerSolver::new(examples::two_stacked_squares()).unwrap();
    let order = solver.solve().unwrap();
    assert_eq!(order.len(), 1);
    assert_eq!(order.below(0, 1), Some(true));
    // antisymmetry is a sign flip, not a second entry
    assert_eq!(order.below(1, 0), Some(false));
    assert_eq!(order.below(0, 2), None);
  }
}
