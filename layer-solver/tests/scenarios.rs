//! End-to-end solves of small folded records.

use layer_solver::examples;
use layer_solver::record::EdgeAssignment::{Mountain, Valley};
use layer_solver::{Error, LayerSolver};

#[test]
fn flat_unfolded_square() {
  let solver = LayerSolver::new(examples::flat_square()).unwrap();
  assert_eq!(solver.groups().num_groups(), 1);
  assert_eq!(solver.groups().planegroups_faces[0], vec![0]);
  assert!(solver.encoding().overlaps_var.is_empty());
  let order = solver.solve().unwrap();
  assert!(order.is_empty());
}

#[test]
fn valley_folded_squares_stack() {
  let solver = LayerSolver::new(examples::two_stacked_squares()).unwrap();
  assert_eq!(solver.groups().num_groups(), 1);
  assert_eq!(solver.groups().planegroups_faces[0].len(), 2);
  let order = solver.solve().unwrap();
  let entries: Vec<_> = order.iter().collect();
  assert_eq!(entries, vec![((0, 1), true)]);
}

#[test]
fn zigzag_strip_has_a_unique_stack() {
  let solver = LayerSolver::new(examples::miura_strip()).unwrap();
  assert_eq!(solver.groups().num_groups(), 1);
  assert_eq!(solver.encoding().overlaps_var.len(), 3);
  let order = solver.solve().unwrap();
  // panel 0 under panel 1 under panel 2; transitivity pins the third pair
  assert_eq!(order.below(0, 1), Some(true));
  assert_eq!(order.below(1, 2), Some(true));
  assert_eq!(order.below(0, 2), Some(true));
}

#[test]
fn waterbomb_crease_pattern_is_one_plane() {
  let solver = LayerSolver::new(examples::waterbomb_flat()).unwrap();
  let groups = solver.groups();
  assert_eq!(groups.num_groups(), 1);
  assert_eq!(groups.planegroups_faces[0].len(), 17);
  for face in 0..17 {
    assert_eq!(groups.faces_planegroup[face], 0);
    assert!(!groups.faces_dir[face]);
  }
  // faces tile the sheet without overlap, so the solve is trivial
  assert!(solver.encoding().overlaps_var.is_empty());
  let order = solver.solve().unwrap();
  assert!(order.is_empty());
}

#[test]
fn maekawa_violation_is_unsatisfiable() {
  let record = examples::four_quadrant_vertex([Mountain, Valley, Mountain, Valley]);
  let solver = LayerSolver::new(record).unwrap();
  match solver.solve() {
    Err(Error::Unsatisfiable) => {}
    other => panic!("expected infeasible layer order, got {:?}", other),
  }
}

#[test]
fn flat_foldable_vertex_stacks_uniquely() {
  let record = examples::four_quadrant_vertex([Mountain, Valley, Valley, Valley]);
  let solver = LayerSolver::new(record).unwrap();
  assert_eq!(solver.encoding().overlaps_var.len(), 6);
  let order = solver.solve().unwrap();
  // the only stack is quadrant 2, then 3, then 0, then 1
  for (low, high) in [(2, 3), (3, 0), (0, 1), (2, 0), (3, 1), (2, 1)] {
    assert_eq!(order.below(low, high), Some(true), "{} under {}", low, high);
    assert_eq!(order.below(high, low), Some(false));
  }
}

#[test]
fn coplanar_non_overlapping_squares() {
  let solver = LayerSolver::new(examples::separated_squares()).unwrap();
  assert_eq!(solver.groups().num_groups(), 1);
  assert_eq!(solver.groups().planegroups_faces[0].len(), 2);
  assert!(solver.encoding().overlaps_var.is_empty());
  let order = solver.solve().unwrap();
  assert!(order.is_empty());
}

#[test]
fn encoding_is_deterministic() {
  let build = || {
    let solver = LayerSolver::new(examples::miura_strip()).unwrap();
    let vars: Vec<_> = solver.encoding().overlaps_var.iter().map(|(&k, &v)| (k, v)).collect();
    (vars, solver)
  };
  let (vars_a, solver_a) = build();
  let (vars_b, solver_b) = build();
  assert_eq!(vars_a, vars_b);
  assert_eq!(solver_a.solve().unwrap(), solver_b.solve().unwrap());
}
