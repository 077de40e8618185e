//! Hand-built folded records used by tests and documentation.

use na::Point3;

use crate::record::{EdgeAssignment, FoldRecord};

use EdgeAssignment::{Boundary, Mountain, Valley};

fn build(
  coords: &[[f64; 3]],
  edges: &[(usize, usize)],
  assignments: &[EdgeAssignment],
  faces_vertices: &[&[usize]],
  faces_edges: &[&[usize]],
) -> FoldRecord {
  let mut record = FoldRecord {
    vertices_coords_folded: coords.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect(),
    edges_vertices: edges.to_vec(),
    edges_assignment: assignments.to_vec(),
    edges_fold_angle: assignments.iter().map(|a| a.implied_angle()).collect(),
    faces_vertices: faces_vertices.iter().map(|f| f.to_vec()).collect(),
    faces_edges: faces_edges.iter().map(|f| f.to_vec()).collect(),
    edges_faces: vec![],
  };
  record.edges_faces = record.rebuild_edges_faces().unwrap();
  record
}

/// A single unfolded unit square: one face, four boundary edges.
pub fn flat_square() -> FoldRecord {
  build(
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
    ],
    &[(0, 1), (1, 2), (2, 3), (3, 0)],
    &[Boundary, Boundary, Boundary, Boundary],
    &[&[0, 1, 2, 3]],
    &[&[0, 1, 2, 3]],
  )
}

/// Two unit squares joined along x = 1, valley-folded 180 degrees so the
/// second lands face-down on the first.
pub fn two_stacked_squares() -> FoldRecord {
  build(
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [0.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
    ],
    &[(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (4, 5), (5, 2)],
    &[
      Boundary, Valley, Boundary, Boundary, Boundary, Boundary, Boundary,
    ],
    &[&[0, 1, 2, 3], &[1, 4, 5, 2]],
    &[&[0, 1, 2, 3], &[4, 5, 6, 1]],
  )
}

/// Three collinear unit panels folded into a three-layer zigzag: a valley
/// at x = 1, then a mountain at the panel boundary that lands on x = 0.
/// The unique physical stack is panel 0 under panel 1 under panel 2.
pub fn miura_strip() -> FoldRecord {
  build(
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [0.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
    ],
    &[
      (0, 1),
      (1, 2),
      (2, 3),
      (3, 0),
      (1, 4),
      (4, 5),
      (5, 2),
      (4, 6),
      (6, 7),
      (7, 5),
    ],
    &[
      Boundary, Valley, Boundary, Boundary, Boundary, Mountain, Boundary, Boundary, Boundary,
      Boundary,
    ],
    &[&[0, 1, 2, 3], &[1, 4, 5, 2], &[4, 6, 7, 5]],
    &[&[0, 1, 2, 3], &[4, 5, 6, 1], &[7, 8, 9, 5]],
  )
}

/// Four unit quadrants around a central vertex, every crease folded 180
/// degrees so all four land on the same square. The crease assignments
/// pick the stacking; `[M, V, M, V]` violates Maekawa's theorem and
/// admits no layer order at all.
pub fn four_quadrant_vertex(creases: [EdgeAssignment; 4]) -> FoldRecord {
  let [c0, c1, c2, c3] = creases;
  build(
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [1.0, 1.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [1.0, 1.0, 0.0],
    ],
    &[
      (0, 1),
      (0, 3),
      (0, 5),
      (0, 7),
      (1, 2),
      (2, 3),
      (3, 4),
      (4, 5),
      (5, 6),
      (6, 7),
      (7, 8),
      (8, 1),
    ],
    &[
      c0, c1, c2, c3, Boundary, Boundary, Boundary, Boundary, Boundary, Boundary, Boundary,
      Boundary,
    ],
    &[&[0, 1, 2, 3], &[0, 3, 4, 5], &[0, 5, 6, 7], &[0, 7, 8, 1]],
    &[&[0, 4, 5, 1], &[1, 6, 7, 2], &[2, 8, 9, 3], &[3, 10, 11, 0]],
  )
}

/// A valley-folded pair of unit squares lying on a wide coplanar base
/// sheet. The crease at x = 1 cuts straight across the base, so the base
/// is a tortilla for the folded taco.
pub fn creased_pair_over_base() -> FoldRecord {
  build(
    &[
      [0.0, 0.0, 0.0],
      [2.0, 0.0, 0.0],
      [2.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [0.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
    ],
    &[
      (0, 1),
      (1, 2),
      (2, 3),
      (3, 0),
      (4, 5),
      (5, 6),
      (6, 7),
      (7, 4),
      (5, 8),
      (8, 9),
      (9, 6),
    ],
    &[
      Boundary, Boundary, Boundary, Boundary, Boundary, Valley, Boundary, Boundary, Boundary,
      Boundary, Boundary,
    ],
    &[&[0, 1, 2, 3], &[4, 5, 6, 7], &[5, 8, 9, 6]],
    &[&[0, 1, 2, 3], &[4, 5, 6, 7], &[8, 9, 10, 5]],
  )
}

/// Two coplanar unit squares that never overlap.
pub fn separated_squares() -> FoldRecord {
  build(
    &[
      [0.0, 0.0, 0.0],
      [1.0, 0.0, 0.0],
      [1.0, 1.0, 0.0],
      [0.0, 1.0, 0.0],
      [2.0, 0.0, 0.0],
      [3.0, 0.0, 0.0],
      [3.0, 1.0, 0.0],
      [2.0, 1.0, 0.0],
    ],
    &[
      (0, 1),
      (1, 2),
      (2, 3),
      (3, 0),
      (4, 5),
      (5, 6),
      (6, 7),
      (7, 4),
    ],
    &[
      Boundary, Boundary, Boundary, Boundary, Boundary, Boundary, Boundary, Boundary,
    ],
    &[&[0, 1, 2, 3], &[4, 5, 6, 7]],
    &[&[0, 1, 2, 3], &[4, 5, 6, 7]],
  )
}

/// The waterbomb-base crease pattern, unfolded: 17 faces tiling a 4x4
/// square, 16 valleys, 4 mountains, 16 boundary edges.
pub fn waterbomb_flat() -> FoldRecord {
  let coords: Vec<[f64; 3]> = [
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 2.0],
    [0.0, 3.0],
    [1.0, 4.0],
    [2.0, 3.0],
    [3.0, 4.0],
    [4.0, 3.0],
    [3.0, 2.0],
    [4.0, 1.0],
    [3.0, 0.0],
    [2.0, 1.0],
    [0.0, 2.0],
    [2.0, 0.0],
    [4.0, 2.0],
    [2.0, 4.0],
    [0.0, 0.0],
    [4.0, 0.0],
    [4.0, 4.0],
    [0.0, 4.0],
  ]
  .iter()
  .map(|&[x, y]| [x, y, 0.0])
  .collect();
  let edges = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 9),
    (9, 10),
    (10, 11),
    (11, 0),
    (11, 2),
    (2, 5),
    (5, 8),
    (8, 11),
    (2, 12),
    (11, 13),
    (8, 14),
    (5, 15),
    (16, 0),
    (0, 13),
    (13, 10),
    (10, 17),
    (17, 9),
    (7, 18),
    (9, 14),
    (14, 7),
    (18, 6),
    (4, 19),
    (6, 15),
    (15, 4),
    (19, 3),
    (1, 16),
    (3, 12),
    (12, 1),
  ];
  let mut assignments = vec![Valley; 16];
  assignments.extend([Mountain; 4]);
  assignments.extend([Boundary; 16]);
  let faces_vertices: [&[usize]; 17] = [
    &[0, 11, 2, 1],
    &[0, 13, 11],
    &[0, 1, 16],
    &[1, 2, 12],
    &[2, 5, 4, 3],
    &[2, 11, 8, 5],
    &[2, 3, 12],
    &[3, 4, 19],
    &[4, 5, 15],
    &[5, 8, 7, 6],
    &[5, 6, 15],
    &[6, 7, 18],
    &[7, 8, 14],
    &[8, 11, 10, 9],
    &[8, 9, 14],
    &[9, 10, 17],
    &[10, 11, 13],
  ];
  let faces_edges: [&[usize]; 17] = [
    &[11, 12, 1, 0],
    &[21, 17, 11],
    &[0, 33, 20],
    &[1, 16, 35],
    &[13, 4, 3, 2],
    &[12, 15, 14, 13],
    &[2, 34, 16],
    &[3, 29, 32],
    &[4, 19, 31],
    &[14, 7, 6, 5],
    &[5, 30, 19],
    &[6, 25, 28],
    &[7, 18, 27],
    &[15, 10, 9, 8],
    &[8, 26, 18],
    &[9, 23, 24],
    &[10, 17, 22],
  ];
  build(&coords, &edges, &assignments, &faces_vertices, &faces_edges)
}
