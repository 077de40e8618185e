//! Validated in-memory FOLD record.
//!
//! [`FoldRecord`] is the input the solver pipeline works on: dense ids,
//! folded 3D coordinates, parsed crease assignments, and the edge/face
//! adjacency in both directions. Construction checks the invariants the
//! rest of the pipeline relies on and rebuilds `edges_faces` from the
//! per-face traversal.

use na::Point3;

use crate::format::Frame;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeAssignment {
  Boundary,
  Mountain,
  Valley,
  Flat,
  Unassigned,
  Cut,
  Join,
}

impl EdgeAssignment {
  pub fn parse(s: &str) -> Result<Self, Error> {
    Ok(match s {
      "B" => EdgeAssignment::Boundary,
      "M" => EdgeAssignment::Mountain,
      "V" => EdgeAssignment::Valley,
      "F" => EdgeAssignment::Flat,
      "U" => EdgeAssignment::Unassigned,
      "C" => EdgeAssignment::Cut,
      "J" => EdgeAssignment::Join,
      _ => return Err(Error::FoldBadAssignment(s.to_string())),
    })
  }

  /// Fold angle implied by the assignment, if any.
  /// Positive angles point the face normals towards each other.
  pub fn implied_angle(self) -> Option<f64> {
    match self {
      EdgeAssignment::Mountain => Some(-180.0),
      EdgeAssignment::Valley => Some(180.0),
      EdgeAssignment::Flat | EdgeAssignment::Join => Some(0.0),
      _ => None,
    }
  }

  /// Mountain or valley: the edge is an actual crease.
  pub fn is_crease(self) -> bool {
    matches!(self, EdgeAssignment::Mountain | EdgeAssignment::Valley)
  }

  /// Flat or join: both sides stay in the same sheet.
  pub fn is_flat(self) -> bool {
    matches!(self, EdgeAssignment::Flat | EdgeAssignment::Join)
  }
}

#[derive(Clone, Debug)]
pub struct FoldRecord {
  /// 3D position of each vertex after folding.
  pub vertices_coords_folded: Vec<Point3<f64>>,
  pub edges_vertices: Vec<(usize, usize)>,
  pub edges_assignment: Vec<EdgeAssignment>,
  pub edges_fold_angle: Vec<Option<f64>>,
  /// Each face as a vertex cycle, counterclockwise in its own frame.
  pub faces_vertices: Vec<Vec<usize>>,
  /// `faces_edges[f][i]` connects `faces_vertices[f][i]` to
  /// `faces_vertices[f][(i + 1) % n]`.
  pub faces_edges: Vec<Vec<usize>>,
  /// Slot 0 holds the face traversing the edge in `v0 -> v1` direction.
  pub edges_faces: Vec<[Option<usize>; 2]>,
}

impl FoldRecord {
  /// Build a record from a FOLD frame holding folded coordinates.
  pub fn from_frame(frame: &Frame) -> Result<Self, Error> {
    for (name, missing) in [
      ("vertices_coords", frame.vertices_coords.is_empty()),
      ("edges_vertices", frame.edges_vertices.is_empty()),
      ("edges_assignment", frame.edges_assignment.is_empty()),
      ("faces_vertices", frame.faces_vertices.is_empty()),
      ("faces_edges", frame.faces_edges.is_empty()),
    ] {
      if missing {
        return Err(Error::FoldMissingField(name));
      }
    }

    let num_edges = frame.edges_vertices.len();
    if frame.edges_assignment.len() != num_edges {
      return Err(Error::FoldLengthMismatch {
        kind: "edges",
        left: num_edges,
        right: frame.edges_assignment.len(),
      });
    }
    if !frame.edges_fold_angle.is_empty() && frame.edges_fold_angle.len() != num_edges {
      return Err(Error::FoldLengthMismatch {
        kind: "edges",
        left: num_edges,
        right: frame.edges_fold_angle.len(),
      });
    }
    if frame.faces_edges.len() != frame.faces_vertices.len() {
      return Err(Error::FoldLengthMismatch {
        kind: "faces",
        left: frame.faces_vertices.len(),
        right: frame.faces_edges.len(),
      });
    }

    let vertices_coords_folded = frame
      .vertices_coords
      .iter()
      .map(|c| match c[..] {
        [x, y] => Ok(Point3::new(x, y, 0.0)),
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(Error::FoldBadCoordinates),
      })
      .collect::<Result<Vec<_>, _>>()?;
    if vertices_coords_folded
      .iter()
      .any(|p| !p.coords.iter().all(|x| x.is_finite()))
    {
      return Err(Error::FoldBadCoordinates);
    }

    let edges_assignment = frame
      .edges_assignment
      .iter()
      .map(|a| EdgeAssignment::parse(a))
      .collect::<Result<Vec<_>, _>>()?;

    let edges_fold_angle: Vec<Option<f64>> = if frame.edges_fold_angle.is_empty() {
      edges_assignment.iter().map(|a| a.implied_angle()).collect()
    } else {
      frame.edges_fold_angle.clone()
    };
    if edges_fold_angle
      .iter()
      .any(|a| a.map_or(false, |x| !(-180.0..=180.0).contains(&x)))
    {
      return Err(Error::FoldBadAngle);
    }

    let num_vertices = vertices_coords_folded.len();
    for &(v0, v1) in &frame.edges_vertices {
      for v in [v0, v1] {
        if v >= num_vertices {
          return Err(Error::FoldInvalidReference("vertex", v));
        }
      }
    }
    for (face, verts) in frame.faces_vertices.iter().enumerate() {
      if verts.len() < 3 {
        return Err(Error::DegenerateFace(face, "fewer than three vertices"));
      }
      for &v in verts {
        if v >= num_vertices {
          return Err(Error::FoldInvalidReference("vertex", v));
        }
      }
      if frame.faces_edges[face].len() != verts.len() {
        return Err(Error::FoldLengthMismatch {
          kind: "face corners",
          left: verts.len(),
          right: frame.faces_edges[face].len(),
        });
      }
      for &e in &frame.faces_edges[face] {
        if e >= num_edges {
          return Err(Error::FoldInvalidReference("edge", e));
        }
      }
    }

    let mut record = FoldRecord {
      vertices_coords_folded,
      edges_vertices: frame.edges_vertices.clone(),
      edges_assignment,
      edges_fold_angle,
      faces_vertices: frame.faces_vertices.clone(),
      faces_edges: frame.faces_edges.clone(),
      edges_faces: vec![],
    };
    record.edges_faces = record.rebuild_edges_faces()?;

    if !frame.edges_faces.is_empty() {
      for (edge, given) in frame.edges_faces.iter().enumerate() {
        let mut slots = [None, None];
        for (i, f) in given.iter().enumerate().take(2) {
          slots[i] = *f;
        }
        if slots != record.edges_faces[edge] {
          return Err(Error::EdgesFacesDisagree(edge));
        }
      }
    }

    Ok(record)
  }

  /// Derive `edges_faces` from `faces_edges` + `faces_vertices`.
  ///
  /// The face whose counterclockwise traversal walks the edge from `v0`
  /// to `v1` lands in slot 0, the opposite traversal in slot 1.
  pub fn rebuild_edges_faces(&self) -> Result<Vec<[Option<usize>; 2]>, Error> {
    let mut edges_faces: Vec<[Option<usize>; 2]> = vec![[None, None]; self.edges_vertices.len()];

    for (face, verts) in self.faces_vertices.iter().enumerate() {
      let n = verts.len();
      for i in 0..n {
        let edge = self.faces_edges[face][i];
        let (e0, e1) = self.edges_vertices[edge];
        let v0 = verts[i];
        let v1 = verts[(i + 1) % n];

        let slot = if (e0, e1) == (v0, v1) {
          0
        } else if (e0, e1) == (v1, v0) {
          1
        } else {
          return Err(Error::EdgeFaceMismatch {
            face,
            position: i,
            edge,
          });
        };
        if edges_faces[edge][slot].is_some() {
          return Err(Error::EdgeSlotConflict(edge));
        }
        edges_faces[edge][slot] = Some(face);
      }
    }

    Ok(edges_faces)
  }

  pub fn num_vertices(&self) -> usize {
    self.vertices_coords_folded.len()
  }

  pub fn num_edges(&self) -> usize {
    self.edges_vertices.len()
  }

  pub fn num_faces(&self) -> usize {
    self.faces_vertices.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square_frame() -> Frame {
    Frame {
      vertices_coords: vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
      ],
      edges_vertices: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
      edges_assignment: ["B", "B", "B", "B"].map(String::from).to_vec(),
      faces_vertices: vec![vec![0, 1, 2, 3]],
      faces_edges: vec![vec![0, 1, 2, 3]],
      ..Frame::default()
    }
  }

  #[test]
  fn builds_square() {
    let r = FoldRecord::from_frame(&square_frame()).unwrap();
    assert_eq!(r.num_vertices(), 4);
    assert_eq!(r.num_edges(), 4);
    assert_eq!(r.num_faces(), 1);
    assert_eq!(r.vertices_coords_folded[2], Point3::new(1.0, 1.0, 0.0));
    for e in 0..4 {
      assert_eq!(r.edges_faces[e], [Some(0), None]);
    }
  }

  #[test]
  fn rebuild_assigns_slots_by_direction() {
    let mut frame = square_frame();
    // second face sharing edge 1 with opposite traversal
    frame.vertices_coords.push(vec![2.0, 0.0]);
    frame.vertices_coords.push(vec![2.0, 1.0]);
    frame.edges_vertices.extend([(1, 4), (4, 5), (5, 2)]);
    frame
      .edges_assignment
      .extend(["B", "B", "B"].map(String::from));
    frame.edges_assignment[1] = "V".to_string();
    frame.faces_vertices.push(vec![1, 4, 5, 2]);
    frame.faces_edges.push(vec![4, 5, 6, 1]);

    let r = FoldRecord::from_frame(&frame).unwrap();
    // face 0 walks 1 -> 2, face 1 walks 2 -> 1
    assert_eq!(r.edges_faces[1], [Some(0), Some(1)]);
    assert_eq!(r.edges_fold_angle[1], Some(180.0));
  }

  #[test]
  fn mismatched_edge_is_rejected() {
    let mut frame = square_frame();
    frame.faces_edges[0] = vec![0, 2, 1, 3];
    match FoldRecord::from_frame(&frame) {
      Err(Error::EdgeFaceMismatch { face: 0, .. }) => {}
      other => panic!("expected mismatch, got {:?}", other),
    }
  }

  #[test]
  fn duplicate_slot_is_rejected() {
    let mut frame = square_frame();
    // a second face walking edge 0 in the same direction
    frame.faces_vertices.push(vec![0, 1, 2, 3]);
    frame.faces_edges.push(vec![0, 1, 2, 3]);
    match FoldRecord::from_frame(&frame) {
      Err(Error::EdgeSlotConflict(0)) => {}
      other => panic!("expected slot conflict, got {:?}", other),
    }
  }

  #[test]
  fn missing_assignment_is_rejected() {
    let mut frame = square_frame();
    frame.edges_assignment.clear();
    assert!(matches!(
      FoldRecord::from_frame(&frame),
      Err(Error::FoldMissingField("edges_assignment"))
    ));
  }

  #[test]
  fn given_edges_faces_must_agree() {
    let mut frame = square_frame();
    frame.edges_faces = vec![
      vec![None, Some(0)],
      vec![Some(0), None],
      vec![Some(0), None],
      vec![Some(0), None],
    ];
    assert!(matches!(
      FoldRecord::from_frame(&frame),
      Err(Error::EdgesFacesDisagree(0))
    ));
  }
}
