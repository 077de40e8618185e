//! Projection of folded faces into their plane group's 2D frame.

use na::{Point3, Vector3};

use crate::exact::{scalar_from_f64, Point2, Polygon2};
use crate::plane_group::PlaneGroups;
use crate::record::FoldRecord;
use crate::Error;

/// Exact projected polygons, indexed like `planegroups_faces`.
#[derive(Clone, Debug)]
pub struct ProjectedGroups {
  pub pg_faces_proj: Vec<Vec<Polygon2>>,
}

/// Project a folded point into the `(tangent, bi)` frame.
///
/// The two dot products are evaluated in f64 (the frame itself is
/// inexact) and the results lifted losslessly into rationals, so every
/// predicate downstream of this point is exact.
pub fn project_point(
  tangent: &Vector3<f64>,
  bi: &Vector3<f64>,
  p: &Point3<f64>,
) -> Result<Point2, Error> {
  let x = scalar_from_f64(tangent.dot(&p.coords)).ok_or(Error::FoldBadCoordinates)?;
  let y = scalar_from_f64(bi.dot(&p.coords)).ok_or(Error::FoldBadCoordinates)?;
  Ok(Point2::new(x, y))
}

/// Index of face position `i` within the projected polygon, accounting
/// for the orientation-fixing reversal of dir-flagged faces.
pub fn proj_vert_idx(dir: bool, i: usize, n: usize) -> usize {
  if dir {
    (n - i) % n
  } else {
    i
  }
}

/// Re-embed a projected 2D point into 3D.
pub fn embed(
  normal: &Vector3<f64>,
  distance: f64,
  tangent: &Vector3<f64>,
  bi: &Vector3<f64>,
  x: f64,
  y: f64,
) -> Point3<f64> {
  Point3::from(normal * distance + tangent * x + bi * y)
}

impl ProjectedGroups {
  /// Project every face of every plane group. Faces whose normal opposes
  /// the group normal are reversed in place, so each resulting polygon is
  /// counterclockwise in the group frame.
  pub fn build(record: &FoldRecord, groups: &PlaneGroups) -> Result<Self, Error> {
    let mut pg_faces_proj = Vec::with_capacity(groups.num_groups());
    for (g, faces) in groups.planegroups_faces.iter().enumerate() {
      let tangent = &groups.planegroups_tangent[g];
      let bi = &groups.planegroups_bi[g];
      let mut projs = Vec::with_capacity(faces.len());
      for &face in faces {
        let verts = record.faces_vertices[face]
          .iter()
          .map(|&v| project_point(tangent, bi, &record.vertices_coords_folded[v]))
          .collect::<Result<Vec<_>, _>>()?;
        let mut poly = Polygon2::new(verts);
        if groups.faces_dir[face] {
          poly.reverse_orientation();
        }
        projs.push(poly);
      }
      pg_faces_proj.push(projs);
    }
    Ok(ProjectedGroups { pg_faces_proj })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::examples::two_stacked_squares;
  use crate::plane_group::PlaneGroups;

  #[test]
  fn all_projected_polygons_are_ccw() {
    let record = two_stacked_squares();
    let groups = PlaneGroups::build(&record).unwrap();
    let proj = ProjectedGroups::build(&record, &groups).unwrap();
    for g in &proj.pg_faces_proj {
      for poly in g {
        assert!(poly.is_ccw());
      }
    }
  }

  #[test]
  fn proj_vert_idx_reversal_rule() {
    assert_eq!(proj_vert_idx(false, 1, 4), 1);
    assert_eq!(proj_vert_idx(true, 0, 4), 0);
    assert_eq!(proj_vert_idx(true, 1, 4), 3);
    assert_eq!(proj_vert_idx(true, 3, 4), 1);
  }

  #[test]
  fn reversal_maps_positions_onto_projected_polygon() {
    let record = two_stacked_squares();
    let groups = PlaneGroups::build(&record).unwrap();
    let proj = ProjectedGroups::build(&record, &groups).unwrap();
    // face 1 is the flipped one
    let face = 1usize;
    let slot = groups.planegroups_faces[groups.faces_planegroup[face]]
      .iter()
      .position(|&f| f == face)
      .unwrap();
    let poly = &proj.pg_faces_proj[groups.faces_planegroup[face]][slot];
    let tangent = &groups.planegroups_tangent[0];
    let bi = &groups.planegroups_bi[0];
    let n = record.faces_vertices[face].len();
    for (i, &v) in record.faces_vertices[face].iter().enumerate() {
      let expected =
        project_point(tangent, bi, &record.vertices_coords_folded[v]).unwrap();
      let j = proj_vert_idx(groups.faces_dir[face], i, n);
      assert_eq!(poly.verts[j], expected);
    }
  }

  #[test]
  fn embedding_round_trips() {
    let record = two_stacked_squares();
    let groups = PlaneGroups::build(&record).unwrap();
    let g = 0;
    let normal = &groups.planegroups_normal[g];
    let tangent = &groups.planegroups_tangent[g];
    let bi = &groups.planegroups_bi[g];
    let d = groups.planegroups_distance[g];
    for &face in &groups.planegroups_faces[g] {
      for &v in &record.faces_vertices[face] {
        let p = &record.vertices_coords_folded[v];
        let x = tangent.dot(&p.coords);
        let y = bi.dot(&p.coords);
        let back = embed(normal, d, tangent, bi, x, y);
        assert!((back - p).norm() < 1e-9);
      }
    }
  }
}
