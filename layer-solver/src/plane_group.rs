//! Grouping of faces into common folded planes.
//!
//! Plane equality under a floating-point tolerance is symmetric but not
//! transitive, so the pairwise predicate is closed through union-find
//! rather than by canonicalizing plane equations. Group ids are assigned
//! in order of first encounter over ascending face ids, which keeps the
//! grouping deterministic.

use std::fmt;

use na::{Vector3, Vector4};

use crate::dsu::Dsu;
use crate::geom;
use crate::record::FoldRecord;
use crate::{Error, SolverOptions, EPS};

#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGroups {
  pub faces_planegroup: Vec<usize>,
  /// True when the face normal opposes its group normal.
  pub faces_dir: Vec<bool>,
  /// Faces of each group, ascending.
  pub planegroups_faces: Vec<Vec<usize>>,
  pub planegroups_normal: Vec<Vector3<f64>>,
  pub planegroups_tangent: Vec<Vector3<f64>>,
  pub planegroups_bi: Vec<Vector3<f64>>,
  /// Signed offset `normal . p` shared by the group's plane.
  pub planegroups_distance: Vec<f64>,
}

impl PlaneGroups {
  pub fn build(record: &FoldRecord) -> Result<Self, Error> {
    Self::build_with(record, SolverOptions::default())
  }

  pub fn build_with(record: &FoldRecord, options: SolverOptions) -> Result<Self, Error> {
    let n_faces = record.num_faces();

    let mut faces_plane_vals: Vec<Vector4<f64>> = Vec::with_capacity(n_faces);
    for (face, verts) in record.faces_vertices.iter().enumerate() {
      let points: Vec<_> = verts
        .iter()
        .map(|&v| record.vertices_coords_folded[v])
        .collect();
      let normal =
        geom::newell_normal(&points).ok_or(Error::DegenerateFace(face, "zero-length normal"))?;
      let plane_val = geom::plane_val(&normal, &points[0]);

      let distance = plane_val.w;
      for p in &points {
        let residual = (normal.dot(&p.coords) - distance).abs();
        if residual > options.planarity_tolerance {
          return Err(Error::NonPlanarFace {
            face,
            residual,
            tolerance: options.planarity_tolerance,
          });
        }
      }
      faces_plane_vals.push(plane_val);
    }

    let mut dsu = Dsu::new(n_faces);
    for i in 0..n_faces {
      for j in (i + 1)..n_faces {
        if geom::coplanar(&faces_plane_vals[i], &faces_plane_vals[j], EPS) {
          dsu.join(i, j);
        }
      }
    }

    let mut faces_planegroup = vec![0usize; n_faces];
    let mut planegroups_faces: Vec<Vec<usize>> = vec![];
    let mut root_to_group: Vec<Option<usize>> = vec![None; n_faces];
    for face in 0..n_faces {
      let root = dsu.find(face);
      let group = match root_to_group[root] {
        Some(g) => g,
        None => {
          let g = planegroups_faces.len();
          root_to_group[root] = Some(g);
          planegroups_faces.push(vec![]);
          g
        }
      };
      faces_planegroup[face] = group;
      planegroups_faces[group].push(face);
    }

    let mut faces_dir = vec![false; n_faces];
    let mut planegroups_normal = Vec::with_capacity(planegroups_faces.len());
    let mut planegroups_tangent = Vec::with_capacity(planegroups_faces.len());
    let mut planegroups_bi = Vec::with_capacity(planegroups_faces.len());
    let mut planegroups_distance = Vec::with_capacity(planegroups_faces.len());
    for faces in &planegroups_faces {
      let rep = faces_plane_vals[faces[0]];
      let normal = Vector3::new(rep.x, rep.y, rep.z);
      let (tangent, bi) = geom::tangent_frame(&normal);
      for &face in faces {
        faces_dir[face] = !geom::same_side(&faces_plane_vals[face], &rep);
      }
      planegroups_normal.push(normal);
      planegroups_tangent.push(tangent);
      planegroups_bi.push(bi);
      planegroups_distance.push(rep.w);
    }

    Ok(PlaneGroups {
      faces_planegroup,
      faces_dir,
      planegroups_faces,
      planegroups_normal,
      planegroups_tangent,
      planegroups_bi,
      planegroups_distance,
    })
  }

  pub fn num_groups(&self) -> usize {
    self.planegroups_faces.len()
  }
}

impl fmt::Display for PlaneGroups {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (face, &group) in self.faces_planegroup.iter().enumerate() {
      writeln!(
        f,
        "face {}: plane group {}, dir: {}",
        face, group, self.faces_dir[face] as u8
      )?;
    }
    for (group, faces) in self.planegroups_faces.iter().enumerate() {
      write!(f, "plane group {}: faces", group)?;
      for face in faces {
        write!(f, " {}", face)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
