//! CNF encoding of the non-penetration rules.
//!
//! One Boolean variable per overlapping coplanar face pair, keyed by the
//! ascending pair: the positive literal means "the lower-id face is below
//! the higher-id face", so antisymmetry is a sign flip instead of a
//! clause. On top of the variables sit three clause families per plane
//! group: transitivity over triples with common area, taco-tortilla
//! equivalences for faces crossing a crease, and taco-taco interleaving
//! bans for creases that overlap in projection.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::warn;
use num_traits::Signed;
use rustsat::instances::{BasicVarManager, ManageVars, SatInstance};
use rustsat::types::{Lit, Var};

use crate::exact::{self, Segment2};
use crate::plane_group::PlaneGroups;
use crate::project::{proj_vert_idx, ProjectedGroups};
use crate::record::{EdgeAssignment, FoldRecord};

/// The assembled SAT instance plus the bookkeeping needed to read a
/// model back as a pairwise order.
pub struct Encoding {
  pub instance: SatInstance<BasicVarManager>,
  /// Overlap variable per face pair `(f1, f2)` with `f1 < f2`; true
  /// means `f1` lies below `f2`.
  pub overlaps_var: BTreeMap<(usize, usize), Var>,
  /// Non-boundary edges interior to each plane group, with their
  /// projected segments.
  pub pg_in_pg_edges: Vec<Vec<(usize, Segment2)>>,
}

impl Encoding {
  pub fn build(record: &FoldRecord, groups: &PlaneGroups, proj: &ProjectedGroups) -> Self {
    let mut builder = Builder {
      record,
      groups,
      proj,
      instance: SatInstance::new(),
      overlaps_var: BTreeMap::new(),
      pg_in_pg_edges: vec![vec![]; groups.num_groups()],
    };
    for g in 0..groups.num_groups() {
      builder.compute_variables(g);
      builder.compute_transitivity(g);
      builder.compute_tacos(g);
    }
    builder.compute_line_group_constraints();
    Encoding {
      instance: builder.instance,
      overlaps_var: builder.overlaps_var,
      pg_in_pg_edges: builder.pg_in_pg_edges,
    }
  }

  /// Literal meaning "face `f1` lies below face `f2`", if the pair
  /// overlaps.
  pub fn get_lit(&self, f1: usize, f2: usize) -> Option<Lit> {
    let var = self.overlaps_var.get(&(f1.min(f2), f1.max(f2)))?;
    Some(if f1 < f2 {
      var.pos_lit()
    } else {
      var.neg_lit()
    })
  }
}

struct Builder<'a> {
  record: &'a FoldRecord,
  groups: &'a PlaneGroups,
  proj: &'a ProjectedGroups,
  instance: SatInstance<BasicVarManager>,
  overlaps_var: BTreeMap<(usize, usize), Var>,
  pg_in_pg_edges: Vec<Vec<(usize, Segment2)>>,
}

impl<'a> Builder<'a> {
  fn get_lit(&self, f1: usize, f2: usize) -> Option<Lit> {
    let var = self.overlaps_var.get(&(f1.min(f2), f1.max(f2)))?;
    Some(if f1 < f2 {
      var.pos_lit()
    } else {
      var.neg_lit()
    })
  }

  fn add_equality(&mut self, a: Lit, b: Lit) {
    self.instance.add_lit_impl_lit(a, b);
    self.instance.add_lit_impl_lit(b, a);
  }

  /// One variable per pair of faces whose projections share area.
  fn compute_variables(&mut self, g: usize) {
    let faces = &self.groups.planegroups_faces[g];
    let projs = &self.proj.pg_faces_proj[g];
    for (i, j) in (0..faces.len()).tuple_combinations() {
      if exact::do_intersect(&projs[i], &projs[j]) {
        let var = self.instance.var_manager_mut().new_var();
        self.overlaps_var.insert((faces[i], faces[j]), var);
      }
    }
  }

  /// For each triple with pairwise variables and a common area, the
  /// three orders must form a total order:
  /// `(b_ij | b_jk | !b_ik) & (!b_ij | !b_jk | b_ik)`.
  fn compute_transitivity(&mut self, g: usize) {
    let faces = &self.groups.planegroups_faces[g];
    let projs = &self.proj.pg_faces_proj[g];
    let n = faces.len();
    for i in 0..n {
      for j in (i + 1)..n {
        let key_ij = (faces[i], faces[j]);
        if !self.overlaps_var.contains_key(&key_ij) {
          continue;
        }
        // shared region of (i, j), reused against every k
        let region = match exact::convex_intersection(&projs[i], &projs[j]) {
          Some(r) => r,
          None => continue,
        };
        for k in (j + 1)..n {
          let key_ik = (faces[i], faces[k]);
          let key_jk = (faces[j], faces[k]);
          if !self.overlaps_var.contains_key(&key_ik)
            || !self.overlaps_var.contains_key(&key_jk)
          {
            continue;
          }
          if !exact::do_intersect(&region, &projs[k]) {
            continue;
          }
          // faces are ascending, so each pair's positive literal is its
          // below-relation in ascending order
          let b_ij = self.overlaps_var[&key_ij].pos_lit();
          let b_jk = self.overlaps_var[&key_jk].pos_lit();
          let b_ik = self.overlaps_var[&key_ik].pos_lit();
          self.instance.add_ternary(b_ij, b_jk, !b_ik);
          self.instance.add_ternary(!b_ij, !b_jk, b_ik);
        }
      }
    }
  }

  /// Crease unit clauses, taco-tortilla equivalences, and taco-taco
  /// interleaving bans for one plane group.
  fn compute_tacos(&mut self, g: usize) {
    let faces = &self.groups.planegroups_faces[g];
    let projs = &self.proj.pg_faces_proj[g];

    // collect the in-plane crease segments, emitting unit and tortilla
    // clauses along the way
    for (slot, &taco_l) in faces.iter().enumerate() {
      let n = self.record.faces_vertices[taco_l].len();
      let dir_l = self.groups.faces_dir[taco_l];
      for i in 0..n {
        let edge = self.record.faces_edges[taco_l][i];
        let assign = self.record.edges_assignment[edge];
        if matches!(assign, EdgeAssignment::Boundary | EdgeAssignment::Cut) {
          continue;
        }
        // each interior edge is handled once, from its left face
        if self.record.edges_faces[edge][0] != Some(taco_l) {
          continue;
        }
        let taco_r = match self.record.edges_faces[edge][1] {
          Some(f) if self.groups.faces_planegroup[f] == g => f,
          _ => continue,
        };

        let poly = &projs[slot];
        let seg = Segment2::new(
          poly.verts[proj_vert_idx(dir_l, i, n)].clone(),
          poly.verts[proj_vert_idx(dir_l, (i + 1) % n, n)].clone(),
        );

        if assign.is_crease() {
          let mountain = assign == EdgeAssignment::Mountain;
          match self.get_lit(taco_l, taco_r) {
            Some(lit) => {
              let lit = if dir_l ^ mountain { !lit } else { lit };
              self.instance.add_unit(lit);
            }
            None => warn!(
              "crease edge {} joins non-overlapping faces {} and {}",
              edge, taco_l, taco_r
            ),
          }

          // a face crossed by the crease must stay on one side of both
          // taco sheets
          for (t_slot, &tortilla) in faces.iter().enumerate() {
            if tortilla == taco_l || tortilla == taco_r {
              continue;
            }
            if !exact::segment_passes_through(&seg, &projs[t_slot]) {
              continue;
            }
            match (
              self.get_lit(tortilla, taco_l),
              self.get_lit(tortilla, taco_r),
            ) {
              (Some(a), Some(b)) => self.add_equality(a, b),
              _ => warn!(
                "tortilla {} crosses crease edge {} without overlapping both sheets",
                tortilla, edge
              ),
            }
          }
        }

        self.pg_in_pg_edges[g].push((edge, seg));
      }
    }

    // taco-taco: creases overlapping along a shared line
    let edges = self.pg_in_pg_edges[g].clone();
    for (idx1, idx2) in (0..edges.len()).tuple_combinations() {
      let (e1, s1) = &edges[idx1];
      let (e2, s2) = &edges[idx2];
      if !exact::segments_overlap(s1, s2) {
        continue;
      }
      let (Some(e1l), Some(e1r)) = (
        self.record.edges_faces[*e1][0],
        self.record.edges_faces[*e1][1],
      ) else {
        continue;
      };
      let (Some(e2l), Some(e2r)) = (
        self.record.edges_faces[*e2][0],
        self.record.edges_faces[*e2][1],
      ) else {
        continue;
      };
      let a1 = self.record.edges_assignment[*e1];
      let a2 = self.record.edges_assignment[*e2];
      let opp_dir = s1.dir_dot(s2).is_negative();
      let side_flip = self.groups.faces_dir[e1l] ^ self.groups.faces_dir[e2l] ^ opp_dir;

      if a1.is_crease() && a2.is_crease() {
        if side_flip {
          // the tacos bend to opposite sides of the shared line
          continue;
        }
        let (e1d, e1u) = crease_down_up(a1, self.groups.faces_dir[e1l], e1l, e1r);
        let (e2d, e2u) = crease_down_up(a2, self.groups.faces_dir[e2l], e2l, e2r);
        self.forbid_interleave(e1d, e1u, e2d, e2u, *e1, *e2);
        self.forbid_interleave(e2d, e2u, e1d, e1u, *e1, *e2);
      } else if a1.is_crease() && a2.is_flat() {
        let (e1d, e1u) = crease_down_up(a1, self.groups.faces_dir[e1l], e1l, e1r);
        let e2m = if side_flip { e2r } else { e2l };
        self.forbid_sandwich(e1d, e1u, e2m, *e1, *e2);
      } else if a1.is_flat() && a2.is_crease() {
        let (e2d, e2u) = crease_down_up(a2, self.groups.faces_dir[e2l], e2l, e2r);
        let e1m = if side_flip { e1r } else { e1l };
        self.forbid_sandwich(e2d, e2u, e1m, *e1, *e2);
      } else if a1.is_flat() && a2.is_flat() {
        let (p, q) = if side_flip {
          ((e1l, e2r), (e1r, e2l))
        } else {
          ((e1l, e2l), (e1r, e2r))
        };
        match (self.get_lit(p.0, p.1), self.get_lit(q.0, q.1)) {
          (Some(a), Some(b)) => self.add_equality(a, b),
          _ => warn!("flat edges {} and {} overlap without shared area", e1, e2),
        }
      }
    }
  }

  /// Ban the interleaving `e2d < e1d < e2u < e1u`:
  /// `!b(e1d,e2d) | !b(e2d,e1u) | !b(e1u,e2u)`.
  fn forbid_interleave(
    &mut self,
    e1d: usize,
    e1u: usize,
    e2d: usize,
    e2u: usize,
    e1: usize,
    e2: usize,
  ) {
    match (
      self.get_lit(e1d, e2d),
      self.get_lit(e2d, e1u),
      self.get_lit(e1u, e2u),
    ) {
      (Some(a), Some(b), Some(c)) => self.instance.add_ternary(!a, !b, !c),
      _ => warn!(
        "taco-taco between edges {} and {} skipped: sheets do not all overlap",
        e1, e2
      ),
    }
  }

  /// A flat sheet may not sit strictly inside a taco:
  /// `!b(down, mid) | !b(mid, up)`.
  fn forbid_sandwich(&mut self, down: usize, up: usize, mid: usize, e1: usize, e2: usize) {
    match (self.get_lit(down, mid), self.get_lit(mid, up)) {
      (Some(a), Some(b)) => self.instance.add_binary(!a, !b),
      _ => warn!(
        "taco-tortilla between edges {} and {} skipped: sheets do not all overlap",
        e1, e2
      ),
    }
  }

  /// Constraints tying plane groups together along shared 3D lines
  /// (line groups). Single-group patterns need none; multi-group
  /// ordering across creases is not derived yet.
  fn compute_line_group_constraints(&mut self) {}
}

/// Lower and upper sheet of a crease. A mountain seen from a face whose
/// normal matches the group puts the left face on top; every flip of
/// assignment or direction swaps the pair.
fn crease_down_up(
  assign: EdgeAssignment,
  left_dir: bool,
  left: usize,
  right: usize,
) -> (usize, usize) {
  let left_above = (assign == EdgeAssignment::Mountain) ^ left_dir;
  if left_above {
    (right, left)
  } else {
    (left, right)
  }
}
