//! Inexact (f64) vector helpers: face normals, plane 4-vectors, and the
//! per-group projection frame.

use na::{Point3, Vector3, Vector4};

/// Face normal by Newell's method, truncated to the face's first three
/// vertices. Planarity is assumed, so the first triangle determines the
/// plane; the truncation keeps the sum cheap and orientation-faithful.
/// Returns `None` when the triangle is degenerate.
pub fn newell_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
  let tri = &points[..3.min(points.len())];
  if tri.len() < 3 {
    return None;
  }
  let mut n = Vector3::<f64>::zeros();
  for i in 0..3 {
    let u = &tri[i];
    let v = &tri[(i + 1) % 3];
    n.x += (u.y - v.y) * (u.z + v.z);
    n.y += (u.z - v.z) * (u.x + v.x);
    n.z += (u.x - v.x) * (u.y + v.y);
  }
  let len = n.norm();
  if len == 0.0 || !len.is_finite() {
    return None;
  }
  Some(n / len)
}

/// Plane 4-vector `(nx, ny, nz, d)` with `d = normal . p0`.
pub fn plane_val(normal: &Vector3<f64>, p0: &Point3<f64>) -> Vector4<f64> {
  Vector4::new(normal.x, normal.y, normal.z, normal.dot(&p0.coords))
}

pub fn l1_diff(a: &Vector4<f64>, b: &Vector4<f64>) -> f64 {
  (a - b).abs().sum()
}

pub fn l2_diff(a: &Vector4<f64>, b: &Vector4<f64>) -> f64 {
  (a - b).norm()
}

/// Two plane 4-vectors describe the same plane when they agree up to a
/// global sign flip.
pub fn coplanar(a: &Vector4<f64>, b: &Vector4<f64>, eps: f64) -> bool {
  l1_diff(a, b).min(l1_diff(a, &-b)) < eps
}

/// Whether `a` matches `b` directly rather than as its negation. Only
/// meaningful once `coplanar(a, b)` holds: the matching side differs by
/// at most a few EPS while the negated side sits at distance ~2|b|.
pub fn same_side(a: &Vector4<f64>, b: &Vector4<f64>) -> bool {
  l2_diff(a, b) < 1.0
}

/// Orthonormal right-handed `(tangent, bi)` completing `normal`.
///
/// The tangent is built on the two largest-magnitude coordinates of the
/// normal, which keeps the construction away from cancellation.
pub fn tangent_frame(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
  let mut order = [0usize, 1, 2];
  order.sort_by(|&a, &b| normal[a].abs().total_cmp(&normal[b].abs()));
  let [_, k2, k3] = order;

  let mut tangent = Vector3::zeros();
  tangent[k2] = normal[k3];
  tangent[k3] = -normal[k2];
  let tangent = tangent.normalize();
  let bi = normal.cross(&tangent);
  (tangent, bi)
}
