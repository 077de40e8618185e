//! Exact 2D kernel over arbitrary-precision rationals.
//!
//! Projected face polygons live here. Coordinates are lifted losslessly
//! from f64, and every predicate below (orientation, overlap, crossing) is
//! decided in exact arithmetic, so overlap enumeration cannot silently
//! drop a pair near a boundary.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

pub type Scalar = BigRational;

/// Lossless lift of an f64 coordinate. `None` only for NaN/infinity.
pub fn scalar_from_f64(x: f64) -> Option<Scalar> {
  BigRational::from_float(x)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point2 {
  pub x: Scalar,
  pub y: Scalar,
}

impl Point2 {
  pub fn new(x: Scalar, y: Scalar) -> Self {
    Point2 { x, y }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment2 {
  pub a: Point2,
  pub b: Point2,
}

impl Segment2 {
  pub fn new(a: Point2, b: Point2) -> Self {
    Segment2 { a, b }
  }

  /// Dot product of the two segment directions; its sign tells whether
  /// the segments point the same way along a shared line.
  pub fn dir_dot(&self, other: &Segment2) -> Scalar {
    let dx1 = &self.b.x - &self.a.x;
    let dy1 = &self.b.y - &self.a.y;
    let dx2 = &other.b.x - &other.a.x;
    let dy2 = &other.b.y - &other.a.y;
    dx1 * dx2 + dy1 * dy2
  }
}

/// Twice the signed area of triangle `(o, a, b)`.
fn cross(o: &Point2, a: &Point2, b: &Point2) -> Scalar {
  (&a.x - &o.x) * (&b.y - &o.y) - (&a.y - &o.y) * (&b.x - &o.x)
}

/// Sign of the orientation of `(o, a, b)`: +1 counterclockwise, -1
/// clockwise, 0 collinear.
pub fn orient(o: &Point2, a: &Point2, b: &Point2) -> i8 {
  let c = cross(o, a, b);
  if c.is_positive() {
    1
  } else if c.is_negative() {
    -1
  } else {
    0
  }
}

/// A simple polygon; the solver only ever feeds convex ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon2 {
  pub verts: Vec<Point2>,
}

impl Polygon2 {
  pub fn new(verts: Vec<Point2>) -> Self {
    Polygon2 { verts }
  }

  pub fn len(&self) -> usize {
    self.verts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.verts.is_empty()
  }

  /// Twice the signed area; positive for counterclockwise order.
  pub fn twice_area(&self) -> Scalar {
    let n = self.verts.len();
    let mut acc = Scalar::zero();
    for i in 0..n {
      let p = &self.verts[i];
      let q = &self.verts[(i + 1) % n];
      acc += &p.x * &q.y - &q.x * &p.y;
    }
    acc
  }

  pub fn is_ccw(&self) -> bool {
    self.twice_area().is_positive()
  }

  /// Reverse the cyclic orientation while keeping the first vertex in
  /// place, so position `i` moves to position `(n - i) mod n`.
  pub fn reverse_orientation(&mut self) {
    self.verts[1..].reverse();
  }

  pub fn edge(&self, i: usize) -> Segment2 {
    let n = self.verts.len();
    Segment2::new(self.verts[i].clone(), self.verts[(i + 1) % n].clone())
  }

  /// Strict interior test for a convex counterclockwise polygon: the
  /// point lies on the positive side of every edge.
  pub fn contains_strict(&self, p: &Point2) -> bool {
    let n = self.verts.len();
    (0..n).all(|i| orient(&self.verts[i], &self.verts[(i + 1) % n], p) > 0)
  }
}

/// Intersection of two convex counterclockwise polygons by successive
/// half-plane clipping. `None` when the common region has no area, which
/// treats boundary-only contact as no intersection.
pub fn convex_intersection(subject: &Polygon2, clip: &Polygon2) -> Option<Polygon2> {
  let mut current = subject.verts.clone();
  let n = clip.verts.len();
  for i in 0..n {
    if current.is_empty() {
      return None;
    }
    let a = &clip.verts[i];
    let b = &clip.verts[(i + 1) % n];
    let mut next = Vec::with_capacity(current.len() + 1);
    let m = current.len();
    for j in 0..m {
      let p = &current[j];
      let q = &current[(j + 1) % m];
      let cp = cross(a, b, p);
      let cq = cross(a, b, q);
      let p_in = !cp.is_negative();
      let q_in = !cq.is_negative();
      if p_in {
        if q_in {
          next.push(q.clone());
        } else {
          next.push(line_hit(p, q, &cp, &cq));
        }
      } else if q_in {
        next.push(line_hit(p, q, &cp, &cq));
        next.push(q.clone());
      }
    }
    current = next;
  }
  let poly = Polygon2::new(current);
  if poly.verts.len() >= 3 && poly.twice_area().is_positive() {
    Some(poly)
  } else {
    None
  }
}

/// Point where segment `p -> q` meets the clip line, given the signed
/// areas of its endpoints against that line.
fn line_hit(p: &Point2, q: &Point2, cp: &Scalar, cq: &Scalar) -> Point2 {
  let t = cp / (cp - cq);
  Point2::new(&p.x + &t * (&q.x - &p.x), &p.y + &t * (&q.y - &p.y))
}

/// Do two convex counterclockwise polygons share interior area?
pub fn do_intersect(a: &Polygon2, b: &Polygon2) -> bool {
  convex_intersection(a, b).is_some()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SegSeg {
  Disjoint,
  Point(Point2),
  Overlap(Segment2),
}

/// Exact segment/segment intersection, distinguishing transversal or
/// touching points from collinear overlap.
pub fn seg_seg_intersection(s: &Segment2, t: &Segment2) -> SegSeg {
  let c1 = cross(&t.a, &t.b, &s.a);
  let c2 = cross(&t.a, &t.b, &s.b);
  let c3 = cross(&s.a, &s.b, &t.a);
  let c4 = cross(&s.a, &s.b, &t.b);

  if c1.is_zero() && c2.is_zero() {
    return collinear_overlap(s, t);
  }
  if (c1.is_positive() && c2.is_positive()) || (c1.is_negative() && c2.is_negative()) {
    return SegSeg::Disjoint;
  }
  if (c3.is_positive() && c4.is_positive()) || (c3.is_negative() && c4.is_negative()) {
    return SegSeg::Disjoint;
  }
  SegSeg::Point(line_hit(&s.a, &s.b, &c1, &c2))
}

/// Is `v` within the closed 1D range spanned by `lo` and `hi`?
fn within(lo: &Scalar, hi: &Scalar, v: &Scalar) -> bool {
  if lo <= hi {
    lo <= v && v <= hi
  } else {
    hi <= v && v <= lo
  }
}

/// Overlap of two collinear segments.
fn collinear_overlap(s: &Segment2, t: &Segment2) -> SegSeg {
  // parametrize along s: u(p) = (p - s.a) . d, with d = s.b - s.a
  let d = Point2::new(&s.b.x - &s.a.x, &s.b.y - &s.a.y);
  let u = |p: &Point2| -> Scalar { (&p.x - &s.a.x) * &d.x + (&p.y - &s.a.y) * &d.y };
  let len2 = u(&s.b);
  if len2.is_zero() {
    // s collapsed to a bare point on t's line
    if within(&t.a.x, &t.b.x, &s.a.x) && within(&t.a.y, &t.b.y, &s.a.y) {
      return SegSeg::Point(s.a.clone());
    }
    return SegSeg::Disjoint;
  }

  let (mut t_lo, mut t_hi) = (u(&t.a), u(&t.b));
  if t_lo > t_hi {
    std::mem::swap(&mut t_lo, &mut t_hi);
  }
  let lo = t_lo.max(Scalar::zero());
  let hi = t_hi.min(len2.clone());
  if lo > hi {
    return SegSeg::Disjoint;
  }
  let at = |v: &Scalar| -> Point2 {
    let w = v / &len2;
    Point2::new(&s.a.x + &w * &d.x, &s.a.y + &w * &d.y)
  };
  if lo == hi {
    SegSeg::Point(at(&lo))
  } else {
    SegSeg::Overlap(Segment2::new(at(&lo), at(&hi)))
  }
}

/// Do two segments share a positive-length stretch of a common line?
pub fn segments_overlap(s: &Segment2, t: &Segment2) -> bool {
  matches!(seg_seg_intersection(s, t), SegSeg::Overlap(_))
}

/// Does segment `s` pass across polygon `p`?
///
/// True when an endpoint of `s` lies strictly inside `p`, or when `s`
/// crosses the boundary in exactly two distinct transversal points. A
/// collinear overlap with a polygon edge is not a crossing: such a
/// segment acts as an edge of the polygon, not as something piercing it.
pub fn segment_passes_through(s: &Segment2, p: &Polygon2) -> bool {
  let mut hits: Vec<Point2> = vec![];
  for i in 0..p.verts.len() {
    match seg_seg_intersection(s, &p.edge(i)) {
      SegSeg::Overlap(_) => return false,
      SegSeg::Point(pt) => {
        if !hits.contains(&pt) {
          hits.push(pt);
        }
      }
      SegSeg::Disjoint => {}
    }
  }
  // TODO: fails for nonconvex polygons, which can be crossed more than twice
  debug_assert!(hits.len() < 3);
  if p.contains_strict(&s.a) || p.contains_strict(&s.b) {
    return true;
  }
  hits.len() == 2
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pt(x: f64, y: f64) -> Point2 {
    Point2::new(scalar_from_f64(x).unwrap(), scalar_from_f64(y).unwrap())
  }

  fn unit_square() -> Polygon2 {
    Polygon2::new(vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0)])
  }

  fn square_at(x: f64, y: f64) -> Polygon2 {
    Polygon2::new(vec![
      pt(x, y),
      pt(x + 1.0, y),
      pt(x + 1.0, y + 1.0),
      pt(x, y + 1.0),
    ])
  }

  #[test]
  fn area_and_orientation() {
    let sq = unit_square();
    assert!(sq.is_ccw());
    assert_eq!(sq.twice_area(), scalar_from_f64(2.0).unwrap());
    let mut cw = unit_square();
    cw.reverse_orientation();
    assert!(!cw.is_ccw());
    assert_eq!(cw.verts[0], pt(0.0, 0.0));
    assert_eq!(cw.verts[1], pt(0.0, 1.0));
  }

  #[test]
  fn overlapping_squares_intersect() {
    let a = unit_square();
    let b = square_at(0.5, 0.5);
    assert!(do_intersect(&a, &b));
    let region = convex_intersection(&a, &b).unwrap();
    assert_eq!(region.twice_area(), scalar_from_f64(0.5).unwrap());
  }

  #[test]
  fn edge_contact_is_not_overlap() {
    let a = unit_square();
    let b = square_at(1.0, 0.0);
    assert!(!do_intersect(&a, &b));
    let c = square_at(1.0, 1.0);
    assert!(!do_intersect(&a, &c));
  }

  #[test]
  fn identical_squares_intersect() {
    let a = unit_square();
    assert!(do_intersect(&a, &a));
    let region = convex_intersection(&a, &a).unwrap();
    assert_eq!(region.twice_area(), scalar_from_f64(2.0).unwrap());
  }

  #[test]
  fn crossing_segments_meet_in_a_point() {
    let s = Segment2::new(pt(0.0, 0.0), pt(1.0, 1.0));
    let t = Segment2::new(pt(0.0, 1.0), pt(1.0, 0.0));
    assert_eq!(seg_seg_intersection(&s, &t), SegSeg::Point(pt(0.5, 0.5)));
  }

  #[test]
  fn touching_segments_meet_in_an_endpoint() {
    let s = Segment2::new(pt(0.0, 0.0), pt(1.0, 0.0));
    let t = Segment2::new(pt(1.0, 0.0), pt(2.0, 1.0));
    assert_eq!(seg_seg_intersection(&s, &t), SegSeg::Point(pt(1.0, 0.0)));
  }

  #[test]
  fn collinear_segments_overlap_in_a_segment() {
    let s = Segment2::new(pt(0.0, 0.0), pt(2.0, 0.0));
    let t = Segment2::new(pt(1.0, 0.0), pt(3.0, 0.0));
    match seg_seg_intersection(&s, &t) {
      SegSeg::Overlap(o) => {
        assert_eq!(o, Segment2::new(pt(1.0, 0.0), pt(2.0, 0.0)));
      }
      other => panic!("expected overlap, got {:?}", other),
    }
    assert!(segments_overlap(&s, &t));
    // reversed direction still overlaps
    let r = Segment2::new(pt(3.0, 0.0), pt(1.0, 0.0));
    assert!(segments_overlap(&s, &r));
  }

  #[test]
  fn collinear_point_touch_is_not_overlap() {
    let s = Segment2::new(pt(0.0, 0.0), pt(1.0, 0.0));
    let t = Segment2::new(pt(1.0, 0.0), pt(2.0, 0.0));
    assert_eq!(seg_seg_intersection(&s, &t), SegSeg::Point(pt(1.0, 0.0)));
    assert!(!segments_overlap(&s, &t));
  }

  #[test]
  fn segment_through_polygon() {
    let sq = unit_square();
    // cuts straight across
    assert!(segment_passes_through(
      &Segment2::new(pt(-1.0, 0.5), pt(2.0, 0.5)),
      &sq
    ));
    // endpoint strictly inside
    assert!(segment_passes_through(
      &Segment2::new(pt(0.5, 0.5), pt(0.5, 2.0)),
      &sq
    ));
    // entirely inside
    assert!(segment_passes_through(
      &Segment2::new(pt(0.25, 0.5), pt(0.75, 0.5)),
      &sq
    ));
    // along an edge: behaves as part of the boundary
    assert!(!segment_passes_through(
      &Segment2::new(pt(0.0, 0.0), pt(1.0, 0.0)),
      &sq
    ));
    // touches a single corner
    assert!(!segment_passes_through(
      &Segment2::new(pt(-1.0, 1.0), pt(1.0, -1.0)),
      &sq
    ));
    // disjoint
    assert!(!segment_passes_through(
      &Segment2::new(pt(2.0, 0.0), pt(3.0, 0.0)),
      &sq
    ));
  }

  #[test]
  fn dir_dot_sign_tracks_heading() {
    let s = Segment2::new(pt(0.0, 0.0), pt(1.0, 0.0));
    let t = Segment2::new(pt(0.0, 1.0), pt(1.0, 1.0));
    let r = Segment2::new(pt(1.0, 1.0), pt(0.0, 1.0));
    assert!(s.dir_dot(&t).is_positive());
    assert!(s.dir_dot(&r).is_negative());
  }
}
