// convolve.rs  The pen-convolution engine.
//
// Copyright (c) 2021  Douglas P Lau
//
// Tee computation, de Casteljau subdivision, the curve/pen convolution
// itself, and the `draw_shape` driver that ties pen validation, subdivision,
// forward convolution and the reversed return pass together into a closed
// brush stroke.

use crate::color::Color;
use crate::geom::Point;
use crate::knot::{KnotId, KnotStore, Ring, SideType};
use crate::pen::{brush_make, PenError};
use crate::transform::brush_tf_translate;
use log::{debug, trace};

/// Cross products below this magnitude are treated as non-negative: ties
/// are resolved in favor of emission, which keeps the swept region closed.
const SMALL: f64 = 1e-12;

/// A single fully-explicit cubic Bezier segment emitted by the convolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

/// A color plus the ordered cubic outline of a swept shape: the
/// concatenation of the forward pass and the return pass.
#[derive(Clone, Debug)]
pub struct Stroke {
    pub color: Color,
    pub segments: Vec<CubicSegment>,
}

impl Stroke {
    pub fn empty(color: Color) -> Stroke {
        Stroke {
            color,
            segments: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------
// Quadratic / Bezier tee solvers
// ---------------------------------------------------------------------

/// Numerically stable quadratic solver for `a*t^2 + 2*b*t + c = 0`, where
/// `b` is passed already halved (the caller supplies `B = b/1`, i.e. the
/// coefficient of `t` divided by two) to avoid the doubling/halving dance
/// and the cancellation it would otherwise risk. Uses Citardauq's form
/// (`c / (a*t1)`) for the second root when `a` is non-zero, which avoids
/// subtracting two like-signed terms.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let mut roots = Vec::new();
    if a.abs() < 1e-15 {
        if b.abs() > 1e-15 {
            roots.push(-c / (2.0 * b));
        }
        return roots;
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return roots;
    }
    let sqrt_disc = disc.sqrt();
    let sign = if b >= 0.0 { 1.0 } else { -1.0 };
    let t1 = -(b + sign * sqrt_disc) / a;
    roots.push(t1);
    if t1.abs() > 1e-15 {
        roots.push(c / (a * t1));
    } else {
        let t2 = -(b - sign * sqrt_disc) / a;
        roots.push(t2);
    }
    roots
}

/// Solves for the parameter(s) at which a quadratic Bezier with control
/// values `u, v, w` equals zero. `B = v - u` is handed to `solve_quadratic`
/// in place of the textbook `2*(v - u)`.
fn solve_bezier(u: f64, v: f64, w: f64) -> Vec<f64> {
    let a = u - 2.0 * v + w;
    let b = v - u;
    solve_quadratic(a, b, u)
}

// ---------------------------------------------------------------------
// Tee computation
// ---------------------------------------------------------------------

struct CubicPoints {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
}

fn cubic_points(store: &KnotStore, p: KnotId, q: KnotId) -> CubicPoints {
    CubicPoints {
        p0: store.point(p),
        p1: store.right(p),
        p2: store.left(q),
        p3: store.point(q),
    }
}

/// Inflection-point tees, per Pomax's cubic-inflection derivation: translate
/// so `p0` is the origin and rotate so `p3` lies on the positive x-axis,
/// then take the rotated control points themselves, `p1 = (x0,y0)`,
/// `p2 = (x1,y1)`, `p3 = (x2, 0)`, and solve the quadratic in their cross
/// terms `a = x1*y0, b = x2*y0, c = x0*y1, d = x2*y1`.
fn inflection_tees(c: &CubicPoints) -> Vec<f64> {
    let end = c.p3 - c.p0;
    let len = end.mag();
    if len < 1e-15 {
        return Vec::new();
    }
    let cos_t = end.x / len;
    let sin_t = end.y / len;
    let rotate = |p: Point| -> Point {
        let d = p - c.p0;
        Point::new(d.x * cos_t + d.y * sin_t, -d.x * sin_t + d.y * cos_t)
    };
    let p1 = rotate(c.p1);
    let p2 = rotate(c.p2);
    let p3 = rotate(c.p3);

    let a = p2.x * p1.y;
    let b = p3.x * p1.y;
    let cc = p1.x * p2.y;
    let d = p3.x * p2.y;

    let qa = 18.0 * (-3.0 * a + 2.0 * b + 3.0 * cc - d);
    let qb = 18.0 * (-3.0 * a + b + 3.0 * cc);
    let qc = 18.0 * (cc - a);
    // solve_quadratic expects the middle coefficient pre-halved.
    solve_quadratic(qa, qb / 2.0, qc)
}

/// Pen-slope tees: for each pen edge direction `(dx, dy)`, solves for the
/// parameter at which the curve's tangent is parallel to that edge.
fn pen_tees(store: &KnotStore, c: &CubicPoints, pen: Ring) -> Vec<f64> {
    let mut tees = Vec::new();
    // First-derivative control polygon (scaled by 3, which is irrelevant
    // to the root locations).
    let d0 = c.p1 - c.p0;
    let d1 = c.p2 - c.p1;
    let d2 = c.p3 - c.p2;

    let mut r = pen.0;
    loop {
        let t = store.succ(r);
        let rp = store.point(r);
        let tp = store.point(t);
        let dx = tp.x - rp.x;
        let dy = tp.y - rp.y;

        let u = d0.y * dx - d0.x * dy;
        let v = d1.y * dx - d1.x * dy;
        let w = d2.y * dx - d2.x * dy;
        tees.extend(solve_bezier(u, v, w));

        r = t;
        if r == pen.0 {
            break;
        }
    }
    tees
}

fn compute_tees(store: &KnotStore, p: KnotId, q: KnotId, pen: Ring) -> Vec<f64> {
    let c = cubic_points(store, p, q);
    let mut tees = inflection_tees(&c);
    tees.extend(pen_tees(store, &c, pen));
    tees.retain(|&t| t > 0.0 && t < 1.0);
    tees.sort_by(|a, b| a.partial_cmp(b).unwrap());
    tees
}

// ---------------------------------------------------------------------
// De Casteljau subdivision
// ---------------------------------------------------------------------

fn lerp(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

/// Splits the cubic `p -> succ(p)` at parameter `t`, inserting a new knot
/// between them and returning its id. Updates `p`'s right control and the
/// old successor's left control per the de Casteljau formulae.
fn cubic_split(store: &mut KnotStore, p: KnotId, t: f64) -> KnotId {
    let q = store.succ(p);
    let c = cubic_points(store, p, q);

    let u0 = lerp(c.p0, c.p1, t);
    let u1 = lerp(c.p1, c.p2, t);
    let u2 = lerp(c.p2, c.p3, t);
    let v0 = lerp(u0, u1, t);
    let v1 = lerp(u1, u2, t);
    let w0 = lerp(v0, v1, t);

    let r = store.insert_after(p, w0);
    store.set_right(p, u0, SideType::Explicit);
    store.set_left(r, v0, SideType::Explicit);
    store.set_right(r, v1, SideType::Explicit);
    store.set_left(q, u2, SideType::Explicit);
    r
}

/// Subdivides every edge of `path` at its inflection and pen-slope tees.
/// Visits each original ring edge exactly once (the source's loop guards
/// against an improperly-closed ring; every ring this crate can build is
/// already closed, so that guard is unnecessary here — see design notes).
fn split_at_tees(store: &mut KnotStore, path: Ring, pen: Ring) {
    let start = path.0;
    let mut p = start;
    loop {
        let q = store.succ(p);
        let tees = compute_tees(store, p, q, pen);
        trace!("segment has {} tee(s)", tees.len());

        let mut s = 0.0;
        let mut cur = p;
        for &x in &tees {
            if (x - s).abs() > 1e-15 {
                let local_t = (x - s) / (1.0 - s);
                cur = cubic_split(store, cur, local_t);
                s = x;
            }
        }

        p = q;
        if p == start {
            break;
        }
    }
}

// ---------------------------------------------------------------------
// Convolution
// ---------------------------------------------------------------------

fn clockwise(ax: f64, ay: f64, bx: f64, by: f64) -> bool {
    let d = ax * by - ay * bx;
    d.abs() < SMALL || d >= 0.0
}

/// True if vector `b` lies within the closed convex angle swept from `a` to
/// `c` (going counter-clockwise), per the cross-product sign tests.
fn within_turn(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> bool {
    if !clockwise(ax, ay, bx, by) {
        clockwise(bx, by, cx, cy) && clockwise(cx, cy, ax, ay)
    } else {
        clockwise(ax, ay, cx, cy) && clockwise(cx, cy, bx, by)
    }
}

/// Translates `shape`'s cubic segment (its own controls out to its
/// successor) by `offset`'s position.
fn make_move(store: &KnotStore, offset: KnotId, shape: KnotId) -> CubicSegment {
    let off = store.point(offset);
    let succ = store.succ(shape);
    let c = cubic_points(store, shape, succ);
    CubicSegment {
        start: off + c.p0,
        c1: off + c.p1,
        c2: off + c.p2,
        end: off + c.p3,
    }
}

#[allow(clippy::too_many_arguments)]
fn convolve(
    store: &KnotStore,
    p: KnotId,
    t1: (f64, f64),
    t2: (f64, f64),
    t3: (f64, f64),
    pen_r: KnotId,
    trace_buf: &mut Vec<CubicSegment>,
) {
    let s = store.pred(pen_r);
    let rp = store.point(pen_r);
    let sp = store.point(s);
    let x4 = rp.x - sp.x;
    let y4 = rp.y - sp.y;

    let t = store.succ(pen_r);
    let tp = store.point(t);
    let x5 = tp.x - rp.x;
    let y5 = tp.y - rp.y;

    if within_turn(t1.0, t1.1, t2.0, t2.1, x5, y5) {
        trace_buf.push(make_move(store, p, pen_r));
    }
    if within_turn(x4, y4, x5, y5, t3.0, t3.1) {
        trace_buf.push(make_move(store, pen_r, p));
    }
}

/// Walks the (already subdivided) curve ring; for each curve knot and each
/// pen knot, emits zero, one or two offset cubic "moves" into the trace.
fn convolve_all(store: &KnotStore, path: Ring, pen: Ring) -> Vec<CubicSegment> {
    let mut trace_buf = Vec::new();
    let start = path.0;
    let mut p = start;
    loop {
        let q = store.succ(p);
        let pp = store.point(p);
        let qp = store.point(q);

        let right = store.right(p);
        let x2 = right.x - pp.x;
        let y2 = right.y - pp.y;
        let (x1, y1) = if store.left_type(p) == SideType::Explicit {
            let left = store.left(p);
            (pp.x - left.x, pp.y - left.y)
        } else {
            (-x2, -y2)
        };
        let x3 = qp.x - pp.x;
        let y3 = qp.y - pp.y;

        let mut r = pen.0;
        loop {
            convolve(store, p, (x1, y1), (x2, y2), (x3, y3), r, &mut trace_buf);
            r = store.succ(r);
            if r == pen.0 {
                break;
            }
        }

        p = q;
        if p == start {
            break;
        }
    }
    trace_buf
}

/// Validates and recenters `pen`, then convolves `path` along it, emitting
/// a forward pass and a return pass (on a cloned, ring-reversed copy of the
/// already-subdivided path) into one closed stroke.
///
/// `draw_shape` checks the validator's result before doing anything else:
/// it must not proceed on an invalid pen. An empty `path` is a no-op draw
/// that still validates and recenters the pen, returning an empty stroke.
pub fn draw_shape(
    store: &mut KnotStore,
    path: Option<Ring>,
    pen: Ring,
    color: Color,
) -> Result<Stroke, PenError> {
    brush_make(store, pen)?;
    brush_tf_translate(store, pen, Point::zero());

    let path = match path {
        Some(p) => p,
        None => {
            debug!("draw_shape: empty path, returning empty stroke");
            return Ok(Stroke::empty(color));
        }
    };

    split_at_tees(store, path, pen);
    let mut segments = convolve_all(store, path, pen);
    debug!("forward pass emitted {} segment(s)", segments.len());

    let return_path = store.ring_reverse(store.ring_clone(path));
    let return_segments = convolve_all(store, return_path, pen);
    debug!("return pass emitted {} segment(s)", return_segments.len());
    segments.extend(return_segments);

    store.free_ring(path);
    store.free_ring(return_path);

    Ok(Stroke { color, segments })
}

/// Computes the axis-aligned bounding box over every control/end point of
/// every segment in `stroke`.
pub fn bounding_box(stroke: &Stroke) -> Option<crate::geom::BBox> {
    let mut iter = stroke.segments.iter();
    let first = iter.next()?;
    let mut bbox = crate::geom::BBox::new(first.start);
    bbox.extend(first.c1);
    bbox.extend(first.c2);
    bbox.extend(first.end);
    for seg in iter {
        bbox.extend(seg.start);
        bbox.extend(seg.c1);
        bbox.extend(seg.c2);
        bbox.extend(seg.end);
    }
    Some(bbox)
}
