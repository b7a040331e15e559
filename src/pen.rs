// pen.rs       Pen (brush) validation.
//
// Copyright (c) 2021  Douglas P Lau
//
// Accepts only closed, convex, counter-clockwise rings with bounded winding,
// and stamps their control points with the pen's own one-third convention
// while it walks them.

use crate::geom::{reduce_angle, Point};
use crate::knot::{KnotStore, Ring, SideType};
use crate::path::{lineto, moveto, pathclose};
use log::{debug, warn};
use std::f64::consts::PI;
use std::fmt;

/// Reasons a ring fails pen validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenError {
    /// Two consecutive knots coincide (a zero-length edge).
    DuplicatePoint,
    /// A turn from one edge to the next is not strictly to the left.
    NotCounterClockwise,
    /// The ring's accumulated turn exceeds one full revolution.
    Overwound,
}

impl fmt::Display for PenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            PenError::DuplicatePoint => "pen ring has a zero-length edge",
            PenError::NotCounterClockwise => "pen ring is not strictly convex and counter-clockwise",
            PenError::Overwound => "pen ring winds more than one full revolution",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for PenError {}

/// One-third convention used by the pen validator, distinct from the path
/// constructors' 0.3/0.7 split but geometrically equivalent for a straight
/// edge (both place the control strictly between the edge's endpoints).
const THIRD: f64 = 1.0 / 3.0;

/// Validates `pen` as a convex, counter-clockwise, bounded-winding ring,
/// writing one-third control points onto every edge as it walks them.
///
/// Walks the ring once, starting at any knot, carrying the previous edge's
/// direction forward from iteration to iteration; the very first "previous
/// edge" is the ring's closing edge (predecessor of the start knot into the
/// start knot), checked for zero length before the main walk begins.
pub fn brush_make(store: &mut KnotStore, pen: Ring) -> Result<(), PenError> {
    let start = pen.0;
    let q0 = store.pred(start);
    let start_pt = store.point(start);
    let q0_pt = store.point(q0);
    let mut dx = start_pt.x - q0_pt.x;
    let mut dy = start_pt.y - q0_pt.y;
    if dx == 0.0 && dy == 0.0 {
        warn!("pen validation failed: duplicate point at ring start");
        return Err(PenError::DuplicatePoint);
    }

    let mut alpha = 0.0;
    let mut p = start;
    loop {
        let q = store.succ(p);
        let pp = store.point(p);
        let qp = store.point(q);
        let du = qp.x - pp.x;
        let dv = qp.y - pp.y;

        store.set_right(p, pp + Point::new(du, dv) * THIRD, SideType::Explicit);
        store.set_left(q, pp + Point::new(du, dv) * (1.0 - THIRD), SideType::Explicit);

        if du == 0.0 && dv == 0.0 {
            warn!("pen validation failed: duplicate point mid-ring");
            return Err(PenError::DuplicatePoint);
        }

        let theta = reduce_angle(dv.atan2(du) - dy.atan2(dx));
        if theta <= 0.0 {
            warn!("pen validation failed: clockwise or collinear turn");
            return Err(PenError::NotCounterClockwise);
        }
        alpha += theta;

        dx = du;
        dy = dv;
        p = q;
        if p == start {
            break;
        }
    }

    if alpha > 2.0 * PI {
        warn!("pen validation failed: overwound ring (alpha = {})", alpha);
        return Err(PenError::Overwound);
    }
    debug!("pen validated: total turn = {:.6} rad", alpha);
    Ok(())
}

/// Builds the canonical unit square pen:
/// `(0.5, 0.5) -> (-0.5, 0.5) -> (-0.5, -0.5) -> (0.5, -0.5) -> close`.
///
/// Built from the ordinary path constructors (so its control points follow
/// the 0.3/0.7 convention, not the validator's), and pre-validated by
/// construction: its vertex order is convex and counter-clockwise by
/// inspection, so it is never run through `brush_make`.
pub fn brush_make_square(store: &mut KnotStore) -> Ring {
    let ring = moveto(store, Point::new(0.5, 0.5));
    lineto(store, ring, Point::new(-0.5, 0.5));
    lineto(store, ring, Point::new(-0.5, -0.5));
    lineto(store, ring, Point::new(0.5, -0.5));
    pathclose(store, Some(ring)).expect("ring was Some")
}

#[cfg(test)]
mod test {
    use super::*;

    fn square_ccw(store: &mut KnotStore) -> Ring {
        let ring = moveto(store, Point::new(1.0, -1.0));
        lineto(store, ring, Point::new(1.0, 1.0));
        lineto(store, ring, Point::new(-1.0, 1.0));
        lineto(store, ring, Point::new(-1.0, -1.0));
        pathclose(store, Some(ring)).unwrap()
    }

    #[test]
    fn square_ccw_validates() {
        let mut store = KnotStore::new();
        let ring = square_ccw(&mut store);
        assert_eq!(brush_make(&mut store, ring), Ok(()));
    }

    #[test]
    fn square_cw_is_rejected() {
        let mut store = KnotStore::new();
        let ring = moveto(&mut store, Point::new(1.0, -1.0));
        lineto(&mut store, ring, Point::new(-1.0, -1.0));
        lineto(&mut store, ring, Point::new(-1.0, 1.0));
        lineto(&mut store, ring, Point::new(1.0, 1.0));
        let ring = pathclose(&mut store, Some(ring)).unwrap();
        assert_eq!(brush_make(&mut store, ring), Err(PenError::NotCounterClockwise));
    }

    #[test]
    fn collinear_triangle_is_rejected() {
        let mut store = KnotStore::new();
        let ring = moveto(&mut store, Point::new(0.0, 0.0));
        lineto(&mut store, ring, Point::new(1.0, 0.0));
        lineto(&mut store, ring, Point::new(2.0, 0.0));
        let ring = pathclose(&mut store, Some(ring)).unwrap();
        assert_eq!(brush_make(&mut store, ring), Err(PenError::NotCounterClockwise));
    }

    #[test]
    fn duplicate_point_is_rejected() {
        let mut store = KnotStore::new();
        let ring = moveto(&mut store, Point::new(0.0, 0.0));
        lineto(&mut store, ring, Point::new(0.0, 0.0));
        lineto(&mut store, ring, Point::new(1.0, 1.0));
        let ring = pathclose(&mut store, Some(ring)).unwrap();
        assert_eq!(brush_make(&mut store, ring), Err(PenError::DuplicatePoint));
    }

    #[test]
    fn overwound_star_is_rejected() {
        // A convex decagon traversed twice (21 knots back to the start)
        // accumulates a turn sum of roughly two full revolutions.
        let mut store = KnotStore::new();
        let n = 10;
        let two_laps = 2 * n;
        let radius = 1.0;
        let mut ring = None;
        for i in 0..two_laps {
            let theta = 2.0 * PI * (i as f64) / (n as f64);
            let p = Point::new(radius * theta.cos(), radius * theta.sin());
            ring = Some(match ring {
                None => moveto(&mut store, p),
                Some(r) => lineto(&mut store, r, p),
            });
        }
        let ring = pathclose(&mut store, ring).unwrap();
        assert_eq!(brush_make(&mut store, ring), Err(PenError::Overwound));
    }

    #[test]
    fn square_pen_sets_one_third_controls() {
        let mut store = KnotStore::new();
        let ring = square_ccw(&mut store);
        brush_make(&mut store, ring).unwrap();
        let p = ring.0;
        let q = store.succ(p);
        let pp = store.point(p);
        let qp = store.point(q);
        let expected_right = pp + (qp - pp) * THIRD;
        assert!((store.right(p).x - expected_right.x).abs() < 1e-12);
        assert!((store.right(p).y - expected_right.y).abs() < 1e-12);
    }

    #[test]
    fn brush_make_square_is_ccw_and_centered() {
        let mut store = KnotStore::new();
        let ring = brush_make_square(&mut store);
        let ids = store.ring_ids(ring);
        assert_eq!(ids.len(), 4);
        // winding should be positive (CCW) for this hand-built square.
        let mut area2 = 0.0;
        for i in 0..ids.len() {
            let a = store.point(ids[i]);
            let b = store.point(ids[(i + 1) % ids.len()]);
            area2 += a.x * b.y - b.x * a.y;
        }
        assert!(area2 > 0.0);
    }
}
