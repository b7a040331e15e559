// path.rs      Path constructors.
//
// Copyright (c) 2021  Douglas P Lau
//
// Turns user-authored move/line/curve/close calls into a cyclic knot ring
// whose every edge is a well-formed (possibly degenerate) cubic Bezier
// segment.

use crate::geom::Point;
use crate::knot::{KnotId, KnotStore, Ring, SideType};

/// Fraction along an edge at which the *outgoing* control point of its
/// start knot is placed by the path constructors.
///
/// The 0.3/0.7 split (as opposed to the pen validator's symmetric 1/3, 2/3)
/// is the path-side convention; both encode a straight edge as a degenerate
/// cubic with collinear controls, which is all the convolution engine
/// requires.
const FIRST_THIRD: f64 = 0.3;
const SECOND_THIRD: f64 = 0.7;

fn set_edge_controls(store: &mut KnotStore, r: KnotId, q: KnotId) {
    let rp = store.point(r);
    let qp = store.point(q);
    let d = qp - rp;
    store.set_right(r, rp + d * FIRST_THIRD, SideType::Explicit);
    store.set_left(q, rp + d * SECOND_THIRD, SideType::Explicit);
}

/// Starts a new path at `p`, returning a fresh one-knot ring.
pub fn moveto(store: &mut KnotStore, p: Point) -> Ring {
    let ring = store.new_ring(p);
    store.set_left(ring.0, Point::zero(), SideType::Open);
    store.set_right(ring.0, Point::zero(), SideType::Regular);
    ring
}

/// Starts a new path at `pred(ring) + delta`; `ring` itself is untouched.
pub fn rmoveto(store: &mut KnotStore, ring: Ring, delta: Point) -> Ring {
    let base = store.point(store.pred(ring.0));
    moveto(store, base + delta)
}

/// Appends a straight edge to `p`, inserting the new knot just before the
/// ring's handle. The handle itself is unchanged.
pub fn lineto(store: &mut KnotStore, ring: Ring, p: Point) -> Ring {
    let r = store.pred(ring.0);
    let q = store.insert_before(ring.0, p);
    set_edge_controls(store, r, q);
    ring
}

/// As `lineto`, with `delta` relative to the current last knot.
pub fn rlineto(store: &mut KnotStore, ring: Ring, delta: Point) -> Ring {
    let r = store.pred(ring.0);
    let base = store.point(r);
    lineto(store, ring, base + delta)
}

/// Appends an explicit cubic segment ending at `end`, with control points
/// `c1` (leaving the current last knot) and `c2` (entering `end`).
pub fn curveto(store: &mut KnotStore, ring: Ring, c1: Point, c2: Point, end: Point) -> Ring {
    let r = store.pred(ring.0);
    let q = store.insert_before(ring.0, end);
    store.set_right(r, c1, SideType::Explicit);
    store.set_left(q, c2, SideType::Explicit);
    ring
}

/// Closes the path: the 0.3/0.7 convention is applied to the final edge
/// (current-predecessor back to the handle), unless the ring holds only a
/// single knot, in which case closing is a no-op. `None` input is a no-op
/// that stays `None` — an empty path is a valid, inert value.
pub fn pathclose(store: &mut KnotStore, ring: Option<Ring>) -> Option<Ring> {
    let ring = ring?;
    let r = store.pred(ring.0);
    if r != ring.0 {
        set_edge_controls(store, r, ring.0);
    }
    Some(ring)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn moveto_is_self_linked_open_regular() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(1.0, 1.0));
        assert_eq!(store.succ(r.0), r.0);
        assert_eq!(store.left_type(r.0), SideType::Open);
        assert_eq!(store.right_type(r.0), SideType::Regular);
    }

    #[test]
    fn lineto_preserves_handle_and_sets_thirds() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(0.0, 0.0));
        let r2 = lineto(&mut store, r, Point::new(10.0, 0.0));
        assert_eq!(r2, r);
        let a = store.succ(r.0);
        assert_eq!(store.point(a), Point::new(10.0, 0.0));
        assert_eq!(store.right(r.0), Point::new(3.0, 0.0));
        assert_eq!(store.left(a), Point::new(7.0, 0.0));
        assert_eq!(store.right_type(r.0), SideType::Explicit);
        assert_eq!(store.left_type(a), SideType::Explicit);
    }

    #[test]
    fn rlineto_is_relative_to_last_knot() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(5.0, 5.0));
        rlineto(&mut store, r, Point::new(2.0, -1.0));
        let a = store.succ(r.0);
        assert_eq!(store.point(a), Point::new(7.0, 4.0));
    }

    #[test]
    fn curveto_uses_explicit_controls_verbatim() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(0.0, 0.0));
        curveto(
            &mut store,
            r,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 0.0),
        );
        let a = store.succ(r.0);
        assert_eq!(store.right(r.0), Point::new(1.0, 2.0));
        assert_eq!(store.left(a), Point::new(3.0, 4.0));
    }

    #[test]
    fn pathclose_single_knot_is_noop() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(0.0, 0.0));
        let before = store.right_type(r.0);
        let closed = pathclose(&mut store, Some(r));
        assert_eq!(closed, Some(r));
        assert_eq!(store.right_type(r.0), before);
    }

    #[test]
    fn pathclose_sets_closing_edge_thirds() {
        let mut store = KnotStore::new();
        let r = moveto(&mut store, Point::new(0.0, 0.0));
        lineto(&mut store, r, Point::new(10.0, 0.0));
        lineto(&mut store, r, Point::new(10.0, 10.0));
        pathclose(&mut store, Some(r));
        let last = store.pred(r.0);
        assert_eq!(store.right_type(last), SideType::Explicit);
        assert_eq!(store.left_type(r.0), SideType::Explicit);
    }

    #[test]
    fn pathclose_none_stays_none() {
        let mut store = KnotStore::new();
        assert_eq!(pathclose(&mut store, None), None);
    }
}
