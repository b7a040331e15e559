// transform.rs Brush transforms.
//
// Copyright (c) 2021  Douglas P Lau
//
// A single affine primitive plus named convenience wrappers
// (translate/resize/rotate/reflect/shear), all composing a 3x3 matrix and
// delegating to `brush_tf`.

use crate::geom::{BBox, Matrix3, Point};
use crate::knot::{KnotStore, Ring, SideType};

/// Which axis a named transform acts on. `Z` means "uniform" for `resize`
/// and "2D roll" for `rotate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Applies `m` to every knot of `ring`, in place.
///
/// For every knot `k`, after moving it, this also overwrites the explicit
/// control-point slot of the *previous* knot's right side and the *next*
/// knot's left side with `k`'s new position — not with the transformed old
/// control point. This degrades the pen to straight edges after any
/// transform; it is an intentional, documented quirk rather than a bug, and
/// reimplementations must not silently "fix" it.
pub fn brush_tf(store: &mut KnotStore, ring: Ring, m: &Matrix3) {
    let ids = store.ring_ids(ring);
    for &k in &ids {
        let new_pos = m.apply(store.point(k));
        store.set_point(k, new_pos);

        let succ = store.succ(k);
        if store.left_type(succ) == SideType::Explicit {
            store.set_left(succ, new_pos, SideType::Explicit);
        }
        let pred = store.pred(k);
        if store.right_type(pred) == SideType::Explicit {
            store.set_right(pred, new_pos, SideType::Explicit);
        }
    }
}

fn bbox_of(store: &KnotStore, ring: Ring) -> BBox {
    let ids = store.ring_ids(ring);
    let mut bbox = BBox::new(store.point(ids[0]));
    for &id in &ids[1..] {
        bbox.extend(store.point(id));
    }
    bbox
}

/// Translates the ring's bounding-box midpoint to `dest`.
pub fn brush_tf_translate(store: &mut KnotStore, ring: Ring, dest: Point) {
    let center = bbox_of(store, ring).center();
    let delta = dest - center;
    let m = Matrix3::translation(delta.x, delta.y);
    brush_tf(store, ring, &m);
}

/// Scales the ring about the origin. `Z` scales both axes by `scale`
/// uniformly; `X`/`Y` scale only that axis, leaving the other at 1.
pub fn brush_tf_resize(store: &mut KnotStore, ring: Ring, scale: f64, axis: Axis) {
    let m = match axis {
        Axis::X => Matrix3::scale(scale, 1.0),
        Axis::Y => Matrix3::scale(1.0, scale),
        Axis::Z => Matrix3::scale(scale, scale),
    };
    brush_tf(store, ring, &m);
}

/// Rotates the ring about the origin by `theta_deg` degrees. `X` is pitch,
/// `Y` is yaw (both project a 3D rotation back onto the plane), `Z` is the
/// ordinary 2D roll.
pub fn brush_tf_rotate(store: &mut KnotStore, ring: Ring, theta_deg: f64, axis: Axis) {
    let theta = theta_deg.to_radians();
    let m = match axis {
        Axis::X => Matrix3::rotation_x(theta),
        Axis::Y => Matrix3::rotation_y(theta),
        Axis::Z => Matrix3::rotation_z(theta),
    };
    brush_tf(store, ring, &m);
}

/// Reflects the ring across the X or Y axis, reversing the ring's direction
/// first so the counter-clockwise invariant holds for subsequent pen use.
pub fn brush_tf_reflect(store: &mut KnotStore, ring: Ring, axis: Axis) {
    let ring = store.ring_reverse(ring);
    let m = match axis {
        Axis::X => Matrix3::reflect_x(),
        Axis::Y => Matrix3::reflect_y(),
        Axis::Z => Matrix3::identity(),
    };
    brush_tf(store, ring, &m);
}

/// Shears the ring: `X` skews x by `shear * y`, `Y` skews y by `shear * x`.
pub fn brush_tf_shear(store: &mut KnotStore, ring: Ring, shear: f64, axis: Axis) {
    let m = match axis {
        Axis::X => Matrix3::shear_x(shear),
        Axis::Y => Matrix3::shear_y(shear),
        Axis::Z => Matrix3::identity(),
    };
    brush_tf(store, ring, &m);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::{lineto, moveto, pathclose};

    fn unit_square(store: &mut KnotStore) -> Ring {
        let r = moveto(store, Point::new(1.0, 1.0));
        lineto(store, r, Point::new(-1.0, 1.0));
        lineto(store, r, Point::new(-1.0, -1.0));
        lineto(store, r, Point::new(1.0, -1.0));
        pathclose(store, Some(r)).unwrap()
    }

    #[test]
    fn identity_leaves_positions_unchanged() {
        let mut store = KnotStore::new();
        let r = unit_square(&mut store);
        let before: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        brush_tf(&mut store, r, &Matrix3::identity());
        let after: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn translate_moves_center_to_dest() {
        let mut store = KnotStore::new();
        let r = unit_square(&mut store);
        brush_tf_translate(&mut store, r, Point::new(10.0, 20.0));
        let center = bbox_of(&store, r).center();
        assert!((center.x - 10.0).abs() < 1e-9);
        assert!((center.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn reflect_x_twice_restores_geometry() {
        let mut store = KnotStore::new();
        let r = unit_square(&mut store);
        let before: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        brush_tf_reflect(&mut store, r, Axis::X);
        brush_tf_reflect(&mut store, r, Axis::X);
        let after: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        assert_eq!(before.len(), after.len());
        for p in &before {
            assert!(after.iter().any(|q| (q.x - p.x).abs() < 1e-9 && (q.y - p.y).abs() < 1e-9));
        }
    }

    #[test]
    fn rotate_then_inverse_rotate_restores_positions() {
        let mut store = KnotStore::new();
        let r = unit_square(&mut store);
        let before: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        brush_tf_rotate(&mut store, r, 37.0, Axis::Z);
        brush_tf_rotate(&mut store, r, -37.0, Axis::Z);
        let after: Vec<_> = store.ring_ids(r).iter().map(|&k| store.point(k)).collect();
        for (p, q) in before.iter().zip(after.iter()) {
            assert!((p.x - q.x).abs() < 1e-9);
            assert!((p.y - q.y).abs() < 1e-9);
        }
    }

    #[test]
    fn resize_z_scales_both_axes() {
        let mut store = KnotStore::new();
        let r = unit_square(&mut store);
        brush_tf_resize(&mut store, r, 2.0, Axis::Z);
        let bbox = bbox_of(&store, r);
        assert!((bbox.max.x - 2.0).abs() < 1e-9);
        assert!((bbox.max.y - 2.0).abs() < 1e-9);
    }
}
