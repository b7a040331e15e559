// setops.rs    Debug-aid set operations over brush strokes.
//
// Copyright (c) 2021  Douglas P Lau
//
// Neither of these implements real constructive solid geometry:
// `union_brush_stroke` is a bare concatenation and `intersection_brush_stroke`
// is a pairwise bounding-box overlap heuristic. They are kept around because
// the pre-distillation source offers them, but callers wanting a true
// curve-curve intersection must look elsewhere; do not wire these into
// production rendering.

use crate::convolve::{bounding_box, CubicSegment, Stroke};

/// Concatenates two strokes' segment lists under `a`'s color. Not a real
/// polygon union — merely appends `b`'s segments after `a`'s.
pub fn union_brush_stroke(a: &Stroke, b: &Stroke) -> Stroke {
    let mut segments = a.segments.clone();
    segments.extend(b.segments.iter().copied());
    Stroke {
        color: a.color,
        segments,
    }
}

fn bbox_overlaps(seg: &CubicSegment, other: &Stroke) -> bool {
    let one = Stroke {
        color: other.color,
        segments: vec![*seg],
    };
    let a = match bounding_box(&one) {
        Some(b) => b,
        None => return false,
    };
    let b = match bounding_box(other) {
        Some(b) => b,
        None => return false,
    };
    a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
}

/// Selects segments of `a` whose axis-aligned bounding box overlaps `b`'s
/// overall bounding box. This is a bounding-box-approximate placeholder, not
/// a true curve-curve intersection, and should not be mistaken for one.
pub fn intersection_brush_stroke(a: &Stroke, b: &Stroke) -> Stroke {
    let segments = a
        .segments
        .iter()
        .filter(|seg| bbox_overlaps(seg, b))
        .copied()
        .collect();
    Stroke {
        color: a.color,
        segments,
    }
}
