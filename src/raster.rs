// raster.rs    The span rasterizer.
//
// Copyright (c) 2021  Douglas P Lau
//
// Walks a stroke's cubic outline, tessellates each segment into line
// samples, rasterizes each line with an integer-step DDA into single-pixel
// spans, then sorts and merges the result into disjoint runs.

use crate::color::Color;
use crate::convolve::{CubicSegment, Stroke};
use log::debug;

/// Number of equally-spaced parameter samples taken per cubic segment.
const SAMPLES_PER_CUBIC: usize = 100;

/// A horizontal pixel run `[x_start, x_end]` (inclusive) on scanline `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub x_start: i32,
    pub x_end: i32,
    pub y: i32,
    pub color: Color,
}

fn cubic_point(c: &CubicSegment, t: f64) -> (f64, f64) {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let cc = 3.0 * mt * t * t;
    let d = t * t * t;
    (
        a * c.start.x + b * c.c1.x + cc * c.c2.x + d * c.end.x,
        a * c.start.y + b * c.c1.y + cc * c.c2.y + d * c.end.y,
    )
}

/// Rasterizes the line from `(x0, y0)` to `(x1, y1)` (already in pixel
/// space) as a run of single-pixel spans, one per integer step, via a
/// Bresenham/DDA variant.
fn rasterize_line(x0: i32, y0: i32, x1: i32, y1: i32, color: Color, spans: &mut Vec<Span>) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let steps = dx.max(dy).max(1);
    let step_x = (x1 - x0) as f64 / steps as f64;
    let step_y = (y1 - y0) as f64 / steps as f64;

    let mut x = x0 as f64;
    let mut y = y0 as f64;
    for _ in 0..=steps {
        let px = x.round() as i32;
        let py = y.round() as i32;
        spans.push(Span {
            x_start: px,
            x_end: px,
            y: py,
            color,
        });
        x += step_x;
        y += step_y;
    }
}

/// Tessellates `stroke`'s cubic outline at `resolution` pixels per unit and
/// rasterizes every resulting line segment into single-pixel spans, then
/// sorts and merges touching/overlapping spans on each scanline.
///
/// Returns an empty list for `resolution <= 0.0` or an empty stroke, never
/// panics on either input.
pub fn rasterize(stroke: &Stroke, resolution: f64) -> Vec<Span> {
    if resolution <= 0.0 || stroke.segments.is_empty() {
        return Vec::new();
    }

    let mut raw = Vec::new();
    for seg in &stroke.segments {
        let mut prev: Option<(i32, i32)> = None;
        for i in 0..=SAMPLES_PER_CUBIC {
            let t = i as f64 / SAMPLES_PER_CUBIC as f64;
            let (x, y) = cubic_point(seg, t);
            let px = (x * resolution).round() as i32;
            let py = (y * resolution).round() as i32;
            if let Some((x0, y0)) = prev {
                rasterize_line(x0, y0, px, py, stroke.color, &mut raw);
            } else {
                raw.push(Span {
                    x_start: px,
                    x_end: px,
                    y: py,
                    color: stroke.color,
                });
            }
            prev = Some((px, py));
        }
    }

    let merged = merge_spans(raw);
    debug!(
        "rasterize: {} segment(s) -> {} merged span(s)",
        stroke.segments.len(),
        merged.len()
    );
    merged
}

/// Sorts `spans` by `(y, x_start)` and folds each span into the previous one
/// on the same scanline when they touch or overlap (`prev.x_end >=
/// next.x_start - 1`), taking the maximum `x_end`.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| (a.y, a.x_start).cmp(&(b.y, b.x_start)));

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if let Some(last) = merged.last_mut() {
            if last.y == span.y && last.x_end >= span.x_start - 1 {
                last.x_end = last.x_end.max(span.x_end);
                continue;
            }
        }
        merged.push(span);
    }
    merged
}
