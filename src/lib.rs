// lib.rs      Quillpen crate.
//
// Copyright (c) 2021  Douglas P Lau
//
//! quillpen is a 2D vector-graphics kernel built on pen convolution: a
//! closed convex pen polygon is swept along a path to produce the cubic
//! Bezier outline of the region it sweeps, which is then rasterized to a
//! pixel grid as horizontal spans.
//!
//! The core pipeline is five stages, leaves first: a [`knot`] ring arena,
//! [`path`] constructors that build cyclic knot rings from move/line/curve
//! operations, a [`pen`] validator that accepts only convex
//! counter-clockwise rings, the [`convolve`] engine that sweeps pen along
//! path, and a [`raster`] stage that turns the resulting outline into
//! spans. [`color`], [`imgbuf`] and [`setops`] are ambient collaborators:
//! useful for demos and tests, but not load-bearing for the pipeline
//! itself.

pub mod color;
pub mod convolve;
pub mod geom;
pub mod imgbuf;
pub mod knot;
pub mod path;
pub mod pen;
pub mod raster;
pub mod setops;
pub mod transform;

pub use color::{color_mixer, Color};
pub use convolve::{bounding_box, draw_shape, CubicSegment, Stroke};
pub use geom::{Matrix3, Point};
pub use imgbuf::ImageBuffer;
pub use knot::{KnotStore, Ring};
pub use path::{curveto, lineto, moveto, pathclose, rlineto, rmoveto};
pub use pen::{brush_make, brush_make_square, PenError};
pub use raster::{rasterize, Span};
pub use transform::{
    brush_tf, brush_tf_reflect, brush_tf_resize, brush_tf_rotate, brush_tf_shear,
    brush_tf_translate, Axis,
};
