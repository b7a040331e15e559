// rotated_pen.rs
//
// Same sweep as `square_stroke`, but the pen is rotated 45 degrees about Z
// before the draw, widening the stroke's bounding box along both axes.

use quillpen::{
    brush_make_square, brush_tf_rotate, draw_shape, lineto, moveto, pathclose, rasterize, Axis,
    Color, ImageBuffer, KnotStore, Point,
};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut store = KnotStore::new();
    let pen = brush_make_square(&mut store);
    brush_tf_rotate(&mut store, pen, 45.0, Axis::Z);

    let path = moveto(&mut store, Point::new(8.0, 32.0));
    lineto(&mut store, path, Point::new(56.0, 32.0));
    let path = pathclose(&mut store, Some(path));

    let stroke = draw_shape(&mut store, path, pen, Color::new(64, 64, 208, 255))
        .expect("the square pen survives an arbitrary rotation");

    let spans = rasterize(&stroke, 1.0);

    let mut image = ImageBuffer::new(64, 64, Color::new(255, 255, 255, 255));
    image.blit_spans(&spans);
    image.write_png("./rotated_pen.png")
}
