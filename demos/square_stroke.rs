// square_stroke.rs
//
// Sweeps the standard unit square pen along a single horizontal segment and
// writes the rasterized outline to a PNG.

use quillpen::{
    brush_make_square, draw_shape, lineto, moveto, pathclose, rasterize, Color, ImageBuffer,
    KnotStore, Point,
};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut store = KnotStore::new();
    let pen = brush_make_square(&mut store);

    let path = moveto(&mut store, Point::new(8.0, 32.0));
    lineto(&mut store, path, Point::new(56.0, 32.0));
    let path = pathclose(&mut store, Some(path));

    let stroke = draw_shape(&mut store, path, pen, Color::new(208, 64, 64, 255))
        .expect("the square pen is always valid");

    let spans = rasterize(&stroke, 1.0);

    let mut image = ImageBuffer::new(64, 64, Color::new(255, 255, 255, 255));
    image.blit_spans(&spans);
    image.write_png("./square_stroke.png")
}
