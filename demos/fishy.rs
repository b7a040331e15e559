// fishy.rs
//
// The teacher crate's long-running "fishy" smoke test, reworked for pen
// convolution: a fish-shaped path swept with the square pen and rendered
// to a PNG.

use quillpen::{
    brush_make_square, curveto, draw_shape, lineto, moveto, pathclose, rasterize, Color,
    ImageBuffer, KnotStore, Point,
};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut store = KnotStore::new();
    let pen = brush_make_square(&mut store);

    let path = moveto(&mut store, Point::new(16.0, 64.0));
    let path = lineto(&mut store, path, Point::new(48.0, 88.0));
    let path = curveto(
        &mut store,
        path,
        Point::new(20.0, 8.0),
        Point::new(20.0, 136.0),
        Point::new(48.0, 120.0),
    );
    let path = lineto(&mut store, path, Point::new(80.0, 144.0));
    let path = lineto(&mut store, path, Point::new(64.0, 104.0));
    let path = pathclose(&mut store, Some(path));

    let stroke = draw_shape(&mut store, path, pen, Color::new(255, 208, 208, 255))
        .expect("the square pen is always valid");
    let spans = rasterize(&stroke, 1.0);

    let mut image = ImageBuffer::new(128, 160, Color::new(127, 96, 96, 255));
    image.blit_spans(&spans);
    image.write_png("./fishy.png")
}
