// export_formats.rs
//
// Renders one stroke and exports it through all three image writers, to
// demonstrate that `ImageBuffer` is a single interface shared by PNG, BMP
// and PPM output.

use quillpen::{
    brush_make_square, draw_shape, lineto, moveto, pathclose, rasterize, Color, ImageBuffer,
    KnotStore, Point,
};

fn main() -> std::io::Result<()> {
    let mut store = KnotStore::new();
    let pen = brush_make_square(&mut store);

    let path = moveto(&mut store, Point::new(4.0, 16.0));
    lineto(&mut store, path, Point::new(28.0, 16.0));
    let path = pathclose(&mut store, Some(path));

    let stroke = draw_shape(&mut store, path, pen, Color::new(32, 160, 32, 255))
        .expect("the square pen is always valid");
    let spans = rasterize(&stroke, 1.0);

    let mut image = ImageBuffer::new(32, 32, Color::new(0, 0, 0, 255));
    image.blit_spans(&spans);

    image.write_png("./export_formats.png")?;
    image.write_bmp("./export_formats.bmp")?;
    image.write_ppm("./export_formats.ppm")?;
    Ok(())
}
