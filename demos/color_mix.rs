// color_mix.rs
//
// Renders a strip of swatches mixing two colors across mix in [-1, 1],
// exercising `color_mixer` end to end.

use quillpen::{color_mixer, Color, ImageBuffer};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 40;

fn main() -> std::io::Result<()> {
    let red = Color::new(255, 0, 0, 255);
    let blue = Color::new(0, 0, 255, 255);

    let mut image = ImageBuffer::new(WIDTH, HEIGHT, Color::new(255, 255, 255, 255));
    for x in 0..WIDTH {
        let mix = 2.0 * (x as f64 / (WIDTH - 1) as f64) - 1.0;
        let c = color_mixer(red, blue, mix);
        for y in 0..HEIGHT {
            image.blit_spans(&[quillpen::Span {
                x_start: x as i32,
                x_end: x as i32,
                y: y as i32,
                color: c,
            }]);
        }
    }
    image.write_png("./color_mix.png")
}
