use criterion::{criterion_group, criterion_main, Criterion};
use quillpen::{
    brush_make_square, curveto, draw_shape, lineto, moveto, pathclose, rasterize, Color,
    KnotStore, Point,
};

fn make_fishy(store: &mut KnotStore) -> quillpen::Ring {
    let path = moveto(store, Point::new(16.0, 64.0));
    let path = lineto(store, path, Point::new(48.0, 88.0));
    let path = curveto(
        store,
        path,
        Point::new(20.0, 8.0),
        Point::new(20.0, 136.0),
        Point::new(48.0, 120.0),
    );
    let path = lineto(store, path, Point::new(80.0, 144.0));
    let path = lineto(store, path, Point::new(64.0, 104.0));
    pathclose(store, Some(path)).unwrap()
}

fn convolve_fishy(c: &mut Criterion) {
    c.bench_function("convolve_fishy", |b| {
        b.iter(|| {
            let mut store = KnotStore::new();
            let pen = brush_make_square(&mut store);
            let path = make_fishy(&mut store);
            draw_shape(&mut store, Some(path), pen, Color::new(255, 208, 208, 255)).unwrap()
        })
    });
}

fn rasterize_fishy(c: &mut Criterion) {
    let mut store = KnotStore::new();
    let pen = brush_make_square(&mut store);
    let path = make_fishy(&mut store);
    let stroke =
        draw_shape(&mut store, Some(path), pen, Color::new(255, 208, 208, 255)).unwrap();

    c.bench_function("rasterize_fishy", |b| {
        b.iter(|| rasterize(&stroke, 1.0))
    });
}

criterion_group!(benches, convolve_fishy, rasterize_fishy);
criterion_main!(benches);
