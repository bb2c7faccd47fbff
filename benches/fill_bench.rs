use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use scanfill::*;
use std::hint::black_box;

const STAR: &str = "M128,12 L56,244 244,96 12,96 200,244 Z";
const SIZE: Size = Size {
    width: 256,
    height: 256,
};

fn circles() -> Path {
    let mut path = Path::new();
    for index in 0..16 {
        let offset = 16.0 + index as Scalar * 14.0;
        path.add_circle(Point::new(offset, offset), 12.0, Direction::Clockwise);
    }
    path
}

fn fill_benchmark(c: &mut Criterion) {
    let mut image = Bitmap::new_default(SIZE);
    let identity = Transform::identity();
    let rotate = Transform::new_translate(128.0, 128.0)
        .rotate(0.3)
        .translate(-128.0, -128.0);
    let rect = Rect::from_xywh(16.0, 16.0, 224.0, 224.0);
    let star: Path = STAR.parse().expect("failed to parse path");
    let circles = circles();
    let mut paint = Paint::new(Color::new(0.2, 0.4, 0.8, 0.7));

    let mut group = c.benchmark_group("fill");
    group.throughput(Throughput::Elements((SIZE.width * SIZE.height) as u64));
    group
        .bench_function("rect", |b| {
            b.iter(|| canvas::fill_rect(&mut image, &identity, black_box(rect), &mut paint))
        })
        .bench_function("rect rotated", |b| {
            b.iter(|| canvas::fill_rect(&mut image, &rotate, black_box(rect), &mut paint))
        })
        .bench_function("star", |b| {
            b.iter(|| canvas::fill_path(&mut image, &identity, black_box(&star), &mut paint))
        })
        .bench_function("circles", |b| {
            b.iter(|| canvas::fill_path(&mut image, &identity, black_box(&circles), &mut paint))
        });

    let colors = [
        Color::new(1.0, 0.0, 0.0, 1.0),
        Color::new(0.0, 1.0, 0.0, 1.0),
        Color::new(0.0, 0.0, 1.0, 1.0),
    ];
    for tile in [TileMode::Clamp, TileMode::Repeat, TileMode::Mirror] {
        let grad = LinearGradient::new((0.0, 0.0), (64.0, 32.0), &colors[..], tile);
        let mut paint = Paint::default().with_shader(grad);
        group.bench_with_input(BenchmarkId::new("linear gradient", format!("{:?}", tile)), &tile, |b, _| {
            b.iter(|| canvas::fill_paint(&mut image, &identity, &mut paint))
        });
    }

    let corners = rect.corners();
    let quad_colors = [colors[0], colors[1], colors[2], colors[0]];
    group.bench_function("quad colors", |b| {
        b.iter(|| {
            canvas::fill_quad(
                &mut image,
                &identity,
                corners,
                Some(quad_colors),
                None,
                black_box(4),
                &mut Paint::default(),
            )
        })
    });
    group.finish();
}

fn flatten_benchmark(c: &mut Criterion) {
    let cubic = Cubic::new((158.0, 70.0), (210.0, 250.0), (25.0, 190.0), (219.0, 89.0));
    let quad = Quad::new((10.0, 10.0), (128.0, 250.0), (250.0, 10.0));
    let bounds = Rect::from_size(256, 256);

    let mut group = c.benchmark_group("flatten");
    group
        .throughput(Throughput::Elements(1))
        .bench_function("cubic", |b| {
            b.iter(|| black_box(cubic).flatten().fold(0.0, |acc, line| acc + line.end().x()))
        })
        .bench_function("quad", |b| {
            b.iter(|| black_box(quad).flatten().fold(0.0, |acc, line| acc + line.end().x()))
        })
        .bench_function("clip cubic", |b| {
            b.iter(|| {
                let mut edges = Vec::new();
                edge::clip_curve(black_box(cubic), &bounds, &mut edges);
                edges
            })
        });
    group.finish();
}

criterion_group!(benches, fill_benchmark, flatten_benchmark);
criterion_main!(benches);
