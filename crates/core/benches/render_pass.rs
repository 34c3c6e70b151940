use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isomap::{
    DrawList, Editor, EditorConfig, MapDimensions, MapGenerator, RenderConfig,
};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render-pass");

    let editor = Editor::new(
        EditorConfig {
            dimensions: MapDimensions {
                width: 50,
                height: 50,
                tile_size: 32,
            },
            generator: MapGenerator::Terrain { seed: 1 },
            ..Default::default()
        },
        RenderConfig::default(),
    )
    .unwrap();
    let mut surface = DrawList::default();
    group.bench_function("render 50x50", |b| {
        b.iter(|| {
            surface.clear();
            editor.render(black_box(&mut surface));
        })
    });

    group.bench_function("draw order 50x50", |b| {
        b.iter(|| {
            black_box(editor.renderer().draw_order(editor.state().tiles()));
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
