//! Sphere generation and uniform-write benchmarks.

#![allow(missing_docs, clippy::expect_used, clippy::panic)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat3, Mat4, Vec3};
use phong_sphere::{
    gpu::{
        shader_composer::{ShaderComposer, PHONG_SHADER, PHONG_SHADER_PATH},
        uniform::{UniformBlock, UniformLayout},
    },
    SphereMesh,
};

fn generate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere_generate");

    for (w, h) in [(32, 16), (64, 32), (256, 128)] {
        group.bench_function(format!("{w}x{h}"), |b| {
            b.iter(|| SphereMesh::generate(black_box(w), black_box(h)));
        });
    }
    group.finish();
}

fn uniform_update_benchmark(c: &mut Criterion) {
    let mut composer =
        ShaderComposer::new().expect("shared shader modules register");
    let module = composer
        .compose_naga(PHONG_SHADER, PHONG_SHADER_PATH)
        .unwrap_or_else(|e| panic!("{e}"));
    let layout = UniformLayout::reflect(&module, 0, 0)
        .unwrap_or_else(|e| panic!("{e}"));
    let mut block = UniformBlock::new(layout);
    let model = Mat4::from_scale(Vec3::splat(2.0));

    c.bench_function("uniform_block_set_matrices", |b| {
        b.iter(|| {
            let _ = block.set("model", black_box(model));
            let _ = block.set("normal_matrix", black_box(Mat3::IDENTITY));
            let _ = block.set("light_pos", black_box(Vec3::ONE));
            block.take_dirty()
        });
    });
}

criterion_group!(benches, generate_benchmark, uniform_update_benchmark);
criterion_main!(benches);
