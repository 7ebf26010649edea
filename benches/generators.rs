use bitmazes::{
    generators,
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn fresh_grid() -> Grid {
    Grid::new(RowsCount(32), ColumnsCount(32)).unwrap()
}

fn bench_binary_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("binary_maze_32", move |b| {
        b.iter(|| {
            let mut g = fresh_grid();
            generators::binary_tree(&mut g, &mut rng);
            g
        })
    });
}

fn bench_aldous_broder_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("aldous_broder_maze_32", move |b| {
        b.iter(|| {
            let mut g = fresh_grid();
            generators::aldous_broder(&mut g, &mut rng);
            g
        })
    });
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            let mut g = fresh_grid();
            generators::recursive_backtracker(&mut g, &mut rng);
            g
        })
    });
}

criterion_group!(
    benches,
    bench_binary_maze_32,
    bench_aldous_broder_maze_32,
    bench_recursive_backtracker_maze_32
);
criterion_main!(benches);
