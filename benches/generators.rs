use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mazes::{
    cells::GridCoordinate,
    generators,
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_recursive_backtracker(c: &mut Criterion, rows: usize, columns: usize) {
    let mut rng = XorShiftRng::seed_from_u64(0x5eed);
    let name = format!("recursive_backtracker_{}x{}", rows, columns);
    c.bench_function(&name, move |b| {
        b.iter_batched(|| Grid::new(RowsCount(rows), ColumnsCount(columns)).unwrap(),
                       |mut g| {
                           generators::recursive_backtracker(&mut g, GridCoordinate::new(0, 0), &mut rng)
                               .unwrap();
                           g
                       },
                       BatchSize::SmallInput)
    });
}

fn bench_recursive_backtracker_10x20(c: &mut Criterion) {
    bench_recursive_backtracker(c, 10, 20);
}

fn bench_recursive_backtracker_128(c: &mut Criterion) {
    bench_recursive_backtracker(c, 128, 128);
}

criterion_group!(benches,
                 bench_recursive_backtracker_10x20,
                 bench_recursive_backtracker_128);
criterion_main!(benches);
