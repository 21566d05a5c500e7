use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hex_power::core::Grid;
use hex_power::engine::HexPuzzle;
use hex_power::types::{Position, DEFAULT_DEFINITION};

/// 16x16 board with a reach-2 emitter of every shape
const BUSY_DEFINITION: &str = "hex 16x16 \
    2,2,cn,tt,pw,0 2,7,tn2,tt,pw,0 2,12,ri2,tl,pw,0 \
    7,3,rn2,tr,pw,0 7,8,dn2,bb,pw,0 7,13,ti2,bb,pw,0 \
    12,4,di2,tt,pw,0 12,9,ci,tt,pw,0 8,8,tg,tt,up,3 10,10,tg,tt,up,1";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_busy_definition", |b| {
        b.iter(|| Grid::from_definition(black_box(BUSY_DEFINITION)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut grid = Grid::from_definition(BUSY_DEFINITION).unwrap();
    let pos = Position::new(2, 7);

    c.bench_function("rotate_triangle2", |b| {
        b.iter(|| grid.rotate(black_box(pos)))
    });
}

fn bench_switch(c: &mut Criterion) {
    let mut grid = Grid::from_definition(BUSY_DEFINITION).unwrap();
    let pos = Position::new(2, 2);

    c.bench_function("switch_circle", |b| {
        b.iter(|| grid.switch(black_box(pos)))
    });
}

fn bench_power_range(c: &mut Criterion) {
    let grid = Grid::from_definition(BUSY_DEFINITION).unwrap();
    let pos = Position::new(7, 3);

    c.bench_function("power_range_rectangle2", |b| {
        b.iter(|| grid.cells_in_power_range(black_box(pos)))
    });
}

fn bench_completion(c: &mut Criterion) {
    let mut puzzle = HexPuzzle::load(DEFAULT_DEFINITION).unwrap();

    c.bench_function("check_completion_default", |b| {
        b.iter(|| puzzle.check_completion())
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_rotate,
    bench_switch,
    bench_power_range,
    bench_completion
);
criterion_main!(benches);
