//! Benchmarks for lcukit synthesis routines
//!
//! Run with: cargo bench -p lcukit-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lcukit_synth::{
    PauliString, PauliTable, decompose, exp_evolution, gen_angles, lcu_circuit, select_circuit,
    state_preparation,
};
use ndarray::Array2;
use num_complex::Complex64;

/// Dense table over every string of width `n`, truncated to a power of two.
fn table(n: usize, len: usize) -> PauliTable {
    let mut t = PauliTable::new();
    for (i, p) in PauliString::all(n).take(len).enumerate() {
        let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
        t.insert(p, Complex64::new(sign / (i + 1) as f64, 0.0))
            .unwrap();
    }
    t
}

fn bench_state_preparation(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_preparation");

    for n in &[4usize, 8, 12] {
        let prob: Vec<f64> = (0..1usize << n).map(|i| (i % 7 + 1) as f64).collect();
        group.bench_with_input(BenchmarkId::new("gen_angles", n), &prob, |b, p| {
            let amps: Vec<f64> = p.iter().map(|x| x.sqrt()).collect();
            b.iter(|| gen_angles(black_box(&amps)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("circuit", n), &prob, |b, p| {
            b.iter(|| state_preparation(black_box(p), false).unwrap());
        });
    }

    group.finish();
}

fn bench_select_and_lcu(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for &(n, len) in &[(2usize, 16usize), (3, 64), (4, 256)] {
        let t = table(n, len);
        group.bench_with_input(BenchmarkId::new("select", len), &t, |b, t| {
            b.iter(|| select_circuit(black_box(t)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("lcu", len), &t, |b, t| {
            b.iter(|| lcu_circuit(black_box(t)).unwrap());
        });
    }

    group.finish();
}

fn bench_trotter(c: &mut Criterion) {
    let mut group = c.benchmark_group("trotter");

    for n in &[2usize, 4, 6] {
        let t = table(*n, 32).without_identity();
        group.bench_with_input(BenchmarkId::new("first_order_10_steps", n), &t, |b, t| {
            b.iter(|| exp_evolution(black_box(t), 1.0, 10).unwrap());
        });
    }

    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for n in &[1usize, 2, 3, 4] {
        let dim = 1 << n;
        let m = Array2::from_shape_fn((dim, dim), |(r, col)| {
            Complex64::new((r + col) as f64, r as f64 - col as f64)
        });
        group.bench_with_input(BenchmarkId::new("trace", n), &m, |b, m| {
            b.iter(|| decompose(black_box(m)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_state_preparation,
    bench_select_and_lcu,
    bench_trotter,
    bench_decompose
);
criterion_main!(benches);
