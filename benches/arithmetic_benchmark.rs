// ============================================================================
// Numeric Tower Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Schoolbook Multiplication - O(n*m) digit products at several sizes
// 2. Long Division - Knuth Algorithm D with multi-digit divisors
// 3. Factorial - repeated growing products
// 4. Computable Reals - sqrt evaluation at increasing precision
// ============================================================================

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use numeric_tower::prelude::*;

fn benchmark_schoolbook_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("schoolbook_multiply");

    for num_digits in [8usize, 64, 512].iter() {
        let a: Natural = "9".repeat(*num_digits).parse().unwrap();
        let b: Natural = "7".repeat(*num_digits).parse().unwrap();

        group.bench_with_input(
            BenchmarkId::new("decimal_digits", num_digits),
            &(&a, &b),
            |bench, (a, b)| {
                bench.iter(|| black_box(a.prod(b)));
            },
        );
    }

    group.finish();
}

fn benchmark_knuth_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("knuth_division");

    for num_digits in [64usize, 512].iter() {
        let dividend: Natural = "8".repeat(*num_digits).parse().unwrap();
        let divisor: Natural = "3".repeat(num_digits / 2).parse().unwrap();

        group.bench_with_input(
            BenchmarkId::new("decimal_digits", num_digits),
            &(&dividend, &divisor),
            |bench, (dividend, divisor)| {
                bench.iter(|| black_box(dividend.div_rem(divisor).unwrap()));
            },
        );
    }

    group.finish();
}

fn benchmark_factorial(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorial");

    for n in [20u64, 100, 500].iter() {
        let value = Natural::from_u64(*n);
        group.bench_with_input(BenchmarkId::new("n", n), &value, |bench, value| {
            bench.iter(|| black_box(value.factorial()));
        });
    }

    group.finish();
}

fn benchmark_sqrt_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt_evaluation");

    for digits in [10usize, 50].iter() {
        group.bench_with_input(BenchmarkId::new("fixed_digits", digits), digits, |bench, digits| {
            bench.iter(|| {
                // Fresh generator per iteration so the memo slot cannot
                // short-circuit the work being measured
                let root = Real::sqrt(&"2".parse().unwrap()).unwrap();
                black_box(root.to_fixed(*digits).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_schoolbook_multiply,
    benchmark_knuth_division,
    benchmark_factorial,
    benchmark_sqrt_evaluation
);
criterion_main!(benches);
