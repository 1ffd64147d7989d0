//! Benchmark for curry chains.
//!
//! Measures chain construction, step-by-step application and branching.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use curry_memo::curry;
use curry_memo::curry::Application;
use std::hint::black_box;

fn sum(arguments: Vec<u64>) -> u64 {
    arguments.iter().sum()
}

// =============================================================================
// Application Benchmarks
// =============================================================================

fn benchmark_single_call(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("curry_single_call");

    for arity in [2usize, 8, 32] {
        let chain = curry(arity, sum);
        let arguments: Vec<u64> = (0..arity as u64).collect();
        group.bench_with_input(BenchmarkId::new("arity", arity), &arguments, |bencher, arguments| {
            bencher.iter(|| black_box(chain.apply(arguments.iter().copied()).into_complete()));
        });
    }

    group.finish();
}

fn benchmark_one_argument_per_step(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("curry_one_per_step");

    for arity in [2usize, 8, 32] {
        let chain = curry(arity, sum);
        group.bench_with_input(BenchmarkId::new("arity", arity), &arity, |bencher, &arity| {
            bencher.iter(|| {
                let mut link = chain.clone();
                for value in 0..arity as u64 {
                    match link.apply_one(value) {
                        Application::Partial(next) => link = next,
                        Application::Complete(result) => return black_box(result),
                    }
                }
                unreachable!("chain completes on the last argument")
            });
        });
    }

    group.finish();
}

fn benchmark_branching(criterion: &mut Criterion) {
    let chain = curry(4, sum);
    let Some(prefix) = chain.apply([1, 2, 3]).into_partial() else {
        unreachable!("three of four arguments leave the chain partial")
    };

    criterion.bench_function("curry_branch_from_shared_link", |bencher| {
        bencher.iter(|| {
            for value in 0..16 {
                black_box(prefix.apply_one(value).into_complete());
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_call,
    benchmark_one_argument_per_step,
    benchmark_branching
);

criterion_main!(benches);
