//! Criterion benchmarks for full market cycles.
//!
//! Populations are built deterministically so runs are comparable across
//! machines; only the cycle itself is measured.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_admissions::market::{
    ApplicationStrategy, Market, MarketConfig, Student, StudentId, University, UniversityId,
};

fn population(n_students: usize, n_universities: usize) -> (Vec<Student>, Vec<University>) {
    let students = (0..n_students)
        .map(|i| {
            let score = 600.0 + (i * 7919 % 1000) as f64;
            let efc = (i * 104_729 % 100) as f64;
            let weight = (i % 101) as f64 / 100.0;
            Student::new(StudentId(i), score, efc, weight, 0.1).expect("valid student")
        })
        .collect();
    let universities = (0..n_universities)
        .map(|i| {
            let t = i as f64 / n_universities.max(1) as f64;
            University::new(UniversityId(i), 0.5 + 0.5 * t, 10.0 + 70.0 * t, 50 + (i * 31 % 250))
                .expect("valid university")
        })
        .collect();
    (students, universities)
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_cycle");
    group.sample_size(10);

    for (n_students, n_universities) in [(1_000usize, 16usize), (4_000, 25), (10_000, 49)] {
        for parallel in [false, true] {
            let id = format!(
                "s{}_u{}_{}",
                n_students,
                n_universities,
                if parallel { "par" } else { "seq" }
            );
            group.bench_with_input(
                BenchmarkId::new(id, n_students),
                &(n_students, n_universities),
                |b, &(ns, nu)| {
                    b.iter(|| {
                        let (students, universities) = population(ns, nu);
                        let config = MarketConfig::default().with_seed(42).with_parallel(parallel);
                        let mut market =
                            Market::new(students, universities, config).expect("valid market");
                        black_box(market.run_cycle())
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_apply_everywhere(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_all");
    group.sample_size(10);

    for &n_universities in &[10usize, 40, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_universities),
            &n_universities,
            |b, &nu| {
                b.iter(|| {
                    let (students, universities) = population(2_000, nu);
                    let config = MarketConfig::baseline()
                        .with_applications(ApplicationStrategy::All)
                        .with_seed(42);
                    let mut market =
                        Market::new(students, universities, config).expect("valid market");
                    black_box(market.run_cycle())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cycle, bench_apply_everywhere);
criterion_main!(benches);
