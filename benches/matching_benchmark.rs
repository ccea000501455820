//! Benchmarks for the scoring loop.

use certchain::matching::{CertificateMatcher, FieldMatcher, normalize, similarity};
use certchain::model::{ExtractedFields, NewCertificate, RegisteredCertificate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const INSTITUTIONS: [&str; 4] = [
    "Anna University",
    "Indian Institute of Technology Madras",
    "PSG College of Technology",
    "Massachusetts Institute of Technology",
];

fn registry(size: usize) -> Vec<RegisteredCertificate> {
    (0..size)
        .map(|i| {
            RegisteredCertificate::from_new(
                format!("rec_{i:06}"),
                NewCertificate::new(
                    format!("CERT-{:04}-{i:05}", 2000 + i % 25),
                    format!("Student Number {i}"),
                    INSTITUTIONS[i % INSTITUTIONS.len()],
                    "Computer Science and Engineering",
                ),
            )
        })
        .collect()
}

fn bench_find_best_match(c: &mut Criterion) {
    let matcher = FieldMatcher::new();
    let extracted = ExtractedFields::default()
        .with_holder_name("Student Numbr 4242")
        .with_institution("Anna Univ")
        .with_certificate_id("CERT-2017-04242")
        .with_department("Computer Science");

    let mut group = c.benchmark_group("find_best_match");
    for size in [100, 1_000, 10_000] {
        let records = registry(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| matcher.find_best_match(black_box(&extracted), black_box(records)));
        });
    }
    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let a = normalize("Indian Institute of Technology Madras");
    let b = normalize("Indian Institute of Tech, Madras");
    c.bench_function("similarity", |bench| {
        bench.iter(|| similarity(black_box(&a), black_box(&b)));
    });
}

criterion_group!(benches, bench_find_best_match, bench_similarity);
criterion_main!(benches);
