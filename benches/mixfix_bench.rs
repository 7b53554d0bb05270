use criterion::{criterion_group, criterion_main, Criterion};
use mixfix::grammar::arithmetic;
use mixfix::mixfix::parse_exp;
use mixfix::raw::parse_raw;
use std::hint::black_box;

fn idents() -> Vec<String> {
    ["x", "y", "z", "f"].iter().map(|s| s.to_string()).collect()
}

fn bench_shallow(c: &mut Criterion) {
    let top = arithmetic(idents());
    c.bench_function("parse x + y * z", |b| {
        b.iter(|| {
            let raw = parse_raw(black_box("x + y * z")).unwrap();
            parse_exp(&top, raw).unwrap()
        })
    });
}

fn bench_deep_chain(c: &mut Criterion) {
    let top = arithmetic(idents());
    let source: String = std::iter::repeat("x + ").take(64).chain(std::iter::once("x")).collect();
    c.bench_function("parse a 64-term + chain", |b| {
        b.iter(|| {
            let raw = parse_raw(black_box(&source)).unwrap();
            parse_exp(&top, raw).unwrap()
        })
    });
}

fn bench_nested_conditionals(c: &mut Criterion) {
    let top = arithmetic(idents());
    let source = "if x then if y then z else x else y";
    c.bench_function("parse nested if-then-else", |b| {
        b.iter(|| {
            let raw = parse_raw(black_box(source)).unwrap();
            parse_exp(&top, raw).unwrap()
        })
    });
}

criterion_group!(benches, bench_shallow, bench_deep_chain, bench_nested_conditionals);
criterion_main!(benches);
