use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use firlab::{compare_designs, firwin, firwin2, freqz, remez, CompareConfig, Window};

fn bench_firwin(c: &mut Criterion) {
    c.bench_function("firwin 101 taps (Kaiser β=5)", |b| {
        b.iter(|| firwin(black_box(101), black_box(0.3), Window::Kaiser { beta: 5.0 }).unwrap())
    });
}

fn bench_remez(c: &mut Criterion) {
    let mut group = c.benchmark_group("remez");
    for &n in &[17usize, 47, 75] {
        group.bench_function(format!("{n} taps"), |b| {
            b.iter(|| remez(black_box(n), &[0.0, 0.4, 0.6, 1.0], &[1.0, 0.0]).unwrap())
        });
    }
    group.finish();
}

fn bench_firwin2(c: &mut Criterion) {
    c.bench_function("firwin2 47 taps", |b| {
        b.iter(|| {
            firwin2(black_box(47), &[0.0, 1000.0, 1500.0, 2500.0], &[1.0, 1.0, 0.0, 0.0],
                5000.0, Window::Hamming).unwrap()
        })
    });
}

fn bench_freqz(c: &mut Criterion) {
    let h = firwin(47, 0.5, Window::Hann).unwrap();
    c.bench_function("freqz 47 taps × 2048 points", |b| {
        b.iter(|| freqz(black_box(&h), 5000.0, 2048).unwrap())
    });
}

fn bench_compare(c: &mut Criterion) {
    let cfg = CompareConfig::default();
    let spec = cfg.filter_spec().unwrap();
    c.bench_function("compare_designs (reference spec)", |b| {
        b.iter(|| compare_designs(black_box(&spec), &cfg).unwrap())
    });
}

criterion_group!(benches, bench_firwin, bench_remez, bench_firwin2, bench_freqz, bench_compare);
criterion_main!(benches);
