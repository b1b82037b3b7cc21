use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ticker_core::types::Candle;
use ticker_store::Storage;

fn candles(n: i64) -> Vec<Candle> {
    (0..n)
        .map(|d| {
            let close = 100.0 + (d as f64 * 0.3).sin() * 10.0;
            Candle::at_unix(d * 86_400, close, close + 1.0, close - 1.0, close, 1_000.0)
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    group.bench_function("next_bar_full_window", |b| {
        let storage = Storage::default();
        storage.add_ticker("BENCH", 0.0).unwrap();
        storage.insert_candles("BENCH", &candles(250)).unwrap();
        let mut day = 250;
        b.iter(|| {
            let close = 100.0 + (day as f64 * 0.3).sin() * 10.0;
            let bar = Candle::at_unix(day * 86_400, close, close + 1.0, close - 1.0, close, 1_000.0);
            day += 1;
            black_box(storage.insert_candles("BENCH", &[bar]).unwrap())
        });
    });

    for size in [250, 730] {
        let history = candles(size);
        group.bench_with_input(BenchmarkId::new("backfill", size), &history, |b, history| {
            b.iter(|| {
                let storage = Storage::default();
                storage.add_ticker("BENCH", 0.0).unwrap();
                black_box(storage.insert_candles("BENCH", history).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert);
criterion_main!(benches);
