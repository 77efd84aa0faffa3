// ============================================================================
// LMSR and Order Book Benchmarks
// ============================================================================

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prediction_matching_engine::domain::{MarketId, OrderBookState, OrderInput, OrderType, Side, UserRef};
use prediction_matching_engine::lmsr;
use prediction_matching_engine::numeric::Decimal;
use std::str::FromStr;

fn benchmark_lmsr_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("lmsr_cost");

    for n in [2usize, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            let q: Vec<Decimal> = (0..n).map(|i| Decimal::from(i as i64)).collect();
            let liquidity = Decimal::from(100u32);

            b.iter(|| black_box(lmsr::cost(&q, liquidity)));
        });
    }

    group.finish();
}

fn benchmark_lmsr_price(c: &mut Criterion) {
    c.bench_function("lmsr_price_all_outcomes", |b| {
        let q: Vec<Decimal> = (0..10).map(|i| Decimal::from(i as i64)).collect();
        let liquidity = Decimal::from(100u32);

        b.iter(|| {
            for i in 0..q.len() {
                black_box(lmsr::price(&q, liquidity, i).unwrap());
            }
        });
    });
}

fn limit(market_id: MarketId, side: Side, price: &str, qty: &str) -> OrderInput {
    OrderInput {
        market_id,
        outcome_index: 0,
        side,
        order_type: OrderType::Limit,
        price: Some(Decimal::from_str(price).unwrap()),
        quantity: Decimal::from_str(qty).unwrap(),
        submitter: UserRef::User("benchmark".to_string()),
    }
}

fn benchmark_order_book_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_book_crossing");

    for depth in [10usize, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            b.iter_batched(
                || {
                    let market_id = MarketId::new();
                    let mut book = OrderBookState::new(market_id, 0);
                    for i in 0..depth {
                        book.process_order(
                            limit(market_id, Side::Ask, &format!("{}", 60 + i), "1"),
                            25,
                        )
                        .unwrap();
                    }
                    (market_id, book)
                },
                |(market_id, mut book)| {
                    black_box(
                        book.process_order(limit(market_id, Side::Bid, "60", "1"), 25)
                            .unwrap(),
                    )
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_order_book_snapshot(c: &mut Criterion) {
    c.bench_function("order_book_snapshot", |b| {
        let market_id = MarketId::new();
        let mut book = OrderBookState::new(market_id, 0);

        for i in 0..100 {
            book.process_order(limit(market_id, Side::Bid, &format!("{}", 49 - i), "1"), 25)
                .unwrap();
            book.process_order(limit(market_id, Side::Ask, &format!("{}", 51 + i), "1"), 25)
                .unwrap();
        }

        b.iter(|| black_box(book.snapshot(25)));
    });
}

criterion_group!(
    benches,
    benchmark_lmsr_cost,
    benchmark_lmsr_price,
    benchmark_order_book_crossing,
    benchmark_order_book_snapshot
);
criterion_main!(benches);
