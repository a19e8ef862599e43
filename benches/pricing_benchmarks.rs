//! Performance benchmarks for the Invoice Pricing Engine.
//!
//! This benchmark suite covers the engine directly and through the HTTP
//! adapter:
//! - Single-item invoice priced in-process
//! - Invoices of 1 to 100 items, to show scaling with item count
//! - A `/quote` round trip through the router
//! - A batch of 100 quotes
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use invoice_engine::PricingEngine;
use invoice_engine::api::{AppState, create_router};
use invoice_engine::config::ConfigLoader;
use invoice_engine::models::{Invoice, LineItem};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const CATEGORIES: [&str; 4] = ["book", "food", "electronics", "other"];

fn create_engine() -> PricingEngine {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    PricingEngine::new(config.into_rates())
}

/// Creates an invoice with `item_count` items cycling through categories.
fn create_invoice(item_count: usize) -> Invoice {
    let items = (0..item_count)
        .map(|i| LineItem {
            sku: format!("SKU-{:03}", i),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            unit_price: Decimal::new(1999 + i as i64 * 100, 2),
            qty: (i % 5) as i64 + 1,
            fragile: i % 3 == 0,
        })
        .collect();

    Invoice {
        invoice_id: format!("INV-{}", item_count),
        customer_id: "C-BENCH".to_string(),
        country: "US".to_string(),
        membership: "gold".to_string(),
        coupon: Some("WELCOME10".to_string()),
        items,
    }
}

fn quote_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/quote")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: Single-item invoice, engine only.
fn bench_single_item(c: &mut Criterion) {
    let engine = create_engine();
    let invoice = create_invoice(1);

    c.bench_function("single_item", |b| {
        b.iter(|| black_box(engine.compute_total(black_box(&invoice))))
    });
}

/// Benchmark: Item counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let engine = create_engine();
    let mut group = c.benchmark_group("scaling");

    for item_count in [1, 14, 100].iter() {
        let invoice = create_invoice(*item_count);

        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(BenchmarkId::new("items", item_count), item_count, |b, _| {
            b.iter(|| black_box(engine.price(Some(black_box(&invoice)))))
        });
    }

    group.finish();
}

/// Benchmark: One `/quote` request through the router.
fn bench_http_quote(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(create_engine()));
    let body = serde_json::to_string(&create_invoice(14)).unwrap();

    c.bench_function("http_quote_14_items", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router.oneshot(quote_request(body.clone())).await.unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 quotes with varied memberships and coupons.
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(create_engine());

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let mut invoice = create_invoice(i % 10 + 1);
            invoice.invoice_id = format!("INV-BATCH-{:03}", i);
            invoice.membership = ["none", "gold", "platinum"][i % 3].to_string();
            invoice.coupon = if i % 4 == 0 { None } else { Some("VIP20".to_string()) };
            serde_json::to_string(&invoice).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router.oneshot(quote_request(body.clone())).await.unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_item,
    bench_scaling,
    bench_http_quote,
    bench_batch_100,
);
criterion_main!(benches);
