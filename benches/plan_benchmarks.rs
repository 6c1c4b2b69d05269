//! Performance benchmarks for the planning engine.
//!
//! This benchmark suite verifies that the pipeline meets performance targets:
//! - Single plan derivation: < 1ms mean
//! - Plan with overrides and funding check: < 1ms mean
//! - Batch of 100 plans: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use plan_engine::api::{AppState, create_router};
use plan_engine::config::ConfigLoader;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/schoolplan").expect("Failed to load config");
    AppState::new(config)
}

/// A request that exercises every pipeline stage.
fn full_request_body() -> String {
    let request_json = serde_json::json!({
        "new_first_year_students": [10, 12, 14, 16, 18],
        "areas_m2": [200, 200, 500, 500, 500],
        "annual_fee": "10000",
        "staffing_overrides": [
            {"hired": 3},
            {}, {}, {}, {}
        ],
        "balance_overrides": [
            {"values": {"CAPITALE_SOCIALE": "200000", "IMM_ARREDI": "30000"}},
            {"values": {"CAPITALE_SOCIALE": "200000"}}
        ],
        "funding": {
            "uses": {"works_and_fit_out": 120000, "furniture": 30000},
            "sources": {"share_capital": 150000}
        }
    });
    serde_json::to_string(&request_json).expect("Failed to create request")
}

/// Benchmark: Plan derivation from an empty request (all defaults).
///
/// Target: < 1ms mean
fn bench_default_plan(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);

    c.bench_function("default_plan", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/plan")
                        .header("Content-Type", "application/json")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Plan with overrides, balance edits and the funding check.
///
/// Target: < 1ms mean
fn bench_full_plan(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let body = full_request_body();

    c.bench_function("full_plan", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/plan")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 plans with varying intakes.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let base = 5 + (i % 20) as u32;
            let request_json = serde_json::json!({
                "new_first_year_students": [base, base + 2, base + 4, base + 6, base + 8],
            });
            serde_json::to_string(&request_json).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/plan")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Scaling with the size of the intake numbers.
fn bench_intake_sizes(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let mut group = c.benchmark_group("intake_size");
    for intake in [10u32, 100, 1000] {
        let intakes = vec![intake; 5];
        let body = serde_json::to_string(&serde_json::json!({
            "new_first_year_students": intakes,
        }))
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(intake), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/plan")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_default_plan,
    bench_full_plan,
    bench_batch_100,
    bench_intake_sizes
);
criterion_main!(benches);
