use std::hint::black_box;

use codable_core::{JsonDecoder, JsonEncoder, KeyNamingStrategy, NumberDecodingStrategy, Value};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Order {
    order_id: u64,
    customer_name: String,
    total_amount: f64,
    is_paid: bool,
    line_items: Vec<LineItem>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineItem {
    product_code: String,
    unit_count: u32,
}

fn orders(count: usize) -> Vec<Order> {
    (0..count)
        .map(|i| Order {
            order_id: i as u64,
            customer_name: format!("customer {i}"),
            total_amount: i as f64 * 1.25,
            is_paid: i % 2 == 0,
            line_items: (0..4)
                .map(|j| LineItem {
                    product_code: format!("SKU-{i}-{j}"),
                    unit_count: j,
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for count in [10usize, 100, 1000] {
        let bytes = JsonEncoder::new().encode(&orders(count)).unwrap();
        let tree: Value = codable_core::bridge::parse(&bytes).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("default_keys", count), &tree, |b, tree| {
            let decoder = JsonDecoder::new();
            b.iter(|| decoder.decode_value::<Vec<Order>>(black_box(tree)).unwrap())
        });

        let snake = JsonEncoder::new()
            .with_key_naming(KeyNamingStrategy::SnakeCase)
            .encode_value(&orders(count))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("snake_case", count), &snake, |b, tree| {
            let decoder = JsonDecoder::new()
                .with_key_naming(KeyNamingStrategy::SnakeCase)
                .with_number_strategies([NumberDecodingStrategy::ConvertFromString]);
            b.iter(|| decoder.decode_value::<Vec<Order>>(black_box(tree)).unwrap())
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for count in [10usize, 100, 1000] {
        let data = orders(count);
        group.bench_with_input(BenchmarkId::new("default_keys", count), &data, |b, data| {
            let encoder = JsonEncoder::new();
            b.iter(|| encoder.encode(black_box(data)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("snake_case", count), &data, |b, data| {
            let encoder = JsonEncoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
            b.iter(|| encoder.encode(black_box(data)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
