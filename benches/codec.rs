use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use toon_codec::{decode, encode, from_str, to_string, to_value, validate, Value};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(n: usize) -> Vec<Product> {
    (0..n)
        .map(|i| Product {
            sku: format!("SKU-{:05}", i),
            name: format!("Product {}", i),
            price: 9.99 + i as f64,
            quantity: (i % 100) as u32,
        })
        .collect()
}

fn bench_encode_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn bench_decode_simple(c: &mut Criterion) {
    let text = "id: 123\nname: Alice\nemail: alice@example.com\nactive: true";

    c.bench_function("decode_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn bench_tabular(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabular");

    for size in [10, 100, 500] {
        let value: Value = to_value(&products(size)).unwrap();
        let text = encode(&value).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", size), &value, |b, value| {
            b.iter(|| encode(black_box(value)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &text, |b, text| {
            b.iter(|| decode(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("validate", size), &text, |b, text| {
            b.iter(|| validate(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_simple,
    bench_decode_simple,
    bench_tabular
);
criterion_main!(benches);
