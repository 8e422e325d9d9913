//! Benchmarks for shallow, deep and registered mappings
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shapeshift_core::{shape, Converter, Engine, MapperBuilder, Repository};

#[derive(Debug, Clone, Default)]
pub struct Line {
    pub sku: String,
    pub quantity: i32,
    pub price: f64,
}

shape! {
    Line {
        sku: String,
        quantity: i32,
        price: f64,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineDto {
    pub sku: String,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

shape! {
    LineDto {
        sku: String,
        quantity: Option<i32>,
        price: Option<f64>,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub line: Line,
}

shape! {
    Order {
        id: u64,
        customer: String,
        line: Line,
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderDto {
    pub id: u64,
    pub client: String,
    pub line: Option<LineDto>,
}

shape! {
    OrderDto {
        id: u64,
        client: String,
        line: Option<LineDto>,
    }
}

fn order(id: u64) -> Order {
    Order {
        id,
        customer: format!("customer-{}", id),
        line: Line {
            sku: "SKU-1".to_string(),
            quantity: 3,
            price: 9.99,
        },
    }
}

fn order_repository() -> Repository {
    let repository = Repository::new();
    repository
        .store(
            MapperBuilder::<Order, OrderDto>::new()
                .unwrap()
                .customize_name("customer", "client")
                .unwrap()
                .build(),
        )
        .unwrap();
    repository
}

fn bench_flat_mapping(c: &mut Criterion) {
    let repository = Repository::new();
    let engine = Engine::<Line, LineDto>::new(&repository);
    let line = order(1).line;

    c.bench_function("map_flat_widening", |b| {
        b.iter(|| engine.map(black_box(line.clone())).unwrap())
    });
}

fn bench_nested_mapping(c: &mut Criterion) {
    let repository = order_repository();
    let engine = Engine::<Order, OrderDto>::new(&repository);

    let mut group = c.benchmark_group("map_nested");
    for deep in [false, true] {
        group.bench_with_input(BenchmarkId::new("deep", deep), &deep, |b, &deep| {
            b.iter(|| engine.map_with(black_box(order(7)), None, deep).unwrap())
        });
    }
    group.finish();
}

fn bench_registered_converter(c: &mut Criterion) {
    let repository = order_repository();
    repository
        .store(Converter::new(|line: Line| LineDto {
            sku: line.sku,
            quantity: Some(line.quantity),
            price: Some(line.price),
        }))
        .unwrap();
    let engine = Engine::<Order, OrderDto>::new(&repository);

    c.bench_function("map_nested_converter", |b| {
        b.iter(|| engine.map(black_box(order(7))).unwrap())
    });
}

fn bench_access_pairs(c: &mut Criterion) {
    let mapper = MapperBuilder::<Order, OrderDto>::new()
        .unwrap()
        .customize_name("customer", "client")
        .unwrap()
        .build();

    c.bench_function("compute_access_pairs", |b| {
        b.iter(|| black_box(mapper.compute_access_pairs().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_flat_mapping,
    bench_nested_mapping,
    bench_registered_converter,
    bench_access_pairs
);
criterion_main!(benches);
