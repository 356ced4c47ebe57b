use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use chrono::Utc;
use stockroom_catalog::{NamedRef, Product, StockStatus};
use stockroom_core::{LocationCode, ProductId};
use stockroom_filters::{ProductFilter, RangeFilter};

fn sample_products(count: usize) -> Vec<Product> {
    let categories = ["laptops", "cameras", "phones", "cables"];
    (0..count)
        .map(|i| Product {
            id: ProductId::new(),
            sku: format!("SKU-{i}"),
            name: format!("Product number {i}"),
            stock: (i % 40) as i64,
            min_stock: 5,
            reserved_stock: 0,
            available_stock: (i % 40) as i64,
            location: LocationCode::new(format!("A-{:02}", i % 20)),
            location_stock: None,
            category: Some(NamedRef::new(
                categories[i % categories.len()],
                categories[i % categories.len()],
            )),
            supplier: Some(NamedRef::new("sup-1", "Acme Wholesale")),
            purchase_price: 100 + (i as i64 % 900),
            sale_price: 200 + (i as i64 % 1800),
            created_at: Utc::now(),
        })
        .collect()
}

fn bench_product_matching(c: &mut Criterion) {
    let products = sample_products(10_000);

    let filter = ProductFilter {
        name: "number".to_string(),
        category: "laptops".to_string(),
        price: RangeFilter::between(500, 1500),
        stock_status: vec![StockStatus::InStock, StockStatus::LowStock],
        ..Default::default()
    };

    let mut group = c.benchmark_group("product_matching");
    group.throughput(Throughput::Elements(products.len() as u64));
    group.bench_function("compound_filter_10k", |b| {
        b.iter(|| {
            let matched = products
                .iter()
                .filter(|p| filter.matches(black_box(p)))
                .count();
            black_box(matched)
        })
    });
    group.bench_function("empty_filter_10k", |b| {
        let empty = ProductFilter::default();
        b.iter(|| {
            let matched = products
                .iter()
                .filter(|p| empty.matches(black_box(p)))
                .count();
            black_box(matched)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_product_matching);
criterion_main!(benches);
