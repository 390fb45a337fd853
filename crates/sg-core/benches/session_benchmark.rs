//! Session Benchmarks
//!
//! Measures:
//! - Session lookup and creation in the store
//! - Command dispatch over an in-memory catalog (search, paging, favorites)

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use sg_core::{
    Dispatcher, PaginationEngine, Price, Product, ProductSearch, Result, SessionStore,
};

/// Catalog that serves `total` identical products for any query
struct StaticCatalog {
    total: usize,
    page_size: usize,
}

#[async_trait]
impl ProductSearch for StaticCatalog {
    async fn search(&self, _query: &str, offset: usize) -> Result<Vec<Product>> {
        let end = self.total.min(offset + self.page_size);
        Ok((offset..end)
            .map(|i| Product {
                title: format!("Product {}", i),
                price: Price {
                    amount: "9.99".to_string(),
                    currency: "EUR".to_string(),
                },
                url: format!("https://www.ebay.it/itm/{}", i),
                image_url: None,
            })
            .collect())
    }
}

fn dispatcher() -> Dispatcher {
    let catalog = Arc::new(StaticCatalog {
        total: 1000,
        page_size: 5,
    });
    Dispatcher::new(SessionStore::new(), PaginationEngine::new(catalog, 5))
}

/// Benchmark session store lookups
fn bench_session_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_store");

    for users in [10, 1000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("get_or_create_existing", users),
            users,
            |b, &users| {
                let store = SessionStore::new();
                for i in 0..users {
                    store.get_or_create(&i.to_string());
                }
                b.iter(|| store.get_or_create(black_box("7")))
            },
        );
    }

    group.bench_function("get_or_create_new", |b| {
        b.iter_with_setup(SessionStore::new, |store| {
            store.get_or_create(black_box("42"));
            store
        })
    });

    group.finish();
}

/// Benchmark full command handling
fn bench_dispatch(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("search", |b| {
        let dispatcher = dispatcher();
        b.iter(|| rt.block_on(dispatcher.handle("1", black_box("/search shoes"))))
    });

    group.bench_function("next", |b| {
        let dispatcher = dispatcher();
        rt.block_on(dispatcher.handle("1", "/search shoes"));
        b.iter(|| rt.block_on(dispatcher.handle("1", black_box("/next"))))
    });

    group.bench_function("add_and_remove_favorite", |b| {
        let dispatcher = dispatcher();
        rt.block_on(dispatcher.handle("1", "/search shoes"));
        b.iter(|| {
            rt.block_on(async {
                dispatcher.handle("1", "/addfavorite 3").await;
                dispatcher.handle("1", "/remove 1").await
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_session_store, bench_dispatch);

criterion_main!(benches);
