use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bakery_catalog::{Product, ProductId};
use bakery_core::TenantId;
use bakery_display::{CaseDimensions, ConfigurationScheduler, DisplayCase, DisplayCaseId, FillPolicy};
use bakery_infra::read_model::InMemoryTenantStore;
use bakery_infra::{InMemoryCatalog, InMemoryLayoutStore, PlannerConfig, PlannerService};
use std::sync::Arc;

const ROSTER: [&str; 5] = ["06:00", "08:00", "11:00", "14:00", "17:00"];

fn catalog(tenant_id: TenantId, size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::new(tenant_id, ProductId::generate(), format!("Produkt {i}"))
                .unwrap()
                .with_priority_rank((i % 7) as i32)
        })
        .collect()
}

fn case(tenant_id: TenantId, side: u32) -> DisplayCase {
    DisplayCase::new(
        tenant_id,
        DisplayCaseId::generate(),
        "Theke",
        CaseDimensions::new(side, side).unwrap(),
    )
    .unwrap()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let scheduler = ConfigurationScheduler::new(FillPolicy::default());

    for side in [4u32, 16, 64].iter() {
        let tenant_id = TenantId::new();
        let case = case(tenant_id, *side);
        let products = catalog(tenant_id, (*side * *side) as usize);

        group.throughput(Throughput::Elements(u64::from(*side * *side) * ROSTER.len() as u64));
        group.bench_with_input(BenchmarkId::new("five_label_roster", side), side, |b, _| {
            b.iter(|| black_box(scheduler.generate(&case, ROSTER, &products).unwrap()));
        });
    }

    group.finish();
}

fn bench_regenerate_and_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("regenerate_and_publish");
    group.sample_size(200);

    let tenant_id = TenantId::new();
    let cases: Arc<InMemoryTenantStore<DisplayCaseId, DisplayCase>> = Arc::new(InMemoryTenantStore::new());
    let products = Arc::new(InMemoryCatalog::new());
    for product in catalog(tenant_id, 40) {
        products.upsert(product).unwrap();
    }
    let planner = PlannerService::new(
        cases,
        products,
        Arc::new(InMemoryLayoutStore::new()),
        PlannerConfig::default(),
    );
    let case = case(tenant_id, 5);
    let case_id = case.id_typed();
    planner.register_case(case).unwrap();

    group.bench_function("default_roster_5x5", |b| {
        b.iter(|| black_box(planner.regenerate(tenant_id, case_id).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_regenerate_and_publish);
criterion_main!(benches);
