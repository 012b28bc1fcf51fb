//! Decision engine benchmarks
//!
//! Policy evaluation is a linear scan over a small list; this tracks how the
//! scan behaves as the list grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use petstore_authz::{
    Action, AuthorizationContext, AuthorizationEngine, Entities, Entity, EntityId, Policy,
};

fn synthetic_policies(count: usize) -> Vec<Policy> {
    (0..count)
        .map(|i| {
            Policy::permit(format!("policy-{}", i))
                .principal_in_group(format!("Group-{}", i))
                .on_action(Action::SearchPets)
        })
        .collect()
}

fn customer_context() -> AuthorizationContext {
    let principal = EntityId::new("User", "user-123");
    let group = EntityId::new("Group", "Customer");
    let mut entities = Entities::new();
    entities.add(Entity::new(group.clone()));
    entities.add(Entity::new(principal.clone()).with_parent(group));
    AuthorizationContext::new(
        principal,
        Action::SearchPets,
        EntityId::new("Store", "store-001#main"),
        entities,
    )
}

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");
    let context = customer_context();

    for policy_count in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("policies", policy_count),
            policy_count,
            |b, &count| {
                let engine = AuthorizationEngine::new(synthetic_policies(count));
                b.iter(|| {
                    let result = engine.decide(black_box(&context)).unwrap();
                    black_box(result);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decide);
criterion_main!(benches);
