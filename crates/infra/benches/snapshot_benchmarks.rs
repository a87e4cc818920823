use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use hbnb_core::models::{self, PLACE, USER};
use hbnb_core::{AttrValue, Entity};
use hbnb_infra::{InMemorySnapshotStore, Storage};

fn populated(entities: usize) -> (Storage<Arc<InMemorySnapshotStore>>, Arc<InMemorySnapshotStore>) {
    let snapshot = Arc::new(InMemorySnapshotStore::new());
    let mut storage = Storage::new(snapshot.clone());
    for i in 0..entities {
        let schema = if i % 2 == 0 { &USER } else { &PLACE };
        let id = Entity::create_new(schema, &mut storage).unwrap();
        let entity = storage
            .get_mut(&format!("{}.{id}", schema.name()))
            .unwrap();
        entity
            .set_attribute("name", AttrValue::Str(format!("entity {i}")))
            .unwrap();
        entity
            .set_attribute("number_rooms", AttrValue::Int(i as i64))
            .unwrap();
    }
    (storage, snapshot)
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_save");

    for entity_count in [10usize, 100, 1_000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::new("save_whole_map", entity_count),
            entity_count,
            |b, &n| {
                let (storage, _) = populated(n);
                b.iter(|| storage.save().unwrap());
            },
        );
    }

    group.finish();
}

fn bench_reload(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_reload");
    let registry = models::registry();

    for entity_count in [10usize, 100, 1_000].iter() {
        group.throughput(Throughput::Elements(*entity_count as u64));
        group.bench_with_input(
            BenchmarkId::new("reload_whole_map", entity_count),
            entity_count,
            |b, &n| {
                let (storage, snapshot) = populated(n);
                storage.save().unwrap();
                let mut fresh = Storage::new(snapshot);
                b.iter(|| black_box(fresh.reload(&registry).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_touch_and_persist(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_and_persist");
    let (mut storage, _) = populated(100);
    let key = storage.all().keys().next().cloned().unwrap();

    group.bench_function("single_update_100_entities", |b| {
        b.iter(|| storage.touch_and_persist(black_box(&key)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_save, bench_reload, bench_touch_and_persist);
criterion_main!(benches);
