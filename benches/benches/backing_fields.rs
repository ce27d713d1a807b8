// Copyright 2026 the Backfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `backfield_store` + `backfield_fluent`.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use backfield_fluent::ModelCore;
use backfield_store::{BackingFields, Field, backing_fields};

#[derive(Clone, PartialEq)]
enum Status {
    Idle,
    Busy,
}

impl Field for Status {
    fn zero() -> Self {
        Self::Idle
    }
}

struct Sensor;

backing_fields! {
    Sensor {
        label: String = String::from("unset"),
        reading: f64,
        samples: u32,
        online: bool,
        status: Status,
    }
}

fn bench_backing_fields(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: BackingFields={} ModelCore<Sensor>={}",
            core::mem::size_of::<BackingFields>(),
            core::mem::size_of::<ModelCore<Sensor>>(),
        );
    });

    let mut group = c.benchmark_group("store/access");

    group.bench_function("typed_get", |b| {
        let fields = BackingFields::for_owner::<Sensor>();
        b.iter(|| black_box(fields.get_u32(black_box("samples")).unwrap()))
    });

    group.bench_function("typed_set_changed", |b| {
        let mut fields = BackingFields::for_owner::<Sensor>();
        let mut next = 0_u32;
        b.iter(|| {
            next = next.wrapping_add(1);
            black_box(fields.set_u32(next, black_box("samples")).unwrap())
        })
    });

    group.bench_function("typed_set_unchanged", |b| {
        let mut fields = BackingFields::for_owner::<Sensor>();
        fields.set_u32(7, "samples").unwrap();
        b.iter(|| black_box(fields.set_u32(7, black_box("samples")).unwrap()))
    });

    group.bench_function("generic_get_scalar", |b| {
        let fields = BackingFields::for_owner::<Sensor>();
        b.iter(|| black_box(fields.get::<u32>(black_box("samples")).unwrap()))
    });

    group.bench_function("generic_set_erased", |b| {
        let mut fields = BackingFields::for_owner::<Sensor>();
        let mut busy = false;
        b.iter(|| {
            busy = !busy;
            let status = if busy { Status::Busy } else { Status::Idle };
            black_box(fields.set(status, black_box("status")).unwrap())
        })
    });

    group.bench_function("text_get", |b| {
        let fields = BackingFields::for_owner::<Sensor>();
        b.iter(|| black_box(fields.get_text(black_box("label")).unwrap().len()))
    });

    group.finish();

    let mut group = c.benchmark_group("fluent/chain");

    group.bench_function("set_changed_no_subscribers", |b| {
        let mut core: ModelCore<Sensor> = ModelCore::new();
        let mut next = 0_u32;
        b.iter(|| {
            next = next.wrapping_add(1);
            black_box(core.set_u32(next, "samples").unwrap().was_updated())
        })
    });

    group.bench_function("set_changed_one_subscriber", |b| {
        let mut core: ModelCore<Sensor> = ModelCore::new();
        core.subscribe(|name| {
            black_box(name.len());
        });
        let mut next = 0_u32;
        b.iter(|| {
            next = next.wrapping_add(1);
            black_box(core.set_u32(next, "samples").unwrap().was_updated())
        })
    });

    group.bench_function("set_with_affects", |b| {
        let mut core: ModelCore<Sensor> = ModelCore::new();
        core.subscribe(|name| {
            black_box(name.len());
        });
        let mut next = 0.0_f64;
        b.iter(|| {
            next += 0.5;
            black_box(
                core.set_f64(next, "reading")
                    .unwrap()
                    .affects("samples")
                    .unwrap()
                    .was_updated(),
            )
        })
    });

    group.bench_function("inert_chain", |b| {
        let mut core: ModelCore<Sensor> = ModelCore::new();
        b.iter(|| {
            black_box(
                core.when(black_box(false))
                    .set(1_u32, "samples")
                    .unwrap()
                    .was_updated(),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_backing_fields);
criterion_main!(benches);
