use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use carga::barcode::*;
use carga::core::*;
use carga::manifest::{InMemoryManifestStore, ManifestSequencer};

const DANFE_KEY: &str = "35240312345678000190550010000044711000123458";

fn carrier() -> Carrier {
    Carrier::new("BENCH").unwrap()
}

/// Store holding `n` load controls with ascending manifest numbers.
fn filled_store(n: i64) -> InMemoryManifestStore {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let store = InMemoryManifestStore::new();
    for i in 1..=n {
        let mut load = LoadControlBuilder::new(i.to_string(), carrier(), "Bench Driver")
            .created_at(base + Duration::minutes(i))
            .build()
            .unwrap();
        load.manifest_number = Some(i.to_string());
        store.insert(load);
    }
    store
}

fn bench_validate_code(c: &mut Criterion) {
    c.bench_function("validate_code_danfe", |b| {
        b.iter(|| black_box(validate_code(black_box(DANFE_KEY))));
    });
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_note_number_danfe", |b| {
        b.iter(|| black_box(extract_note_number(black_box(DANFE_KEY))));
    });
    c.bench_function("extract_note_number_hyphen", |b| {
        b.iter(|| black_box(extract_note_number(black_box("NF-44718"))));
    });
}

fn bench_extract_volume(c: &mut Criterion) {
    let wrapped = format!("0012{}0077", DANFE_KEY.replacen('3', "9", 1));
    c.bench_function("extract_volume_note_number_wrapped", |b| {
        b.iter(|| black_box(extract_volume_note_number(black_box(&wrapped))));
    });
}

fn bench_scan(c: &mut Criterion) {
    c.bench_function("scan_code_danfe", |b| {
        b.iter(|| black_box(scan_code(black_box(DANFE_KEY))));
    });
}

fn bench_sequencer_cached(c: &mut Criterion) {
    let seq = ManifestSequencer::with_store(InMemoryManifestStore::new());
    let carrier = carrier();
    c.bench_function("next_manifest_number_cached", |b| {
        b.iter(|| black_box(seq.next_manifest_number(black_box(&carrier))));
    });
}

fn bench_sequencer_seed(c: &mut Criterion) {
    let store = filled_store(1000);
    let carrier = carrier();
    c.bench_function("next_manifest_number_seed_1000_records", |b| {
        b.iter(|| {
            // Fresh sequencer each time so every call seeds from the store
            let seq = ManifestSequencer::with_store(&store);
            black_box(seq.next_manifest_number(&carrier))
        });
    });
}

criterion_group!(
    benches,
    bench_validate_code,
    bench_extract,
    bench_extract_volume,
    bench_scan,
    bench_sequencer_cached,
    bench_sequencer_seed,
);
criterion_main!(benches);
