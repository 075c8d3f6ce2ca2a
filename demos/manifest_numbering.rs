use carga::core::*;
use carga::manifest::*;

fn main() {
    let braspress = Carrier::new("braspress").unwrap();
    let jamef = Carrier::new("jamef").unwrap();

    // Persisted history, including legacy rows that must not seed the sequence
    let store = InMemoryManifestStore::new();
    for (id, manifest) in [("1", "118"), ("2", "119"), ("3", "ABC"), ("4", "1718900000")] {
        let mut load = LoadControlBuilder::new(id, braspress.clone(), "Motorista")
            .build()
            .unwrap();
        load.manifest_number = Some(manifest.into());
        store.insert(load);
    }

    println!("=== Global Counter ===\n");
    let seq = ManifestSequencer::with_store(&store);
    for carrier in [&braspress, &jamef, &braspress] {
        println!("  {carrier} => {}", seq.next_manifest_number(carrier));
    }

    println!("\n=== Per-Carrier Counters ===\n");
    let config = SequencerConfigBuilder::new()
        .scope(CounterScope::PerCarrier)
        .build();
    let seq = ManifestSequencer::new(&store, config);
    for carrier in [&braspress, &jamef, &jamef] {
        println!("  {carrier} => {}", seq.next_manifest_number(carrier));
    }

    println!("\n=== Store Unavailable ===\n");
    store.set_unavailable(true);
    let seq = ManifestSequencer::with_store(&store);
    println!("  fallback => {}", seq.next_manifest_number(&braspress));
    match seq.try_next_manifest_number(&braspress) {
        Ok(n) => println!("  strict   => {n}"),
        Err(e) => println!("  strict   => {e}"),
    }
}
