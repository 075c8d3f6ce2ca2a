use carga::barcode::{VolumeTally, scan_code};
use carga::core::*;
use carga::manifest::{InMemoryManifestStore, ManifestSequencer};
use rust_decimal_macros::dec;

fn main() {
    let store = InMemoryManifestStore::new();
    let sequencer = ManifestSequencer::with_store(&store);

    let mut load = LoadControlBuilder::new("LC-2024-0042", Carrier::new("braspress").unwrap(), "Maria Souza")
        .responsible("Expedição - Doca 3")
        .vehicle_plate("abc1d23")
        .build()
        .unwrap();

    // ── 1. Attach scanned notes ───────────────────────────────────────
    println!("=== Notes ===");
    let scans = [
        ("35240312345678000190550010000044711000123458", dec!(1899.90), 2),
        ("NF-5120", dec!(240.00), 1),
        ("NF 5121", dec!(10.00), 1),
    ];
    for (code, amount, volumes) in scans {
        let result = scan_code(code)
            .map_err(CargaError::from)
            .and_then(|scan| load.add_note(scan.into_note().amount(amount).volumes(volumes)));
        match result {
            Ok(()) => println!("  attached {code}"),
            Err(e) => println!("  {e}"),
        }
    }

    // ── 2. Validate and number ────────────────────────────────────────
    println!("\n=== Manifest ===");
    let errors = validate_load_control(&load);
    if errors.is_empty() {
        let number = sequencer.assign(&mut load);
        println!("  manifest {number} for {} ({})", load.id, load.carrier);
    } else {
        for e in &errors {
            println!("  Validation: {e}");
        }
    }
    println!("  total value:   {}", load.total_amount());
    println!("  total volumes: {}", load.total_volumes());

    // ── 3. Check volumes at the dock ──────────────────────────────────
    println!("\n=== Volume Check ===");
    let mut tally = VolumeTally::new();
    for label in ["35240312345678000190550010000044711000123458", "VOL-5120"] {
        if let Err(e) = tally.record(label) {
            println!("  {e}");
        }
    }
    for missing in tally.missing_against(&load) {
        println!(
            "  note {}: {} of {} volumes scanned",
            missing.note_number, missing.scanned, missing.declared
        );
    }

    store.insert(load);
    println!("\n  stored load controls: {}", store.len());
}
