use carga::barcode::*;

fn main() {
    // Code validation and note-number extraction
    println!("=== Scanned Codes ===\n");

    let codes = [
        "35240312345678000190550010000044711000123458", // DANFE access key
        "NF-4471",                                      // manual prefix-number
        "88213",                                        // short numeric
        "N123",                                         // alphanumeric
        "123456789012345678901",                        // 21 digits, rejected
        "NF 4471",                                      // space, rejected
    ];

    for code in &codes {
        match scan_code(code) {
            Ok(scan) => println!(
                "  {code} => {} note {}",
                scan.format, scan.note_number
            ),
            Err(e) => println!("  {code} => REJECTED: {}", e.reason),
        }
    }

    // DANFE key breakdown
    println!("\n=== DANFE Key ===\n");

    let key = DanfeKey::parse("35240312345678000190550010000044711000123458").unwrap();
    println!("  state:        {}", key.state_code);
    println!("  issued:       {}-{:02}", key.year, key.month);
    println!("  issuer CNPJ:  {}", key.issuer_cnpj);
    println!("  model/series: {}/{}", key.model, key.series);
    println!("  note number:  {} ({})", key.note_number, key.note_number_value());
    println!("  check digit:  {} (valid: {})", key.check_digit, key.has_valid_check_digit());

    // Volume labels
    println!("\n=== Volume Labels ===\n");

    let mut tally = VolumeTally::new();
    for label in [
        "3524 0312 3456 7800 0190 5500 1000 0044 7110 0012 3458",
        "VOL-88213",
        "88213",
    ] {
        match tally.record(label) {
            Ok(scan) => println!("  {label} => note {} (scan #{})", scan.note_number, scan.count),
            Err(e) => println!("  {label} => REJECTED: {e}"),
        }
    }
    println!("\n  Total volumes scanned: {}", tally.total());
}
