#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary scanner output — must not panic.
    if let Ok(code) = std::str::from_utf8(data) {
        let _ = carga::barcode::extract_note_number(code);
        let _ = carga::barcode::extract_volume_note_number(code);
        let _ = carga::barcode::scan_code(code);
    }
});
