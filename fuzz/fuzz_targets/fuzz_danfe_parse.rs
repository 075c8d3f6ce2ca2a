#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(key) = std::str::from_utf8(data) {
        if let Ok(parsed) = carga::barcode::DanfeKey::parse(key) {
            assert_eq!(parsed.note_number.len(), 9);
            let _ = parsed.has_valid_check_digit();
        }
    }
});
