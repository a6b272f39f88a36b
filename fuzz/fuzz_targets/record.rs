#![no_main]

use kif::Record;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(record) = text.parse::<Record>() {
            let kif = record.to_kif_string();
            kif.parse::<Record>().expect("written record parses");
            let _ = record.to_sfen();
        }
    }
});
