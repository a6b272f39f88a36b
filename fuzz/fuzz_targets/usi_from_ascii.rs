#![no_main]

use kif::usi::UsiMove;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(usi) = UsiMove::from_ascii(data) {
        let roundtripped = UsiMove::from_ascii(usi.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(usi, roundtripped);
    }
});
