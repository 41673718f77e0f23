#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = graypgm::PgmDecoder::new(Cursor::new(data));
    let _ = decoder.decode();
});
