#![no_main]

use libfuzzer_sys::fuzz_target;
use symresolve::MappingTable;

fuzz_target!(|data: &[u8]| {
    if let Ok(document) = std::str::from_utf8(data) {
        let _ = MappingTable::from_xml(document);
    }
});
