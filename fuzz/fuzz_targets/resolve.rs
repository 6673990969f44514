#![no_main]

use std::sync::LazyLock;

use libfuzzer_sys::fuzz_target;
use symresolve::{resolve_text, MappingTable, ResolveOptions};

static TABLE: LazyLock<MappingTable> = LazyLock::new(|| {
    MappingTable::from_xml(include_str!("../../tests/samples/mapping.xml"))
        .expect("sample mapping is valid")
});

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = resolve_text(&TABLE, &text, &ResolveOptions::default());
});
