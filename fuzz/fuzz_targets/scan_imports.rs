#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for spec in pokergrid::imports::scan_imports(text) {
        if pokergrid::imports::is_relative(&spec) {
            let _ = pokergrid::graph::resolve_import("src/app/main.js", &spec);
        }
    }
});
