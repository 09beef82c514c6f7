#![no_main]

use libfuzzer_sys::fuzz_target;
use texindex::build::compile_source;
use texindex::utils::config::IndexConfig;

fuzz_target!(|data: &str| {
    // Scanning and digesting arbitrary source should not panic
    let view = compile_source(data, &IndexConfig::default());
    assert!(view.groups.iter().all(|g| g.columns.len() == 2));
});
