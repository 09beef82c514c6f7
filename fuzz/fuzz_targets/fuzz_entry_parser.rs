#![no_main]

use libfuzzer_sys::fuzz_target;
use texindex::document::{Destination, MacroExpander};
use texindex::entry::parse_entry_str;

fuzz_target!(|data: &str| {
    // Any entry text must parse, with one sort key per level
    let node = Destination::new("fuzz").into_ref();
    let entry = parse_entry_str(data, &MacroExpander::default(), node);
    assert_eq!(entry.key.len(), entry.sort_key.len());
});
