#![no_main]

use libfuzzer_sys::fuzz_target;

use wikiscrub::{extract_templates, parse_template};

fuzz_target!(|s: &str| {
    let _ = parse_template(s);
    extract_templates(s);
});
