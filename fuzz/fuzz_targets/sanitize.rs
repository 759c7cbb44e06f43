#![no_main]

use libfuzzer_sys::fuzz_target;

use wikiscrub::sanitize_html;

fuzz_target!(|s: &str| {
    let once = sanitize_html(s);
    assert_eq!(sanitize_html(&once), once);
});
