#![no_main]
use std::path::Path;

use gvm_lib::runtimes::Locator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let locator = Locator::default();
        if let Some(version) = locator.version_from_path(Path::new(s)) {
            assert!(version.split('.').all(|p| p.len() == 1 && p.as_bytes()[0].is_ascii_digit()));
        }
    }
});
