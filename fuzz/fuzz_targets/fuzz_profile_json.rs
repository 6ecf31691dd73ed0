#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use mmlopt_core::{convert, FormatProfile};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Profiles that pass validation must convert without failing.
    if let Ok(profile) = FormatProfile::from_json_str(json, Path::new("fuzz.json")) {
        let _ = convert("l8cde>c<b16.r4&c,o2c", &profile, &profile, 0)
            .expect("search exhausted");
        let _ = serde_json::to_string(&profile).expect("profile serializes");
    }
});
