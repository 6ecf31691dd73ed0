#![no_main]

use libfuzzer_sys::fuzz_target;
use mmlopt_core::{convert, generate, parse, FormatProfile};

fuzz_target!(|data: &[u8]| {
    // Long inputs only slow the search down without reaching new code.
    if data.len() > 256 {
        return;
    }
    let text = String::from_utf8_lossy(data);

    for profile in [FormatProfile::archeage(), FormatProfile::mabinogi()] {
        let optimized = convert(&text, &profile, &profile, 0).expect("search exhausted");
        let naive = generate(&parse(&text, &profile), &profile);
        assert!(optimized.len() <= naive.len());
    }

    let aa = FormatProfile::archeage();
    let mabi = FormatProfile::mabinogi();
    let _ = convert(&text, &aa, &mabi, 0).expect("search exhausted");
    let _ = convert(&text, &mabi, &aa, -12).expect("search exhausted");
});
