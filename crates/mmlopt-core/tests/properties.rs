//! Whole-pipeline properties.
//!
//! - Re-optimizing optimized text is a fixed point
//! - Optimized text is never longer than the naive rendering
//! - Optimized text still plays the same notes
//! - Every note length survives the trip through ticks

use mmlopt_core::duration::{all_spellings_for_ticks, duration_to_ticks};
use mmlopt_core::{generate, optimize, parse, FormatProfile, Token};

const CORPUS: &[&str] = &[
    "c8c8c8c4c8c8c8",
    "c4d4e4f4",
    "o1c>>>c<<<c",
    "c4c4.c4c4.",
    "v15o2g3.&g",
    "t90l16cdefgab",
    "o4go5go4go7go6g",
    "c30c30c30c30c30...",
    "r8r8c8,d8",
    "l8o3cdefgab>cdefgab>c<<c",
    "t150v10l16o5c+d-e#f-,o3l2c&c,r1",
    "/* intro */ l4 o4 c e g > c < g e c2.",
    "t90v3b+rl8b+t90l16.t90c8o2",
    "v8v8c&c,t120t90t90d",
    "o0c-c-c-<c",
];

fn events(tokens: &[Token]) -> Vec<(Option<i32>, u32, u64)> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Note(n) => Some((Some(n.pitch), n.ticks, n.time)),
            Token::Rest(r) => Some((None, r.ticks, r.time)),
            _ => None,
        })
        .collect()
}

fn roundtrip(text: &str, profile: &FormatProfile) -> String {
    let tokens = optimize(&parse(text, profile), profile).unwrap();
    generate(&tokens, profile)
}

fn profiles() -> [FormatProfile; 2] {
    [FormatProfile::archeage(), FormatProfile::mabinogi()]
}

#[test]
fn test_reoptimizing_is_a_fixed_point() {
    for profile in profiles() {
        for text in CORPUS {
            let once = roundtrip(text, &profile);
            let twice = roundtrip(&once, &profile);
            assert_eq!(twice, once, "{} on {}", text, profile.name);
        }
    }
}

#[test]
fn test_never_longer_than_naive_rendering() {
    for profile in profiles() {
        for text in CORPUS {
            let naive = generate(&parse(text, &profile), &profile);
            let optimized = roundtrip(text, &profile);
            assert!(
                optimized.len() <= naive.len(),
                "{} on {}: {} is longer than {}",
                text,
                profile.name,
                optimized,
                naive
            );
        }
    }
}

#[test]
fn test_optimized_text_plays_the_same_notes() {
    for profile in profiles() {
        for text in CORPUS {
            let optimized = roundtrip(text, &profile);
            assert_eq!(
                events(&parse(&optimized, &profile)),
                events(&parse(text, &profile)),
                "{} on {} -> {}",
                text,
                profile.name,
                optimized
            );
        }
    }
}

#[test]
fn test_every_length_has_a_spelling() {
    for profile in profiles() {
        for denominator in 1..=64 {
            for dots in 0..=2 {
                let ticks = duration_to_ticks(denominator, dots, &profile);
                let spellings = all_spellings_for_ticks(ticks, &profile);
                assert!(
                    spellings.iter().any(|s| s.ticks(&profile) == ticks),
                    "{}{} on {}",
                    denominator,
                    ".".repeat(dots as usize),
                    profile.name
                );
            }
        }
    }
}
