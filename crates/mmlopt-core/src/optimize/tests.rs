//! Tests for the re-spelling search.

use super::*;
use crate::generate::generate;
use crate::parse::parse;
use crate::volume::Volume;
use pretty_assertions::assert_eq;

fn aa() -> FormatProfile {
    FormatProfile::archeage()
}

fn opt(text: &str) -> String {
    let profile = aa();
    let tokens = optimize(&parse(text, &profile), &profile).unwrap();
    generate(&tokens, &profile)
}

/// Pitch, length and start time of every note and rest.
fn events(text: &str) -> Vec<(Option<i32>, u32, u64)> {
    parse(text, &aa())
        .iter()
        .filter_map(|t| match t {
            Token::Note(n) => Some((Some(n.pitch), n.ticks, n.time)),
            Token::Rest(r) => Some((None, r.ticks, r.time)),
            _ => None,
        })
        .collect()
}

/// Equal length to `expected` and the same music; equal-length spellings
/// are not distinguished.
fn assert_optimal(input: &str, expected: &str) {
    let output = opt(input);
    assert_eq!(output.len(), expected.len(), "{} -> {}", input, output);
    assert_eq!(events(&output), events(input), "{} -> {}", input, output);
}

// ============================================================================
// Exact outputs
// ============================================================================

#[test]
fn test_drops_redundant_lengths() {
    assert_eq!(opt("c4d4e4f4"), "cdef");
}

#[test]
fn test_sets_length_once() {
    assert_eq!(opt("c8c8c8c4c8c8c8"), "l8cccc4ccc");
}

#[test]
fn test_uses_relative_dots() {
    assert_eq!(opt("c4c4.c4c4."), "cc.cc.");
    assert_eq!(opt("c4c4..c4c4..c4"), "cc..cc..c");
    assert_eq!(opt("c4c4...c4c4...c4"), "cc...cc...c");
}

#[test]
fn test_prefers_equivalent_shorter_spelling() {
    assert_eq!(opt("c30c30c30c30c30..."), "l30ccccc9");
}

#[test]
fn test_octave_ambiguity() {
    assert_eq!(opt("o1c>>>c<<<c"), "o1co4co1c");
    assert_eq!(opt("n12n48n12"), "o1co4co1c");
    assert_eq!(opt("o4go5go4go7go6g"), "<g>g<go7g<g");
}

#[test]
fn test_drops_unused_state_changes() {
    assert_eq!(opt("o1r>>>r<<<r>>>r"), "rrrr");
    assert_eq!(opt("v15v15v15c"), "v15c");
    assert_eq!(opt("t60t60t60c"), "t60c");
    assert_eq!(opt("o1o1o1c"), "o1c");
    assert_eq!(opt("l8l8l8c"), "c8");
}

#[test]
fn test_empty_input() {
    assert_eq!(opt(""), "");
    assert_eq!(opt("xyz!"), "");
}

// ============================================================================
// Optimal length, any spelling
// ============================================================================

#[test]
fn test_optimal_lengths() {
    let cases = [
        ("c8c8c4c8c8", "l8ccc4cc"),
        ("c8c4c8c8", "c8cc8c8"),
        ("c16c4c16c16", "l16cc4cc"),
        ("c4c4.c4.c4.c4", "cc.c.c.c"),
        ("c4c4.c4.c4.c4.", "cl4.cccc"),
        ("c4.c4..c4.c4..c4.", "l4.cc.cc.c"),
        ("c4..c4...c4..c4...c4..", "l4..cc.cc.c"),
        ("c16.c16c16.c16c16.c16c16.c16", "l16c.cc.cc.cc.c"),
        ("l18ccccccl12cc", "l18ccccccc.c."),
        ("c64c43c64c43", "l64cc.cc."),
        ("l64ccccc.c.c.c.", "l64ccccl43cccc"),
        ("b>c>c<b<b>d", "b>cb+bc-d"),
    ];
    for (input, expected) in cases {
        assert_optimal(input, expected);
    }
}

// ============================================================================
// Search structure
// ============================================================================

fn octave_four() -> FormatProfile {
    let mut profile = aa();
    profile.default_state.octave = 4;
    profile
}

#[test]
fn test_find_path_without_changes() {
    let profile = octave_four();
    let tokens = parse("cdef", &profile);
    let path = find_path(&tokens, &profile).unwrap();
    let cursors: Vec<usize> = path.nodes.iter().map(|n| n.cursor).collect();
    assert_eq!(cursors, vec![0, 1, 2, 3, 4]);
    assert!(path
        .nodes
        .iter()
        .all(|n| n.octave == 4 && n.duration == DurationSpec::quarter()));
    assert_eq!(path.total_cost, 4);
}

#[test]
fn test_find_path_with_length_changes() {
    let profile = octave_four();
    let tokens = parse("c16d16e32f32", &profile);
    let path = find_path(&tokens, &profile).unwrap();
    let node = |cursor, denominator| SearchNode {
        cursor,
        octave: 4,
        duration: DurationSpec::new(denominator, 0),
    };
    assert_eq!(
        path.nodes,
        vec![
            node(0, 4),
            node(0, 16),
            node(1, 16),
            node(2, 16),
            node(2, 32),
            node(3, 32),
            node(4, 32),
        ]
    );
}

#[test]
fn test_optimize_synthesizes_timed_changes() {
    let profile = octave_four();
    let volume = Volume::new(100, 127);
    let tokens = optimize(&parse("c16d16e32f32", &profile), &profile).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Duration {
                duration: DurationSpec::new(16, 0),
                time: 0
            },
            Token::note(48, 125, volume, 0),
            Token::note(50, 125, volume, 125),
            Token::Duration {
                duration: DurationSpec::new(32, 0),
                time: 250
            },
            Token::note(52, 62, volume, 250),
            Token::note(53, 62, volume, 312),
        ]
    );
}

#[test]
fn test_cost_matches_rendered_length() {
    let profile = aa();
    for text in ["c8c8c8c4c8c8c8", "v15o2g3.&g,t90r8.c", "b>c>c<b<b>d"] {
        let optimized = optimize_with_stats(&parse(text, &profile), &profile).unwrap();
        assert_eq!(optimized.cost, generate(&optimized.tokens, &profile).len(), "{}", text);
        assert!(optimized.expanded > 0);
    }
}

#[test]
fn test_input_length_and_octave_tokens_are_ignored() {
    let profile = aa();
    let mut tokens = parse("c8c8c8", &profile);
    tokens.insert(
        0,
        Token::Octave {
            octave: 2,
            time: 0,
        },
    );
    tokens.insert(
        0,
        Token::Duration {
            duration: DurationSpec::new(2, 0),
            time: 0,
        },
    );
    let optimized = optimize(&tokens, &profile).unwrap();
    assert_eq!(generate(&optimized, &profile), "l8ccc");
}

// ============================================================================
// Dialect flags
// ============================================================================

#[test]
fn test_no_literal_dotted_rests() {
    let profile = FormatProfile {
        no_literal_dotted_rests: true,
        ..aa()
    };
    let tokens = optimize(&parse("r4r4.", &profile), &profile).unwrap();
    assert_eq!(generate(&tokens, &profile), "rl4.r");
    assert_eq!(opt("r4r4."), "rr.");
}

#[test]
fn test_next_voice_resets_search_state() {
    let mabi = FormatProfile::mabinogi();
    let tokens = optimize(&parse("o2c,o2c", &mabi), &mabi).unwrap();
    assert_eq!(generate(&tokens, &mabi), "o2c,o2c");

    assert_eq!(opt("o2c,o2c"), "o2c,c");
}

// ============================================================================
// Volume materialization
// ============================================================================

#[test]
fn test_materialize_volumes_same_dialect_is_noop() {
    let profile = aa();
    let tokens = parse("v15cc,v90d", &profile);
    assert_eq!(materialize_volumes(&tokens, &profile), tokens);
}

#[test]
fn test_materialize_volumes_across_dialects() {
    let output = FormatProfile::mabinogi();
    let input = aa().with_timing_of(&output);
    let tokens = parse("o2g", &input);
    let materialized = materialize_volumes(&tokens, &output);
    assert_eq!(
        materialized[0],
        Token::Volume {
            volume: Volume::new(100, 127),
            time: 0
        }
    );
    let optimized = optimize(&tokens, &output).unwrap();
    assert_eq!(generate(&optimized, &output), "v12o2g");
}

// ============================================================================
// Redundant volume and tempo changes
// ============================================================================

#[test]
fn test_drop_redundant_changes() {
    let profile = aa();
    let tokens = parse("t120v100ct90t90v15v15c,t90c", &profile);
    let kept: Vec<&str> = drop_redundant_changes(&tokens, &profile)
        .iter()
        .map(Token::kind)
        .collect();
    assert_eq!(
        kept,
        ["note", "tempo", "volume", "note", "nextVoice", "note"]
    );
}

#[test]
fn test_redundant_changes_do_not_affect_the_result() {
    let mabi = FormatProfile::mabinogi();
    let opt_mabi = |text: &str| {
        let tokens = optimize(&parse(text, &mabi), &mabi).unwrap();
        generate(&tokens, &mabi)
    };
    let with_repeats = opt_mabi("t90v3b+rl8b+t90l16.t90c8o2");
    let without = opt_mabi("t90v3b+rl8b+l16.c8o2");
    assert_eq!(with_repeats, without);
    assert_eq!(opt_mabi(&with_repeats), with_repeats);
}
