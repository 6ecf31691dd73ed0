//! Pitch naming: letter + accidental + octave to absolute semitone and back.
//!
//! Pitches are absolute semitone numbers with `12 * octave` for the `c` of
//! each octave. Spelling a pitch relative to an octave may borrow the
//! neighbouring octave's letter: `c-` is the `b` below and `b+` is the `c`
//! above. That borrowing is the only reason a note can be written from more
//! than one octave.

/// Semitone offsets of the natural letters.
const SEMITONE_MAP: [(char, i32); 7] = [
    ('c', 0),
    ('d', 2),
    ('e', 4),
    ('f', 5),
    ('g', 7),
    ('a', 9),
    ('b', 11),
];

/// Spellings for the residue `pitch - 12*octave` in `-1..=12`.
const NOTE_NAMES: [&str; 14] = [
    "c-", "c", "c+", "d", "d+", "e", "f", "f+", "g", "g+", "a", "a+", "b", "b+",
];

/// Sharp, flat or natural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    Sharp,
    Flat,
    #[default]
    Natural,
}

impl Accidental {
    /// Parse an accidental symbol: `+` or `#` for sharp, `-` for flat.
    pub fn from_symbol(symbol: Option<char>) -> Self {
        match symbol {
            Some('+') | Some('#') => Accidental::Sharp,
            Some('-') => Accidental::Flat,
            _ => Accidental::Natural,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        }
    }
}

/// Absolute pitch of a letter (any case) with accidental in `octave`.
///
/// Returns `None` if `letter` is not `a`-`g` or the pitch overflows.
///
/// # Examples
/// ```
/// use mmlopt_core::pitch::{name_to_pitch, Accidental};
///
/// assert_eq!(name_to_pitch('c', Accidental::Natural, 5), Some(60));
/// assert_eq!(name_to_pitch('C', Accidental::Flat, 5), Some(59));
/// assert_eq!(name_to_pitch('a', Accidental::Natural, 5), Some(69));
/// ```
pub fn name_to_pitch(letter: char, accidental: Accidental, octave: i32) -> Option<i32> {
    let letter = letter.to_ascii_lowercase();
    let (_, semitone) = SEMITONE_MAP.iter().find(|(c, _)| *c == letter)?;
    octave
        .checked_mul(12)?
        .checked_add(semitone + accidental.semitones())
}

/// Spelling of `pitch` when the active octave is `octave`.
///
/// Returns `None` if the pitch is more than one semitone outside the octave.
///
/// # Examples
/// ```
/// use mmlopt_core::pitch::pitch_to_name;
///
/// assert_eq!(pitch_to_name(60, 5), Some("c"));
/// assert_eq!(pitch_to_name(59, 5), Some("c-"));
/// assert_eq!(pitch_to_name(60, 4), Some("b+"));
/// assert_eq!(pitch_to_name(72, 4), None);
/// ```
pub fn pitch_to_name(pitch: i32, octave: i32) -> Option<&'static str> {
    let residue = i64::from(pitch) - 12 * i64::from(octave);
    if (-1..=12).contains(&residue) {
        Some(NOTE_NAMES[(residue + 1) as usize])
    } else {
        None
    }
}

/// Octaves from which `pitch` can be spelled, lowest first.
///
/// A `c` above octave 0 can also be written `b+` from the octave below, and a
/// `b` can also be written `c-` from the octave above. The `c-` of octave 0
/// is only offered from octave 0, never as a `b` from a negative octave.
pub fn valid_octaves(pitch: i32) -> Vec<i32> {
    let octave = pitch.div_euclid(12);
    match pitch.rem_euclid(12) {
        0 if octave > 0 => vec![octave - 1, octave],
        11 if octave == -1 => vec![0],
        11 => vec![octave, octave + 1],
        _ => vec![octave],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_to_pitch() {
        assert_eq!(name_to_pitch('c', Accidental::Natural, 5), Some(60));
        assert_eq!(name_to_pitch('c', Accidental::Sharp, 5), Some(61));
        assert_eq!(name_to_pitch('c', Accidental::Flat, 5), Some(59));
        assert_eq!(name_to_pitch('c', Accidental::Natural, 4), Some(48));
        assert_eq!(name_to_pitch('a', Accidental::Natural, 5), Some(69));
        assert_eq!(name_to_pitch('B', Accidental::Sharp, 4), Some(60));
        assert_eq!(name_to_pitch('h', Accidental::Natural, 4), None);
        assert_eq!(name_to_pitch('c', Accidental::Natural, i32::MAX), None);
    }

    #[test]
    fn test_accidental_symbols() {
        assert_eq!(Accidental::from_symbol(Some('+')), Accidental::Sharp);
        assert_eq!(Accidental::from_symbol(Some('#')), Accidental::Sharp);
        assert_eq!(Accidental::from_symbol(Some('-')), Accidental::Flat);
        assert_eq!(Accidental::from_symbol(None), Accidental::Natural);
    }

    #[test]
    fn test_pitch_to_name() {
        assert_eq!(pitch_to_name(67, 5), Some("g"));
        assert_eq!(pitch_to_name(68, 5), Some("g+"));
        assert_eq!(pitch_to_name(60, 5), Some("c"));
        assert_eq!(pitch_to_name(59, 5), Some("c-"));
        assert_eq!(pitch_to_name(59, 4), Some("b"));
        assert_eq!(pitch_to_name(60, 4), Some("b+"));
        assert_eq!(pitch_to_name(58, 5), None);
        assert_eq!(pitch_to_name(0, i32::MIN), None);
    }

    #[test]
    fn test_valid_octaves() {
        let g4 = name_to_pitch('g', Accidental::Natural, 4).unwrap();
        let c4 = name_to_pitch('c', Accidental::Natural, 4).unwrap();
        let b4 = name_to_pitch('b', Accidental::Natural, 4).unwrap();
        let c0 = name_to_pitch('c', Accidental::Natural, 0).unwrap();
        assert_eq!(valid_octaves(g4), vec![4]);
        assert_eq!(valid_octaves(c4), vec![3, 4]);
        assert_eq!(valid_octaves(b4), vec![4, 5]);
        assert_eq!(valid_octaves(c0), vec![0]);
    }

    #[test]
    fn test_c_flat_of_octave_zero_stays_in_octave_zero() {
        let c_flat0 = name_to_pitch('c', Accidental::Flat, 0).unwrap();
        assert_eq!(c_flat0, -1);
        assert_eq!(valid_octaves(c_flat0), vec![0]);
        assert_eq!(pitch_to_name(c_flat0, 0), Some("c-"));
        assert_eq!(valid_octaves(-13), vec![-2, -1]);
    }

    #[test]
    fn test_every_valid_octave_spells_the_pitch() {
        for pitch in 0..128 {
            for octave in valid_octaves(pitch) {
                let name = pitch_to_name(pitch, octave)
                    .unwrap_or_else(|| panic!("pitch {} has no name in octave {}", pitch, octave));
                let mut chars = name.chars();
                let letter = chars.next().unwrap();
                let accidental = Accidental::from_symbol(chars.next());
                assert_eq!(name_to_pitch(letter, accidental, octave), Some(pitch));
            }
        }
    }
}
