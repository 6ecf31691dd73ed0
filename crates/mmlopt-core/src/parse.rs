//! Lenient scanner from MML text to absolute tokens.
//!
//! The text is consumed left to right by an ordered list of lexical rules; the
//! first rule that matches wins and unmatched characters are skipped. Octave
//! and length commands only change the parse state: the resulting tokens carry
//! absolute pitches and tick counts, so they are independent of how the
//! source happened to abbreviate them.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::duration::DurationSpec;
use crate::pitch::{name_to_pitch, Accidental};
use crate::profile::FormatProfile;
use crate::token::Token;
use crate::volume::Volume;

/// Lexical rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Comment,
    Note,
    Rest,
    PitchLiteral,
    Length,
    Octave,
    Volume,
    Tempo,
    Tie,
    OctaveDown,
    OctaveUp,
    NextVoice,
}

static RULES: OnceLock<Vec<(Rule, Regex)>> = OnceLock::new();

fn rules() -> &'static [(Rule, Regex)] {
    RULES.get_or_init(|| {
        [
            (Rule::Comment, r"^/\*[\s\S]*?\*/"),
            (Rule::Note, r"^([A-Ga-g])([+#-]?)([0-9]*\.*)"),
            (Rule::Rest, r"^[Rr]([0-9]*\.*)"),
            (Rule::PitchLiteral, r"^[Nn]([0-9]+)"),
            (Rule::Length, r"^[Ll]([0-9]+\.*)"),
            (Rule::Octave, r"^[Oo](-?[0-9]+)"),
            (Rule::Volume, r"^[Vv]([0-9]+)"),
            (Rule::Tempo, r"^[Tt]([0-9]+)"),
            (Rule::Tie, r"^&"),
            (Rule::OctaveDown, r"^<"),
            (Rule::OctaveUp, r"^>"),
            (Rule::NextVoice, r"^,"),
        ]
        .into_iter()
        .map(|(rule, pattern)| (rule, Regex::new(pattern).expect("invalid regex pattern")))
        .collect()
    })
}

/// Running state while scanning one voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    pub octave: i32,
    pub duration: DurationSpec,
    pub volume: Volume,
    pub tempo: u32,
    /// Ticks elapsed since the start of the current voice.
    pub time: u64,
}

impl ParseState {
    pub fn initial(profile: &FormatProfile) -> Self {
        let defaults = &profile.default_state;
        Self {
            octave: defaults.octave,
            duration: defaults.duration,
            volume: defaults.volume,
            tempo: defaults.tempo,
            time: 0,
        }
    }

    /// Enter the next voice: time restarts, the rest resets unless shared.
    fn next_voice(&mut self, profile: &FormatProfile) {
        if !profile.voices_share_state {
            *self = Self::initial(profile);
        }
        self.time = 0;
    }

    /// Note length for a `[0-9]*\.*` suffix.
    ///
    /// An empty suffix keeps the current length and bare dots extend it.
    /// Denominators are clamped to the profile's minimum note length; a
    /// zero or out-of-range number keeps the current denominator.
    fn length_for(&self, suffix: &str, profile: &FormatProfile) -> DurationSpec {
        let digits_end = suffix
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(suffix.len());
        let (digits, dots) = suffix.split_at(digits_end);
        let dots = dots.len() as u32;
        if digits.is_empty() {
            return self.duration.with_extra_dots(dots);
        }
        match digits.parse::<u32>() {
            Ok(denominator) if denominator > 0 => DurationSpec::new(
                denominator.min(profile.minimum_note_duration.max(1)),
                dots,
            ),
            _ => self.duration.with_extra_dots(dots),
        }
    }

    fn emit_note(&mut self, pitch: i32, ticks: u32) -> Token {
        let token = Token::note(pitch, ticks, self.volume, self.time);
        self.time += u64::from(ticks);
        token
    }

    fn emit_rest(&mut self, ticks: u32) -> Token {
        let token = Token::rest(ticks, self.time);
        self.time += u64::from(ticks);
        token
    }
}

/// Parse MML text into absolute tokens.
///
/// Pitches include the profile's transposition and tick counts use its tick
/// resolution. Characters no rule recognises are dropped.
///
/// # Examples
/// ```
/// use mmlopt_core::parse::parse;
/// use mmlopt_core::profile::FormatProfile;
///
/// let profile = FormatProfile::archeage();
/// assert_eq!(parse("@#$ ccc !|/", &profile), parse("ccc", &profile));
/// ```
pub fn parse(text: &str, profile: &FormatProfile) -> Vec<Token> {
    let mut state = ParseState::initial(profile);
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut voice = 0usize;

    while let Some(first) = rest.chars().next() {
        let matched = rules()
            .iter()
            .find_map(|(rule, regex)| regex.captures(rest).map(|caps| (*rule, caps)));

        let consumed = match matched {
            Some((rule, caps)) => {
                let consumed = caps.get(0).map_or(first.len_utf8(), |m| m.end());
                if let Some(token) = apply(rule, &caps, &mut state, profile) {
                    if token == Token::NextVoice {
                        log::trace!(
                            "voice {} ends after {} ticks, {} tokens so far",
                            voice,
                            state.time,
                            tokens.len()
                        );
                        voice += 1;
                        state.next_voice(profile);
                    }
                    tokens.push(token);
                }
                consumed.max(1)
            }
            None => first.len_utf8(),
        };
        rest = &rest[consumed..];
    }

    log::trace!("parsed {} voices into {} tokens", voice + 1, tokens.len());
    tokens
}

/// Update `state` for one matched rule, returning the token it produces.
fn apply(
    rule: Rule,
    caps: &Captures<'_>,
    state: &mut ParseState,
    profile: &FormatProfile,
) -> Option<Token> {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    match rule {
        Rule::Comment => None,
        Rule::Note => {
            let letter = group(1).chars().next()?;
            let accidental = Accidental::from_symbol(group(2).chars().next());
            let pitch =
                name_to_pitch(letter, accidental, state.octave)?.checked_add(profile.transpose)?;
            let ticks = state.length_for(group(3), profile).ticks(profile);
            Some(state.emit_note(pitch, ticks))
        }
        Rule::Rest => {
            let ticks = state.length_for(group(1), profile).ticks(profile);
            Some(state.emit_rest(ticks))
        }
        Rule::PitchLiteral => {
            let pitch = group(1)
                .parse::<i32>()
                .ok()?
                .checked_add(profile.transpose)?;
            let ticks = state.duration.ticks(profile);
            Some(state.emit_note(pitch, ticks))
        }
        Rule::Length => {
            state.duration = state.length_for(group(1), profile);
            None
        }
        Rule::Octave => {
            if let Some(octave) = group(1)
                .parse::<i32>()
                .ok()
                .and_then(|octave| octave.checked_add(profile.octave_offset))
            {
                state.octave = octave;
            }
            None
        }
        Rule::Volume => {
            let level = group(1).parse::<u32>().ok()?;
            state.volume = Volume::new(level, profile.max_volume);
            Some(Token::Volume {
                volume: state.volume,
                time: state.time,
            })
        }
        Rule::Tempo => {
            let tempo = group(1).parse::<u32>().ok()?;
            state.tempo = tempo;
            Some(Token::Tempo {
                tempo,
                time: state.time,
            })
        }
        Rule::Tie => Some(Token::Tie),
        Rule::OctaveDown => {
            state.octave = state.octave.saturating_sub(1);
            None
        }
        Rule::OctaveUp => {
            state.octave = state.octave.saturating_add(1);
            None
        }
        Rule::NextVoice => Some(Token::NextVoice),
    }
}
