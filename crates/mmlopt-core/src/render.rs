//! Text of a single token relative to the running render state.
//!
//! This is the one place where token text is produced. The optimizer measures
//! edge costs with it and the generator concatenates its output, so the
//! search minimises exactly the length of the text that gets written.

use crate::duration::{relative_spelling, DurationSpec};
use crate::pitch::{pitch_to_name, valid_octaves};
use crate::profile::FormatProfile;
use crate::token::Token;
use crate::volume::Volume;

/// Octave, length, volume and tempo in effect at some point of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub octave: i32,
    pub duration: DurationSpec,
    pub volume: Volume,
    pub tempo: u32,
}

impl RenderState {
    /// State at the start of the first voice.
    pub fn initial(profile: &FormatProfile) -> Self {
        let defaults = &profile.default_state;
        Self {
            octave: defaults.octave,
            duration: defaults.duration,
            volume: defaults.volume,
            tempo: defaults.tempo,
        }
    }

    /// State after a voice boundary.
    pub fn next_voice(self, profile: &FormatProfile) -> Self {
        if profile.voices_share_state {
            self
        } else {
            Self::initial(profile)
        }
    }

    /// Render `token` and advance the state past it.
    ///
    /// A note whose pitch cannot be spelled from the current octave is
    /// preceded by a change to the nearest octave that can spell it.
    pub fn render(&mut self, token: &Token, profile: &FormatProfile) -> String {
        match token {
            Token::Note(note) => {
                let mut text = String::new();
                if pitch_to_name(note.pitch, self.octave).is_none() {
                    let target = nearest_octave(note.pitch, self.octave);
                    text.push_str(&octave_text(target, self.octave, profile));
                    self.octave = target;
                }
                text.push_str(&note_text(
                    note.pitch,
                    note.ticks,
                    self.octave,
                    self.duration,
                    profile,
                ));
                text
            }
            Token::Rest(rest) => rest_text(rest.ticks, self.duration, profile),
            Token::Duration { duration, .. } => {
                let text = duration_text(*duration, self.duration);
                self.duration = *duration;
                text
            }
            Token::Octave { octave, .. } => {
                let text = octave_text(*octave, self.octave, profile);
                self.octave = *octave;
                text
            }
            Token::Volume { volume, .. } => {
                let text = volume_text(*volume, self.volume, profile);
                self.volume = *volume;
                text
            }
            Token::Tempo { tempo, .. } => {
                let text = tempo_text(*tempo, self.tempo);
                self.tempo = *tempo;
                text
            }
            Token::Tie => "&".to_string(),
            Token::NextVoice => {
                *self = self.next_voice(profile);
                ",".to_string()
            }
        }
    }

    /// Text `token` would produce from this state, without advancing it.
    pub fn text_of(&self, token: &Token, profile: &FormatProfile) -> String {
        let mut scratch = *self;
        scratch.render(token, profile)
    }
}

/// Note name followed by its length relative to `current_duration`.
///
/// The caller guarantees that `pitch` is spellable from `octave`.
pub fn note_text(
    pitch: i32,
    ticks: u32,
    octave: i32,
    current_duration: DurationSpec,
    profile: &FormatProfile,
) -> String {
    let name = pitch_to_name(pitch, octave).unwrap_or_default();
    format!(
        "{}{}",
        name,
        relative_spelling(ticks, current_duration, profile)
    )
}

pub fn rest_text(ticks: u32, current_duration: DurationSpec, profile: &FormatProfile) -> String {
    format!("r{}", relative_spelling(ticks, current_duration, profile))
}

pub fn duration_text(duration: DurationSpec, current: DurationSpec) -> String {
    if duration == current {
        String::new()
    } else {
        format!("l{}", duration)
    }
}

/// `<`/`>` for a single step, the explicit octave number otherwise.
pub fn octave_text(octave: i32, current: i32, profile: &FormatProfile) -> String {
    match i64::from(current) - i64::from(octave) {
        0 => String::new(),
        1 => "<".to_string(),
        -1 => ">".to_string(),
        _ => format!("o{}", i64::from(octave) - i64::from(profile.octave_offset)),
    }
}

/// Explicit volume unless it renders to the same integer as `current`.
pub fn volume_text(volume: Volume, current: Volume, profile: &FormatProfile) -> String {
    let rendered = volume.render(profile.max_volume);
    if rendered == current.render(profile.max_volume) {
        String::new()
    } else {
        format!("v{}", rendered)
    }
}

pub fn tempo_text(tempo: u32, current: u32) -> String {
    if tempo == current {
        String::new()
    } else {
        format!("t{}", tempo)
    }
}

/// The octave able to spell `pitch` that is closest to `current`.
fn nearest_octave(pitch: i32, current: i32) -> i32 {
    valid_octaves(pitch)
        .into_iter()
        .min_by_key(|octave| (i64::from(*octave) - i64::from(current)).abs())
        .unwrap_or_else(|| pitch.div_euclid(12))
}
