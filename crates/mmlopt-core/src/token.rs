//! Absolute, dialect-independent MML events.
//!
//! Every token carries enough information to be rendered on its own: notes
//! know their absolute pitch and length in ticks, changes know their target
//! value. Only the abbreviated text form depends on the running state.

use serde::{Deserialize, Serialize};

use crate::duration::DurationSpec;
use crate::volume::Volume;

/// A sounding note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Absolute semitone (`12 * octave` is that octave's `c`).
    pub pitch: i32,
    /// Length in ticks of the output dialect.
    pub ticks: u32,
    /// Volume in effect when the note was read.
    pub volume: Volume,
    /// Ticks from the start of the voice.
    pub time: u64,
}

/// A rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEvent {
    pub ticks: u32,
    pub time: u64,
}

/// One element of an MML token sequence.
///
/// `Duration` and `Octave` are never produced by the parser; the optimizer
/// synthesises them where a change of context pays off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Token {
    Note(NoteEvent),
    Rest(RestEvent),
    Duration { duration: DurationSpec, time: u64 },
    Octave { octave: i32, time: u64 },
    Volume { volume: Volume, time: u64 },
    Tempo { tempo: u32, time: u64 },
    Tie,
    NextVoice,
}

impl Token {
    pub fn note(pitch: i32, ticks: u32, volume: Volume, time: u64) -> Self {
        Token::Note(NoteEvent {
            pitch,
            ticks,
            volume,
            time,
        })
    }

    pub fn rest(ticks: u32, time: u64) -> Self {
        Token::Rest(RestEvent { ticks, time })
    }

    /// Ticks from voice start, for tokens that have a position.
    pub fn time(&self) -> Option<u64> {
        match self {
            Token::Note(note) => Some(note.time),
            Token::Rest(rest) => Some(rest.time),
            Token::Duration { time, .. }
            | Token::Octave { time, .. }
            | Token::Volume { time, .. }
            | Token::Tempo { time, .. } => Some(*time),
            Token::Tie | Token::NextVoice => None,
        }
    }

    /// Short lowercase name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Note(_) => "note",
            Token::Rest(_) => "rest",
            Token::Duration { .. } => "duration",
            Token::Octave { .. } => "octave",
            Token::Volume { .. } => "volume",
            Token::Tempo { .. } => "tempo",
            Token::Tie => "tie",
            Token::NextVoice => "nextVoice",
        }
    }
}
