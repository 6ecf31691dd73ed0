//! mmlopt core - shortest-text re-encoding of game MML
//!
//! This crate rewrites music macro language (MML) text into the shortest
//! equivalent text for a target game's dialect. Conversion is a three-stage
//! pipeline:
//!
//! 1. [`parse`] scans the source into absolute [`Token`]s (pitches in
//!    semitones, lengths in ticks), independent of how the source abbreviated
//!    them.
//! 2. [`optimize`] searches for the cheapest placement of octave and length
//!    changes with A*, where every edge costs exactly the characters it adds.
//! 3. [`generate`] renders the chosen tokens relative to the running state.
//!
//! The optimizer's cost function and the generator share one renderer
//! ([`render::RenderState`]), so the search minimises the length of the text
//! that is actually written.
//!
//! # Example
//!
//! ```
//! use mmlopt_core::{convert, FormatProfile};
//!
//! let aa = FormatProfile::archeage();
//! let out = convert("o1c>>>c<<<c", &aa, &aa, 0).unwrap();
//! assert_eq!(out, "o1co4co1c");
//! ```
//!
//! # Module Structure
//!
//! - [`profile`]: Dialect settings and the built-in dialect registry
//! - [`duration`]: Note lengths, tick counts and their spellings
//! - [`pitch`]: Note names and octave ambiguity
//! - [`volume`]: Exact volume fractions and integer rendering
//! - [`token`]: The absolute token model
//! - [`render`]: Shared token-to-text step
//! - [`parse`]: MML text to tokens
//! - [`search`]: Generic A* search
//! - [`optimize`]: The re-spelling search
//! - [`generate`]: Tokens to MML text
//! - [`convert`]: The full pipeline

pub mod convert;
pub mod duration;
pub mod error;
pub mod generate;
pub mod optimize;
pub mod parse;
pub mod pitch;
pub mod profile;
pub mod render;
pub mod search;
pub mod token;
pub mod volume;

// Re-export main types
pub use convert::{convert, convert_with_report, ConversionReport, ConvertOptions};
pub use duration::{all_spellings_for_ticks, duration_to_ticks, relative_spelling, DurationSpec};
pub use error::{OptimizeError, ProfileError};
pub use generate::generate;
pub use optimize::{optimize, optimize_with_stats, Optimized, SearchNode};
pub use parse::parse;
pub use profile::{DefaultState, FormatProfile, DIALECTS};
pub use token::{NoteEvent, RestEvent, Token};
pub use volume::Volume;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
