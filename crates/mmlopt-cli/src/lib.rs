//! mmlopt CLI library.
//!
//! Argument definitions and the conversion command behind the `mmlopt`
//! binary, kept in a library so they can be tested without spawning it.

pub mod commands;
pub mod logger;

use clap::{Parser, ValueEnum};

/// What to write for the converted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Emit {
    /// Optimized MML text
    #[default]
    Text,
    /// Optimized token sequence as pretty JSON
    Tokens,
}

/// Re-encode MML into the shortest equivalent text for a game dialect
#[derive(Debug, Parser)]
#[command(name = "mmlopt")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Supported formats:\n\n    aa         ArcheAge (default)\n    mabi       Mabinogi\n\nA path ending in .json loads a custom format.")]
pub struct Cli {
    /// Input file (default: stdin)
    #[arg(short = 'i', long)]
    pub infile: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    pub outfile: Option<String>,

    /// Input and output MML format
    #[arg(short = 'f', long, conflicts_with_all = ["infmt", "outfmt"])]
    pub format: Option<String>,

    /// Input MML format
    #[arg(short = 'I', long)]
    pub infmt: Option<String>,

    /// Output MML format
    #[arg(short = 'O', long)]
    pub outfmt: Option<String>,

    /// Semitones to transpose by while parsing
    #[arg(short = 't', long, default_value_t = 0, allow_negative_numbers = true)]
    pub transpose: i32,

    /// Output kind
    #[arg(long, value_enum, default_value_t = Emit::Text)]
    pub emit: Emit,

    /// Print a size summary to stderr
    #[arg(long)]
    pub stats: bool,

    /// List supported formats and exit
    #[arg(long)]
    pub list_formats: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Format name or profile path for the input side.
    pub fn input_format(&self) -> &str {
        self.format
            .as_deref()
            .or(self.infmt.as_deref())
            .unwrap_or(DEFAULT_FORMAT)
    }

    /// Format name or profile path for the output side.
    pub fn output_format(&self) -> &str {
        self.format
            .as_deref()
            .or(self.outfmt.as_deref())
            .unwrap_or(DEFAULT_FORMAT)
    }
}

/// Format used when none is given.
pub const DEFAULT_FORMAT: &str = "aa";
