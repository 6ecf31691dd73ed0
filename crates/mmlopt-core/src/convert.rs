//! The full parse, optimize and generate pipeline.

use serde::Serialize;

use crate::error::OptimizeError;
use crate::generate::generate;
use crate::optimize::optimize_with_stats;
use crate::parse::parse;
use crate::profile::FormatProfile;
use crate::token::Token;

/// Profiles and transposition for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Dialect the source text is written in.
    pub input: FormatProfile,
    /// Dialect to write.
    pub output: FormatProfile,
    /// Semitones added to every pitch.
    pub transpose: i32,
}

impl ConvertOptions {
    pub fn new(input: FormatProfile, output: FormatProfile) -> Self {
        Self {
            input,
            output,
            transpose: 0,
        }
    }

    pub fn with_transpose(mut self, transpose: i32) -> Self {
        self.transpose = transpose;
        self
    }

    /// Input profile with the output's tick resolution, so that parsed
    /// lengths are in output ticks.
    pub fn parse_profile(&self) -> FormatProfile {
        self.input
            .with_timing_of(&self.output)
            .with_transpose(self.input.transpose.saturating_add(self.transpose))
    }
}

/// Outcome of [`convert_with_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Optimized text.
    pub text: String,
    /// Tokens the text was generated from.
    pub tokens: Vec<Token>,
    /// Characters in the source text.
    pub input_len: usize,
    /// Characters in the optimized text.
    pub output_len: usize,
    /// Tokens produced by parsing.
    pub parsed_tokens: usize,
    /// Search nodes expanded by the optimizer.
    pub expanded: usize,
}

impl ConversionReport {
    /// Output length as a fraction of the input length.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            1.0
        } else {
            self.output_len as f64 / self.input_len as f64
        }
    }
}

/// Convert `source` and keep the intermediate results.
pub fn convert_with_report(
    source: &str,
    options: &ConvertOptions,
) -> Result<ConversionReport, OptimizeError> {
    let parsed = parse(source, &options.parse_profile());
    let optimized = optimize_with_stats(&parsed, &options.output)?;
    let text = generate(&optimized.tokens, &options.output);

    Ok(ConversionReport {
        input_len: source.chars().count(),
        output_len: text.chars().count(),
        parsed_tokens: parsed.len(),
        expanded: optimized.expanded,
        tokens: optimized.tokens,
        text,
    })
}

/// Re-encode `source` from the `input` dialect into the shortest equivalent
/// text in the `output` dialect.
///
/// # Examples
/// ```
/// use mmlopt_core::convert::convert;
/// use mmlopt_core::profile::FormatProfile;
///
/// let aa = FormatProfile::archeage();
/// let mabi = FormatProfile::mabinogi();
/// assert_eq!(convert("c8c8c8c4c8c8c8", &aa, &aa, 0).unwrap(), "l8cccc4ccc");
/// assert_eq!(convert("v15o2g", &aa, &mabi, 0).unwrap(), "v2o2g");
/// ```
pub fn convert(
    source: &str,
    input: &FormatProfile,
    output: &FormatProfile,
    transpose: i32,
) -> Result<String, OptimizeError> {
    let options = ConvertOptions::new(input.clone(), output.clone()).with_transpose(transpose);
    convert_with_report(source, &options).map(|report| report.text)
}
