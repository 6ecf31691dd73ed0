//! Optimize command implementation
//!
//! Reads MML from a file or stdin, converts it between dialects and writes
//! the shortest equivalent text (or its tokens) to a file or stdout.

use anyhow::{Context, Result};
use colored::Colorize;
use mmlopt_core::{convert_with_report, ConversionReport, ConvertOptions, FormatProfile};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use crate::{Cli, Emit};

/// Resolve both dialects and the transposition from the command line.
pub fn options_for(cli: &Cli) -> Result<ConvertOptions> {
    let input = load_profile(cli.input_format())?;
    let output = load_profile(cli.output_format())?;
    Ok(ConvertOptions::new(input, output).with_transpose(cli.transpose))
}

fn load_profile(name_or_path: &str) -> Result<FormatProfile> {
    FormatProfile::load(name_or_path)
        .with_context(|| format!("Failed to load MML format: {}", name_or_path))
}

/// Read the whole input. Invalid UTF-8 is replaced, matching the parser's
/// tolerance for unknown characters.
fn read_source(infile: Option<&str>) -> Result<String> {
    let bytes = match infile {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read input file: {}", path))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Text to write for a finished conversion.
pub fn render_output(report: &ConversionReport, emit: Emit) -> Result<String> {
    match emit {
        Emit::Text => Ok(report.text.clone()),
        Emit::Tokens => {
            let json = serde_json::to_string_pretty(&report.tokens)
                .context("Failed to serialize tokens")?;
            Ok(json + "\n")
        }
    }
}

fn write_output(outfile: Option<&str>, text: &str) -> Result<()> {
    match outfile {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write to: {}", path))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

fn print_stats(report: &ConversionReport, options: &ConvertOptions) {
    eprintln!(
        "{} {} -> {}: {} -> {} chars ({:.1}%), {} tokens, {} nodes expanded",
        "Optimized".green().bold(),
        options.input.name,
        options.output.name,
        report.input_len,
        report.output_len,
        report.ratio() * 100.0,
        report.parsed_tokens,
        report.expanded
    );
}

/// Run the optimize command
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let options = options_for(cli)?;
    let source = read_source(cli.infile.as_deref())?;

    let report = convert_with_report(&source, &options).context("Failed to optimize MML")?;
    log::info!(
        "converted {} chars of {} to {} chars of {}",
        report.input_len,
        options.input.name,
        report.output_len,
        options.output.name
    );

    let output = render_output(&report, cli.emit)?;
    write_output(cli.outfile.as_deref(), &output)?;

    if cli.stats {
        print_stats(&report, &options);
    }

    Ok(ExitCode::SUCCESS)
}
