//! Logger setup for the binary.
//!
//! Log records from the core library go to stderr through `env_logger`. The
//! level comes from `-v`/`-q`; `RUST_LOG`, when set, refines it per module.

use log::{LevelFilter, SetLoggerError};

/// Level for `-v` repetitions, or `Error` only when quiet.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger at `level`.
///
/// Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init()
}
