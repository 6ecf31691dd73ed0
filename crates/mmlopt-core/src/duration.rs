//! Conversion between note-length notation and tick counts.
//!
//! A note length is written as a denominator followed by zero or more dots
//! (`4`, `8.`, `12..`). Its length in ticks is `floor(4 * tpqn / denominator)`,
//! then each dot multiplies by 1.5 with a floor after every step. Because the
//! floor is applied per dot, several spellings can land on the same tick
//! count (`12`, `18.` and `27..` are all 166 ticks at 500 ticks per quarter).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::FormatProfile;

/// A note length: denominator plus dot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationSpec {
    pub denominator: u32,
    pub dots: u32,
}

impl DurationSpec {
    pub const fn new(denominator: u32, dots: u32) -> Self {
        Self { denominator, dots }
    }

    /// Quarter note, the default length of every supported dialect.
    pub const fn quarter() -> Self {
        Self::new(4, 0)
    }

    /// Length of this spelling in ticks.
    pub fn ticks(&self, profile: &FormatProfile) -> u32 {
        duration_to_ticks(self.denominator, self.dots, profile)
    }

    /// This spelling with `extra` more dots appended.
    pub fn with_extra_dots(self, extra: u32) -> Self {
        Self::new(self.denominator, self.dots.saturating_add(extra))
    }

    /// Every spelling obtained by stripping one or more trailing dots,
    /// longest first (`4..` yields `4.` then `4`).
    pub fn stripped_prefixes(self) -> impl Iterator<Item = DurationSpec> {
        (0..self.dots)
            .rev()
            .map(move |dots| DurationSpec::new(self.denominator, dots))
    }

    /// Length of [`Display`](fmt::Display) output without allocating.
    pub fn text_len(&self) -> usize {
        decimal_len(self.denominator) + self.dots as usize
    }
}

impl Default for DurationSpec {
    fn default() -> Self {
        Self::quarter()
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.denominator)?;
        for _ in 0..self.dots {
            f.write_str(".")?;
        }
        Ok(())
    }
}

/// Error returned when a note-length string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note length '{0}': expected a positive number followed by optional dots")]
pub struct ParseDurationError(pub String);

impl FromStr for DurationSpec {
    type Err = ParseDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, dots) = s.split_at(digits_end);
        if digits.is_empty() || !dots.chars().all(|c| c == '.') {
            return Err(ParseDurationError(s.to_string()));
        }
        let denominator: u32 = digits
            .parse()
            .map_err(|_| ParseDurationError(s.to_string()))?;
        if denominator == 0 {
            return Err(ParseDurationError(s.to_string()));
        }
        Ok(Self::new(denominator, dots.len() as u32))
    }
}

impl TryFrom<String> for DurationSpec {
    type Error = ParseDurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationSpec> for String {
    fn from(spec: DurationSpec) -> Self {
        spec.to_string()
    }
}

/// Convert a denominator and dot count to ticks.
///
/// Each dot is applied as its own `floor(ticks * 1.5)` step; computing
/// `1.5^dots` up front gives different results.
///
/// # Examples
/// ```
/// use mmlopt_core::duration::duration_to_ticks;
/// use mmlopt_core::profile::FormatProfile;
///
/// let profile = FormatProfile::archeage();
/// assert_eq!(duration_to_ticks(4, 0, &profile), 500);
/// assert_eq!(duration_to_ticks(4, 1, &profile), 750);
/// assert_eq!(duration_to_ticks(2, 3, &profile), 3375);
/// ```
pub fn duration_to_ticks(denominator: u32, dots: u32, profile: &FormatProfile) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let mut ticks = profile.tpqn.saturating_mul(4) / denominator;
    for _ in 0..dots {
        // floor(ticks * 1.5) in integer arithmetic
        ticks = ticks.saturating_add(ticks / 2);
    }
    ticks
}

/// Every spelling whose length is exactly `ticks`, in increasing dot count.
///
/// For each dot count the denominators that could possibly map to `ticks` lie
/// in `(growth*4*tpqn / (ticks + 3*growth - 2), growth*4*tpqn / ticks]` with
/// `growth = 1.5^dots`. The part of that range up to the profile's minimum
/// note denominator is scanned downward and the first (largest) exact match
/// is kept. Enumeration stops once the whole range lies above the minimum
/// denominator, which is exactly when the minimum denominator with that many
/// dots is already longer than `ticks`.
///
/// # Examples
/// ```
/// use mmlopt_core::duration::all_spellings_for_ticks;
/// use mmlopt_core::profile::FormatProfile;
///
/// let profile = FormatProfile::archeage();
/// let spellings: Vec<String> = all_spellings_for_ticks(166, &profile)
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(spellings, ["12", "18.", "27.."]);
/// ```
pub fn all_spellings_for_ticks(ticks: u32, profile: &FormatProfile) -> Vec<DurationSpec> {
    let mut spellings = Vec::new();
    if ticks == 0 {
        return spellings;
    }

    let whole = 4.0 * f64::from(profile.tpqn);
    let target = f64::from(ticks);
    let minimum = profile.minimum_note_duration.max(1);

    let mut shortest = 0;
    for dots in 0u32.. {
        // Shortest length any allowed denominator reaches with this many dots.
        let floor = duration_to_ticks(minimum, dots, profile);
        if floor > ticks || (dots > 0 && floor == shortest) {
            // Too long from here on, or stuck (saturated or zero-length).
            break;
        }
        shortest = floor;

        let growth = 1.5f64.powi(dots as i32);
        let upper_incl = growth * whole / target;
        let lower_excl = growth * whole / (target + 3.0 * growth - 2.0);

        // Start one above the float bound; every candidate is checked exactly.
        let start = (upper_incl.floor() as u64)
            .saturating_add(1)
            .min(u64::from(minimum));
        let stop = (lower_excl.floor() as u64).max(1);
        let mut n = start;
        while n >= stop {
            if let Ok(denominator) = u32::try_from(n) {
                if duration_to_ticks(denominator, dots, profile) == ticks {
                    spellings.push(DurationSpec::new(denominator, dots));
                    break;
                }
            }
            n -= 1;
        }
    }

    spellings
}

/// Text needed to express `candidate` while `current` is the active length.
///
/// Empty when they are equal, only the extra dots when `candidate` is
/// `current` with more dots, otherwise the full spelling.
pub fn relative_text(candidate: DurationSpec, current: DurationSpec) -> String {
    if candidate == current {
        String::new()
    } else if candidate.denominator == current.denominator && candidate.dots > current.dots {
        ".".repeat((candidate.dots - current.dots) as usize)
    } else {
        candidate.to_string()
    }
}

/// Shortest text expressing `ticks` relative to the active length `current`.
///
/// Ties keep the candidate with fewer dots.
///
/// # Examples
/// ```
/// use mmlopt_core::duration::{relative_spelling, DurationSpec};
/// use mmlopt_core::profile::FormatProfile;
///
/// let profile = FormatProfile::archeage();
/// assert_eq!(relative_spelling(750, DurationSpec::new(4, 0), &profile), ".");
/// assert_eq!(relative_spelling(500, DurationSpec::new(4, 0), &profile), "");
/// assert_eq!(relative_spelling(166, DurationSpec::new(18, 0), &profile), ".");
/// ```
pub fn relative_spelling(ticks: u32, current: DurationSpec, profile: &FormatProfile) -> String {
    all_spellings_for_ticks(ticks, profile)
        .into_iter()
        .map(|candidate| relative_text(candidate, current))
        .min_by_key(String::len)
        // Only reachable for tick counts no note length produces; parsed
        // lengths always have their own spelling among the candidates.
        .unwrap_or_else(|| nearest_spelling(ticks, profile).to_string())
}

/// Closest undotted spelling for a tick count that has no exact spelling.
fn nearest_spelling(ticks: u32, profile: &FormatProfile) -> DurationSpec {
    let whole = f64::from(profile.tpqn) * 4.0;
    let denominator = (whole / f64::from(ticks.max(1))).round().max(1.0) as u32;
    DurationSpec::new(denominator, 0)
}

/// Number of decimal digits in `n`.
pub(crate) fn decimal_len(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
