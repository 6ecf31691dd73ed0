//! Exact volume fractions and their rendering on a dialect's integer scale.
//!
//! A volume is kept as `numerator / denominator` on the scale it was read
//! from, so converting between dialects rounds exactly once.

use serde::{Deserialize, Serialize};

/// Volume as an exact fraction of the source dialect's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Volume {
    pub numerator: u32,
    pub denominator: u32,
}

impl Volume {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Integer volume on a `0..=max_volume` scale, preferring one fewer digit.
    ///
    /// The value is rounded half-up. If the rounded value has `k` digits and
    /// the next quieter source step would already round below `10^(k-1) - 1`,
    /// the largest `k-1`-digit value is used instead: 12/15 on a 127 scale
    /// renders as `99` rather than `102`.
    ///
    /// # Examples
    /// ```
    /// use mmlopt_core::volume::Volume;
    ///
    /// assert_eq!(Volume::new(12, 15).render(127), 99);
    /// assert_eq!(Volume::new(100, 127).render(15), 12);
    /// assert_eq!(Volume::new(15, 15).render(127), 127);
    /// ```
    pub fn render(&self, max_volume: u32) -> u32 {
        let rounded = round_ratio(i128::from(self.numerator), self.denominator, max_volume);
        let digits = rounded.to_string().len() as u32;
        let fudged = 10i128.pow(digits - 1) - 1;
        let quieter = round_ratio(i128::from(self.numerator) - 1, self.denominator, max_volume);
        let chosen = if quieter < fudged { fudged } else { rounded };
        u32::try_from(chosen.max(0)).unwrap_or(u32::MAX)
    }
}

/// `round(numerator * max / denominator)` with halves rounded toward +inf.
fn round_ratio(numerator: i128, denominator: u32, max: u32) -> i128 {
    let denominator = i128::from(denominator.max(1));
    let scaled = numerator * i128::from(max);
    (2 * scaled + denominator).div_euclid(2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_same_scale() {
        assert_eq!(Volume::new(100, 127).render(127), 100);
        assert_eq!(Volume::new(12, 15).render(15), 12);
        assert_eq!(Volume::new(15, 127).render(127), 15);
    }

    #[test]
    fn test_render_down_scale() {
        assert_eq!(Volume::new(100, 127).render(15), 12);
        assert_eq!(Volume::new(15, 127).render(15), 2);
    }

    #[test]
    fn test_render_up_scale() {
        assert_eq!(Volume::new(15, 15).render(127), 127);
        assert_eq!(Volume::new(8, 15).render(127), 68);
    }

    #[test]
    fn test_fudge_drops_a_digit() {
        // 12/15 * 127 = 101.6 -> 102, but 11/15 * 127 = 93.1 rounds below 99
        assert_eq!(Volume::new(12, 15).render(127), 99);
    }

    #[test]
    fn test_no_fudge_when_quieter_step_is_too_loud() {
        // 14/15 * 127 = 118.5 -> 119, still three digits
        assert_eq!(Volume::new(15, 15).render(127), 127);
        assert_eq!(Volume::new(14, 15).render(127), 119);
    }

    #[test]
    fn test_zero_volume() {
        assert_eq!(Volume::new(0, 15).render(127), 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_ratio(1, 2, 1), 1);
        assert_eq!(round_ratio(1, 4, 1), 0);
        assert_eq!(round_ratio(3, 4, 1), 1);
        assert_eq!(round_ratio(-1, 2, 1), 0);
    }
}
