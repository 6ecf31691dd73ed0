//! Token sequence to MML text.

use crate::profile::FormatProfile;
use crate::render::RenderState;
use crate::token::Token;

/// Render `tokens` as text, abbreviating everything relative to the running
/// octave, length, volume and tempo.
///
/// # Examples
/// ```
/// use mmlopt_core::generate::generate;
/// use mmlopt_core::parse::parse;
/// use mmlopt_core::profile::FormatProfile;
///
/// let profile = FormatProfile::archeage();
/// assert_eq!(generate(&parse("c4d4e4f4", &profile), &profile), "cdef");
/// ```
pub fn generate(tokens: &[Token], profile: &FormatProfile) -> String {
    let mut state = RenderState::initial(profile);
    tokens
        .iter()
        .map(|token| state.render(token, profile))
        .collect()
}
