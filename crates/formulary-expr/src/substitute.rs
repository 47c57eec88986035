//! Substitution of bound values into expression text
//!
//! The output is for display only and is never parsed again.

use formulary_core::{format_number, InputMap};
use lazy_regex::regex_replace_all;

/// Replace every whole-token occurrence of a bound key with its value.
///
/// Tokens are maximal runs of the characters the lexer allows in an
/// identifier (letters, numerals and `_`), so a key only ever matches a
/// complete identifier: `m` leaves `m_rich` untouched whatever the map order.
/// Replacement text is not scanned again.
///
/// ```rust
/// use formulary_core::InputMap;
/// use formulary_expr::substitute;
///
/// let inputs = InputMap::from([("m", 2.0), ("m_rich", 12.0)]);
/// assert_eq!(substitute("m_rich - m", &inputs), "12 - 2");
/// ```
pub fn substitute(expression: &str, inputs: &InputMap) -> String {
    regex_replace_all!(
        r"[\p{Alphabetic}\p{N}_]+",
        expression,
        |token: &str| match inputs.get(token) {
            Some(value) => format_number(value),
            None => token.to_string(),
        }
    )
    .into_owned()
}
