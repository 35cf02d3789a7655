//! Significant figure counter
//!
//! Rules:
//! - non-zero digits are always significant
//! - zeros between non-zero digits are significant
//! - leading zeros are never significant
//! - trailing zeros count only when the literal has a decimal point
//! - exponent digits never count

use serde::Serialize;

use crate::normalizer;

/// Count the significant figures of a single numeric literal
///
/// The input is expected to be one isolated literal (optional sign, decimal
/// point, `e`/`E` exponent). Anything else gives an unspecified count.
///
/// ```
/// use sigfig_calc::count_significant_figures;
///
/// assert_eq!(count_significant_figures("673.52"), 5);
/// assert_eq!(count_significant_figures("0.0025"), 2);
/// assert_eq!(count_significant_figures("100"), 1);
/// assert_eq!(count_significant_figures("30.00"), 4);
/// ```
pub fn count_significant_figures(text: &str) -> usize {
    let text = text.trim();

    if let Some(marker) = text.find(|c: char| matches!(c, 'e' | 'E')) {
        return count_significant_figures(&text[..marker]);
    }

    let unsigned = text
        .strip_prefix(|c: char| matches!(c, '+' | '-'))
        .unwrap_or(text);
    let digits = unsigned.trim_start_matches('0');

    if digits.contains('.') {
        // Zeros between the point and the first non-zero digit are placeholders
        digits.replacen('.', "", 1).trim_start_matches('0').len()
    } else {
        digits.trim_end_matches('0').len()
    }
}

/// A literal from an expression paired with its significant figure count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralCount {
    pub literal: String,
    pub figures: usize,
}

/// Count the significant figures of every literal typed in an expression
///
/// Each literal is counted on its own; nothing is propagated through the
/// operators between them.
pub fn count_literals(expression: &str) -> Vec<LiteralCount> {
    normalizer::literals(expression)
        .into_iter()
        .map(|literal| LiteralCount {
            literal: literal.to_string(),
            figures: count_significant_figures(literal),
        })
        .collect()
}
