//! Formula helpers - symbol extraction and alphabet validation.
//!
//! A formula is an opaque string over {A-Z, ¬, ∧, V, →, ↔, parentheses,
//! whitespace}. Validation is a character-class membership check, not a
//! grammar: unbalanced parentheses, doubled operators, and connective-free
//! symbol runs like `PQ` all pass.
//!
//! The ASCII letter `V` doubles as the disjunction operator while also
//! falling inside the A-Z atom class, so `V` cannot name an atom without
//! colliding with "or". Known ambiguity, kept as-is pending a product
//! decision on the alphabet.

use regex::Regex;

use crate::error::TranslateError;

/// Word-boundary-delimited single capital letter
const ATOM_PATTERN: &str = r"\b[A-Z]\b";

/// Any character outside the fixed formula alphabet
const FOREIGN_CHAR_PATTERN: &str = r"[^A-Z¬∧V→↔()\s]";

/// Distinct atomic proposition symbols found in a formula, sorted.
///
/// Matches word-boundary-delimited single capitals, so adjacent letters as
/// in `PQ` yield nothing. Malformed input yields an empty vec.
pub fn extract_symbols(formula: &str) -> Vec<String> {
    let regex = Regex::new(ATOM_PATTERN).expect("atom pattern is valid");
    let mut symbols: Vec<String> = regex
        .find_iter(formula)
        .map(|m| m.as_str().to_string())
        .collect();
    symbols.sort();
    symbols.dedup();
    symbols
}

/// True iff every character of the formula belongs to the fixed alphabet.
pub fn is_valid_formula(formula: &str) -> bool {
    let regex = Regex::new(FOREIGN_CHAR_PATTERN).expect("alphabet pattern is valid");
    !regex.is_match(formula)
}

/// Advisory check applied to model output on the sentence -> formula path.
/// Failure means the model strayed outside the alphabet, which is reported
/// separately from user-input validation.
pub fn check_model_formula(formula: &str) -> Result<(), TranslateError> {
    if is_valid_formula(formula) {
        Ok(())
    } else {
        Err(TranslateError::ModelOutput(formula.to_string()))
    }
}
