//! Formulate Core - natural language <-> propositional logic translation.
//!
//! All linguistic and logical reasoning is delegated to a hosted completion
//! endpoint; this crate builds the prompts, parses the responses back into
//! structured data, and checks formulas against a fixed symbol alphabet.
//! There is no formula AST and no solver: a formula is an opaque string.

pub mod client;
pub mod config;
pub mod error;
pub mod formula;
pub mod meanings;
pub mod translate;

pub use client::{CompletionClient, GroqClient};
pub use config::TranslatorConfig;
pub use error::TranslateError;
pub use formula::{check_model_formula, extract_symbols, is_valid_formula};
pub use meanings::MeaningTable;
pub use translate::{parse_suggestions, SuggestionParse, Translator};
