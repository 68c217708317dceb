//! The three translation operations and the suggestion parser.
//!
//! Each operation is one prompt-construction step, one blocking round trip
//! to the completion endpoint, and (for suggestions) one line-oriented parse
//! of the response. No retries, no feedback loops: a failed round trip
//! surfaces once and the action terminates.

use std::collections::BTreeMap;

use crate::client::CompletionClient;
use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::meanings::MeaningTable;

/// Result of parsing a proposition-suggestion completion.
///
/// `meanings` is the raw parsed mapping; keys are NOT filtered to
/// single-uppercase letters here. That policy belongs to the composing
/// layer, applied before merging into the session table.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SuggestionParse {
    /// Accepted `SYMBOL = "description"` entries, later duplicates winning
    pub meanings: BTreeMap<String, String>,
    /// Non-blank lines that did not yield an entry
    pub skipped: usize,
}

/// Stateless translation front end over a completion client. Holds no
/// mutable state; the meanings table is a parameter of every call.
pub struct Translator<'a> {
    config: &'a TranslatorConfig,
    client: &'a dyn CompletionClient,
}

impl<'a> Translator<'a> {
    pub fn new(config: &'a TranslatorConfig, client: &'a dyn CompletionClient) -> Self {
        Self { config, client }
    }

    /// Translate a natural-language sentence into a CPC formula.
    ///
    /// Returns the model's formula verbatim (trimmed). No validation is
    /// applied to the output here; callers decide whether to re-check it
    /// against the alphabet.
    pub async fn nl_to_cpc(
        &self,
        sentence: &str,
        meanings: &MeaningTable,
    ) -> Result<String, TranslateError> {
        let prompt = nl_to_cpc_prompt(sentence, meanings);
        tracing::info!(sentence_chars = sentence.len(), "Translating sentence to formula");

        let completion = self.client.complete(&prompt, self.config.temperature).await?;
        Ok(completion.trim().to_string())
    }

    /// Translate a CPC formula into one natural-language sentence.
    ///
    /// The formula is embedded as-is; validating it beforehand is the
    /// caller's responsibility.
    pub async fn cpc_to_nl(
        &self,
        formula: &str,
        meanings: &MeaningTable,
    ) -> Result<String, TranslateError> {
        let prompt = cpc_to_nl_prompt(formula, meanings, &self.config.language);
        tracing::info!(formula = %formula, "Translating formula to sentence");

        let completion = self.client.complete(&prompt, self.config.temperature).await?;
        Ok(completion.trim().to_string())
    }

    /// Ask the model to propose atomic propositions for a sentence and parse
    /// the line-oriented response. Malformed lines are dropped silently; the
    /// result carries only a count of them.
    pub async fn suggest_propositions(
        &self,
        sentence: &str,
    ) -> Result<SuggestionParse, TranslateError> {
        let prompt = suggestion_prompt(sentence);
        tracing::info!(sentence_chars = sentence.len(), "Requesting proposition suggestions");

        let completion = self.client.complete(&prompt, self.config.temperature).await?;
        let parse = parse_suggestions(&completion);
        if parse.skipped > 0 {
            tracing::debug!(skipped = parse.skipped, "Dropped malformed suggestion lines");
        }
        Ok(parse)
    }
}

fn nl_to_cpc_prompt(sentence: &str, meanings: &MeaningTable) -> String {
    let rules = "Rules:\n\
         - Use atomic propositions named P, Q, R, S, T...\n\
         - Allowed operators: ¬, ∧, V, →, ↔\n\
         - Use parentheses only where needed.\n\
         - Do NOT explain. Return the formula only.";

    match render_meanings_lines(meanings) {
        Some(context) => format!(
            "You are a translator specialized in propositional logic.\n\n\
             Convert the text below into a formula of Classical Propositional Calculus (CPC).\n\n\
             {rules}\n\n\
             Symbols already in use, reuse them where the text matches:\n{context}\n\
             Text: \"{sentence}\"\n\n\
             If the text is ambiguous, keep the simplest possible form."
        ),
        None => format!(
            "You are a translator specialized in propositional logic.\n\n\
             Convert the text below into a formula of Classical Propositional Calculus (CPC).\n\n\
             {rules}\n\n\
             Text: \"{sentence}\"\n\n\
             If the text is ambiguous, keep the simplest possible form."
        ),
    }
}

fn cpc_to_nl_prompt(formula: &str, meanings: &MeaningTable, language: &str) -> String {
    let serialized = serde_json::to_string_pretty(&meanings.valid_view())
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a translator specialized in propositional logic.\n\n\
         Explain the formula below in clear {language}.\n\n\
         Formula: {formula}\n\n\
         Substitute the symbols using:\n{serialized}\n\n\
         Return one natural, clear sentence."
    )
}

fn suggestion_prompt(sentence: &str) -> String {
    format!(
        "Analyze the sentence below and suggest atomic propositions (P, Q, R...) with descriptions.\n\n\
         Format:\n\
         P = \"...\"\n\
         Q = \"...\"\n\
         R = \"...\"\n\n\
         Text: \"{sentence}\""
    )
}

/// One line of the valid meanings view per entry, `SYMBOL = "description"`.
/// None when no entry survives the valid-view filter.
fn render_meanings_lines(meanings: &MeaningTable) -> Option<String> {
    let view = meanings.valid_view();
    if view.is_empty() {
        return None;
    }

    let mut lines = String::new();
    for (symbol, description) in view {
        lines.push_str(&format!("{symbol} = \"{description}\"\n"));
    }
    Some(lines)
}

/// Best-effort parse of `SYMBOL = "description"` completion lines.
///
/// A line is considered only if it contains an `=`; the split happens at the
/// FIRST `=` so descriptions may themselves contain `=`. Both sides are
/// trimmed, every single- and double-quote character is stripped from the
/// description side, and a line that leaves either side empty is dropped.
/// Later duplicate symbols overwrite earlier ones.
pub fn parse_suggestions(completion: &str) -> SuggestionParse {
    let mut parse = SuggestionParse::default();

    for line in completion.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let Some((symbol, description)) = line.split_once('=') else {
            parse.skipped += 1;
            continue;
        };

        let symbol = symbol.trim();
        let description: String = description
            .trim()
            .chars()
            .filter(|c| *c != '"' && *c != '\'')
            .collect();

        if symbol.is_empty() || description.is_empty() {
            parse.skipped += 1;
            continue;
        }

        parse.meanings.insert(symbol.to_string(), description);
    }

    parse
}
