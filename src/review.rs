use crate::engine::{Correction, GrammarCheck};
use serde::Serialize;

/// Form field prefix used to name per-word correction selections.
pub const CORRECTION_FIELD_PREFIX: &str = "correction_";

/// Ordered mapping from flagged span to suggestion list.
///
/// Iteration preserves the order the engine returned; lookup by span does not
/// depend on that order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorrectionSet {
    entries: Vec<Correction>,
}

impl CorrectionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_check(check: &GrammarCheck) -> Self {
        Self {
            entries: check.corrections.clone(),
        }
    }

    /// Builds the one-entry set used by dictionary search.
    pub fn single(word: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            entries: vec![Correction::new(word, suggestions)],
        }
    }

    pub fn get(&self, original: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.original == original)
            .map(|entry| entry.suggestions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders the checked text with every flagged span struck through.
///
/// Returns `None` when the check found nothing, so callers can distinguish
/// "clean" from "flagged but empty". Replacement is substring-based and runs
/// in engine order: a flagged span that also occurs inside an unrelated
/// larger word gets marked too, and overlapping spans resolve in whatever
/// order the engine listed them. Both quirks are inherited behavior.
pub fn highlight(text: &str, check: &GrammarCheck) -> Option<String> {
    if check.mistake_count == 0 {
        return None;
    }
    let mut highlighted = text.to_string();
    for correction in &check.corrections {
        highlighted = highlighted.replace(
            &correction.original,
            &format!("<del>{}</del>", correction.original),
        );
    }
    // The real-word annotation is opaque engine markup, appended even if "".
    highlighted.push_str(&check.real_word_errors);
    Some(highlighted)
}

/// One user-approved replacement, decoded from its form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCorrection {
    pub word: String,
    pub replacement: String,
}

/// Decodes `correction_<word>` form fields into explicit selections.
///
/// Field order is preserved, empty replacement values are dropped, and the
/// target word is the second `_`-separated segment of the field name — a
/// flagged word that itself contains `_` is truncated at the separator.
pub fn parse_selections<I>(fields: I) -> Vec<SelectedCorrection>
where
    I: IntoIterator<Item = (String, String)>,
{
    fields
        .into_iter()
        .filter(|(name, value)| name.starts_with(CORRECTION_FIELD_PREFIX) && !value.is_empty())
        .filter_map(|(name, value)| {
            name.split('_').nth(1).map(|word| SelectedCorrection {
                word: word.to_string(),
                replacement: value,
            })
        })
        .collect()
}

/// Applies accepted replacements to the original text, in submission order.
///
/// Each selection replaces only the first occurrence of its target word, so
/// repeated instances of the same flagged word need distinct selections.
/// A selection whose word is absent from the text is a no-op.
pub fn apply_corrections(text: &str, selections: &[SelectedCorrection]) -> String {
    selections.iter().fold(text.to_string(), |acc, selection| {
        acc.replacen(&selection.word, &selection.replacement, 1)
    })
}
