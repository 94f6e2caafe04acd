use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single flagged span together with the engine's ranked suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    pub suggestions: Vec<String>,
}

impl Correction {
    pub fn new(original: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            original: original.into(),
            suggestions,
        }
    }
}

/// Full result of a grammar pass over one text.
///
/// `real_word_errors` is an opaque markup fragment owned by the engine; this
/// crate appends it verbatim and never inspects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrammarCheck {
    pub corrections: Vec<Correction>,
    pub mistake_count: usize,
    pub real_word_errors: String,
}

#[derive(Debug)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "correction engine error: {}", self.message)
    }
}

impl std::error::Error for EngineError {}

/// Contract for the external grammar/spell module.
///
/// Implementations must be safe to call from concurrent request handlers;
/// the `Send + Sync` bounds carry that requirement into the type system.
pub trait CorrectionEngine: Send + Sync {
    /// Checks a full text and returns every flagged span in engine order.
    fn correct_grammar(&self, text: &str) -> Result<GrammarCheck, EngineError>;

    /// Returns chemistry-domain suggestions for a single word.
    fn chemistry_suggestions(&self, word: &str) -> Result<Vec<String>, EngineError>;
}

static KNOWN_MISSPELLINGS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        ("Ths", vec!["This", "Thus"]),
        ("tst", vec!["test", "taste"]),
        ("recieve", vec!["receive"]),
        ("seperate", vec!["separate"]),
        ("definately", vec!["definitely"]),
        ("occured", vec!["occurred"]),
        ("untill", vec!["until"]),
        ("wich", vec!["which", "witch"]),
        ("teh", vec!["the"]),
        ("adress", vec!["address"]),
        ("catalist", vec!["catalyst"]),
        ("titrasion", vec!["titration"]),
    ]
});

static REAL_WORD_NOTES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        (
            "there results",
            "<p>Possible real-word error: \u{201c}there results\u{201d} \u{2192} \u{201c}their results\u{201d}.</p>",
        ),
        (
            "affect of",
            "<p>Possible real-word error: \u{201c}affect of\u{201d} \u{2192} \u{201c}effect of\u{201d}.</p>",
        ),
    ]
});

static CHEMISTRY_TERMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "acid",
        "acid anhydride",
        "acid dissociation constant",
        "acidity",
        "alkali",
        "anion",
        "base",
        "buffer",
        "catalyst",
        "cation",
        "covalent bond",
        "electrolyte",
        "enthalpy",
        "entropy",
        "ion",
        "ionic bond",
        "isotope",
        "molarity",
        "oxidation",
        "ph",
        "precipitate",
        "reduction",
        "solute",
        "solvent",
        "titration",
        "valence",
    ]
});

/// Table-driven stand-in for the real correction module.
///
/// Flags any known misspelling that appears anywhere in the text, in table
/// order. Deliberately free of tokenization or ranking logic; a production
/// deployment swaps in a real `CorrectionEngine` implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticEngine;

impl StaticEngine {
    pub fn new() -> Self {
        Self
    }
}

impl CorrectionEngine for StaticEngine {
    fn correct_grammar(&self, text: &str) -> Result<GrammarCheck, EngineError> {
        let corrections: Vec<Correction> = KNOWN_MISSPELLINGS
            .iter()
            .filter(|(typo, _)| text.contains(typo))
            .map(|(typo, suggestions)| {
                Correction::new(
                    *typo,
                    suggestions.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        let real_word_errors = REAL_WORD_NOTES
            .iter()
            .filter(|(trigger, _)| text.to_lowercase().contains(trigger))
            .map(|(_, note)| *note)
            .collect::<String>();
        let mistake_count = corrections.len();
        Ok(GrammarCheck {
            corrections,
            mistake_count,
            real_word_errors,
        })
    }

    fn chemistry_suggestions(&self, word: &str) -> Result<Vec<String>, EngineError> {
        let needle = word.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(CHEMISTRY_TERMS
            .iter()
            .filter(|term| term.starts_with(&needle))
            .map(|term| term.to_string())
            .collect())
    }
}
