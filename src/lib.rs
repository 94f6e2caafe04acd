pub mod engine;
pub mod review;
#[cfg(feature = "web")]
pub mod web;

pub use engine::{Correction, CorrectionEngine, EngineError, GrammarCheck, StaticEngine};
pub use review::{
    CORRECTION_FIELD_PREFIX, CorrectionSet, SelectedCorrection, apply_corrections, highlight,
    parse_selections,
};
