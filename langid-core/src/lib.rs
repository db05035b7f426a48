//! Language identification from character n-gram log-likelihood models.
//!
//! This crate provides:
//! - Per-language n-gram models with an out-of-vocabulary fallback
//! - A versioned binary file format for these models
//! - A registry loading a directory of models and scoring phrases against them
//! - Winner selection and a serializable identification result
//!
//! Scoring is read-only: once loaded, a registry can be shared by any
//! number of threads.

/// Language models, registry and scoring.
pub mod model;

/// Error types.
pub mod error;

/// Sample models used by the demo binary and the tests.
pub mod fixtures;

/// File system helpers.
///
/// Not exposed
pub(crate) mod io;

pub use error::{DecodeError, EncodeError, LangIdError, Result};
pub use model::identification::Identification;
pub use model::language_model::LanguageModel;
pub use model::language_tag::LanguageTag;
pub use model::ngram::NgramEntry;
pub use model::registry::{LanguageRegistry, LoadReport, Scores};
pub use model::scoring_options::{IdPolicy, ScoringOptions};
pub use model::shared::SharedRegistry;
