//! Language models and the registry that scores phrases against them.
//!
//! - `NgramEntry`: one n-gram and its log-likelihood
//! - `LanguageModel`: the n-grams of one language, with fallback value and persistence
//! - `LanguageTag`: validated `xx` / `xx-YY` language id
//! - `LanguageRegistry`: all loaded languages, tokenizer, scoring and winner selection
//! - `SharedRegistry`: swappable registry snapshot for concurrent readers

/// N-gram id and log-likelihood value type.
pub mod ngram;

/// Per-language n-gram model.
///
/// Handles lookups with out-of-vocabulary fallback, dialect detection,
/// and saving/loading model files.
pub mod language_model;

/// Parsing of `xx` / `xx-YY` language identifiers.
pub mod language_tag;

/// Collection of language models.
///
/// Loads a models directory, tokenizes phrases, computes softmax scores
/// and picks the winning language.
pub mod registry;

/// Parameters of a scoring request and the id validation policy.
pub mod scoring_options;

/// Result of identifying a phrase.
pub mod identification;

/// Registry handle supporting atomic reloads.
pub mod shared;

/// Binary model file format.
///
/// Not exposed
mod codec;
