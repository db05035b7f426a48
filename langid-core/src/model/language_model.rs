use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use super::codec;
use super::language_tag::LanguageTag;
use super::ngram::NgramEntry;
use crate::error::{EncodeError, LangIdError, Result};

/// Description used when a model is created without one.
pub const EMPTY_DESCRIPTION: &str = "EMPTY_DESCRIPTION";

/// Fallback log-likelihood of a model whose default was never computed.
pub const DEFAULT_LOG_LK_VALUE: f64 = -100.0;

/// Character n-gram log-likelihood model of one language or dialect.
///
/// # Responsibilities
/// - Own the n-gram entries of the language, keyed by n-gram id
/// - Provide a fallback log-likelihood for out-of-vocabulary n-grams
/// - Tell whether the language is a dialect
/// - Persist itself to, and restore itself from, a model file
///
/// # Invariants
/// - Each key of `ngrams` equals the id of its entry
/// - Once `compute_default_log_lk_value` succeeded, `default_log_lk_value`
///   is the smallest log-likelihood of the model
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageModel {
	/// Language identifier, `xx` or `xx-YY` (ex. `fr`, `de-CH`).
	id: String,

	/// Human readable name of the language.
	description: String,

	/// Mapping from an n-gram id to its entry.
	ngrams: HashMap<String, NgramEntry>,

	/// Log-likelihood returned for n-grams absent from `ngrams`.
	default_log_lk_value: f64,
}

impl LanguageModel {
	/// Creates an empty model with the placeholder description.
	pub fn new(id: impl Into<String>) -> Self {
		Self::with_description(id, EMPTY_DESCRIPTION)
	}

	pub fn with_description(id: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			description: description.into(),
			ngrams: HashMap::new(),
			default_log_lk_value: DEFAULT_LOG_LK_VALUE,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn default_log_lk_value(&self) -> f64 {
		self.default_log_lk_value
	}

	pub(crate) fn set_default_log_lk_value(&mut self, value: f64) {
		self.default_log_lk_value = value;
	}

	/// Number of n-grams in the model.
	pub fn len(&self) -> usize {
		self.ngrams.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ngrams.is_empty()
	}

	/// Iterates over all entries, in no particular order.
	pub fn entries(&self) -> impl Iterator<Item = &NgramEntry> {
		self.ngrams.values()
	}

	/// Inserts an entry, replacing any previous entry with the same id.
	pub fn add_entry(&mut self, entry: NgramEntry) {
		self.ngrams.insert(entry.id().to_owned(), entry);
	}

	/// Returns the entry of `ngram`, if the model knows it.
	pub fn lookup(&self, ngram: &str) -> Option<&NgramEntry> {
		self.ngrams.get(ngram)
	}

	/// Returns the log-likelihood of `ngram`, or the fallback value when
	/// the n-gram is out of vocabulary.
	pub fn loglk_or_default(&self, ngram: &str) -> f64 {
		self.lookup(ngram).map_or(self.default_log_lk_value, NgramEntry::loglk)
	}

	/// Sets the fallback log-likelihood to the smallest log-likelihood of
	/// the model.
	///
	/// # Errors
	/// Returns `EmptyModel` if the model has no entries. The previous
	/// fallback value is left untouched in that case.
	pub fn compute_default_log_lk_value(&mut self) -> Result<f64> {
		let smallest = self
			.ngrams
			.values()
			.map(NgramEntry::loglk)
			.min_by(f64::total_cmp)
			.ok_or_else(|| LangIdError::EmptyModel { id: self.id.clone() })?;

		self.default_log_lk_value = smallest;
		debug!("Default for {} = {}", self.id, smallest);
		Ok(smallest)
	}

	/// Structural dialect check: the id is 5 characters long with a `-` at
	/// index 2.
	///
	/// This is fragile: the characters around the dash are not checked,
	/// so `12-34` counts as a dialect. Use [`LanguageModel::tag`] for a
	/// validated reading of the id.
	pub fn is_dialect(&self) -> bool {
		self.id.chars().count() == 5 && self.id.chars().nth(2) == Some('-')
	}

	/// Parses the id as a `xx` / `xx-YY` language tag.
	pub fn tag(&self) -> Result<LanguageTag> {
		LanguageTag::parse(&self.id)
	}

	/// Writes the model to `path`, replacing any existing file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let path = path.as_ref();
		let wrap = |source: EncodeError| LangIdError::Serialization { path: path.to_path_buf(), source };

		debug!("Saving language {} in file: {}", self.id, path.display());
		let bytes = codec::encode(self).map_err(|e| wrap(e.into()))?;
		fs::write(path, bytes).map_err(|e| wrap(e.into()))?;
		Ok(())
	}

	/// Reads a model previously written by [`LanguageModel::save`].
	///
	/// # Errors
	/// Returns `Deserialization` when the file is missing, truncated or
	/// written in an unsupported format.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		debug!("Reading language model from: {}", path.display());

		fs::read(path)
			.map_err(Into::into)
			.and_then(|bytes| codec::decode(&bytes))
			.map_err(|source| LangIdError::Deserialization { path: path.to_path_buf(), source })
	}
}

impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Language: id={} description={} nbr_ngrams={}",
			self.id,
			self.description,
			self.ngrams.len()
		)
	}
}
