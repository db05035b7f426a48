use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::identification::Identification;
use super::language_model::LanguageModel;
use super::scoring_options::{IdPolicy, ScoringOptions};
use crate::error::{LangIdError, Result};
use crate::io;

/// Softmax score of every candidate language, keyed by language id.
pub type Scores = BTreeMap<String, f64>;

/// Files skipped while loading a models directory.
#[derive(Debug, Default)]
pub struct LoadReport {
	/// Ids of the models that were registered, in loading order.
	pub loaded: Vec<String>,
	/// Files that could not be registered, with the reason.
	pub failures: Vec<(PathBuf, LangIdError)>,
}

/// Collection of language models used to identify phrases.
///
/// # Responsibilities
/// - Own every `LanguageModel`, keyed by language id
/// - Load models from a directory of model files
/// - Slice phrases into n-grams and score them against each language
/// - Pick the winning language of a set of scores
///
/// # Invariants
/// - Each key of `languages` equals the id of its model
/// - Ids are iterated in sorted order, the same on every call
///
/// A registry is filled once and only read afterwards, so a shared
/// reference can be used by any number of threads at the same time.
#[derive(Clone, Debug, Default)]
pub struct LanguageRegistry {
	languages: BTreeMap<String, LanguageModel>,
}

impl LanguageRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from every model file found in `dir`.
	///
	/// Unreadable or invalid files are logged and skipped.
	///
	/// # Errors
	/// - `Io` if the directory cannot be listed
	/// - `EmptyRegistry` if no model at all could be loaded
	pub fn from_directory<P: AsRef<Path>>(dir: P, policy: IdPolicy) -> Result<Self> {
		let mut registry = Self::new();
		registry.load_from_directory(&dir, policy)?;
		if registry.is_empty() {
			return Err(LangIdError::EmptyRegistry { dir: dir.as_ref().to_path_buf() });
		}
		Ok(registry)
	}

	/// Inserts a model, replacing any model with the same id.
	pub fn add(&mut self, model: LanguageModel) {
		self.languages.insert(model.id().to_owned(), model);
	}

	/// Loads one model file and registers it.
	pub fn add_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&LanguageModel> {
		let model = LanguageModel::load(path)?;
		info!("{model}");
		let id = model.id().to_owned();
		self.add(model);
		self.get(&id)
	}

	/// Loads every file of `dir` as a language model.
	///
	/// A file that cannot be decoded, holds an empty model, a non-finite
	/// log-likelihood or (with `IdPolicy::Strict`) a malformed id is reported in the returned
	/// `LoadReport` and does not stop the loading of the others.
	///
	/// # Errors
	/// Returns `Io` only if the directory itself cannot be listed.
	pub fn load_from_directory<P: AsRef<Path>>(&mut self, dir: P, policy: IdPolicy) -> Result<LoadReport> {
		let dir = dir.as_ref();
		let files = io::list_files(dir).map_err(|source| LangIdError::Io { path: dir.to_path_buf(), source })?;

		let mut report = LoadReport::default();
		for (i, path) in files.iter().enumerate() {
			debug!("Reading model from file [{}/{}]: {}", i + 1, files.len(), path.display());
			match LanguageModel::load(path).and_then(|model| Self::check_model(model, policy)) {
				Ok(model) => {
					if self.languages.contains_key(model.id()) {
						warn!("Language {} loaded again from {}, replacing it", model.id(), path.display());
					}
					debug!("{model}");
					report.loaded.push(model.id().to_owned());
					self.add(model);
				}
				Err(e) => {
					warn!("Skipping {}: {e}", path.display());
					report.failures.push((path.clone(), e));
				}
			}
		}

		info!(
			"Loaded {} language model(s) from {} ({} skipped)",
			report.loaded.len(),
			dir.display(),
			report.failures.len()
		);
		Ok(report)
	}

	/// Rejects models that cannot take part in scoring.
	fn check_model(model: LanguageModel, policy: IdPolicy) -> Result<LanguageModel> {
		if model.id().is_empty() {
			return Err(LangIdError::InvalidLanguageId(String::new()));
		}
		if policy == IdPolicy::Strict {
			model.tag()?;
		}
		if model.is_empty() {
			return Err(LangIdError::EmptyModel { id: model.id().to_owned() });
		}
		if let Some(entry) = model.entries().find(|entry| !entry.loglk().is_finite()) {
			return Err(LangIdError::NonFiniteLogLk { id: model.id().to_owned(), ngram: entry.id().to_owned() });
		}
		if !model.default_log_lk_value().is_finite() {
			return Err(LangIdError::NonFiniteLogLk { id: model.id().to_owned(), ngram: String::new() });
		}
		Ok(model)
	}

	/// All language ids, sorted.
	pub fn ids(&self) -> Vec<&str> {
		self.languages.keys().map(String::as_str).collect()
	}

	/// # Errors
	/// Returns `UnknownLanguageId` if no model has this id.
	pub fn get(&self, lang_id: &str) -> Result<&LanguageModel> {
		self.languages
			.get(lang_id)
			.ok_or_else(|| LangIdError::UnknownLanguageId(lang_id.to_owned()))
	}

	/// Log-likelihood of `ngram` under the language `lang_id`, falling back
	/// to the language's default for unknown n-grams.
	pub fn loglk(&self, lang_id: &str, ngram: &str) -> Result<f64> {
		Ok(self.get(lang_id)?.loglk_or_default(ngram))
	}

	pub fn len(&self) -> usize {
		self.languages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.languages.is_empty()
	}

	/// Iterates over the models in id order.
	pub fn iter(&self) -> impl Iterator<Item = &LanguageModel> {
		self.languages.values()
	}

	/// Slices `phrase` into all overlapping substrings of `n` characters,
	/// left to right.
	///
	/// A phrase of `L` characters yields `L + 1 - n` n-grams, or none when
	/// it is shorter than `n` (or `n` is 0). Slicing follows character
	/// boundaries, multi-byte characters are never split.
	///
	/// Example: `"I eat"` with `n = 3` gives `["I e", " ea", "eat"]`.
	pub fn tokenize(phrase: &str, n: usize) -> Vec<&str> {
		if n == 0 {
			return Vec::new();
		}
		let bounds: Vec<usize> = phrase
			.char_indices()
			.map(|(i, _)| i)
			.chain(std::iter::once(phrase.len()))
			.collect();

		match n.checked_add(1) {
			Some(width) if width <= bounds.len() => bounds.windows(width).map(|w| &phrase[w[0]..w[n]]).collect(),
			_ => Vec::new(),
		}
	}

	/// Scores `phrase` against every candidate language.
	///
	/// For each candidate the log-likelihoods of the phrase's n-grams are
	/// summed, divided by the number of n-grams, and the resulting means go
	/// through a softmax. The returned scores are in `(0, 1)` and sum to 1.
	///
	/// # Errors
	/// - `InvalidWindow` if `options.n` is 0
	/// - `EmptyTokenization` if the phrase is shorter than `options.n`
	/// - `NoCandidateLanguages` if the filters leave no language
	pub fn score_phrase(&self, phrase: &str, options: &ScoringOptions) -> Result<Scores> {
		if options.n == 0 {
			return Err(LangIdError::InvalidWindow);
		}
		let ngrams = Self::tokenize(phrase, options.n);
		if ngrams.is_empty() {
			return Err(LangIdError::EmptyTokenization { length: phrase.chars().count(), n: options.n });
		}
		let count = ngrams.len() as f64;

		// (id, mean log-likelihood) pairs stay together through the softmax
		let mut scores: Vec<(&str, f64)> = self
			.iter()
			.filter(|language| options.accepts(language.id(), language.is_dialect()))
			.map(|language| {
				let total: f64 = ngrams.iter().map(|ngram| language.loglk_or_default(ngram)).sum();
				(language.id(), total / count)
			})
			.collect();

		if scores.is_empty() {
			return Err(LangIdError::NoCandidateLanguages);
		}
		softmax(&mut scores);

		Ok(scores.into_iter().map(|(id, score)| (id.to_owned(), score)).collect())
	}

	/// Returns the id with the highest score.
	///
	/// Among equal scores the lexicographically greatest id wins.
	/// Returns `None` when `scores` is empty.
	pub fn winner(scores: &Scores) -> Option<&str> {
		scores
			.iter()
			.max_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
			.map(|(id, _)| id.as_str())
	}

	/// Scores `phrase` and returns the winning language with its score.
	pub fn identify(&self, phrase: &str, options: &ScoringOptions) -> Result<Identification> {
		let scores = self.score_phrase(phrase, options)?;
		let winner_id = Self::winner(&scores).ok_or(LangIdError::NoCandidateLanguages)?;
		let language = self.get(winner_id)?;

		Ok(Identification {
			langid: language.id().to_owned(),
			description: language.description().to_owned(),
			score: scores[winner_id],
		})
	}
}

/// Numerically stable softmax, in place.
///
/// When the largest value is infinite, the values equal to it share the
/// whole mass (uniformly over all values if none compares equal).
fn softmax(values: &mut [(&str, f64)]) {
	let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
	if !max.is_finite() {
		let tied = values.iter().filter(|(_, v)| *v == max).count();
		let total = values.len();
		for (_, v) in values.iter_mut() {
			*v = match tied {
				0 => 1.0 / total as f64,
				_ if *v == max => 1.0 / tied as f64,
				_ => 0.0,
			};
		}
		return;
	}
	let mut sum = 0.0;
	for (_, v) in values.iter_mut() {
		*v = (*v - max).exp();
		sum += *v;
	}
	for (_, v) in values.iter_mut() {
		*v /= sum;
	}
}

impl fmt::Display for LanguageRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Languages: nbr_lang={}", self.languages.len())
	}
}
