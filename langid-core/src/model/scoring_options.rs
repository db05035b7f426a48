use std::collections::HashSet;

/// Default n-gram window length.
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// How load-time code treats language ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
	/// Accept any non-empty id.
	#[default]
	Lenient,
	/// Only accept `xx` and `xx-YY` ids.
	Strict,
}

/// Parameters of a phrase scoring request.
///
/// # Responsibilities
/// - Carry the n-gram window length used to tokenize the phrase
/// - Restrict the candidate languages, if requested
/// - Tell whether dialects take part in the scoring
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringOptions {
	/// Length of the n-grams the phrase is sliced into.
	pub n: usize,

	/// When set, only these language ids are scored.
	pub candidates: Option<HashSet<String>>,

	/// Whether dialect models (`xx-YY`) are scored.
	pub include_dialects: bool,
}

impl Default for ScoringOptions {
	fn default() -> Self {
		Self { n: DEFAULT_NGRAM_SIZE, candidates: None, include_dialects: false }
	}
}

impl ScoringOptions {
	/// Restricts scoring to the given language ids.
	pub fn with_candidates<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.candidates = Some(ids.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_dialects(mut self, include_dialects: bool) -> Self {
		self.include_dialects = include_dialects;
		self
	}

	pub fn with_ngram_size(mut self, n: usize) -> Self {
		self.n = n;
		self
	}

	/// Whether a language takes part in the scoring.
	pub(crate) fn accepts(&self, id: &str, is_dialect: bool) -> bool {
		if is_dialect && !self.include_dialects {
			return false;
		}
		self.candidates.as_ref().is_none_or(|ids| ids.contains(id))
	}
}
