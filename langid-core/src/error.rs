use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LangIdError>;

/// Why a model file could not be turned back into a `LanguageModel`.
#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("cannot read file: {0}")]
	Io(#[from] io::Error),

	#[error("malformed or truncated data: {0}")]
	Format(#[from] postcard::Error),

	#[error("not a language model file (bad magic)")]
	BadMagic,

	#[error("unsupported format version {0}")]
	UnsupportedVersion(u16),
}

/// Errors raised while loading models or scoring a phrase.
///
/// Out-of-vocabulary n-grams are not errors, they resolve to the
/// model's fallback log-likelihood.
#[derive(Debug, Error)]
pub enum LangIdError {
	/// A model file is missing, truncated or written with another schema.
	#[error("failed to load language model from {}: {source}", path.display())]
	Deserialization {
		path: PathBuf,
		#[source]
		source: DecodeError,
	},

	/// A model could not be written to disk.
	#[error("failed to save language model to {}: {source}", path.display())]
	Serialization {
		path: PathBuf,
		#[source]
		source: EncodeError,
	},

	/// The fallback log-likelihood is undefined without entries.
	#[error("language model '{id}' has no n-gram entries")]
	EmptyModel { id: String },

	/// A model holds an infinite or NaN log-likelihood (`ngram` is empty
	/// for the fallback value).
	#[error("language model '{id}' has a non-finite log-likelihood for '{ngram}'")]
	NonFiniteLogLk { id: String, ngram: String },

	#[error("unknown language id '{0}'")]
	UnknownLanguageId(String),

	/// The phrase is shorter than the n-gram window.
	#[error("phrase of {length} characters yields no {n}-grams")]
	EmptyTokenization { length: usize, n: usize },

	#[error("n-gram window length must be at least 1")]
	InvalidWindow,

	/// The id is neither `xx` nor `xx-YY`.
	#[error("invalid language id '{0}'")]
	InvalidLanguageId(String),

	/// Dialect and candidate filtering left nothing to score.
	#[error("no candidate language left to score")]
	NoCandidateLanguages,

	#[error("no language model could be loaded from {}", dir.display())]
	EmptyRegistry { dir: PathBuf },

	#[error("i/o error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Why a `LanguageModel` could not be written.
#[derive(Debug, Error)]
pub enum EncodeError {
	#[error("cannot write file: {0}")]
	Io(#[from] io::Error),

	#[error("cannot encode model: {0}")]
	Format(#[from] postcard::Error),
}

impl LangIdError {
	/// True for errors caused by the caller's input rather than by the
	/// loaded models or the file system.
	pub fn is_input_error(&self) -> bool {
		matches!(
			self,
			LangIdError::EmptyTokenization { .. }
				| LangIdError::InvalidWindow
				| LangIdError::NoCandidateLanguages
				| LangIdError::UnknownLanguageId(_)
		)
	}
}
