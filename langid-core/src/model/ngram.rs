use std::fmt;

use serde::{Deserialize, Serialize};

/// One n-gram of a language model together with its log-likelihood.
///
/// An `NgramEntry` is a plain value: it is built once, either by a seeding
/// routine or while decoding a model file, and never modified afterwards.
///
/// ## Invariants
/// - `id` is exactly `n` characters long for the model's window `n`
/// - `loglk` is the trained log-likelihood of `id` under its owning language
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NgramEntry {
	/// Surface form of the n-gram (ex. `"abc"`).
	id: String,
	/// Log-likelihood of the n-gram under its language model.
	loglk: f64,
}

impl NgramEntry {
	pub fn new(id: impl Into<String>, loglk: f64) -> Self {
		Self { id: id.into(), loglk }
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn loglk(&self) -> f64 {
		self.loglk
	}
}

impl fmt::Display for NgramEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Ngram: id={} loglk={}", self.id, self.loglk)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exposes_fields() {
		let entry = NgramEntry::new("abc", -12.34);
		assert_eq!(entry.id(), "abc");
		assert_eq!(entry.loglk(), -12.34);
	}

	#[test]
	fn display_matches_debug_dump_format() {
		let entry = NgramEntry::new("abc", -12.34);
		assert_eq!(entry.to_string(), "Ngram: id=abc loglk=-12.34");
	}
}
