use std::fmt;
use std::str::FromStr;

use crate::error::{LangIdError, Result};

/// A validated language identifier: a 2-letter language code optionally
/// followed by `-` and a 2-letter region code (ex. `fr`, `de-CH`).
///
/// Letters are ASCII only. Case is kept as written, the usual convention
/// being a lowercase language and an uppercase region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageTag {
	language: [u8; 2],
	region: Option<[u8; 2]>,
}

impl LanguageTag {
	/// Parses `xx` or `xx-YY`.
	///
	/// # Errors
	/// Returns `InvalidLanguageId` for anything else, including ids that
	/// merely look like a dialect (`12-34`, `a--bc`).
	pub fn parse(id: &str) -> Result<Self> {
		let invalid = || LangIdError::InvalidLanguageId(id.to_owned());
		let bytes = id.as_bytes();
		let letters = |pair: &[u8]| -> Option<[u8; 2]> {
			match pair {
				[a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => Some([*a, *b]),
				_ => None,
			}
		};

		match bytes.len() {
			2 => Ok(Self { language: letters(bytes).ok_or_else(invalid)?, region: None }),
			5 if bytes[2] == b'-' => Ok(Self {
				language: letters(&bytes[..2]).ok_or_else(invalid)?,
				region: Some(letters(&bytes[3..]).ok_or_else(invalid)?),
			}),
			_ => Err(invalid()),
		}
	}

	/// The 2-letter language part.
	pub fn language(&self) -> &str {
		// ASCII letters only, checked in `parse`
		std::str::from_utf8(&self.language).unwrap_or_default()
	}

	/// The 2-letter region part of a dialect code.
	pub fn region(&self) -> Option<&str> {
		self.region.as_ref().map(|r| std::str::from_utf8(r).unwrap_or_default())
	}

	pub fn is_dialect(&self) -> bool {
		self.region.is_some()
	}
}

impl FromStr for LanguageTag {
	type Err = LangIdError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for LanguageTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.region() {
			Some(region) => write!(f, "{}-{}", self.language(), region),
			None => f.write_str(self.language()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_plain_language() {
		let tag = LanguageTag::parse("fr").unwrap();
		assert_eq!(tag.language(), "fr");
		assert_eq!(tag.region(), None);
		assert!(!tag.is_dialect());
	}

	#[test]
	fn parses_dialect() {
		let tag: LanguageTag = "de-CH".parse().unwrap();
		assert_eq!(tag.language(), "de");
		assert_eq!(tag.region(), Some("CH"));
		assert!(tag.is_dialect());
		assert_eq!(tag.to_string(), "de-CH");
	}

	#[test]
	fn rejects_malformed_ids() {
		for id in ["", "f", "fra", "deCH", "12-34", "de_CH", "de-C", "ab-cd-e", "é1", "testlang1"] {
			assert!(
				matches!(LanguageTag::parse(id), Err(LangIdError::InvalidLanguageId(ref s)) if s == id),
				"{id} should be rejected"
			);
		}
	}
}
