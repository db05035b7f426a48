//! On-disk format of a single language model.
//!
//! A model file is two postcard messages back to back:
//! - a header `{ magic: b"LGID", version: u16 }`
//! - a body `{ id, description, default_log_lk_value, entries }` where
//!   `entries` is length-prefixed and sorted by n-gram id
//!
//! The header is decoded first so that a file written by another format
//! version is rejected explicitly instead of being misread.

use serde::{Deserialize, Serialize};

use super::language_model::LanguageModel;
use super::ngram::NgramEntry;
use crate::error::DecodeError;

/// Identifies a language model file.
pub const MAGIC: [u8; 4] = *b"LGID";

/// Version written by this crate, and the only one it reads.
pub const FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Header {
	magic: [u8; 4],
	version: u16,
}

#[derive(Serialize)]
struct BodyRef<'a> {
	id: &'a str,
	description: &'a str,
	default_log_lk_value: f64,
	entries: Vec<&'a NgramEntry>,
}

#[derive(Deserialize)]
struct Body {
	id: String,
	description: String,
	default_log_lk_value: f64,
	entries: Vec<NgramEntry>,
}

/// Encodes `model` (header + body) into a byte buffer.
pub(crate) fn encode(model: &LanguageModel) -> Result<Vec<u8>, postcard::Error> {
	let mut entries: Vec<&NgramEntry> = model.entries().collect();
	entries.sort_by(|a, b| a.id().cmp(b.id()));

	let mut bytes = postcard::to_stdvec(&Header { magic: MAGIC, version: FORMAT_VERSION })?;
	bytes.extend(postcard::to_stdvec(&BodyRef {
		id: model.id(),
		description: model.description(),
		default_log_lk_value: model.default_log_lk_value(),
		entries,
	})?);
	Ok(bytes)
}

/// Decodes a buffer produced by `encode`.
///
/// # Errors
/// - `BadMagic` / `UnsupportedVersion` when the header does not match
/// - `Format` when the body is truncated, malformed, or followed by garbage
pub(crate) fn decode(bytes: &[u8]) -> Result<LanguageModel, DecodeError> {
	let (header, rest): (Header, &[u8]) = postcard::take_from_bytes(bytes)?;
	if header.magic != MAGIC {
		return Err(DecodeError::BadMagic);
	}
	if header.version != FORMAT_VERSION {
		return Err(DecodeError::UnsupportedVersion(header.version));
	}

	let (body, rest): (Body, &[u8]) = postcard::take_from_bytes(rest)?;
	if !rest.is_empty() {
		return Err(DecodeError::Format(postcard::Error::DeserializeBadEncoding));
	}

	let mut model = LanguageModel::with_description(body.id, body.description);
	for entry in body.entries {
		model.add_entry(entry);
	}
	model.set_default_log_lk_value(body.default_log_lk_value);
	Ok(model)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixtures::sample_language;

	#[test]
	fn header_comes_first() {
		let bytes = encode(&sample_language()).unwrap();
		assert_eq!(&bytes[..4], b"LGID");
		assert_eq!(bytes[4], FORMAT_VERSION as u8);
	}

	#[test]
	fn encoding_is_deterministic() {
		let model = sample_language();
		assert_eq!(encode(&model).unwrap(), encode(&model.clone()).unwrap());
	}

	#[test]
	fn decodes_what_it_encodes() {
		let mut model = sample_language();
		model.compute_default_log_lk_value().unwrap();
		let decoded = decode(&encode(&model).unwrap()).unwrap();
		assert_eq!(decoded, model);
	}

	#[test]
	fn rejects_bad_magic() {
		let mut bytes = encode(&sample_language()).unwrap();
		bytes[0] = b'X';
		assert!(matches!(decode(&bytes), Err(DecodeError::BadMagic)));
	}

	#[test]
	fn rejects_other_versions() {
		let mut bytes = postcard::to_stdvec(&Header { magic: MAGIC, version: 7 }).unwrap();
		bytes.extend_from_slice(&encode(&sample_language()).unwrap()[5..]);
		assert!(matches!(decode(&bytes), Err(DecodeError::UnsupportedVersion(7))));
	}

	#[test]
	fn rejects_truncated_data() {
		let bytes = encode(&sample_language()).unwrap();
		for len in [0, 3, 5, bytes.len() / 2, bytes.len() - 1] {
			assert!(
				matches!(decode(&bytes[..len]), Err(DecodeError::Format(_)) | Err(DecodeError::BadMagic)),
				"prefix of {len} bytes should not decode"
			);
		}
	}

	#[test]
	fn rejects_trailing_garbage() {
		let mut bytes = encode(&sample_language()).unwrap();
		bytes.push(0);
		assert!(matches!(decode(&bytes), Err(DecodeError::Format(_))));
	}
}
