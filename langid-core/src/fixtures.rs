//! Small hand-built models for demos and tests.

use crate::model::language_model::LanguageModel;
use crate::model::ngram::NgramEntry;
use crate::model::registry::LanguageRegistry;

fn build(id: &str, entries: &[(&str, f64)]) -> LanguageModel {
	let mut language = LanguageModel::new(id);
	for (ngram, loglk) in entries {
		language.add_entry(NgramEntry::new(*ngram, *loglk));
	}
	language
}

/// The `aa-BB` dialect with three trigrams.
pub fn sample_language() -> LanguageModel {
	build("aa-BB", &[("abc", -12.34), ("bcd", -11.23), ("cde", -10.12)])
}

/// Two languages, `testlang1` and `testlang2`, over the same trigrams;
/// `testlang1` gives them higher log-likelihoods.
pub fn sample_registry() -> LanguageRegistry {
	let mut registry = LanguageRegistry::new();
	registry.add(build("testlang1", &[("abc", -12.34), ("bcd", -11.23), ("cde", -10.12)]));
	registry.add(build("testlang2", &[("abc", -13.45), ("bcd", -14.56), ("cde", -15.67)]));
	registry
}
