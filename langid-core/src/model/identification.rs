use serde::{Deserialize, Serialize};

/// Outcome of identifying a phrase: the winning language and its score.
///
/// `score` is the softmax of the mean per-n-gram log-likelihoods over the
/// candidate languages. It ranks languages, it is not a calibrated
/// probability.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Identification {
	pub langid: String,
	pub description: String,
	pub score: f64,
}
