use std::path::PathBuf;

use clap::{ArgAction, Parser};
use langid_core::{IdPolicy, ScoringOptions};
use langid_core::model::scoring_options::DEFAULT_NGRAM_SIZE;

/// Language identification HTTP service.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
	/// Directory holding one model file per language
	#[arg(long, env = "LANGID_MODELS_DIR", default_value = "./trained_models")]
	pub models_dir: PathBuf,

	#[arg(long, env = "LANGID_HOST", default_value = "127.0.0.1")]
	pub host: String,

	#[arg(long, env = "LANGID_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Number of HTTP worker threads
	#[arg(long, env = "LANGID_WORKERS", default_value_t = num_cpus::get())]
	pub workers: usize,

	/// Default n-gram window length, overridable per request
	#[arg(long, env = "LANGID_NGRAM_SIZE", default_value_t = DEFAULT_NGRAM_SIZE)]
	pub ngram_size: usize,

	/// Score dialect models unless a request says otherwise
	#[arg(long, env = "LANGID_INCLUDE_DIALECTS", default_value_t = true, action = ArgAction::Set)]
	pub include_dialects: bool,

	/// Reject models whose id is not `xx` or `xx-YY`
	#[arg(long, env = "LANGID_STRICT_IDS")]
	pub strict_ids: bool,
}

impl Config {
	pub fn id_policy(&self) -> IdPolicy {
		if self.strict_ids { IdPolicy::Strict } else { IdPolicy::Lenient }
	}

	/// Scoring options applied when a request does not override them.
	pub fn default_scoring(&self) -> ScoringOptions {
		ScoringOptions::default()
			.with_ngram_size(self.ngram_size)
			.with_dialects(self.include_dialects)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = Config::parse_from(["langid-server"]);
		assert_eq!(config.port, 5000);
		assert_eq!(config.ngram_size, 3);
		assert!(config.include_dialects);
		assert_eq!(config.id_policy(), IdPolicy::Lenient);
		assert!(config.default_scoring().include_dialects);
	}

	#[test]
	fn overrides() {
		let config = Config::parse_from([
			"langid-server",
			"--models-dir",
			"/tmp/models",
			"--include-dialects",
			"false",
			"--strict-ids",
			"--ngram-size",
			"4",
		]);
		assert_eq!(config.models_dir, PathBuf::from("/tmp/models"));
		assert_eq!(config.id_policy(), IdPolicy::Strict);
		assert_eq!(config.default_scoring(), ScoringOptions::default().with_ngram_size(4));
	}

	#[test]
	fn command_is_well_formed() {
		use clap::CommandFactory;
		Config::command().debug_assert();
	}
}
