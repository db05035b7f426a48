mod config;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, post, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info, warn};

use serde::{Deserialize, Serialize};
use langid_core::{IdPolicy, LangIdError, LanguageRegistry, ScoringOptions, SharedRegistry};

use crate::config::Config;

/// Query parameters shared by `/v1/identify` and `/v1/scores`.
#[derive(Deserialize)]
struct IdentifyParams {
	n: Option<usize>,
	langs: Option<String>, // comma separated language ids
	dialects: Option<bool>
}

/// Entry of the `/v1/languages` listing.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct LanguageInfo {
	langid: String,
	description: String
}

struct SharedData {
	registry: SharedRegistry,
	models_dir: PathBuf,
	policy: IdPolicy,
	defaults: ScoringOptions
}

impl IdentifyParams {
	/// Applies the request overrides on top of the server defaults.
	fn scoring_options(&self, defaults: &ScoringOptions) -> ScoringOptions {
		let mut options = defaults.clone();
		if let Some(n) = self.n {
			options.n = n;
		}
		if let Some(dialects) = self.dialects {
			options.include_dialects = dialects;
		}
		if let Some(langs) = &self.langs {
			let ids: Vec<&str> = langs
				.split(',')
				.map(|s| s.trim())
				.filter(|s| !s.is_empty())
				.collect();
			if !ids.is_empty() {
				options = options.with_candidates(ids);
			}
		}
		options
	}
}

/// Maps a core error to a response: caller mistakes are 400, the rest 500.
fn error_response(e: LangIdError) -> HttpResponse {
	if e.is_input_error() {
		HttpResponse::BadRequest().body(e.to_string())
	} else {
		error!("Identification failed: {e}");
		HttpResponse::InternalServerError().body(e.to_string())
	}
}

/// Decodes the request body, rejecting invalid UTF-8.
fn body_text(body: &web::Bytes) -> Result<&str, HttpResponse> {
	std::str::from_utf8(body).map_err(|_| HttpResponse::BadRequest().body("Text must be valid UTF-8"))
}

/// HTTP POST endpoint `/v1/identify`
///
/// Identifies the language of the text sent as request body.
/// Returns `{"langid", "description", "score"}` as JSON.
#[post("/v1/identify")]
async fn post_identify(data: web::Data<SharedData>, query: web::Query<IdentifyParams>, body: web::Bytes) -> impl Responder {
	let text = match body_text(&body) {
		Ok(t) => t,
		Err(response) => return response
	};
	let options = query.scoring_options(&data.defaults);

	match data.registry.snapshot().identify(text, &options) {
		Ok(result) => HttpResponse::Ok().json(result),
		Err(e) => error_response(e)
	}
}

/// HTTP POST endpoint `/v1/scores`
///
/// Same inputs as `/v1/identify`, returns the score of every candidate language.
#[post("/v1/scores")]
async fn post_scores(data: web::Data<SharedData>, query: web::Query<IdentifyParams>, body: web::Bytes) -> impl Responder {
	let text = match body_text(&body) {
		Ok(t) => t,
		Err(response) => return response
	};
	let options = query.scoring_options(&data.defaults);

	match data.registry.snapshot().score_phrase(text, &options) {
		Ok(scores) => HttpResponse::Ok().json(scores),
		Err(e) => error_response(e)
	}
}

#[get("/v1/languages")]
async fn get_languages(data: web::Data<SharedData>) -> impl Responder {
	let registry = data.registry.snapshot();
	let languages: Vec<LanguageInfo> = registry
		.iter()
		.map(|language| LanguageInfo {
			langid: language.id().to_owned(),
			description: language.description().to_owned()
		})
		.collect();
	HttpResponse::Ok().json(languages)
}

/// HTTP PUT endpoint `/v1/reload`
///
/// Rebuilds the registry from the models directory and swaps it in.
/// The registry in use is kept if the new one cannot be built.
#[put("/v1/reload")]
async fn put_reload(data: web::Data<SharedData>) -> impl Responder {
	let models_dir = data.models_dir.clone();
	let policy = data.policy;

	match web::block(move || LanguageRegistry::from_directory(models_dir, policy)).await {
		Ok(Ok(registry)) => {
			let count = registry.len();
			data.registry.replace(registry);
			info!("Reloaded {count} language model(s)");
			HttpResponse::Ok().body(format!("{count} language models loaded"))
		}
		Ok(Err(e)) => {
			warn!("Reload failed, keeping current models: {e}");
			HttpResponse::InternalServerError().body(format!("Failed to reload models: {e}"))
		}
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to reload models: {e}"))
	}
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(post_identify)
		.service(post_scores)
		.service(get_languages)
		.service(put_reload);
}

/// Main entry point for the server.
///
/// Loads every model of the configured directory, then serves
/// identification requests until stopped. Startup fails if no model
/// could be loaded.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Config::parse();
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let registry = LanguageRegistry::from_directory(&config.models_dir, config.id_policy())
		.map_err(std::io::Error::other)?;
	info!("{registry}: {}", registry.ids().join(", "));

	let shared_data = web::Data::new(SharedData {
		registry: SharedRegistry::new(registry),
		models_dir: config.models_dir.clone(),
		policy: config.id_policy(),
		defaults: config.default_scoring()
	});

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.workers(config.workers)
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use langid_core::fixtures::{sample_language, sample_registry};
	use langid_core::{Identification, Scores};

	fn shared_data(registry: LanguageRegistry, models_dir: PathBuf) -> web::Data<SharedData> {
		web::Data::new(SharedData {
			registry: SharedRegistry::new(registry),
			models_dir,
			policy: IdPolicy::Lenient,
			defaults: ScoringOptions::default().with_dialects(true)
		})
	}

	#[actix_web::test]
	async fn identifies_text() {
		let data = shared_data(sample_registry(), PathBuf::from("unused"));
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;

		let req = test::TestRequest::post().uri("/v1/identify").set_payload("abcd").to_request();
		let result: Identification = test::call_and_read_body_json(&app, req).await;

		assert_eq!(result.langid, "testlang1");
		assert_eq!(result.description, "EMPTY_DESCRIPTION");
		assert!(result.score > 0.9 && result.score < 1.0);
	}

	#[actix_web::test]
	async fn restricts_candidates_from_query() {
		let data = shared_data(sample_registry(), PathBuf::from("unused"));
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;

		let req = test::TestRequest::post()
			.uri("/v1/scores?langs=testlang2,%20unknown")
			.set_payload("abcd")
			.to_request();
		let scores: Scores = test::call_and_read_body_json(&app, req).await;

		assert_eq!(scores.len(), 1);
		assert!((scores["testlang2"] - 1.0).abs() < 1e-12);
	}

	#[actix_web::test]
	async fn rejects_bad_input() {
		let data = shared_data(sample_registry(), PathBuf::from("unused"));
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;

		for (uri, payload) in [
			("/v1/identify", &b"ab"[..]),
			("/v1/identify?n=0", &b"abcd"[..]),
			("/v1/identify?n=18446744073709551615", &b"abcd"[..]),
			("/v1/scores?n=18446744073709551615", &b"abcd"[..]),
			("/v1/identify?langs=nope", &b"abcd"[..]),
			("/v1/identify", &[0xff, 0xfe, 0xfd, 0xfc][..]),
		] {
			let req = test::TestRequest::post().uri(uri).set_payload(payload.to_vec()).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}
	}

	#[actix_web::test]
	async fn reload_swaps_registry() {
		let dir = tempfile::tempdir().unwrap();
		for language in sample_registry().iter() {
			language.save(dir.path().join(language.id())).unwrap();
		}

		let mut initial = LanguageRegistry::new();
		initial.add(sample_language());
		let data = shared_data(initial, dir.path().to_path_buf());
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;

		let req = test::TestRequest::put().uri("/v1/reload").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/languages").to_request();
		let languages: Vec<LanguageInfo> = test::call_and_read_body_json(&app, req).await;
		let ids: Vec<&str> = languages.iter().map(|l| l.langid.as_str()).collect();
		assert_eq!(ids, ["testlang1", "testlang2"]);
	}

	#[actix_web::test]
	async fn failed_reload_keeps_current_models() {
		let dir = tempfile::tempdir().unwrap();
		let data = shared_data(sample_registry(), dir.path().to_path_buf());
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;

		let req = test::TestRequest::put().uri("/v1/reload").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let req = test::TestRequest::get().uri("/v1/languages").to_request();
		let languages: Vec<LanguageInfo> = test::call_and_read_body_json(&app, req).await;
		assert_eq!(languages.len(), 2);
	}
}
