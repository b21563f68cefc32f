#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for WPI predictions.
//!
//! Serves `POST /predict-wpi` for raw model scores and `POST /api/forecast`
//! for dashboard-scaled forecasts with status colors and recommendation
//! signals. The model and ward encoder artifacts are loaded once at
//! startup and shared read-only across workers. If either artifact fails
//! to load the server still starts, and prediction endpoints answer
//! `503 Service Unavailable` until it is restarted with a valid artifact.

mod handlers;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use wpi_model::ArtifactError;
use wpi_model::encoder::LabelEncoder;
use wpi_model::encoding::EncodingAdapter;
use wpi_model::forecast::Forecaster;
use wpi_model::predictor::LinearModel;
use wpi_server_models::ApiError;

/// Default model artifact location.
pub const DEFAULT_MODEL_PATH: &str = "data/model/wpi_model.json";

/// Default ward encoder artifact location.
pub const DEFAULT_ENCODER_PATH: &str = "data/model/ward_encoder.json";

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `BIND_ADDR`, default `127.0.0.1`.
    pub bind_addr: String,
    /// `PORT`, default `8000`.
    pub port: u16,
    /// `WPI_MODEL_PATH`.
    pub model_path: PathBuf,
    /// `WPI_ENCODER_PATH`.
    pub encoder_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back to
    /// defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000),
            model_path: lookup("WPI_MODEL_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH), PathBuf::from),
            encoder_path: lookup("WPI_ENCODER_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_ENCODER_PATH), PathBuf::from),
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Loaded forecaster, or `None` when the artifacts failed to load.
    pub forecaster: Option<Arc<Forecaster>>,
    /// Generation profile the loaded model was trained on.
    pub model_profile: Option<String>,
}

impl AppState {
    /// Loads the model and encoder artifacts. Load failures are logged and
    /// leave the state without a forecaster.
    #[must_use]
    pub fn load(model_path: &Path, encoder_path: &Path) -> Self {
        match load_forecaster(model_path, encoder_path) {
            Ok((forecaster, profile)) => Self {
                forecaster: Some(Arc::new(forecaster)),
                model_profile: Some(profile),
            },
            Err(e) => {
                log::warn!("Prediction model unavailable: {e}");
                Self::default()
            }
        }
    }
}

/// Loads both artifacts and builds a [`Forecaster`], returning it with the
/// model's generation profile id.
///
/// # Errors
///
/// Returns an error if either artifact cannot be read or is invalid.
pub fn load_forecaster(
    model_path: &Path,
    encoder_path: &Path,
) -> Result<(Forecaster, String), ArtifactError> {
    let model = LinearModel::load(model_path)?;
    let encoder = LabelEncoder::load(encoder_path)?;
    let profile = model.profile.clone();
    Ok((
        Forecaster::new(Arc::new(model), EncodingAdapter::new(encoder)),
        profile,
    ))
}

/// Registers all routes. Shared by [`run_server`] and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ApiError::new(message)),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/predict-wpi", web::post().to(handlers::predict_wpi))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/wards", web::get().to(handlers::wards))
                .route("/profiles", web::get().to(handlers::profiles))
                .route("/forecast", web::post().to(handlers::forecast)),
        );
}

/// Starts the WPI API server.
///
/// Reads [`ServerConfig`] from the environment, loads the model artifacts,
/// and starts the Actix-Web HTTP server. The caller provides the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!(
        "Loading model from {} and ward encoder from {}...",
        config.model_path.display(),
        config.encoder_path.display()
    );
    let state = web::Data::new(AppState::load(&config.model_path, &config.encoder_path));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
