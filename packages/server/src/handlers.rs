//! HTTP handler functions for the WPI API.

use actix_web::{HttpResponse, web};
use wpi_model::ForecastError;
use wpi_model::forecast::{Prediction, PredictionRequest};
use wpi_server_models::{
    ApiError, ApiForecast, ApiForecastInput, ApiForecastRequest, ApiForecastResponse, ApiHealth,
    ApiPredictRequest, ApiPredictResponse, ApiProfile, ApiWard,
};
use wpi_signal::profiles::{DEFAULT_PROFILE_ID, all_profiles};
use wpi_signal::recommend::recommend;
use wpi_signal_models::RecommendationSignals;

use crate::AppState;

/// Upper bound of the dashboard index scale.
const DASHBOARD_MAX: f64 = 100.0;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: state.forecaster.is_some(),
        model_profile: state.model_profile.clone(),
    })
}

/// `GET /api/wards`
///
/// Lists every registered ward with its zone and roster.
pub async fn wards() -> HttpResponse {
    let wards: Vec<ApiWard> = wpi_ward::all().iter().map(ApiWard::from).collect();
    HttpResponse::Ok().json(wards)
}

/// `GET /api/profiles`
///
/// Lists the generation profiles models can be trained on.
pub async fn profiles() -> HttpResponse {
    let profiles: Vec<ApiProfile> = all_profiles()
        .iter()
        .map(|profile| ApiProfile::new(profile, profile.id == DEFAULT_PROFILE_ID))
        .collect();
    HttpResponse::Ok().json(profiles)
}

/// `POST /predict-wpi`
///
/// Returns the raw model score for a ward on a date, with the derived
/// features it was scored on.
pub async fn predict_wpi(
    state: web::Data<AppState>,
    body: web::Json<ApiPredictRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let request = PredictionRequest {
        date: body.date,
        ward: body.ward_name,
        zone: body.zone,
    };

    match run_prediction(&state, &request) {
        Ok(prediction) => HttpResponse::Ok().json(ApiPredictResponse {
            ward: request.ward,
            zone: request.zone,
            date: request.date,
            predicted_wpi: prediction.predicted_wpi,
            features_used: prediction.features,
        }),
        Err(rejection) => rejection.into_response(),
    }
}

/// `POST /api/forecast`
///
/// Returns the forecast on the dashboard's 0-100 scale together with the
/// status color for the requested operating mode, the recommendation
/// signals, and the recommended actions.
pub async fn forecast(
    state: web::Data<AppState>,
    body: web::Json<ApiForecastRequest>,
) -> HttpResponse {
    let body = body.into_inner();
    let mode = body.mode;
    let request = PredictionRequest {
        date: body.date,
        ward: body.ward,
        zone: body.zone,
    };

    match run_prediction(&state, &request) {
        Ok(prediction) => {
            let index = dashboard_index(prediction.predicted_wpi);
            let thresholds = mode.thresholds();
            let signals = RecommendationSignals::from(&prediction.features);
            HttpResponse::Ok().json(ApiForecastResponse {
                input: ApiForecastInput {
                    date: request.date,
                    ward: request.ward,
                    zone: request.zone,
                },
                forecast: ApiForecast {
                    predicted_wpi: index,
                    model_wpi: prediction.predicted_wpi,
                    status: thresholds.color(index),
                    blink: thresholds.should_blink(index),
                    mode,
                    signals,
                    recommendations: recommend(index, &signals, mode),
                    features: prediction.features,
                },
            })
        }
        Err(rejection) => rejection.into_response(),
    }
}

/// Why a prediction request was rejected.
enum Rejection {
    MissingFields,
    Forecast(ForecastError),
}

impl From<ForecastError> for Rejection {
    fn from(e: ForecastError) -> Self {
        Self::Forecast(e)
    }
}

impl Rejection {
    fn into_response(self) -> HttpResponse {
        let e = match self {
            Self::MissingFields => {
                return HttpResponse::BadRequest()
                    .json(ApiError::new("date, ward and zone are required"));
            }
            Self::Forecast(e) => e,
        };

        let mut builder = match &e {
            ForecastError::InvalidDate { .. } => HttpResponse::BadRequest(),
            ForecastError::Encoding(_) => HttpResponse::UnprocessableEntity(),
            ForecastError::ModelUnavailable => HttpResponse::ServiceUnavailable(),
            ForecastError::Prediction(_) => {
                log::error!("Prediction failed: {e}");
                HttpResponse::InternalServerError()
            }
        };
        builder.json(ApiError::new(e.to_string()))
    }
}

/// Checks the required fields and runs the forecaster.
fn run_prediction(state: &AppState, request: &PredictionRequest) -> Result<Prediction, Rejection> {
    if [&request.date, &request.ward, &request.zone]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(Rejection::MissingFields);
    }

    let forecaster = state
        .forecaster
        .as_deref()
        .ok_or(ForecastError::ModelUnavailable)?;

    Ok(forecaster.predict(request)?)
}

/// Rescales a model score to the dashboard index: doubled, clamped to
/// `0..=100`, rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dashboard_index(model_wpi: f64) -> u32 {
    (model_wpi * 2.0).clamp(0.0, DASHBOARD_MAX).round() as u32
}
