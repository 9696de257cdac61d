use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use super::error::ApiError;
use crate::application::scoring::ScoringService;
use crate::domain::scoring::types::{
    PriceRequest, PriceResponse, RecommendRequest, RecommendResponse, RiskRequest, RiskResponse,
};

pub type AppState = Arc<ScoringService>;

/// Liveness probe. Never consults the models.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ML Service is running" }))
}

pub async fn predict_price(
    State(service): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(service.suggest_price(&request)?))
}

pub async fn predict_risk(
    State(service): State<AppState>,
    payload: Result<Json<RiskRequest>, JsonRejection>,
) -> Result<Json<RiskResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(service.score_risk(&request)?))
}

pub async fn recommend(
    State(service): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(service.recommend(&request)?))
}
