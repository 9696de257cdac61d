use axum::Router;
use axum::routing::{get, post};

use super::handlers::{self, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/predict/price", post(handlers::predict_price))
        .route("/predict/risk", post(handlers::predict_risk))
        .route("/recommend", post(handlers::recommend))
        .with_state(state)
}
