mod common;

use estateml::domain::errors::{InferenceError, ScoringError};
use estateml::domain::ml::feature_schema::RECOMMEND_CLUSTERS;
use estateml::domain::scoring::types::{PriceRequest, RecommendRequest, RiskRequest};

fn price_request() -> PriceRequest {
    PriceRequest {
        surface: 80.0,
        rooms: 3,
        location_score: 7.5,
        distance_center: 2.1,
        season_index: 1.0,
    }
}

#[test]
fn test_price_prediction_is_finite_and_rounded() {
    let svc = common::service();

    let response = svc.suggest_price(&price_request()).unwrap();
    assert!(response.suggested_price.is_finite());
    // Rounded to exactly 2 decimal places
    let scaled = response.suggested_price * 100.0;
    assert!((scaled - scaled.round()).abs() < 1e-9);
}

#[test]
fn test_reliable_tenant_scores_low() {
    let svc = common::service();

    let response = svc
        .score_risk(&RiskRequest {
            late_payments: 0,
            disputes: 0,
            rental_duration: 24,
        })
        .unwrap();
    assert!(response.risk_score >= 0.0);
    assert!(response.risk_score <= 100.0);
    assert!(
        response.risk_score < 50.0,
        "clean history should score in the lower half, got {}",
        response.risk_score
    );
}

#[test]
fn test_delinquent_tenant_scores_high() {
    let svc = common::service();

    let response = svc
        .score_risk(&RiskRequest {
            late_payments: 7,
            disputes: 3,
            rental_duration: 4,
        })
        .unwrap();
    assert!(
        response.risk_score > 50.0,
        "repeated delinquency should score in the upper half, got {}",
        response.risk_score
    );
}

#[test]
fn test_recommended_cluster_is_in_range() {
    let svc = common::service();

    let response = svc
        .recommend(&RecommendRequest {
            price: 200_000.0,
            surface: 60.0,
            rooms: 2,
            location_score: 6.0,
            lifestyle_score: 5.0,
        })
        .unwrap();
    assert!(response.recommended_cluster < RECOMMEND_CLUSTERS);
}

#[test]
fn test_identical_requests_get_identical_responses() {
    let svc = common::service();

    let first = svc.suggest_price(&price_request()).unwrap();
    let second = svc.suggest_price(&price_request()).unwrap();
    assert_eq!(first, second);

    let request = RecommendRequest {
        price: 320_000.0,
        surface: 110.0,
        rooms: 4,
        location_score: 4.5,
        lifestyle_score: 4.0,
    };
    assert_eq!(
        svc.recommend(&request).unwrap(),
        svc.recommend(&request).unwrap()
    );
}

#[test]
fn test_single_class_classifier_surfaces_an_error() {
    let svc = common::single_class_service();

    let err = svc
        .score_risk(&RiskRequest {
            late_payments: 0,
            disputes: 0,
            rental_duration: 24,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Inference(InferenceError::MissingClass { class_index: 1, .. })
    ));

    // The other endpoints are unaffected
    assert!(svc.suggest_price(&price_request()).is_ok());
}

#[test]
fn test_invalid_surface_is_rejected() {
    let svc = common::service();

    let mut request = price_request();
    request.surface = -5.0;

    let err = svc.suggest_price(&request).unwrap_err();
    assert!(matches!(err, ScoringError::Validation(ref v) if v.field == "surface"));
}
