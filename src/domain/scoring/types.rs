use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError {
            field,
            reason: format!("must be a finite number, got {value}"),
        });
    }
    Ok(())
}

/// Inputs for a rent price suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    pub surface: f64,
    pub rooms: u32,
    pub location_score: f64,
    pub distance_center: f64,
    pub season_index: f64,
}

impl PriceRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite("location_score", self.location_score)?;
        require_finite("season_index", self.season_index)?;
        if !self.surface.is_finite() || self.surface <= 0.0 {
            return Err(ValidationError {
                field: "surface",
                reason: format!("must be a positive number, got {}", self.surface),
            });
        }
        if !self.distance_center.is_finite() || self.distance_center < 0.0 {
            return Err(ValidationError {
                field: "distance_center",
                reason: format!("must not be negative, got {}", self.distance_center),
            });
        }
        Ok(())
    }

    /// Feature vector in `PRICE_FEATURES` order.
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.surface,
            self.rooms as f64,
            self.location_score,
            self.distance_center,
            self.season_index,
        ]
    }
}

/// Inputs for a tenant risk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRequest {
    pub late_payments: u32,
    pub disputes: u32,
    pub rental_duration: u32,
}

impl RiskRequest {
    // All fields are unsigned counts; the type system already covers the
    // range constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Feature vector in `RISK_FEATURES` order.
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.late_payments as f64,
            self.disputes as f64,
            self.rental_duration as f64,
        ]
    }
}

/// Inputs for a property cluster recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub price: f64,
    pub surface: f64,
    pub rooms: u32,
    pub location_score: f64,
    pub lifestyle_score: f64,
}

impl RecommendRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite("location_score", self.location_score)?;
        require_finite("lifestyle_score", self.lifestyle_score)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError {
                field: "price",
                reason: format!("must not be negative, got {}", self.price),
            });
        }
        if !self.surface.is_finite() || self.surface <= 0.0 {
            return Err(ValidationError {
                field: "surface",
                reason: format!("must be a positive number, got {}", self.surface),
            });
        }
        Ok(())
    }

    /// Feature vector in `RECOMMEND_FEATURES` order.
    pub fn to_features(&self) -> Vec<f64> {
        vec![
            self.price,
            self.surface,
            self.rooms as f64,
            self.location_score,
            self.lifestyle_score,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    pub suggested_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResponse {
    pub risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommended_cluster: usize,
}
