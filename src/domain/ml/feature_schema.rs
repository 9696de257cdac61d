use serde::{Deserialize, Serialize};

/// Ordered list of feature names for the price regressor.
/// This order MUST match exactly the column order used by the training
/// binaries. Any change here is a breaking change for saved artifacts.
pub const PRICE_FEATURES: &[&str] = &[
    "surface",
    "rooms",
    "location_score",
    "distance_center",
    "season_index",
];

/// Feature order for the tenant risk classifier.
pub const RISK_FEATURES: &[&str] = &["late_payments", "disputes", "rental_duration"];

/// Feature order for the property recommendation clusterer and its scaler.
pub const RECOMMEND_FEATURES: &[&str] = &[
    "price",
    "surface",
    "rooms",
    "location_score",
    "lifestyle_score",
];

/// Number of clusters the recommendation model is trained with.
pub const RECOMMEND_CLUSTERS: usize = 5;

/// Version of the feature contracts above. Bumped whenever a column list
/// changes; artifacts trained against an older version are rejected at load.
pub const SCHEMA_VERSION: u32 = 1;

/// Named, versioned column contract stored next to every model artifact.
///
/// The trainers write one sidecar per artifact; the model store verifies each
/// sidecar against the constants above before the process starts serving.
/// This replaces the old convention of keeping two literal lists in sync by
/// hand between training and serving code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub model: String,
    pub version: u32,
    pub columns: Vec<String>,
}

impl FeatureSchema {
    fn new(model: &str, columns: &[&str]) -> Self {
        Self {
            model: model.to_string(),
            version: SCHEMA_VERSION,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn price() -> Self {
        Self::new("price", PRICE_FEATURES)
    }

    pub fn risk() -> Self {
        Self::new("risk", RISK_FEATURES)
    }

    pub fn recommend() -> Self {
        Self::new("recommend", RECOMMEND_FEATURES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lengths() {
        assert_eq!(FeatureSchema::price().columns.len(), PRICE_FEATURES.len());
        assert_eq!(FeatureSchema::risk().columns.len(), RISK_FEATURES.len());
        assert_eq!(
            FeatureSchema::recommend().columns.len(),
            RECOMMEND_FEATURES.len()
        );
    }

    #[test]
    fn test_schema_roundtrip() {
        let schema = FeatureSchema::recommend();
        let json = serde_json::to_string(&schema).unwrap();
        let back: FeatureSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
        assert_eq!(back.columns[0], "price");
        assert_eq!(back.columns[4], "lifestyle_score");
    }
}
