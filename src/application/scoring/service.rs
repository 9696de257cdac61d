use crate::application::ml::predictor::{ClusterAssigner, ProbabilityClassifier, Regressor};
use crate::domain::errors::{InferenceError, ScoringError};
use crate::domain::scoring::types::{
    PriceRequest, PriceResponse, RecommendRequest, RecommendResponse, RiskRequest, RiskResponse,
};

/// Index of the "will default" class in the risk classifier output.
const RISK_POSITIVE_CLASS: usize = 1;

/// Stateless scoring facade over the loaded models.
///
/// Each method is a pure function of (request, loaded artifacts): validate
/// the payload, build the feature vector, run the model, shape the result.
/// The models are read-only after load, so the service is freely shared
/// across concurrent request tasks.
pub struct ScoringService {
    price_model: Box<dyn Regressor>,
    risk_model: Box<dyn ProbabilityClassifier>,
    recommend_model: Box<dyn ClusterAssigner>,
}

impl ScoringService {
    pub fn new(
        price_model: Box<dyn Regressor>,
        risk_model: Box<dyn ProbabilityClassifier>,
        recommend_model: Box<dyn ClusterAssigner>,
    ) -> Self {
        Self {
            price_model,
            risk_model,
            recommend_model,
        }
    }

    pub fn suggest_price(&self, request: &PriceRequest) -> Result<PriceResponse, ScoringError> {
        request.validate()?;
        let predicted = self.price_model.predict(&request.to_features())?;
        Ok(PriceResponse {
            suggested_price: round2(predicted),
        })
    }

    pub fn score_risk(&self, request: &RiskRequest) -> Result<RiskResponse, ScoringError> {
        request.validate()?;
        let proba = self.risk_model.predict_proba(&request.to_features())?;
        let positive = proba.get(RISK_POSITIVE_CLASS).copied().ok_or(
            InferenceError::MissingClass {
                class_index: RISK_POSITIVE_CLASS,
                n_classes: proba.len(),
            },
        )?;
        Ok(RiskResponse {
            risk_score: round2(positive * 100.0),
        })
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, ScoringError> {
        request.validate()?;
        let cluster = self.recommend_model.assign(&request.to_features())?;
        Ok(RecommendResponse {
            recommended_cluster: cluster,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
