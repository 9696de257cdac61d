use smartcore::api::Transformer;
use smartcore::cluster::kmeans::KMeans;
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::preprocessing::numerical::StandardScaler;

use super::predictor::{ClusterAssigner, ProbabilityClassifier, Regressor};
use crate::domain::errors::InferenceError;

pub type FittedRegressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type FittedClassifier = RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;
pub type FittedKMeans = KMeans<f64, i32, DenseMatrix<f64>, Vec<i32>>;
pub type FittedScaler = StandardScaler<f64>;

fn single_row(features: &[f64]) -> Result<DenseMatrix<f64>, InferenceError> {
    DenseMatrix::from_2d_vec(&vec![features.to_vec()])
        .map_err(|e| InferenceError::Matrix(e.to_string()))
}

/// Random forest regressor behind the [`Regressor`] capability.
pub struct ForestRegressor {
    model: FittedRegressor,
}

impl ForestRegressor {
    pub fn new(model: FittedRegressor) -> Self {
        Self { model }
    }
}

impl Regressor for ForestRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let input = single_row(features)?;
        let predictions = self
            .model
            .predict(&input)
            .map_err(|e| InferenceError::Predict(e.to_string()))?;
        predictions
            .first()
            .copied()
            .ok_or(InferenceError::EmptyPrediction)
    }
}

/// Random forest classifier behind the [`ProbabilityClassifier`] capability.
pub struct ForestClassifier {
    model: FittedClassifier,
}

impl ForestClassifier {
    pub fn new(model: FittedClassifier) -> Self {
        Self { model }
    }
}

impl ProbabilityClassifier for ForestClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        let input = single_row(features)?;
        let proba = self
            .model
            .predict_proba(&input)
            .map_err(|e| InferenceError::Predict(e.to_string()))?;
        let (rows, cols) = proba.shape();
        if rows == 0 {
            return Err(InferenceError::EmptyPrediction);
        }
        Ok((0..cols).map(|col| *proba.get((0, col))).collect())
    }
}

/// K-means clusterer paired with the scaler fitted in the same training run.
///
/// The scaler is applied before every prediction; inputs above this type are
/// always in raw feature units.
pub struct ScaledKMeans {
    scaler: FittedScaler,
    model: FittedKMeans,
}

impl ScaledKMeans {
    pub fn new(scaler: FittedScaler, model: FittedKMeans) -> Self {
        Self { scaler, model }
    }
}

impl ClusterAssigner for ScaledKMeans {
    fn assign(&self, features: &[f64]) -> Result<usize, InferenceError> {
        let input = single_row(features)?;
        let scaled = self
            .scaler
            .transform(&input)
            .map_err(|e| InferenceError::Predict(e.to_string()))?;
        let labels = self
            .model
            .predict(&scaled)
            .map_err(|e| InferenceError::Predict(e.to_string()))?;
        let label = labels
            .first()
            .copied()
            .ok_or(InferenceError::EmptyPrediction)?;
        Ok(label as usize)
    }
}
