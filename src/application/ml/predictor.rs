use crate::domain::errors::InferenceError;

/// Interface for regression models producing one scalar per input.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

/// Interface for classifiers exposing a per-class probability distribution.
///
/// The returned vector is ordered by class label; callers index into it and
/// must handle the case where an expected class was never observed during
/// training.
pub trait ProbabilityClassifier: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}

/// Interface for clustering models assigning an input to one of k groups.
pub trait ClusterAssigner: Send + Sync {
    fn assign(&self, features: &[f64]) -> Result<usize, InferenceError>;
}
