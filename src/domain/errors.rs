use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading model artifacts at startup.
///
/// Any of these is fatal: the process must not start serving with a partial
/// or unverified model set.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize artifact {path}: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize artifact {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Feature schema sidecar missing: {path}")]
    SchemaMissing { path: PathBuf },

    #[error("Feature schema version mismatch for {model}: expected v{expected}, found v{found}")]
    SchemaVersion {
        model: String,
        expected: u32,
        found: u32,
    },

    #[error("Feature schema mismatch for {model}: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        model: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// A request field failed its range constraint. Raised before any model call.
#[derive(Debug, Error)]
#[error("Invalid value for {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

/// Errors raised inside a single model invocation.
///
/// These are unrecovered: no retry, no fallback value. The HTTP layer maps
/// them to a generic internal error.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to build input matrix: {0}")]
    Matrix(String),

    #[error("Model prediction failed: {0}")]
    Predict(String),

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Class {class_index} not present in classifier output ({n_classes} classes)")]
    MissingClass {
        class_index: usize,
        n_classes: usize,
    },
}

/// Combined failure type for one scoring operation.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_formatting() {
        let err = ValidationError {
            field: "surface",
            reason: "must be a positive number, got -3".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("surface"));
        assert!(msg.contains("-3"));
    }

    #[test]
    fn test_missing_class_formatting() {
        let err = InferenceError::MissingClass {
            class_index: 1,
            n_classes: 1,
        };

        let msg = err.to_string();
        assert!(msg.contains("Class 1"));
        assert!(msg.contains("1 classes"));
    }

    #[test]
    fn test_schema_mismatch_formatting() {
        let err = ModelLoadError::SchemaMismatch {
            model: "price".to_string(),
            expected: vec!["surface".to_string()],
            found: vec!["rooms".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.contains("price"));
        assert!(msg.contains("surface"));
        assert!(msg.contains("rooms"));
    }
}
