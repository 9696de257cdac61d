use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::application::ml::smartcore_models::{
    FittedClassifier, FittedKMeans, FittedRegressor, FittedScaler, ForestClassifier,
    ForestRegressor, ScaledKMeans,
};
use crate::application::scoring::ScoringService;
use crate::config::Config;
use crate::domain::errors::ModelLoadError;
use crate::domain::ml::FeatureSchema;

/// Read-only holder of the four artifacts loaded once at process start.
///
/// Loading is all-or-nothing: a missing file, a deserialization failure or a
/// schema sidecar that disagrees with the serving-side contract aborts
/// startup. There is no reload and no hot swap; artifacts are immutable for
/// the process lifetime.
pub struct ModelStore {
    price: ForestRegressor,
    risk: ForestClassifier,
    recommend: ScaledKMeans,
}

impl ModelStore {
    pub fn load(config: &Config) -> Result<Self, ModelLoadError> {
        let price_path = config.price_model_path();
        let risk_path = config.risk_model_path();
        let recommend_path = config.recommend_model_path();
        let scaler_path = config.recommend_scaler_path();

        verify_schema(&price_path, &FeatureSchema::price())?;
        verify_schema(&risk_path, &FeatureSchema::risk())?;
        verify_schema(&recommend_path, &FeatureSchema::recommend())?;
        // The scaler is fitted on the same columns as the clusterer and
        // carries an identical sidecar.
        verify_schema(&scaler_path, &FeatureSchema::recommend())?;

        let price: FittedRegressor = read_artifact(&price_path)?;
        let risk: FittedClassifier = read_artifact(&risk_path)?;
        let recommend: FittedKMeans = read_artifact(&recommend_path)?;
        let scaler: FittedScaler = read_artifact(&scaler_path)?;

        info!("Loaded model artifacts from {:?}", config.model_dir);

        Ok(Self {
            price: ForestRegressor::new(price),
            risk: ForestClassifier::new(risk),
            recommend: ScaledKMeans::new(scaler, recommend),
        })
    }

    pub fn into_service(self) -> ScoringService {
        ScoringService::new(
            Box::new(self.price),
            Box::new(self.risk),
            Box::new(self.recommend),
        )
    }
}

/// Sidecar path for an artifact: `price_model.json` -> `price_model.schema.json`.
pub fn schema_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    artifact.with_file_name(format!("{stem}.schema.json"))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let file = File::open(path).map_err(|e| ModelLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelLoadError::Deserialize {
        path: path.to_path_buf(),
        source: e,
    })
}

fn verify_schema(artifact: &Path, expected: &FeatureSchema) -> Result<(), ModelLoadError> {
    let path = schema_path(artifact);
    if !path.exists() {
        return Err(ModelLoadError::SchemaMissing { path });
    }
    let found: FeatureSchema = read_artifact(&path)?;
    if found.version != expected.version {
        return Err(ModelLoadError::SchemaVersion {
            model: expected.model.clone(),
            expected: expected.version,
            found: found.version,
        });
    }
    if found.model != expected.model || found.columns != expected.columns {
        return Err(ModelLoadError::SchemaMismatch {
            model: expected.model.clone(),
            expected: expected.columns.clone(),
            found: found.columns,
        });
    }
    Ok(())
}

/// Serializes a fitted model (or any artifact) to `path`, creating parent
/// directories. Used by the training binaries; the server only reads.
pub fn write_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<(), ModelLoadError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ModelLoadError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let file = File::create(path).map_err(|e| ModelLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer(file, artifact).map_err(|e| ModelLoadError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Writes the feature-schema sidecar for an artifact.
pub fn write_schema(artifact: &Path, schema: &FeatureSchema) -> Result<(), ModelLoadError> {
    write_artifact(&schema_path(artifact), schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_path_replaces_extension() {
        let path = schema_path(Path::new("data/models/price_model.json"));
        assert_eq!(path, Path::new("data/models/price_model.schema.json"));
    }
}
