use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the prediction server.
///
/// All settings come from environment variables (a `.env` file is honored by
/// the binary before this is read). The offline training binaries take CLI
/// flags instead and do not touch this.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub model_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse::<SocketAddr>()
            .context("Failed to parse BIND_ADDR")?;

        let model_dir: PathBuf = env::var("MODEL_DIR")
            .unwrap_or_else(|_| "data/models".to_string())
            .into();

        Ok(Config {
            bind_addr,
            model_dir,
        })
    }

    pub fn price_model_path(&self) -> PathBuf {
        self.model_dir.join("price_model.json")
    }

    pub fn risk_model_path(&self) -> PathBuf {
        self.model_dir.join("risk_model.json")
    }

    pub fn recommend_model_path(&self) -> PathBuf {
        self.model_dir.join("recommend_model.json")
    }

    pub fn recommend_scaler_path(&self) -> PathBuf {
        self.model_dir.join("recommend_scaler.json")
    }
}
