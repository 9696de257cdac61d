use crate::config::Config;
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn clear_env() {
    unsafe {
        env::remove_var("BIND_ADDR");
        env::remove_var("MODEL_DIR");
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr.port(), 8000);
    assert_eq!(config.model_dir, std::path::Path::new("data/models"));
}

#[test]
fn test_config_overrides_and_artifact_paths() {
    let _guard = get_env_lock().lock().unwrap();
    unsafe {
        env::set_var("BIND_ADDR", "127.0.0.1:9100");
        env::set_var("MODEL_DIR", "/tmp/estateml-models");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr.port(), 9100);
    assert_eq!(
        config.price_model_path(),
        std::path::Path::new("/tmp/estateml-models/price_model.json")
    );
    assert_eq!(
        config.recommend_scaler_path(),
        std::path::Path::new("/tmp/estateml-models/recommend_scaler.json")
    );

    clear_env();
}

#[test]
fn test_invalid_bind_addr_is_rejected() {
    let _guard = get_env_lock().lock().unwrap();
    unsafe {
        env::set_var("BIND_ADDR", "not-an-addr");
    }

    assert!(Config::from_env().is_err());

    clear_env();
}
