// src/config/loader.rs

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variables checked, in rotation order, for Gemini API keys.
const KEY_SLOT_VARS: [&str; 6] = [
    "GEMINI_API_KEY_1",
    "GEMINI_API_KEY_2",
    "GEMINI_API_KEY_3",
    "GEMINI_API_KEY_4",
    "GEMINI_API_KEY_5",
    "GEMINI_API_KEY",
];

/// Load configuration from file or environment variables
pub fn load_config(config_path: &Path) -> Result<AppConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!("Configuration file not found, using defaults");
        AppConfig::default()
    };

    // Override with environment variables
    override_with_env(&mut config);

    validate(&config)?;

    debug!("Configuration loaded and validated successfully");
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|e| AppError::ConfigParse {
        message: format!("Failed to read config file '{}': {}", config_path.display(), e),
    })?;

    serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
        message: format!("Failed to parse config file: {e}"),
    })
}

fn override_with_env(config: &mut AppConfig) {
    if let Ok(port_str) = std::env::var("PORT") {
        if let Ok(port) = port_str.parse::<u16>() {
            info!("Overriding server port from environment variable: {}", port);
            config.server.port = port;
        } else {
            warn!("Invalid PORT environment variable: {}", port_str);
        }
    }

    if let Ok(path) = std::env::var("CHAMPIONS_DATA_PATH") {
        info!("Overriding catalog path from environment variable");
        config.catalog_path = path;
    }

    // The named key slots and the comma-separated overflow list are appended
    // after any keys listed in the config file.
    let mut env_keys: Vec<String> = KEY_SLOT_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .collect();
    if let Ok(extra) = std::env::var("GEMINI_API_KEYS") {
        env_keys.extend(extra.split(',').map(str::to_string));
    }
    config.gemini.api_keys.extend(env_keys);
    config
        .gemini
        .api_keys
        .retain(|k| !k.trim().is_empty());
}

fn validate(config: &AppConfig) -> Result<()> {
    if config.gemini.max_attempts == 0 {
        return Err(AppError::ConfigParse {
            message: "gemini.max_attempts must be at least 1".to_string(),
        });
    }
    if config.gemini.base_url.trim().is_empty() {
        return Err(AppError::ConfigParse {
            message: "gemini.base_url must not be empty".to_string(),
        });
    }
    if config.gemini.api_keys.is_empty() {
        // Degraded mode: every AI-backed call short-circuits to its fallback.
        warn!("No Gemini API keys configured! AI endpoints will serve local fallbacks only.");
    } else {
        info!(
            key_count = config.gemini.api_keys.len(),
            "Gemini key pool configured"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn clear_key_env() {
        for var in KEY_SLOT_VARS {
            std::env::remove_var(var);
        }
        std::env::remove_var("GEMINI_API_KEYS");
        std::env::remove_var("PORT");
        std::env::remove_var("CHAMPIONS_DATA_PATH");
    }

    #[test]
    #[serial]
    fn missing_file_yields_defaults() {
        clear_key_env();
        let config = load_config(Path::new("/nonexistent/config.yaml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.max_attempts, 3);
        assert_eq!(config.gemini.cooldown_secs, 60);
        assert_eq!(config.meta.ttl_hours, 24);
        assert!(config.gemini.api_keys.is_empty());
    }

    #[test]
    #[serial]
    fn env_keys_are_collected_in_slot_order() {
        clear_key_env();
        std::env::set_var("GEMINI_API_KEY_1", "key-one");
        std::env::set_var("GEMINI_API_KEY_3", "key-three");
        std::env::set_var("GEMINI_API_KEYS", "extra-a, ,extra-b");

        let config = load_config(Path::new("/nonexistent/config.yaml")).unwrap();
        assert_eq!(
            config.gemini.api_keys,
            vec!["key-one", "key-three", "extra-a", "extra-b"]
        );
        clear_key_env();
    }

    #[test]
    #[serial]
    fn file_values_survive_env_overlay() {
        clear_key_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\ngemini:\n  api_keys: [\"file-key\"]\n  max_attempts: 5"
        )
        .unwrap();
        std::env::set_var("GEMINI_API_KEY_1", "env-key");

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.gemini.max_attempts, 5);
        assert_eq!(config.gemini.api_keys, vec!["file-key", "env-key"]);
        clear_key_env();
    }

    #[test]
    #[serial]
    fn zero_max_attempts_is_rejected() {
        clear_key_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "gemini:\n  max_attempts: 0").unwrap();

        assert!(load_config(&path).is_err());
    }
}
