//! Shared config utilities: JSON config load/save and API-key resolution
//! from direct fields or environment variables.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load any Serde config type that has a `Default`. A missing or unparsable
/// file falls back to `T::default()` rather than failing startup.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            println!(
                "[{}] No config file at {} — using defaults",
                label,
                path.display()
            );
            return T::default();
        }
    };
    match serde_json::from_str::<T>(&content) {
        Ok(config) => {
            println!("[{}] Loaded config from {}", label, path.display());
            config
        }
        Err(e) => {
            eprintln!(
                "[{}] Failed to parse config {}: {} — using defaults",
                label,
                path.display(),
                e
            );
            T::default()
        }
    }
}

/// Save any Serde config type as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save_json_config<T: Serialize>(path: &Path, config: &T, label: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config).context("serializing config")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing config file {}", path.display()))?;
    println!("[{}] Saved config to {}", label, path.display());
    Ok(())
}

/// Resolve an API key: the direct field wins; otherwise read the environment
/// variable named in `api_key_env`. Empty strings count as absent.
pub fn resolve_api_key(api_key: &Option<String>, api_key_env: &Option<String>) -> Option<String> {
    if let Some(key) = api_key {
        if !key.is_empty() {
            return Some(key.clone());
        }
    }
    if let Some(env_var) = api_key_env {
        if let Ok(key) = std::env::var(env_var) {
            if !key.is_empty() {
                return Some(key);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");
        let sample = Sample {
            name: "octo".to_string(),
            count: 3,
        };
        save_json_config(&path, &sample, "Test").unwrap();
        let loaded: Sample = load_json_config(&path, "Test");
        assert_eq!(loaded, sample);
    }

    #[test]
    fn unparsable_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded: Sample = load_json_config(&path, "Test");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn direct_key_beats_env_var() {
        let direct = Some("direct".to_string());
        let env = Some("OCTO_TEST_KEY_THAT_DOES_NOT_EXIST".to_string());
        assert_eq!(resolve_api_key(&direct, &env), Some("direct".to_string()));
        assert_eq!(resolve_api_key(&None, &env), None);
    }
}
