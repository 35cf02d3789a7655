//! Configuration loading for the SigFig tools

use crate::error::{Error, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Default directory searched for `{app}.toml|yaml|json`
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Load configuration from multiple sources
///
/// Priority (highest to lowest):
/// 1. Environment variables prefixed with `{APP}_`
/// 2. Explicit config file (`file`)
/// 3. `config/{app}.json`, `config/{app}.yaml`, `config/{app}.toml`
/// 4. `T::default()`
pub fn load_config<T>(app_name: &str, file: Option<&Path>) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    load_config_in(Path::new(DEFAULT_CONFIG_DIR), app_name, file)
}

/// Same as [`load_config`] with an explicit search directory
pub fn load_config_in<T>(dir: &Path, app_name: &str, file: Option<&Path>) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let mut figment = Figment::from(Serialized::defaults(T::default()))
        .merge(Toml::file(dir.join(format!("{}.toml", app_name))))
        .merge(Yaml::file(dir.join(format!("{}.yaml", app_name))))
        .merge(Json::file(dir.join(format!("{}.json", app_name))));

    if let Some(path) = file {
        figment = merge_file(figment, path)?;
    }

    figment
        .merge(Env::prefixed(&format!("{}_", app_name.to_uppercase())))
        .extract()
        .map_err(|e| Error::Config(format!("Failed to load configuration: {}", e)))
}

/// Load configuration from a specific file only
pub fn load_config_from_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    merge_file(Figment::new(), path.as_ref())?
        .extract()
        .map_err(|e| Error::Config(format!("Failed to load configuration from file: {}", e)))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Config("Config file must have an extension".to_string()))?;

    let figment = match extension {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => {
            return Err(Error::Config(format!(
                "Unsupported config file format: {}",
                extension
            )))
        },
    };

    Ok(figment)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct DemoConfig {
        level: String,
        digits: u8,
        color: bool,
    }

    impl Default for DemoConfig {
        fn default() -> Self {
            Self {
                level: "warn".to_string(),
                digits: 0,
                color: true,
            }
        }
    }

    #[test]
    fn test_defaults_when_nothing_present() {
        let dir = tempfile::tempdir().unwrap();
        let config: DemoConfig = load_config_in(dir.path(), "demo_none", None).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_directory_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("demo_dir.toml"), "digits = 3\n").unwrap();

        let config: DemoConfig = load_config_in(dir.path(), "demo_dir", None).unwrap();
        assert_eq!(config.digits, 3);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_explicit_file_overrides_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("demo_explicit.toml"), "digits = 3\n").unwrap();
        let explicit = dir.path().join("override.yaml");
        fs::write(&explicit, "digits: 5\ncolor: false\n").unwrap();

        let config: DemoConfig =
            load_config_in(dir.path(), "demo_explicit", Some(explicit.as_path())).unwrap();
        assert_eq!(config.digits, 5);
        assert!(!config.color);
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("demo_env.json"), r#"{"digits": 2}"#).unwrap();
        std::env::set_var("DEMO_ENV_DIGITS", "4");

        let config: DemoConfig = load_config_in(dir.path(), "demo_env", None).unwrap();
        std::env::remove_var("DEMO_ENV_DIGITS");
        assert_eq!(config.digits, 4);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let result: Result<DemoConfig> =
            load_config_in(dir.path(), "demo_missing", Some(missing.as_path()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.ini");
        fs::write(&file, "digits=1").unwrap();

        let result: Result<DemoConfig> = load_config_from_file(&file);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.toml");
        fs::write(&file, "digits = \"many\"\n").unwrap();

        let result: Result<DemoConfig> = load_config_from_file(&file);
        assert!(result.is_err());
    }
}
