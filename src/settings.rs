use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
#[allow(unused)]
pub struct Settings {
    #[serde(default)]
    pub names: NamesConfig,
    #[serde(default)]
    pub grafana: FilePair,
    #[serde(default)]
    pub smarthome: SmartHomeConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(Environment::default())
    }

    /// Same as [`Settings::new`], but reads variables from `vars` instead of the process environment.
    pub fn from_env(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::default().source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default.toml").required(false))
            .add_source(environment.separator("_").ignore_empty(true))
            .build()?;

        settings.try_deserialize()
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct NamesConfig {
    pub input: Option<PathBuf>,
}

/// Input and output paths for one target system. The system is only processed
/// when both are set.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct FilePair {
    pub input: Option<PathBuf>,
    #[serde(alias = "ouptut")]
    pub output: Option<PathBuf>,
}

impl FilePair {
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.input.as_ref().zip(self.output.as_ref())
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct SmartHomeConfig {
    /// Directories holding `org.eclipse.smarthome.core.items.Item.json`.
    #[serde(default)]
    pub jsondb: FilePair,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reads_all_paths_from_environment() {
        let settings = Settings::from_env(vars(&[
            ("NAMES_INPUT", "/etc/mijia/sensor_names.conf"),
            ("GRAFANA_INPUT", "dashboard.json"),
            ("GRAFANA_OUTPUT", "out/dashboard.json"),
            ("SMARTHOME_JSONDB_INPUT", "/var/lib/openhab2/jsondb"),
            ("SMARTHOME_JSONDB_OUTPUT", "out/jsondb"),
        ]))
        .unwrap();

        assert_eq!(
            settings.names.input,
            Some(PathBuf::from("/etc/mijia/sensor_names.conf"))
        );
        assert_eq!(
            settings.grafana.paths(),
            Some((
                &PathBuf::from("dashboard.json"),
                &PathBuf::from("out/dashboard.json")
            ))
        );
        assert_eq!(
            settings.smarthome.jsondb.output,
            Some(PathBuf::from("out/jsondb"))
        );
    }

    #[test]
    fn test_accepts_misspelt_grafana_output() {
        let settings = Settings::from_env(vars(&[
            ("GRAFANA_INPUT", "dashboard.json"),
            ("GRAFANA_OUPTUT", "out/dashboard.json"),
        ]))
        .unwrap();

        assert_eq!(
            settings.grafana.output,
            Some(PathBuf::from("out/dashboard.json"))
        );
    }

    #[test]
    fn test_half_configured_system_has_no_paths() {
        let settings = Settings::from_env(vars(&[
            ("NAMES_INPUT", "names.conf"),
            ("SMARTHOME_JSONDB_INPUT", "jsondb"),
        ]))
        .unwrap();

        assert!(settings.smarthome.jsondb.paths().is_none());
        assert!(settings.grafana.paths().is_none());
    }

    #[test]
    fn test_missing_everything_is_not_a_config_error() {
        let settings = Settings::from_env(vars(&[])).unwrap();

        assert!(settings.names.input.is_none());
    }
}
