use std::fs;
use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use log::{info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::config::schema::load_schema;
use crate::config::settings::Config;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Can't read configuration at {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("Configuration is not valid JSON: {0}")]
    JsonDecode(serde_json::Error),
    #[error("Configuration fails validation: {}", .0.join("; "))]
    JsonValidation(Vec<String>),
    #[error("Can't deserialise configuration: {0}")]
    Deserialisation(serde_json::Error),
    #[error(transparent)]
    Schema(#[from] anyhow::Error),
}

/// Read, validate, and deserialise a configuration file in one go
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let source = ConfigSource { path: path.to_path_buf(), compiled_schema: load_schema()? };
    source.read()
}

/// A configuration file on disk paired with the schema it must satisfy
pub struct ConfigSource {
    pub path: PathBuf,
    pub compiled_schema: JSONSchema,
}

impl ConfigSource {
    pub fn read(&self) -> Result<Config, ConfigError> {
        let json: Value = self.parse_untyped_json()?;

        match self.validate(&json) {
            Ok(_) => {
                info!("Configuration is valid");
                self.parse_json(json)
            }
            Err(err) => {
                warn!("Configuration fails validation");
                Err(err)
            }
        }
    }

    /// Check a parsed document against the schema, collecting every violation
    pub fn validate(&self, json: &Value) -> Result<(), ConfigError> {
        info!("Validating configuration against JSON schema");
        match self.compiled_schema.validate(json) {
            Ok(_) => Ok(()),
            Err(errors) => {
                let messages: Vec<String> = errors
                    .map(|err| format!("{} at '{}'", err, err.instance_path))
                    .collect();
                for message in &messages {
                    warn!("{}", message);
                }
                Err(ConfigError::JsonValidation(messages))
            }
        }
    }

    fn read_file(&self) -> Result<String, ConfigError> {
        let path: &Path = self.path.as_path();
        info!("Reading configuration at {}", path.display());
        fs::read_to_string(path).map_err(|err| {
            warn!("Can't read configuration at path {}: {}", path.display(), err);
            ConfigError::Read { path: self.path.clone(), source: err }
        })
    }

    fn parse_json(&self, value: Value) -> Result<Config, ConfigError> {
        info!("Deserialising valid JSON into typed configuration");
        serde_json::from_value::<Config>(value).map_err(ConfigError::Deserialisation)
    }

    fn parse_untyped_json(&self) -> Result<Value, ConfigError> {
        let json_string = self.read_file()?;
        serde_json::from_str::<Value>(&json_string).map_err(ConfigError::JsonDecode)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"{
                "gatk": {
                    "gatk": "/opt/gatk/gatk",
                    "markdup_java_options": ["-Xmx8G"],
                    "bundle": {
                        "hapmap": "h", "omni": "o", "1000G": "g",
                        "mills": "m", "1000G_known_indel": "k", "dbsnp": "d"
                    }
                },
                "resources": {"reference": "/ref/hg38.fa"}
            }"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.gatk.gatk, "/opt/gatk/gatk");
        assert_eq!(config.gatk.markdup_java_options, vec!["-Xmx8G"]);
        assert!(config.gatk.bqsr_java_options.is_empty());
        assert_eq!(config.resources.reference, "/ref/hg38.fa");
    }

    #[test]
    fn test_missing_reference_fails_validation() {
        let file = write_config(
            r#"{
                "gatk": {
                    "gatk": "gatk",
                    "bundle": {
                        "hapmap": "h", "omni": "o", "1000G": "g",
                        "mills": "m", "1000G_known_indel": "k", "dbsnp": "d"
                    }
                },
                "resources": {}
            }"#,
        );
        let err = load_config(file.path()).unwrap_err();
        match err {
            ConfigError::JsonValidation(messages) => {
                assert!(messages.iter().any(|m| m.contains("reference")));
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_not_json() {
        let file = write_config("gatk: /opt/gatk");
        assert!(matches!(load_config(file.path()), Err(ConfigError::JsonDecode(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/vcplan.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
