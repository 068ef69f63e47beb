use std::path::Path;

use crate::error::ConfigError;
use crate::model::LstmPolicyConfig;
use crate::training::trainer::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: LstmPolicyConfig,
    pub training: TrainerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.data_dim == 0 {
            return Err(ConfigError::Validation("model.data_dim must be > 0".into()));
        }
        if self.model.timesteps == 0 {
            return Err(ConfigError::Validation(
                "model.timesteps must be > 0".into(),
            ));
        }
        if self.model.hidden_size == 0 {
            return Err(ConfigError::Validation(
                "model.hidden_size must be > 0".into(),
            ));
        }
        if self.model.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "model.learning_rate must be > 0".into(),
            ));
        }
        if self.training.epochs == 0 {
            return Err(ConfigError::Validation("training.epochs must be > 0".into()));
        }
        if self.training.timesteps == 0 {
            return Err(ConfigError::Validation(
                "training.timesteps must be > 0".into(),
            ));
        }
        if self.training.predict_days == 0 {
            return Err(ConfigError::Validation(
                "training.predict_days must be >= 1".into(),
            ));
        }
        if self.training.batch_size == 0 {
            return Err(ConfigError::Validation(
                "training.batch_size must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.training.validation_split) {
            return Err(ConfigError::Validation(
                "training.validation_split must be in [0, 1]".into(),
            ));
        }
        if self.training.timesteps != self.model.timesteps {
            return Err(ConfigError::Validation(
                "training.timesteps must match model.timesteps".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
