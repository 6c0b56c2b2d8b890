use std::collections::HashSet;
use std::path::Path;

use crate::agents::AgentSpec;
use crate::error::ConfigError;
use crate::game::{EvaluationOptions, TrainingCycleOptions};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub training: TrainingConfig,
    pub roster: Vec<RosterEntry>,
}

/// Training-run parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub cycles: usize,
    pub derivative_step: f64,
    pub learning_rate: f64,
    pub hands: usize,
    pub ante: f64,
    /// Run training on a background worker instead of the calling thread.
    pub background: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            cycles: 30,
            derivative_step: 0.001,
            learning_rate: 0.1,
            hands: 1000,
            ante: 0.001,
            background: false,
        }
    }
}

impl TrainingConfig {
    pub fn cycle_options(&self) -> TrainingCycleOptions {
        TrainingCycleOptions {
            derivative_step: self.derivative_step,
            learning_rate: self.learning_rate,
            evaluation: EvaluationOptions {
                hands: self.hands,
                ante: self.ante,
            },
        }
    }
}

/// One named agent in the configured roster. The first entry is the default
/// trainee; the rest are opponents.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub agent: AgentSpec,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            training: TrainingConfig::default(),
            roster: default_roster(),
        }
    }
}

fn default_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry {
            name: "trainee".to_string(),
            agent: AgentSpec::Neural { hidden_size: 16 },
        },
        RosterEntry {
            name: "halfpot".to_string(),
            agent: AgentSpec::Constant { bet: 0.5 },
        },
        RosterEntry {
            name: "mirror".to_string(),
            agent: AgentSpec::Mirror,
        },
        RosterEntry {
            name: "coinflip".to_string(),
            agent: AgentSpec::Random,
        },
    ]
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

    /// Validate configuration values. Anything that reaches the core
    /// untrusted is range-checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let training = &self.training;
        if training.cycles == 0 {
            return Err(ConfigError::Validation(
                "training.cycles must be > 0".into(),
            ));
        }
        if training.hands == 0 {
            return Err(ConfigError::Validation("training.hands must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&training.ante) {
            return Err(ConfigError::Validation(
                "training.ante must be in [0, 1]".into(),
            ));
        }
        if !(training.derivative_step > 0.0) || !training.derivative_step.is_finite() {
            return Err(ConfigError::Validation(
                "training.derivative_step must be positive and finite".into(),
            ));
        }
        if !(training.learning_rate > 0.0) || !training.learning_rate.is_finite() {
            return Err(ConfigError::Validation(
                "training.learning_rate must be positive and finite".into(),
            ));
        }

        let mut names = HashSet::new();
        for entry in &self.roster {
            if entry.name.is_empty() {
                return Err(ConfigError::Validation(
                    "roster entry names must not be empty".into(),
                ));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate roster entry name {:?}",
                    entry.name
                )));
            }
            validate_spec(&entry.name, &entry.agent)?;
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

fn validate_spec(name: &str, spec: &AgentSpec) -> Result<(), ConfigError> {
    match *spec {
        AgentSpec::Neural { hidden_size } | AgentSpec::SoloNeural { hidden_size } => {
            if hidden_size == 0 {
                return Err(ConfigError::Validation(format!(
                    "roster entry {name:?}: hidden_size must be > 0"
                )));
            }
        }
        AgentSpec::Constant { bet } => {
            if !(0.0..=1.0).contains(&bet) {
                return Err(ConfigError::Validation(format!(
                    "roster entry {name:?}: bet must be in [0, 1]"
                )));
            }
        }
        AgentSpec::GatedRandom { min_strength } => {
            if !(0.0..=1.0).contains(&min_strength) {
                return Err(ConfigError::Validation(format!(
                    "roster entry {name:?}: min_strength must be in [0, 1]"
                )));
            }
        }
        AgentSpec::Mirror | AgentSpec::Threshold | AgentSpec::Random => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[training]
hands = 250
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.training.hands, 250);
        // Other fields should be defaults
        assert_eq!(config.training.cycles, 30);
        assert!((config.training.learning_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.training.hands, default.training.hands);
        assert_eq!(config.roster.len(), default.roster.len());
    }

    #[test]
    fn test_roster_toml_form() {
        let toml_str = r#"
[[roster]]
name = "steady"

[roster.agent]
type = "constant"
bet = 0.4

[[roster]]
name = "gate"

[roster.agent]
type = "gated_random"
min_strength = 0.6
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.roster.len(), 2);
        assert_eq!(config.roster[0].name, "steady");
        assert!(matches!(
            config.roster[1].agent,
            AgentSpec::GatedRandom { min_strength } if min_strength == 0.6
        ));
    }

    #[test]
    fn test_validation_rejects_zero_cycles() {
        let mut config = AppConfig::default();
        config.training.cycles = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_hands() {
        let mut config = AppConfig::default();
        config.training.hands = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_ante_out_of_range() {
        let mut config = AppConfig::default();
        config.training.ante = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_derivative_step() {
        let mut config = AppConfig::default();
        config.training.derivative_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_infinite_learning_rate() {
        let mut config = AppConfig::default();
        config.training.learning_rate = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_names() {
        let mut config = AppConfig::default();
        let duplicate = config.roster[0].clone();
        config.roster.push(duplicate);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_constant_bet() {
        let mut config = AppConfig::default();
        config.roster.push(RosterEntry {
            name: "overbet".to_string(),
            agent: AgentSpec::Constant { bet: 2.0 },
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_hidden_size() {
        let mut config = AppConfig::default();
        config.roster.push(RosterEntry {
            name: "empty".to_string(),
            agent: AgentSpec::Neural { hidden_size: 0 },
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.cycles, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[training]
cycles = 5
ante = 0.01
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.cycles, 5);
        assert!((config.training.ante - 0.01).abs() < 1e-12);
        // Others are defaults
        assert_eq!(config.training.hands, 1000);
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config
            .validate()
            .expect("roundtripped config should be valid");
    }
}
