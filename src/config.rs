//! Configuration management for CourseKit

use crate::error::{BuilderError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "course-builder.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuilderConfig {
    #[serde(default)]
    pub builder: BuilderSection,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuilderSection {
    #[serde(default = "default_padding")]
    pub default_padding: String,
    /// Upper bound on components per lesson; 0 disables the limit.
    #[serde(default = "default_max_components")]
    pub max_components: usize,
}

impl Default for BuilderSection {
    fn default() -> Self {
        Self {
            default_padding: default_padding(),
            max_components: default_max_components(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_min_options")]
    pub min_options: usize,
    #[serde(default = "default_max_options")]
    pub max_options: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            min_options: default_min_options(),
            max_options: default_max_options(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_lesson_path")]
    pub lesson_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lesson_path: default_lesson_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: BuilderConfig = if config_str.trim().is_empty() {
            BuilderConfig::default()
        } else {
            toml::from_str(config_str)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(BuilderConfig::default());
        }
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.lesson_path.trim().is_empty() {
            return Err(BuilderError::Config(
                "storage.lesson_path must be set".to_string(),
            ));
        }
        if self.quiz.min_options < 2 {
            return Err(BuilderError::Config(
                "quiz.min_options must be at least 2".to_string(),
            ));
        }
        if self.quiz.max_options < self.quiz.min_options {
            return Err(BuilderError::Config(format!(
                "quiz.max_options ({}) must not be below quiz.min_options ({})",
                self.quiz.max_options, self.quiz.min_options
            )));
        }
        // The default quiz ships four options.
        if self.quiz.min_options > 4 || self.quiz.max_options < 4 {
            return Err(BuilderError::Config(
                "quiz limits must admit the default four options".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads `course-builder.toml` from the working directory.
pub fn load_config() -> Result<BuilderConfig> {
    BuilderConfig::load(Path::new(DEFAULT_CONFIG_FILE))
}

fn default_padding() -> String {
    "16px".to_string()
}

fn default_max_components() -> usize {
    500
}

fn default_min_options() -> usize {
    2
}

fn default_max_options() -> usize {
    10
}

fn default_lesson_path() -> String {
    "./lesson.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BuilderConfig::from_toml_str("").unwrap();
        assert_eq!(config, BuilderConfig::default());
        assert_eq!(config.builder.default_padding, "16px");
        assert_eq!(config.builder.max_components, 500);
        assert_eq!(config.quiz.min_options, 2);
        assert_eq!(config.quiz.max_options, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config() {
        let config = BuilderConfig::from_toml_str(
            r#"
            [builder]
            default_padding = "12px"

            [quiz]
            max_options = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.builder.default_padding, "12px");
        assert_eq!(config.builder.max_components, 500);
        assert_eq!(config.quiz.min_options, 2);
        assert_eq!(config.quiz.max_options, 6);
    }

    #[test]
    fn test_invalid_quiz_limits() {
        let err = BuilderConfig::from_toml_str("[quiz]\nmin_options = 1\n").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));

        let err =
            BuilderConfig::from_toml_str("[quiz]\nmin_options = 5\nmax_options = 4\n").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }

    #[test]
    fn test_empty_lesson_path_rejected() {
        let err = BuilderConfig::from_toml_str("[storage]\nlesson_path = \"\"\n").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = BuilderConfig::from_toml_str("[builder\n").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("course-builder.toml");
        assert_eq!(BuilderConfig::load(&path).unwrap(), BuilderConfig::default());

        fs::write(&path, "[storage]\nlesson_path = \"intro.json\"\n").unwrap();
        let config = BuilderConfig::load(&path).unwrap();
        assert_eq!(config.storage.lesson_path, "intro.json");
    }
}
