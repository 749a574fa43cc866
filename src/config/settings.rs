//! Configuration settings for the simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub controller: ControllerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub tick_interval_ms: u64,
    pub show_counts: bool,
    #[serde(default)]
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 30,
                height: 20,
            },
            controller: ControllerConfig {
                tick_interval_ms: 10,
                show_counts: false,
                max_generations: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                color: true,
            },
        }
    }
}

impl ControllerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Self::read_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load settings from `path` if it exists, otherwise fall back to defaults
    ///
    /// The result is not validated, so CLI overrides can still be merged in
    /// before calling [`Settings::validate`].
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::read_file(path)
        } else {
            log::warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if self.controller.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if self.controller.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(tick_interval_ms) = cli_overrides.tick_interval_ms {
            self.controller.tick_interval_ms = tick_interval_ms;
        }
        if let Some(generations) = cli_overrides.max_generations {
            self.controller.max_generations = Some(generations);
        }
        if cli_overrides.show_counts {
            self.controller.show_counts = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.no_color {
            self.output.color = false;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
    pub show_counts: bool,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.grid.width, 30);
        assert_eq!(settings.grid.height, 20);
        assert_eq!(settings.controller.tick_interval(), Duration::from_millis(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/config.yaml");

        let mut settings = Settings::default();
        settings.grid.width = 12;
        settings.controller.max_generations = Some(40);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_max_generations_defaults_to_none() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "grid:\n  width: 5\n  height: 4\ncontroller:\n  tick_interval_ms: 25\n  show_counts: true\noutput:\n  format: text\n  color: false\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.controller.max_generations, None);
        assert!(settings.controller.show_counts);
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.grid.height = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.controller.tick_interval_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.controller.max_generations = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_or_default() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::load_or_default(temp_dir.path().join("absent.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_override_fixes_invalid_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let mut settings = Settings::default();
        settings.grid.width = 0;
        std::fs::write(&path, serde_yaml::to_string(&settings).unwrap()).unwrap();

        assert!(Settings::from_file(&path).is_err());

        let mut loaded = Settings::load_or_default(&path).unwrap();
        assert!(loaded.validate().is_err());
        loaded.merge_with_cli(&CliOverrides {
            width: Some(5),
            ..Default::default()
        });
        assert!(loaded.validate().is_ok());
        assert_eq!(loaded.grid.width, 5);
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            width: Some(8),
            max_generations: Some(3),
            show_counts: true,
            format: Some(OutputFormat::Json),
            no_color: true,
            ..Default::default()
        });

        assert_eq!(settings.grid.width, 8);
        assert_eq!(settings.grid.height, 20);
        assert_eq!(settings.controller.max_generations, Some(3));
        assert!(settings.controller.show_counts);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(!settings.output.color);
    }
}
