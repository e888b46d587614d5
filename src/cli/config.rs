//! Configuration management for the APEX harness
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.apex/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Verbosity;
use crate::engine::{DEFAULT_ALPHA, DEFAULT_ITERATIONS};
use crate::errors::{HarnessError, Result};
use crate::suite::{run_suite_on, SuiteReport, REFERENCE_INPUT};
use crate::trial::{Seed, Simulator, SimulatorKind, TestMode, TrialConfig};

/// Complete configuration for the harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
    pub paths: PathsConfig,
}

/// Multi-seed run defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub test_mode: TestMode,
    pub cycles: u32,
    pub default_seed: Seed,
    pub simulator: SimulatorKind,
}

/// Convergence engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub alpha: f64,
    pub iterations: usize,
    pub dimension: usize,
}

/// Telemetry display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub show_progress_bars: bool,
    pub color_output: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub results_dir: String,
    pub submit_dir: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_mode: TestMode::Phase1F,
            cycles: 2000,
            default_seed: 42,
            simulator: SimulatorKind::Drift,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            iterations: DEFAULT_ITERATIONS,
            dimension: 5,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            show_progress_bars: true,
            color_output: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            results_dir: "results".to_string(),
            submit_dir: "submit_results".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| HarnessError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".apex").join("config.toml"))
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.run.cycles == 0 {
            return Err(HarnessError::ConfigError(
                "run.cycles must be greater than 0".to_string(),
            ));
        }

        if !(self.engine.alpha > 0.0 && self.engine.alpha < 1.0) {
            return Err(HarnessError::ConfigError(format!(
                "engine.alpha must lie in (0, 1), got {}",
                self.engine.alpha
            )));
        }

        if self.engine.iterations == 0 {
            return Err(HarnessError::ConfigError(
                "engine.iterations must be greater than 0".to_string(),
            ));
        }

        if self.engine.dimension == 0 {
            return Err(HarnessError::ConfigError(
                "engine.dimension must be greater than 0".to_string(),
            ));
        }

        if Verbosity::from_label(&self.telemetry.default_verbosity).is_none() {
            return Err(HarnessError::ConfigError(format!(
                "Invalid verbosity level: {}",
                self.telemetry.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HarnessError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HarnessError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Trial configuration from the run section, with command-line overrides
    pub fn trial_config(
        &self,
        test_mode: Option<TestMode>,
        cycles: Option<u32>,
    ) -> Result<TrialConfig> {
        TrialConfig::new(
            test_mode.unwrap_or(self.run.test_mode),
            cycles.unwrap_or(self.run.cycles),
        )
    }

    /// Blend coefficient that replaces the mode profile's, if one was configured
    pub fn alpha_override(&self) -> Option<f64> {
        (self.engine.alpha != DEFAULT_ALPHA).then_some(self.engine.alpha)
    }

    /// Build a simulator with the engine section applied
    pub fn simulator(&self, kind: SimulatorKind) -> Box<dyn Simulator> {
        kind.build(self.engine.dimension, self.alpha_override())
    }

    /// Run the reference suite with the configured alpha and iteration count
    pub fn run_suite(&self) -> Result<SuiteReport> {
        run_suite_on(&REFERENCE_INPUT, self.engine.iterations, self.engine.alpha)
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get results directory path
    pub fn results_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.results_dir)
    }

    /// Get submission directory path
    pub fn submit_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.submit_dir)
    }

    /// Default location of the quick-start results file
    pub fn validation_output(&self) -> PathBuf {
        self.results_dir().join("validation_output.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.run.test_mode, TestMode::Phase1F);
        assert_eq!(config.run.cycles, 2000);
        assert_eq!(config.run.default_seed, 42);
        assert_eq!(config.engine.iterations, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [run]
            test_mode = "phase_1h_extremes"
            cycles = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.run.test_mode, TestMode::Phase1HExtremes);
        assert_eq!(config.run.cycles, 500);
        assert_eq!(config.run.default_seed, 42);
        assert_eq!(config.engine.alpha, DEFAULT_ALPHA);
    }

    #[test]
    fn test_config_validation_zero_cycles() {
        let mut config = Config::default();
        config.run.cycles = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_alpha() {
        let mut config = Config::default();
        config.engine.alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_verbosity() {
        let mut config = Config::default();
        config.telemetry.default_verbosity = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_test_mode_rejected() {
        let result = Config::from_toml("[run]\ntest_mode = \"phase_2\"\n");
        assert!(matches!(result, Err(HarnessError::ConfigError(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("apex").join("config.toml");

        let mut config = Config::default();
        config.run.simulator = SimulatorKind::Convergence;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.run.simulator, SimulatorKind::Convergence);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.apex");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let expanded = Config::expand_path("/absolute/path");
        assert_eq!(expanded.to_string_lossy(), "/absolute/path");
    }

    #[test]
    fn test_trial_config() {
        let config = Config::default();
        let trial = config.trial_config(None, None).unwrap();
        assert_eq!(trial.cycle_count, 2000);
        assert_eq!(trial.test_mode, TestMode::Phase1F);

        let trial = config
            .trial_config(Some(TestMode::Phase1HExtremes), Some(50))
            .unwrap();
        assert_eq!(trial.test_mode, TestMode::Phase1HExtremes);
        assert_eq!(trial.cycle_count, 50);

        assert!(config.trial_config(None, Some(0)).is_err());
    }

    #[test]
    fn test_engine_section_drives_suite() {
        let default_report = Config::default().run_suite().unwrap();
        assert_eq!(default_report.output.iterations, vec![1, 2, 3]);

        let config = Config::from_toml("[engine]\nalpha = 0.5\niterations = 5\n").unwrap();
        let report = config.run_suite().unwrap();
        assert_eq!(report.output.iterations, vec![1, 2, 3, 4, 5]);
        assert_ne!(
            report.output.convergence_metrics[0],
            default_report.output.convergence_metrics[0]
        );
        assert!(report.matches_reference());
    }

    #[test]
    fn test_engine_alpha_overrides_convergence_trial() {
        assert_eq!(Config::default().alpha_override(), None);

        let mut config = Config::default();
        config.engine.alpha = 0.5;
        assert_eq!(config.alpha_override(), Some(0.5));

        let trial = TrialConfig::new(TestMode::Phase1F, 4).unwrap();
        let tuned = config
            .simulator(SimulatorKind::Convergence)
            .run(42, &trial)
            .unwrap();
        let stock = Config::default()
            .simulator(SimulatorKind::Convergence)
            .run(42, &trial)
            .unwrap();

        assert_ne!(tuned.final_metric, stock.final_metric);
    }
}
