use super::analytics::{ComparisonMode, PayFrequency};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_pay_frequency() -> String {
    "Monthly".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BudgetConfig {
    #[serde(default)]
    pub salary: f64,
    #[serde(default = "default_pay_frequency")]
    pub pay_frequency: String,
    /// Named fixed monthly expenses, e.g. rent or utilities.
    #[serde(default)]
    pub fixed_expenses: BTreeMap<String, f64>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        BudgetConfig {
            salary: 0.0,
            pay_frequency: default_pay_frequency(),
            fixed_expenses: BTreeMap::new(),
        }
    }
}

impl BudgetConfig {
    pub fn frequency(&self) -> PayFrequency {
        PayFrequency::from(self.pay_frequency.as_str())
    }

    pub fn fixed_expense_items(&self) -> Vec<f64> {
        self.fixed_expenses.values().copied().collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub comparison: ComparisonMode,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            data_path: None,
            budget: BudgetConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, or the default location when absent.
    /// A missing default config is not an error.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config_path = Self::default_config_path()?;
                if config_path.exists() {
                    Self::load_from_path(&config_path)
                } else {
                    debug!(
                        "No config at {}, using defaults",
                        config_path.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "pfm", "pfm")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "pfm", "pfm")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
