use crate::constants::K_BOLTZMANN;
use crate::defaults::*;
use crate::kcrpmd::KcrpmdParameters;
use anyhow::Context;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_temperature() -> f64 {
    TEMPERATURE
}
fn default_verbose() -> i8 {
    VERBOSE
}
fn default_kcrpmd_config() -> KcrpmdParameters {
    KcrpmdParameters::default()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Configuration {
    /// nuclear temperature in Kelvin
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    #[serde(default = "default_kcrpmd_config")]
    pub kcrpmd: KcrpmdParameters,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            temperature: TEMPERATURE,
            verbose: VERBOSE,
            kcrpmd: KcrpmdParameters::default(),
        }
    }
}

impl Configuration {
    /// Parses a toml string, missing entries are filled with their defaults.
    pub fn from_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("Unable to parse the KC-RPMD configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path: &Path = path.as_ref();
        let config_string: String =
            fs::read_to_string(path).with_context(|| format!("Unable to read config file {}", path.display()))?;
        Self::from_str(&config_string)
    }

    /// Reads the configuration file. If it does not exist the default settings are used
    /// and written to `path`.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path: &Path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }
        let config: Self = Self::default();
        let config_string: String = toml::to_string(&config).context("Unable to serialize the configuration")?;
        fs::write(path, config_string).with_context(|| format!("Unable to write config file {}", path.display()))?;
        info!("default configuration written to {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.temperature.is_finite() && self.temperature > 0.0,
            "the temperature has to be positive: {} K",
            self.temperature
        );
        self.kcrpmd.validate()
    }

    /// Maximum log level of a run: negative values only report warnings, 0 the
    /// parameter tables, 1 the regime selection and mixture weights, 2 and above also
    /// the intermediate energies.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            i8::MIN..=-1 => LevelFilter::Warn,
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Inverse temperature 1/(k_B T) in atomic units.
    pub fn beta(&self) -> f64 {
        1.0 / (K_BOLTZMANN * self.temperature)
    }
}
