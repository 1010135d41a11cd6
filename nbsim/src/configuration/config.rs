//! Configuration types for loading run settings from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! run. Bodies are not part of it: they come from the initial-condition file
//! (see [`crate::configuration::initial_conditions`]). A run config consists of:
//!
//! - [`EngineConfig`]     – integrator method, particle layout, cube form
//! - [`ParametersConfig`] – end time, step size, report interval
//! - [`RunConfig`]        – top-level wrapper used to load a run from YAML
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   integrator: "leapfrog"   # or "euler"
//!   layout: "flat"           # or "encapsulated"
//!   cube: "sqrt-multiply"    # or "power-1.5"
//!
//! parameters:
//!   t_end: 10.0              # total simulated time
//!   dt: 0.001                # fixed step size
//!   report_every: 100        # energy report interval in steps, 0 = never
//! ```
//!
//! The engine maps this onto its runtime `Engine` / `Parameters` structs.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Which integrator method the engine uses
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "leapfrog")] // Kick-drift-kick, symplectic, stores the previous acceleration
    Leapfrog,

    #[serde(rename = "euler")] // Explicit first-order Euler, no previous acceleration
    Euler,
}

/// How particle state is stored
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LayoutConfig {
    #[serde(rename = "encapsulated")] // One record per body, nalgebra vectors
    Encapsulated,

    #[default]
    #[serde(rename = "flat")] // One scalar array per field, arithmetic expanded per component
    Flat,
}

/// How the distance cube |r|³ is computed from |r|²
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CubeFormConfig {
    #[default]
    #[serde(rename = "sqrt-multiply")]
    #[value(name = "sqrt-multiply")]
    SqrtMultiply,

    #[serde(rename = "power-1.5")]
    #[value(name = "power-1.5")]
    Power,
}

impl fmt::Display for IntegratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntegratorConfig::Leapfrog => "leapfrog",
            IntegratorConfig::Euler => "euler",
        })
    }
}

impl fmt::Display for LayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutConfig::Encapsulated => "encapsulated",
            LayoutConfig::Flat => "flat",
        })
    }
}

impl fmt::Display for CubeFormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CubeFormConfig::SqrtMultiply => "sqrt-multiply",
            CubeFormConfig::Power => "power-1.5",
        })
    }
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub integrator: IntegratorConfig, // time integrator advancing the system
    pub layout: LayoutConfig,         // particle state representation
    #[serde(rename = "cube")]
    pub cube_form: CubeFormConfig, // distance-cube expression in the force loop
}

/// Numerical parameters for a run
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub t_end: Option<f64>, // total simulated time, the CLI may supply it instead
    pub dt: f64,            // fixed step size
    pub report_every: u64,  // energy report interval in steps, 0 disables reports
}

impl ParametersConfig {
    pub const DEFAULT_T_END: f64 = 10.0;
    pub const DEFAULT_DT: f64 = 0.001;
    pub const DEFAULT_REPORT_EVERY: u64 = 100;
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: None,
            dt: Self::DEFAULT_DT,
            report_every: Self::DEFAULT_REPORT_EVERY,
        }
    }
}

/// Top-level run configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub engine: EngineConfig,         // method, layout and cube form
    pub parameters: ParametersConfig, // step size, end time, reporting
}

impl RunConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to the defaults
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn from_path(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_yaml_str(&text).map_err(|source| SimError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded run config from {}: {:?}", path.display(), cfg);
        Ok(cfg)
    }
}
