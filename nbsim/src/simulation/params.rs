//! Numerical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - total simulated time and fixed step size,
//! - energy report interval

use crate::configuration::config::ParametersConfig;
use crate::error::{SimError, SimResult};

/// Relative slack under which `t_end / dt` counts as a whole number of steps
const EXACT_RATIO_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub t_end: f64,        // time end
    pub dt: f64,           // step size
    pub report_every: u64, // steps between energy reports, 0 = never
}

impl Default for Parameters {
    fn default() -> Self {
        Self::from(ParametersConfig::default())
    }
}

impl From<ParametersConfig> for Parameters {
    fn from(cfg: ParametersConfig) -> Self {
        Self {
            t_end: cfg.t_end.unwrap_or(ParametersConfig::DEFAULT_T_END),
            dt: cfg.dt,
            report_every: cfg.report_every,
        }
    }
}

impl Parameters {
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self {
            t_end,
            dt,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::invalid(format!("step size must be positive and finite, got {}", self.dt)));
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::invalid(format!("end time must be non-negative and finite, got {}", self.t_end)));
        }
        Ok(())
    }

    /// Smallest k with k·dt >= t_end
    ///
    /// A ratio within rounding distance of an integer is taken as exact, so
    /// t_end = 10, dt = 0.001 gives 10000 rather than 10001.
    pub fn step_count(&self) -> u64 {
        let ratio = self.t_end / self.dt;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= EXACT_RATIO_TOLERANCE * nearest.max(1.0) {
            nearest as u64
        } else {
            ratio.ceil() as u64
        }
    }
}
