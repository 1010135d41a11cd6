//! High-level runtime engine settings
//!
//! Selects the integrator method, the particle layout and the distance-cube
//! form used when building and running a `Scenario`

use crate::configuration::config::{CubeFormConfig, EngineConfig, IntegratorConfig, LayoutConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    pub integrator: IntegratorConfig, // leapfrog or euler
    pub layout: LayoutConfig,         // encapsulated or flat
    pub cube_form: CubeFormConfig,    // sqrt-multiply or power-1.5
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            integrator: cfg.integrator,
            layout: cfg.layout,
            cube_form: cfg.cube_form,
        }
    }
}
