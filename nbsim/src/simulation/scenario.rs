//! Build fully-initialized runs from configuration
//!
//! Takes a `RunConfig` (YAML/CLI facing) plus the bodies read from the
//! initial-condition file and produces a `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the initial body records
//!
//! `Scenario::run` picks the concrete particle layout and drives a
//! `Simulation` over it. Deterministic generators for test and benchmark
//! systems live here as well.

use std::f64::consts::PI;
use std::ops::ControlFlow;

use crate::configuration::config::{LayoutConfig, RunConfig};
use crate::error::SimResult;
use crate::simulation::driver::{Progress, RunSummary, Simulation};
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyRecord, Cluster, FlatCluster};

/// Runtime bundle for one run
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub bodies: Vec<BodyRecord>,
}

impl Scenario {
    pub fn build_scenario(cfg: RunConfig, bodies: Vec<BodyRecord>) -> Self {
        Self {
            engine: Engine::from(cfg.engine),
            parameters: Parameters::from(cfg.parameters),
            bodies,
        }
    }

    /// Run to completion in the configured layout
    pub fn run<F>(&self, observe: F) -> SimResult<RunSummary>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
    {
        log::info!(
            "running {} bodies to t = {} ({} integrator, {} layout, {} cube)",
            self.bodies.len(),
            self.parameters.t_end,
            self.engine.integrator,
            self.engine.layout,
            self.engine.cube_form
        );

        let summary = match self.engine.layout {
            LayoutConfig::Encapsulated => {
                Simulation::<Cluster>::new(&self.bodies, self.engine, self.parameters.clone())?.run(observe)?
            }
            LayoutConfig::Flat => {
                Simulation::<FlatCluster>::new(&self.bodies, self.engine, self.parameters.clone())?.run(observe)?
            }
        };

        log::info!("finished {} steps, t = {}", summary.steps, summary.time);
        Ok(summary)
    }
}

// =========================================================================================
// Generators
// =========================================================================================

/// Two equal masses on a circular orbit around their common centre of mass
///
/// Bodies sit at (∓d/2, 0, 0) moving along ∓y with speed sqrt(m / 2d), so the
/// pair turns counter-clockwise about the z axis.
pub fn circular_binary(mass: f64, separation: f64) -> Vec<BodyRecord> {
    let half = 0.5 * separation;
    let speed = (mass / (2.0 * separation)).sqrt();
    vec![
        BodyRecord::new(mass, [-half, 0.0, 0.0], [0.0, -speed, 0.0]),
        BodyRecord::new(mass, [half, 0.0, 0.0], [0.0, speed, 0.0]),
    ]
}

/// Orbital period of [`circular_binary`]: 2π·sqrt(d³ / 2m)
pub fn circular_binary_period(mass: f64, separation: f64) -> f64 {
    2.0 * PI * (separation.powi(3) / (2.0 * mass)).sqrt()
}

/// Deterministic cold cluster of `n` bodies with total mass 1
///
/// Positions follow incommensurate sines so no two bodies coincide; no RNG
/// is involved, so every run sees the same system.
pub fn lattice_cluster(n: usize) -> Vec<BodyRecord> {
    let m = 1.0 / n.max(1) as f64;
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = [
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            ];
            BodyRecord::new(m, x, [0.0; 3])
        })
        .collect()
}
