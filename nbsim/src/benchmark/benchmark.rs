//! Wall-clock timing of the layout and cube-form variants
//!
//! Every combination runs the same leapfrog steps on the same
//! `lattice_cluster`, so the only difference between rows is the
//! representation and the force-law expression.

use std::time::Instant;

use crate::configuration::config::{CubeFormConfig, IntegratorConfig, LayoutConfig};
use crate::error::SimResult;
use crate::simulation::driver::Simulation;
use crate::simulation::engine::Engine;
use crate::simulation::integrator::Integrate;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::lattice_cluster;
use crate::simulation::states::{BodyRecord, Cluster, FlatCluster};

pub const LAYOUTS: [LayoutConfig; 2] = [LayoutConfig::Encapsulated, LayoutConfig::Flat];
pub const CUBE_FORMS: [CubeFormConfig; 2] = [CubeFormConfig::SqrtMultiply, CubeFormConfig::Power];

#[derive(Debug, Clone, Copy)]
pub struct BenchRow {
    pub n: usize,
    pub layout: LayoutConfig,
    pub cube_form: CubeFormConfig,
    pub ms_per_step: f64,
}

/// Time `steps` leapfrog steps per variant for every N in `ns`
pub fn bench_variants(ns: &[usize], steps: u64) -> SimResult<Vec<BenchRow>> {
    let steps = steps.max(1);
    let mut rows = Vec::with_capacity(ns.len() * LAYOUTS.len() * CUBE_FORMS.len());

    for &n in ns {
        let bodies = lattice_cluster(n);

        for layout in LAYOUTS {
            for cube_form in CUBE_FORMS {
                let engine = Engine {
                    integrator: IntegratorConfig::Leapfrog,
                    layout,
                    cube_form,
                };
                let ms_per_step = match layout {
                    LayoutConfig::Encapsulated => time_steps::<Cluster>(&bodies, engine, steps)?,
                    LayoutConfig::Flat => time_steps::<FlatCluster>(&bodies, engine, steps)?,
                };
                log::debug!("N = {n}, {layout}, {cube_form}: {ms_per_step:.6} ms/step");
                rows.push(BenchRow { n, layout, cube_form, ms_per_step });
            }
        }
    }
    Ok(rows)
}

fn time_steps<S: Integrate>(bodies: &[BodyRecord], engine: Engine, steps: u64) -> SimResult<f64> {
    // t_end only sizes the run; steps are driven by hand below
    let parameters = Parameters::new(0.0, Parameters::default().dt);
    let mut sim = Simulation::<S>::new(bodies, engine, parameters)?;

    // Warm up
    sim.step()?;

    let t0 = Instant::now();
    for _ in 0..steps {
        sim.step()?;
    }
    Ok(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64)
}

/// Paste output directly into a spreadsheet to graph
pub fn print_csv(rows: &[BenchRow]) {
    println!("N,layout,cube,ms_per_step");
    for row in rows {
        println!("{},{},{},{:.6}", row.n, row.layout, row.cube_form, row.ms_per_step);
    }
}
