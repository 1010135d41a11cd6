use nbsim::{load_bodies, CubeFormConfig, IntegratorConfig, LayoutConfig, RunConfig, RunSummary, Scenario};

use anyhow::{Context, Result};
use clap::Parser;

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version, about = "Direct-sum N-body integrator")]
struct Args {
    /// Initial conditions: one body per line, `mass x y z vx vy vz`
    input: PathBuf,

    /// Total simulated time [default: 10]
    t_end: Option<f64>,

    /// YAML run config; command-line options override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    integrator: Option<IntegratorConfig>,

    #[arg(long, value_enum)]
    layout: Option<LayoutConfig>,

    /// Distance-cube expression in the force loop
    #[arg(long, value_enum)]
    cube: Option<CubeFormConfig>,

    /// Fixed step size [default: 0.001]
    #[arg(long)]
    dt: Option<f64>,

    /// Steps between energy reports, 0 disables them [default: 100]
    #[arg(long)]
    report_every: Option<u64>,

    /// Skip the final per-body state
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    // command line wins over the YAML file, which wins over the defaults
    fn run_config(&self) -> Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::from_path(path)?,
            None => RunConfig::default(),
        };
        if let Some(integrator) = self.integrator {
            cfg.engine.integrator = integrator;
        }
        if let Some(layout) = self.layout {
            cfg.engine.layout = layout;
        }
        if let Some(cube) = self.cube {
            cfg.engine.cube_form = cube;
        }
        if self.t_end.is_some() {
            cfg.parameters.t_end = self.t_end;
        }
        if let Some(dt) = self.dt {
            cfg.parameters.dt = dt;
        }
        if let Some(every) = self.report_every {
            cfg.parameters.report_every = every;
        }
        Ok(cfg)
    }
}

fn report(summary: &RunSummary, per_body: bool) {
    println!("Final dE/E = {:.6e}", summary.relative_energy_drift());
    if !summary.completed {
        println!("stopped early at t = {:.3} after {} steps", summary.time, summary.steps);
    }
    if per_body {
        for (i, b) in summary.bodies.iter().enumerate() {
            println!(
                "{i:5} m = {:.6e}  x = [{:+.10e}, {:+.10e}, {:+.10e}]  v = [{:+.10e}, {:+.10e}, {:+.10e}]",
                b.m, b.x[0], b.x[1], b.x[2], b.v[0], b.v[1], b.v[2]
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let t_start = Instant::now();
    let args = Args::parse();

    let cfg = args.run_config()?;
    let bodies = load_bodies(&args.input)
        .with_context(|| format!("failed to load initial conditions from {}", args.input.display()))?;

    let scenario = Scenario::build_scenario(cfg, bodies);
    let summary = scenario
        .run(|p| {
            println!("t = {:.2}, E = {:.10}, dE/E = {:.10}", p.time, p.energy, p.relative_change());
            ControlFlow::Continue(())
        })
        .context("simulation aborted")?;

    report(&summary, !args.quiet);
    println!("run in {:?}", t_start.elapsed());

    Ok(())
}
