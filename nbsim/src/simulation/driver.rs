//! Fixed-step simulation driver
//!
//! `Simulation` owns one system for the duration of a run and advances it
//! step by step: force pass and integrator update through
//! [`integrator::advance`], then a finite check over the whole state. Runs
//! can only be stopped between steps, by the progress observer.

use std::ops::ControlFlow;

use super::engine::Engine;
use super::integrator::{self, Integrate};
use super::params::Parameters;
use super::states::{validate_records, BodyRecord};
use crate::error::{SimError, SimResult};

/// Snapshot handed to the observer every `report_every` steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub step: u64,            // steps completed so far
    pub total_steps: u64,     // steps the run will take if not cancelled
    pub time: f64,            // simulated time, step · dt
    pub energy: f64,          // total energy now
    pub previous_energy: f64, // total energy at the previous report (initial energy for the first)
    pub initial_energy: f64,  // total energy before the first step
}

impl Progress {
    /// dE/E since the previous report
    pub fn relative_change(&self) -> f64 {
        (self.energy - self.previous_energy) / self.previous_energy
    }

    /// dE/E since the start of the run
    pub fn relative_drift(&self) -> f64 {
        (self.energy - self.initial_energy) / self.initial_energy
    }
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub engine: Engine,
    pub steps: u64,
    pub completed: bool, // false when the observer cancelled the run
    pub time: f64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub bodies: Vec<BodyRecord>,
}

impl RunSummary {
    /// dE/E between the initial and the final state
    pub fn relative_energy_drift(&self) -> f64 {
        (self.final_energy - self.initial_energy) / self.initial_energy
    }
}

pub struct Simulation<S> {
    pub system: S,
    pub engine: Engine,
    pub parameters: Parameters,
    steps_taken: u64,
    total_steps: u64,
    initial_energy: f64,
}

impl<S: Integrate> Simulation<S> {
    /// Build the system in layout `S` and, for leapfrog, run the priming
    /// force pass (reported as step 0 if it fails)
    pub fn new(records: &[BodyRecord], engine: Engine, parameters: Parameters) -> SimResult<Self> {
        validate_records(records)?;
        parameters.validate()?;

        let mut system = S::from_records(records);
        integrator::prime(&mut system, engine.integrator, engine.cube_form).map_err(|pair| pair.at_step(0))?;

        let initial_energy = system.total_energy();
        let total_steps = parameters.step_count();
        log::debug!(
            "{} bodies, {} layout, {} integrator, {} cube, {} steps of {}",
            records.len(),
            S::LAYOUT,
            engine.integrator,
            engine.cube_form,
            total_steps,
            parameters.dt
        );

        Ok(Self {
            system,
            engine,
            parameters,
            steps_taken: 0,
            total_steps,
            initial_energy,
        })
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Simulated time, computed from the step count rather than accumulated
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.parameters.dt
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    pub fn energy(&self) -> f64 {
        self.system.total_energy()
    }

    /// Advance exactly one step
    ///
    /// Fails with `DegenerateConfiguration` if two bodies coincide during the
    /// force pass and with `NumericalDivergence` if any state component is no
    /// longer finite afterwards.
    pub fn step(&mut self) -> SimResult<()> {
        let step = self.steps_taken + 1;

        if let Err(pair) =
            integrator::advance(&mut self.system, self.engine.integrator, self.engine.cube_form, self.parameters.dt)
        {
            log::error!("bodies {} and {} coincide at step {}", pair.first, pair.second, step);
            return Err(pair.at_step(step));
        }

        if let Some(body) = self.system.first_non_finite() {
            log::error!("body {} diverged at step {}", body, step);
            return Err(SimError::NumericalDivergence { step, body });
        }

        self.steps_taken = step;
        Ok(())
    }

    /// Step until `t_end` is reached or the observer breaks
    ///
    /// The observer sees a [`Progress`] every `report_every` steps; energy is
    /// only evaluated at those points.
    pub fn run<F>(&mut self, mut observe: F) -> SimResult<RunSummary>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
    {
        let every = self.parameters.report_every;
        let mut previous_energy = self.initial_energy;
        let mut completed = true;

        while self.steps_taken < self.total_steps {
            self.step()?;

            if every > 0 && self.steps_taken % every == 0 {
                let energy = self.system.total_energy();
                let progress = Progress {
                    step: self.steps_taken,
                    total_steps: self.total_steps,
                    time: self.time(),
                    energy,
                    previous_energy,
                    initial_energy: self.initial_energy,
                };
                previous_energy = energy;

                if observe(&progress).is_break() {
                    log::info!("run cancelled after step {} of {}", self.steps_taken, self.total_steps);
                    completed = false;
                    break;
                }
            }
        }

        Ok(self.summary(completed))
    }

    /// Step to `t_end` without observing
    pub fn run_to_end(&mut self) -> SimResult<RunSummary> {
        self.run(|_| ControlFlow::Continue(()))
    }

    pub fn summary(&self, completed: bool) -> RunSummary {
        RunSummary {
            engine: self.engine,
            steps: self.steps_taken,
            completed,
            time: self.time(),
            initial_energy: self.initial_energy,
            final_energy: self.system.total_energy(),
            bodies: self.system.to_records(),
        }
    }
}
