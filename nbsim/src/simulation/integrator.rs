//! Fixed-step time integrators for the N-body system
//!
//! Provides the leapfrog (kick-drift-kick, one force pass per step) and
//! explicit Euler methods. The per-layout update kernels live behind
//! [`Integrate`]; the step functions are generic over the layout and the cube
//! law so each combination compiles to its own loop.

use super::forces::{CoincidentPair, CubeLaw, Gravity, PowerOneAndHalf, SqrtMultiply};
use super::states::{Cluster, FlatCluster, Particles};
use crate::configuration::config::{CubeFormConfig, IntegratorConfig};

/// Position/velocity update kernels for one particle layout
pub trait Integrate: Particles + Gravity {
    /// x += v·dt + ½·a·dt², with `a` the acceleration from the previous pass
    fn drift(&mut self, dt: f64);

    /// v += ½·(a_prev + a)·dt
    fn kick(&mut self, dt: f64);

    /// x += v·dt using the pre-update velocity, then v += a·dt
    fn euler_update(&mut self, dt: f64);
}

impl Integrate for Cluster {
    fn drift(&mut self, dt: f64) {
        let half_dt_square = 0.5 * dt * dt;
        for b in self.bodies.iter_mut() {
            b.x += b.v * dt + b.a * half_dt_square;
        }
    }

    fn kick(&mut self, dt: f64) {
        let half_dt = 0.5 * dt;
        for b in self.bodies.iter_mut() {
            b.v += (b.a + b.a_prev) * half_dt;
        }
    }

    fn euler_update(&mut self, dt: f64) {
        for b in self.bodies.iter_mut() {
            b.x += b.v * dt;
            b.v += b.a * dt;
        }
    }
}

impl Integrate for FlatCluster {
    fn drift(&mut self, dt: f64) {
        let half_dt_square = 0.5 * dt * dt;
        for i in 0..self.m.len() {
            self.px[i] += self.vx[i] * dt + self.ax[i] * half_dt_square;
            self.py[i] += self.vy[i] * dt + self.ay[i] * half_dt_square;
            self.pz[i] += self.vz[i] * dt + self.az[i] * half_dt_square;
        }
    }

    fn kick(&mut self, dt: f64) {
        let half_dt = 0.5 * dt;
        for i in 0..self.m.len() {
            self.vx[i] += (self.ax[i] + self.oax[i]) * half_dt;
            self.vy[i] += (self.ay[i] + self.oay[i]) * half_dt;
            self.vz[i] += (self.az[i] + self.oaz[i]) * half_dt;
        }
    }

    fn euler_update(&mut self, dt: f64) {
        for i in 0..self.m.len() {
            self.px[i] += self.vx[i] * dt;
            self.py[i] += self.vy[i] * dt;
            self.pz[i] += self.vz[i] * dt;

            self.vx[i] += self.ax[i] * dt;
            self.vy[i] += self.ay[i] * dt;
            self.vz[i] += self.az[i] * dt;
        }
    }
}

/// Advance one leapfrog step
///
/// Expects `sys` to hold the acceleration of its current positions, either
/// from the previous step or from a priming [`Gravity::accelerate`] call.
pub fn leapfrog_step<S: Integrate, L: CubeLaw>(sys: &mut S, dt: f64) -> Result<(), CoincidentPair> {
    // x_n+1 = x_n + dt v_n + dt²/2 a_n
    sys.drift(dt);

    // a_prev <- a_n, a <- a_n+1 from x_n+1
    sys.accelerate::<L>(true)?;

    // v_n+1 = v_n + dt/2 (a_n + a_n+1)
    sys.kick(dt);
    Ok(())
}

/// Advance one explicit Euler step from freshly computed accelerations
pub fn euler_step<S: Integrate, L: CubeLaw>(sys: &mut S, dt: f64) -> Result<(), CoincidentPair> {
    sys.accelerate::<L>(false)?;
    sys.euler_update(dt);
    Ok(())
}

/// Force pass that seeds the leapfrog with a_0. Euler needs none
pub fn prime<S: Integrate>(sys: &mut S, integrator: IntegratorConfig, form: CubeFormConfig) -> Result<(), CoincidentPair> {
    match (integrator, form) {
        (IntegratorConfig::Euler, _) => Ok(()),
        (IntegratorConfig::Leapfrog, CubeFormConfig::SqrtMultiply) => sys.accelerate::<SqrtMultiply>(false),
        (IntegratorConfig::Leapfrog, CubeFormConfig::Power) => sys.accelerate::<PowerOneAndHalf>(false),
    }
}

/// Advance one step of the configured method and cube form
pub fn advance<S: Integrate>(
    sys: &mut S,
    integrator: IntegratorConfig,
    form: CubeFormConfig,
    dt: f64,
) -> Result<(), CoincidentPair> {
    match (integrator, form) {
        (IntegratorConfig::Leapfrog, CubeFormConfig::SqrtMultiply) => leapfrog_step::<S, SqrtMultiply>(sys, dt),
        (IntegratorConfig::Leapfrog, CubeFormConfig::Power) => leapfrog_step::<S, PowerOneAndHalf>(sys, dt),
        (IntegratorConfig::Euler, CubeFormConfig::SqrtMultiply) => euler_step::<S, SqrtMultiply>(sys, dt),
        (IntegratorConfig::Euler, CubeFormConfig::Power) => euler_step::<S, PowerOneAndHalf>(sys, dt),
    }
}
