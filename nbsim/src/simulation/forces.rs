//! Pairwise Newtonian gravity for both particle layouts
//!
//! Direct O(N²) summation over every unordered pair (i, j), i < j. Each pair
//! is evaluated once and applied to both bodies with opposite sign. G = 1 and
//! there is no softening: a zero separation is reported as a
//! [`CoincidentPair`] instead of being smoothed away.
//!
//! The distance cube |r|³ is computed through a [`CubeLaw`] type parameter so
//! the inner loop is monomorphized for each form.

use crate::configuration::config::CubeFormConfig;
use crate::error::SimError;
use crate::simulation::states::{Cluster, FlatCluster};

/// How |r|³ is obtained from |r|²
pub trait CubeLaw {
    fn distance_cube(distance_square: f64) -> f64;
}

/// |r|² · sqrt(|r|²)
#[derive(Debug, Clone, Copy, Default)]
pub struct SqrtMultiply;

impl CubeLaw for SqrtMultiply {
    #[inline(always)]
    fn distance_cube(distance_square: f64) -> f64 {
        distance_square * distance_square.sqrt()
    }
}

/// (|r|²)^1.5
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerOneAndHalf;

impl CubeLaw for PowerOneAndHalf {
    #[inline(always)]
    fn distance_cube(distance_square: f64) -> f64 {
        distance_square.powf(1.5)
    }
}

/// Run-time dispatch to the selected law
pub fn distance_cube(form: CubeFormConfig, distance_square: f64) -> f64 {
    match form {
        CubeFormConfig::SqrtMultiply => SqrtMultiply::distance_cube(distance_square),
        CubeFormConfig::Power => PowerOneAndHalf::distance_cube(distance_square),
    }
}

/// Two bodies found at zero separation during a force pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoincidentPair {
    pub first: usize,
    pub second: usize,
}

impl CoincidentPair {
    /// Attach the step index the force pass belonged to
    pub fn at_step(self, step: u64) -> SimError {
        SimError::DegenerateConfiguration {
            step,
            first: self.first,
            second: self.second,
        }
    }
}

/// Force accumulator over a particle layout
pub trait Gravity {
    /// Rebuild every body's acceleration from the current positions
    /// - `keep_previous`: copy the old acceleration into the previous-acceleration
    ///   slot before zeroing it (leapfrog)
    fn accelerate<L: CubeLaw>(&mut self, keep_previous: bool) -> Result<(), CoincidentPair>;
}

impl Gravity for Cluster {
    fn accelerate<L: CubeLaw>(&mut self, keep_previous: bool) -> Result<(), CoincidentPair> {
        for b in self.bodies.iter_mut() {
            if keep_previous {
                b.a_prev = b.a;
            }
            b.a.fill(0.0);
        }

        let n = self.bodies.len();
        for i in 0..n {
            // bi is the left side of every pair in this row, the tail holds j > i
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let bi = &mut head[i];

            for (k, bj) in tail.iter_mut().enumerate() {
                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.x - bi.x;
                let r2 = r.norm_squared();
                if r2 == 0.0 {
                    return Err(CoincidentPair { first: i, second: i + 1 + k });
                }
                let r3 = L::distance_cube(r2);

                bi.a += r * (bj.m / r3);
                bj.a -= r * (bi.m / r3);
            }
        }
        Ok(())
    }
}

impl Gravity for FlatCluster {
    fn accelerate<L: CubeLaw>(&mut self, keep_previous: bool) -> Result<(), CoincidentPair> {
        if keep_previous {
            self.oax.copy_from_slice(&self.ax);
            self.oay.copy_from_slice(&self.ay);
            self.oaz.copy_from_slice(&self.az);
        }
        self.ax.fill(0.0);
        self.ay.fill(0.0);
        self.az.fill(0.0);

        let n = self.m.len();
        for i in 0..n {
            let mi = self.m[i];
            let (xi, yi, zi) = (self.px[i], self.py[i], self.pz[i]);
            // row accumulator for body i; earlier rows already wrote into a[i]
            let (mut axi, mut ayi, mut azi) = (self.ax[i], self.ay[i], self.az[i]);

            for j in (i + 1)..n {
                let dx = self.px[j] - xi;
                let dy = self.py[j] - yi;
                let dz = self.pz[j] - zi;
                let r2 = dx * dx + dy * dy + dz * dz;
                if r2 == 0.0 {
                    return Err(CoincidentPair { first: i, second: j });
                }
                let r3 = L::distance_cube(r2);

                let tmp = self.m[j] / r3;
                axi += dx * tmp;
                ayi += dy * tmp;
                azi += dz * tmp;

                let tmp = mi / r3;
                self.ax[j] -= dx * tmp;
                self.ay[j] -= dy * tmp;
                self.az[j] -= dz * tmp;
            }

            self.ax[i] = axi;
            self.ay[i] = ayi;
            self.az[i] = azi;
        }
        Ok(())
    }
}
