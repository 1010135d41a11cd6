//! Core state types for the N-body integrator.
//!
//! The same system can be held in two representations:
//! - `Body` / `Cluster`: one record per body, vector fields as `NVec3`
//! - `FlatCluster`: one `Vec<f64>` per scalar field, no vector type at all
//!
//! Both are built from (and snapshot back to) layout-neutral `BodyRecord`s
//! and expose the same read-side API through [`Particles`].

use nalgebra::Vector3;

use crate::configuration::config::LayoutConfig;
use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

/// Initial or final state of one body, independent of the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRecord {
    pub m: f64,      // mass
    pub x: [f64; 3], // position
    pub v: [f64; 3], // velocity
}

impl BodyRecord {
    pub fn new(m: f64, x: [f64; 3], v: [f64; 3]) -> Self {
        Self { m, x, v }
    }

    fn is_finite(&self) -> bool {
        self.m.is_finite() && self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }
}

/// Reject an empty system, negative masses and non-finite initial state
pub fn validate_records(records: &[BodyRecord]) -> SimResult<()> {
    if records.is_empty() {
        return Err(SimError::invalid("system has no bodies"));
    }
    for (i, r) in records.iter().enumerate() {
        if !r.is_finite() {
            return Err(SimError::invalid(format!("body {i} has a non-finite initial state")));
        }
        if r.m < 0.0 {
            return Err(SimError::invalid(format!("body {i} has negative mass {}", r.m)));
        }
    }
    Ok(())
}

/// Read-side API shared by both layouts
pub trait Particles: Sized {
    /// Which representation this is, for logs and reports
    const LAYOUT: LayoutConfig;

    /// Build the system with zero accelerations
    fn from_records(records: &[BodyRecord]) -> Self;

    fn to_records(&self) -> Vec<BodyRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of ½·m·|v|²
    fn kinetic_energy(&self) -> f64;

    /// Sum over unordered pairs of -mᵢ·mⱼ/|xⱼ - xᵢ|
    fn potential_energy(&self) -> f64;

    fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Index of the first body holding a NaN or infinite position, velocity
    /// or acceleration
    fn first_non_finite(&self) -> Option<usize>;
}

// =========================================================================================
// Encapsulated layout
// =========================================================================================

#[derive(Debug, Clone)]
pub struct Body {
    pub m: f64,        // mass
    pub x: NVec3,      // position
    pub v: NVec3,      // velocity
    pub a: NVec3,      // acceleration, rebuilt every force pass
    pub a_prev: NVec3, // acceleration at the start of the step (leapfrog only)
}

impl From<&BodyRecord> for Body {
    fn from(r: &BodyRecord) -> Self {
        Self {
            m: r.m,
            x: NVec3::from(r.x),
            v: NVec3::from(r.v),
            a: NVec3::zeros(),
            a_prev: NVec3::zeros(),
        }
    }
}

impl Body {
    fn is_finite(&self) -> bool {
        [self.x, self.v, self.a].iter().all(|w| w.iter().all(|c| c.is_finite()))
    }
}

/// Encapsulated system: a list of addressable body records
#[derive(Debug, Clone)]
pub struct Cluster {
    pub bodies: Vec<Body>,
}

impl Particles for Cluster {
    const LAYOUT: LayoutConfig = LayoutConfig::Encapsulated;

    fn from_records(records: &[BodyRecord]) -> Self {
        Self {
            bodies: records.iter().map(Body::from).collect(),
        }
    }

    fn to_records(&self) -> Vec<BodyRecord> {
        self.bodies
            .iter()
            .map(|b| BodyRecord::new(b.m, [b.x.x, b.x.y, b.x.z], [b.v.x, b.v.y, b.v.z]))
            .collect()
    }

    fn len(&self) -> usize {
        self.bodies.len()
    }

    fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
    }

    fn potential_energy(&self) -> f64 {
        let mut pe = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                pe -= bi.m * bj.m / (bj.x - bi.x).norm();
            }
        }
        pe
    }

    fn first_non_finite(&self) -> Option<usize> {
        self.bodies.iter().position(|b| !b.is_finite())
    }
}

// =========================================================================================
// Flat layout
// =========================================================================================

/// Flat system: every scalar component in its own array, indexed by body
#[derive(Debug, Clone, Default)]
pub struct FlatCluster {
    pub m: Vec<f64>,
    pub px: Vec<f64>,
    pub py: Vec<f64>,
    pub pz: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub ax: Vec<f64>,
    pub ay: Vec<f64>,
    pub az: Vec<f64>,
    // previous acceleration (leapfrog only)
    pub oax: Vec<f64>,
    pub oay: Vec<f64>,
    pub oaz: Vec<f64>,
}

impl Particles for FlatCluster {
    const LAYOUT: LayoutConfig = LayoutConfig::Flat;

    fn from_records(records: &[BodyRecord]) -> Self {
        let n = records.len();
        Self {
            m: column(records, |r| r.m),
            px: column(records, |r| r.x[0]),
            py: column(records, |r| r.x[1]),
            pz: column(records, |r| r.x[2]),
            vx: column(records, |r| r.v[0]),
            vy: column(records, |r| r.v[1]),
            vz: column(records, |r| r.v[2]),
            ax: vec![0.0; n],
            ay: vec![0.0; n],
            az: vec![0.0; n],
            oax: vec![0.0; n],
            oay: vec![0.0; n],
            oaz: vec![0.0; n],
        }
    }

    fn to_records(&self) -> Vec<BodyRecord> {
        (0..self.len())
            .map(|i| {
                BodyRecord::new(
                    self.m[i],
                    [self.px[i], self.py[i], self.pz[i]],
                    [self.vx[i], self.vy[i], self.vz[i]],
                )
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.m.len()
    }

    fn kinetic_energy(&self) -> f64 {
        let mut ke = 0.0;
        for i in 0..self.len() {
            let (vx, vy, vz) = (self.vx[i], self.vy[i], self.vz[i]);
            ke += 0.5 * self.m[i] * (vx * vx + vy * vy + vz * vz);
        }
        ke
    }

    fn potential_energy(&self) -> f64 {
        let n = self.len();
        let mut pe = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.px[j] - self.px[i];
                let dy = self.py[j] - self.py[i];
                let dz = self.pz[j] - self.pz[i];
                pe -= self.m[i] * self.m[j] / (dx * dx + dy * dy + dz * dz).sqrt();
            }
        }
        pe
    }

    fn first_non_finite(&self) -> Option<usize> {
        (0..self.len()).find(|&i| {
            ![
                self.px[i], self.py[i], self.pz[i],
                self.vx[i], self.vy[i], self.vz[i],
                self.ax[i], self.ay[i], self.az[i],
            ]
            .iter()
            .all(|c| c.is_finite())
        })
    }
}

fn column(records: &[BodyRecord], field: impl Fn(&BodyRecord) -> f64) -> Vec<f64> {
    records.iter().map(field).collect()
}
