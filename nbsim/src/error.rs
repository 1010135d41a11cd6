//! Error types shared by the loader, the force accumulator and the driver
//!
//! Every variant is fatal for the current run: there is no retry and no
//! partial-result salvage

use std::path::PathBuf;

/// Simulation error types
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Malformed initial conditions or run parameters, detected before any step
    #[error("invalid input{}: {reason}", line_suffix(.line))]
    InvalidInput { line: Option<usize>, reason: String },

    /// Two bodies share a position, so their separation is zero
    #[error("degenerate configuration at step {step}: bodies {first} and {second} are coincident")]
    DegenerateConfiguration { step: u64, first: usize, second: usize },

    /// A position, velocity or acceleration became NaN or infinite
    #[error("numerical divergence at step {step}: body {body} has a non-finite state")]
    NumericalDivergence { step: u64, body: usize },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl SimError {
    /// Input error not tied to a particular line of the input file
    pub fn invalid(reason: impl Into<String>) -> Self {
        SimError::InvalidInput { line: None, reason: reason.into() }
    }

    /// Input error at a 1-based line of the input file
    pub fn invalid_at(line: usize, reason: impl Into<String>) -> Self {
        SimError::InvalidInput { line: Some(line), reason: reason.into() }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

pub type SimResult<T> = Result<T, SimError>;
