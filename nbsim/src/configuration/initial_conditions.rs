//! Plain-text initial conditions
//!
//! One body per line, whitespace separated:
//!
//! ```text
//! # mass  x     y     z     vx    vy    vz
//! 1.0     -0.5  0.0   0.0   0.0   -0.7  0.0
//! ```
//!
//! Rows may carry a leading label column (8 fields), which is ignored. Blank
//! lines and `#` comments are skipped.

use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::simulation::states::{validate_records, BodyRecord};

const FIELDS: usize = 7;

/// Parse a whole initial-condition document
pub fn parse_bodies(text: &str) -> SimResult<Vec<BodyRecord>> {
    let mut bodies = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let fields = match tokens.len() {
            FIELDS => &tokens[..],
            n if n == FIELDS + 1 => &tokens[1..],
            n => {
                return Err(SimError::invalid_at(
                    line,
                    format!("expected {FIELDS} fields (mass x y z vx vy vz), found {n}"),
                ))
            }
        };

        let mut values = [0.0; FIELDS];
        for (k, (slot, token)) in values.iter_mut().zip(fields).enumerate() {
            let value: f64 = token
                .parse()
                .map_err(|_| SimError::invalid_at(line, format!("field {} `{token}` is not a number", k + 1)))?;
            if !value.is_finite() {
                return Err(SimError::invalid_at(line, format!("field {} `{token}` is not finite", k + 1)));
            }
            *slot = value;
        }

        let [m, x, y, z, vx, vy, vz] = values;
        if m < 0.0 {
            return Err(SimError::invalid_at(line, format!("negative mass {m}")));
        }
        bodies.push(BodyRecord::new(m, [x, y, z], [vx, vy, vz]));
    }

    validate_records(&bodies)?;
    Ok(bodies)
}

/// Read and parse an initial-condition file
pub fn load_bodies(path: &Path) -> SimResult<Vec<BodyRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bodies = parse_bodies(&text)?;
    log::info!("loaded {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}
