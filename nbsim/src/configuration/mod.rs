pub mod config;
pub mod initial_conditions;
