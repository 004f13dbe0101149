//! yee1d: one-dimensional Yee FDTD solver
//!
//! This crate provides:
//! - A staggered grid with electric samples on primary nodes and magnetic
//!   samples on the midpoints between them
//! - Region-based permittivity and conductivity with graded absorbing layers
//! - A leapfrog time-stepping engine with conductor, magnetic-conductor,
//!   Mur and periodic end conditions
//! - Per-step energy bookkeeping and field probes
//! - JSON scenario files driving complete runs
//!
//! All quantities are in normalized units where the vacuum permeability,
//! permittivity and speed of light are 1.

pub mod absorbing;
pub mod boundary;
pub mod config;
pub mod constants;
pub mod energy;
pub mod error;
pub mod grid;
pub mod material;
pub mod simulation;
pub mod source;

pub use absorbing::AbsorbingLayer;
pub use boundary::{Boundary, BoundaryPair};
pub use config::{Report, Scenario, ScenarioConfig};
pub use energy::{EnergySample, EnergySeries};
pub use error::{ConfigError, GridError, LayerError, SimulationError, UnknownBoundary};
pub use grid::Grid;
pub use material::{reflection_coefficient, transmission_coefficient, Materials, Region};
pub use simulation::{step_count, Probe, Simulation};
pub use source::GaussianPulse;

/// Main entry point: parse a JSON scenario, run it and return the report
pub fn simulate(json: &str) -> Result<Report, ConfigError> {
    let config = ScenarioConfig::from_json(json)?;
    config.build()?.run()
}
