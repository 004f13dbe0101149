//! Scenario description loaded from JSON
//!
//! A scenario bundles everything needed to set up and run one simulation:
//! grid extent, boundaries, material regions, an optional absorbing layer,
//! the initial pulse and the time settings. Every section has a default, and
//! the default scenario is a Gaussian pulse bouncing in a conductor cavity.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::absorbing::AbsorbingLayer;
use crate::boundary::BoundaryPair;
use crate::constants::C0;
use crate::energy::EnergySeries;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::material::Region;
use crate::simulation::{step_count, Probe, Simulation};
use crate::source::GaussianPulse;

/// Courant number used when neither `dt` nor `courant` is given
pub const DEFAULT_COURANT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub grid: GridConfig,
    pub boundaries: BoundaryPair,
    /// Permittivity regions, applied in order
    pub permittivity: Vec<Region>,
    /// Conductivity regions, applied in order before the absorbing layer
    pub conductivity: Vec<Region>,
    pub absorbing_layer: Option<AbsorbingLayer>,
    pub pulse: GaussianPulse,
    pub time: TimeConfig,
    /// Primary node indices to record every step
    pub probes: Vec<usize>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            boundaries: BoundaryPair::default(),
            permittivity: Vec::new(),
            conductivity: Vec::new(),
            absorbing_layer: None,
            pulse: GaussianPulse::default(),
            time: TimeConfig::default(),
            probes: Vec::new(),
        }
    }
}

/// Uniform grid from `start` to `end` with `nodes` primary nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub start: f64,
    pub end: f64,
    pub nodes: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: -1.0,
            end: 1.0,
            nodes: 401,
        }
    }
}

/// Simulated duration and step size.
///
/// The step is either given directly as `dt` or derived from a Courant
/// number as `courant * dx / C0`; giving both is an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeConfig {
    pub final_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courant: Option<f64>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            final_time: 2.0,
            dt: None,
            courant: None,
        }
    }
}

impl TimeConfig {
    /// Resolve the time step for grid spacing `dx`
    pub fn dt(&self, dx: f64) -> Result<f64, ConfigError> {
        let dt = match (self.dt, self.courant) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Time(
                    "give either dt or courant, not both".to_string(),
                ))
            }
            (Some(dt), None) => dt,
            (None, Some(courant)) => courant * dx / C0,
            (None, None) => DEFAULT_COURANT * dx / C0,
        };
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::Time(format!("time step must be positive, got {dt}")));
        }
        if !(self.final_time.is_finite() && self.final_time >= 0.0) {
            return Err(ConfigError::Time(format!(
                "final time must be non-negative, got {}",
                self.final_time
            )));
        }
        Ok(dt)
    }
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Validate the scenario and set up a ready-to-run simulation
    pub fn build(&self) -> Result<Scenario, ConfigError> {
        let grid = Grid::uniform(self.grid.start, self.grid.end, self.grid.nodes)?;
        let dx = grid.dx();
        let dt = self.time.dt(dx)?;
        let initial = self.pulse.sample(&grid);

        let mut simulation = Simulation::new(grid, self.boundaries);
        simulation.set_permittivity_regions(&self.permittivity);
        simulation.set_conductivity_regions(&self.conductivity);
        if let Some(layer) = &self.absorbing_layer {
            simulation.set_absorbing_layer(layer, dx)?;
        }
        for &node in &self.probes {
            simulation.add_probe(node)?;
        }
        simulation.set_initial_condition(&initial)?;

        Ok(Scenario {
            simulation,
            dt,
            final_time: self.time.final_time,
        })
    }
}

/// A built scenario: a ready simulation plus its time settings
#[derive(Debug, Clone)]
pub struct Scenario {
    pub simulation: Simulation,
    pub dt: f64,
    pub final_time: f64,
}

impl Scenario {
    pub fn steps(&self) -> usize {
        step_count(self.final_time, self.dt)
    }

    /// Run to the final time and collect the results
    pub fn run(mut self) -> Result<Report, ConfigError> {
        info!(
            nodes = self.simulation.grid().nodes(),
            left = %self.simulation.boundaries().left,
            right = %self.simulation.boundaries().right,
            "starting scenario"
        );
        self.simulation.run_until(self.final_time, self.dt)?;
        Ok(Report::from_simulation(&self.simulation, self.dt))
    }
}

/// Final state and time series of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: usize,
    pub dt: f64,
    pub time: f64,
    pub dx: f64,
    /// Primary node positions
    pub x: Vec<f64>,
    pub electric_field: Vec<f64>,
    pub magnetic_field: Vec<f64>,
    pub energy: EnergySeries,
    pub probes: Vec<Probe>,
}

impl Report {
    pub fn from_simulation(simulation: &Simulation, dt: f64) -> Self {
        Self {
            steps: simulation.steps_taken(),
            dt,
            time: simulation.time(),
            dx: simulation.grid().dx(),
            x: simulation.grid().primary().to_vec(),
            electric_field: simulation.electric_field().to_vec(),
            magnetic_field: simulation.magnetic_field().to_vec(),
            energy: simulation.energy().clone(),
            probes: simulation.probes().to_vec(),
        }
    }
}
