//! Yee time-stepping engine and run driver
//!
//! E lives on the primary nodes at integer time levels, H on the secondary
//! nodes at half-integer levels. Each step advances H, then the interior of
//! E, then the two edges of E:
//!
//! ```text
//! H[i] = ((μ0/Δt - σh[i]/2) H[i] - (E[i+1] - E[i]) / Δx) / (μ0/Δt + σh[i]/2)
//! E[i] = ((ε[i]/Δt - σe[i]/2) E[i] - (H[i] - H[i-1]) / Δx) / (ε[i]/Δt + σe[i]/2)
//! ```
//!
//! With no loss both reduce to the explicit leapfrog update, so the lossless
//! interior and the absorbing edges share one code path.
//!
//! The scheme is only stable for `Δt <= Δx √(μ0 ε_min)`; this is reported
//! but not enforced.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::absorbing::AbsorbingLayer;
use crate::boundary::{BoundaryPair, EdgeSnapshot, Side};
use crate::constants::{C0, MU0};
use crate::energy::{self, EnergySeries};
use crate::error::SimulationError;
use crate::grid::Grid;
use crate::material::{Materials, Region};

/// Electric field samples recorded at one primary node after every step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Probe {
    pub node: usize,
    pub samples: Vec<f64>,
}

/// 1D FDTD simulation state.
///
/// Owns the grid, materials, fields and diagnostics. Material setters are
/// meant to be called before the first step; changing materials mid-run is
/// accepted but its results are unspecified.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    materials: Materials,
    boundaries: BoundaryPair,

    // Electric field on primary nodes
    e: Vec<f64>,
    // Magnetic field on secondary nodes, and its value after the previous step
    h: Vec<f64>,
    h_prev: Vec<f64>,

    energy: EnergySeries,
    probes: Vec<Probe>,

    initialized: bool,
    steps_taken: usize,
    time: f64,
}

impl Simulation {
    /// Vacuum-filled simulation with zero fields.
    ///
    /// The electric field still has to be set with
    /// [`set_initial_condition`](Self::set_initial_condition) before stepping.
    pub fn new(grid: Grid, boundaries: BoundaryPair) -> Self {
        let materials = Materials::new(&grid);
        Self::from_parts(grid, materials, boundaries)
    }

    /// Simulation over prebuilt material arrays.
    ///
    /// Permittivity and conductivity need one entry per primary node and the
    /// magnetic loss one per secondary node.
    pub fn with_materials(
        grid: Grid,
        materials: Materials,
        boundaries: BoundaryPair,
    ) -> Result<Self, SimulationError> {
        let checks = [
            (grid.nodes(), materials.permittivity.len()),
            (grid.nodes(), materials.conductivity.len()),
            (grid.cells(), materials.magnetic_loss.len()),
        ];
        if let Some(&(expected, found)) = checks.iter().find(|(expected, found)| expected != found)
        {
            return Err(SimulationError::FieldLength { expected, found });
        }
        Ok(Self::from_parts(grid, materials, boundaries))
    }

    fn from_parts(grid: Grid, materials: Materials, boundaries: BoundaryPair) -> Self {
        let e = vec![0.0; grid.nodes()];
        let h = vec![0.0; grid.cells()];
        let h_prev = vec![0.0; grid.cells()];

        Self {
            grid,
            materials,
            boundaries,
            e,
            h,
            h_prev,
            energy: EnergySeries::new(),
            probes: Vec::new(),
            initialized: false,
            steps_taken: 0,
            time: 0.0,
        }
    }

    /// Copy `values` into the electric field and mark the simulation ready
    pub fn set_initial_condition(&mut self, values: &[f64]) -> Result<(), SimulationError> {
        if values.len() != self.e.len() {
            return Err(SimulationError::FieldLength {
                expected: self.e.len(),
                found: values.len(),
            });
        }
        self.e.copy_from_slice(values);
        self.initialized = true;
        Ok(())
    }

    pub fn set_permittivity_regions(&mut self, regions: &[Region]) {
        self.warn_if_running("permittivity");
        self.materials.set_permittivity_regions(&self.grid, regions);
    }

    pub fn set_conductivity_regions(&mut self, regions: &[Region]) {
        self.warn_if_running("conductivity");
        self.materials.set_conductivity_regions(&self.grid, regions);
    }

    /// Grade conductivity and magnetic loss at both ends using spacing `dx`
    pub fn set_absorbing_layer(
        &mut self,
        layer: &AbsorbingLayer,
        dx: f64,
    ) -> Result<(), SimulationError> {
        self.warn_if_running("absorbing layer");
        self.materials.apply_absorbing_layer(layer, dx)?;
        Ok(())
    }

    fn warn_if_running(&self, what: &str) {
        if self.steps_taken > 0 {
            warn!(
                steps_taken = self.steps_taken,
                "{} changed after stepping began, results are unspecified", what
            );
        }
    }

    /// Record the electric field at `node` after every subsequent step.
    ///
    /// Returns the probe index.
    pub fn add_probe(&mut self, node: usize) -> Result<usize, SimulationError> {
        if node >= self.e.len() {
            return Err(SimulationError::ProbeOutOfRange {
                node,
                nodes: self.e.len(),
            });
        }
        self.probes.push(Probe {
            node,
            samples: Vec::new(),
        });
        Ok(self.probes.len() - 1)
    }

    /// Advance the fields by one time step of size `dt`
    pub fn step(&mut self, dt: f64) -> Result<(), SimulationError> {
        if !self.initialized {
            return Err(SimulationError::Uninitialized);
        }
        let dx = self.grid.dx();

        // Mur needs the neighbors from before the interior update
        let snapshot = EdgeSnapshot::capture(&self.e);

        self.update_h(dt, dx);
        self.update_e(dt, dx);

        let BoundaryPair { left, right } = self.boundaries;
        left.apply(Side::Left, &mut self.e, &self.h, &snapshot, dt, dx);
        right.apply(Side::Right, &mut self.e, &self.h, &snapshot, dt, dx);

        self.record_energy(dx);
        self.record_probes();

        self.steps_taken += 1;
        self.time = self.steps_taken as f64 * dt;
        Ok(())
    }

    fn update_h(&mut self, dt: f64, dx: f64) {
        let mu_dt = MU0 / dt;
        let loss = self.materials.magnetic_loss();
        for (i, h) in self.h.iter_mut().enumerate() {
            let half_loss = loss[i] / 2.0;
            let curl_e = (self.e[i + 1] - self.e[i]) / dx;
            *h = ((mu_dt - half_loss) * *h - curl_e) / (mu_dt + half_loss);
        }
    }

    /// Interior nodes only; the edges belong to the boundary rules
    fn update_e(&mut self, dt: f64, dx: f64) {
        let eps = self.materials.permittivity();
        let sigma = self.materials.conductivity();
        let n = self.e.len();
        for i in 1..n - 1 {
            let eps_dt = eps[i] / dt;
            let half_loss = sigma[i] / 2.0;
            let curl_h = (self.h[i] - self.h[i - 1]) / dx;
            self.e[i] = ((eps_dt - half_loss) * self.e[i] - curl_h) / (eps_dt + half_loss);
        }
    }

    fn record_energy(&mut self, dx: f64) {
        let electric = energy::electric_energy(&self.e, self.materials.permittivity(), dx);
        let magnetic = energy::magnetic_energy(&self.h_prev, &self.h, dx);
        self.energy.push(electric, magnetic);
        self.h_prev.copy_from_slice(&self.h);
    }

    fn record_probes(&mut self) {
        for probe in &mut self.probes {
            probe.samples.push(self.e[probe.node]);
        }
    }

    /// Step `floor(final_time / dt)` times and return the final electric field.
    ///
    /// Produces exactly the same state as calling [`step`](Self::step) that
    /// many times by hand.
    pub fn run_until(&mut self, final_time: f64, dt: f64) -> Result<&[f64], SimulationError> {
        if !self.initialized {
            return Err(SimulationError::Uninitialized);
        }

        let steps = step_count(final_time, dt);
        let courant = self.courant_number(dt);
        if dt > self.max_stable_dt() {
            warn!(
                dt,
                max_dt = self.max_stable_dt(),
                "time step exceeds the Courant limit, fields may blow up"
            );
        }
        info!(steps, dt, courant, "running simulation");

        for _ in 0..steps {
            self.step(dt)?;
        }

        debug!(
            steps_taken = self.steps_taken,
            time = self.time,
            "simulation run complete"
        );
        Ok(self.e.as_slice())
    }

    /// C0 Δt / Δx
    pub fn courant_number(&self, dt: f64) -> f64 {
        C0 * dt / self.grid.dx()
    }

    /// Largest stable time step, set by the fastest medium on the grid
    pub fn max_stable_dt(&self) -> f64 {
        self.grid.dx() * (MU0 * self.materials.min_permittivity()).sqrt()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn boundaries(&self) -> BoundaryPair {
        self.boundaries
    }

    pub fn electric_field(&self) -> &[f64] {
        &self.e
    }

    pub fn magnetic_field(&self) -> &[f64] {
        &self.h
    }

    pub fn energy(&self) -> &EnergySeries {
        &self.energy
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn probe_samples(&self, id: usize) -> Option<&[f64]> {
        self.probes.get(id).map(|p| p.samples.as_slice())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Simulated time so far
    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Whole number of steps of size `dt` that fit in `final_time`.
///
/// Negative or non-finite ratios give zero steps.
pub fn step_count(final_time: f64, dt: f64) -> usize {
    let ratio = final_time / dt;
    if ratio.is_finite() && ratio > 0.0 {
        ratio.floor() as usize
    } else {
        0
    }
}
