//! Per-step field energy bookkeeping

use serde::Serialize;

use crate::constants::MU0;

/// Energies recorded for a single step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySample {
    pub electric: f64,
    pub magnetic: f64,
    pub total: f64,
}

/// Append-only electric, magnetic and total energy time series.
///
/// One entry is appended per step; the series are never truncated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnergySeries {
    electric: Vec<f64>,
    magnetic: Vec<f64>,
    total: Vec<f64>,
}

impl EnergySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, electric: f64, magnetic: f64) {
        self.electric.push(electric);
        self.magnetic.push(magnetic);
        self.total.push(electric + magnetic);
    }

    pub fn electric(&self) -> &[f64] {
        &self.electric
    }

    pub fn magnetic(&self) -> &[f64] {
        &self.magnetic
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }

    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<EnergySample> {
        Some(EnergySample {
            electric: *self.electric.get(step)?,
            magnetic: *self.magnetic.get(step)?,
            total: *self.total.get(step)?,
        })
    }

    pub fn last(&self) -> Option<EnergySample> {
        self.len().checked_sub(1).and_then(|step| self.get(step))
    }
}

/// ½ Σ ε E² dx over the primary nodes.
///
/// Every node is summed, including both edge nodes. With periodic ends the
/// two edges hold copies of interior values, so the wrapped field is counted
/// twice and the total is not conserved the way it is in a closed cavity.
pub fn electric_energy(e: &[f64], permittivity: &[f64], dx: f64) -> f64 {
    0.5 * e
        .iter()
        .zip(permittivity)
        .map(|(&e, &eps)| e * e * eps * dx)
        .sum::<f64>()
}

/// ½ Σ μ H_prev H dx over the secondary nodes.
///
/// Pairs the previous step's magnetic field with the current one; the two
/// straddle the electric field's time level.
pub fn magnetic_energy(h_prev: &[f64], h: &[f64], dx: f64) -> f64 {
    0.5 * h_prev
        .iter()
        .zip(h)
        .map(|(&prev, &h)| prev * h * MU0 * dx)
        .sum::<f64>()
}
