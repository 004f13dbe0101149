//! Per-node material arrays and region assignment

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::grid::Grid;

/// A constant material value over the half-open position interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: f64,
    pub end: f64,
    pub value: f64,
}

impl Region {
    pub fn new(start: f64, end: f64, value: f64) -> Self {
        Self { start, end, value }
    }
}

/// Material arrays aligned with a [`Grid`].
///
/// Permittivity and conductivity have one entry per primary node. The
/// magnetic loss profile has one entry per secondary node and only exists
/// to damp the magnetic update inside absorbing layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Materials {
    pub(crate) permittivity: Vec<f64>,
    pub(crate) conductivity: Vec<f64>,
    pub(crate) magnetic_loss: Vec<f64>,
}

impl Materials {
    /// Vacuum everywhere: permittivity 1, no conductivity, no magnetic loss
    pub fn new(grid: &Grid) -> Self {
        Self {
            permittivity: vec![1.0; grid.nodes()],
            conductivity: vec![0.0; grid.nodes()],
            magnetic_loss: vec![0.0; grid.cells()],
        }
    }

    /// Overwrite permittivity region by region, later regions winning.
    pub fn set_permittivity_regions(&mut self, grid: &Grid, regions: &[Region]) {
        if let Some(region) = regions.iter().find(|r| r.value <= 0.0 || r.value.is_nan()) {
            warn!(value = region.value, "permittivity must be strictly positive");
        }
        assign_regions(&mut self.permittivity, grid, regions);
    }

    /// Overwrite conductivity region by region, later regions winning.
    pub fn set_conductivity_regions(&mut self, grid: &Grid, regions: &[Region]) {
        if let Some(region) = regions.iter().find(|r| r.value < 0.0 || r.value.is_nan()) {
            warn!(value = region.value, "conductivity must be non-negative");
        }
        assign_regions(&mut self.conductivity, grid, regions);
    }

    pub fn permittivity(&self) -> &[f64] {
        &self.permittivity
    }

    pub fn conductivity(&self) -> &[f64] {
        &self.conductivity
    }

    /// Artificial magnetic conductivity on the secondary nodes
    pub fn magnetic_loss(&self) -> &[f64] {
        &self.magnetic_loss
    }

    /// Smallest permittivity on the grid, which sets the fastest wave speed
    pub fn min_permittivity(&self) -> f64 {
        self.permittivity.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

fn assign_regions(values: &mut [f64], grid: &Grid, regions: &[Region]) {
    for region in regions {
        let start = grid.search(region.start);
        let end = grid.search(region.end);
        if start < end {
            values[start..end].fill(region.value);
        }
    }
}

/// Amplitude reflection coefficient for a wave crossing from permittivity
/// `eps_a` into `eps_b` at normal incidence.
pub fn reflection_coefficient(eps_a: f64, eps_b: f64) -> f64 {
    let (na, nb) = (eps_a.sqrt(), eps_b.sqrt());
    (na - nb) / (na + nb)
}

/// Amplitude transmission coefficient for a wave crossing from permittivity
/// `eps_a` into `eps_b` at normal incidence.
pub fn transmission_coefficient(eps_a: f64, eps_b: f64) -> f64 {
    let (na, nb) = (eps_a.sqrt(), eps_b.sqrt());
    2.0 * na / (na + nb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> Grid {
        Grid::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap()
    }

    #[test]
    fn test_defaults_are_vacuum() {
        let materials = Materials::new(&grid());
        assert_eq!(materials.permittivity(), &[1.0; 6]);
        assert_eq!(materials.conductivity(), &[0.0; 6]);
        assert_eq!(materials.magnetic_loss(), &[0.0; 5]);
    }

    #[test]
    fn test_region_is_half_open() {
        let grid = grid();
        let mut materials = Materials::new(&grid);
        materials.set_permittivity_regions(&grid, &[Region::new(1.0, 3.0, 4.0)]);
        assert_eq!(materials.permittivity(), &[1.0, 4.0, 4.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_later_regions_win() {
        let grid = grid();
        let mut materials = Materials::new(&grid);
        materials.set_conductivity_regions(
            &grid,
            &[Region::new(0.0, 4.0, 0.5), Region::new(2.0, 10.0, 2.0)],
        );
        assert_eq!(materials.conductivity(), &[0.5, 0.5, 2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_out_of_range_regions_clamp() {
        let grid = grid();
        let mut materials = Materials::new(&grid);

        materials.set_permittivity_regions(&grid, &[Region::new(-10.0, 10.0, 3.0)]);
        assert_eq!(materials.permittivity(), &[3.0; 6]);

        // Entirely past the grid, and reversed bounds, assign nothing
        materials.set_permittivity_regions(
            &grid,
            &[Region::new(6.0, 9.0, 7.0), Region::new(4.0, 1.0, 7.0)],
        );
        assert_eq!(materials.permittivity(), &[3.0; 6]);
    }

    #[test]
    fn test_min_permittivity() {
        let grid = grid();
        let mut materials = Materials::new(&grid);
        materials.set_permittivity_regions(&grid, &[Region::new(0.0, 3.0, 2.5)]);
        assert_eq!(materials.min_permittivity(), 1.0);
        materials.set_permittivity_regions(&grid, &[Region::new(3.0, 6.0, 4.0)]);
        assert_eq!(materials.min_permittivity(), 2.5);
    }

    #[test]
    fn test_interface_coefficients() {
        let r = reflection_coefficient(1.0, 2.0);
        let t = transmission_coefficient(1.0, 2.0);
        assert!((r - (1.0 - 2f64.sqrt()) / (1.0 + 2f64.sqrt())).abs() < 1e-15);
        // Field continuity at the interface: 1 + r = t
        assert!((1.0 + r - t).abs() < 1e-15);
        assert_eq!(reflection_coefficient(3.0, 3.0), 0.0);
    }
}
