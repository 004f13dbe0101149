//! Staggered 1D grid
//!
//! Electric field samples live on the primary nodes, magnetic field samples
//! on the secondary nodes halfway between them:
//!
//! ```text
//! E:  0     1     2     3   ...   N-1
//! H:     0     1     2    ...  N-2
//! ```

use std::cmp::Ordering;

use tracing::warn;

use crate::error::GridError;

/// Relative spacing deviation tolerated before a grid is reported as non-uniform
const UNIFORM_TOLERANCE: f64 = 1e-6;

/// Primary nodes, derived secondary midpoints and the uniform spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    primary: Vec<f64>,
    secondary: Vec<f64>,
    dx: f64,
}

impl Grid {
    /// Build a grid from strictly increasing primary positions.
    ///
    /// The spacing is taken from the first two nodes. The update equations
    /// assume it holds everywhere; a non-uniform grid is accepted but logged.
    pub fn new(primary: Vec<f64>) -> Result<Self, GridError> {
        if primary.len() < 3 {
            return Err(GridError::TooFewNodes(primary.len()));
        }
        if let Some(i) = primary
            .windows(2)
            .position(|w| w[1].partial_cmp(&w[0]) != Some(Ordering::Greater))
        {
            return Err(GridError::NotIncreasing { index: i + 1 });
        }

        let dx = primary[1] - primary[0];
        if let Some(i) = primary
            .windows(2)
            .position(|w| ((w[1] - w[0]) - dx).abs() > UNIFORM_TOLERANCE * dx)
        {
            warn!(
                node = i + 1,
                dx,
                "non-uniform grid spacing, update equations assume constant dx"
            );
        }

        let secondary = primary.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();

        Ok(Self {
            primary,
            secondary,
            dx,
        })
    }

    /// `nodes` evenly spaced positions from `start` to `end`, both included.
    pub fn uniform(start: f64, end: f64, nodes: usize) -> Result<Self, GridError> {
        if nodes < 3 {
            return Err(GridError::TooFewNodes(nodes));
        }
        let step = (end - start) / (nodes - 1) as f64;
        let mut positions: Vec<f64> = (0..nodes).map(|i| start + i as f64 * step).collect();
        positions[nodes - 1] = end;
        Self::new(positions)
    }

    /// Electric field node positions
    pub fn primary(&self) -> &[f64] {
        &self.primary
    }

    /// Magnetic field node positions
    pub fn secondary(&self) -> &[f64] {
        &self.secondary
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Number of primary nodes (N)
    pub fn nodes(&self) -> usize {
        self.primary.len()
    }

    /// Number of secondary nodes (N - 1)
    pub fn cells(&self) -> usize {
        self.secondary.len()
    }

    /// First primary index whose position is not below `x`.
    ///
    /// Positions before the grid map to 0, positions past it to N.
    pub fn search(&self, x: f64) -> usize {
        self.primary.partition_point(|&p| p < x)
    }
}
