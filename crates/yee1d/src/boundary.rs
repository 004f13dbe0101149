//! Boundary conditions for the two grid ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{C0, EPS0};
use crate::error::UnknownBoundary;

/// Boundary condition applied to one end of the electric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Boundary {
    /// Perfect electric conductor: the edge field is held at zero
    #[default]
    Pec,
    /// Perfect magnetic conductor: the edge field is driven by the edge H sample
    Pmc,
    /// First-order Mur absorbing boundary (one-way wave equation)
    Mur,
    /// Wraps to the opposite end's interior neighbor
    Periodic,
}

impl Boundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Pec => "pec",
            Boundary::Pmc => "pmc",
            Boundary::Mur => "mur",
            Boundary::Periodic => "periodic",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boundary {
    type Err = UnknownBoundary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pec" => Ok(Boundary::Pec),
            "pmc" => Ok(Boundary::Pmc),
            "mur" => Ok(Boundary::Mur),
            "periodic" => Ok(Boundary::Periodic),
            _ => Err(UnknownBoundary(s.to_string())),
        }
    }
}

impl TryFrom<String> for Boundary {
    type Error = UnknownBoundary;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Independent boundary conditions for the left (first node) and right
/// (last node) ends. Defaults to conductors at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryPair {
    #[serde(default)]
    pub left: Boundary,
    #[serde(default)]
    pub right: Boundary,
}

impl BoundaryPair {
    pub fn new(left: Boundary, right: Boundary) -> Self {
        Self { left, right }
    }

    /// Same condition at both ends
    pub fn both(boundary: Boundary) -> Self {
        Self::new(boundary, boundary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Edge and neighbor values captured before the interior update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSnapshot {
    left: f64,
    left_neighbor: f64,
    right: f64,
    right_neighbor: f64,
}

impl EdgeSnapshot {
    pub(crate) fn capture(e: &[f64]) -> Self {
        let n = e.len();
        Self {
            left: e[0],
            left_neighbor: e[1],
            right: e[n - 1],
            right_neighbor: e[n - 2],
        }
    }

    fn edge(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn neighbor(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_neighbor,
            Side::Right => self.right_neighbor,
        }
    }
}

impl Boundary {
    /// Set the edge value of `e` on `side`.
    ///
    /// Runs after the magnetic update and the interior electric update, so
    /// `h` and the interior of `e` already hold this step's values.
    pub(crate) fn apply(
        self,
        side: Side,
        e: &mut [f64],
        h: &[f64],
        snapshot: &EdgeSnapshot,
        dt: f64,
        dx: f64,
    ) {
        let n = e.len();
        let (edge, neighbor, opposite_neighbor) = match side {
            Side::Left => (0, 1, n - 2),
            Side::Right => (n - 1, n - 2, 1),
        };

        e[edge] = match self {
            Boundary::Pec => 0.0,
            Boundary::Pmc => {
                let coupling = 2.0 * dt / (dx * EPS0);
                match side {
                    Side::Left => snapshot.edge(side) - coupling * h[0],
                    Side::Right => snapshot.edge(side) + coupling * h[h.len() - 1],
                }
            }
            Boundary::Mur => {
                // Stale neighbor value: backward difference in time
                let k = (C0 * dt - dx) / (C0 * dt + dx);
                snapshot.neighbor(side) + k * (e[neighbor] - snapshot.edge(side))
            }
            Boundary::Periodic => e[opposite_neighbor],
        };
    }
}
