//! Error types for grid construction, material setup, stepping and scenarios.

use thiserror::Error;

/// Malformed primary grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid needs at least 3 nodes, got {0}")]
    TooFewNodes(usize),
    #[error("grid positions must be strictly increasing (node {index})")]
    NotIncreasing { index: usize },
}

/// Absorbing layer parameters that cannot produce a loss profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    #[error("absorbing layer of {thickness} cells does not fit a grid of {cells} cells")]
    TooThick { thickness: usize, cells: usize },
    #[error("target reflection must lie strictly between 0 and 1, got {0}")]
    InvalidReflection(f64),
    #[error("grading exponent must be finite and non-negative, got {0}")]
    InvalidGrading(f64),
}

/// A boundary tag outside the four supported conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown boundary condition: {0} (expected pec, pmc, mur or periodic)")]
pub struct UnknownBoundary(pub String);

/// Errors raised by the time-stepping engine and its setters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("initial condition not set; call set_initial_condition first")]
    Uninitialized,
    #[error("field has {found} values but the grid has {expected} nodes")]
    FieldLength { expected: usize, found: usize },
    #[error("probe node {node} is outside the grid of {nodes} nodes")]
    ProbeOutOfRange { node: usize, nodes: usize },
    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// Errors from loading and building a scenario.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("invalid time settings: {0}")]
    Time(String),
}
