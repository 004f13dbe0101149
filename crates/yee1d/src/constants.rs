//! Normalized vacuum constants.
//!
//! The solver works in units where the vacuum permeability and permittivity
//! are both 1, so waves in vacuum travel one length unit per time unit.

/// Vacuum permeability
pub const MU0: f64 = 1.0;
/// Vacuum permittivity
pub const EPS0: f64 = 1.0;
/// Vacuum wave speed, 1 / sqrt(MU0 * EPS0)
pub const C0: f64 = 1.0;
