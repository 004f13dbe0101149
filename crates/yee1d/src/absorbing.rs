//! Graded-loss absorbing layer
//!
//! Approximates a matched layer by adding electric conductivity and an equal
//! artificial magnetic conductivity near both grid ends, graded as
//!
//! ```text
//! σ_max = -ln(R0) (m + 1) / (2 L dx)
//! σ_i   = σ_max ((L - i) / L)^m        i = 0 .. L-1, counted from each edge
//! ```
//!
//! With a conductor behind the layer a normally incident wave comes back
//! attenuated by roughly `R0`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LayerError;
use crate::material::Materials;

/// Absorbing layer parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsorbingLayer {
    /// Layer thickness in secondary-grid cells (L)
    pub thickness: usize,
    /// Polynomial grading exponent (m)
    pub grading: f64,
    /// Target edge reflection coefficient (R0), strictly between 0 and 1
    pub reflection: f64,
}

impl Default for AbsorbingLayer {
    fn default() -> Self {
        Self {
            thickness: 10,
            grading: 3.0,
            reflection: 1e-6,
        }
    }
}

impl AbsorbingLayer {
    pub fn new(thickness: usize, grading: f64, reflection: f64) -> Self {
        Self {
            thickness,
            grading,
            reflection,
        }
    }

    pub fn validate(&self) -> Result<(), LayerError> {
        if !(self.reflection > 0.0 && self.reflection < 1.0) {
            return Err(LayerError::InvalidReflection(self.reflection));
        }
        if !self.grading.is_finite() || self.grading < 0.0 {
            return Err(LayerError::InvalidGrading(self.grading));
        }
        Ok(())
    }

    /// Peak loss at the outer edge of the layer
    pub fn sigma_max(&self, dx: f64) -> f64 {
        -self.reflection.ln() * (self.grading + 1.0) / (2.0 * self.thickness as f64 * dx)
    }

    /// Loss per cell, starting at the grid edge and decreasing inwards
    pub fn profile(&self, dx: f64) -> Vec<f64> {
        let sigma_max = self.sigma_max(dx);
        let thickness = self.thickness as f64;
        (0..self.thickness)
            .map(|i| sigma_max * ((thickness - i as f64) / thickness).powf(self.grading))
            .collect()
    }
}

impl Materials {
    /// Write the layer profile into both ends of the conductivity and
    /// magnetic loss arrays.
    ///
    /// Only the first and last `thickness` entries of each array are touched;
    /// anything set there by region assignment is overwritten.
    pub fn apply_absorbing_layer(
        &mut self,
        layer: &AbsorbingLayer,
        dx: f64,
    ) -> Result<(), LayerError> {
        layer.validate()?;
        let cells = self.magnetic_loss.len();
        if layer.thickness > cells {
            return Err(LayerError::TooThick {
                thickness: layer.thickness,
                cells,
            });
        }
        if layer.thickness == 0 {
            return Ok(());
        }

        let last_h = cells - 1;
        let last_e = self.conductivity.len() - 1;
        for (i, sigma) in layer.profile(dx).into_iter().enumerate() {
            self.magnetic_loss[i] = sigma;
            self.magnetic_loss[last_h - i] = sigma;
            self.conductivity[i] = sigma;
            self.conductivity[last_e - i] = sigma;
        }

        debug!(
            thickness = layer.thickness,
            sigma_max = layer.sigma_max(dx),
            "applied absorbing layer"
        );
        Ok(())
    }
}
