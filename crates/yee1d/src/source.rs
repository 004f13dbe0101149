//! Initial field shapes

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Unit-amplitude Gaussian: exp(-(x - x0)² / (2σ²))
pub fn gaussian_pulse(x: f64, x0: f64, sigma: f64) -> f64 {
    (-((x - x0).powi(2)) / (2.0 * sigma * sigma)).exp()
}

/// Gaussian pulse sampled onto the primary grid as an initial condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianPulse {
    pub center: f64,
    pub sigma: f64,
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
}

fn default_amplitude() -> f64 {
    1.0
}

impl Default for GaussianPulse {
    fn default() -> Self {
        Self {
            center: 0.0,
            sigma: 0.1,
            amplitude: 1.0,
        }
    }
}

impl GaussianPulse {
    pub fn new(center: f64, sigma: f64) -> Self {
        Self {
            center,
            sigma,
            amplitude: 1.0,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn value(&self, x: f64) -> f64 {
        self.amplitude * gaussian_pulse(x, self.center, self.sigma)
    }

    /// Pulse values at every primary node
    pub fn sample(&self, grid: &Grid) -> Vec<f64> {
        grid.primary().iter().map(|&x| self.value(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_shape() {
        assert_eq!(gaussian_pulse(0.5, 0.5, 0.1), 1.0);
        assert_relative_eq!(gaussian_pulse(0.6, 0.5, 0.1), (-0.5f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(
            gaussian_pulse(0.3, 0.5, 0.1),
            gaussian_pulse(0.7, 0.5, 0.1),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_sample_on_grid() {
        let grid = Grid::uniform(-1.0, 1.0, 5).unwrap();
        let values = GaussianPulse::new(0.0, 0.5).with_amplitude(2.0).sample(&grid);
        assert_eq!(values.len(), 5);
        assert_eq!(values[2], 2.0);
        assert_relative_eq!(values[0], 2.0 * (-2.0f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(values[1], values[3], max_relative = 1e-12);
    }

    #[test]
    fn test_amplitude_defaults_to_one() {
        let pulse: GaussianPulse = serde_json::from_str(r#"{"center": 0.2, "sigma": 0.05}"#).unwrap();
        assert_eq!(pulse, GaussianPulse::new(0.2, 0.05));
    }
}
