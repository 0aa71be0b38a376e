//! Run configuration
//!
//! `EfpConfig` holds every constant a run needs: the physical constants of the
//! engagement, the target rectangle, the marginal of each uncertain input, and the
//! settings of the two statistical procedures. It is built once, validated, and then
//! only read. Every section deserializes with defaults, so a YAML file only needs the
//! values it changes.
//!
//! ```ignore
//! use efp_core::config::EfpConfigBuilder;
//!
//! let config = EfpConfigBuilder::new()
//!     .seed(7)
//!     .num_simulations(2_000)
//!     .base_samples(256)
//!     .target(8.0, 4.0)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::InputParameter;

pub mod builder;
pub mod distributions;

pub use builder::EfpConfigBuilder;
pub use distributions::{InputDistributions, NormalSpec};

/// Fixed physical constants of the engagement
///
/// The nominal recognition delay is not stored here: it is the mean of the `T1_sim`
/// marginal in [`InputDistributions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Strike height (m)
    pub y0: f64,
    /// Projectile speed (m/s)
    pub vp: f64,
    /// Offset between rotation center and warhead center (m)
    pub c_l: f64,
    /// Initiation delay (s)
    pub t2: f64,
    /// Nominal roll angle (rad)
    pub psi0: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            y0: 30.0,
            vp: 2000.0,
            c_l: 0.3,
            t2: 55e-6,
            psi0: 0.0,
        }
    }
}

/// Axis-aligned target rectangle centered at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetRect {
    pub width: f64,
    pub height: f64,
}

impl Default for TargetRect {
    fn default() -> Self {
        Self {
            width: 7.9,
            height: 3.6,
        }
    }
}

impl TargetRect {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    #[must_use]
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Closed containment: points on the edge are inside
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x.abs() <= self.half_width() && y.abs() <= self.half_height()
    }
}

/// Settings of the direct Monte Carlo simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub num_simulations: usize,
    pub seed: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            seed: 42,
        }
    }
}

/// Settings of the Sobol sensitivity pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivitySettings {
    /// Base sample count N; the design has N * (2D + 2) rows
    pub base_samples: usize,
    /// Uniform samples are clipped into [clip_epsilon, 1 - clip_epsilon]
    pub clip_epsilon: f64,
    /// Also estimate second-order indices (changes the design size)
    pub second_order: bool,
    /// Number of leading Sobol points to discard; defaults to the next power of two >= N
    pub skip: Option<usize>,
    /// Bootstrap resamples for confidence intervals
    pub num_resamples: usize,
    pub confidence_level: f64,
    /// Seed of the bootstrap resampling
    pub seed: u64,
}

impl Default for SensitivitySettings {
    fn default() -> Self {
        Self {
            base_samples: 1024,
            clip_epsilon: 1e-9,
            second_order: true,
            skip: None,
            num_resamples: 100,
            confidence_level: 0.95,
            seed: 42,
        }
    }
}

/// Complete, immutable configuration of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfpConfig {
    pub physics: PhysicalConstants,
    pub target: TargetRect,
    pub inputs: InputDistributions,
    pub simulation: SimulationSettings,
    pub sensitivity: SensitivitySettings,
}

impl EfpConfig {
    /// Check every value a run depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("physics.y0", self.physics.y0),
            ("physics.vp", self.physics.vp),
            ("target.width", self.target.width),
            ("target.height", self.target.height),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.simulation.num_simulations == 0 {
            return Err(ConfigError::NoSimulations);
        }

        let eps = self.sensitivity.clip_epsilon;
        if !(eps > 0.0 && eps < 0.5) {
            return Err(ConfigError::InvalidClipEpsilon(eps));
        }
        if let Some(skip) = self.sensitivity.skip
            && skip as u64 >= crate::analysis::SOBOL_PERIOD
        {
            return Err(ConfigError::SkipOutOfRange(skip));
        }
        if self.sensitivity.base_samples == 0 {
            return Err(crate::error::SensitivityError::InvalidBaseSamples(0).into());
        }
        let level = self.sensitivity.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(crate::error::SensitivityError::InvalidConfidenceLevel(level).into());
        }
        if self.sensitivity.num_resamples < 2 {
            return Err(crate::error::SensitivityError::InvalidResampleCount(
                self.sensitivity.num_resamples,
            )
            .into());
        }

        // The converter needs a strictly positive spread for every input
        for param in InputParameter::ALL {
            self.inputs.get(param).to_statrs(param)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EfpConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.physics.y0, 30.0);
        assert_eq!(config.physics.t2, 55e-6);
        assert_eq!(config.simulation.num_simulations, 10_000);
        assert_eq!(config.sensitivity.base_samples, 1024);
    }

    #[test]
    fn test_target_edge_is_inside() {
        let target = TargetRect::default();
        assert!(target.contains(3.95, 0.0));
        assert!(target.contains(-3.95, -1.8));
        assert!(!target.contains(3.950_001, 0.0));
        assert!(!target.contains(0.0, 1.800_001));
    }

    #[test]
    fn test_validate_rejects_zero_simulations() {
        let mut config = EfpConfig::default();
        config.simulation.num_simulations = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoSimulations));
    }

    #[test]
    fn test_validate_rejects_bad_clip() {
        let mut config = EfpConfig::default();
        config.sensitivity.clip_epsilon = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidClipEpsilon(_))
        ));
    }

    #[test]
    fn test_validate_rejects_skip_beyond_period() {
        let mut config = EfpConfig::default();
        config.sensitivity.skip = Some(usize::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SkipOutOfRange(usize::MAX))
        );

        config.sensitivity.skip = Some(4096);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_std_dev() {
        let mut config = EfpConfig::default();
        config.inputs.vx.std_dev = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Model(_))));
    }

    #[test]
    fn test_validate_rejects_negative_height() {
        let mut config = EfpConfig::default();
        config.target.height = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "target.height",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "simulation": { "seed": 7 }, "target": { "width": 10.0 } }"#;
        let config: EfpConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.num_simulations, 10_000);
        assert_eq!(config.target.width, 10.0);
        assert_eq!(config.target.height, 3.6);
        assert_eq!(config.inputs, InputDistributions::default());
    }
}
