//! Fluent construction of [`EfpConfig`]
//!
//! Starts from the default engagement and overrides individual values; `build`
//! validates the result.

use super::{EfpConfig, InputDistributions, NormalSpec, PhysicalConstants, TargetRect};
use crate::error::ConfigError;
use crate::model::InputParameter;

#[derive(Debug, Clone, Default)]
pub struct EfpConfigBuilder {
    config: EfpConfig,
}

impl EfpConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: EfpConfig) -> Self {
        Self { config }
    }

    // =========================================================================
    // Physics and target
    // =========================================================================

    #[must_use]
    pub fn physics(mut self, physics: PhysicalConstants) -> Self {
        self.config.physics = physics;
        self
    }

    #[must_use]
    pub fn strike_height(mut self, y0: f64) -> Self {
        self.config.physics.y0 = y0;
        self
    }

    #[must_use]
    pub fn projectile_speed(mut self, vp: f64) -> Self {
        self.config.physics.vp = vp;
        self
    }

    #[must_use]
    pub fn roll(mut self, psi0: f64) -> Self {
        self.config.physics.psi0 = psi0;
        self
    }

    /// Nominal recognition delay and its spread, i.e. the `T1_sim` marginal
    #[must_use]
    pub fn recognition_delay(mut self, t1: f64, std_dev: f64) -> Self {
        self.config.inputs.t1_sim = NormalSpec::new(t1, std_dev);
        self
    }

    #[must_use]
    pub fn target(mut self, width: f64, height: f64) -> Self {
        self.config.target = TargetRect::new(width, height);
        self
    }

    // =========================================================================
    // Input marginals
    // =========================================================================

    #[must_use]
    pub fn inputs(mut self, inputs: InputDistributions) -> Self {
        self.config.inputs = inputs;
        self
    }

    #[must_use]
    pub fn input(mut self, param: InputParameter, spec: NormalSpec) -> Self {
        self.config.inputs.set(param, spec);
        self
    }

    /// Scale the spread of the carrier velocity on both axes
    #[must_use]
    pub fn velocity_std_dev(mut self, std_dev: f64) -> Self {
        self.config.inputs.vx.std_dev = std_dev;
        self.config.inputs.vy.std_dev = std_dev;
        self
    }

    // =========================================================================
    // Procedures
    // =========================================================================

    #[must_use]
    pub fn num_simulations(mut self, n: usize) -> Self {
        self.config.simulation.num_simulations = n;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = seed;
        self
    }

    #[must_use]
    pub fn base_samples(mut self, n: usize) -> Self {
        self.config.sensitivity.base_samples = n;
        self
    }

    #[must_use]
    pub fn second_order(mut self, enabled: bool) -> Self {
        self.config.sensitivity.second_order = enabled;
        self
    }

    #[must_use]
    pub fn bootstrap(mut self, num_resamples: usize, confidence_level: f64, seed: u64) -> Self {
        self.config.sensitivity.num_resamples = num_resamples;
        self.config.sensitivity.confidence_level = confidence_level;
        self.config.sensitivity.seed = seed;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<EfpConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = EfpConfigBuilder::new()
            .seed(7)
            .num_simulations(500)
            .base_samples(64)
            .target(10.0, 5.0)
            .velocity_std_dev(0.25)
            .build()
            .unwrap();

        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.num_simulations, 500);
        assert_eq!(config.sensitivity.base_samples, 64);
        assert_eq!(config.target, TargetRect::new(10.0, 5.0));
        assert_eq!(config.inputs.vx.std_dev, 0.25);
        assert_eq!(config.inputs.vy.std_dev, 0.25);
        assert_eq!(config.inputs.theta0, InputDistributions::default().theta0);
    }

    #[test]
    fn test_recognition_delay_keeps_marginal_centered() {
        let config = EfpConfigBuilder::new()
            .recognition_delay(0.2, 0.02)
            .build()
            .unwrap();

        assert_eq!(config.inputs.t1_sim, NormalSpec::new(0.2, 0.02));
    }

    #[test]
    fn test_build_validates() {
        let result = EfpConfigBuilder::new().num_simulations(0).build();
        assert_eq!(result, Err(ConfigError::NoSimulations));
    }
}
