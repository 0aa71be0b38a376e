//! EFP impact dispersion and sensitivity library
//!
//! Estimates where an explosively formed projectile lands relative to its target
//! when the launch conditions are uncertain. The crate provides:
//! - The impact point model, a pure function of nine uncertain inputs
//! - Direct Monte Carlo simulation of the impact point cloud from a seeded stream
//! - Hit probability against the target rectangle and a 95% containment radius
//! - Sobol variance-based sensitivity analysis of the miss distance
//!
//! # Example
//!
//! ```ignore
//! use efp_core::config::EfpConfigBuilder;
//! use efp_core::{ImpactStatistics, monte_carlo_simulate, run_sensitivity};
//!
//! let config = EfpConfigBuilder::new().seed(42).num_simulations(10_000).build()?;
//!
//! let cloud = monte_carlo_simulate(&config)?;
//! let stats = ImpactStatistics::compute(&cloud.points, &config.target)?;
//! println!("P(hit) = {:.1}%", stats.hit_probability * 100.0);
//!
//! let report = run_sensitivity(&config)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod simulation;
pub mod statistics;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SensitivityReport, run_sensitivity};
pub use config::{EfpConfig, EfpConfigBuilder};
pub use simulation::monte_carlo_simulate;
pub use statistics::{ImpactStatistics, hit_probability, radius_95};
