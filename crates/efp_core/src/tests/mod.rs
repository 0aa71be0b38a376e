//! Integration tests for the EFP impact engine
//!
//! Tests are organized by topic:
//! - `impact` - Closed-form checks of the impact model
//! - `simulation` - Direct Monte Carlo reproducibility and dispersion behavior
//! - `sensitivity` - Full Sobol pipeline on the default configuration

mod sensitivity;
