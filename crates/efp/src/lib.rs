//! EFP impact dispersion application
//!
//! Loads a run configuration, drives the direct simulation and the sensitivity
//! analysis from `efp_core`, prints the report, and exports the sensitivity table and
//! the charts.

pub mod export;
pub mod logging;
pub mod plots;
pub mod report;
pub mod runner;
pub mod settings;
pub mod util;

pub use logging::init_logging;
pub use runner::{RunOutput, run};
pub use settings::{Overrides, load_config};
