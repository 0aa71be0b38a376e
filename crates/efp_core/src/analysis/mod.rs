//! Global variance-based sensitivity analysis.
//!
//! Measures how much of the variance of the miss distance each uncertain input
//! explains. The pipeline builds a quasi-random Saltelli design on the unit
//! hypercube, clips it away from 0 and 1, maps it onto the input marginals, evaluates
//! the impact model once per row, and estimates first-order (S1) and total-order (ST)
//! Sobol indices.
//!
//! ```ignore
//! use efp_core::analysis::run_sensitivity;
//! use efp_core::config::EfpConfig;
//!
//! let report = run_sensitivity(&EfpConfig::default())?;
//! for p in &report.parameters {
//!     println!("{:<12} S1={:.3} ST={:.3}", p.name, p.s1, p.st);
//! }
//! ```
//!
//! # Custom strategies
//!
//! The design generator and estimator are traits. `run_sensitivity_with` accepts any
//! pair, so a different sequence or estimator can be swapped in without touching the
//! conversion or model stages.

mod estimator;
mod pipeline;
mod problem;
mod results;
mod sampling;
mod sobol;

pub use estimator::{IndexEstimator, SaltelliEstimator, SecondOrderIndex, SobolIndices};
pub use pipeline::{run_sensitivity, run_sensitivity_with};
pub use problem::ProblemSpec;
pub use results::{ParameterSensitivity, SensitivityReport};
pub use sampling::{DesignGenerator, SaltelliSampler, saltelli_group_size};
pub use sobol::{MAX_DIMENSIONS, PERIOD as SOBOL_PERIOD, SobolSequence};
