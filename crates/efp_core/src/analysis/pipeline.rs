//! Sensitivity pipeline: design, clip, convert, evaluate, estimate, rank

use tracing::debug;

use crate::config::EfpConfig;
use crate::error::SensitivityError;
use crate::model::{ParameterConverter, evaluate_distances};

use super::estimator::{IndexEstimator, SaltelliEstimator};
use super::problem::ProblemSpec;
use super::results::SensitivityReport;
use super::sampling::{DesignGenerator, SaltelliSampler};

/// Run the sensitivity analysis with the Saltelli sampler and estimator configured in
/// `config.sensitivity`
pub fn run_sensitivity(config: &EfpConfig) -> Result<SensitivityReport, SensitivityError> {
    let settings = &config.sensitivity;
    let sampler = SaltelliSampler::new(settings.second_order).with_skip(settings.skip);
    let estimator = SaltelliEstimator {
        second_order: settings.second_order,
        num_resamples: settings.num_resamples,
        confidence_level: settings.confidence_level,
        seed: settings.seed,
    };
    run_sensitivity_with(config, &sampler, &estimator)
}

/// Run the sensitivity analysis with any design generator and estimator pair
pub fn run_sensitivity_with<G, E>(
    config: &EfpConfig,
    generator: &G,
    estimator: &E,
) -> Result<SensitivityReport, SensitivityError>
where
    G: DesignGenerator + ?Sized,
    E: IndexEstimator + ?Sized,
{
    let settings = &config.sensitivity;
    let problem = ProblemSpec::for_impact_model();

    let mut design = generator.generate(&problem, settings.base_samples)?;
    if design.ncols() != problem.num_vars() {
        return Err(SensitivityError::DimensionMismatch {
            declared: problem.num_vars(),
            found: design.ncols(),
        });
    }
    let group_size = generator.group_size(problem.num_vars());
    let expected = estimator.group_size(problem.num_vars());
    if group_size != expected {
        return Err(SensitivityError::LayoutMismatch {
            generator: group_size,
            estimator: expected,
        });
    }
    if design.nrows() % group_size != 0 {
        return Err(SensitivityError::OutputLengthMismatch {
            outputs: design.nrows(),
            group_size,
        });
    }
    let eps = settings.clip_epsilon;
    design.clamp_all(eps, 1.0 - eps);

    let converter = ParameterConverter::new(&config.inputs)?;
    let physical = converter.convert(&design)?;
    let distances = evaluate_distances(&config.physics, &physical)?;

    debug!(
        rows = distances.len(),
        base_samples = settings.base_samples,
        "evaluated sensitivity design"
    );

    let indices = estimator.estimate(&problem, &distances)?;
    Ok(SensitivityReport::from_indices(
        indices,
        settings.base_samples,
        design.nrows(),
    ))
}
