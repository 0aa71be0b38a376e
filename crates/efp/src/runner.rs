//! One complete run: simulate, summarize, analyze, export, plot

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use efp_core::analysis::{SensitivityReport, run_sensitivity};
use efp_core::config::EfpConfig;
use efp_core::simulation::monte_carlo_simulate;
use efp_core::statistics::ImpactStatistics;
use tracing::info;

use crate::export::write_sensitivity_tables;
use crate::plots::write_plots;

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub statistics: ImpactStatistics,
    pub sensitivity: Option<SensitivityReport>,
    /// CSV tables and charts written, empty when no output directory was given
    pub exported: Vec<PathBuf>,
}

/// Run the direct simulation and, unless `skip_sensitivity` is set, the sensitivity
/// analysis. The sensitivity tables and the charts are written when `output_dir` is given.
pub fn run(
    config: &EfpConfig,
    skip_sensitivity: bool,
    output_dir: Option<&Path>,
) -> color_eyre::Result<RunOutput> {
    info!(
        trials = config.simulation.num_simulations,
        seed = config.simulation.seed,
        "running direct simulation"
    );
    let cloud = monte_carlo_simulate(config).wrap_err("direct simulation failed")?;
    let statistics = ImpactStatistics::compute(&cloud.points, &config.target)
        .wrap_err("failed to summarize impact points")?;
    info!(
        hit_probability = statistics.hit_probability,
        radius_95 = statistics.radius_95,
        "direct simulation complete"
    );

    let sensitivity = if skip_sensitivity {
        None
    } else {
        info!(
            base_samples = config.sensitivity.base_samples,
            "running sensitivity analysis"
        );
        Some(run_sensitivity(config).wrap_err("sensitivity analysis failed")?)
    };

    let mut exported = Vec::new();
    if let Some(dir) = output_dir {
        if let Some(report) = &sensitivity {
            exported.extend(write_sensitivity_tables(report, dir)?);
        }
        exported.extend(write_plots(
            &cloud,
            &statistics,
            &config.target,
            sensitivity.as_ref(),
            dir,
        )?);
    }

    Ok(RunOutput {
        statistics,
        sensitivity,
        exported,
    })
}
