//! Direct Monte Carlo simulation of the impact point cloud
//!
//! Inputs are drawn in physical units from their Normal marginals, one trial at a
//! time, from a single seeded stream. Drawing is sequential so the cloud depends only
//! on the seed and the trial count; evaluating the model over the drawn rows may run
//! in parallel.

use rand::SeedableRng;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::debug;

use crate::config::{EfpConfig, InputDistributions, PhysicalConstants};
use crate::error::ModelError;
use crate::model::{ImpactCloud, InputParameter, NUM_INPUTS, SampleMatrix, evaluate_batch};

/// Run the direct simulation with the settings stored in `config`
pub fn monte_carlo_simulate(config: &EfpConfig) -> Result<ImpactCloud, ModelError> {
    simulate_impacts(
        &config.physics,
        &config.inputs,
        config.simulation.num_simulations,
        config.simulation.seed,
    )
}

/// Draw `num_simulations` trials from a `StdRng` seeded with `seed` and evaluate each one.
///
/// The same seed and count always give a bit-identical cloud.
pub fn simulate_impacts(
    physics: &PhysicalConstants,
    inputs: &InputDistributions,
    num_simulations: usize,
    seed: u64,
) -> Result<ImpactCloud, ModelError> {
    let samples = draw_inputs(inputs, num_simulations, seed)?;
    let points = evaluate_batch(physics, &samples)?;

    debug!(trials = points.len(), seed, "direct simulation finished");

    Ok(ImpactCloud::new(points, seed))
}

/// Draw a `(num_simulations, 9)` matrix of physical input values.
///
/// Within a trial the inputs are drawn in [`InputParameter::ALL`] order.
pub fn draw_inputs(
    inputs: &InputDistributions,
    num_simulations: usize,
    seed: u64,
) -> Result<SampleMatrix, ModelError> {
    let marginals = InputParameter::ALL
        .iter()
        .map(|&param| inputs.get(param).to_rand_distr(param))
        .collect::<Result<Vec<Normal<f64>>, _>>()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(num_simulations * NUM_INPUTS);
    for _ in 0..num_simulations {
        for marginal in &marginals {
            data.push(marginal.sample(&mut rng));
        }
    }

    SampleMatrix::from_data(data, NUM_INPUTS).ok_or(ModelError::DimensionMismatch {
        expected: NUM_INPUTS,
        found: marginals.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalSpec;
    use crate::model::{InputSample, impact_point};

    #[test]
    fn test_requested_number_of_trials() {
        let config = EfpConfig::default();
        let cloud = simulate_impacts(&config.physics, &config.inputs, 250, 7).unwrap();
        assert_eq!(cloud.len(), 250);
        assert_eq!(cloud.seed, 7);
    }

    #[test]
    fn test_zero_trials_gives_empty_cloud() {
        let config = EfpConfig::default();
        let cloud = simulate_impacts(&config.physics, &config.inputs, 0, 1).unwrap();
        assert!(cloud.is_empty());
    }

    #[test]
    fn test_recognition_delay_mean_drives_t1_sim() {
        let base = EfpConfig::default();
        let mut shifted = base.clone();
        shifted.inputs.t1_sim.mean = 0.5;

        let matrix = draw_inputs(&shifted.inputs, 1_000, 11).unwrap();
        let t1 = matrix.column(InputParameter::T1Sim.index());
        let mean = t1.iter().sum::<f64>() / t1.len() as f64;
        assert!((mean - 0.5).abs() < 0.002, "mean T1_sim {mean}");

        assert_ne!(
            monte_carlo_simulate(&base).unwrap(),
            monte_carlo_simulate(&shifted).unwrap()
        );
    }

    #[test]
    fn test_cloud_matches_per_trial_model() {
        let config = EfpConfig::default();
        let matrix = draw_inputs(&config.inputs, 20, 3).unwrap();
        let cloud = simulate_impacts(&config.physics, &config.inputs, 20, 3).unwrap();

        for (row, point) in matrix.rows().zip(&cloud.points) {
            let input = InputSample::from_row(row).unwrap();
            assert_eq!(*point, impact_point(&config.physics, &input));
        }
    }

    #[test]
    fn test_zero_spread_input_stays_at_mean() {
        let mut inputs = InputDistributions::default();
        inputs.set(InputParameter::T1Sim, NormalSpec::new(0.1, 0.0));
        let matrix = draw_inputs(&inputs, 50, 5).unwrap();

        assert!(
            matrix
                .column(InputParameter::T1Sim.index())
                .iter()
                .all(|&t| t == 0.1)
        );
    }

    #[test]
    fn test_negative_spread_rejected() {
        let mut inputs = InputDistributions::default();
        inputs.set(InputParameter::Vy, NormalSpec::new(0.0, -1.0));
        let err = draw_inputs(&inputs, 10, 1).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidDistributionParameters { parameter: "vy", .. }
        ));
    }
}
