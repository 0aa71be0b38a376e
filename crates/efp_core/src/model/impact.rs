//! Impact point model
//!
//! Maps one set of physical input values to the impact coordinates of the projectile
//! on the ground plane, relative to the target center. [`impact_point`] is the only
//! place the physics lives; the direct simulator calls it per trial and the batch
//! functions map it over matrix rows.

use serde::{Deserialize, Serialize};

use crate::config::PhysicalConstants;
use crate::error::ModelError;

use super::inputs::{InputSample, NUM_INPUTS};
use super::matrix::SampleMatrix;

/// Impact coordinates in meters, relative to the target center
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactPoint {
    pub x: f64,
    pub y: f64,
}

impl ImpactPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to the target center
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Velocity of the warhead center: linear velocity plus the rotational contribution
/// of the pitch and yaw rates acting on the center offset `c_l`
#[must_use]
pub fn convective_velocity(physics: &PhysicalConstants, input: &InputSample) -> (f64, f64) {
    let (sin_psi0, cos_psi0) = physics.psi0.sin_cos();
    let (sin_theta0, cos_theta0) = input.theta0.sin_cos();
    let (sin_phi0, cos_phi0) = input.phi0.sin_cos();

    let vc_x = input.vx
        + physics.c_l
            * (input.dtheta_dt * cos_psi0 * cos_theta0
                - input.dphi_dt * (cos_psi0 * sin_theta0 * sin_phi0 - sin_psi0 * cos_phi0));
    let vc_y = input.vy
        + physics.c_l
            * (input.dtheta_dt * sin_psi0 * cos_theta0
                - input.dphi_dt * (sin_psi0 * sin_theta0 * sin_phi0 + cos_psi0 * cos_phi0));

    (vc_x, vc_y)
}

/// Impact point of a single trial.
///
/// `theta0` near ±90° makes the flight time diverge; the result is then very large or
/// non-finite rather than an error.
#[must_use]
pub fn impact_point(physics: &PhysicalConstants, input: &InputSample) -> ImpactPoint {
    let y0 = physics.y0;
    let (sin_psi0, cos_psi0) = physics.psi0.sin_cos();

    let cos_theta0 = input.theta0.cos();
    let t3 = y0 / (cos_theta0 * physics.vp);
    let delta_t = input.t1_sim + physics.t2;

    let (vc_x, vc_y) = convective_velocity(physics, input);

    let tan_theta0 = input.theta0.tan();
    let tan_phi0 = input.phi0.tan();

    let x = input.vx * delta_t
        + vc_x * t3
        + y0 * (tan_theta0 * cos_psi0 + tan_phi0 * sin_psi0)
        + y0 * input.efp_error_x.tan();
    let y = input.vy * delta_t
        + vc_y * t3
        + y0 * (tan_theta0 * sin_psi0 - tan_phi0 * cos_psi0)
        + y0 * input.efp_error_y.tan();

    ImpactPoint { x, y }
}

/// Impact point for every row of a matrix of physical input values
pub fn evaluate_batch(
    physics: &PhysicalConstants,
    inputs: &SampleMatrix,
) -> Result<Vec<ImpactPoint>, ModelError> {
    check_width(inputs)?;
    inputs
        .map_rows(|row| InputSample::from_row(row).map(|input| impact_point(physics, &input)))
        .into_iter()
        .collect()
}

/// Distance to the target center for every row of a matrix of physical input values
pub fn evaluate_distances(
    physics: &PhysicalConstants,
    inputs: &SampleMatrix,
) -> Result<Vec<f64>, ModelError> {
    Ok(evaluate_batch(physics, inputs)?
        .iter()
        .map(ImpactPoint::distance)
        .collect())
}

fn check_width(inputs: &SampleMatrix) -> Result<(), ModelError> {
    if inputs.ncols() != NUM_INPUTS {
        return Err(ModelError::DimensionMismatch {
            expected: NUM_INPUTS,
            found: inputs.ncols(),
        });
    }
    Ok(())
}
