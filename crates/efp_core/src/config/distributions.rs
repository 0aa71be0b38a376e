//! Normal marginals of the uncertain inputs

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::InputParameter;

/// Mean and standard deviation of a Normal marginal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalSpec {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalSpec {
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Both values given in degrees (or degrees per second), stored in radians
    #[must_use]
    pub fn degrees(mean: f64, std_dev: f64) -> Self {
        Self {
            mean: mean.to_radians(),
            std_dev: std_dev.to_radians(),
        }
    }

    /// Same mean, standard deviation multiplied by `factor`
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            mean: self.mean,
            std_dev: self.std_dev * factor,
        }
    }

    pub(crate) fn to_rand_distr(
        self,
        param: InputParameter,
    ) -> Result<rand_distr::Normal<f64>, ModelError> {
        let invalid = || ModelError::InvalidDistributionParameters {
            parameter: param.name(),
            mean: self.mean,
            std_dev: self.std_dev,
            reason: "std_dev must be non-negative and finite",
        };
        // rand_distr only rejects a non-finite std_dev
        if !(self.std_dev >= 0.0 && self.mean.is_finite()) {
            return Err(invalid());
        }
        rand_distr::Normal::new(self.mean, self.std_dev).map_err(|_| invalid())
    }

    pub(crate) fn to_statrs(
        self,
        param: InputParameter,
    ) -> Result<statrs::distribution::Normal, ModelError> {
        statrs::distribution::Normal::new(self.mean, self.std_dev).map_err(|_| {
            ModelError::InvalidDistributionParameters {
                parameter: param.name(),
                mean: self.mean,
                std_dev: self.std_dev,
                reason: "std_dev must be positive and finite",
            }
        })
    }
}

/// Marginal distribution of every uncertain input, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDistributions {
    pub vx: NormalSpec,
    pub vy: NormalSpec,
    pub t1_sim: NormalSpec,
    pub theta0: NormalSpec,
    pub phi0: NormalSpec,
    pub dtheta_dt: NormalSpec,
    pub dphi_dt: NormalSpec,
    pub efp_error_x: NormalSpec,
    pub efp_error_y: NormalSpec,
}

impl Default for InputDistributions {
    fn default() -> Self {
        Self {
            vx: NormalSpec::new(0.0, 1.0),
            vy: NormalSpec::new(0.0, 1.0),
            t1_sim: NormalSpec::new(0.1, 0.01),
            theta0: NormalSpec::degrees(0.0, 1.5),
            phi0: NormalSpec::degrees(0.0, 1.5),
            dtheta_dt: NormalSpec::degrees(0.0, 1.5),
            dphi_dt: NormalSpec::degrees(0.0, 1.5),
            efp_error_x: NormalSpec::degrees(0.0, 0.5),
            efp_error_y: NormalSpec::degrees(0.0, 0.5),
        }
    }
}

impl InputDistributions {
    #[must_use]
    pub fn get(&self, param: InputParameter) -> NormalSpec {
        match param {
            InputParameter::Vx => self.vx,
            InputParameter::Vy => self.vy,
            InputParameter::T1Sim => self.t1_sim,
            InputParameter::Theta0 => self.theta0,
            InputParameter::Phi0 => self.phi0,
            InputParameter::DthetaDt => self.dtheta_dt,
            InputParameter::DphiDt => self.dphi_dt,
            InputParameter::EfpErrorX => self.efp_error_x,
            InputParameter::EfpErrorY => self.efp_error_y,
        }
    }

    pub fn set(&mut self, param: InputParameter, spec: NormalSpec) {
        let slot = match param {
            InputParameter::Vx => &mut self.vx,
            InputParameter::Vy => &mut self.vy,
            InputParameter::T1Sim => &mut self.t1_sim,
            InputParameter::Theta0 => &mut self.theta0,
            InputParameter::Phi0 => &mut self.phi0,
            InputParameter::DthetaDt => &mut self.dtheta_dt,
            InputParameter::DphiDt => &mut self.dphi_dt,
            InputParameter::EfpErrorX => &mut self.efp_error_x,
            InputParameter::EfpErrorY => &mut self.efp_error_y,
        };
        *slot = spec;
    }

    /// Marginals in column order
    #[must_use]
    pub fn in_column_order(&self) -> Vec<(InputParameter, NormalSpec)> {
        InputParameter::ALL
            .iter()
            .map(|&param| (param, self.get(param)))
            .collect()
    }

    /// Every standard deviation multiplied by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        for param in InputParameter::ALL {
            scaled.set(param, self.get(param).scaled(factor));
        }
        scaled
    }
}
