//! The uncertain inputs of the impact model
//!
//! Every matrix in the crate (sensitivity design, converted samples, batch model input)
//! lays its columns out in [`InputParameter::ALL`] order. Rows are unpacked into
//! [`InputSample`] by name through [`InputParameter::index`], so the ordering is
//! written down exactly once.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number of uncertain inputs per trial
pub const NUM_INPUTS: usize = 9;

/// One uncertain input of the impact model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputParameter {
    /// Carrier velocity along x (m/s)
    Vx,
    /// Carrier velocity along y (m/s)
    Vy,
    /// Sampled recognition delay (s)
    T1Sim,
    /// Pitch angle at initiation (rad)
    Theta0,
    /// Yaw angle at initiation (rad)
    Phi0,
    /// Pitch rate (rad/s)
    DthetaDt,
    /// Yaw rate (rad/s)
    DphiDt,
    /// Projectile aiming error about x (rad)
    EfpErrorX,
    /// Projectile aiming error about y (rad)
    EfpErrorY,
}

impl InputParameter {
    /// Column order shared by the sampler, the converter and the model
    pub const ALL: [InputParameter; NUM_INPUTS] = [
        InputParameter::Vx,
        InputParameter::Vy,
        InputParameter::T1Sim,
        InputParameter::Theta0,
        InputParameter::Phi0,
        InputParameter::DthetaDt,
        InputParameter::DphiDt,
        InputParameter::EfpErrorX,
        InputParameter::EfpErrorY,
    ];

    /// Column index of this input
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            InputParameter::Vx => 0,
            InputParameter::Vy => 1,
            InputParameter::T1Sim => 2,
            InputParameter::Theta0 => 3,
            InputParameter::Phi0 => 4,
            InputParameter::DthetaDt => 5,
            InputParameter::DphiDt => 6,
            InputParameter::EfpErrorX => 7,
            InputParameter::EfpErrorY => 8,
        }
    }

    /// Name used in reports and exported tables
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            InputParameter::Vx => "vx",
            InputParameter::Vy => "vy",
            InputParameter::T1Sim => "T1_sim",
            InputParameter::Theta0 => "theta0",
            InputParameter::Phi0 => "phi0",
            InputParameter::DthetaDt => "dtheta_dt",
            InputParameter::DphiDt => "dphi_dt",
            InputParameter::EfpErrorX => "EFP_error_x",
            InputParameter::EfpErrorY => "EFP_error_y",
        }
    }

    /// Names of all inputs in column order
    #[must_use]
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|p| p.name().to_string()).collect()
    }
}

/// Physical values of all uncertain inputs for one trial
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub vx: f64,
    pub vy: f64,
    pub t1_sim: f64,
    pub theta0: f64,
    pub phi0: f64,
    pub dtheta_dt: f64,
    pub dphi_dt: f64,
    pub efp_error_x: f64,
    pub efp_error_y: f64,
}

impl InputSample {
    /// Unpack a row laid out in [`InputParameter::ALL`] order
    pub fn from_row(row: &[f64]) -> Result<Self, ModelError> {
        if row.len() != NUM_INPUTS {
            return Err(ModelError::DimensionMismatch {
                expected: NUM_INPUTS,
                found: row.len(),
            });
        }
        let mut sample = Self::default();
        for param in InputParameter::ALL {
            sample.set(param, row[param.index()]);
        }
        Ok(sample)
    }

    /// Pack into a row in [`InputParameter::ALL`] order
    #[must_use]
    pub fn to_row(&self) -> [f64; NUM_INPUTS] {
        let mut row = [0.0; NUM_INPUTS];
        for param in InputParameter::ALL {
            row[param.index()] = self.get(param);
        }
        row
    }

    #[must_use]
    pub fn get(&self, param: InputParameter) -> f64 {
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

    pub fn set(&mut self, param: InputParameter, value: f64) {
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
        *slot = value;
    }
}
