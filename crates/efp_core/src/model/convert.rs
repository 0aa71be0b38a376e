//! Uniform-to-physical parameter conversion
//!
//! Column `i` of a uniform sample matrix is pushed through the Normal quantile
//! function of input `i`. Values must lie strictly inside (0, 1); the quantile is
//! infinite at the ends, so callers clamp before converting.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::InputDistributions;
use crate::error::ModelError;

use super::inputs::{InputParameter, NUM_INPUTS};
use super::matrix::SampleMatrix;

/// Column-wise inverse-CDF transform onto the input marginals
#[derive(Debug, Clone)]
pub struct ParameterConverter {
    marginals: Vec<Normal>,
}

impl ParameterConverter {
    pub fn new(inputs: &InputDistributions) -> Result<Self, ModelError> {
        let marginals = inputs
            .in_column_order()
            .into_iter()
            .map(|(param, spec)| spec.to_statrs(param))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { marginals })
    }

    /// Quantile of one input at uniform value `u`
    pub fn convert_value(&self, param: InputParameter, u: f64) -> Result<f64, ModelError> {
        self.quantile(0, param.index(), u)
    }

    /// Convert a `(n, 9)` matrix of uniform values into physical values
    pub fn convert(&self, uniform: &SampleMatrix) -> Result<SampleMatrix, ModelError> {
        if uniform.ncols() != NUM_INPUTS {
            return Err(ModelError::DimensionMismatch {
                expected: NUM_INPUTS,
                found: uniform.ncols(),
            });
        }

        let mut data = Vec::with_capacity(uniform.as_slice().len());
        for (row, values) in uniform.rows().enumerate() {
            for (column, &u) in values.iter().enumerate() {
                data.push(self.quantile(row, column, u)?);
            }
        }

        SampleMatrix::from_data(data, NUM_INPUTS).ok_or(ModelError::DimensionMismatch {
            expected: NUM_INPUTS,
            found: uniform.ncols(),
        })
    }

    fn quantile(&self, row: usize, column: usize, u: f64) -> Result<f64, ModelError> {
        if !(u > 0.0 && u < 1.0) {
            return Err(ModelError::SampleOutOfRange {
                row,
                column,
                value: u,
            });
        }
        Ok(self.marginals[column].inverse_cdf(u))
    }
}
