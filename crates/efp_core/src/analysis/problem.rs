//! Declaration of the inputs a sensitivity design is built over

use serde::{Deserialize, Serialize};

use crate::error::SensitivityError;
use crate::model::InputParameter;

/// Named inputs with the bounds their design columns are scaled into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSpec {
    names: Vec<String>,
    bounds: Vec<(f64, f64)>,
}

impl ProblemSpec {
    pub fn new(names: Vec<String>, bounds: Vec<(f64, f64)>) -> Result<Self, SensitivityError> {
        if names.len() != bounds.len() {
            return Err(SensitivityError::DimensionMismatch {
                declared: names.len(),
                found: bounds.len(),
            });
        }
        Ok(Self { names, bounds })
    }

    /// Every input bounded to [0, 1]
    #[must_use]
    pub fn unit_hypercube(names: Vec<String>) -> Self {
        let bounds = vec![(0.0, 1.0); names.len()];
        Self { names, bounds }
    }

    /// The nine impact model inputs in column order, each on [0, 1]
    #[must_use]
    pub fn for_impact_model() -> Self {
        Self::unit_hypercube(InputParameter::names())
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }
}
