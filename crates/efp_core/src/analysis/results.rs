//! Ranked sensitivity report built from estimated indices

use serde::{Deserialize, Serialize};

use super::estimator::{SecondOrderIndex, SobolIndices};

/// First- and total-order indices of one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSensitivity {
    pub name: String,
    pub s1: f64,
    pub st: f64,
    pub s1_conf: f64,
    pub st_conf: f64,
}

/// Sensitivity table ranked by total-order index, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub parameters: Vec<ParameterSensitivity>,
    pub second_order: Option<Vec<SecondOrderIndex>>,
    pub base_samples: usize,
    /// Rows of the design matrix the model was evaluated on
    pub design_rows: usize,
}

impl SensitivityReport {
    /// Rank `indices` by ST descending. Ties keep column order.
    #[must_use]
    pub fn from_indices(indices: SobolIndices, base_samples: usize, design_rows: usize) -> Self {
        let mut parameters: Vec<ParameterSensitivity> = indices
            .names
            .into_iter()
            .enumerate()
            .map(|(j, name)| ParameterSensitivity {
                name,
                s1: indices.s1[j],
                st: indices.st[j],
                s1_conf: indices.s1_conf[j],
                st_conf: indices.st_conf[j],
            })
            .collect();
        parameters.sort_by(|a, b| b.st.total_cmp(&a.st));

        Self {
            parameters,
            second_order: indices.s2,
            base_samples,
            design_rows,
        }
    }

    /// Look up an input by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterSensitivity> {
        self.parameters.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn sum_s1(&self) -> f64 {
        self.parameters.iter().map(|p| p.s1).sum()
    }

    /// Input names in ranked order
    pub fn ranking(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }
}
