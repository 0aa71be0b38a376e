//! Variance-based index estimation from Saltelli-ordered model outputs
//!
//! Outputs are standardized first. With `A`, `B`, `AB_j` and `BA_j` read back from the
//! row layout of the design:
//!
//! - first order: `S1_j = mean(B * (AB_j - A)) / var(A ∪ B)`
//! - total order: `ST_j = 0.5 * mean((A - AB_j)^2) / var(A ∪ B)`
//! - second order: `S2_jk = mean(BA_j * AB_k - A * B) / var(A ∪ B) - S1_j - S1_k`
//!
//! Confidence half-widths are the standard deviation of the same estimators over
//! bootstrap resamples of the base points, scaled by the Normal quantile of the
//! confidence level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::SensitivityError;

use super::problem::ProblemSpec;
use super::sampling::saltelli_group_size;

/// Turns model outputs into sensitivity indices
pub trait IndexEstimator {
    fn estimate(
        &self,
        problem: &ProblemSpec,
        outputs: &[f64],
    ) -> Result<SobolIndices, SensitivityError>;

    /// Rows per base point the outputs must be laid out in
    fn group_size(&self, num_vars: usize) -> usize;
}

/// Second-order index of one input pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondOrderIndex {
    pub first: String,
    pub second: String,
    pub s2: f64,
    pub s2_conf: f64,
}

/// Indices per input, in problem column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SobolIndices {
    pub names: Vec<String>,
    pub s1: Vec<f64>,
    pub s1_conf: Vec<f64>,
    pub st: Vec<f64>,
    pub st_conf: Vec<f64>,
    /// Present only when second-order estimation was requested
    pub s2: Option<Vec<SecondOrderIndex>>,
}

/// Saltelli first-order and Jansen total-order estimators with bootstrap intervals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaltelliEstimator {
    pub second_order: bool,
    pub num_resamples: usize,
    pub confidence_level: f64,
    pub seed: u64,
}

impl Default for SaltelliEstimator {
    fn default() -> Self {
        Self {
            second_order: true,
            num_resamples: 100,
            confidence_level: 0.95,
            seed: 42,
        }
    }
}

impl SaltelliEstimator {
    fn validate(&self) -> Result<(), SensitivityError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(SensitivityError::InvalidConfidenceLevel(
                self.confidence_level,
            ));
        }
        if self.num_resamples < 2 {
            return Err(SensitivityError::InvalidResampleCount(self.num_resamples));
        }
        Ok(())
    }

    fn z_score(&self) -> f64 {
        Normal::standard().inverse_cdf(0.5 + self.confidence_level / 2.0)
    }
}

impl IndexEstimator for SaltelliEstimator {
    fn estimate(
        &self,
        problem: &ProblemSpec,
        outputs: &[f64],
    ) -> Result<SobolIndices, SensitivityError> {
        self.validate()?;

        let d = problem.num_vars();
        let group_size = self.group_size(d);
        if outputs.is_empty() || outputs.len() % group_size != 0 {
            return Err(SensitivityError::OutputLengthMismatch {
                outputs: outputs.len(),
                group_size,
            });
        }

        let groups = Groups::split(&standardize(outputs)?, d, self.second_order);
        let n = groups.a.len();
        let all: Vec<usize> = (0..n).collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let resamples: Vec<Vec<usize>> = (0..self.num_resamples)
            .map(|_| (0..n).map(|_| rng.random_range(0..n)).collect())
            .collect();
        let z = self.z_score();

        let mut indices = SobolIndices {
            names: problem.names().to_vec(),
            s1: Vec::with_capacity(d),
            s1_conf: Vec::with_capacity(d),
            st: Vec::with_capacity(d),
            st_conf: Vec::with_capacity(d),
            s2: None,
        };

        for j in 0..d {
            indices.s1.push(groups.first_order(&all, j));
            indices
                .s1_conf
                .push(z * bootstrap_std_dev(&resamples, |idx| groups.first_order(idx, j)));
            indices.st.push(groups.total_order(&all, j));
            indices
                .st_conf
                .push(z * bootstrap_std_dev(&resamples, |idx| groups.total_order(idx, j)));
        }

        if self.second_order {
            let mut pairs = Vec::with_capacity(d * d.saturating_sub(1) / 2);
            for j in 0..d {
                for k in (j + 1)..d {
                    pairs.push(SecondOrderIndex {
                        first: problem.names()[j].clone(),
                        second: problem.names()[k].clone(),
                        s2: groups.second_order(&all, j, k),
                        s2_conf: z * bootstrap_std_dev(&resamples, |idx| {
                            groups.second_order(idx, j, k)
                        }),
                    });
                }
            }
            indices.s2 = Some(pairs);
        }

        debug!(
            base_samples = n,
            resamples = self.num_resamples,
            "estimated Sobol indices"
        );

        Ok(indices)
    }

    fn group_size(&self, num_vars: usize) -> usize {
        saltelli_group_size(num_vars, self.second_order)
    }
}

/// Zero mean, unit population variance
fn standardize(outputs: &[f64]) -> Result<Vec<f64>, SensitivityError> {
    let n = outputs.len() as f64;
    let mean = outputs.iter().sum::<f64>() / n;
    let std_dev = (outputs.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / n).sqrt();
    if !(std_dev > 0.0 && std_dev.is_finite()) {
        return Err(SensitivityError::DegenerateOutput);
    }
    Ok(outputs.iter().map(|y| (y - mean) / std_dev).collect())
}

/// Sample standard deviation of `estimator` over the resampled index sets
fn bootstrap_std_dev(resamples: &[Vec<usize>], estimator: impl Fn(&[usize]) -> f64) -> f64 {
    let values: Vec<f64> = resamples.iter().map(|idx| estimator(idx)).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

/// Outputs regrouped by role; `ab[j][i]` is the output of row `AB_j` of base point `i`
struct Groups {
    a: Vec<f64>,
    b: Vec<f64>,
    ab: Vec<Vec<f64>>,
    ba: Vec<Vec<f64>>,
}

impl Groups {
    fn split(outputs: &[f64], d: usize, second_order: bool) -> Self {
        let step = saltelli_group_size(d, second_order);
        let n = outputs.len() / step;
        let mut groups = Groups {
            a: Vec::with_capacity(n),
            b: Vec::with_capacity(n),
            ab: vec![Vec::with_capacity(n); d],
            ba: if second_order {
                vec![Vec::with_capacity(n); d]
            } else {
                Vec::new()
            },
        };

        for chunk in outputs.chunks_exact(step) {
            groups.a.push(chunk[0]);
            groups.b.push(chunk[step - 1]);
            for j in 0..d {
                groups.ab[j].push(chunk[j + 1]);
                if second_order {
                    groups.ba[j].push(chunk[j + 1 + d]);
                }
            }
        }
        groups
    }

    /// Population variance of `A[idx]` and `B[idx]` pooled
    fn variance(&self, idx: &[usize]) -> f64 {
        let n = 2.0 * idx.len() as f64;
        let mean = idx.iter().map(|&i| self.a[i] + self.b[i]).sum::<f64>() / n;
        idx.iter()
            .map(|&i| (self.a[i] - mean).powi(2) + (self.b[i] - mean).powi(2))
            .sum::<f64>()
            / n
    }

    fn first_order(&self, idx: &[usize], j: usize) -> f64 {
        let var = self.variance(idx);
        if var == 0.0 {
            return 0.0;
        }
        let ab = &self.ab[j];
        mean(idx.iter().map(|&i| self.b[i] * (ab[i] - self.a[i]))) / var
    }

    fn total_order(&self, idx: &[usize], j: usize) -> f64 {
        let var = self.variance(idx);
        if var == 0.0 {
            return 0.0;
        }
        let ab = &self.ab[j];
        0.5 * mean(idx.iter().map(|&i| (self.a[i] - ab[i]).powi(2))) / var
    }

    fn second_order(&self, idx: &[usize], j: usize, k: usize) -> f64 {
        let var = self.variance(idx);
        if var == 0.0 {
            return 0.0;
        }
        let (ba_j, ab_k) = (&self.ba[j], &self.ab[k]);
        let v_jk = mean(
            idx.iter()
                .map(|&i| ba_j[i] * ab_k[i] - self.a[i] * self.b[i]),
        ) / var;
        v_jk - self.first_order(idx, j) - self.first_order(idx, k)
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len() as f64;
    values.sum::<f64>() / n
}
