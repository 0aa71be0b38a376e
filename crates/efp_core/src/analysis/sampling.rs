//! Saltelli design over a Sobol sequence

use tracing::debug;

use crate::error::SensitivityError;
use crate::model::SampleMatrix;

use super::problem::ProblemSpec;
use super::sobol::SobolSequence;

/// Produces the sample matrix a sensitivity estimator consumes
pub trait DesignGenerator {
    /// Design matrix for `base_samples` base points, one column per problem input
    fn generate(
        &self,
        problem: &ProblemSpec,
        base_samples: usize,
    ) -> Result<SampleMatrix, SensitivityError>;

    /// Rows emitted per base point
    fn group_size(&self, num_vars: usize) -> usize;
}

/// Saltelli extension of an unscrambled Sobol sequence.
///
/// Each base point of a `2D`-dimensional Sobol sequence is split into `A` (first `D`
/// columns) and `B` (last `D`). The design emits, per base point, `A`, then `AB_j`
/// (`A` with column `j` from `B`) for every `j`, then `BA_j` (`B` with column `j`
/// from `A`) when second-order indices are wanted, then `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltelliSampler {
    /// Leading Sobol points to discard; `None` skips the next power of two >= N
    pub skip: Option<usize>,
    pub second_order: bool,
}

impl Default for SaltelliSampler {
    fn default() -> Self {
        Self {
            skip: None,
            second_order: true,
        }
    }
}

impl SaltelliSampler {
    #[must_use]
    pub fn new(second_order: bool) -> Self {
        Self {
            skip: None,
            second_order,
        }
    }

    #[must_use]
    pub fn with_skip(mut self, skip: Option<usize>) -> Self {
        self.skip = skip;
        self
    }
}

/// Rows per base point for `num_vars` inputs
#[must_use]
pub fn saltelli_group_size(num_vars: usize, second_order: bool) -> usize {
    if second_order {
        2 * num_vars + 2
    } else {
        num_vars + 2
    }
}

impl DesignGenerator for SaltelliSampler {
    fn generate(
        &self,
        problem: &ProblemSpec,
        base_samples: usize,
    ) -> Result<SampleMatrix, SensitivityError> {
        if base_samples == 0 {
            return Err(SensitivityError::InvalidBaseSamples(base_samples));
        }

        let d = problem.num_vars();
        let mut sobol = SobolSequence::new(2 * d)?;
        let skip = self.skip.unwrap_or_else(|| base_samples.next_power_of_two());
        sobol.skip(skip as u64);

        let group = self.group_size(d);
        let mut data = Vec::with_capacity(base_samples * group * d);
        let bounds = problem.bounds();
        let mut push_scaled = |row: &[f64]| {
            for (&u, &(lo, hi)) in row.iter().zip(bounds) {
                data.push(lo + u * (hi - lo));
            }
        };

        for _ in 0..base_samples {
            let point = sobol.next_point();
            let (a, b) = point.split_at(d);

            push_scaled(a);
            for j in 0..d {
                let mut row = a.to_vec();
                row[j] = b[j];
                push_scaled(&row);
            }
            if self.second_order {
                for j in 0..d {
                    let mut row = b.to_vec();
                    row[j] = a[j];
                    push_scaled(&row);
                }
            }
            push_scaled(b);
        }

        debug!(
            base_samples,
            skip,
            rows = base_samples * group,
            "generated Saltelli design"
        );

        SampleMatrix::from_data(data, d).ok_or(SensitivityError::DimensionMismatch {
            declared: d,
            found: 0,
        })
    }

    fn group_size(&self, num_vars: usize) -> usize {
        saltelli_group_size(num_vars, self.second_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(d: usize) -> ProblemSpec {
        ProblemSpec::unit_hypercube((0..d).map(|i| format!("x{i}")).collect())
    }

    #[test]
    fn test_design_size() {
        let sampler = SaltelliSampler::default();
        let design = sampler.generate(&ProblemSpec::for_impact_model(), 1024).unwrap();
        assert_eq!(design.nrows(), 1024 * 20);
        assert_eq!(design.ncols(), 9);

        let first_only = SaltelliSampler::new(false);
        let design = first_only.generate(&ProblemSpec::for_impact_model(), 64).unwrap();
        assert_eq!(design.nrows(), 64 * 11);
    }

    #[test]
    fn test_row_layout() {
        let d = 3;
        let sampler = SaltelliSampler::default();
        let design = sampler.generate(&problem(d), 4).unwrap();
        let group = 2 * d + 2;

        for g in 0..4 {
            let a = design.row(g * group).unwrap().to_vec();
            let b = design.row(g * group + group - 1).unwrap().to_vec();
            for j in 0..d {
                let ab = design.row(g * group + 1 + j).unwrap();
                let ba = design.row(g * group + 1 + d + j).unwrap();
                for k in 0..d {
                    if k == j {
                        assert_eq!(ab[k], b[k]);
                        assert_eq!(ba[k], a[k]);
                    } else {
                        assert_eq!(ab[k], a[k]);
                        assert_eq!(ba[k], b[k]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_default_skip_is_next_power_of_two() {
        let d = 2;
        let design = SaltelliSampler::default().generate(&problem(d), 3).unwrap();

        let mut sobol = SobolSequence::new(2 * d).unwrap();
        sobol.skip(4);
        let point = sobol.next_point().to_vec();

        assert_eq!(design.row(0).unwrap(), &point[..d]);
        assert_eq!(design.row(2 * d + 1).unwrap(), &point[d..]);
    }

    #[test]
    fn test_explicit_skip() {
        let d = 2;
        let sampler = SaltelliSampler::new(false).with_skip(Some(0));
        let design = sampler.generate(&problem(d), 2).unwrap();
        // first Sobol point is the origin
        assert_eq!(design.row(0).unwrap(), &[0.0, 0.0]);
        assert_eq!(design.row(1).unwrap(), &[0.0, 0.0]);
        assert_eq!(design.row(4).unwrap(), &[0.5, 0.5]);
    }

    #[test]
    fn test_values_scaled_into_bounds() {
        let problem = ProblemSpec::new(
            vec!["a".into(), "b".into()],
            vec![(-2.0, 2.0), (10.0, 11.0)],
        )
        .unwrap();
        let design = SaltelliSampler::default().generate(&problem, 32).unwrap();
        for row in design.rows() {
            assert!((-2.0..2.0).contains(&row[0]));
            assert!((10.0..11.0).contains(&row[1]));
        }
    }

    #[test]
    fn test_invalid_requests() {
        let sampler = SaltelliSampler::default();
        assert_eq!(
            sampler.generate(&problem(3), 0).unwrap_err(),
            SensitivityError::InvalidBaseSamples(0)
        );
        assert_eq!(
            sampler.generate(&problem(10), 8).unwrap_err(),
            SensitivityError::UnsupportedDimension {
                requested: 20,
                max: 18
            }
        );
    }
}
