use std::fmt;

/// Errors raised while evaluating the impact model or drawing its inputs
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A row handed to the model or converter does not have one value per input
    DimensionMismatch { expected: usize, found: usize },
    /// A Normal marginal cannot be built from the configured parameters
    InvalidDistributionParameters {
        parameter: &'static str,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
    /// A uniform variate fed to the quantile conversion is outside the open unit interval
    SampleOutOfRange { row: usize, column: usize, value: f64 },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::DimensionMismatch { expected, found } => {
                write!(f, "expected {expected} input values per row, found {found}")
            }
            ModelError::InvalidDistributionParameters {
                parameter,
                mean,
                std_dev,
                reason,
            } => write!(
                f,
                "invalid Normal parameters for {parameter} (mean={mean}, std_dev={std_dev}): {reason}"
            ),
            ModelError::SampleOutOfRange { row, column, value } => write!(
                f,
                "uniform sample {value} at row {row}, column {column} is outside (0, 1); clamp before converting"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Errors raised by the hit and containment statistics
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsError {
    EmptyPointCloud,
    InvalidPercentile(f64),
}

impl fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticsError::EmptyPointCloud => {
                write!(f, "cannot compute statistics of an empty point cloud")
            }
            StatisticsError::InvalidPercentile(p) => {
                write!(f, "percentile {p} is outside [0, 100]")
            }
        }
    }
}

impl std::error::Error for StatisticsError {}

/// Errors raised by the sensitivity design, estimator, or pipeline glue
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityError {
    /// Base sample count must be positive
    InvalidBaseSamples(usize),
    /// The problem declares a different number of inputs than the matrix provides
    DimensionMismatch { declared: usize, found: usize },
    /// Output vector length is not a whole number of sample groups
    OutputLengthMismatch { outputs: usize, group_size: usize },
    /// Design generator and estimator disagree on the rows per base point
    LayoutMismatch { generator: usize, estimator: usize },
    /// Requested more dimensions than the direction number table provides
    UnsupportedDimension { requested: usize, max: usize },
    InvalidConfidenceLevel(f64),
    InvalidResampleCount(usize),
    /// Outputs have zero variance, so no index is defined
    DegenerateOutput,
    Model(ModelError),
}

impl fmt::Display for SensitivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityError::InvalidBaseSamples(n) => {
                write!(f, "base sample count must be positive, got {n}")
            }
            SensitivityError::DimensionMismatch { declared, found } => write!(
                f,
                "problem declares {declared} inputs but the sample matrix has {found} columns"
            ),
            SensitivityError::OutputLengthMismatch {
                outputs,
                group_size,
            } => write!(
                f,
                "{outputs} model outputs is not a multiple of the sample group size {group_size}"
            ),
            SensitivityError::LayoutMismatch {
                generator,
                estimator,
            } => write!(
                f,
                "design emits {generator} rows per base point but the estimator expects {estimator}"
            ),
            SensitivityError::UnsupportedDimension { requested, max } => write!(
                f,
                "Sobol sequence supports at most {max} dimensions, {requested} requested"
            ),
            SensitivityError::InvalidConfidenceLevel(c) => {
                write!(f, "confidence level must be in (0, 1), got {c}")
            }
            SensitivityError::InvalidResampleCount(n) => {
                write!(f, "bootstrap needs at least 2 resamples, got {n}")
            }
            SensitivityError::DegenerateOutput => {
                write!(f, "model outputs have zero variance")
            }
            SensitivityError::Model(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SensitivityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SensitivityError::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for SensitivityError {
    fn from(err: ModelError) -> Self {
        SensitivityError::Model(err)
    }
}

/// Errors found while validating an [`EfpConfig`](crate::config::EfpConfig)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f64 },
    NoSimulations,
    InvalidClipEpsilon(f64),
    /// Sobol skip beyond the sequence period
    SkipOutOfRange(usize),
    Model(ModelError),
    Sensitivity(SensitivityError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            ConfigError::NoSimulations => write!(f, "num_simulations must be at least 1"),
            ConfigError::InvalidClipEpsilon(eps) => {
                write!(f, "clip epsilon must be in (0, 0.5), got {eps}")
            }
            ConfigError::SkipOutOfRange(skip) => write!(
                f,
                "sensitivity.skip must be below {}, got {skip}",
                crate::analysis::SOBOL_PERIOD
            ),
            ConfigError::Model(e) => write!(f, "{e}"),
            ConfigError::Sensitivity(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Model(e) => Some(e),
            ConfigError::Sensitivity(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for ConfigError {
    fn from(err: ModelError) -> Self {
        ConfigError::Model(err)
    }
}

impl From<SensitivityError> for ConfigError {
    fn from(err: SensitivityError) -> Self {
        ConfigError::Sensitivity(err)
    }
}
