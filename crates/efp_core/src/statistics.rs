//! Hit and containment statistics of an impact point cloud

use serde::{Deserialize, Serialize};

use crate::config::TargetRect;
use crate::error::StatisticsError;
use crate::model::ImpactPoint;

/// Percentiles bounding the central 95% of each axis
pub const LOWER_PERCENTILE: f64 = 2.5;
pub const UPPER_PERCENTILE: f64 = 97.5;

/// Fraction of points inside the closed target rectangle
pub fn hit_probability(
    points: &[ImpactPoint],
    target: &TargetRect,
) -> Result<f64, StatisticsError> {
    if points.is_empty() {
        return Err(StatisticsError::EmptyPointCloud);
    }
    Ok(count_hits(points, target) as f64 / points.len() as f64)
}

fn count_hits(points: &[ImpactPoint], target: &TargetRect) -> usize {
    points.iter().filter(|p| target.contains(p.x, p.y)).count()
}

/// Percentile `p` (in [0, 100]) with linear interpolation between the closest ranks.
///
/// Rank is `p / 100 * (n - 1)` over the sorted values.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptyPointCloud);
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(StatisticsError::InvalidPercentile(p));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(percentile_sorted(&sorted, p))
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = p / 100.0 * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let t = rank - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    if t >= 0.5 {
        b - (b - a) * (1.0 - t)
    } else {
        a + (b - a) * t
    }
}

/// Width of the central 95% band along one axis
pub fn central_span(values: &[f64]) -> Result<f64, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptyPointCloud);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(percentile_sorted(&sorted, UPPER_PERCENTILE)
        - percentile_sorted(&sorted, LOWER_PERCENTILE))
}

/// 95% containment radius: half of the larger per-axis central span
pub fn radius_95(points: &[ImpactPoint]) -> Result<f64, StatisticsError> {
    let (span_x, span_y) = axis_spans(points)?;
    Ok(span_x.max(span_y) / 2.0)
}

fn axis_spans(points: &[ImpactPoint]) -> Result<(f64, f64), StatisticsError> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    Ok((central_span(&xs)?, central_span(&ys)?))
}

/// Summary of a point cloud against a target, as shown in the report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactStatistics {
    pub trials: usize,
    pub hits: usize,
    pub hit_probability: f64,
    pub radius_95: f64,
    /// Central 95% span along x
    pub span_x: f64,
    /// Central 95% span along y
    pub span_y: f64,
    /// Mean point of impact
    pub mean_point: ImpactPoint,
}

impl ImpactStatistics {
    pub fn compute(points: &[ImpactPoint], target: &TargetRect) -> Result<Self, StatisticsError> {
        if points.is_empty() {
            return Err(StatisticsError::EmptyPointCloud);
        }

        let trials = points.len();
        let hits = count_hits(points, target);
        let (span_x, span_y) = axis_spans(points)?;

        let n = trials as f64;
        let mean_point = ImpactPoint::new(
            points.iter().map(|p| p.x).sum::<f64>() / n,
            points.iter().map(|p| p.y).sum::<f64>() / n,
        );

        Ok(Self {
            trials,
            hits,
            hit_probability: hits as f64 / n,
            radius_95: span_x.max(span_y) / 2.0,
            span_x,
            span_y,
            mean_point,
        })
    }
}
