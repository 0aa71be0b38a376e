//! Point cloud produced by the direct Monte Carlo simulation

use serde::{Deserialize, Serialize};

use super::impact::ImpactPoint;

/// Impact points in generation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactCloud {
    pub points: Vec<ImpactPoint>,
    /// Seed the cloud was generated from
    pub seed: u64,
}

impl ImpactCloud {
    #[must_use]
    pub fn new(points: Vec<ImpactPoint>, seed: u64) -> Self {
        Self { points, seed }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// x coordinates in generation order
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// y coordinates in generation order
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    #[must_use]
    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(ImpactPoint::distance).collect()
    }
}
