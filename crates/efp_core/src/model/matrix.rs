//! Row-major sample matrix shared by the design generator, converter and model

use serde::{Deserialize, Serialize};

/// Dense matrix with a flat row-major backing array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMatrix {
    data: Vec<f64>,
    ncols: usize,
}

impl SampleMatrix {
    /// Zero-filled matrix
    #[must_use]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            ncols,
        }
    }

    /// Wrap existing row-major data. Returns `None` if `data` is not a whole number of rows
    /// or `ncols` is zero.
    #[must_use]
    pub fn from_data(data: Vec<f64>, ncols: usize) -> Option<Self> {
        if ncols == 0 || data.len() % ncols != 0 {
            return None;
        }
        Some(Self { data, ncols })
    }

    /// Build from rows of equal width. Returns `None` on ragged or empty-width input.
    #[must_use]
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let ncols = rows.first().map(|r| r.as_ref().len())?;
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return None;
            }
            data.extend_from_slice(row);
        }
        Self::from_data(data, ncols)
    }

    #[must_use]
    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.data.len() / self.ncols
        }
    }

    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.ncols {
            return None;
        }
        self.data.get(row * self.ncols + col).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        if col >= self.ncols {
            return false;
        }
        match self.data.get_mut(row * self.ncols + col) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index * self.ncols;
        self.data.get(start..start + self.ncols)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.ncols.max(1))
    }

    /// Values of one column, top to bottom
    #[must_use]
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows().filter_map(|row| row.get(col).copied()).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Clamp every value into `[lo, hi]`
    pub fn clamp_all(&mut self, lo: f64, hi: f64) {
        for value in &mut self.data {
            *value = value.clamp(lo, hi);
        }
    }

    /// Map rows through `f`, in parallel when the `parallel` feature is enabled.
    /// Output order always matches row order.
    pub(crate) fn map_rows<T, F>(&self, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&[f64]) -> T + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.data.par_chunks_exact(self.ncols.max(1)).map(f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.rows().map(f).collect()
        }
    }
}
