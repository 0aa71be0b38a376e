//! Unscrambled Sobol low-discrepancy sequence
//!
//! Direction numbers are the Joe-Kuo set for the first dimensions; dimension 0 is the
//! van der Corput sequence. Points are generated in Gray code order with 32-bit
//! integers, so the sequence holds 2^32 points before wrapping back to the origin.

use crate::error::SensitivityError;

/// Dimensions covered by the direction number table
pub const MAX_DIMENSIONS: usize = 18;

/// Number of points before the sequence wraps back to the origin
pub const PERIOD: u64 = 1 << BITS;

const BITS: usize = 32;
const SCALE: f64 = PERIOD as f64;

/// (degree s, coefficients a, initial direction numbers m) for dimensions 1..18
const JOE_KUO: [(u32, u32, &[u32]); MAX_DIMENSIONS - 1] = [
    (1, 0, &[1]),
    (2, 1, &[1, 3]),
    (3, 1, &[1, 3, 1]),
    (3, 2, &[1, 1, 1]),
    (4, 1, &[1, 1, 3, 3]),
    (4, 4, &[1, 3, 5, 13]),
    (5, 2, &[1, 1, 5, 5, 17]),
    (5, 4, &[1, 1, 5, 5, 5]),
    (5, 7, &[1, 1, 7, 11, 19]),
    (5, 11, &[1, 1, 5, 1, 1]),
    (5, 13, &[1, 1, 1, 3, 11]),
    (5, 14, &[1, 3, 5, 5, 31]),
    (6, 1, &[1, 3, 3, 9, 7, 49]),
    (6, 13, &[1, 1, 1, 15, 21, 21]),
    (6, 16, &[1, 3, 1, 13, 27, 49]),
    (6, 19, &[1, 1, 1, 15, 7, 5]),
    (6, 22, &[1, 3, 1, 15, 13, 25]),
];

/// Deterministic Sobol point generator
#[derive(Debug, Clone)]
pub struct SobolSequence {
    /// `directions[d][i]` is direction number i+1 of dimension d
    directions: Vec<[u32; BITS]>,
    state: Vec<u32>,
    point: Vec<f64>,
    index: u64,
}

impl SobolSequence {
    pub fn new(dimension: usize) -> Result<Self, SensitivityError> {
        if dimension == 0 || dimension > MAX_DIMENSIONS {
            return Err(SensitivityError::UnsupportedDimension {
                requested: dimension,
                max: MAX_DIMENSIONS,
            });
        }

        let directions = (0..dimension).map(direction_numbers).collect();
        Ok(Self {
            directions,
            state: vec![0; dimension],
            point: vec![0.0; dimension],
            index: 0,
        })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.directions.len()
    }

    /// Index of the point the next call to [`next_point`](Self::next_point) returns
    #[must_use]
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Return the current point and advance. The first point is the origin.
    pub fn next_point(&mut self) -> &[f64] {
        for (value, &bits) in self.point.iter_mut().zip(&self.state) {
            *value = f64::from(bits) / SCALE;
        }

        let c = self.index.trailing_ones() as usize;
        if c >= BITS {
            self.reset();
        } else {
            for (bits, directions) in self.state.iter_mut().zip(&self.directions) {
                *bits ^= directions[c];
            }
            self.index += 1;
        }

        &self.point
    }

    pub fn reset(&mut self) {
        self.state.fill(0);
        self.index = 0;
    }

    /// Jump ahead by `n` points, wrapping modulo [`PERIOD`]
    pub fn skip(&mut self, n: u64) {
        self.index = (self.index + n % PERIOD) % PERIOD;
        let gray = self.index ^ (self.index >> 1);
        for (bits, directions) in self.state.iter_mut().zip(&self.directions) {
            *bits = directions
                .iter()
                .enumerate()
                .filter(|(bit, _)| gray >> bit & 1 == 1)
                .fold(0, |acc, (_, &v)| acc ^ v);
        }
    }
}

fn direction_numbers(dimension: usize) -> [u32; BITS] {
    let mut v = [0u32; BITS];

    if dimension == 0 {
        for (i, slot) in v.iter_mut().enumerate() {
            *slot = 1 << (BITS - 1 - i);
        }
        return v;
    }

    let (s, a, m) = JOE_KUO[dimension - 1];
    let s = s as usize;
    for i in 0..s {
        v[i] = m[i] << (BITS - 1 - i);
    }
    for i in s..BITS {
        let mut value = v[i - s] ^ (v[i - s] >> s);
        for k in 1..s {
            value ^= ((a >> (s - 1 - k)) & 1) * v[i - k];
        }
        v[i] = value;
    }
    v
}
