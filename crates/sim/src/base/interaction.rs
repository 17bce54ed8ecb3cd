//! Cross-strain interaction matrices.
//!
//! Coinfection couples strains: a host already infected with one strain can be
//! more susceptible (facilitation) or less susceptible (competition) to
//! another. The `InteractionMatrix` captures this as a per-ordered-pair
//! multiplier on the target strain's transmission pressure. An asymmetric
//! matrix expresses priority effects, where which strain colonizes first
//! matters.

pub use crate::errors::MatrixError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Pairwise multipliers applied to transmission pressure in coinfected hosts.
///
/// Entry `(k, j)` scales strain `k`'s transmission pressure for a host that is
/// currently infected with strain `j`. The diagonal is fixed at 1.0 (a strain
/// does not modify itself). Stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl InteractionMatrix {
    /// Create a neutral matrix: every multiplier is 1.0, so no strain
    /// modifies any other.
    pub fn neutral(dim: usize) -> Self {
        Self {
            dim,
            values: vec![1.0; dim * dim],
        }
    }

    /// Build a matrix from explicit rows, validating shape and diagonal.
    ///
    /// # Errors
    /// Returns an error if the rows are not square, any entry is not finite,
    /// or any diagonal entry differs from 1.0.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let dim = rows.len();
        if dim == 0 {
            return Err(MatrixError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(MatrixError::NotSquare {
                    rows: dim,
                    row: i,
                    len: row.len(),
                });
            }
        }

        let mut values = Vec::with_capacity(dim * dim);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(MatrixError::NonFiniteEntry { row: i, col: j });
                }
                if i == j && v != 1.0 {
                    return Err(MatrixError::NonUnitDiagonal { index: i, value: v });
                }
                values.push(v);
            }
        }

        Ok(Self { dim, values })
    }

    /// Draw a random matrix according to `spec`, consuming `rng`.
    pub fn generate<R: Rng + ?Sized>(spec: &InteractionSpec, rng: &mut R) -> Result<Self, MatrixError> {
        spec.validate()?;

        let dim = spec.strains;
        let mut matrix = Self::neutral(dim);

        if spec.strength == 0.0 {
            return Ok(matrix);
        }

        if spec.asymmetric {
            for k in 0..dim {
                for j in 0..dim {
                    if k != j {
                        matrix.values[k * dim + j] = spec.draw_entry(rng);
                    }
                }
            }
        } else {
            // Draw the upper triangle and mirror it.
            for k in 0..dim {
                for j in (k + 1)..dim {
                    let v = spec.draw_entry(rng);
                    matrix.values[k * dim + j] = v;
                    matrix.values[j * dim + k] = v;
                }
            }
        }

        Ok(matrix)
    }

    /// Matrix dimension (equals the strain count it was built for).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Multiplier on strain `target`'s pressure given infection with `source`.
    #[inline]
    pub fn get(&self, target: usize, source: usize) -> f64 {
        self.values[target * self.dim + source]
    }
}

/// Recipe for randomly generating an [`InteractionMatrix`].
///
/// Off-diagonal entries are drawn from a range centered on 1.0 with half-width
/// `strength`. A `facilitation_ratio` fraction of entries (in expectation)
/// comes from the facilitating sub-range above 1.0; the rest from the
/// competitive sub-range below 1.0. Symmetric unless `asymmetric` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSpec {
    /// Number of strains (matrix dimension)
    pub strains: usize,
    /// Whether entry (k, j) may differ from entry (j, k)
    pub asymmetric: bool,
    /// Half-width of the sampling range around 1.0, in [0, 1]
    pub strength: f64,
    /// Fraction of off-diagonal entries drawn above 1.0, in [0, 1]
    pub facilitation_ratio: f64,
}

impl InteractionSpec {
    fn validate(&self) -> Result<(), MatrixError> {
        if self.strains == 0 {
            return Err(MatrixError::Empty);
        }
        if !(0.0..=1.0).contains(&self.strength) || !self.strength.is_finite() {
            return Err(MatrixError::InvalidSpec("strength", self.strength));
        }
        if !(0.0..=1.0).contains(&self.facilitation_ratio) || !self.facilitation_ratio.is_finite() {
            return Err(MatrixError::InvalidSpec(
                "facilitation_ratio",
                self.facilitation_ratio,
            ));
        }
        Ok(())
    }

    fn draw_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if rng.random::<f64>() < self.facilitation_ratio {
            rng.random_range(1.0..1.0 + self.strength)
        } else {
            rng.random_range(1.0 - self.strength..1.0)
        }
    }
}
