//! Box-constrained linear least squares.
//!
//! Minimises `||Ax - b||^2` subject to `lower <= x_j <= upper` by cyclic
//! projected coordinate descent. The objective is convex and the
//! constraints are separable, so the iteration converges to a minimiser.
//! `A` is given column-wise and sparse: calibration matrices have one
//! column per edge and a non-zero entry only for the trips using that edge.

use log::debug;

use crate::Error;

/// Sparse column: `(row, value)` pairs
pub type SparseColumn = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedLeastSquares {
    pub lower: f64,
    pub upper: f64,
    /// Maximum number of full sweeps over the columns
    pub max_sweeps: usize,
    /// Largest coordinate change in a sweep below which the solve stops
    pub step_tolerance: f64,
}

impl BoundedLeastSquares {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            max_sweeps: 10_000,
            step_tolerance: 1e-9,
        }
    }

    /// Solve for `x` given the columns of `A` and the target `b`.
    ///
    /// Columns without non-zero entries do not influence the residual and
    /// stay at the lower bound.
    ///
    /// # Errors
    ///
    /// [`Error::LeastSquares`] for invalid bounds, row indices outside `b`,
    /// non-finite input or a non-finite solution.
    pub fn solve(&self, columns: &[SparseColumn], b: &[f64]) -> Result<Vec<f64>, Error> {
        self.validate(columns, b)?;

        let mut x = vec![self.lower; columns.len()];
        let mut residual = b.to_vec();
        for (column, &x_j) in columns.iter().zip(&x) {
            for &(row, value) in column {
                residual[row] -= value * x_j;
            }
        }

        let norms: Vec<f64> = columns
            .iter()
            .map(|column| column.iter().map(|(_, value)| value * value).sum())
            .collect();

        let mut sweeps = 0;
        while sweeps < self.max_sweeps {
            sweeps += 1;
            let mut largest_step: f64 = 0.0;

            for (j, column) in columns.iter().enumerate() {
                if norms[j] == 0.0 {
                    continue;
                }
                let gradient: f64 = column
                    .iter()
                    .map(|&(row, value)| value * residual[row])
                    .sum();
                let updated = (x[j] + gradient / norms[j]).clamp(self.lower, self.upper);
                let step = updated - x[j];
                if step != 0.0 {
                    for &(row, value) in column {
                        residual[row] -= value * step;
                    }
                    x[j] = updated;
                }
                largest_step = largest_step.max(step.abs());
            }

            if largest_step < self.step_tolerance {
                break;
            }
        }
        debug!(
            "Bounded least squares: {} columns, {} rows, {sweeps} sweeps",
            columns.len(),
            b.len()
        );

        if x.iter().any(|value| !value.is_finite()) {
            return Err(Error::LeastSquares(
                "solution contains non-finite values".to_string(),
            ));
        }
        Ok(x)
    }

    fn validate(&self, columns: &[SparseColumn], b: &[f64]) -> Result<(), Error> {
        if !(self.lower.is_finite() && self.upper.is_finite()) || self.lower > self.upper {
            return Err(Error::LeastSquares(format!(
                "invalid bounds [{}, {}]",
                self.lower, self.upper
            )));
        }
        if b.iter().any(|value| !value.is_finite()) {
            return Err(Error::LeastSquares("target is not finite".to_string()));
        }
        for column in columns {
            for &(row, value) in column {
                if row >= b.len() {
                    return Err(Error::LeastSquares(format!(
                        "row {row} outside of {} rows",
                        b.len()
                    )));
                }
                if !value.is_finite() {
                    return Err(Error::LeastSquares("matrix is not finite".to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn interior_solution_is_exact() {
        // rows: 10 x0 = 20, 10 x1 = 30
        let columns = vec![vec![(0, 10.0)], vec![(1, 10.0)]];
        let x = BoundedLeastSquares::new(1.0, 5.0)
            .solve(&columns, &[20.0, 30.0])
            .unwrap();
        assert_close(&x, &[2.0, 3.0]);
    }

    #[test]
    fn solution_is_clamped_to_bounds() {
        // unconstrained optimum would be x0 = 0.5 and x1 = 10
        let columns = vec![vec![(0, 10.0)], vec![(1, 10.0)]];
        let x = BoundedLeastSquares::new(1.0, 5.0)
            .solve(&columns, &[5.0, 100.0])
            .unwrap();
        assert_close(&x, &[1.0, 5.0]);
    }

    #[test]
    fn shared_column_fits_both_rows() {
        // x0 is shared by both rows, x1 only by the second
        // 10 x0 = 20, 10 x0 + 10 x1 = 50 -> x0 = 2, x1 = 3
        let columns = vec![vec![(0, 10.0), (1, 10.0)], vec![(1, 10.0)]];
        let x = BoundedLeastSquares::new(1.0, 5.0)
            .solve(&columns, &[20.0, 50.0])
            .unwrap();
        assert_close(&x, &[2.0, 3.0]);
    }

    #[test]
    fn empty_columns_stay_at_lower_bound() {
        let columns = vec![vec![], vec![(0, 4.0)]];
        let x = BoundedLeastSquares::new(1.0, 5.0)
            .solve(&columns, &[8.0])
            .unwrap();
        assert_close(&x, &[1.0, 2.0]);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let solver = BoundedLeastSquares::new(1.0, 5.0);
        assert!(solver.solve(&[vec![(3, 1.0)]], &[1.0]).is_err());
        assert!(solver.solve(&[vec![(0, f64::NAN)]], &[1.0]).is_err());
        assert!(
            BoundedLeastSquares::new(5.0, 1.0)
                .solve(&[vec![(0, 1.0)]], &[1.0])
                .is_err()
        );
    }
}
