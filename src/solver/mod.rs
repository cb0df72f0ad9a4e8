//! Linear system solvers behind a common contract.
//!
//! A [`LinearSolver`] is configured once with [`set_a`](LinearSolver::set_a)
//! and then reused for any number of [`solve`](LinearSolver::solve) and
//! [`invert`](LinearSolver::invert) calls against the same coefficient
//! matrix, amortizing the decomposition. The factory functions pick a
//! concrete implementation from the matrix shape so callers do not commit to
//! one algorithm at the call site.

pub(crate) mod cholesky;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod safe;
pub(crate) mod unrolled;

pub use cholesky::{LinearSolverChol, LinearSolverCholBlock};
pub use lu::LinearSolverLu;
pub use qr::LinearSolverQr;
pub use safe::SafeLinearSolver;
pub use unrolled::UnrolledSolver;

use crate::matrix::DenseMatrix;
use crate::params::SWITCH_BLOCK_CHOLESKY;
use crate::traits::LinalgScalar;

/// Contract for solving `A * X = B` with a reusable decomposition.
///
/// Some implementations claim their inputs as workspace instead of copying:
/// [`modifies_a`](Self::modifies_a) and [`modifies_b`](Self::modifies_b)
/// report whether the matrices passed to `set_a` and `solve` come back
/// altered. Wrap a solver in [`SafeLinearSolver`] to keep both intact at the
/// cost of a copy.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
/// use numat::solver::{self, LinearSolver};
///
/// let mut a = DenseMatrix::from_rows(&[
///     [1.0_f64, 2.0, 4.0],
///     [2.0, 13.0, 23.0],
///     [4.0, 23.0, 90.0],
/// ]);
/// let mut b = DenseMatrix::from_row_slice(3, 1, &[17.0, 97.0, 320.0]);
/// let mut x = DenseMatrix::zeros(0, 0);
///
/// let mut solver = solver::general(3, 3);
/// assert!(solver.set_a(&mut a));
/// solver.solve(&mut b, &mut x);
///
/// assert!((x[(0, 0)] - 1.0).abs() < 1e-8);
/// assert!((x[(1, 0)] - 2.0).abs() < 1e-8);
/// assert!((x[(2, 0)] - 3.0).abs() < 1e-8);
/// ```
pub trait LinearSolver<T: LinalgScalar> {
    /// Decompose the coefficient matrix. Returns `false` when the matrix
    /// cannot be solved against (singular to working precision, not positive
    /// definite for the Cholesky solvers); the solver must not be used
    /// further until a later `set_a` succeeds.
    ///
    /// The matrix is claimed as workspace when [`modifies_a`](Self::modifies_a)
    /// is `true`.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool;

    /// Solve `A * X = B` for every column of `B`. `x` is reshaped to the
    /// solution dimensions; `b` is overwritten when
    /// [`modifies_b`](Self::modifies_b) is `true`.
    ///
    /// Panics if `b`'s row count does not match the decomposed matrix.
    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>);

    /// Write the inverse of the decomposed matrix into `inv`, reshaping it.
    fn invert(&mut self, inv: &mut DenseMatrix<T>);

    /// Conditioning estimate of the decomposed matrix in `[0, 1]`: near 1 for
    /// well conditioned input, near 0 close to singular. Cheap to compute and
    /// scale invariant, meant for sanity checks rather than as a condition
    /// number.
    fn quality(&self) -> T::Real;

    /// True if `set_a` overwrites its argument.
    fn modifies_a(&self) -> bool;

    /// True if `solve` overwrites `b`.
    fn modifies_b(&self) -> bool;
}

impl<T: LinalgScalar, S: LinearSolver<T> + ?Sized> LinearSolver<T> for Box<S> {
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        (**self).set_a(a)
    }

    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>) {
        (**self).solve(b, x)
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        (**self).invert(inv)
    }

    fn quality(&self) -> T::Real {
        (**self).quality()
    }

    fn modifies_a(&self) -> bool {
        (**self).modifies_a()
    }

    fn modifies_b(&self) -> bool {
        (**self).modifies_b()
    }
}

// ── Factories ───────────────────────────────────────────────────────

/// Solver for square systems: LU with partial pivoting.
pub fn linear<T: LinalgScalar + 'static>(_matrix_size: usize) -> Box<dyn LinearSolver<T>> {
    Box::new(LinearSolverLu::new())
}

/// Solver for (Hermitian) positive-definite systems. Uses the inner-product
/// Cholesky up to [`SWITCH_BLOCK_CHOLESKY`], the cache-friendly block-layout
/// Cholesky beyond it.
pub fn symmetric<T: LinalgScalar + 'static>(matrix_width: usize) -> Box<dyn LinearSolver<T>> {
    if matrix_width < SWITCH_BLOCK_CHOLESKY {
        Box::new(LinearSolverChol::new())
    } else {
        Box::new(LinearSolverCholBlock::new())
    }
}

/// Least-squares solver for overdetermined systems: Householder QR.
pub fn least_squares<T: LinalgScalar + 'static>(
    _num_rows: usize,
    _num_cols: usize,
) -> Box<dyn LinearSolver<T>> {
    Box::new(LinearSolverQr::new())
}

/// Solver for a system of the given shape: LU when square, QR least squares
/// otherwise.
pub fn general<T: LinalgScalar + 'static>(
    num_rows: usize,
    num_cols: usize,
) -> Box<dyn LinearSolver<T>> {
    if num_rows == num_cols {
        linear(num_rows)
    } else {
        least_squares(num_rows, num_cols)
    }
}
