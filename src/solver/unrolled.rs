use crate::kernels::{unrolled_determinant, unrolled_inverse};
use crate::matrix::DenseMatrix;
use crate::params::UNROLLED_MAX;
use crate::solver::LinearSolver;
use crate::traits::LinalgScalar;

/// Inversion-only solver for matrices up to [`UNROLLED_MAX`] on a side.
///
/// Wraps the unrolled cofactor-expansion kernels so the tiny-matrix fast
/// path can be picked through the [`LinearSolver`] contract. Only
/// [`invert`](LinearSolver::invert) is implemented; `solve` and `quality`
/// panic.
#[derive(Debug, Default)]
pub struct UnrolledSolver<T: LinalgScalar> {
    a: DenseMatrix<T>,
}

impl<T: LinalgScalar> UnrolledSolver<T> {
    pub fn new() -> Self {
        Self {
            a: DenseMatrix::zeros(0, 0),
        }
    }
}

impl<T: LinalgScalar> LinearSolver<T> for UnrolledSolver<T> {
    /// Returns `false` for a non-square matrix, a size outside
    /// `1..=UNROLLED_MAX`, or a determinant magnitude below machine epsilon.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        let n = a.num_rows();
        if !a.is_square() || n == 0 || n > UNROLLED_MAX {
            return false;
        }
        self.a.copy_from(a);
        unrolled_determinant(&self.a).mag() >= T::lepsilon()
    }

    fn solve(&mut self, _b: &mut DenseMatrix<T>, _x: &mut DenseMatrix<T>) {
        panic!("solve is not supported by the unrolled solver");
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        // set_a rejected singular input, so the kernel cannot fail here.
        let _ = unrolled_inverse(&self.a, inv);
    }

    fn quality(&self) -> T::Real {
        panic!("quality is not supported by the unrolled solver");
    }

    fn modifies_a(&self) -> bool {
        false
    }

    fn modifies_b(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{diff_norm_f, mult};

    #[test]
    fn inverts_within_size_limit() {
        let a = DenseMatrix::from_rows(&[
            [6.0, 1.0, 1.0],
            [4.0, -2.0, 5.0],
            [2.0, 8.0, 7.0],
        ]);
        let mut work = a.clone();
        let mut solver = UnrolledSolver::new();
        assert!(solver.set_a(&mut work));
        assert_eq!(work, a);

        let mut inv = DenseMatrix::zeros(0, 0);
        solver.invert(&mut inv);

        let mut prod = DenseMatrix::zeros(0, 0);
        mult(&a, &inv, &mut prod);
        assert!(diff_norm_f(&prod, &DenseMatrix::identity(3)) < 1e-10);
    }

    #[test]
    fn size_one_is_reciprocal() {
        let mut a = DenseMatrix::from_rows(&[[8.0_f64]]);
        let mut solver = UnrolledSolver::new();
        assert!(solver.set_a(&mut a));
        let mut inv = DenseMatrix::zeros(0, 0);
        solver.invert(&mut inv);
        assert_eq!(inv[(0, 0)], 0.125);
    }

    #[test]
    fn rejects_out_of_scope_input() {
        let mut solver = UnrolledSolver::new();
        assert!(!solver.set_a(&mut DenseMatrix::<f64>::zeros(3, 2)));
        assert!(!solver.set_a(&mut DenseMatrix::<f64>::identity(5)));
        assert!(!solver.set_a(&mut DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]])));
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn solve_is_unsupported() {
        let mut solver = UnrolledSolver::new();
        assert!(solver.set_a(&mut DenseMatrix::<f64>::identity(2)));
        let mut b = DenseMatrix::<f64>::zeros(2, 1);
        let mut x = DenseMatrix::<f64>::zeros(2, 1);
        solver.solve(&mut b, &mut x);
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn quality_is_unsupported() {
        let solver = UnrolledSolver::<f64>::new();
        let _ = solver.quality();
    }
}
