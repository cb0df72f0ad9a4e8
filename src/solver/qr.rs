use crate::linalg::{quality_triangular, QrDecomposition};
use crate::matrix::DenseMatrix;
use crate::solver::LinearSolver;
use crate::traits::LinalgScalar;

/// Least-squares solver for overdetermined systems backed by
/// [`QrDecomposition`].
///
/// Solves `min ||A * x - b||` for `A` with at least as many rows as columns.
/// `solve` applies `Q^H` to the right-hand side in place and back-substitutes
/// through `R`, so `modifies_b` is `true`; the coefficient matrix itself is
/// copied by the decomposition and left intact.
#[derive(Debug, Default)]
pub struct LinearSolverQr<T: LinalgScalar> {
    decomp: QrDecomposition<T>,
    num_rows: usize,
    num_cols: usize,
}

impl<T: LinalgScalar> LinearSolverQr<T> {
    pub fn new() -> Self {
        Self {
            decomp: QrDecomposition::new(),
            num_rows: 0,
            num_cols: 0,
        }
    }

    /// The decomposition backing this solver.
    pub fn decomposition(&self) -> &QrDecomposition<T> {
        &self.decomp
    }
}

impl<T: LinalgScalar> LinearSolver<T> for LinearSolverQr<T> {
    /// Returns `false` for an empty matrix or when a column has no
    /// remaining component below the diagonal, i.e. `A` is rank deficient.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        self.num_rows = a.num_rows();
        self.num_cols = a.num_cols();
        self.decomp.decompose(a)
    }

    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>) {
        let m = self.num_rows;
        let n = self.num_cols;
        assert_eq!(
            b.num_rows(),
            m,
            "right-hand side rows {} do not match system rows {}",
            b.num_rows(),
            m,
        );
        let cols = b.num_cols();
        x.reshape(n, cols, false);

        // b <- Q^H * b, then the top n rows back-substitute through R read
        // straight out of the packed factorization.
        self.decomp.apply_conj_tran_q(b);
        let qr = self.decomp.qr_matrix();
        for j in 0..cols {
            for i in (0..n).rev() {
                let mut sum = b.get(i, j);
                for k in i + 1..n {
                    sum -= qr.get(i, k) * x.get(k, j);
                }
                x.set(i, j, sum / qr.get(i, i));
            }
        }
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        assert_eq!(
            self.num_rows, self.num_cols,
            "inverse requires a square matrix, got {}x{}",
            self.num_rows, self.num_cols,
        );
        let mut ident = DenseMatrix::identity(self.num_cols);
        self.solve(&mut ident, inv);
    }

    fn quality(&self) -> T::Real {
        quality_triangular(self.decomp.qr_matrix())
    }

    fn modifies_a(&self) -> bool {
        false
    }

    fn modifies_b(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{diff_norm_f, mult};
    use num_complex::Complex;

    #[test]
    fn exact_solution_of_consistent_system() {
        let mut a = DenseMatrix::from_rows(&[
            [1.0, 1.0],
            [1.0, 2.0],
            [1.0, 3.0],
            [1.0, 4.0],
        ]);
        let x_true = DenseMatrix::from_row_slice(2, 1, &[0.5, -2.0]);
        let mut b = DenseMatrix::zeros(0, 0);
        mult(&a, &x_true, &mut b);

        let mut solver = LinearSolverQr::new();
        assert!(solver.set_a(&mut a));
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);
        assert!(diff_norm_f(&x, &x_true) < 1e-12);
    }

    #[test]
    fn least_squares_line_fit() {
        // Fit y = c0 + c1 * t to points off the line; the residual is spread
        // evenly so the normal equations have a known answer.
        let mut a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [1.0, 1.0], [1.0, 2.0]]);
        let mut b = DenseMatrix::from_row_slice(3, 1, &[1.0, 2.0, 2.0]);

        let mut solver = LinearSolverQr::new();
        assert!(solver.set_a(&mut a));
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);

        // Normal equations: c0 = 7/6, c1 = 1/2.
        assert!((x[(0, 0)] - 7.0 / 6.0).abs() < 1e-12);
        assert!((x[(1, 0)] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn solve_overwrites_b() {
        let mut a = DenseMatrix::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let mut b = DenseMatrix::from_row_slice(3, 1, &[1.0, 2.0, 3.0]);
        let b_copy = b.clone();

        let mut solver = LinearSolverQr::new();
        assert!(solver.set_a(&mut a));
        assert!(solver.modifies_b());
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);
        assert_ne!(b, b_copy);
    }

    #[test]
    fn invert_square_via_solve() {
        let a = DenseMatrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]);
        let mut work = a.clone();
        let mut solver = LinearSolverQr::new();
        assert!(solver.set_a(&mut work));

        let mut inv = DenseMatrix::zeros(0, 0);
        solver.invert(&mut inv);

        let mut prod = DenseMatrix::zeros(0, 0);
        mult(&a, &inv, &mut prod);
        assert!(diff_norm_f(&prod, &DenseMatrix::identity(2)) < 1e-12);
    }

    #[test]
    fn rank_deficient_set_a_fails() {
        let mut a = DenseMatrix::from_rows(&[[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]);
        let mut solver = LinearSolverQr::new();
        assert!(!solver.set_a(&mut a));
    }

    #[test]
    fn complex_least_squares() {
        type C = Complex<f64>;
        let c = |re: f64, im: f64| C::new(re, im);

        let mut a = DenseMatrix::from_rows(&[
            [c(1.0, 0.0), c(0.0, 1.0)],
            [c(0.0, -1.0), c(2.0, 0.0)],
            [c(1.0, 1.0), c(0.5, 0.0)],
        ]);
        let x_true = DenseMatrix::from_row_slice(2, 1, &[c(1.0, -2.0), c(0.5, 0.5)]);
        let mut b = DenseMatrix::zeros(0, 0);
        mult(&a, &x_true, &mut b);

        let mut solver = LinearSolverQr::new();
        assert!(solver.set_a(&mut a));
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);

        for i in 0..2 {
            assert!(
                (x[(i, 0)] - x_true[(i, 0)]).norm() < 1e-12,
                "x[{i}] = {}",
                x[(i, 0)]
            );
        }
    }
}
