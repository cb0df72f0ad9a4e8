//! Solve, invert and factor methods on [`DenseMatrix`].
//!
//! Thin wrappers over the decomposition and solver layers that own their
//! copies, so `self` is never modified and no solver state leaks out. Code
//! that solves repeatedly against one coefficient matrix should hold a
//! [`LinearSolver`](crate::solver::LinearSolver) instead and pay the
//! decomposition once.

use num_traits::{One, Zero};

use crate::kernels::{unrolled_determinant, unrolled_inverse};
use crate::linalg::{
    CholeskyDecomposition, LinalgError, LuDecomposition, QrDecomposition, SvdDecomposition,
};
use crate::matrix::DenseMatrix;
use crate::params::UNROLLED_MAX;
use crate::solver::{self, LinearSolver, LinearSolverLu};
use crate::traits::{LinalgScalar, RealScalar};

impl<T: LinalgScalar> DenseMatrix<T> {
    /// Solve `A * x = b`, least squares when `A` has more rows than columns.
    ///
    /// Dispatches through [`solver::general`]: LU with partial pivoting for
    /// square systems, Householder QR otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use numat::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_rows(&[
    ///     [1.0_f64, 2.0, 4.0],
    ///     [2.0, 13.0, 23.0],
    ///     [4.0, 23.0, 90.0],
    /// ]);
    /// let b = DenseMatrix::from_row_slice(3, 1, &[17.0, 97.0, 320.0]);
    /// let x = a.solve(&b).unwrap();
    ///
    /// assert!((x[(0, 0)] - 1.0).abs() < 1e-8);
    /// assert!((x[(1, 0)] - 2.0).abs() < 1e-8);
    /// assert!((x[(2, 0)] - 3.0).abs() < 1e-8);
    /// ```
    pub fn solve(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>, LinalgError>
    where
        T: 'static,
    {
        let mut solver = solver::general(self.num_rows(), self.num_cols());
        let mut a = self.clone();
        if !solver.set_a(&mut a) {
            return Err(LinalgError::Singular);
        }
        let mut rhs = b.clone();
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut rhs, &mut x);
        Ok(x)
    }

    /// Matrix inverse.
    ///
    /// Sizes up to [`UNROLLED_MAX`] go through the closed-form cofactor
    /// kernels, everything larger through the LU solver. Panics when the
    /// matrix is not square.
    ///
    /// # Examples
    ///
    /// ```
    /// use numat::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_rows(&[[4.0_f64, 7.0], [2.0, 6.0]]);
    /// let inv = a.inverse().unwrap();
    /// assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
    /// assert!((inv[(0, 1)] + 0.7).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<DenseMatrix<T>, LinalgError> {
        assert!(
            self.is_square(),
            "inverse requires a square matrix, got {}x{}",
            self.num_rows(),
            self.num_cols(),
        );
        let n = self.num_rows();
        if n == 0 {
            return Ok(DenseMatrix::zeros(0, 0));
        }

        let mut inv = DenseMatrix::zeros(0, 0);
        if n <= UNROLLED_MAX {
            if !unrolled_inverse(self, &mut inv) {
                return Err(LinalgError::Singular);
            }
        } else {
            let mut solver = LinearSolverLu::new();
            let mut a = self.clone();
            if !solver.set_a(&mut a) {
                return Err(LinalgError::Singular);
            }
            solver.invert(&mut inv);
        }
        Ok(inv)
    }

    /// Determinant.
    ///
    /// Unrolled cofactor expansion up to [`UNROLLED_MAX`], LU above; a
    /// singular matrix simply gives zero. The empty matrix has determinant
    /// one. Panics when the matrix is not square.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[3.0_f64, 8.0], [4.0, 6.0]]);
    /// assert!((a.det() + 14.0).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> T {
        assert!(
            self.is_square(),
            "determinant requires a square matrix, got {}x{}",
            self.num_rows(),
            self.num_cols(),
        );
        let n = self.num_rows();
        if n == 0 {
            return T::one();
        }
        if n <= UNROLLED_MAX {
            return unrolled_determinant(self);
        }
        let mut lu = LuDecomposition::new();
        if !lu.decompose(self) {
            return T::zero();
        }
        lu.determinant()
    }

    /// LU decomposition with partial pivoting. Fails when the matrix is
    /// empty or singular to working precision.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        let mut decomp = LuDecomposition::new();
        if !decomp.decompose(self) || decomp.is_singular() {
            return Err(LinalgError::Singular);
        }
        Ok(decomp)
    }

    /// Cholesky decomposition `A = L * L^H`. Fails unless the matrix is
    /// positive definite; panics when it is not square.
    pub fn cholesky(&self) -> Result<CholeskyDecomposition<T>, LinalgError> {
        let mut decomp = CholeskyDecomposition::new();
        let mut work = self.clone();
        if !decomp.decompose(&mut work) {
            return Err(LinalgError::NotPositiveDefinite);
        }
        Ok(decomp)
    }

    /// Householder QR decomposition. Fails when the matrix is empty or rank
    /// deficient; panics when there are fewer rows than columns.
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        let mut decomp = QrDecomposition::new();
        if !decomp.decompose(self) {
            return Err(LinalgError::Singular);
        }
        Ok(decomp)
    }
}

impl<T: RealScalar> DenseMatrix<T> {
    /// Singular value decomposition with both sets of singular vectors.
    /// Fails when the iteration does not converge.
    pub fn svd(&self) -> Result<SvdDecomposition<T>, LinalgError> {
        let mut decomp = SvdDecomposition::new(true, true);
        decomp.decompose(self)?;
        Ok(decomp)
    }

    /// Moore-Penrose pseudo inverse via the SVD, any shape.
    ///
    /// Singular values below `max(m, n) * sigma_max * eps` are treated as
    /// zero, so rank-deficient and rectangular matrices are fine.
    ///
    /// # Examples
    ///
    /// ```
    /// use numat::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [0.0, 1.0], [0.0, 0.0]]);
    /// let pinv = a.pseudo_inverse().unwrap();
    /// assert_eq!(pinv.num_rows(), 2);
    /// assert_eq!(pinv.num_cols(), 3);
    /// assert!((pinv[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(pinv[(0, 2)].abs() < 1e-12);
    /// ```
    pub fn pseudo_inverse(&self) -> Result<DenseMatrix<T>, LinalgError> {
        let m = self.num_rows();
        let n = self.num_cols();

        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(self)?;

        let w = svd.singular_values();
        let max_sv = w.first().copied().unwrap_or_else(T::zero);
        let tol = T::from(m.max(n)).unwrap() * max_sv * T::epsilon();
        let inv_w: Vec<T> = w
            .iter()
            .map(|&s| if s > tol { T::one() / s } else { T::zero() })
            .collect();

        // pinv = V * diag(1/sigma) * U^T, written out directly.
        let u = svd.u();
        let vt = svd.vt();
        let mut pinv = DenseMatrix::zeros(n, m);
        for j in 0..n {
            for i in 0..m {
                let mut sum = T::zero();
                for (k, &iw) in inv_w.iter().enumerate() {
                    sum = sum + vt.get(k, j) * iw * u.get(i, k);
                }
                pinv[(j, i)] = sum;
            }
        }
        Ok(pinv)
    }
}
