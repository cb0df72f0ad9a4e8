use num_traits::{Float, One, Zero};

use crate::linalg::Decomposition;
use crate::matrix::DenseMatrix;
use crate::traits::LinalgScalar;

/// Cholesky factorization kernel: overwrite the lower triangle of the
/// `n x n` row-major buffer `t` with `L` such that `A = L * L^H`.
///
/// For real input this is the standard `A = L * L^T`. The upper triangle is
/// left untouched; callers that expose the factor zero it themselves.
/// Returns `false` as soon as a diagonal comes out non-positive or
/// non-finite, i.e. the matrix is not positive definite.
pub(crate) fn cholesky_lower<T: LinalgScalar>(t: &mut [T], n: usize) -> bool {
    let mut div_el_ii = T::zero();

    for i in 0..n {
        for j in i..n {
            let mut sum = t[j * n + i];

            let mut i_el = i * n;
            let mut j_el = j * n;
            let end = i_el + i;
            while i_el < end {
                sum -= t[j_el] * t[i_el].conj();
                i_el += 1;
                j_el += 1;
            }

            if i == j {
                let d = sum.real();
                if !(d > T::Real::zero() && d.is_finite()) {
                    return false;
                }
                let el_ii = d.lsqrt();
                t[i * n + i] = T::from_real(el_ii);
                div_el_ii = T::from_real(T::Real::one() / el_ii);
            } else {
                t[j * n + i] = sum * div_el_ii;
            }
        }
    }

    true
}

/// Cholesky decomposition of a (Hermitian) positive-definite matrix,
/// `A = L * L^H`.
///
/// The input is consumed: `decompose` swaps the caller's matrix into the
/// decomposition and factors it in place, so `input_modified` is `true`.
/// Copy first if the original is still needed.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
/// use numat::linalg::CholeskyDecomposition;
///
/// let mut a = DenseMatrix::from_rows(&[[4.0_f64, 2.0], [2.0, 3.0]]);
/// let mut chol = CholeskyDecomposition::new();
/// assert!(chol.decompose(&mut a));
/// assert!((chol.factor()[(0, 0)] - 2.0).abs() < 1e-12);
/// assert!((chol.determinant() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct CholeskyDecomposition<T: LinalgScalar> {
    t: DenseMatrix<T>,
}

impl<T: LinalgScalar> CholeskyDecomposition<T> {
    pub fn new() -> Self {
        Self {
            t: DenseMatrix::zeros(0, 0),
        }
    }

    /// Steal `a` and factor it in place. Returns `false` if the matrix is
    /// not positive definite; the stolen buffer then holds a partial factor.
    pub fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool {
        let n = a.num_rows();
        assert_eq!(
            n,
            a.num_cols(),
            "Cholesky decomposition requires a square matrix"
        );
        if n == 0 {
            return false;
        }
        core::mem::swap(&mut self.t, a);

        let data = self.t.data_mut();
        if !cholesky_lower(data, n) {
            return false;
        }
        for i in 0..n {
            for j in i + 1..n {
                data[i * n + j] = T::zero();
            }
        }
        true
    }

    /// The lower triangular factor `L`, zeros above the diagonal.
    pub fn factor(&self) -> &DenseMatrix<T> {
        &self.t
    }

    /// Determinant of the decomposed matrix, `(prod L[i][i])^2`. Always real
    /// and positive for a successful decomposition.
    pub fn determinant(&self) -> T {
        let n = self.t.num_rows();
        let data = self.t.data();
        let mut prod = T::Real::one();
        for i in 0..n {
            prod = prod * data[i * n + i].real();
        }
        T::from_real(prod * prod)
    }
}

impl<T: LinalgScalar> Default for CholeskyDecomposition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LinalgScalar> Decomposition<T> for CholeskyDecomposition<T> {
    fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool {
        CholeskyDecomposition::decompose(self, a)
    }

    fn input_modified(&self) -> bool {
        true
    }
}
