pub(crate) mod adapter;
pub(crate) mod cholesky;
pub(crate) mod cholesky_block;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod svd;
pub(crate) mod triangular;

pub use adapter::BlockDecompositionAdapter;
pub use cholesky::CholeskyDecomposition;
pub use cholesky_block::BlockCholeskyOuter;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
pub use svd::SvdDecomposition;

use num_traits::{One, Zero};

use crate::block::BlockMatrix;
use crate::matrix::DenseMatrix;
use crate::traits::LinalgScalar;

/// Errors from linear algebra operations.
///
/// Returned by the convenience methods on [`DenseMatrix`]
/// (`solve`, `inverse`, `cholesky`, `svd`).
///
/// ```
/// use numat::DenseMatrix;
/// use numat::linalg::LinalgError;
///
/// let singular = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
///
/// let not_pd = DenseMatrix::from_rows(&[[1.0_f64, 5.0], [5.0, 1.0]]);
/// assert_eq!(not_pd.cholesky().unwrap_err(), LinalgError::NotPositiveDefinite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    #[error("matrix is singular")]
    Singular,
    /// Matrix is not positive definite (required for Cholesky).
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,
    /// Iterative algorithm did not converge within the iteration budget.
    #[error("iterative algorithm did not converge")]
    ConvergenceFailure,
}

/// A matrix decomposition over row-major storage.
///
/// `decompose` returns `false` when the matrix cannot be processed (for
/// Cholesky, not positive definite). Whether the input is consumed as
/// workspace is reported by `input_modified`; callers that need the original
/// afterwards must copy first when it returns `true`.
pub trait Decomposition<T: LinalgScalar> {
    fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool;

    /// True if `decompose` overwrites its input.
    fn input_modified(&self) -> bool;
}

/// A matrix decomposition over block-major storage.
///
/// Same contract as [`Decomposition`], operating on a [`BlockMatrix`] view.
/// [`BlockDecompositionAdapter`] bridges the two.
pub trait BlockDecomposition<T: LinalgScalar> {
    fn decompose(&mut self, a: &mut BlockMatrix<'_, T>) -> bool;

    /// True if `decompose` overwrites its input.
    fn input_modified(&self) -> bool;
}

/// Quality of a triangular factor: the product of diagonal magnitudes, each
/// scaled by the largest. Near 1 for well conditioned factors, near 0 for
/// nearly singular ones, exactly 0 when the whole diagonal is zero. Scaling
/// keeps the product from overflowing on large well conditioned matrices.
pub fn quality_triangular<T: LinalgScalar>(t: &DenseMatrix<T>) -> T::Real {
    let n = t.num_rows().min(t.num_cols());
    let mut max = T::Real::zero();
    for i in 0..n {
        let m = t.get(i, i).mag();
        if m > max {
            max = m;
        }
    }
    if max == T::Real::zero() {
        return T::Real::zero();
    }
    let mut quality = T::Real::one();
    for i in 0..n {
        quality = quality * (t.get(i, i).mag() / max);
    }
    quality
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_of_identity_is_one() {
        let eye = DenseMatrix::<f64>::identity(5);
        assert_eq!(quality_triangular(&eye), 1.0);
    }

    #[test]
    fn quality_of_zero_diagonal_is_zero() {
        let z = DenseMatrix::<f64>::zeros(3, 3);
        assert_eq!(quality_triangular(&z), 0.0);
    }

    #[test]
    fn quality_scales_with_conditioning() {
        let good = DenseMatrix::<f64>::diag(&[2.0, 2.0, 2.0]);
        let bad = DenseMatrix::<f64>::diag(&[2.0, 2.0, 1e-12]);
        assert_eq!(quality_triangular(&good), 1.0);
        assert!(quality_triangular(&bad) < 1e-11);
    }

    #[test]
    fn error_messages() {
        assert_eq!(LinalgError::Singular.to_string(), "matrix is singular");
        assert_eq!(
            LinalgError::NotPositiveDefinite.to_string(),
            "matrix is not positive definite"
        );
    }
}
