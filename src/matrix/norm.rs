use num_traits::Zero;

use crate::traits::LinalgScalar;

use super::DenseMatrix;

impl<T: LinalgScalar> DenseMatrix<T> {
    /// Largest element magnitude.
    pub fn element_max_abs(&self) -> T::Real {
        let mut max = <T::Real as Zero>::zero();
        for &x in &self.data {
            let m = x.mag();
            if m > max {
                max = m;
            }
        }
        max
    }

    /// Frobenius norm, scaled by the largest magnitude so intermediate
    /// squares cannot overflow.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]);
    /// assert!((m.norm_f() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn norm_f(&self) -> T::Real {
        let scale = self.element_max_abs();
        if scale == <T::Real as Zero>::zero() {
            return scale;
        }
        let mut total = <T::Real as Zero>::zero();
        for &x in &self.data {
            let val = x.mag() / scale;
            total = total + val * val;
        }
        scale * total.lsqrt()
    }
}

/// Frobenius norm of `a - b`. Shapes must match.
pub fn diff_norm_f<T: LinalgScalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> T::Real {
    assert_eq!(
        (a.num_rows, a.num_cols),
        (b.num_rows, b.num_cols),
        "dimension mismatch: {}x{} vs {}x{}",
        a.num_rows, a.num_cols, b.num_rows, b.num_cols,
    );
    let mut total = <T::Real as Zero>::zero();
    for (&x, &y) in a.data.iter().zip(b.data.iter()) {
        total = total + (x - y).mag_sq();
    }
    total.lsqrt()
}
