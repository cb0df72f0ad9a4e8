//! Unrolled determinant and inverse kernels for matrices up to
//! [`UNROLLED_MAX`](crate::params::UNROLLED_MAX) on a side.
//!
//! Closed-form cofactor expansions with every index resolved at compile
//! time: no pivoting, no loops, no scratch. For these sizes that beats the
//! general LU path by a wide margin, which is why the dispatch layer routes
//! small determinants and inverses here.

use num_traits::One;

use crate::matrix::DenseMatrix;
use crate::params::UNROLLED_MAX;
use crate::traits::LinalgScalar;

/// Determinant by direct cofactor expansion.
///
/// Supports square matrices with `1 <= n <= UNROLLED_MAX`.
pub fn unrolled_determinant<T: LinalgScalar>(m: &DenseMatrix<T>) -> T {
    let n = m.num_rows();
    assert_eq!(n, m.num_cols(), "determinant requires a square matrix");
    assert!(
        n >= 1 && n <= UNROLLED_MAX,
        "unrolled determinant supports 1 <= n <= {UNROLLED_MAX}, got {n}",
    );
    let d = m.data();
    match n {
        1 => d[0],
        2 => d[0] * d[3] - d[1] * d[2],
        3 => {
            let a = d[0] * (d[4] * d[8] - d[5] * d[7]);
            let b = d[1] * (d[3] * d[8] - d[5] * d[6]);
            let c = d[2] * (d[3] * d[7] - d[4] * d[6]);
            a - b + c
        }
        _ => det4(d),
    }
}

/// 4x4 determinant from the twelve 2x2 sub-determinants shared with the
/// inverse kernel.
fn det4<T: LinalgScalar>(d: &[T]) -> T {
    let s0 = d[0] * d[5] - d[1] * d[4];
    let s1 = d[0] * d[6] - d[2] * d[4];
    let s2 = d[0] * d[7] - d[3] * d[4];
    let s3 = d[1] * d[6] - d[2] * d[5];
    let s4 = d[1] * d[7] - d[3] * d[5];
    let s5 = d[2] * d[7] - d[3] * d[6];

    let c0 = d[8] * d[13] - d[9] * d[12];
    let c1 = d[8] * d[14] - d[10] * d[12];
    let c2 = d[8] * d[15] - d[11] * d[12];
    let c3 = d[9] * d[14] - d[10] * d[13];
    let c4 = d[9] * d[15] - d[11] * d[13];
    let c5 = d[10] * d[15] - d[11] * d[14];

    s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
}

/// Inverse by adjugate-over-determinant, `1 <= n <= UNROLLED_MAX`.
///
/// `inv` is reshaped to match `m`. Returns `false` without touching `inv`
/// when the determinant magnitude is below machine epsilon; size 1 is the
/// direct reciprocal.
pub fn unrolled_inverse<T: LinalgScalar>(m: &DenseMatrix<T>, inv: &mut DenseMatrix<T>) -> bool {
    let n = m.num_rows();
    assert_eq!(n, m.num_cols(), "inverse requires a square matrix");
    assert!(
        n >= 1 && n <= UNROLLED_MAX,
        "unrolled inverse supports 1 <= n <= {UNROLLED_MAX}, got {n}",
    );

    let det = unrolled_determinant(m);
    if det.mag() < T::lepsilon() {
        return false;
    }
    let inv_det = T::one() / det;

    inv.reshape(n, n, false);
    let d = m.data();
    let o = inv.data_mut();
    match n {
        1 => {
            o[0] = inv_det;
        }
        2 => {
            o[0] = d[3] * inv_det;
            o[1] = -d[1] * inv_det;
            o[2] = -d[2] * inv_det;
            o[3] = d[0] * inv_det;
        }
        3 => {
            // Adjugate: each output is the transposed 2x2 cofactor.
            o[0] = (d[4] * d[8] - d[5] * d[7]) * inv_det;
            o[1] = (d[2] * d[7] - d[1] * d[8]) * inv_det;
            o[2] = (d[1] * d[5] - d[2] * d[4]) * inv_det;
            o[3] = (d[5] * d[6] - d[3] * d[8]) * inv_det;
            o[4] = (d[0] * d[8] - d[2] * d[6]) * inv_det;
            o[5] = (d[2] * d[3] - d[0] * d[5]) * inv_det;
            o[6] = (d[3] * d[7] - d[4] * d[6]) * inv_det;
            o[7] = (d[1] * d[6] - d[0] * d[7]) * inv_det;
            o[8] = (d[0] * d[4] - d[1] * d[3]) * inv_det;
        }
        _ => inv4(d, o, inv_det),
    }
    true
}

/// 4x4 adjugate, every entry a 3x3 cofactor built from the shared 2x2
/// sub-determinants.
fn inv4<T: LinalgScalar>(d: &[T], o: &mut [T], inv_det: T) {
    let s0 = d[0] * d[5] - d[1] * d[4];
    let s1 = d[0] * d[6] - d[2] * d[4];
    let s2 = d[0] * d[7] - d[3] * d[4];
    let s3 = d[1] * d[6] - d[2] * d[5];
    let s4 = d[1] * d[7] - d[3] * d[5];
    let s5 = d[2] * d[7] - d[3] * d[6];

    let c0 = d[8] * d[13] - d[9] * d[12];
    let c1 = d[8] * d[14] - d[10] * d[12];
    let c2 = d[8] * d[15] - d[11] * d[12];
    let c3 = d[9] * d[14] - d[10] * d[13];
    let c4 = d[9] * d[15] - d[11] * d[13];
    let c5 = d[10] * d[15] - d[11] * d[14];

    o[0] = (d[5] * c5 - d[6] * c4 + d[7] * c3) * inv_det;
    o[1] = (-d[1] * c5 + d[2] * c4 - d[3] * c3) * inv_det;
    o[2] = (d[13] * s5 - d[14] * s4 + d[15] * s3) * inv_det;
    o[3] = (-d[9] * s5 + d[10] * s4 - d[11] * s3) * inv_det;

    o[4] = (-d[4] * c5 + d[6] * c2 - d[7] * c1) * inv_det;
    o[5] = (d[0] * c5 - d[2] * c2 + d[3] * c1) * inv_det;
    o[6] = (-d[12] * s5 + d[14] * s2 - d[15] * s1) * inv_det;
    o[7] = (d[8] * s5 - d[10] * s2 + d[11] * s1) * inv_det;

    o[8] = (d[4] * c4 - d[5] * c2 + d[7] * c0) * inv_det;
    o[9] = (-d[0] * c4 + d[1] * c2 - d[3] * c0) * inv_det;
    o[10] = (d[12] * s4 - d[13] * s2 + d[15] * s0) * inv_det;
    o[11] = (-d[8] * s4 + d[9] * s2 - d[11] * s0) * inv_det;

    o[12] = (-d[4] * c3 + d[5] * c1 - d[6] * c0) * inv_det;
    o[13] = (d[0] * c3 - d[1] * c1 + d[2] * c0) * inv_det;
    o[14] = (-d[12] * s3 + d[13] * s1 - d[14] * s0) * inv_det;
    o[15] = (d[8] * s3 - d[9] * s1 + d[10] * s0) * inv_det;
}
