//! Triangular substitution kernels over flat row-major storage.
//!
//! Each kernel solves in place, overwriting `b` with the solution. The
//! triangular factor is read from the full `n x n` buffer; elements on the
//! other side of the diagonal are never touched, so a combined LU buffer
//! works directly. None of the kernels guard against a zero diagonal, the
//! caller is responsible for rejecting singular factors first.

use crate::traits::LinalgScalar;

/// Solve `L * x = b` by forward substitution, `L` lower triangular.
pub(crate) fn solve_l<T: LinalgScalar>(l: &[T], b: &mut [T], n: usize) {
    for i in 0..n {
        let mut sum = b[i];
        let mut index_l = i * n;
        for k in 0..i {
            sum -= l[index_l] * b[k];
            index_l += 1;
        }
        b[i] = sum / l[index_l];
    }
}

/// Solve `U * x = b` by back substitution, `U` upper triangular.
pub(crate) fn solve_u<T: LinalgScalar>(u: &[T], b: &mut [T], n: usize) {
    for i in (0..n).rev() {
        let mut sum = b[i];
        let mut index_u = i * n + i + 1;
        for k in i + 1..n {
            sum -= u[index_u] * b[k];
            index_u += 1;
        }
        b[i] = sum / u[i * n + i];
    }
}

/// Solve `L^H * x = b` by back substitution, reading the stored lower
/// triangle column-wise and conjugating. For real scalars this is the
/// ordinary transposed solve.
pub(crate) fn solve_conj_tran_l<T: LinalgScalar>(l: &[T], b: &mut [T], n: usize) {
    for i in (0..n).rev() {
        let mut sum = b[i];
        for k in i + 1..n {
            sum -= l[k * n + i].conj() * b[k];
        }
        b[i] = sum / l[i * n + i].conj();
    }
}
