use num_traits::{Float, One, Zero};

use crate::linalg::{Decomposition, LinalgError};
use crate::matrix::{transpose, DenseMatrix};
use crate::traits::{LinalgScalar, RealScalar};

// ── Givens rotations and column helpers ─────────────────────────────

/// Stable Givens rotation `(c, s)` with `-s*a + c*b = 0`.
fn givens<T: RealScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

/// Mix columns `a` and `b`: `col_a' = c*col_a + s*col_b`,
/// `col_b' = c*col_b - s*col_a`.
fn rotate_cols<T: RealScalar>(q: &mut DenseMatrix<T>, a: usize, b: usize, c: T, s: T) {
    let rows = q.num_rows();
    let stride = q.num_cols();
    let data = q.data_mut();
    for row in 0..rows {
        let qa = data[row * stride + a];
        let qb = data[row * stride + b];
        data[row * stride + a] = c * qa + s * qb;
        data[row * stride + b] = c * qb - s * qa;
    }
}

fn negate_col<T: RealScalar>(q: &mut DenseMatrix<T>, col: usize) {
    let rows = q.num_rows();
    let stride = q.num_cols();
    let data = q.data_mut();
    for row in 0..rows {
        data[row * stride + col] = -data[row * stride + col];
    }
}

fn swap_cols<T: RealScalar>(q: &mut DenseMatrix<T>, a: usize, b: usize) {
    let rows = q.num_rows();
    let stride = q.num_cols();
    let data = q.data_mut();
    for row in 0..rows {
        data.swap(row * stride + a, row * stride + b);
    }
}

fn set_identity<T: RealScalar>(q: &mut DenseMatrix<T>, n: usize) {
    q.reshape(n, n, false);
    let data = q.data_mut();
    for i in 0..n * n {
        data[i] = T::zero();
    }
    let mut i = 0;
    while i < n * n {
        data[i] = T::one();
        i += n + 1;
    }
}

// ── Householder bidiagonalization ───────────────────────────────────

/// Reduce `a` (`m x n`, `m >= n`) to upper bidiagonal form with Householder
/// reflections applied alternately from the left and right, accumulating the
/// transforms into `u` (`m x m`) and `v` (`n x n`) when requested. On return
/// `A = U * B * V^T` with `B = bidiag(diag, off_diag)`.
fn bidiagonalize<T: RealScalar>(
    a: &mut DenseMatrix<T>,
    diag: &mut [T],
    off_diag: &mut [T],
    u: &mut DenseMatrix<T>,
    v: &mut DenseMatrix<T>,
    compute_u: bool,
    compute_v: bool,
) {
    let m = a.num_rows();
    let n = a.num_cols();

    if compute_u {
        set_identity(u, m);
    }
    if compute_v {
        set_identity(v, n);
    }

    let eps_sq = T::lepsilon() * T::lepsilon();
    let data = a.data_mut();

    for k in 0..n {
        // Left reflection, zeroing the column below the diagonal.
        let mut norm_sq = T::zero();
        for i in k..m {
            let val = data[i * n + k];
            norm_sq = norm_sq + val * val;
        }

        if norm_sq > eps_sq {
            let norm = norm_sq.sqrt();
            let akk = data[k * n + k];
            let sigma = if akk >= T::zero() { norm } else { -norm };

            let v0 = akk + sigma;
            for i in k + 1..m {
                data[i * n + k] = data[i * n + k] / v0;
            }
            let tau = v0 / sigma;

            for j in k + 1..n {
                let mut dot = data[k * n + j];
                for i in k + 1..m {
                    dot = dot + data[i * n + k] * data[i * n + j];
                }
                dot = dot * tau;

                data[k * n + j] = data[k * n + j] - dot;
                for i in k + 1..m {
                    data[i * n + j] = data[i * n + j] - dot * data[i * n + k];
                }
            }

            if compute_u {
                let mu = u.num_cols();
                let ud = u.data_mut();
                for row in 0..m {
                    let mut dot = ud[row * mu + k];
                    for i in k + 1..m {
                        dot = dot + ud[row * mu + i] * data[i * n + k];
                    }
                    dot = dot * tau;

                    ud[row * mu + k] = ud[row * mu + k] - dot;
                    for i in k + 1..m {
                        ud[row * mu + i] = ud[row * mu + i] - dot * data[i * n + k];
                    }
                }
            }

            diag[k] = -sigma;
        } else {
            diag[k] = data[k * n + k];
        }

        // Right reflection, zeroing the row right of the superdiagonal.
        if k + 2 < n {
            let mut norm_sq = T::zero();
            for j in k + 1..n {
                let val = data[k * n + j];
                norm_sq = norm_sq + val * val;
            }

            if norm_sq > eps_sq {
                let norm = norm_sq.sqrt();
                let akk1 = data[k * n + k + 1];
                let sigma = if akk1 >= T::zero() { norm } else { -norm };

                let v0 = akk1 + sigma;
                for j in k + 2..n {
                    data[k * n + j] = data[k * n + j] / v0;
                }
                let tau = v0 / sigma;

                for i in k + 1..m {
                    let mut dot = data[i * n + k + 1];
                    for j in k + 2..n {
                        dot = dot + data[i * n + j] * data[k * n + j];
                    }
                    dot = dot * tau;

                    data[i * n + k + 1] = data[i * n + k + 1] - dot;
                    for j in k + 2..n {
                        data[i * n + j] = data[i * n + j] - dot * data[k * n + j];
                    }
                }

                if compute_v {
                    let nv = v.num_cols();
                    let vd = v.data_mut();
                    for row in 0..n {
                        let mut dot = vd[row * nv + k + 1];
                        for j in k + 2..n {
                            dot = dot + vd[row * nv + j] * data[k * n + j];
                        }
                        dot = dot * tau;

                        vd[row * nv + k + 1] = vd[row * nv + k + 1] - dot;
                        for j in k + 2..n {
                            vd[row * nv + j] = vd[row * nv + j] - dot * data[k * n + j];
                        }
                    }
                }

                off_diag[k] = -sigma;
            } else {
                off_diag[k] = data[k * n + k + 1];
            }
        } else if k + 1 < n {
            off_diag[k] = data[k * n + k + 1];
        }
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Implicit-shift QR iteration on a bidiagonal matrix. On return `diag`
/// holds the non-negative singular values sorted descending and `off_diag`
/// is zeroed; the rotations are folded into `u` and `v` when requested.
fn bidiagonal_qr<T: RealScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    u: &mut DenseMatrix<T>,
    v: &mut DenseMatrix<T>,
    compute_u: bool,
    compute_v: bool,
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = diag.len();
    if n <= 1 {
        if n == 1 && diag[0] < T::zero() {
            diag[0] = -diag[0];
            if compute_u {
                negate_col(u, 0);
            }
        }
        return Ok(());
    }

    let eps = T::lepsilon();
    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        // Deflate once the trailing coupling is negligible.
        let threshold = eps * (diag[hi - 1].abs() + diag[hi].abs());
        if off_diag[hi - 1].abs() <= threshold {
            off_diag[hi - 1] = T::zero();
            hi -= 1;
            continue;
        }

        // Find the start of the unreduced block.
        let mut lo = hi - 1;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        iter += 1;
        if iter > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        // A zero diagonal breaks the shift formula. Chase the coupled
        // off-diagonal entry off the bottom with left rotations, which
        // splits the block.
        let mut found_zero = false;
        for idx in lo..hi {
            if diag[idx].abs() <= eps {
                diag[idx] = T::zero();
                let mut z = off_diag[idx];
                off_diag[idx] = T::zero();
                for j in idx + 1..=hi {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j < hi {
                        z = -(s * off_diag[j]);
                        off_diag[j] = c * off_diag[j];
                    }
                    if compute_u {
                        rotate_cols(u, j, idx, c, s);
                    }
                }
                found_zero = true;
                break;
            }
        }
        if found_zero {
            continue;
        }

        // Wilkinson shift from the trailing 2x2 of B^T B.
        let d_hi = diag[hi];
        let d_hi1 = diag[hi - 1];
        let e_hi1 = off_diag[hi - 1];
        let e_hi2 = if hi >= 2 && hi - 2 >= lo {
            off_diag[hi - 2]
        } else {
            T::zero()
        };

        let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
        let t12 = d_hi1 * e_hi1;
        let t22 = d_hi * d_hi + e_hi1 * e_hi1;

        let two = T::one() + T::one();
        let d = (t11 - t22) / two;
        let sign_d = if d >= T::zero() { T::one() } else { -T::one() };
        let mu = t22 - t12 * t12 / (d + sign_d * (d * d + t12 * t12).sqrt());

        // Implicit QR sweep: chase the bulge down the band.
        let mut x = diag[lo] * diag[lo] - mu;
        let mut z = diag[lo] * off_diag[lo];

        for k in lo..hi {
            let (c, s) = givens(x, z);
            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let dk = diag[k];
            let ek = off_diag[k];
            let dk1 = diag[k + 1];

            diag[k] = c * dk + s * ek;
            off_diag[k] = c * ek - s * dk;
            let bulge = s * dk1;
            diag[k + 1] = c * dk1;

            if compute_v {
                rotate_cols(v, k, k + 1, c, s);
            }

            let (c2, s2) = givens(diag[k], bulge);

            diag[k] = c2 * diag[k] + s2 * bulge;
            let old_ek = off_diag[k];
            let old_dk1 = diag[k + 1];
            off_diag[k] = c2 * old_ek + s2 * old_dk1;
            diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

            if k + 1 < hi {
                let old_ek1 = off_diag[k + 1];
                x = off_diag[k];
                z = s2 * old_ek1;
                off_diag[k + 1] = c2 * old_ek1;
            }

            if compute_u {
                rotate_cols(u, k, k + 1, c2, s2);
            }
        }
    }

    for i in 0..n {
        if diag[i] < T::zero() {
            diag[i] = -diag[i];
            if compute_u {
                negate_col(u, i);
            }
        }
    }

    // Selection sort descending, carrying the singular vectors along.
    for i in 0..n {
        let mut max_idx = i;
        for j in i + 1..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            if compute_u {
                swap_cols(u, i, max_idx);
            }
            if compute_v {
                swap_cols(v, i, max_idx);
            }
        }
    }

    Ok(())
}

// ── SvdDecomposition ────────────────────────────────────────────────

/// Singular value decomposition `A = U * diag(sigma) * V^T`, real scalars
/// only.
///
/// Householder bidiagonalization followed by implicit-shift Golub-Kahan QR
/// on the band. Wide matrices are handled by decomposing the transpose and
/// exchanging the roles of `U` and `V`, so any shape is accepted. Singular
/// values come out non-negative and sorted descending, `min(m, n)` of them.
///
/// Whether the singular vectors are accumulated is fixed at construction;
/// skipping them roughly halves the work when only values are needed.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
/// use numat::linalg::SvdDecomposition;
///
/// let a = DenseMatrix::from_rows(&[[1.0_f64, 0.0], [0.0, 2.0], [0.0, 0.0]]);
/// let mut svd = SvdDecomposition::new(true, true);
/// svd.decompose(&a).unwrap();
/// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-10);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct SvdDecomposition<T: RealScalar> {
    u: DenseMatrix<T>,
    vt: DenseMatrix<T>,
    w: Vec<T>,
    off: Vec<T>,
    work: DenseMatrix<T>,
    ua: DenseMatrix<T>,
    va: DenseMatrix<T>,
    compute_u: bool,
    compute_v: bool,
}

impl<T: RealScalar> SvdDecomposition<T> {
    pub fn new(compute_u: bool, compute_v: bool) -> Self {
        Self {
            u: DenseMatrix::zeros(0, 0),
            vt: DenseMatrix::zeros(0, 0),
            w: Vec::new(),
            off: Vec::new(),
            work: DenseMatrix::zeros(0, 0),
            ua: DenseMatrix::zeros(0, 0),
            va: DenseMatrix::zeros(0, 0),
            compute_u,
            compute_v,
        }
    }

    /// Copy `a` and compute its SVD. Fails only when the bidiagonal QR
    /// iteration exceeds its budget.
    pub fn decompose(&mut self, a: &DenseMatrix<T>) -> Result<(), LinalgError> {
        let m = a.num_rows();
        let n = a.num_cols();
        let len = m.min(n);

        self.w.clear();
        self.w.resize(len, T::zero());
        self.off.clear();
        self.off.resize(len, T::zero());
        if len == 0 {
            self.u.reshape(0, 0, false);
            self.vt.reshape(0, 0, false);
            return Ok(());
        }

        // Work on the tall orientation; a wide input decomposes its
        // transpose and swaps which side each factor lands on.
        let transposed = m < n;
        if transposed {
            transpose(a, &mut self.work);
        } else {
            self.work.copy_from(a);
        }

        // For a wide input, U of the transpose is V of the original and
        // vice versa, so accumulate whichever sides are wanted.
        let (need_left, need_right) = if transposed {
            (self.compute_v, self.compute_u)
        } else {
            (self.compute_u, self.compute_v)
        };

        bidiagonalize(
            &mut self.work,
            &mut self.w,
            &mut self.off,
            &mut self.ua,
            &mut self.va,
            need_left,
            need_right,
        );
        bidiagonal_qr(
            &mut self.w,
            &mut self.off[..len - 1],
            &mut self.ua,
            &mut self.va,
            need_left,
            need_right,
            30 * m.max(n),
        )?;

        if transposed {
            if self.compute_u {
                core::mem::swap(&mut self.u, &mut self.va);
            }
            if self.compute_v {
                transpose(&self.ua, &mut self.vt);
            }
        } else {
            if self.compute_u {
                core::mem::swap(&mut self.u, &mut self.ua);
            }
            if self.compute_v {
                transpose(&self.va, &mut self.vt);
            }
        }

        Ok(())
    }

    /// The singular values, non-negative and sorted descending. Length
    /// `min(m, n)`.
    pub fn singular_values(&self) -> &[T] {
        &self.w
    }

    /// Left singular vectors, `m x m`. Empty unless requested at
    /// construction.
    pub fn u(&self) -> &DenseMatrix<T> {
        &self.u
    }

    /// Right singular vectors transposed, `n x n`. Empty unless requested at
    /// construction.
    pub fn vt(&self) -> &DenseMatrix<T> {
        &self.vt
    }

    /// Number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.w.iter().filter(|&&s| s > tol).count()
    }

    /// `sigma_max / sigma_min`, infinite when the smallest singular value is
    /// zero.
    pub fn condition_number(&self) -> T {
        match (self.w.first(), self.w.last()) {
            (Some(&s_max), Some(&s_min)) => {
                if s_min == T::zero() {
                    T::infinity()
                } else {
                    s_max / s_min
                }
            }
            _ => T::one(),
        }
    }
}

impl<T: RealScalar + LinalgScalar<Real = T>> Decomposition<T> for SvdDecomposition<T> {
    fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool {
        SvdDecomposition::decompose(self, a).is_ok()
    }

    fn input_modified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn check_reconstruction(a: &DenseMatrix<f64>, tol: f64) {
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(a).unwrap();
        let u = svd.u();
        let vt = svd.vt();
        let sv = svd.singular_values();

        let m = a.num_rows();
        let n = a.num_cols();
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..sv.len() {
                    sum += u.get(i, k) * sv[k] * vt.get(k, j);
                }
                assert!(
                    (sum - a.get(i, j)).abs() < tol,
                    "reconstruction off at ({i},{j}): {} vs {}",
                    sum,
                    a.get(i, j)
                );
            }
        }
    }

    fn check_orthogonal(q: &DenseMatrix<f64>, tol: f64) {
        let n = q.num_rows();
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += q.get(k, i) * q.get(k, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((sum - expected).abs() < tol, "QtQ[({i},{j})] = {sum}");
            }
        }
    }

    #[test]
    fn identity() {
        let a = DenseMatrix::<f64>::identity(3);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        for &s in svd.singular_values() {
            assert!((s - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn diagonal_with_negative_entry() {
        let a = DenseMatrix::from_rows(&[[-3.0_f64, 0.0], [0.0, 2.0]]);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 3.0).abs() < TOL);
        assert!((svd.singular_values()[1] - 2.0).abs() < TOL);
        check_reconstruction(&a, TOL);
    }

    #[test]
    fn known_2x2() {
        // A^T A has eigenvalues 25 and 1.
        let a = DenseMatrix::from_rows(&[[3.0_f64, 2.0], [2.0, 3.0]]);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 5.0).abs() < TOL);
        assert!((svd.singular_values()[1] - 1.0).abs() < TOL);
    }

    #[test]
    fn reconstruction_and_orthogonality_3x3() {
        let a = DenseMatrix::from_rows(&[
            [1.0_f64, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 0.0],
        ]);
        check_reconstruction(&a, 1e-9);

        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        check_orthogonal(svd.u(), 1e-9);
        check_orthogonal(svd.vt(), 1e-9);
    }

    #[test]
    fn sorted_descending() {
        let a = DenseMatrix::from_rows(&[
            [10.0_f64, 3.0, 0.0, 0.0],
            [3.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 7.0, 2.0],
            [0.0, 0.0, 2.0, 4.0],
        ]);
        let mut svd = SvdDecomposition::new(false, false);
        svd.decompose(&a).unwrap();
        let sv = svd.singular_values();
        for i in 0..sv.len() - 1 {
            assert!(sv[i] >= sv[i + 1] - TOL, "not descending at {i}");
        }
    }

    #[test]
    fn rank_deficient() {
        let a = DenseMatrix::from_rows(&[
            [1.0_f64, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [3.0, 6.0, 9.0],
        ]);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        let sv = svd.singular_values();
        assert!(sv[0] > 1.0);
        assert!(sv[1].abs() < 1e-9);
        assert!(sv[2].abs() < 1e-9);
        assert_eq!(svd.rank(1e-9), 1);
    }

    #[test]
    fn tall_matrix() {
        check_reconstruction(
            &DenseMatrix::from_rows(&[
                [1.0_f64, 0.0],
                [0.0, 1.0],
                [1.0, 1.0],
                [0.0, 0.0],
            ]),
            1e-9,
        );
    }

    #[test]
    fn wide_matrix_via_transpose() {
        let a = DenseMatrix::from_rows(&[[3.0_f64, 2.0, 2.0], [2.0, 3.0, -2.0]]);
        check_reconstruction(&a, 1e-9);

        // Singular values match those of the transpose.
        let mut at = DenseMatrix::zeros(0, 0);
        transpose(&a, &mut at);
        let mut svd_a = SvdDecomposition::new(false, false);
        let mut svd_at = SvdDecomposition::new(false, false);
        svd_a.decompose(&a).unwrap();
        svd_at.decompose(&at).unwrap();
        for (x, y) in svd_a
            .singular_values()
            .iter()
            .zip(svd_at.singular_values())
        {
            assert!((x - y).abs() < TOL);
        }
    }

    #[test]
    fn values_only_skips_vectors() {
        let a = DenseMatrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]);
        let mut svd = SvdDecomposition::new(false, false);
        svd.decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 4.0).abs() < TOL);
        assert!((svd.singular_values()[1] - 3.0).abs() < TOL);
        assert_eq!(svd.u().num_elements(), 0);
        assert_eq!(svd.vt().num_elements(), 0);
    }

    #[test]
    fn rank_and_condition() {
        let a = DenseMatrix::from_rows(&[[2.0_f64, 0.0], [0.0, 0.5]]);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        assert_eq!(svd.rank(1e-10), 2);
        assert!((svd.condition_number() - 4.0).abs() < TOL);
    }

    #[test]
    fn size_1x1_negative() {
        let a = DenseMatrix::from_rows(&[[-5.0_f64]]);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 5.0).abs() < TOL);
        check_reconstruction(&a, TOL);
    }

    #[test]
    fn f32_support() {
        let a = DenseMatrix::from_rows(&[[3.0_f32, 1.0], [1.0, 3.0]]);
        let mut svd = SvdDecomposition::new(false, false);
        svd.decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 4.0).abs() < 1e-5);
        assert!((svd.singular_values()[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn empty_input() {
        let a = DenseMatrix::<f64>::zeros(0, 0);
        let mut svd = SvdDecomposition::new(true, true);
        svd.decompose(&a).unwrap();
        assert!(svd.singular_values().is_empty());
    }
}
