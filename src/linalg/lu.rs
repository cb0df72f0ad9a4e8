use num_traits::{One, Zero};

use crate::linalg::{quality_triangular, triangular, Decomposition};
use crate::matrix::DenseMatrix;
use crate::traits::LinalgScalar;

/// LU decomposition with partial pivoting, Crout ordering.
///
/// Factors `P * A = L * U` where `L` is unit lower triangular, `U` is upper
/// triangular and `P` is a row permutation. Both factors are packed into one
/// matrix: the upper triangle (with diagonal) holds `U`, the strict lower
/// triangle holds `L`.
///
/// Decomposition always runs to completion, even for singular input; the
/// column update is simply skipped when a pivot is exactly zero. Callers
/// check [`is_singular`](Self::is_singular) afterwards. Internal buffers are
/// sized to the largest matrix seen and reused across calls.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
/// use numat::linalg::LuDecomposition;
///
/// let a = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [5.0, 3.0]]);
/// let mut lu = LuDecomposition::new();
/// assert!(lu.decompose(&a));
/// assert!(!lu.is_singular());
/// assert!((lu.determinant() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct LuDecomposition<T: LinalgScalar> {
    lu: DenseMatrix<T>,
    /// Row permutation as applied so far: `pivot[i]` is the original index of
    /// the row now stored at `i`.
    pivot: Vec<usize>,
    /// Sequential swap record: at step `j`, row `j` was exchanged with row
    /// `indx[j]`. This is the order the solve replays.
    indx: Vec<usize>,
    pivsign: i32,
    /// Column cache during decomposition, right-hand-side staging during
    /// solves.
    vv: Vec<T>,
    max_width: usize,
}

impl<T: LinalgScalar> LuDecomposition<T> {
    pub fn new() -> Self {
        Self {
            lu: DenseMatrix::zeros(0, 0),
            pivot: Vec::new(),
            indx: Vec::new(),
            pivsign: 1,
            vv: Vec::new(),
            max_width: 0,
        }
    }

    /// Copy `a` and factor it in place. Returns `false` only for an empty
    /// matrix; singular input still decomposes and is reported by
    /// [`is_singular`](Self::is_singular).
    pub fn decompose(&mut self, a: &DenseMatrix<T>) -> bool {
        let m = a.num_rows();
        let n = a.num_cols();
        if m == 0 || n == 0 {
            return false;
        }
        self.init(a);

        let data = self.lu.data_mut();
        let vv = &mut self.vv;

        for j in 0..n {
            // Stage column j to keep the inner dot products off the strided
            // matrix walk.
            for i in 0..m {
                vv[i] = data[i * n + j];
            }

            // Apply all previous transformations to the column.
            for i in 0..m {
                let row_index = i * n;
                let kmax = i.min(j);
                let mut s = T::zero();
                for k in 0..kmax {
                    s += data[row_index + k] * vv[k];
                }
                vv[i] -= s;
                data[row_index + j] = vv[i];
            }

            // Select the pivot by squared magnitude.
            let mut p = j;
            let mut max = if p < m { vv[p].mag_sq() } else { T::Real::zero() };
            for i in j + 1..m {
                let v = vv[i].mag_sq();
                if v > max {
                    p = i;
                    max = v;
                }
            }

            if p != j {
                let row_p = p * n;
                let row_j = j * n;
                for k in 0..n {
                    data.swap(row_p + k, row_j + k);
                }
                self.pivot.swap(p, j);
                self.pivsign = -self.pivsign;
            }
            self.indx[j] = p;

            // Divide out the pivot below the diagonal. A zero pivot leaves
            // the column untouched rather than aborting.
            if j < m {
                let lujj = data[j * n + j];
                if lujj != T::zero() {
                    for i in j + 1..m {
                        data[i * n + j] /= lujj;
                    }
                }
            }
        }

        true
    }

    fn init(&mut self, a: &DenseMatrix<T>) {
        let max_width = a.num_rows().max(a.num_cols());
        if max_width > self.max_width {
            self.max_width = max_width;
            self.vv = vec![T::zero(); max_width];
            self.indx = vec![0; max_width];
            self.pivot = vec![0; max_width];
        }
        self.lu.copy_from(a);
        for i in 0..a.num_rows() {
            self.pivot[i] = i;
        }
        self.pivsign = 1;
    }

    /// True if any diagonal element of the factorization is within machine
    /// epsilon of zero.
    pub fn is_singular(&self) -> bool {
        let n = self.lu.num_cols();
        let eps = T::lepsilon();
        let tol = eps * eps;
        let data = self.lu.data();
        for i in 0..self.lu.num_rows().min(n) {
            if data[i * n + i].mag_sq() < tol {
                return true;
            }
        }
        false
    }

    /// Determinant of the decomposed matrix: the product of the `U` diagonal
    /// with the sign of the row permutation.
    pub fn determinant(&self) -> T {
        let m = self.lu.num_rows();
        let n = self.lu.num_cols();
        assert_eq!(m, n, "determinant requires a square matrix");

        let mut ret = if self.pivsign >= 0 { T::one() } else { -T::one() };
        let data = self.lu.data();
        let mut i = 0;
        while i < m * n {
            ret *= data[i];
            i += n + 1;
        }
        ret
    }

    /// Conditioning estimate of the factorization, in `[0, 1]`.
    pub fn quality(&self) -> T::Real {
        quality_triangular(&self.lu)
    }

    /// The packed factorization.
    pub fn lu_matrix(&self) -> &DenseMatrix<T> {
        &self.lu
    }

    /// Unit lower triangular factor, `m x min(m, n)`.
    pub fn lower(&self) -> DenseMatrix<T> {
        let num_rows = self.lu.num_rows();
        let num_cols = num_rows.min(self.lu.num_cols());

        let mut lower = DenseMatrix::zeros(num_rows, num_cols);
        for i in 0..num_cols {
            lower.set(i, i, T::one());
            for j in 0..i {
                lower.set(i, j, self.lu.get(i, j));
            }
        }
        for i in num_cols..num_rows {
            for j in 0..num_cols {
                lower.set(i, j, self.lu.get(i, j));
            }
        }
        lower
    }

    /// Upper triangular factor, `min(m, n) x n`.
    pub fn upper(&self) -> DenseMatrix<T> {
        let num_rows = self.lu.num_rows().min(self.lu.num_cols());
        let num_cols = self.lu.num_cols();

        let mut upper = DenseMatrix::zeros(num_rows, num_cols);
        for i in 0..num_rows {
            for j in i..num_cols {
                upper.set(i, j, self.lu.get(i, j));
            }
        }
        upper
    }

    /// Row permutation as a matrix `P` with `P * A = L * U`.
    pub fn pivot_matrix(&self) -> DenseMatrix<T> {
        let m = self.lu.num_rows();
        let mut p = DenseMatrix::zeros(m, m);
        for i in 0..m {
            p.set(i, self.pivot[i], T::one());
        }
        p
    }

    /// The accumulated row permutation.
    pub fn row_pivots(&self) -> &[usize] {
        &self.pivot[..self.lu.num_rows()]
    }

    /// Right-hand-side staging buffer shared with the solve routines.
    pub(crate) fn vv(&self) -> &[T] {
        &self.vv
    }

    pub(crate) fn vv_mut(&mut self) -> &mut [T] {
        &mut self.vv
    }

    /// Solve `A * x = b` for the staged right-hand side in `vv`, in place.
    ///
    /// Forward substitution replays the row swaps from `indx` as it goes and
    /// skips ahead while the permuted right-hand side is still all zeros,
    /// which makes solving against identity columns (inversion) cheap. No
    /// dimension checks; callers stage exactly `n` values.
    pub(crate) fn solve_vector_internal(&mut self) {
        let n = self.lu.num_cols();
        let data = self.lu.data();
        let vv = &mut self.vv;

        let mut ii = 0;
        for i in 0..n {
            let ip = self.indx[i];
            let mut sum = vv[ip];
            vv[ip] = vv[i];
            if ii != 0 {
                let mut index = i * n + ii - 1;
                for j in ii - 1..i {
                    sum -= data[index] * vv[j];
                    index += 1;
                }
            } else if sum != T::zero() {
                ii = i + 1;
            }
            vv[i] = sum;
        }

        triangular::solve_u(data, &mut vv[..n], n);
    }
}

impl<T: LinalgScalar> Default for LuDecomposition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LinalgScalar> Decomposition<T> for LuDecomposition<T> {
    fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool {
        LuDecomposition::decompose(self, a)
    }

    fn input_modified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{diff_norm_f, mult};
    use num_complex::Complex;

    fn reconstructs(a: &DenseMatrix<f64>) {
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(a));

        let mut left = DenseMatrix::zeros(0, 0);
        let mut right = DenseMatrix::zeros(0, 0);
        mult(&lu.pivot_matrix(), a, &mut left);
        mult(&lu.lower(), &lu.upper(), &mut right);
        assert!(diff_norm_f(&left, &right) < 1e-12);
    }

    #[test]
    fn reconstruct_square() {
        reconstructs(&DenseMatrix::from_rows(&[
            [2.0, 1.0, -1.0],
            [-3.0, -1.0, 2.0],
            [-2.0, 1.0, 2.0],
        ]));
    }

    #[test]
    fn reconstruct_rectangular() {
        reconstructs(&DenseMatrix::from_rows(&[
            [1.0, 2.0],
            [3.0, 4.0],
            [5.0, 7.0],
        ]));
        reconstructs(&DenseMatrix::from_rows(&[
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 8.0, 9.0],
        ]));
    }

    #[test]
    fn determinant_2x2() {
        let a = DenseMatrix::from_rows(&[[3.0_f64, 8.0], [4.0, 6.0]]);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        assert!((lu.determinant() - (-14.0)).abs() < 1e-12);
    }

    #[test]
    fn determinant_3x3() {
        let a = DenseMatrix::from_rows(&[
            [6.0_f64, 1.0, 1.0],
            [4.0, -2.0, 5.0],
            [2.0, 8.0, 7.0],
        ]);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        assert!((lu.determinant() - (-306.0)).abs() < 1e-10);
    }

    #[test]
    fn determinant_complex() {
        type C = Complex<f64>;
        let a = DenseMatrix::from_rows(&[
            [C::new(1.0, 1.0), C::new(2.0, 0.0)],
            [C::new(3.0, 0.0), C::new(4.0, -1.0)],
        ]);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        let det = lu.determinant();
        assert!((det - C::new(-1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn singular_still_decomposes() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 4.0]]);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        assert!(lu.is_singular());
        assert!(lu.determinant().abs() < 1e-12);
    }

    #[test]
    fn zero_matrix_is_singular() {
        let a = DenseMatrix::<f64>::zeros(3, 3);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        assert!(lu.is_singular());
        assert_eq!(lu.quality(), 0.0);
    }

    #[test]
    fn empty_matrix_rejected() {
        let a = DenseMatrix::<f64>::zeros(0, 0);
        let mut lu = LuDecomposition::new();
        assert!(!lu.decompose(&a));
    }

    #[test]
    fn quality_of_identity() {
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&DenseMatrix::<f64>::identity(4)));
        assert_eq!(lu.quality(), 1.0);
        assert!(!lu.is_singular());
    }

    #[test]
    fn buffers_grow_then_shrinking_input_reuses_them() {
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&DenseMatrix::<f64>::identity(5)));

        let a = DenseMatrix::from_rows(&[[3.0_f64, 8.0], [4.0, 6.0]]);
        assert!(lu.decompose(&a));
        assert!((lu.determinant() - (-14.0)).abs() < 1e-12);
        assert_eq!(lu.lu_matrix().num_rows(), 2);
    }

    #[test]
    fn pivot_sign_tracks_swaps() {
        // Column 0 pivots on the 4, exchanging the two rows once.
        let a = DenseMatrix::from_rows(&[[3.0_f64, 8.0], [4.0, 6.0]]);
        let mut lu = LuDecomposition::new();
        assert!(lu.decompose(&a));
        assert_eq!(lu.row_pivots(), &[1, 0]);
    }

    #[test]
    fn input_is_not_modified() {
        let mut a = DenseMatrix::from_rows(&[[3.0_f64, 8.0], [4.0, 6.0]]);
        let copy = a.clone();
        let mut lu = LuDecomposition::new();
        assert!(Decomposition::decompose(&mut lu, &mut a));
        assert!(!lu.input_modified());
        assert_eq!(a, copy);
    }
}
