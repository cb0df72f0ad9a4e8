use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;

use crate::params::{BLOCK_WIDTH, MULT_COLUMN_SWITCH, TRANSPOSE_SWITCH};
use crate::traits::Scalar;

use super::DenseMatrix;

// ── Multiply: kernels + shape dispatch ──────────────────────────────

/// Matrix multiply `c = a * b`, reshaping `c` as needed.
///
/// The kernel is chosen by shape: a dedicated loop when `b` is a column
/// vector, a reordered row-accumulation kernel when `b` is wide (at least
/// [`MULT_COLUMN_SWITCH`] columns, where the column-stride walk of the naive
/// loop starts missing cache), and the plain dot-product kernel otherwise.
/// All three produce identical results.
///
/// ```
/// use numat::{mult, DenseMatrix};
/// let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// let b = DenseMatrix::from_rows(&[[5.0], [6.0]]);
/// let mut c = DenseMatrix::<f64>::zeros(0, 0);
/// mult(&a, &b, &mut c);
/// assert_eq!(c[(0, 0)], 17.0);
/// assert_eq!(c[(1, 0)], 39.0);
/// ```
pub fn mult<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, c: &mut DenseMatrix<T>) {
    assert_eq!(
        a.num_cols, b.num_rows,
        "dimension mismatch: {}x{} * {}x{}",
        a.num_rows, a.num_cols, b.num_rows, b.num_cols,
    );
    c.reshape(a.num_rows, b.num_cols, false);
    if b.num_cols == 1 {
        mult_vector(a, b, c);
    } else if b.num_cols >= MULT_COLUMN_SWITCH {
        mult_reorder(a, b, c);
    } else {
        mult_small(a, b, c);
    }
}

/// Dot-product kernel: one pass per output element, walking `b` with a
/// column stride.
fn mult_small<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, c: &mut DenseMatrix<T>) {
    let n = a.num_cols;
    let p = b.num_cols;
    let mut c_index = 0;
    let mut a_start = 0;
    for _ in 0..a.num_rows {
        for j in 0..p {
            let mut total = T::zero();
            let mut index_a = a_start;
            let mut index_b = j;
            let end = index_a + n;
            while index_a < end {
                total = total + a.data[index_a] * b.data[index_b];
                index_a += 1;
                index_b += p;
            }
            c.data[c_index] = total;
            c_index += 1;
        }
        a_start += n;
    }
}

/// Reordered kernel: accumulates whole output rows so both `b` and `c` are
/// walked sequentially. The first term of each row assigns instead of
/// accumulating, so `c` needs no zero fill.
fn mult_reorder<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, c: &mut DenseMatrix<T>) {
    if a.num_rows == 0 || a.num_cols == 0 {
        c.data.fill(T::zero());
        return;
    }
    let n = a.num_cols;
    let p = b.num_cols;
    let end_of_k = n * p;
    let mut c_base = 0;
    for i in 0..a.num_rows {
        let mut index_a = i * n;
        let mut index_b = 0;

        let mut val_a = a.data[index_a];
        index_a += 1;
        let mut index_c = c_base;
        let mut end = index_b + p;
        while index_b < end {
            c.data[index_c] = val_a * b.data[index_b];
            index_c += 1;
            index_b += 1;
        }

        while index_b != end_of_k {
            val_a = a.data[index_a];
            index_a += 1;
            index_c = c_base;
            end = index_b + p;
            while index_b < end {
                c.data[index_c] = c.data[index_c] + val_a * b.data[index_b];
                index_c += 1;
                index_b += 1;
            }
        }
        c_base += p;
    }
}

/// Column-vector kernel: `c = a * b` where `b` is `n x 1`.
fn mult_vector<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>, c: &mut DenseMatrix<T>) {
    if a.num_cols == 0 {
        c.data.fill(T::zero());
        return;
    }
    let mut index_a = 0;
    for i in 0..a.num_rows {
        let mut total = a.data[index_a] * b.data[0];
        index_a += 1;
        for k in 1..a.num_cols {
            total = total + a.data[index_a] * b.data[k];
            index_a += 1;
        }
        c.data[i] = total;
    }
}

// ── Transpose: kernels + shape dispatch ─────────────────────────────

/// Transpose `src` into `dst`, reshaping `dst` as needed.
///
/// Uses a tiled kernel when both dimensions exceed [`TRANSPOSE_SWITCH`];
/// below that the straightforward column walk wins.
pub fn transpose<T: Scalar>(src: &DenseMatrix<T>, dst: &mut DenseMatrix<T>) {
    dst.reshape(src.num_cols, src.num_rows, false);
    if src.num_rows > TRANSPOSE_SWITCH && src.num_cols > TRANSPOSE_SWITCH {
        transpose_block(src, dst);
    } else {
        transpose_standard(src, dst);
    }
}

/// Each output row is one input column, walked with a stride.
fn transpose_standard<T: Scalar>(src: &DenseMatrix<T>, dst: &mut DenseMatrix<T>) {
    let mut index = 0;
    for i in 0..dst.num_rows {
        let mut index2 = i;
        let end = index + dst.num_cols;
        while index < end {
            dst.data[index] = src.data[index2];
            index += 1;
            index2 += src.num_cols;
        }
    }
}

/// Square kernel: swap every element above the diagonal with its mirror
/// below, touching no extra storage.
fn transpose_square<T: Scalar>(mat: &mut DenseMatrix<T>) {
    let n = mat.num_cols;
    for i in 0..n {
        let mut index = i * n + i + 1;
        let mut index_other = (i + 1) * n + i;
        let end = (i + 1) * n;
        while index < end {
            mat.data.swap(index, index_other);
            index += 1;
            index_other += n;
        }
    }
}

/// Tile-by-tile transpose keeping both source and destination accesses
/// inside one [`BLOCK_WIDTH`] square at a time.
fn transpose_block<T: Scalar>(src: &DenseMatrix<T>, dst: &mut DenseMatrix<T>) {
    let m = src.num_rows;
    let n = src.num_cols;
    let mut i0 = 0;
    while i0 < m {
        let i1 = (i0 + BLOCK_WIDTH).min(m);
        let mut j0 = 0;
        while j0 < n {
            let j1 = (j0 + BLOCK_WIDTH).min(n);
            for i in i0..i1 {
                for j in j0..j1 {
                    dst.data[j * m + i] = src.data[i * n + j];
                }
            }
            j0 = j1;
        }
        i0 = i1;
    }
}

impl<T: Scalar> DenseMatrix<T> {
    /// Transposed copy: (M×N) → (N×M).
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let a = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// let t = a.transpose();
    /// assert_eq!(t.num_rows(), 3);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.num_cols, self.num_rows);
        transpose(self, &mut out);
        out
    }

    /// In-place transpose. Square matrices swap across the diagonal without
    /// allocating; rectangular ones go through a buffered copy and take the
    /// transposed shape.
    pub fn transpose_in_place(&mut self) {
        if self.num_rows == self.num_cols {
            transpose_square(self);
        } else {
            let mut out = Self::zeros(self.num_cols, self.num_rows);
            transpose(self, &mut out);
            *self = out;
        }
    }

    /// Sum of the diagonal elements.
    pub fn trace(&self) -> T {
        let n = self.num_rows.min(self.num_cols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self.data[i * self.num_cols + i];
        }
        sum
    }

    /// Element-wise (Hadamard) product.
    pub fn element_mul(&self, rhs: &Self) -> Self {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch",
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a * b)
            .collect();
        DenseMatrix {
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Element-wise division.
    pub fn element_div(&self, rhs: &Self) -> Self {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch",
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a / b)
            .collect();
        DenseMatrix {
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

// ── Element-wise addition ───────────────────────────────────────────

impl<T: Scalar> Add for DenseMatrix<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self + &rhs
    }
}

impl<T: Scalar> Add<&DenseMatrix<T>> for DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn add(mut self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self += rhs;
        self
    }
}

impl<T: Scalar> Add<DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn add(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        rhs + self
    }
}

impl<T: Scalar> Add<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn add(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch: {}x{} + {}x{}",
            self.num_rows, self.num_cols, rhs.num_rows, rhs.num_cols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        DenseMatrix {
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl<T: Scalar> AddAssign for DenseMatrix<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign(&rhs);
    }
}

impl<T: Scalar> AddAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn add_assign(&mut self, rhs: &DenseMatrix<T>) {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch: {}x{} += {}x{}",
            self.num_rows, self.num_cols, rhs.num_rows, rhs.num_cols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub for DenseMatrix<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self - &rhs
    }
}

impl<T: Scalar> Sub<&DenseMatrix<T>> for DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn sub(mut self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        self -= rhs;
        self
    }
}

impl<T: Scalar> Sub<DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn sub(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        self - &rhs
    }
}

impl<T: Scalar> Sub<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn sub(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch: {}x{} - {}x{}",
            self.num_rows, self.num_cols, rhs.num_rows, rhs.num_cols,
        );
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a - b)
            .collect();
        DenseMatrix {
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl<T: Scalar> SubAssign for DenseMatrix<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign(&rhs);
    }
}

impl<T: Scalar> SubAssign<&DenseMatrix<T>> for DenseMatrix<T> {
    fn sub_assign(&mut self, rhs: &DenseMatrix<T>) {
        assert_eq!(
            (self.num_rows, self.num_cols),
            (rhs.num_rows, rhs.num_cols),
            "dimension mismatch: {}x{} -= {}x{}",
            self.num_rows, self.num_cols, rhs.num_rows, rhs.num_cols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for DenseMatrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for x in self.data.iter_mut() {
            *x = T::zero() - *x;
        }
        self
    }
}

impl<T: Scalar> Neg for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn neg(self) -> DenseMatrix<T> {
        self.clone().neg()
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ────────────────────

impl<T: Scalar> Mul for DenseMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&DenseMatrix<T>> for DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn mul(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;
    fn mul(self, rhs: DenseMatrix<T>) -> DenseMatrix<T> {
        self * &rhs
    }
}

impl<T: Scalar> Mul<&DenseMatrix<T>> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: &DenseMatrix<T>) -> DenseMatrix<T> {
        let mut c = DenseMatrix::zeros(self.num_rows, rhs.num_cols);
        mult(self, rhs, &mut c);
        c
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for DenseMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
        self
    }
}

impl<T: Scalar> Mul<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn mul(self, rhs: T) -> DenseMatrix<T> {
        self.clone() * rhs
    }
}

impl<T: Scalar> MulAssign<T> for DenseMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

/// `scalar * matrix` for the concrete element types (orphan rule keeps this
/// from being generic).
macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DenseMatrix<$t>> for $t {
                type Output = DenseMatrix<$t>;
                fn mul(self, rhs: &DenseMatrix<$t>) -> DenseMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64, i32, i64, Complex<f32>, Complex<f64>);

impl<T: Scalar> Div<T> for DenseMatrix<T> {
    type Output = Self;

    fn div(mut self, rhs: T) -> Self {
        for x in self.data.iter_mut() {
            *x = *x / rhs;
        }
        self
    }
}

impl<T: Scalar> Div<T> for &DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn div(self, rhs: T) -> DenseMatrix<T> {
        self.clone() / rhs
    }
}

impl<T: Scalar> DivAssign<T> for DenseMatrix<T> {
    fn div_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x / rhs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);

        let c = &a + &b;
        assert_eq!(c[(0, 0)], 6.0);
        assert_eq!(c[(1, 1)], 12.0);

        let d = &b - &a;
        assert_eq!(d[(0, 0)], 4.0);
        assert_eq!(d[(1, 1)], 4.0);
    }

    #[test]
    fn add_assign() {
        let mut a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        a += &b;
        assert_eq!(a[(0, 0)], 6.0);
        a -= &b;
        assert_eq!(a[(0, 0)], 1.0);
    }

    #[test]
    fn neg() {
        let a = DenseMatrix::from_rows(&[[1.0, -2.0], [3.0, -4.0]]);
        let b = -a;
        assert_eq!(b[(0, 0)], -1.0);
        assert_eq!(b[(0, 1)], 2.0);
    }

    #[test]
    fn matrix_multiply() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        let c = &a * &b;
        assert_eq!(c[(0, 0)], 19.0);
        assert_eq!(c[(0, 1)], 22.0);
        assert_eq!(c[(1, 0)], 43.0);
        assert_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn multiply_dim_mismatch() {
        let a = DenseMatrix::<f64>::zeros(2, 3);
        let b = DenseMatrix::<f64>::zeros(2, 2);
        let _ = &a * &b;
    }

    #[test]
    fn mult_kernels_agree() {
        // Wide enough that dispatch would pick the reordered kernel.
        let a = DenseMatrix::from_fn(7, 5, |i, j| (3 * i + j) as f64 * 0.71 - 4.0);
        let b = DenseMatrix::from_fn(5, 20, |i, j| (i * 20 + j) as f64 * 0.13);

        let mut small = DenseMatrix::zeros(7, 20);
        let mut reorder = DenseMatrix::zeros(7, 20);
        mult_small(&a, &b, &mut small);
        mult_reorder(&a, &b, &mut reorder);

        for (x, y) in small.data().iter().zip(reorder.data()) {
            assert!((x - y).abs() < 1e-12, "{x} != {y}");
        }
    }

    #[test]
    fn mult_vector_fast_path() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = DenseMatrix::from_row_slice(3, 1, &[1.0, 0.5, -1.0]);
        let c = &a * &b;
        assert_eq!(c.num_rows(), 2);
        assert_eq!(c.num_cols(), 1);
        assert_eq!(c[(0, 0)], -1.0);
        assert_eq!(c[(1, 0)], 0.5);
    }

    #[test]
    fn mult_zero_inner_dim() {
        let a = DenseMatrix::<f64>::zeros(3, 0);
        let b = DenseMatrix::<f64>::zeros(0, 16);
        let mut c = DenseMatrix::fill(3, 16, 9.0);
        mult(&a, &b, &mut c);
        assert!(c.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn scalar_multiply() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = &a * 3.0;
        assert_eq!(b[(0, 0)], 3.0);
        assert_eq!(b[(1, 1)], 12.0);

        let c = 3.0 * &a;
        assert_eq!(c, b);
    }

    #[test]
    fn scalar_divide_assign() {
        let mut a = DenseMatrix::from_rows(&[[2.0, 4.0], [6.0, 8.0]]);
        a /= 2.0;
        assert_eq!(a[(0, 0)], 1.0);
        a *= 2.0;
        assert_eq!(a[(0, 0)], 2.0);
    }

    #[test]
    fn transpose_rectangular() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = a.transpose();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t[(0, 0)], 1.0);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t[(2, 1)], 6.0);
    }

    #[test]
    fn transpose_kernels_agree() {
        let a = DenseMatrix::from_fn(130, 71, |i, j| (i * 71 + j) as f64);
        let mut standard = DenseMatrix::zeros(71, 130);
        let mut block = DenseMatrix::zeros(71, 130);
        transpose_standard(&a, &mut standard);
        transpose_block(&a, &mut block);
        assert_eq!(standard, block);
    }

    #[test]
    fn transpose_in_place_square() {
        let mut a = DenseMatrix::from_fn(5, 5, |i, j| (i * 5 + j) as f64);
        let expected = a.transpose();
        a.transpose_in_place();
        assert_eq!(a, expected);
        a.transpose_in_place();
        assert_eq!(a[(4, 0)], 20.0);
    }

    #[test]
    fn transpose_in_place_rectangular() {
        let mut a = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        a.transpose_in_place();
        assert_eq!(a.num_rows(), 3);
        assert_eq!(a.num_cols(), 2);
        assert_eq!(a[(2, 0)], 3.0);
        assert_eq!(a[(1, 1)], 5.0);
    }

    #[test]
    fn trace() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(a.trace(), 5.0);
    }

    #[test]
    fn element_ops() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);
        let c = a.element_mul(&b);
        assert_eq!(c[(1, 1)], 32.0);
        let d = c.element_div(&b);
        assert_eq!(d, a);
    }

    #[test]
    fn ref_variants() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let b = DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]);

        let sum1 = &a + &b;
        let sum2 = a.clone() + &b;
        let sum3 = &a + b.clone();
        let sum4 = a.clone() + b.clone();
        assert_eq!(sum1, sum2);
        assert_eq!(sum1, sum3);
        assert_eq!(sum1, sum4);
    }

    #[test]
    fn identity_multiply() {
        let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
        let id = DenseMatrix::<f64>::identity(2);
        assert_eq!(&a * &id, a);
        assert_eq!(&id * &a, a);
    }

    #[test]
    fn complex_multiply() {
        type C = Complex<f64>;
        let a = DenseMatrix::from_rows(&[[C::new(1.0, 1.0), C::new(0.0, -1.0)]]);
        let b = DenseMatrix::from_row_slice(2, 1, &[C::new(2.0, 0.0), C::new(0.0, 2.0)]);
        let c = &a * &b;
        // (1+i)*2 + (-i)*(2i) = 2+2i + 2 = 4+2i
        assert_eq!(c[(0, 0)], C::new(4.0, 2.0));
    }
}
