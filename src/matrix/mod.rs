mod norm;
mod ops;
mod solve;

pub use norm::diff_norm_f;
pub use ops::{mult, transpose};

use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Dynamically-sized dense matrix.
///
/// Row-major `Vec<T>` storage: element `(row, col)` lives at
/// `row * num_cols + col`. Dimensions are set at runtime and may be changed
/// with [`reshape`](DenseMatrix::reshape); the buffer is reused when large
/// enough. Complex matrices use `Complex<T>` elements, which keeps the
/// underlying buffer in interleaved `re, im` order.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
///
/// let a = DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.num_rows(), 2);
/// assert_eq!(a.num_cols(), 2);
///
/// let b = DenseMatrix::<f64>::identity(3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    num_rows: usize,
    num_cols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DenseMatrix<T> {
    /// Create a `num_rows x num_cols` matrix of zeros.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let m = DenseMatrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.num_rows(), 2);
    /// assert_eq!(m.num_cols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Create a matrix filled with a given value.
    pub fn fill(num_rows: usize, num_cols: usize, value: T) -> Self {
        Self {
            data: vec![value; num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let id = DenseMatrix::<f64>::identity(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(2, 0)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Create a square matrix with `values` on the diagonal, zero elsewhere.
    pub fn diag(values: &[T]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Create a matrix from nested row arrays.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let m = DenseMatrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self {
        let mut data = Vec::with_capacity(rows.len() * N);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self {
            data,
            num_rows: rows.len(),
            num_cols: N,
        }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `slice.len() != num_rows * num_cols`.
    ///
    /// ```
    /// use numat::DenseMatrix;
    /// let m = DenseMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_row_slice(num_rows: usize, num_cols: usize, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            num_rows * num_cols,
            "slice length {} does not match {}x{} matrix",
            slice.len(),
            num_rows,
            num_cols,
        );
        Self {
            data: slice.to_vec(),
            num_rows,
            num_cols,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in row-major order.
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            num_rows * num_cols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            num_rows,
            num_cols,
        );
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(num_rows: usize, num_cols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for i in 0..num_rows {
            for j in 0..num_cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Change the matrix dimensions.
    ///
    /// The buffer is reallocated only when the new element count exceeds the
    /// current capacity; it never shrinks, so repeated reshapes on a reused
    /// matrix settle into a single allocation. With `preserve == true` the
    /// old contents are kept in flat row-major order (truncated or
    /// zero-extended); with `preserve == false` the contents afterward are
    /// unspecified.
    pub fn reshape(&mut self, num_rows: usize, num_cols: usize, preserve: bool) {
        let len = num_rows * num_cols;
        if !preserve && self.data.capacity() < len {
            self.data = vec![T::zero(); len];
        } else {
            self.data.resize(len, T::zero());
        }
        self.num_rows = num_rows;
        self.num_cols = num_cols;
    }

    /// Reshape to `src`'s dimensions and copy its contents.
    pub fn copy_from(&mut self, src: &DenseMatrix<T>) {
        self.reshape(src.num_rows, src.num_cols, false);
        self.data.copy_from_slice(&src.data);
    }

    /// Set an element, panicking when the index is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.num_rows,
            self.num_cols,
        );
        self.data[row * self.num_cols + col] = value;
    }

    /// Set an element without a bounds check.
    ///
    /// # Safety
    ///
    /// `row < num_rows` and `col < num_cols` must hold.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: T) {
        let idx = row * self.num_cols + col;
        *self.data.get_unchecked_mut(idx) = value;
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Get an element, panicking when the index is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.num_rows,
            self.num_cols,
        );
        self.data[row * self.num_cols + col]
    }

    /// Get an element without a bounds check.
    ///
    /// # Safety
    ///
    /// `row < num_rows` and `col < num_cols` must hold.
    #[inline]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        *self.data.get_unchecked(row * self.num_cols + col)
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        assert!(
            a < self.num_rows && b < self.num_rows,
            "row index out of range for {}x{} matrix",
            self.num_rows,
            self.num_cols,
        );
        if a == b {
            return;
        }
        let n = self.num_cols;
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.data.split_at_mut(hi * n);
        head[lo * n..lo * n + n].swap_with_slice(&mut tail[..n]);
    }
}

impl<T> DenseMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Total number of elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Whether the matrix is a row or column vector.
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.num_rows == 1 || self.num_cols == 1
    }

    /// Flat row-major view of the storage.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat row-major view of the storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.num_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.num_cols + col]
    }
}
