//! Block-major storage: a borrowed view type and in-place layout conversion.
//!
//! Block layout partitions a matrix into `block_length` square tiles (edge
//! tiles smaller), stored tile-by-tile in row-major tile order with each tile
//! row-major internally. Every tile is therefore one contiguous run of the
//! buffer, which is what the cache-blocked decompositions rely on.
//!
//! The conversions reorder a row-major buffer in place, one band of
//! `block_length` rows at a time, through a scratch buffer of
//! `min(block_length, num_rows) * num_cols` elements. Buffer length never
//! changes; only element order does.

use crate::matrix::DenseMatrix;

/// Scratch length required to convert a `num_rows x num_cols` buffer.
#[inline]
pub fn convert_scratch_len(num_rows: usize, num_cols: usize, block_length: usize) -> usize {
    block_length.min(num_rows) * num_cols
}

/// Reorder `data` from row-major to block-major in place.
///
/// `tmp` must hold at least [`convert_scratch_len`] elements.
pub fn row_to_block<T: Copy>(
    num_rows: usize,
    num_cols: usize,
    block_length: usize,
    data: &mut [T],
    tmp: &mut [T],
) {
    assert!(block_length > 0, "block length must be positive");
    assert_eq!(
        data.len(),
        num_rows * num_cols,
        "buffer length {} does not match {}x{} matrix",
        data.len(),
        num_rows,
        num_cols,
    );
    let min_len = convert_scratch_len(num_rows, num_cols, block_length);
    assert!(
        tmp.len() >= min_len,
        "scratch length {} below required {}",
        tmp.len(),
        min_len,
    );

    let mut i = 0;
    while i < num_rows {
        let block_height = block_length.min(num_rows - i);
        let band = block_height * num_cols;
        tmp[..band].copy_from_slice(&data[i * num_cols..i * num_cols + band]);

        let mut j = 0;
        while j < num_cols {
            let block_width = block_length.min(num_cols - j);
            let mut index_dst = i * num_cols + block_height * j;
            let mut index_src = j;
            for _ in 0..block_height {
                data[index_dst..index_dst + block_width]
                    .copy_from_slice(&tmp[index_src..index_src + block_width]);
                index_dst += block_width;
                index_src += num_cols;
            }
            j += block_length;
        }
        i += block_length;
    }
}

/// Reorder `data` from block-major back to row-major in place.
///
/// Exact inverse of [`row_to_block`]: the round trip is bit-for-bit identity.
pub fn block_to_row<T: Copy>(
    num_rows: usize,
    num_cols: usize,
    block_length: usize,
    data: &mut [T],
    tmp: &mut [T],
) {
    assert!(block_length > 0, "block length must be positive");
    assert_eq!(
        data.len(),
        num_rows * num_cols,
        "buffer length {} does not match {}x{} matrix",
        data.len(),
        num_rows,
        num_cols,
    );
    let min_len = convert_scratch_len(num_rows, num_cols, block_length);
    assert!(
        tmp.len() >= min_len,
        "scratch length {} below required {}",
        tmp.len(),
        min_len,
    );

    let mut i = 0;
    while i < num_rows {
        let block_height = block_length.min(num_rows - i);

        let mut j = 0;
        while j < num_cols {
            let block_width = block_length.min(num_cols - j);
            let mut index_src = i * num_cols + block_height * j;
            let mut index_dst = j;
            for _ in 0..block_height {
                tmp[index_dst..index_dst + block_width]
                    .copy_from_slice(&data[index_src..index_src + block_width]);
                index_src += block_width;
                index_dst += num_cols;
            }
            j += block_length;
        }

        let band = block_height * num_cols;
        data[i * num_cols..i * num_cols + band].copy_from_slice(&tmp[..band]);
        i += block_length;
    }
}

/// Mutable view of a buffer in block-major layout.
///
/// Borrows the storage of a [`DenseMatrix`] (or any buffer) for the duration
/// of a block-native algorithm; the borrow checker guarantees the owner
/// cannot be resized or read through the row-major interpretation while the
/// view is alive. The view does not convert anything itself — the buffer must
/// already be in block layout, normally via [`row_to_block`].
#[derive(Debug)]
pub struct BlockMatrix<'a, T> {
    data: &'a mut [T],
    num_rows: usize,
    num_cols: usize,
    block_length: usize,
}

impl<'a, T: Copy> BlockMatrix<'a, T> {
    pub fn new(
        data: &'a mut [T],
        num_rows: usize,
        num_cols: usize,
        block_length: usize,
    ) -> Self {
        assert!(block_length > 0, "block length must be positive");
        assert_eq!(
            data.len(),
            num_rows * num_cols,
            "buffer length {} does not match {}x{} matrix",
            data.len(),
            num_rows,
            num_cols,
        );
        Self {
            data,
            num_rows,
            num_cols,
            block_length,
        }
    }

    /// Borrow `m`'s storage as a block view. The contents must already be in
    /// block layout.
    pub fn of(m: &'a mut DenseMatrix<T>, block_length: usize) -> Self {
        let num_rows = m.num_rows();
        let num_cols = m.num_cols();
        Self::new(m.data_mut(), num_rows, num_cols, block_length)
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn block_length(&self) -> usize {
        self.block_length
    }

    /// Flat index of `(row, col)` in block layout.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        let band = row - row % self.block_length;
        let block_height = self.block_length.min(self.num_rows - band);
        let tile_col = col - col % self.block_length;
        let block_width = self.block_length.min(self.num_cols - tile_col);
        band * self.num_cols
            + block_height * tile_col
            + (row - band) * block_width
            + (col - tile_col)
    }

    /// Flat index of the first element of the tile containing `(row, col)`,
    /// plus the tile's height and width. The tile occupies
    /// `start..start + height * width` contiguously.
    #[inline]
    pub fn tile_of(&self, row: usize, col: usize) -> (usize, usize, usize) {
        let band = row - row % self.block_length;
        let block_height = self.block_length.min(self.num_rows - band);
        let tile_col = col - col % self.block_length;
        let block_width = self.block_length.min(self.num_cols - tile_col);
        (
            band * self.num_cols + block_height * tile_col,
            block_height,
            block_width,
        )
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.num_rows,
            self.num_cols,
        );
        self.data[self.index_of(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.num_rows && col < self.num_cols,
            "index ({row}, {col}) out of range for {}x{} matrix",
            self.num_rows,
            self.num_cols,
        );
        let idx = self.index_of(row, col);
        self.data[idx] = value;
    }

    /// The raw block-layout buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        self.data
    }

    /// The raw block-layout buffer, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }
}
