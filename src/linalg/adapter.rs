use num_traits::Zero;

use crate::block::{block_to_row, convert_scratch_len, row_to_block, BlockMatrix};
use crate::linalg::{BlockDecomposition, Decomposition};
use crate::matrix::DenseMatrix;
use crate::traits::LinalgScalar;

/// Presents a [`BlockDecomposition`] as an ordinary row-major
/// [`Decomposition`].
///
/// `decompose` converts the input to block layout in place, runs the wrapped
/// algorithm on a borrowed view, and converts back only when the algorithm
/// leaves the input unmodified. When the algorithm consumes its input the
/// buffer stays in block layout holding the factorization; callers that want
/// it row-major call [`convert_block_to_row`](Self::convert_block_to_row)
/// afterwards.
///
/// The conversion scratch buffer grows to the largest matrix seen and is
/// reused across calls.
#[derive(Debug)]
pub struct BlockDecompositionAdapter<T, D> {
    alg: D,
    block_length: usize,
    tmp: Vec<T>,
}

impl<T: LinalgScalar, D: BlockDecomposition<T>> BlockDecompositionAdapter<T, D> {
    pub fn new(alg: D, block_length: usize) -> Self {
        Self {
            alg,
            block_length,
            tmp: Vec::new(),
        }
    }

    pub fn block_length(&self) -> usize {
        self.block_length
    }

    /// The wrapped block algorithm.
    pub fn inner(&self) -> &D {
        &self.alg
    }

    fn grow_tmp(&mut self, num_rows: usize, num_cols: usize) {
        let needed = convert_scratch_len(num_rows, num_cols, self.block_length);
        if self.tmp.len() < needed {
            self.tmp.resize(needed, T::zero());
        }
    }

    /// Convert `a` from block layout back to row-major in place. Used after
    /// a decomposition that consumed its input.
    pub fn convert_block_to_row(&mut self, a: &mut DenseMatrix<T>) {
        let m = a.num_rows();
        let n = a.num_cols();
        self.grow_tmp(m, n);
        block_to_row(m, n, self.block_length, a.data_mut(), &mut self.tmp);
    }
}

impl<T: LinalgScalar, D: BlockDecomposition<T>> Decomposition<T>
    for BlockDecompositionAdapter<T, D>
{
    fn decompose(&mut self, a: &mut DenseMatrix<T>) -> bool {
        let m = a.num_rows();
        let n = a.num_cols();
        self.grow_tmp(m, n);

        row_to_block(m, n, self.block_length, a.data_mut(), &mut self.tmp);
        let ret = {
            let mut view = BlockMatrix::of(a, self.block_length);
            self.alg.decompose(&mut view)
        };
        if !self.alg.input_modified() {
            block_to_row(m, n, self.block_length, a.data_mut(), &mut self.tmp);
        }
        ret
    }

    fn input_modified(&self) -> bool {
        self.alg.input_modified()
    }
}
