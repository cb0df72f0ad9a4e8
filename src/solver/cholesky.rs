use num_traits::{One, Zero};

use crate::linalg::{
    quality_triangular, triangular, BlockCholeskyOuter, BlockDecompositionAdapter,
    CholeskyDecomposition, Decomposition,
};
use crate::matrix::DenseMatrix;
use crate::params::BLOCK_WIDTH;
use crate::solver::LinearSolver;
use crate::traits::LinalgScalar;

/// Solver for (Hermitian) positive-definite systems backed by
/// [`CholeskyDecomposition`].
///
/// The decomposition claims the coefficient matrix as workspace, so
/// `modifies_a` is `true`. Each right-hand-side column runs a forward
/// substitution through `L` followed by a conjugate-transposed back
/// substitution, roughly half the work of the LU solve.
#[derive(Debug, Default)]
pub struct LinearSolverChol<T: LinalgScalar> {
    decomp: CholeskyDecomposition<T>,
    vv: Vec<T>,
    n: usize,
}

impl<T: LinalgScalar> LinearSolverChol<T> {
    pub fn new() -> Self {
        Self {
            decomp: CholeskyDecomposition::new(),
            vv: Vec::new(),
            n: 0,
        }
    }

    /// The decomposition backing this solver.
    pub fn decomposition(&self) -> &CholeskyDecomposition<T> {
        &self.decomp
    }
}

impl<T: LinalgScalar> LinearSolver<T> for LinearSolverChol<T> {
    /// Returns `false` when the matrix is empty or not positive definite.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        self.n = a.num_rows();
        if !self.decomp.decompose(a) {
            return false;
        }
        if self.vv.len() < self.n {
            self.vv.resize(self.n, T::zero());
        }
        true
    }

    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>) {
        let n = self.n;
        assert_eq!(
            b.num_rows(),
            n,
            "right-hand side rows {} do not match system size {}",
            b.num_rows(),
            n,
        );
        let cols = b.num_cols();
        x.reshape(n, cols, false);

        let l = self.decomp.factor().data();
        let vv = &mut self.vv[..n];
        for j in 0..cols {
            for i in 0..n {
                vv[i] = b.get(i, j);
            }
            triangular::solve_l(l, vv, n);
            triangular::solve_conj_tran_l(l, vv, n);
            for i in 0..n {
                x.set(i, j, vv[i]);
            }
        }
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        let n = self.n;
        inv.reshape(n, n, false);

        let l = self.decomp.factor().data();
        let vv = &mut self.vv[..n];
        for j in 0..n {
            for i in 0..n {
                vv[i] = if i == j { T::one() } else { T::zero() };
            }
            triangular::solve_l(l, vv, n);
            triangular::solve_conj_tran_l(l, vv, n);
            for i in 0..n {
                inv.set(i, j, vv[i]);
            }
        }
    }

    fn quality(&self) -> T::Real {
        quality_triangular(self.decomp.factor())
    }

    fn modifies_a(&self) -> bool {
        true
    }

    fn modifies_b(&self) -> bool {
        false
    }
}

/// Block-layout variant of [`LinearSolverChol`] for large systems.
///
/// `set_a` claims the coefficient matrix, converts it to block layout,
/// factors tile by tile through [`BlockCholeskyOuter`] and converts the
/// factor back to row layout. Solves then share the same substitution
/// kernels as the inner-product solver, so only the decomposition itself
/// pays the conversion round trip.
#[derive(Debug)]
pub struct LinearSolverCholBlock<T: LinalgScalar> {
    adapter: BlockDecompositionAdapter<T, BlockCholeskyOuter>,
    factor: DenseMatrix<T>,
    vv: Vec<T>,
    n: usize,
}

impl<T: LinalgScalar> LinearSolverCholBlock<T> {
    pub fn new() -> Self {
        Self::with_block_length(BLOCK_WIDTH)
    }

    /// Use a specific tile edge instead of [`BLOCK_WIDTH`].
    pub fn with_block_length(block_length: usize) -> Self {
        Self {
            adapter: BlockDecompositionAdapter::new(BlockCholeskyOuter::new(), block_length),
            factor: DenseMatrix::zeros(0, 0),
            vv: Vec::new(),
            n: 0,
        }
    }

    /// The row-layout Cholesky factor from the last successful `set_a`.
    pub fn factor(&self) -> &DenseMatrix<T> {
        &self.factor
    }
}

impl<T: LinalgScalar> Default for LinearSolverCholBlock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LinalgScalar> LinearSolver<T> for LinearSolverCholBlock<T> {
    /// Returns `false` when the matrix is empty or not positive definite.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        assert!(
            a.is_square(),
            "Cholesky solver requires a square matrix, got {}x{}",
            a.num_rows(),
            a.num_cols(),
        );
        self.n = a.num_rows();
        if self.n == 0 {
            return false;
        }

        core::mem::swap(&mut self.factor, a);
        if !self.adapter.decompose(&mut self.factor) {
            return false;
        }
        self.adapter.convert_block_to_row(&mut self.factor);

        if self.vv.len() < self.n {
            self.vv.resize(self.n, T::zero());
        }
        true
    }

    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>) {
        let n = self.n;
        assert_eq!(
            b.num_rows(),
            n,
            "right-hand side rows {} do not match system size {}",
            b.num_rows(),
            n,
        );
        let cols = b.num_cols();
        x.reshape(n, cols, false);

        let l = self.factor.data();
        let vv = &mut self.vv[..n];
        for j in 0..cols {
            for i in 0..n {
                vv[i] = b.get(i, j);
            }
            triangular::solve_l(l, vv, n);
            triangular::solve_conj_tran_l(l, vv, n);
            for i in 0..n {
                x.set(i, j, vv[i]);
            }
        }
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        let n = self.n;
        inv.reshape(n, n, false);

        let l = self.factor.data();
        let vv = &mut self.vv[..n];
        for j in 0..n {
            for i in 0..n {
                vv[i] = if i == j { T::one() } else { T::zero() };
            }
            triangular::solve_l(l, vv, n);
            triangular::solve_conj_tran_l(l, vv, n);
            for i in 0..n {
                inv.set(i, j, vv[i]);
            }
        }
    }

    fn quality(&self) -> T::Real {
        quality_triangular(&self.factor)
    }

    fn modifies_a(&self) -> bool {
        true
    }

    fn modifies_b(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{diff_norm_f, mult};
    use num_complex::Complex;

    fn spd_3x3() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[
            [1.0, 2.0, 4.0],
            [2.0, 13.0, 23.0],
            [4.0, 23.0, 90.0],
        ])
    }

    /// Diagonally dominant, hence positive definite, any size.
    fn spd(n: usize) -> DenseMatrix<f64> {
        DenseMatrix::from_fn(n, n, |i, j| {
            let off = 1.0 / (1.0 + (i as f64 - j as f64).abs());
            if i == j {
                off + n as f64
            } else {
                off
            }
        })
    }

    #[test]
    fn solves_known_system() {
        let mut a = spd_3x3();
        let mut solver = LinearSolverChol::new();
        assert!(solver.set_a(&mut a));

        let mut b = DenseMatrix::from_row_slice(3, 1, &[17.0, 97.0, 320.0]);
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);

        for (i, expected) in [1.0, 2.0, 3.0].iter().enumerate() {
            assert!((x[(i, 0)] - expected).abs() < 1e-8, "x[{i}] = {}", x[(i, 0)]);
        }
    }

    #[test]
    fn invert_matches_reference() {
        let mut a = spd_3x3();
        let mut solver = LinearSolverChol::new();
        assert!(solver.set_a(&mut a));

        let mut inv = DenseMatrix::zeros(0, 0);
        solver.invert(&mut inv);

        let expected = DenseMatrix::from_rows(&[
            [1.453515, -0.199546, -0.013605],
            [-0.199546, 0.167800, -0.034014],
            [-0.013605, -0.034014, 0.020408],
        ]);
        assert!(diff_norm_f(&inv, &expected) < 1e-5);
    }

    #[test]
    fn rejects_indefinite() {
        let mut a = DenseMatrix::from_rows(&[[1.0_f64, 5.0], [5.0, 1.0]]);
        let mut solver = LinearSolverChol::new();
        assert!(!solver.set_a(&mut a));
    }

    #[test]
    fn claims_input_as_workspace() {
        let mut a = spd_3x3();
        let mut solver = LinearSolverChol::new();
        assert!(solver.modifies_a());
        assert!(solver.set_a(&mut a));
        assert_ne!(a, spd_3x3());
    }

    #[test]
    fn hermitian_complex_system() {
        type C = Complex<f64>;
        let c = |re: f64, im: f64| C::new(re, im);

        let a = DenseMatrix::from_rows(&[
            [c(2.0, 0.0), c(1.0, -1.0)],
            [c(1.0, 1.0), c(3.0, 0.0)],
        ]);
        let x_true = DenseMatrix::from_row_slice(2, 1, &[c(1.0, 2.0), c(-0.5, 1.0)]);
        let mut b = DenseMatrix::zeros(0, 0);
        mult(&a, &x_true, &mut b);

        let mut work = a.clone();
        let mut solver = LinearSolverChol::new();
        assert!(solver.set_a(&mut work));
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);

        for i in 0..2 {
            assert!((x[(i, 0)] - x_true[(i, 0)]).norm() < 1e-12);
        }
    }

    #[test]
    fn block_matches_inner_across_tile_boundary() {
        // Larger than one tile so the panel and trailing updates run.
        let n = 13;
        let a = spd(n);
        let x_true = DenseMatrix::from_fn(n, 1, |i, _| i as f64 - 3.5);
        let mut b = DenseMatrix::zeros(0, 0);
        mult(&a, &x_true, &mut b);

        let mut inner = LinearSolverChol::new();
        let mut work = a.clone();
        assert!(inner.set_a(&mut work));
        let mut x_inner = DenseMatrix::zeros(0, 0);
        inner.solve(&mut b.clone(), &mut x_inner);

        let mut block = LinearSolverCholBlock::with_block_length(4);
        let mut work = a.clone();
        assert!(block.set_a(&mut work));
        let mut x_block = DenseMatrix::zeros(0, 0);
        block.solve(&mut b, &mut x_block);

        assert!(diff_norm_f(&x_inner, &x_true) < 1e-10);
        assert!(diff_norm_f(&x_block, &x_true) < 1e-10);
        assert!(diff_norm_f(&block.factor, inner.decomp.factor()) < 1e-10);
    }

    #[test]
    fn block_default_tile_on_small_input() {
        // Smaller than BLOCK_WIDTH, a single edge tile.
        let mut a = spd_3x3();
        let mut solver = LinearSolverCholBlock::new();
        assert!(solver.set_a(&mut a));

        let mut b = DenseMatrix::from_row_slice(3, 1, &[17.0, 97.0, 320.0]);
        let mut x = DenseMatrix::zeros(0, 0);
        solver.solve(&mut b, &mut x);
        for (i, expected) in [1.0, 2.0, 3.0].iter().enumerate() {
            assert!((x[(i, 0)] - expected).abs() < 1e-8);
        }
    }

    #[test]
    fn block_rejects_indefinite() {
        let mut a = DenseMatrix::from_rows(&[[1.0_f64, 5.0], [5.0, 1.0]]);
        let mut solver = LinearSolverCholBlock::with_block_length(2);
        assert!(!solver.set_a(&mut a));
    }

    #[test]
    fn block_invert_matches_identity() {
        let n = 9;
        let a = spd(n);
        let mut work = a.clone();
        let mut solver = LinearSolverCholBlock::with_block_length(4);
        assert!(solver.set_a(&mut work));

        let mut inv = DenseMatrix::zeros(0, 0);
        solver.invert(&mut inv);

        let mut prod = DenseMatrix::zeros(0, 0);
        mult(&a, &inv, &mut prod);
        assert!(diff_norm_f(&prod, &DenseMatrix::identity(n)) < 1e-9);
    }

    #[test]
    fn quality_tracks_conditioning() {
        let mut well = DenseMatrix::<f64>::diag(&[2.0, 2.0, 2.0]);
        let mut badly = DenseMatrix::<f64>::diag(&[2.0, 2.0, 1e-6]);

        let mut solver = LinearSolverChol::new();
        assert!(solver.set_a(&mut well));
        let q_well = solver.quality();
        assert!(solver.set_a(&mut badly));
        let q_badly = solver.quality();
        assert!(q_well > q_badly);
    }
}
