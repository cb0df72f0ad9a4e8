use num_traits::{One, Zero};

use crate::linalg::LuDecomposition;
use crate::matrix::DenseMatrix;
use crate::solver::LinearSolver;
use crate::traits::LinalgScalar;

/// Square-system solver backed by [`LuDecomposition`].
///
/// The decomposition copies the coefficient matrix, so the caller's `A` is
/// left intact. Each right-hand-side column is staged through the
/// decomposition's scratch vector and solved by permutation replay plus two
/// triangular substitutions; inversion solves against identity columns,
/// which the forward pass handles cheaply by skipping leading zeros.
#[derive(Debug, Default)]
pub struct LinearSolverLu<T: LinalgScalar> {
    decomp: LuDecomposition<T>,
    n: usize,
}

impl<T: LinalgScalar> LinearSolverLu<T> {
    pub fn new() -> Self {
        Self {
            decomp: LuDecomposition::new(),
            n: 0,
        }
    }

    /// The decomposition backing this solver.
    pub fn decomposition(&self) -> &LuDecomposition<T> {
        &self.decomp
    }
}

impl<T: LinalgScalar> LinearSolver<T> for LinearSolverLu<T> {
    /// Returns `false` for an empty matrix or when the factorization is
    /// singular to working precision.
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        assert!(
            a.is_square(),
            "LU solver requires a square matrix, got {}x{}",
            a.num_rows(),
            a.num_cols(),
        );
        self.n = a.num_rows();
        if !self.decomp.decompose(a) {
            return false;
        }
        !self.decomp.is_singular()
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

        for j in 0..cols {
            let vv = self.decomp.vv_mut();
            for i in 0..n {
                vv[i] = b.get(i, j);
            }
            self.decomp.solve_vector_internal();
            let vv = self.decomp.vv();
            for i in 0..n {
                x.set(i, j, vv[i]);
            }
        }
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        let n = self.n;
        inv.reshape(n, n, false);

        for j in 0..n {
            let vv = self.decomp.vv_mut();
            for i in 0..n {
                vv[i] = if i == j { T::one() } else { T::zero() };
            }
            self.decomp.solve_vector_internal();
            let vv = self.decomp.vv();
            for i in 0..n {
                inv.set(i, j, vv[i]);
            }
        }
    }

    fn quality(&self) -> T::Real {
        self.decomp.quality()
    }

    fn modifies_a(&self) -> bool {
        false
    }

    fn modifies_b(&self) -> bool {
        false
    }
}
