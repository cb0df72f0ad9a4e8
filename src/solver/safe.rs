use crate::matrix::DenseMatrix;
use crate::solver::LinearSolver;
use crate::traits::LinalgScalar;

/// Decorator that keeps the caller's matrices out of the wrapped solver's
/// workspace.
///
/// When the inner solver reports `modifies_a` or `modifies_b`, the
/// corresponding matrix is copied into an internal buffer before being
/// handed down, so the originals always come back untouched. The buffers
/// are reused across calls; solvers that already leave their inputs alone
/// are passed through without copying.
///
/// # Examples
///
/// ```
/// use numat::DenseMatrix;
/// use numat::solver::{LinearSolver, LinearSolverChol, SafeLinearSolver};
///
/// let mut a = DenseMatrix::from_rows(&[[4.0, 2.0], [2.0, 3.0]]);
/// let snapshot = a.clone();
///
/// let mut solver = SafeLinearSolver::new(LinearSolverChol::new());
/// assert!(solver.set_a(&mut a));
/// assert_eq!(a, snapshot);
/// ```
#[derive(Debug)]
pub struct SafeLinearSolver<T, S> {
    alg: S,
    a: DenseMatrix<T>,
    b: DenseMatrix<T>,
}

impl<T: LinalgScalar, S: LinearSolver<T>> SafeLinearSolver<T, S> {
    pub fn new(alg: S) -> Self {
        Self {
            alg,
            a: DenseMatrix::zeros(0, 0),
            b: DenseMatrix::zeros(0, 0),
        }
    }

    /// The wrapped solver.
    pub fn inner(&self) -> &S {
        &self.alg
    }

    /// Unwrap, discarding the copy buffers.
    pub fn into_inner(self) -> S {
        self.alg
    }
}

impl<T: LinalgScalar, S: LinearSolver<T>> LinearSolver<T> for SafeLinearSolver<T, S> {
    fn set_a(&mut self, a: &mut DenseMatrix<T>) -> bool {
        if self.alg.modifies_a() {
            self.a.copy_from(a);
            self.alg.set_a(&mut self.a)
        } else {
            self.alg.set_a(a)
        }
    }

    fn solve(&mut self, b: &mut DenseMatrix<T>, x: &mut DenseMatrix<T>) {
        if self.alg.modifies_b() {
            self.b.copy_from(b);
            self.alg.solve(&mut self.b, x)
        } else {
            self.alg.solve(b, x)
        }
    }

    fn invert(&mut self, inv: &mut DenseMatrix<T>) {
        self.alg.invert(inv)
    }

    fn quality(&self) -> T::Real {
        self.alg.quality()
    }

    fn modifies_a(&self) -> bool {
        false
    }

    fn modifies_b(&self) -> bool {
        false
    }
}
