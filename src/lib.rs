//! # numat
//!
//! Dense linear algebra for real and complex matrices: decompositions,
//! linear solvers and the cache-aware kernels underneath them, with the
//! algorithm choice dispatched by matrix shape and size.
//!
//! ## Quick start
//!
//! ```
//! use numat::DenseMatrix;
//!
//! // Solve a linear system A * x = b
//! let a = DenseMatrix::from_rows(&[
//!     [2.0_f64, 1.0, -1.0],
//!     [-3.0, -1.0, 2.0],
//!     [-2.0, 1.0, 2.0],
//! ]);
//! let b = DenseMatrix::from_row_slice(3, 1, &[8.0, -11.0, -3.0]);
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//!
//! assert!((x[(0, 0)] - 2.0).abs() < 1e-12);
//! assert!((x[(1, 0)] - 3.0).abs() < 1e-12);
//! assert!((x[(2, 0)] + 1.0).abs() < 1e-12);
//! ```
//!
//! Repeated solves against one coefficient matrix should hold a solver and
//! pay the decomposition once:
//!
//! ```
//! use numat::DenseMatrix;
//! use numat::solver::{self, LinearSolver};
//!
//! let mut a = DenseMatrix::from_rows(&[[4.0_f64, 2.0], [2.0, 3.0]]);
//! let mut solver = solver::symmetric(a.num_rows());
//! assert!(solver.set_a(&mut a));
//!
//! let mut b = DenseMatrix::from_row_slice(2, 1, &[10.0, 8.0]);
//! let mut x = DenseMatrix::zeros(0, 0);
//! solver.solve(&mut b, &mut x);
//! assert!((x[(0, 0)] - 1.75).abs() < 1e-12);
//! assert!((x[(1, 0)] - 1.5).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated [`DenseMatrix<T>`] with runtime dimensions,
//!   row-major `Vec<T>` storage. Arithmetic operators, multiply and transpose
//!   with size-based kernel dispatch, Frobenius norms, and convenience
//!   methods `a.solve(&b)`, `a.inverse()`, `a.det()`, `a.lu()`,
//!   `a.cholesky()`, `a.qr()`, `a.svd()`, `a.pseudo_inverse()`.
//!
//! - [`block`] — Block-major tile layout for cache-friendly algorithms:
//!   in-place conversions between row and block order one band at a time,
//!   and the [`BlockMatrix`] view that block algorithms run on.
//!
//! - [`linalg`] — Decompositions: LU with partial pivoting (Crout), Cholesky
//!   `A = LL^H` in both inner-product and block-tiled form, Householder QR,
//!   and Golub-Kahan SVD. [`BlockDecompositionAdapter`](linalg::BlockDecompositionAdapter)
//!   runs a block algorithm behind the row-major interface.
//!
//! - [`solver`] — The [`LinearSolver`](solver::LinearSolver) contract:
//!   `set_a` once, then `solve`/`invert`/`quality` against the cached
//!   decomposition. Factory functions pick LU, Cholesky or QR from the
//!   matrix shape; [`SafeLinearSolver`](solver::SafeLinearSolver) keeps
//!   caller matrices out of solver workspace.
//!
//! - [`kernels`] — Unrolled cofactor-expansion determinant and inverse for
//!   matrices up to [`params::UNROLLED_MAX`] on a side.
//!
//! - [`params`] — The size thresholds steering kernel and solver dispatch.
//!
//! - [`traits`] — Element trait hierarchy: [`Scalar`] for anything storable,
//!   [`RealScalar`] for real floats, [`LinalgScalar`] for the elements the
//!   decompositions accept (real and complex floats through one code path).
//!
//! ## Complex matrices
//!
//! Every decomposition and solver except the SVD is generic over
//! [`LinalgScalar`], so `Complex<f32>` / `Complex<f64>` matrices work
//! through the same API: Cholesky generalizes to Hermitian `A = LL^H`, QR
//! uses complex Householder reflections, pivoting compares squared
//! magnitudes, and quality measures come back as real values.

pub mod block;
pub mod kernels;
pub mod linalg;
pub mod matrix;
pub mod params;
pub mod solver;
pub mod traits;

pub use block::BlockMatrix;
pub use linalg::LinalgError;
pub use matrix::{diff_norm_f, mult, transpose, DenseMatrix};
pub use solver::{LinearSolver, SafeLinearSolver};
pub use traits::{LinalgScalar, RealScalar, Scalar};

pub use num_complex::Complex;
