//! Tuning constants for algorithm dispatch.
//!
//! These are fixed, documented trade-offs rather than runtime-measured values:
//! dispatch stays predictable and branchless at the call site. They were chosen
//! for typical L1/L2 sizes on commodity hardware and only affect performance,
//! never results.

/// Side length of the square tiles used by block-layout algorithms and the
/// tiled transpose. Edge tiles are smaller when a dimension is not a multiple.
pub const BLOCK_WIDTH: usize = 60;

/// Matrix multiply switches from the dot-product kernel to the reordered
/// row-accumulation kernel when the right-hand matrix has at least this many
/// columns.
pub const MULT_COLUMN_SWITCH: usize = 15;

/// Transpose switches to the cache-tiled kernel when both dimensions exceed
/// this value.
pub const TRANSPOSE_SWITCH: usize = 375;

/// Symmetric positive-definite solves switch from the inner-product Cholesky
/// to the block-layout Cholesky at this matrix width.
pub const SWITCH_BLOCK_CHOLESKY: usize = 1000;

/// Largest size handled by the unrolled cofactor-expansion determinant and
/// inverse kernels. Above this, the general LU path takes over.
pub const UNROLLED_MAX: usize = 4;
