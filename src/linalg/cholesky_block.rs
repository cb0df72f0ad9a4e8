use num_traits::Zero;

use crate::block::BlockMatrix;
use crate::linalg::cholesky::cholesky_lower;
use crate::linalg::BlockDecomposition;
use crate::traits::LinalgScalar;

/// Solve `X * L^H = B` in place, one tile at a time. `l` is the factored
/// `w x w` diagonal tile, `b` an `h x w` tile below it. Each row of `b` is
/// independent, so the walk stays inside the two contiguous tiles.
fn tile_solve_conj_tran<T: LinalgScalar>(l: &[T], w: usize, b: &mut [T], h: usize) {
    for r in 0..h {
        let row = r * w;
        for c in 0..w {
            let mut sum = b[row + c];
            for s in 0..c {
                sum -= b[row + s] * l[c * w + s].conj();
            }
            b[row + c] = sum / l[c * w + c];
        }
    }
}

/// Cholesky decomposition in block-major layout, outer product form.
///
/// Steps down the block diagonal: factor the diagonal tile, triangular-solve
/// the panel of tiles below it against the tile's `L^H`, then subtract the
/// panel's outer product from the trailing tiles. Every operation runs over
/// whole contiguous tiles, which is what makes this form worthwhile for
/// matrices too large for [`CholeskyDecomposition`] to stream efficiently.
///
/// The factor replaces the input's lower triangle; the strict upper triangle
/// is zeroed on success. Not positive definite input is reported as `false`
/// as soon as a diagonal tile fails to factor.
///
/// [`CholeskyDecomposition`]: crate::linalg::CholeskyDecomposition
#[derive(Debug, Default)]
pub struct BlockCholeskyOuter;

impl BlockCholeskyOuter {
    pub fn new() -> Self {
        Self
    }
}

impl<T: LinalgScalar> BlockDecomposition<T> for BlockCholeskyOuter {
    fn decompose(&mut self, a: &mut BlockMatrix<'_, T>) -> bool {
        let n = a.num_cols();
        assert_eq!(
            a.num_rows(),
            n,
            "Cholesky decomposition requires a square matrix"
        );
        if n == 0 {
            return false;
        }
        let bl = a.block_length();

        let mut i = 0;
        while i < n {
            let w = bl.min(n - i);
            let (diag_start, _, _) = a.tile_of(i, i);

            {
                let data = a.data_mut();
                if !cholesky_lower(&mut data[diag_start..diag_start + w * w], w) {
                    return false;
                }
            }

            // Panel solve: every tile below the diagonal becomes B * L^-H.
            let mut k = i + w;
            while k < n {
                let h = bl.min(n - k);
                let (b_start, _, _) = a.tile_of(k, i);
                let data = a.data_mut();
                let (head, tail) = data.split_at_mut(b_start);
                tile_solve_conj_tran(
                    &head[diag_start..diag_start + w * w],
                    w,
                    &mut tail[..h * w],
                    h,
                );
                k += bl;
            }

            // Trailing update: C[p][q] -= B[p] * B[q]^H for the lower tiles.
            let mut p = i + w;
            while p < n {
                let hp = bl.min(n - p);
                let (bp_start, _, _) = a.tile_of(p, i);

                let mut q = i + w;
                while q <= p {
                    let hq = bl.min(n - q);
                    let (bq_start, _, _) = a.tile_of(q, i);
                    let (c_start, _, _) = a.tile_of(p, q);

                    // Both panel tiles precede the target tile in the buffer.
                    let data = a.data_mut();
                    let (head, tail) = data.split_at_mut(c_start);
                    let bp = &head[bp_start..bp_start + hp * w];
                    let bq = &head[bq_start..bq_start + hq * w];
                    let c = &mut tail[..hp * hq];

                    for r in 0..hp {
                        for col in 0..hq {
                            let mut sum = c[r * hq + col];
                            for s in 0..w {
                                sum -= bp[r * w + s] * bq[col * w + s].conj();
                            }
                            c[r * hq + col] = sum;
                        }
                    }
                    q += bl;
                }
                p += bl;
            }

            i += bl;
        }

        for r in 0..n {
            for c in r + 1..n {
                a.set(r, c, T::zero());
            }
        }
        true
    }

    fn input_modified(&self) -> bool {
        true
    }
}
