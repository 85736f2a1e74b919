//! Low-level BLAS kernel trait
//!
//! The dense matrix operations in [`LinalgOps`](super::LinalgOps) are built
//! on these three column-major routines. Keeping them behind a trait lets a
//! backend substitute a tuned implementation without touching the stride
//! mapping logic above.

use crate::dtype::Element;
use crate::runtime::Runtime;

/// Column-major BLAS routines: matrix-vector multiply, matrix-matrix
/// multiply, and rank-1 update
///
/// Matrices are column-major with a leading dimension (`A(i, j)` at
/// `a[i + j * lda]`); vectors carry an element increment. `beta == 0` means
/// the destination is write-only and its previous contents are never read.
pub trait BlasKernel<R: Runtime> {
    /// `y = beta * y + alpha * op(A) * x`
    ///
    /// # Safety
    /// `a` must be valid for an `m x n` column-major matrix with leading
    /// dimension `lda`; `x` and `y` for their strided extents.
    #[allow(clippy::too_many_arguments)]
    unsafe fn gemv<T: Element>(
        &self,
        trans: bool,
        m: usize,
        n: usize,
        alpha: f64,
        a: *const T,
        lda: isize,
        x: *const T,
        incx: isize,
        beta: f64,
        y: *mut T,
        incy: isize,
    );

    /// `C = beta * C + alpha * op(A) * op(B)`
    ///
    /// # Safety
    /// `a`, `b`, and `c` must be valid column-major matrices for the given
    /// dimensions and leading dimensions.
    #[allow(clippy::too_many_arguments)]
    unsafe fn gemm<T: Element>(
        &self,
        transa: bool,
        transb: bool,
        m: usize,
        n: usize,
        k: usize,
        alpha: f64,
        a: *const T,
        lda: isize,
        b: *const T,
        ldb: isize,
        beta: f64,
        c: *mut T,
        ldc: isize,
    );

    /// `A = A + alpha * x * y^T`
    ///
    /// # Safety
    /// `a` must be valid for an `m x n` column-major matrix with leading
    /// dimension `lda`; `x` and `y` for their strided extents.
    #[allow(clippy::too_many_arguments)]
    unsafe fn ger<T: Element>(
        &self,
        m: usize,
        n: usize,
        alpha: f64,
        x: *const T,
        incx: isize,
        y: *const T,
        incy: isize,
        a: *mut T,
        lda: isize,
    );
}
