//! Reference BLAS kernels (column-major)
//!
//! Naive implementations of the three routines the dense matrix helpers
//! need. These follow BLAS conventions: matrices are column-major with a
//! leading dimension, vectors have an increment, and `A(i, j)` lives at
//! `a[i + j * lda]`. Accumulation runs in f64.

use super::parallel_for;
use crate::dtype::Element;

/// General matrix-vector multiply:
/// `y = beta * y + alpha * op(A) * x` where `op(A)` is `A` (`trans ==
/// false`, `y` has length `m`) or `A^T` (`trans == true`, `y` has length
/// `n`). `A` is `m x n` column-major.
///
/// When `beta == 0` the previous contents of `y` are not read.
///
/// # Safety
/// `a` must be valid for an `m x n` column-major matrix with leading
/// dimension `lda`; `x` and `y` for their strided extents.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn gemv_kernel<T: Element>(
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
) {
    if !trans {
        for i in 0..m {
            let mut sum = 0.0;
            for j in 0..n {
                let aij = (*a.offset(i as isize + j as isize * lda)).to_f64();
                sum += aij * (*x.offset(j as isize * incx)).to_f64();
            }
            let yp = y.offset(i as isize * incy);
            let base = if beta == 0.0 {
                0.0
            } else {
                beta * (*yp).to_f64()
            };
            *yp = T::from_f64(base + alpha * sum);
        }
    } else {
        for j in 0..n {
            let mut sum = 0.0;
            for i in 0..m {
                let aij = (*a.offset(i as isize + j as isize * lda)).to_f64();
                sum += aij * (*x.offset(i as isize * incx)).to_f64();
            }
            let yp = y.offset(j as isize * incy);
            let base = if beta == 0.0 {
                0.0
            } else {
                beta * (*yp).to_f64()
            };
            *yp = T::from_f64(base + alpha * sum);
        }
    }
}

/// General matrix-matrix multiply:
/// `C = beta * C + alpha * op(A) * op(B)` with `C` being `m x n`
/// column-major, `op(A)` `m x k`, and `op(B)` `k x n`.
///
/// Parallelized over columns of `C`; each column is owned by one task.
///
/// # Safety
/// `a`, `b`, and `c` must be valid column-major matrices for the given
/// dimensions and leading dimensions.
#[allow(unsafe_op_in_unsafe_fn)]
#[allow(clippy::too_many_arguments)]
pub unsafe fn gemm_kernel<T: Element>(
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
) {
    let a_addr = a as usize;
    let b_addr = b as usize;
    let c_addr = c as usize;
    parallel_for(n, 4, move |j| unsafe {
        let a = a_addr as *const T;
        let b = b_addr as *const T;
        let c = c_addr as *mut T;
        for i in 0..m {
            let mut sum = 0.0;
            for l in 0..k {
                let av = if transa {
                    *a.offset(l as isize + i as isize * lda)
                } else {
                    *a.offset(i as isize + l as isize * lda)
                };
                let bv = if transb {
                    *b.offset(j as isize + l as isize * ldb)
                } else {
                    *b.offset(l as isize + j as isize * ldb)
                };
                sum += av.to_f64() * bv.to_f64();
            }
            let cp = c.offset(i as isize + j as isize * ldc);
            let base = if beta == 0.0 {
                0.0
            } else {
                beta * (*cp).to_f64()
            };
            *cp = T::from_f64(base + alpha * sum);
        }
    });
}

/// Rank-1 update: `A = A + alpha * x * y^T` with `A` `m x n` column-major.
///
/// # Safety
/// `a` must be valid for an `m x n` column-major matrix with leading
/// dimension `lda`; `x` and `y` for their strided extents.
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn ger_kernel<T: Element>(
    m: usize,
    n: usize,
    alpha: f64,
    x: *const T,
    incx: isize,
    y: *const T,
    incy: isize,
    a: *mut T,
    lda: isize,
) {
    for j in 0..n {
        let yj = (*y.offset(j as isize * incy)).to_f64();
        for i in 0..m {
            let ap = a.offset(i as isize + j as isize * lda);
            let xi = (*x.offset(i as isize * incx)).to_f64();
            *ap = T::from_f64((*ap).to_f64() + alpha * xi * yj);
        }
    }
}
