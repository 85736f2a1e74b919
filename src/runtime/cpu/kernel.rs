//! BLAS kernel bindings for the CPU backend

use crate::dtype::Element;
use crate::ops::BlasKernel;
use crate::runtime::cpu::kernels::blas;
use crate::runtime::cpu::{CpuClient, CpuRuntime};

impl BlasKernel<CpuRuntime> for CpuClient {
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
    ) {
        unsafe { blas::gemv_kernel(trans, m, n, alpha, a, lda, x, incx, beta, y, incy) }
    }

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
    ) {
        unsafe {
            blas::gemm_kernel(transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
        }
    }

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
    ) {
        unsafe { blas::ger_kernel(m, n, alpha, x, incx, y, incy, a, lda) }
    }
}
