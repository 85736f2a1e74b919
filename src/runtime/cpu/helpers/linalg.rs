//! Dense matrix helpers
//!
//! These route through the column-major BLAS kernels without ever copying a
//! transposed operand: a strided matrix view with one unit-stride axis maps
//! directly onto a BLAS operand by choosing the transpose flag and leading
//! dimension from its strides. Only a matrix with no unit-stride axis at all
//! is cloned contiguous first.
//!
//! Results are always fresh contiguous row-major tensors seeded from `t`. A
//! row-major result buffer is, viewed column-major, the transposed matrix,
//! so `addmm` computes `r^T = m2^T * m1^T` by swapping the operands.

use super::{check_same_dtype, materialize_copy};
use crate::dispatch_dtype;
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, BlasKernel};
use crate::runtime::cpu::kernels::norm;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

/// Typed pointer to the first element of a tensor's view
#[inline]
fn data_ptr<T>(t: &Tensor<CpuRuntime>) -> *const T {
    (t.storage().ptr() as usize + t.layout().offset() * std::mem::size_of::<T>()) as *const T
}

/// Map a matrix view onto a column-major BLAS operand
///
/// A row-contiguous view of the transposed problem is a plain (`trans ==
/// false`) column-major operand with the row stride as leading dimension; a
/// column-contiguous view is the transposed (`trans == true`) operand.
/// A view with no unit-stride axis is cloned contiguous and lands in the
/// first case.
fn blas_operand(m: &Tensor<CpuRuntime>) -> (bool, Tensor<CpuRuntime>, isize) {
    if m.strides()[1] == 1 {
        (false, m.clone(), m.strides()[0])
    } else if m.strides()[0] == 1 {
        (true, m.clone(), m.strides()[1])
    } else {
        let c = m.contiguous();
        let lda = c.strides()[0];
        (false, c, lda)
    }
}

/// `r = beta * t + alpha * mat * vec`
pub fn addmv_impl(
    client: &CpuClient,
    beta: f64,
    t: &Tensor<CpuRuntime>,
    alpha: f64,
    mat: &Tensor<CpuRuntime>,
    vec: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    if mat.ndim() != 2 {
        return Err(Error::invalid_argument("mat", "expected a matrix"));
    }
    if vec.ndim() != 1 {
        return Err(Error::invalid_argument("vec", "expected a vector"));
    }
    if t.ndim() != 1 {
        return Err(Error::invalid_argument("t", "expected a vector"));
    }
    check_same_dtype(t, mat)?;
    check_same_dtype(t, vec)?;

    let (rows, cols) = (mat.shape()[0], mat.shape()[1]);
    if vec.shape()[0] != cols {
        return Err(Error::shape_mismatch(&[cols], vec.shape()));
    }
    if t.shape()[0] != rows {
        return Err(Error::shape_mismatch(&[rows], t.shape()));
    }

    let r = materialize_copy(client, t)?;

    // A column-contiguous mat is a plain column-major operand; a
    // row-contiguous one is the transpose of its own column-major reading.
    let mat = if mat.strides()[0] == 1 || mat.strides()[1] == 1 {
        mat.clone()
    } else {
        mat.contiguous()
    };

    dispatch_dtype!(r.dtype(), T => {
        let mat_ptr = data_ptr::<T>(&mat);
        let vec_ptr = data_ptr::<T>(vec);
        let r_ptr = r.storage().ptr() as *mut T;
        let incx = vec.strides()[0];
        unsafe {
            if mat.strides()[0] == 1 {
                client.gemv::<T>(
                    false, rows, cols, alpha, mat_ptr, mat.strides()[1], vec_ptr, incx, beta,
                    r_ptr, 1,
                );
            } else {
                client.gemv::<T>(
                    true, cols, rows, alpha, mat_ptr, mat.strides()[0], vec_ptr, incx, beta,
                    r_ptr, 1,
                );
            }
        }
    });
    Ok(r)
}

/// `r = beta * t + alpha * m1 * m2`
pub fn addmm_impl(
    client: &CpuClient,
    beta: f64,
    t: &Tensor<CpuRuntime>,
    alpha: f64,
    m1: &Tensor<CpuRuntime>,
    m2: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    if m1.ndim() != 2 {
        return Err(Error::invalid_argument("m1", "expected a matrix"));
    }
    if m2.ndim() != 2 {
        return Err(Error::invalid_argument("m2", "expected a matrix"));
    }
    if t.ndim() != 2 {
        return Err(Error::invalid_argument("t", "expected a matrix"));
    }
    check_same_dtype(t, m1)?;
    check_same_dtype(t, m2)?;

    let (p, k) = (m1.shape()[0], m1.shape()[1]);
    let q = m2.shape()[1];
    if m2.shape()[0] != k {
        return Err(Error::shape_mismatch(&[k, q], m2.shape()));
    }
    if t.shape() != [p, q] {
        return Err(Error::shape_mismatch(&[p, q], t.shape()));
    }

    let r = materialize_copy(client, t)?;

    // Row-major r is, column-major, r^T = m2^T * m1^T: the operands swap
    let (transa, a_m, lda) = blas_operand(m2);
    let (transb, b_m, ldb) = blas_operand(m1);
    let (m, n) = (q, p);
    let ldc = r.strides()[0];

    dispatch_dtype!(r.dtype(), T => {
        let a_ptr = data_ptr::<T>(&a_m);
        let b_ptr = data_ptr::<T>(&b_m);
        let r_ptr = r.storage().ptr() as *mut T;
        unsafe {
            client.gemm::<T>(
                transa, transb, m, n, k, alpha, a_ptr, lda, b_ptr, ldb, beta, r_ptr, ldc,
            );
        }
    });
    Ok(r)
}

/// `r = beta * t + alpha * vec1 (outer) vec2`
pub fn addr_impl(
    client: &CpuClient,
    beta: f64,
    t: &Tensor<CpuRuntime>,
    alpha: f64,
    vec1: &Tensor<CpuRuntime>,
    vec2: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    if vec1.ndim() != 1 {
        return Err(Error::invalid_argument("vec1", "expected a vector"));
    }
    if vec2.ndim() != 1 {
        return Err(Error::invalid_argument("vec2", "expected a vector"));
    }
    if t.ndim() != 2 {
        return Err(Error::invalid_argument("t", "expected a matrix"));
    }
    check_same_dtype(t, vec1)?;
    check_same_dtype(t, vec2)?;

    let (n1, n2) = (vec1.shape()[0], vec2.shape()[0]);
    if t.shape() != [n1, n2] {
        return Err(Error::shape_mismatch(&[n1, n2], t.shape()));
    }

    let mut r = materialize_copy(client, t)?;
    if beta != 1.0 {
        r = super::transform::scalar_impl(client, BinaryOp::Mul, &r, beta)?;
    }

    // Row-major r viewed column-major is r^T, so the update swaps the vectors
    dispatch_dtype!(r.dtype(), T => {
        let v1_ptr = data_ptr::<T>(vec1);
        let v2_ptr = data_ptr::<T>(vec2);
        let r_ptr = r.storage().ptr() as *mut T;
        let (inc1, inc2) = (vec1.strides()[0], vec2.strides()[0]);
        unsafe {
            client.ger::<T>(n2, n1, alpha, v2_ptr, inc2, v1_ptr, inc1, r_ptr, r.strides()[0]);
        }
    });
    Ok(r)
}

/// Renormalize every slice along `dim` whose p-norm exceeds `maxnorm`
pub fn renorm_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    p: f64,
    dim: usize,
    maxnorm: f64,
) -> Result<Tensor<CpuRuntime>> {
    if p <= 0.0 {
        return Err(Error::invalid_argument("p", "norm order must be positive"));
    }
    if maxnorm <= 0.0 {
        return Err(Error::invalid_argument(
            "maxnorm",
            "norm bound must be positive",
        ));
    }
    if a.ndim() <= 1 {
        return Err(Error::invalid_argument(
            "self",
            "renorm needs at least 2 dimensions",
        ));
    }
    if dim >= a.ndim() {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim: a.ndim(),
        });
    }

    // Bring the sliced dimension to the front so every slice is one
    // contiguous row of the working copy
    let rowwise = a.transpose(dim as isize, 0)?;
    let data = materialize_copy(client, &rowwise)?;

    let rows = data.shape()[0];
    let row_len = if rows == 0 { 0 } else { data.numel() / rows };

    let data_ptr = data.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            norm::renorm_rows_kernel::<T>(data_ptr as *mut T, rows, row_len, p, maxnorm);
        }
    });

    Ok(data.transpose(0, dim as isize)?.contiguous())
}
