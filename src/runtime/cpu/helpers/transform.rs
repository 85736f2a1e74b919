//! Pointwise transform helpers

use super::{check_same_dtype, check_same_numel};
use crate::dispatch_dtype;
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, CompareOp, UnaryOp};
use crate::runtime::cpu::kernels::transform;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::runtime::helpers::ensure_contiguous;
use crate::tensor::Tensor;

/// `out[i] = op(a[i])`
pub fn unary_impl(
    client: &CpuClient,
    op: UnaryOp,
    a: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let src = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = src.numel();

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::unary_kernel::<T>(op, src_ptr as *const T, out_ptr as *mut T, len);
        }
    });
    Ok(out)
}

/// `out[i] = op(a[i], scalar)`
pub fn scalar_impl(
    client: &CpuClient,
    op: BinaryOp,
    a: &Tensor<CpuRuntime>,
    scalar: f64,
) -> Result<Tensor<CpuRuntime>> {
    let src = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = src.numel();

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::scalar_kernel::<T>(op, src_ptr as *const T, scalar, out_ptr as *mut T, len);
        }
    });
    Ok(out)
}

/// `out[i] = op(a[i], alpha * b[i])`
pub fn binary_impl(
    client: &CpuClient,
    op: BinaryOp,
    a: &Tensor<CpuRuntime>,
    alpha: f64,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    check_same_dtype(a, b)?;
    check_same_numel(a, b)?;

    let a_c = ensure_contiguous(a);
    let b_c = ensure_contiguous(b);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = a_c.numel();

    let a_ptr = a_c.storage().ptr();
    let b_ptr = b_c.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::binary_kernel::<T>(
                op,
                a_ptr as *const T,
                alpha,
                b_ptr as *const T,
                out_ptr as *mut T,
                len,
            );
        }
    });
    Ok(out)
}

/// `out[i] = t[i] + value * op(s1[i], s2[i])`
pub fn addc_impl(
    client: &CpuClient,
    op: BinaryOp,
    t: &Tensor<CpuRuntime>,
    value: f64,
    s1: &Tensor<CpuRuntime>,
    s2: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    check_same_dtype(t, s1)?;
    check_same_dtype(t, s2)?;
    check_same_numel(t, s1)?;
    check_same_numel(t, s2)?;

    let t_c = ensure_contiguous(t);
    let s1_c = ensure_contiguous(s1);
    let s2_c = ensure_contiguous(s2);
    let out = Tensor::try_empty(t.shape(), t.dtype(), &client.device)?;
    let len = t_c.numel();

    let t_ptr = t_c.storage().ptr();
    let s1_ptr = s1_c.storage().ptr();
    let s2_ptr = s2_c.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(t.dtype(), T => {
        unsafe {
            transform::addc_kernel::<T>(
                op,
                t_ptr as *const T,
                value,
                s1_ptr as *const T,
                s2_ptr as *const T,
                out_ptr as *mut T,
                len,
            );
        }
    });
    Ok(out)
}

/// Clamp elements into `[min, max]`
pub fn clamp_impl(
    client: &CpuClient,
    a: &Tensor<CpuRuntime>,
    min: f64,
    max: f64,
) -> Result<Tensor<CpuRuntime>> {
    if min > max {
        return Err(Error::invalid_argument(
            "min",
            format!("clamp range is empty: min {} > max {}", min, max),
        ));
    }

    let src = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = src.numel();

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::clamp_kernel::<T>(src_ptr as *const T, min, max, out_ptr as *mut T, len);
        }
    });
    Ok(out)
}

/// Compare against a scalar, producing 0/1 flags in the input dtype
pub fn compare_scalar_impl(
    client: &CpuClient,
    op: CompareOp,
    a: &Tensor<CpuRuntime>,
    scalar: f64,
) -> Result<Tensor<CpuRuntime>> {
    let src = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = src.numel();

    let src_ptr = src.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::compare_scalar_kernel::<T>(
                op,
                src_ptr as *const T,
                scalar,
                out_ptr as *mut T,
                len,
            );
        }
    });
    Ok(out)
}

/// Compare two tensors elementwise, producing 0/1 flags in the input dtype
pub fn compare_impl(
    client: &CpuClient,
    op: CompareOp,
    a: &Tensor<CpuRuntime>,
    b: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    check_same_dtype(a, b)?;
    check_same_numel(a, b)?;

    let a_c = ensure_contiguous(a);
    let b_c = ensure_contiguous(b);
    let out = Tensor::try_empty(a.shape(), a.dtype(), &client.device)?;
    let len = a_c.numel();

    let a_ptr = a_c.storage().ptr();
    let b_ptr = b_c.storage().ptr();
    let out_ptr = out.storage().ptr();
    dispatch_dtype!(a.dtype(), T => {
        unsafe {
            transform::compare_kernel::<T>(
                op,
                a_ptr as *const T,
                b_ptr as *const T,
                out_ptr as *mut T,
                len,
            );
        }
    });
    Ok(out)
}

/// Fill the tensor's view with a constant, in place
///
/// A strided destination goes through a contiguous scratch buffer that is
/// committed back with `copy_from`.
pub fn fill_impl(client: &CpuClient, t: &Tensor<CpuRuntime>, value: f64) -> Result<()> {
    if t.is_contiguous() {
        let ptr = t.storage().ptr();
        let len = t.numel();
        dispatch_dtype!(t.dtype(), T => {
            unsafe {
                transform::fill_kernel::<T>(ptr as *mut T, value, len);
            }
        });
        return Ok(());
    }

    let tmp = Tensor::try_empty(t.shape(), t.dtype(), &client.device)?;
    let tmp_ptr = tmp.storage().ptr();
    let len = tmp.numel();
    dispatch_dtype!(t.dtype(), T => {
        unsafe {
            transform::fill_kernel::<T>(tmp_ptr as *mut T, value, len);
        }
    });
    t.copy_from(&tmp)
}
