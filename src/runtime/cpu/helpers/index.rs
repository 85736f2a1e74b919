//! Index gather/scatter helpers
//!
//! Indices are 1-based and validated on the host before any kernel runs:
//! the index vector is read back, every entry checked against the indexed
//! extent, so kernels never see an out-of-range index.

use super::check_same_dtype;
use crate::dispatch_dtype;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::MAX_KERNEL_DIMS;
use crate::runtime::cpu::kernels::index;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::runtime::helpers::ensure_contiguous;
use crate::tensor::{Shape, Tensor};

/// Check rank and dimension bounds of an indexed operand
fn check_dim(t: &Tensor<CpuRuntime>, dim: usize) -> Result<()> {
    if t.ndim() > MAX_KERNEL_DIMS {
        return Err(Error::UnsupportedRank {
            ndim: t.ndim(),
            max: MAX_KERNEL_DIMS,
        });
    }
    if dim >= t.ndim() {
        return Err(Error::InvalidDimension {
            dim: dim as isize,
            ndim: t.ndim(),
        });
    }
    Ok(())
}

/// Validate the index vector and return it contiguous
///
/// Entries are 1-based: valid values are `1..=dim_size`.
fn check_indices(indices: &Tensor<CpuRuntime>, dim_size: usize) -> Result<Tensor<CpuRuntime>> {
    if indices.dtype() != DType::I64 {
        return Err(Error::invalid_argument(
            "indices",
            format!("expected i64 indices, got {}", indices.dtype()),
        ));
    }
    if indices.ndim() != 1 {
        return Err(Error::invalid_argument(
            "indices",
            format!("expected a 1-dimensional index vector, got rank {}", indices.ndim()),
        ));
    }

    let c = ensure_contiguous(indices);
    for &v in &c.to_vec::<i64>() {
        if v < 1 || v as usize > dim_size {
            return Err(Error::IndexOutOfBounds {
                index: v,
                size: dim_size,
            });
        }
    }
    Ok(c)
}

/// Gather rows of `src` along `dim` into a fresh tensor
pub fn index_select_impl(
    client: &CpuClient,
    src: &Tensor<CpuRuntime>,
    dim: usize,
    indices: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    check_dim(src, dim)?;
    let src_dim = src.shape()[dim];
    let idx = check_indices(indices, src_dim)?;
    let n_index = idx.numel();

    let src_c = ensure_contiguous(src);
    let mut out_shape: Shape = src.shape().iter().copied().collect();
    out_shape[dim] = n_index;
    let out = Tensor::try_empty(&out_shape, src.dtype(), &client.device)?;

    let outer: usize = src.shape()[..dim].iter().product();
    let inner: usize = src.shape()[dim + 1..].iter().product();

    let src_ptr = src_c.storage().ptr();
    let out_ptr = out.storage().ptr();
    let idx_ptr = idx.storage().ptr() as *const i64;
    dispatch_dtype!(src.dtype(), T => {
        unsafe {
            index::index_select_kernel::<T>(
                src_ptr as *const T,
                out_ptr as *mut T,
                idx_ptr,
                outer,
                src_dim,
                n_index,
                inner,
            );
        }
    });
    Ok(out)
}

/// Scatter rows of `src` into `dst` along `dim`, in place
pub fn index_copy_impl(
    dst: &Tensor<CpuRuntime>,
    dim: usize,
    indices: &Tensor<CpuRuntime>,
    src: &Tensor<CpuRuntime>,
) -> Result<()> {
    check_dim(dst, dim)?;
    check_same_dtype(dst, src)?;
    let dst_dim = dst.shape()[dim];
    let idx = check_indices(indices, dst_dim)?;
    let n_index = idx.numel();

    let mut expected: Shape = dst.shape().iter().copied().collect();
    expected[dim] = n_index;
    if src.shape() != expected.as_slice() {
        return Err(Error::shape_mismatch(&expected, src.shape()));
    }

    let src_c = ensure_contiguous(src);
    // Aliases dst when contiguous; otherwise a scratch copy committed below
    let work = ensure_contiguous(dst);

    let outer: usize = dst.shape()[..dim].iter().product();
    let inner: usize = dst.shape()[dim + 1..].iter().product();

    let dst_ptr = work.storage().ptr();
    let src_ptr = src_c.storage().ptr();
    let idx_ptr = idx.storage().ptr() as *const i64;
    dispatch_dtype!(dst.dtype(), T => {
        unsafe {
            index::index_copy_kernel::<T>(
                dst_ptr as *mut T,
                src_ptr as *const T,
                idx_ptr,
                outer,
                dst_dim,
                n_index,
                inner,
            );
        }
    });

    if !dst.is_contiguous() {
        dst.copy_from(&work)?;
    }
    Ok(())
}

/// Fill the selected rows of `dst` along `dim` with a constant, in place
pub fn index_fill_impl(
    dst: &Tensor<CpuRuntime>,
    dim: usize,
    indices: &Tensor<CpuRuntime>,
    value: f64,
) -> Result<()> {
    check_dim(dst, dim)?;
    let dst_dim = dst.shape()[dim];
    let idx = check_indices(indices, dst_dim)?;
    let n_index = idx.numel();

    let work = ensure_contiguous(dst);

    let outer: usize = dst.shape()[..dim].iter().product();
    let inner: usize = dst.shape()[dim + 1..].iter().product();

    let dst_ptr = work.storage().ptr();
    let idx_ptr = idx.storage().ptr() as *const i64;
    dispatch_dtype!(dst.dtype(), T => {
        unsafe {
            index::index_fill_kernel::<T>(
                dst_ptr as *mut T,
                idx_ptr,
                value,
                outer,
                dst_dim,
                n_index,
                inner,
            );
        }
    });

    if !dst.is_contiguous() {
        dst.copy_from(&work)?;
    }
    Ok(())
}
