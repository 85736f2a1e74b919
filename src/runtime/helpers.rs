//! Shared helper functions for runtime backends

use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Ensure a tensor is contiguous in memory.
///
/// If the tensor is already contiguous, returns a clone (zero-copy, just
/// increments the storage refcount) that aliases the input. Otherwise,
/// materializes the strided view into a fresh contiguous copy.
///
/// Kernels expect contiguous operands, so this runs at the top of every
/// operation that touches raw data pointers.
#[inline]
pub fn ensure_contiguous<R: Runtime>(tensor: &Tensor<R>) -> Tensor<R> {
    if tensor.is_contiguous() {
        tensor.clone()
    } else {
        tensor.contiguous()
    }
}
