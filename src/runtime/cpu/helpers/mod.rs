//! Validation and dispatch layer between operation traits and CPU kernels
//!
//! Every helper validates shapes, dtypes, and arguments on the host, forces
//! operands contiguous, allocates the output, and only then dispatches a
//! kernel. A returned error therefore implies no operand was touched.

pub mod index;
pub mod linalg;
pub mod reduce;
pub mod transform;

use crate::error::{Error, Result};
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

/// Check that two operands share a dtype
pub(crate) fn check_same_dtype(a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<()> {
    if a.dtype() != b.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: a.dtype(),
            rhs: b.dtype(),
        });
    }
    Ok(())
}

/// Check that two operands hold the same number of elements
///
/// Pointwise pairs match by element count, not by shape; there is no
/// broadcasting at this layer.
pub(crate) fn check_same_numel(a: &Tensor<CpuRuntime>, b: &Tensor<CpuRuntime>) -> Result<()> {
    if a.numel() != b.numel() {
        return Err(Error::shape_mismatch(a.shape(), b.shape()));
    }
    Ok(())
}

/// Allocate a fresh contiguous tensor holding a deep copy of `t`
///
/// Unlike `ensure_contiguous`, the result never aliases the input, so it is
/// safe to hand to a kernel that writes in place.
pub(crate) fn materialize_copy(
    client: &CpuClient,
    t: &Tensor<CpuRuntime>,
) -> Result<Tensor<CpuRuntime>> {
    let out = Tensor::try_empty(t.shape(), t.dtype(), &client.device)?;
    out.copy_from(t)?;
    Ok(out)
}
