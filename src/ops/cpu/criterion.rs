//! CPU training criteria

use crate::dispatch_dtype;
use crate::error::Result;
use crate::ops::{CriterionOps, ZipMap};
use crate::runtime::cpu::helpers::{check_same_dtype, check_same_numel, reduce};
use crate::runtime::cpu::kernels::transform;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::runtime::helpers::ensure_contiguous;
use crate::tensor::Tensor;

impl CriterionOps<CpuRuntime> for CpuClient {
    fn kl_div_loss(
        &self,
        input: &Tensor<CpuRuntime>,
        target: &Tensor<CpuRuntime>,
        size_average: bool,
    ) -> Result<f64> {
        let sum = reduce::zip_reduce_all_impl(ZipMap::KlDiv, input, target)?;
        let n = input.numel();
        Ok(if size_average && n > 0 {
            sum / n as f64
        } else {
            sum
        })
    }

    fn kl_div_grad(
        &self,
        input: &Tensor<CpuRuntime>,
        target: &Tensor<CpuRuntime>,
        size_average: bool,
    ) -> Result<Tensor<CpuRuntime>> {
        check_same_dtype(input, target)?;
        check_same_numel(input, target)?;

        let tgt = ensure_contiguous(target);
        let out = Tensor::try_empty(input.shape(), input.dtype(), &self.device)?;
        let n = input.numel();
        let norm = if size_average && n > 0 {
            2.0 / n as f64
        } else {
            2.0
        };

        let tgt_ptr = tgt.storage().ptr();
        let out_ptr = out.storage().ptr();
        dispatch_dtype!(input.dtype(), T => {
            unsafe {
                transform::kl_grad_kernel::<T>(tgt_ptr as *const T, norm, out_ptr as *mut T, n);
            }
        });
        Ok(out)
    }
}
