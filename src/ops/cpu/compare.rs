//! CPU comparisons

use crate::error::Result;
use crate::ops::{CompareOp, CompareOps};
use crate::runtime::cpu::helpers::transform;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl CompareOps<CpuRuntime> for CpuClient {
    fn compare(
        &self,
        op: CompareOp,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        transform::compare_impl(self, op, a, b)
    }

    fn compare_scalar(
        &self,
        op: CompareOp,
        a: &Tensor<CpuRuntime>,
        scalar: f64,
    ) -> Result<Tensor<CpuRuntime>> {
        transform::compare_scalar_impl(self, op, a, scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuDevice;
    use crate::error::Error;

    #[test]
    fn test_flags_carry_input_dtype() {
        let c = CpuClient::new(CpuDevice::new());
        let t = Tensor::<CpuRuntime>::from_slice(&[-3i64, 0, 3], &[3], &c.device);
        let flags = c.gt_scalar(&t, 0.0).unwrap();
        assert_eq!(flags.dtype(), t.dtype());
        let r: Vec<i64> = flags.to_vec();
        assert_eq!(r, [0, 0, 1]);
    }

    #[test]
    fn test_pairwise_dtype_mismatch() {
        let c = CpuClient::new(CpuDevice::new());
        let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32], &[1], &c.device);
        let b = Tensor::<CpuRuntime>::from_slice(&[1.0f64], &[1], &c.device);
        assert!(matches!(c.eq(&a, &b), Err(Error::DTypeMismatch { .. })));
    }
}
