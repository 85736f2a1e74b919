//! CPU pointwise transforms

use crate::error::Result;
use crate::ops::{BinaryOp, TransformOps, UnaryOp};
use crate::runtime::cpu::helpers::transform;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl TransformOps<CpuRuntime> for CpuClient {
    fn unary(&self, op: UnaryOp, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        transform::unary_impl(self, op, a)
    }

    fn binary_scalar(
        &self,
        op: BinaryOp,
        a: &Tensor<CpuRuntime>,
        scalar: f64,
    ) -> Result<Tensor<CpuRuntime>> {
        transform::scalar_impl(self, op, a, scalar)
    }

    fn binary(
        &self,
        op: BinaryOp,
        a: &Tensor<CpuRuntime>,
        alpha: f64,
        b: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        transform::binary_impl(self, op, a, alpha, b)
    }

    fn addc(
        &self,
        op: BinaryOp,
        t: &Tensor<CpuRuntime>,
        value: f64,
        s1: &Tensor<CpuRuntime>,
        s2: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        transform::addc_impl(self, op, t, value, s1, s2)
    }

    fn clamp(&self, a: &Tensor<CpuRuntime>, min: f64, max: f64) -> Result<Tensor<CpuRuntime>> {
        transform::clamp_impl(self, a, min, max)
    }

    fn fill(&self, t: &Tensor<CpuRuntime>, value: f64) -> Result<()> {
        transform::fill_impl(self, t, value)
    }
}
