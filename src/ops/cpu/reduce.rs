//! CPU reductions

use crate::error::Result;
use crate::ops::{ReduceMap, ReduceOp, ReduceOps, ZipMap};
use crate::runtime::cpu::helpers::reduce;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl ReduceOps<CpuRuntime> for CpuClient {
    fn reduce_dim(
        &self,
        op: ReduceOp,
        map: ReduceMap,
        a: &Tensor<CpuRuntime>,
        dim: usize,
    ) -> Result<Tensor<CpuRuntime>> {
        reduce::reduce_dim_impl(self, op, map, a, dim)
    }

    fn reduce_all(&self, op: ReduceOp, map: ReduceMap, a: &Tensor<CpuRuntime>) -> Result<f64> {
        reduce::reduce_all_impl(op, map, a)
    }

    fn zip_reduce_all(
        &self,
        map: ZipMap,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
    ) -> Result<f64> {
        reduce::zip_reduce_all_impl(map, a, b)
    }
}
