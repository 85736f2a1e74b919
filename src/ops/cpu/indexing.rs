//! CPU index gather/scatter

use crate::error::Result;
use crate::ops::IndexingOps;
use crate::runtime::cpu::helpers::index;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl IndexingOps<CpuRuntime> for CpuClient {
    fn index_select(
        &self,
        src: &Tensor<CpuRuntime>,
        dim: usize,
        indices: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        index::index_select_impl(self, src, dim, indices)
    }

    fn index_copy(
        &self,
        dst: &Tensor<CpuRuntime>,
        dim: usize,
        indices: &Tensor<CpuRuntime>,
        src: &Tensor<CpuRuntime>,
    ) -> Result<()> {
        index::index_copy_impl(dst, dim, indices, src)
    }

    fn index_fill(
        &self,
        dst: &Tensor<CpuRuntime>,
        dim: usize,
        indices: &Tensor<CpuRuntime>,
        value: f64,
    ) -> Result<()> {
        index::index_fill_impl(dst, dim, indices, value)
    }
}
