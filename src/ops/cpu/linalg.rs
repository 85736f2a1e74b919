//! CPU dense matrix operations

use crate::error::Result;
use crate::ops::LinalgOps;
use crate::runtime::cpu::helpers::linalg;
use crate::runtime::cpu::{CpuClient, CpuRuntime};
use crate::tensor::Tensor;

impl LinalgOps<CpuRuntime> for CpuClient {
    fn addmv(
        &self,
        beta: f64,
        t: &Tensor<CpuRuntime>,
        alpha: f64,
        mat: &Tensor<CpuRuntime>,
        vec: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        linalg::addmv_impl(self, beta, t, alpha, mat, vec)
    }

    fn addmm(
        &self,
        beta: f64,
        t: &Tensor<CpuRuntime>,
        alpha: f64,
        m1: &Tensor<CpuRuntime>,
        m2: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        linalg::addmm_impl(self, beta, t, alpha, m1, m2)
    }

    fn addr(
        &self,
        beta: f64,
        t: &Tensor<CpuRuntime>,
        alpha: f64,
        vec1: &Tensor<CpuRuntime>,
        vec2: &Tensor<CpuRuntime>,
    ) -> Result<Tensor<CpuRuntime>> {
        linalg::addr_impl(self, beta, t, alpha, vec1, vec2)
    }

    fn renorm(
        &self,
        a: &Tensor<CpuRuntime>,
        p: f64,
        dim: usize,
        maxnorm: f64,
    ) -> Result<Tensor<CpuRuntime>> {
        linalg::renorm_impl(self, a, p, dim, maxnorm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_mm_against_transposed_operand() {
        let c = CpuClient::new(CpuDevice::new());
        // m1 is given as the transpose view of its own transpose storage, so
        // the kernel must honor the strides rather than the raw layout
        let m1t =
            Tensor::<CpuRuntime>::from_slice(&[1.0f64, 3.0, 2.0, 4.0], &[2, 2], &c.device);
        let m1 = m1t.t().unwrap();
        let m2 = Tensor::<CpuRuntime>::from_slice(&[5.0f64, 6.0, 7.0, 8.0], &[2, 2], &c.device);

        let r: Vec<f64> = c.mm(&m1, &m2).unwrap().to_vec();
        // [[1, 2], [3, 4]] * [[5, 6], [7, 8]]
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0]);
    }
}
