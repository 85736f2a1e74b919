//! Dense matrix operations

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Dense matrix helpers: matrix-vector, matrix-matrix, rank-1 update, and
/// row renormalization
///
/// Each operation returns a fresh contiguous row-major tensor; `t` seeds the
/// result and is never modified. Matrix operands may be arbitrary strided
/// views; a view with a unit-stride axis feeds the kernels without a copy.
pub trait LinalgOps<R: Runtime> {
    /// `r = beta * t + alpha * mat * vec`
    ///
    /// `t` and the result are vectors of length `mat.size(0)`.
    fn addmv(
        &self,
        beta: f64,
        t: &Tensor<R>,
        alpha: f64,
        mat: &Tensor<R>,
        vec: &Tensor<R>,
    ) -> Result<Tensor<R>>;

    /// `r = beta * t + alpha * m1 * m2`
    ///
    /// `t` and the result are `m1.size(0) x m2.size(1)` matrices.
    fn addmm(
        &self,
        beta: f64,
        t: &Tensor<R>,
        alpha: f64,
        m1: &Tensor<R>,
        m2: &Tensor<R>,
    ) -> Result<Tensor<R>>;

    /// `r = beta * t + alpha * vec1 (outer) vec2`
    ///
    /// `t` and the result are `vec1.size(0) x vec2.size(0)` matrices.
    fn addr(
        &self,
        beta: f64,
        t: &Tensor<R>,
        alpha: f64,
        vec1: &Tensor<R>,
        vec2: &Tensor<R>,
    ) -> Result<Tensor<R>>;

    /// Rescale every slice along `dim` whose p-norm exceeds `maxnorm` so it
    /// sits just inside the bound; slices within the bound pass through
    /// unchanged
    fn renorm(&self, a: &Tensor<R>, p: f64, dim: usize, maxnorm: f64) -> Result<Tensor<R>>;

    /// `mat * vec`
    fn mv(&self, mat: &Tensor<R>, vec: &Tensor<R>) -> Result<Tensor<R>> {
        if mat.ndim() != 2 {
            return Err(Error::invalid_argument("mat", "expected a matrix"));
        }
        let t = Tensor::try_zeros(&[mat.shape()[0]], mat.dtype(), mat.device())?;
        self.addmv(0.0, &t, 1.0, mat, vec)
    }

    /// `m1 * m2`
    fn mm(&self, m1: &Tensor<R>, m2: &Tensor<R>) -> Result<Tensor<R>> {
        if m1.ndim() != 2 || m2.ndim() != 2 {
            return Err(Error::invalid_argument("m1", "expected matrices"));
        }
        let t = Tensor::try_zeros(&[m1.shape()[0], m2.shape()[1]], m1.dtype(), m1.device())?;
        self.addmm(0.0, &t, 1.0, m1, m2)
    }

    /// `vec1 (outer) vec2`
    fn outer(&self, vec1: &Tensor<R>, vec2: &Tensor<R>) -> Result<Tensor<R>> {
        if vec1.ndim() != 1 || vec2.ndim() != 1 {
            return Err(Error::invalid_argument("vec1", "expected vectors"));
        }
        let t = Tensor::try_zeros(
            &[vec1.shape()[0], vec2.shape()[0]],
            vec1.dtype(),
            vec1.device(),
        )?;
        self.addr(0.0, &t, 1.0, vec1, vec2)
    }
}
