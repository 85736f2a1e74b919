//! Reduction operations

use crate::error::{Error, Result};
use crate::ops::{ReduceMap, ReduceOp, ZipMap};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

use super::TransformOps;

/// Reductions along one dimension and over whole tensors
///
/// Dimension reductions keep the reduced dimension with extent 1, so the
/// result indexes like the input. Whole-tensor reductions return an f64
/// scalar on the host and are a synchronization point.
pub trait ReduceOps<R: Runtime> {
    /// Reduce `dim` with `op`, applying `map` to each element first
    fn reduce_dim(
        &self,
        op: ReduceOp,
        map: ReduceMap,
        a: &Tensor<R>,
        dim: usize,
    ) -> Result<Tensor<R>>;

    /// Reduce every element to one f64, applying `map` first
    fn reduce_all(&self, op: ReduceOp, map: ReduceMap, a: &Tensor<R>) -> Result<f64>;

    /// Fused pairwise sum-reduction: `sum over i of map(a[i], b[i])`
    fn zip_reduce_all(&self, map: ZipMap, a: &Tensor<R>, b: &Tensor<R>) -> Result<f64>;

    // ===== Dimension reductions =====

    /// Sum along `dim`
    fn sum(&self, a: &Tensor<R>, dim: usize) -> Result<Tensor<R>> {
        self.reduce_dim(ReduceOp::Sum, ReduceMap::Identity, a, dim)
    }

    /// Product along `dim`
    fn prod(&self, a: &Tensor<R>, dim: usize) -> Result<Tensor<R>> {
        self.reduce_dim(ReduceOp::Prod, ReduceMap::Identity, a, dim)
    }

    /// Maximum along `dim`
    fn max(&self, a: &Tensor<R>, dim: usize) -> Result<Tensor<R>> {
        self.reduce_dim(ReduceOp::Max, ReduceMap::Identity, a, dim)
    }

    /// Minimum along `dim`
    fn min(&self, a: &Tensor<R>, dim: usize) -> Result<Tensor<R>> {
        self.reduce_dim(ReduceOp::Min, ReduceMap::Identity, a, dim)
    }

    /// Mean along `dim`
    fn mean(&self, a: &Tensor<R>, dim: usize) -> Result<Tensor<R>>
    where
        Self: TransformOps<R>,
    {
        let s = self.sum(a, dim)?;
        let n = *a.shape().get(dim).ok_or(Error::InvalidDimension {
            dim: dim as isize,
            ndim: a.ndim(),
        })?;
        if n == 0 {
            return Err(Error::invalid_argument(
                "self",
                "mean of an empty dimension",
            ));
        }
        self.div_scalar(&s, n as f64)
    }

    /// p-norm along `dim`
    ///
    /// `p == 0` counts non-zero elements and takes no root.
    fn norm(&self, a: &Tensor<R>, p: f64, dim: usize) -> Result<Tensor<R>>
    where
        Self: TransformOps<R>,
    {
        if p == 0.0 {
            return self.reduce_dim(ReduceOp::Sum, ReduceMap::NonZero, a, dim);
        }
        let powered = self.reduce_dim(ReduceOp::Sum, ReduceMap::AbsPow(p), a, dim)?;
        self.pow_scalar(&powered, 1.0 / p)
    }

    // ===== Whole-tensor reductions =====

    /// Sum of every element
    fn sumall(&self, a: &Tensor<R>) -> Result<f64> {
        self.reduce_all(ReduceOp::Sum, ReduceMap::Identity, a)
    }

    /// Product of every element (1 for an empty tensor)
    fn prodall(&self, a: &Tensor<R>) -> Result<f64> {
        self.reduce_all(ReduceOp::Prod, ReduceMap::Identity, a)
    }

    /// Maximum element
    fn maxall(&self, a: &Tensor<R>) -> Result<f64> {
        if a.numel() == 0 {
            return Err(Error::invalid_argument("self", "max of an empty tensor"));
        }
        self.reduce_all(ReduceOp::Max, ReduceMap::Identity, a)
    }

    /// Minimum element
    fn minall(&self, a: &Tensor<R>) -> Result<f64> {
        if a.numel() == 0 {
            return Err(Error::invalid_argument("self", "min of an empty tensor"));
        }
        self.reduce_all(ReduceOp::Min, ReduceMap::Identity, a)
    }

    /// Mean of every element
    fn meanall(&self, a: &Tensor<R>) -> Result<f64> {
        let n = a.numel();
        if n == 0 {
            return Err(Error::invalid_argument("self", "mean of an empty tensor"));
        }
        Ok(self.sumall(a)? / n as f64)
    }

    /// Unbiased variance of every element
    fn varall(&self, a: &Tensor<R>) -> Result<f64> {
        let n = a.numel();
        if n < 2 {
            return Err(Error::invalid_argument(
                "self",
                "variance needs at least 2 elements",
            ));
        }
        let mean = self.meanall(a)?;
        let ssq = self.reduce_all(ReduceOp::Sum, ReduceMap::ShiftSq(mean), a)?;
        Ok(ssq / (n - 1) as f64)
    }

    /// Unbiased standard deviation of every element
    fn stdall(&self, a: &Tensor<R>) -> Result<f64> {
        Ok(self.varall(a)?.sqrt())
    }

    /// p-norm of every element
    ///
    /// `p == 0` counts non-zero elements and takes no root.
    fn normall(&self, a: &Tensor<R>, p: f64) -> Result<f64> {
        if p == 0.0 {
            return self.reduce_all(ReduceOp::Sum, ReduceMap::NonZero, a);
        }
        Ok(self
            .reduce_all(ReduceOp::Sum, ReduceMap::AbsPow(p), a)?
            .powf(1.0 / p))
    }

    /// Inner product of two tensors
    fn dot(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<f64> {
        self.zip_reduce_all(ZipMap::Mul, a, b)
    }

    /// p-distance between two tensors
    fn dist(&self, a: &Tensor<R>, b: &Tensor<R>, p: f64) -> Result<f64> {
        if p <= 0.0 {
            return Err(Error::invalid_argument("p", "norm order must be positive"));
        }
        Ok(self
            .zip_reduce_all(ZipMap::AbsDiffPow(p), a, b)?
            .powf(1.0 / p))
    }
}
