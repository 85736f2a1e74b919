//! Comparison operations

use crate::error::Result;
use crate::ops::CompareOp;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Elementwise comparisons producing 0/1 flag tensors in the input dtype
pub trait CompareOps<R: Runtime> {
    /// `out[i] = op(a[i], b[i]) ? 1 : 0`
    fn compare(&self, op: CompareOp, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = op(a[i], scalar) ? 1 : 0`
    fn compare_scalar(&self, op: CompareOp, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;

    /// `a < b`
    fn lt(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Lt, a, b)
    }

    /// `a <= b`
    fn le(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Le, a, b)
    }

    /// `a > b`
    fn gt(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Gt, a, b)
    }

    /// `a >= b`
    fn ge(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Ge, a, b)
    }

    /// `a == b`
    fn eq(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Eq, a, b)
    }

    /// `a != b`
    fn ne(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.compare(CompareOp::Ne, a, b)
    }

    /// `a < scalar`
    fn lt_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Lt, a, scalar)
    }

    /// `a <= scalar`
    fn le_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Le, a, scalar)
    }

    /// `a > scalar`
    fn gt_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Gt, a, scalar)
    }

    /// `a >= scalar`
    fn ge_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Ge, a, scalar)
    }

    /// `a == scalar`
    fn eq_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Eq, a, scalar)
    }

    /// `a != scalar`
    fn ne_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.compare_scalar(CompareOp::Ne, a, scalar)
    }
}
