//! Pointwise transform operations

use crate::error::Result;
use crate::ops::{BinaryOp, UnaryOp};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Pointwise transforms: unary maps, scalar ops, pairwise ops, and fused
/// multiply-accumulate variants
///
/// Every operation returns a fresh contiguous tensor except [`fill`], which
/// writes through the destination view in place. Pairwise operands must
/// match in dtype and element count; there is no broadcasting.
///
/// The named convenience methods all route through the four generic entry
/// points, so a backend only implements those.
///
/// [`fill`]: TransformOps::fill
pub trait TransformOps<R: Runtime> {
    /// `out[i] = op(a[i])`
    fn unary(&self, op: UnaryOp, a: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = op(a[i], scalar)`
    fn binary_scalar(&self, op: BinaryOp, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>>;

    /// `out[i] = op(a[i], alpha * b[i])`
    fn binary(&self, op: BinaryOp, a: &Tensor<R>, alpha: f64, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// `out[i] = t[i] + value * op(s1[i], s2[i])`
    fn addc(
        &self,
        op: BinaryOp,
        t: &Tensor<R>,
        value: f64,
        s1: &Tensor<R>,
        s2: &Tensor<R>,
    ) -> Result<Tensor<R>>;

    /// Clamp every element into `[min, max]`
    fn clamp(&self, a: &Tensor<R>, min: f64, max: f64) -> Result<Tensor<R>>;

    /// Fill the destination view with a constant, in place
    fn fill(&self, t: &Tensor<R>, value: f64) -> Result<()>;

    // ===== Unary maps =====

    /// Elementwise negation
    fn neg(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Neg, a)
    }

    /// Elementwise absolute value
    fn abs(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Abs, a)
    }

    /// Elementwise sign (-1, 0, or 1)
    fn sign(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Sign, a)
    }

    /// Elementwise square root
    fn sqrt(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Sqrt, a)
    }

    /// Elementwise exponential
    fn exp(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Exp, a)
    }

    /// Elementwise natural logarithm
    fn log(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Log, a)
    }

    /// Elementwise `ln(1 + x)`, accurate near zero
    fn log1p(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Log1p, a)
    }

    /// Elementwise sine
    fn sin(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Sin, a)
    }

    /// Elementwise cosine
    fn cos(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Cos, a)
    }

    /// Elementwise tangent
    fn tan(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Tan, a)
    }

    /// Elementwise arcsine
    fn asin(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Asin, a)
    }

    /// Elementwise arccosine
    fn acos(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Acos, a)
    }

    /// Elementwise arctangent
    fn atan(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Atan, a)
    }

    /// Elementwise hyperbolic sine
    fn sinh(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Sinh, a)
    }

    /// Elementwise hyperbolic cosine
    fn cosh(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Cosh, a)
    }

    /// Elementwise hyperbolic tangent
    fn tanh(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Tanh, a)
    }

    /// Elementwise ceiling
    fn ceil(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Ceil, a)
    }

    /// Elementwise floor
    fn floor(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Floor, a)
    }

    /// Elementwise rounding to nearest integer
    fn round(&self, a: &Tensor<R>) -> Result<Tensor<R>> {
        self.unary(UnaryOp::Round, a)
    }

    // ===== Scalar ops =====

    /// `out[i] = a[i] + scalar`
    fn add_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.binary_scalar(BinaryOp::Add, a, scalar)
    }

    /// `out[i] = a[i] * scalar`
    fn mul_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.binary_scalar(BinaryOp::Mul, a, scalar)
    }

    /// `out[i] = a[i] / scalar`
    fn div_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.binary_scalar(BinaryOp::Div, a, scalar)
    }

    /// `out[i] = a[i] ^ scalar`
    fn pow_scalar(&self, a: &Tensor<R>, scalar: f64) -> Result<Tensor<R>> {
        self.binary_scalar(BinaryOp::Pow, a, scalar)
    }

    // ===== Pairwise ops =====

    /// `out[i] = a[i] + value * b[i]`
    fn cadd(&self, a: &Tensor<R>, value: f64, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.binary(BinaryOp::Add, a, value, b)
    }

    /// `out[i] = a[i] * b[i]`
    fn cmul(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.binary(BinaryOp::Mul, a, 1.0, b)
    }

    /// `out[i] = a[i] / b[i]`
    fn cdiv(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.binary(BinaryOp::Div, a, 1.0, b)
    }

    /// `out[i] = a[i] ^ b[i]`
    fn cpow(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.binary(BinaryOp::Pow, a, 1.0, b)
    }

    /// `out[i] = atan2(a[i], b[i])`
    fn atan2(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        self.binary(BinaryOp::Atan2, a, 1.0, b)
    }

    // ===== Fused multiply-accumulate =====

    /// `out[i] = t[i] + value * s1[i] * s2[i]`
    fn addcmul(
        &self,
        t: &Tensor<R>,
        value: f64,
        s1: &Tensor<R>,
        s2: &Tensor<R>,
    ) -> Result<Tensor<R>> {
        self.addc(BinaryOp::Mul, t, value, s1, s2)
    }

    /// `out[i] = t[i] + value * s1[i] / s2[i]`
    fn addcdiv(
        &self,
        t: &Tensor<R>,
        value: f64,
        s1: &Tensor<R>,
        s2: &Tensor<R>,
    ) -> Result<Tensor<R>> {
        self.addc(BinaryOp::Div, t, value, s1, s2)
    }

    /// Zero the destination view, in place
    fn zero(&self, t: &Tensor<R>) -> Result<()> {
        self.fill(t, 0.0)
    }
}
