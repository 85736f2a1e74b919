//! Reduction operation kinds and shape helpers

use crate::dtype::Element;
use crate::tensor::Shape;

/// Reduction operators
///
/// All four are associative and commutative, so partial results can be
/// combined in any order (tile trees, serial accumulation, parallel chunks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Sum of elements
    Sum,
    /// Product of elements
    Prod,
    /// Maximum element
    Max,
    /// Minimum element
    Min,
}

impl ReduceOp {
    /// The operator identity in the element type
    ///
    /// Max/min seed from the most negative/positive *finite* value of the
    /// element type, so reducing a single element always returns it.
    #[inline]
    pub fn identity<T: Element>(self) -> T {
        match self {
            ReduceOp::Sum => T::zero(),
            ReduceOp::Prod => T::one(),
            ReduceOp::Max => T::min_finite(),
            ReduceOp::Min => T::max_finite(),
        }
    }

    /// Combine an accumulator with a new value
    #[inline]
    pub fn combine<T: Element>(self, acc: T, val: T) -> T {
        match self {
            ReduceOp::Sum => acc + val,
            ReduceOp::Prod => acc * val,
            ReduceOp::Max => {
                if val > acc {
                    val
                } else {
                    acc
                }
            }
            ReduceOp::Min => {
                if val < acc {
                    val
                } else {
                    acc
                }
            }
        }
    }

    /// Identity for f64 accumulators (whole-tensor reductions)
    #[inline]
    pub fn identity_f64(self) -> f64 {
        match self {
            ReduceOp::Sum => 0.0,
            ReduceOp::Prod => 1.0,
            ReduceOp::Max => f64::MIN,
            ReduceOp::Min => f64::MAX,
        }
    }

    /// Combine for f64 accumulators (whole-tensor reductions)
    #[inline]
    pub fn combine_f64(self, acc: f64, val: f64) -> f64 {
        match self {
            ReduceOp::Sum => acc + val,
            ReduceOp::Prod => acc * val,
            ReduceOp::Max => {
                if val > acc {
                    val
                } else {
                    acc
                }
            }
            ReduceOp::Min => {
                if val < acc {
                    val
                } else {
                    acc
                }
            }
        }
    }
}

/// Per-element pre-map applied before a reduction combine
///
/// This is what turns a plain reduction engine into a fused
/// transform-reduce: norms sum `|x|^p` without materializing the powered
/// tensor, and variance sums squared deviations from a precomputed mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReduceMap {
    /// x
    Identity,
    /// |x|^p
    AbsPow(f64),
    /// 1 if x != 0 else 0 (the p = 0 "norm" counts non-zeros)
    NonZero,
    /// (x - c)^2
    ShiftSq(f64),
}

impl ReduceMap {
    /// Apply the pre-map
    #[inline]
    pub fn apply<T: Element>(self, x: T) -> T {
        match self {
            ReduceMap::Identity => x,
            ReduceMap::AbsPow(p) => T::from_f64(x.to_f64().abs().powf(p)),
            ReduceMap::NonZero => {
                if x.to_f64() != 0.0 {
                    T::one()
                } else {
                    T::zero()
                }
            }
            ReduceMap::ShiftSq(c) => {
                let d = x.to_f64() - c;
                T::from_f64(d * d)
            }
        }
    }
}

/// Pairwise map for fused two-tensor sum-reductions (inner products)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZipMap {
    /// x * y (dot product)
    Mul,
    /// |x - y|^p (p-distance)
    AbsDiffPow(f64),
    /// y > 0 ? y * (ln(y) - x) : 0 (KL-divergence term; x is the input
    /// log-probability, y the target probability)
    KlDiv,
}

impl ZipMap {
    /// Apply the pairwise map in f64 precision
    #[inline]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            ZipMap::Mul => x * y,
            ZipMap::AbsDiffPow(p) => (x - y).abs().powf(p),
            ZipMap::KlDiv => {
                if y > 0.0 {
                    y * (y.ln() - x)
                } else {
                    0.0
                }
            }
        }
    }
}

/// Output shape of a single-dimension reduction
///
/// The reduced dimension survives with extent 1, so the result broadcasts
/// and indexes like the input.
pub fn reduce_output_shape(shape: &[usize], dim: usize) -> Shape {
    let mut out: Shape = shape.iter().copied().collect();
    if dim < out.len() {
        out[dim] = 1;
    }
    out
}
