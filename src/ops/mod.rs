//! Tensor operations
//!
//! Operation *kinds* are plain enums ([`UnaryOp`], [`BinaryOp`],
//! [`CompareOp`], [`ReduceOp`]) shared by every backend; operation *traits*
//! (in [`traits`]) are implemented by a runtime's client. The CPU
//! implementations live in [`cpu`].

mod dispatch;
mod elementwise;
mod reduce;

pub mod cpu;
pub mod traits;

pub use elementwise::{BinaryOp, CompareOp, UnaryOp};
pub use reduce::{reduce_output_shape, ReduceMap, ReduceOp, ZipMap};
pub use traits::{
    BlasKernel, CompareOps, CriterionOps, IndexingOps, LinalgOps, ReduceOps, TransformOps,
};

/// Maximum tensor rank the reduction and indexing kernel families accept.
///
/// Pointwise transforms and view machinery handle any rank; the kernels
/// that decompose coordinates are written for up to 4 dimensions and reject
/// higher ranks with `Error::UnsupportedRank`.
pub const MAX_KERNEL_DIMS: usize = 4;
