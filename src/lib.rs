//! # gtensor
//!
//! **Strided, reference-counted tensors with elementwise, reduction, and
//! indexing engines.**
//!
//! gtensor provides n-dimensional arrays backed by flat, refcounted device
//! buffers. Views (transpose, narrow, reshape) are zero-copy: they share the
//! underlying storage and only change the shape/stride/offset layout. Compute
//! is dispatched through a pluggable [`runtime::Runtime`] backend; the crate
//! ships a host-emulated CPU backend.
//!
//! ## Engines
//!
//! - **Transform**: pointwise unary/binary maps (`exp`, `clamp`, `cadd`,
//!   comparisons producing 0/1 flags, ...)
//! - **Reduce**: collapse one dimension or the whole tensor under
//!   sum/product/max/min/norm, with distinct innermost-dimension and
//!   outer-dimension kernel strategies
//! - **Indexing**: gather/scatter along one dimension driven by a 1-based
//!   index vector
//! - **Linalg**: `addmv`/`addmm`/`addr` over a column-major BLAS capability
//!   with unit-stride transpose detection, plus `renorm`
//! - **Criterion**: fused KL-divergence loss and gradient
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gtensor::prelude::*;
//!
//! let device = CpuDevice::new();
//! let client = CpuRuntime::default_client(&device);
//!
//! let a = Tensor::<CpuRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device);
//! let e = client.exp(&a)?;
//! let s = client.sum(&e, 1)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): Multi-threaded CPU kernels

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// The default runtime backend (CPU).
pub type DefaultRuntime = runtime::cpu::CpuRuntime;

/// Commonly used types and traits.
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        BinaryOp, CompareOp, CompareOps, CriterionOps, IndexingOps, LinalgOps, ReduceOp,
        ReduceOps, TransformOps, UnaryOp,
    };
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::tensor::Tensor;
}
