//! Operation traits implemented by backend clients
//!
//! Each engine is one trait generic over the runtime. A backend client
//! implements the traits whose operations it supports; callers stay generic
//! and dispatch through the client without knowing the backend.

mod compare;
mod criterion;
mod indexing;
mod kernel;
mod linalg;
mod reduce;
mod transform;

pub use compare::CompareOps;
pub use criterion::CriterionOps;
pub use indexing::IndexingOps;
pub use kernel::BlasKernel;
pub use linalg::LinalgOps;
pub use reduce::ReduceOps;
pub use transform::TransformOps;
