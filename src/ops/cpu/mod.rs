//! CPU implementations of the operation traits
//!
//! Thin trait impls on [`CpuClient`](crate::runtime::cpu::CpuClient); the
//! validation and kernel dispatch live in `runtime::cpu::helpers`.

mod compare;
mod criterion;
mod indexing;
mod linalg;
mod reduce;
mod transform;
