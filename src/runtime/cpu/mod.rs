//! CPU runtime: host-emulated backend
//!
//! Kernels run on host memory with the same dispatch structure an
//! accelerator backend would use: contiguous operands, flat task spaces,
//! and tile-based tree reductions.

mod client;
mod device;
pub mod helpers;
mod kernel;
pub mod kernels;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
