//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and the host-emulated CPU
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific compute unit)
//! └── Client (dispatches operations, owns the synchronization point)
//! ```
//!
//! Operations are implemented as traits on the runtime's client (see
//! [`crate::ops`]), so an accelerator backend plugs in by providing its own
//! `Runtime`/`Device`/`Client` triple and implementing the same op traits.

pub mod cpu;
pub mod helpers;

use crate::error::Result;

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices. It uses static
/// dispatch via generics for zero-cost abstraction.
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: Device;

    /// Client for dispatching operations
    type Client: RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Allocate device memory
    ///
    /// Returns a device pointer (u64). Allocation failure is reported as
    /// `Error::OutOfMemory` and is not retried.
    fn allocate(size_bytes: usize, device: &Self::Device) -> Result<u64>;

    /// Deallocate device memory
    fn deallocate(ptr: u64, size_bytes: usize, device: &Self::Device);

    /// Copy data from host to device
    fn copy_to_device(src: &[u8], dst: u64, device: &Self::Device) -> Result<()>;

    /// Copy data from device to host
    fn copy_from_device(src: u64, dst: &mut [u8], device: &Self::Device) -> Result<()>;

    /// Copy data within the device (device to device)
    fn copy_within_device(src: u64, dst: u64, size_bytes: usize, device: &Self::Device)
        -> Result<()>;

    /// Gather a strided view into a contiguous buffer
    ///
    /// This is how a non-contiguous tensor is materialized. The destination
    /// is filled in row-major order of `shape`; the source element for each
    /// logical index is located through `strides` (in elements) relative to
    /// `src_handle + src_byte_offset`.
    fn copy_strided(
        src_handle: u64,
        src_byte_offset: usize,
        dst_handle: u64,
        shape: &[usize],
        strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Scatter a contiguous buffer into a strided view
    ///
    /// Mirror image of [`Self::copy_strided`]: the source is read in
    /// row-major order of `shape` and written through `dst_strides` relative
    /// to `dst_handle + dst_byte_offset`. Used to commit computed results
    /// back into non-contiguous destination views.
    fn copy_to_strided(
        src_handle: u64,
        dst_handle: u64,
        dst_byte_offset: usize,
        shape: &[usize],
        dst_strides: &[isize],
        elem_size: usize,
        device: &Self::Device,
    ) -> Result<()>;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self);
}
