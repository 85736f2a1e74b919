//! CPU client implementation

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::runtime::RuntimeClient;

/// CPU client for operation dispatch
///
/// Operations are synchronous on the CPU backend, so the client is little
/// more than a handle to its device. The operation traits in
/// [`crate::ops::traits`] are implemented on this type.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self { device }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // CPU operations are synchronous, nothing to do
    }
}
