//! Devices under test.
//!
//! This module defines the streaming contract a device must obey and ships two
//! reference implementations:
//! 1. **Contract:** The `Device` trait (request input, response output, both valid/ready).
//! 2. **Messages:** Packing of multiplier operands into request words and truncation of products.
//! 3. **Multiplier:** `IntMulFl`, a functional-level 32-bit integer multiplier.
//! 4. **Wire:** `PassThrough`, a zero-latency combinational connection.

/// Functional-level integer multiplier.
pub mod imul;

/// Multiplier request/response message helpers.
pub mod msg;

/// Zero-latency pass-through device.
pub mod passthrough;

/// Device trait shared by every device under test.
pub mod traits;

pub use imul::IntMulFl;
pub use passthrough::PassThrough;
pub use traits::Device;

use crate::common::ConfigError;
use crate::config::{DeviceConfig, DeviceKind};

/// Builds the device selected by `config`.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroCapacity`] when a buffered device is given no buffer.
pub fn build(config: &DeviceConfig) -> Result<Box<dyn Device>, ConfigError> {
    Ok(match config.kind {
        DeviceKind::IntMulFl => Box::new(IntMulFl::with_capacity(config.queue_capacity)?),
        DeviceKind::PassThrough => Box::new(PassThrough::new()),
    })
}
