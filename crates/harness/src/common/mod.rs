//! Common types shared by every component of the stream harness.
//!
//! This module provides the building blocks that flow between components. It includes:
//! 1. **Transfer Values:** A fixed-width bit vector carried on every stream.
//! 2. **Error Handling:** Construction-time configuration errors and fatal run-time failures.

/// Fixed-width bit vector used as the payload of every transfer.
pub mod bits;

/// Error types for configuration and simulation failures.
pub mod error;

pub use bits::Bits;
pub use error::{ConfigError, SimError};
