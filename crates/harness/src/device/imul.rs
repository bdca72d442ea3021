//! Functional-level integer multiplier.
//!
//! The product is computed the moment a request is accepted and parked in an output
//! queue until the sink takes it. Responses therefore appear one cycle after their
//! request. With a queue of two or more entries the device sustains one transfer per
//! cycle on both ports; with a single entry it alternates accept and drain.

use std::collections::VecDeque;

use tracing::debug;

use super::msg::{reference_product, unpack_req};
use super::traits::Device;
use crate::common::{Bits, ConfigError};
use crate::stream::StreamPort;

/// Default output queue depth.
pub const DEFAULT_CAPACITY: usize = 2;

/// Functional-level 32x32 -> 32 signed multiplier with a valid/ready interface.
#[derive(Clone, Debug)]
pub struct IntMulFl {
    queue: VecDeque<Bits>,
    capacity: usize,
}

impl IntMulFl {
    /// Creates a multiplier with the default output queue depth.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Creates a multiplier with an output queue of `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Number of responses waiting in the output queue.
    pub fn occupancy(&self) -> usize {
        self.queue.len()
    }

    /// Output queue depth.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Computes the response for one request word.
    pub const fn multiply(req: Bits) -> Bits {
        let (a, b) = unpack_req(req);
        Bits::from_u32(reference_product(a, b))
    }
}

impl Default for IntMulFl {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for IntMulFl {
    fn name(&self) -> &str {
        "IntMulFL"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        req.ready = self.queue.len() < self.capacity;
        match self.queue.front() {
            Some(&msg) => resp.send(msg),
            None => {
                resp.valid = false;
                resp.msg = Bits::from_u32(0);
            }
        }
    }

    fn commit(&mut self, req: &StreamPort, resp: &StreamPort) {
        if resp.fire() {
            let _ = self.queue.pop_front();
        }
        if req.fire() {
            let product = Self::multiply(req.msg);
            let (a, b) = unpack_req(req.msg);
            debug!(a = a as i32, b = b as i32, product = product.as_signed(), "imul accepted");
            self.queue.push_back(product);
        }
    }

    fn line_trace(&self) -> String {
        let width = Bits::from_u32(0).hex_width();
        match self.queue.front() {
            Some(msg) => format!("({msg}|{})", self.queue.len()),
            None => format!("({:width$}|0)", ""),
        }
    }
}
