//! Zero-latency pass-through device.
//!
//! Connects the request port straight to the response port: the response side sees the
//! request this very tick and the request side sees the sink's `ready`. Useful for
//! checking the source and sink on their own.

use super::traits::Device;
use crate::stream::StreamPort;

/// Combinational wire from request to response.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl PassThrough {
    /// Creates a pass-through device.
    pub const fn new() -> Self {
        Self
    }
}

impl Device for PassThrough {
    fn name(&self) -> &str {
        "PassThrough"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        resp.valid = req.valid;
        resp.msg = req.msg;
        req.ready = resp.ready;
    }

    fn commit(&mut self, _req: &StreamPort, _resp: &StreamPort) {}
}
