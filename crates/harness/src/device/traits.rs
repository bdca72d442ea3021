//! Device trait for valid/ready stream devices.
//!
//! This module defines the `Device` trait implemented by every device the harness can
//! test. It provides:
//! 1. **Identification:** `name` for logs and traces.
//! 2. **Drive:** Combinational outputs (`req.ready`, `resp.valid`, `resp.msg`) for the current tick.
//! 3. **Commit:** Registered-state update once every port of the tick is settled.
//! 4. **Observability:** An optional one-column line trace.
//!
//! All implementors must be `Send` so a driver can move a whole harness onto a worker thread.

use crate::stream::StreamPort;

/// A device with one request input and one response output.
///
/// On every tick the harness first lets the source drive `req.valid`/`req.msg` and the
/// sink drive `resp.ready`, then calls [`Device::drive`], then calls [`Device::commit`]
/// with the settled ports. `resp.valid` must not depend on `resp.ready` in the same
/// tick.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"IntMulFL"`).
    fn name(&self) -> &str;

    /// Drives `req.ready`, `resp.valid` and `resp.msg` from registered state and the
    /// signals already driven this tick.
    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort);

    /// Updates registered state from the settled ports of this tick.
    fn commit(&mut self, req: &StreamPort, resp: &StreamPort);

    /// Returns a short description of internal state for the line trace.
    fn line_trace(&self) -> String {
        String::new()
    }
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        (**self).drive(req, resp);
    }

    fn commit(&mut self, req: &StreamPort, resp: &StreamPort) {
        (**self).commit(req, resp);
    }

    fn line_trace(&self) -> String {
        (**self).line_trace()
    }
}
