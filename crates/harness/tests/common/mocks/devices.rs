use std::collections::VecDeque;

use imulsim_core::stream::StreamPort;
use imulsim_core::{Bits, Device};

/// Buffered device that returns each request unchanged after `latency` cycles.
#[derive(Debug)]
pub struct DelayLine {
    latency: u64,
    capacity: usize,
    now: u64,
    queue: VecDeque<(u64, Bits)>,
}

impl DelayLine {
    pub fn new(latency: u64, capacity: usize) -> Self {
        Self {
            latency,
            capacity,
            now: 0,
            queue: VecDeque::new(),
        }
    }
}

impl Device for DelayLine {
    fn name(&self) -> &str {
        "DelayLine"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        req.ready = self.queue.len() < self.capacity;
        match self.queue.front() {
            Some(&(due, msg)) if due <= self.now => resp.send(msg),
            _ => resp.valid = false,
        }
    }

    fn commit(&mut self, req: &StreamPort, resp: &StreamPort) {
        if resp.fire() {
            let _ = self.queue.pop_front();
        }
        if req.fire() {
            self.queue.push_back((self.now + self.latency, req.msg));
        }
        self.now += 1;
    }

    fn line_trace(&self) -> String {
        format!("({})", self.queue.len())
    }
}

/// Zero-latency wire that remembers every response the sink accepted.
#[derive(Debug, Default)]
pub struct Recorder {
    pub delivered: Vec<Bits>,
}

impl Device for Recorder {
    fn name(&self) -> &str {
        "Recorder"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        resp.valid = req.valid;
        resp.msg = req.msg;
        req.ready = resp.ready;
    }

    fn commit(&mut self, _req: &StreamPort, resp: &StreamPort) {
        if resp.fire() {
            self.delivered.push(resp.msg);
        }
    }
}

/// Accepts every request and never responds.
#[derive(Debug, Default)]
pub struct BlackHole {
    pub swallowed: usize,
}

impl Device for BlackHole {
    fn name(&self) -> &str {
        "BlackHole"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        req.ready = true;
        resp.valid = false;
    }

    fn commit(&mut self, req: &StreamPort, _resp: &StreamPort) {
        if req.fire() {
            self.swallowed += 1;
        }
    }
}

/// Pass-through wire that flips the low bit of the response at `index`.
#[derive(Debug)]
pub struct Corrupting {
    index: usize,
    forwarded: usize,
}

impl Corrupting {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            forwarded: 0,
        }
    }
}

impl Device for Corrupting {
    fn name(&self) -> &str {
        "Corrupting"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        resp.valid = req.valid;
        resp.msg = if self.forwarded == self.index {
            Bits::new(req.msg.nbits(), req.msg.value() ^ 1).unwrap()
        } else {
            req.msg
        };
        req.ready = resp.ready;
    }

    fn commit(&mut self, req: &StreamPort, _resp: &StreamPort) {
        if req.fire() {
            self.forwarded += 1;
        }
    }
}

/// Pass-through wire that also tries to drive the endpoints' own signals.
///
/// Every tick it asserts `req.valid` with a bogus message and forces `resp.ready`.
#[derive(Debug, Default)]
pub struct Meddler;

impl Device for Meddler {
    fn name(&self) -> &str {
        "Meddler"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        let (offered, msg, accepting) = (req.valid, req.msg, resp.ready);
        req.valid = true;
        req.msg = Bits::from_u32(0xbad);
        resp.ready = true;

        resp.valid = offered;
        resp.msg = msg;
        req.ready = accepting;
    }

    fn commit(&mut self, _req: &StreamPort, _resp: &StreamPort) {}
}

/// Echoes the first request, then emits `0xdead` on every later tick and forces
/// `resp.ready` to push it through.
#[derive(Debug, Default)]
pub struct Babbler {
    answered: bool,
}

impl Device for Babbler {
    fn name(&self) -> &str {
        "Babbler"
    }

    fn drive(&self, req: &mut StreamPort, resp: &mut StreamPort) {
        if self.answered {
            req.ready = false;
            resp.ready = true;
            resp.send(Bits::from_u32(0xdead));
        } else {
            resp.valid = req.valid;
            resp.msg = req.msg;
            req.ready = resp.ready;
        }
    }

    fn commit(&mut self, _req: &StreamPort, resp: &StreamPort) {
        if resp.fire() {
            self.answered = true;
        }
    }
}
