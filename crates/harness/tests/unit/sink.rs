//! Sink endpoint tests.

use imulsim_core::stream::{SinkStream, StallModel, StreamPort};
use imulsim_core::{Bits, ConfigError, SimError};
use pretty_assertions::assert_eq;

use crate::common::harness::{WORD, words};

/// Offers `msg` for one tick and returns the sink's verdict, or `None` if not ready.
fn offer(sink: &mut SinkStream, cycle: u64, msg: u32) -> Option<Result<(), SimError>> {
    let mut port = StreamPort::new(WORD);
    sink.drive(cycle, &mut port);
    port.send(Bits::from_u32(msg));
    let accepted = port.ready;
    let verdict = sink.commit(cycle, &port);
    accepted.then_some(verdict)
}

#[test]
fn accepts_expected_sequence_and_finishes() {
    let mut sink = SinkStream::new(WORD, words(&[6, 20, 12]), StallModel::never()).unwrap();
    for (cycle, v) in [6, 20, 12].into_iter().enumerate() {
        assert!(!sink.done());
        assert_eq!(offer(&mut sink, cycle as u64, v), Some(Ok(())));
    }
    assert!(sink.done());
    assert_eq!(sink.last_received(), Some(Bits::from_u32(12)));
}

#[test]
fn reports_the_first_mismatch() {
    let mut sink = SinkStream::new(WORD, words(&[7]), StallModel::never()).unwrap();
    let verdict = offer(&mut sink, 4, 6).unwrap();
    assert_eq!(
        verdict,
        Err(SimError::Mismatch {
            cycle: 4,
            index: 0,
            expected: Bits::from_u32(7),
            actual: Bits::from_u32(6),
        })
    );
    assert!(!sink.done());
    assert_eq!(sink.cursor(), 0);
}

#[test]
fn deasserts_ready_once_done() {
    let mut sink = SinkStream::new(WORD, words(&[1]), StallModel::never()).unwrap();
    assert_eq!(offer(&mut sink, 0, 1), Some(Ok(())));
    assert_eq!(offer(&mut sink, 1, 99), None);
    assert!(sink.done());
}

#[test]
fn forced_transfer_past_the_end_is_unexpected() {
    let mut sink = SinkStream::new(WORD, words(&[1]), StallModel::never()).unwrap();
    assert_eq!(offer(&mut sink, 0, 1), Some(Ok(())));

    let mut port = StreamPort::new(WORD);
    sink.drive(1, &mut port);
    assert!(!port.ready);
    port.ready = true;
    port.send(Bits::from_u32(99));
    assert_eq!(
        sink.commit(1, &port),
        Err(SimError::Unexpected {
            cycle: 1,
            index: 1,
            actual: Bits::from_u32(99),
        })
    );
    assert_eq!(sink.cursor(), 1);
}

#[test]
fn empty_sink_is_done_immediately() {
    let sink = SinkStream::new(WORD, Vec::new(), StallModel::never()).unwrap();
    assert!(sink.done());
    assert!(sink.is_empty());
}

#[test]
fn stalls_only_withhold_ready() {
    let mut sink = SinkStream::new(WORD, words(&[5; 200]), StallModel::seeded(8, 11, 1).unwrap())
        .unwrap();
    let mut cycle = 0;
    while !sink.done() {
        if offer(&mut sink, cycle, 5).is_none() {
            assert!(sink.stalled());
        }
        cycle += 1;
    }
    assert_eq!(sink.stall_model().stalls(), cycle - 200);
}

#[test]
fn rejects_messages_of_the_wrong_width() {
    let expected = vec![Bits::from_u64(7)];
    let err = SinkStream::new(WORD, expected, StallModel::never()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::WidthMismatch {
            stream: "sink",
            index: 0,
            expected: 32,
            actual: 64,
        }
    );
}
