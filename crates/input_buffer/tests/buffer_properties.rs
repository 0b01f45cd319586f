//! Behavioural tests for the engine-agnostic buffer:
//! - backpressure when full
//! - FIFO release order
//! - expiry and the one-discard-per-tick rule
//! - gate discipline and clearing

use std::time::Duration;

use input_buffer::{ActionHandler, ActionKind, BufferedEvent, Completion, InputBuffer};
use test_log::test;

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn queued(buffer: &InputBuffer) -> Vec<ActionKind> {
    buffer.iter().map(BufferedEvent::kind).collect()
}

const KINDS: [ActionKind; 3] = [ActionKind::Jump, ActionKind::Attack, ActionKind::Dodge];

#[test]
fn combo_scenario_with_full_buffer() {
    let mut buffer = InputBuffer::new(3, secs(1.0));

    assert!(buffer.submit(ActionKind::Jump, secs(0.0)));
    assert!(buffer.submit(ActionKind::Attack, secs(0.2)));
    assert!(buffer.submit(ActionKind::Dodge, secs(0.3)));
    assert!(!buffer.submit(ActionKind::Jump, secs(0.35)));
    assert_eq!(
        queued(&buffer),
        vec![ActionKind::Jump, ActionKind::Attack, ActionKind::Dodge]
    );

    assert_eq!(buffer.tick(secs(0.4)), Some(ActionKind::Jump));
    assert!(!buffer.is_gate_open());

    assert_eq!(buffer.tick(secs(0.5)), None);

    buffer.finish();
    assert_eq!(buffer.tick(secs(0.6)), Some(ActionKind::Attack));
    assert!(!buffer.is_gate_open());
    assert_eq!(queued(&buffer), vec![ActionKind::Dodge]);
}

#[test]
fn stale_dodge_is_discarded() {
    let mut buffer = InputBuffer::new(3, secs(1.0));
    assert!(buffer.submit(ActionKind::Dodge, secs(0.0)));

    assert_eq!(buffer.tick(secs(1.5)), None);
    assert!(buffer.is_empty());

    // Never shows up later either.
    for step in 0..10 {
        assert_eq!(buffer.tick(secs(1.6 + step as f64 * 0.1)), None);
    }
}

#[test]
fn saturated_buffer_rejects_every_submit_unchanged() {
    for capacity in 1..=5 {
        let mut buffer = InputBuffer::new(capacity, secs(1.0));
        for i in 0..capacity {
            assert!(buffer.submit(KINDS[i % KINDS.len()], secs(0.01 * i as f64)));
            assert_eq!(buffer.len(), i + 1);
        }

        let snapshot: Vec<BufferedEvent> = buffer.iter().copied().collect();
        for kind in KINDS {
            assert!(!buffer.submit(kind, secs(0.5)));
            assert_eq!(buffer.len(), capacity);
            assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), snapshot);
        }
    }
}

#[test]
fn release_order_matches_submit_order() {
    let mut buffer = InputBuffer::new(8, secs(10.0));
    let submitted: Vec<ActionKind> = (0..8).map(|i| KINDS[(i * 7 + 1) % 3]).collect();
    for (i, kind) in submitted.iter().enumerate() {
        assert!(buffer.submit(*kind, secs(0.1 * i as f64)));
    }

    let mut released = Vec::new();
    let mut now = 1.0;
    while !buffer.is_empty() {
        if let Some(kind) = buffer.tick(secs(now)) {
            released.push(kind);
            buffer.finish();
        }
        now += 0.05;
    }

    assert_eq!(released, submitted);
}

#[test]
fn interleaved_submit_and_tick_stays_fifo() {
    let mut buffer = InputBuffer::new(3, secs(5.0));
    let mut expected = Vec::new();
    let mut released = Vec::new();

    for step in 0..30 {
        let now = secs(step as f64 * 0.02);
        let kind = KINDS[step % 3];
        if buffer.submit(kind, now) {
            expected.push(kind);
        }
        if step % 2 == 0 {
            if let Some(kind) = buffer.tick(now) {
                released.push(kind);
            }
        }
        if step % 3 == 0 {
            buffer.finish();
        }
        assert!(buffer.len() <= buffer.capacity());
    }

    assert_eq!(released.as_slice(), &expected[..released.len()]);
}

#[test]
fn gate_stays_closed_without_finish() {
    let mut buffer = InputBuffer::new(3, secs(100.0));
    buffer.submit(ActionKind::Attack, secs(0.0));
    assert_eq!(buffer.tick(secs(0.0)), Some(ActionKind::Attack));

    for step in 1..50 {
        buffer.submit(ActionKind::Jump, secs(step as f64 * 0.1));
        assert_eq!(buffer.tick(secs(step as f64 * 0.1)), None);
    }
    assert!(buffer.is_full());

    buffer.finish();
    assert_eq!(buffer.tick(secs(5.0)), Some(ActionKind::Jump));
}

#[test]
fn expired_events_are_never_released() {
    let window = secs(0.5);
    let mut buffer = InputBuffer::new(3, window);
    buffer.submit(ActionKind::Jump, secs(0.0));
    buffer.submit(ActionKind::Attack, secs(0.1));
    buffer.submit(ActionKind::Dodge, secs(0.9));

    let mut released = Vec::new();
    let mut now = secs(1.0);
    while !buffer.is_empty() {
        let front = *buffer.front().unwrap();
        if let Some(kind) = buffer.tick(now) {
            assert!(front.age(now) <= window);
            released.push(kind);
            buffer.finish();
        }
        now += Duration::from_millis(10);
    }

    assert_eq!(released, vec![ActionKind::Dodge]);
    assert_eq!(buffer.stats().expired, 2);
}

#[test]
fn clear_then_tick_returns_nothing() {
    let mut buffer = InputBuffer::default();
    buffer.submit(ActionKind::Jump, secs(0.0));
    buffer.submit(ActionKind::Dodge, secs(0.1));

    buffer.clear();
    assert!(buffer.is_gate_open());
    assert_eq!(buffer.tick(secs(0.2)), None);
    assert_eq!(buffer.stats().cleared, 2);
}

/// Handler that keeps each action running for a fixed number of ticks.
struct TimedHandler {
    performed: Vec<ActionKind>,
}

impl ActionHandler for TimedHandler {
    fn handle(&mut self, kind: ActionKind) -> Completion {
        self.performed.push(kind);
        match kind {
            ActionKind::Attack => Completion::Pending,
            ActionKind::Jump | ActionKind::Dodge => Completion::Finished,
        }
    }
}

#[test]
fn handler_completion_drives_the_gate() {
    let mut buffer = InputBuffer::default();
    let mut handler = TimedHandler {
        performed: Vec::new(),
    };

    buffer.submit(ActionKind::Jump, secs(0.0));
    buffer.submit(ActionKind::Attack, secs(0.0));
    buffer.submit(ActionKind::Dodge, secs(0.0));

    assert_eq!(buffer.dispatch(secs(0.1), &mut handler), Some(ActionKind::Jump));
    assert_eq!(buffer.dispatch(secs(0.2), &mut handler), Some(ActionKind::Attack));
    // Attack animation still playing.
    assert_eq!(buffer.dispatch(secs(0.3), &mut handler), None);

    buffer.finish();
    assert_eq!(buffer.dispatch(secs(0.4), &mut handler), Some(ActionKind::Dodge));
    assert!(buffer.is_gate_open());

    assert_eq!(
        handler.performed,
        vec![ActionKind::Jump, ActionKind::Attack, ActionKind::Dodge]
    );
    assert_eq!(buffer.stats().dispatched, 3);
}

#[test]
fn handler_as_trait_object() {
    let mut buffer = InputBuffer::default();
    let mut handler = TimedHandler {
        performed: Vec::new(),
    };
    let dyn_handler: &mut dyn ActionHandler = &mut handler;

    buffer.submit(ActionKind::Dodge, secs(0.0));
    assert_eq!(buffer.dispatch(secs(0.0), dyn_handler), Some(ActionKind::Dodge));
    assert!(buffer.is_gate_open());
}
