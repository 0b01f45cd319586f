//! The input buffer itself.
//!
//! Captured intents are queued with the time they were recorded and released one at
//! a time on the simulation tick. A single gate makes sure only one action is in
//! flight: once an action is handed out, nothing else is dispatched until the
//! consumer calls [`InputBuffer::finish`].
//!
//! The buffer never reads a clock. Callers pass `now` into [`InputBuffer::submit`]
//! and [`InputBuffer::tick`], which keeps it deterministic and easy to test.

use std::collections::VecDeque;
use std::time::Duration;

use crate::action::ActionKind;
use crate::handler::{ActionHandler, Completion};
use crate::settings::InputBufferSettings;

/// Default maximum number of queued events.
pub const DEFAULT_CAPACITY: usize = 3;

/// Default age after which a queued event is discarded.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(1);

/// An intent captured at a specific point in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedEvent {
    kind: ActionKind,
    recorded_at: Duration,
}

impl BufferedEvent {
    pub fn new(kind: ActionKind, recorded_at: Duration) -> Self {
        Self { kind, recorded_at }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn recorded_at(&self) -> Duration {
        self.recorded_at
    }

    /// Age of the event at `now`. A clock that lags the recording time counts as zero.
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.recorded_at)
    }
}

/// Running totals of what happened to submitted events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Events accepted by [`InputBuffer::submit`].
    pub submitted: u64,
    /// Events refused because the buffer was full.
    pub rejected: u64,
    /// Events discarded on a tick because they outlived the validity window.
    pub expired: u64,
    /// Events handed to the consumer.
    pub dispatched: u64,
    /// Events dropped by [`InputBuffer::clear`].
    pub cleared: u64,
}

/// Bounded FIFO of buffered intents with a single-slot readiness gate.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    capacity: usize,
    validity_window: Duration,
    queue: VecDeque<BufferedEvent>,
    gate_open: bool,
    stats: BufferStats,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_VALIDITY_WINDOW)
    }
}

impl InputBuffer {
    /// Creates an empty buffer with an open gate.
    ///
    /// A capacity of zero is raised to one; validated settings never produce zero.
    pub fn new(capacity: usize, validity_window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            validity_window,
            queue: VecDeque::with_capacity(capacity),
            gate_open: true,
            stats: BufferStats::default(),
        }
    }

    /// Creates a buffer from validated settings.
    pub fn from_settings(settings: &InputBufferSettings) -> Self {
        Self::new(settings.capacity, settings.validity_window_duration())
    }

    /// Records `kind` at time `now`.
    ///
    /// Returns `false` and leaves the queue untouched when the buffer is full: the
    /// newest input is dropped so that older, already queued input keeps its place.
    pub fn submit(&mut self, kind: ActionKind, now: Duration) -> bool {
        if self.is_full() {
            self.stats.rejected += 1;
            tracing::debug!(
                "Input buffer full ({} events), dropping {}",
                self.capacity,
                kind
            );
            return false;
        }

        self.queue.push_back(BufferedEvent::new(kind, now));
        self.stats.submitted += 1;
        tracing::trace!("Buffered {} at {:?}", kind, now);
        true
    }

    /// Runs one simulation step and returns the action to perform, if any.
    ///
    /// Only the front event is looked at. If it has outlived the validity window it is
    /// discarded and this call returns `None`; the next event is not examined until
    /// the following tick. A valid front event is only released while the gate is
    /// open, and releasing it closes the gate.
    pub fn tick(&mut self, now: Duration) -> Option<ActionKind> {
        let front = *self.queue.front()?;

        if front.age(now) > self.validity_window {
            self.queue.pop_front();
            self.stats.expired += 1;
            tracing::debug!(
                "Discarding expired {} (age {:?} > {:?})",
                front.kind(),
                front.age(now),
                self.validity_window
            );
            return None;
        }

        if !self.gate_open {
            return None;
        }

        self.queue.pop_front();
        self.gate_open = false;
        self.stats.dispatched += 1;
        tracing::debug!("Dispatching {}", front.kind());
        Some(front.kind())
    }

    /// Ticks and hands a released action straight to `handler`.
    ///
    /// If the handler finishes synchronously the gate is reopened here; a pending
    /// handler must call [`InputBuffer::finish`] itself later on.
    pub fn dispatch<H>(&mut self, now: Duration, handler: &mut H) -> Option<ActionKind>
    where
        H: ActionHandler + ?Sized,
    {
        let kind = self.tick(now)?;
        if handler.handle(kind) == Completion::Finished {
            self.finish();
        }
        Some(kind)
    }

    /// Signals that the in-flight action is complete. Calling it with an open gate is
    /// a no-op.
    pub fn finish(&mut self) {
        self.gate_open = true;
    }

    /// Drops every queued event. An action already in flight is not affected and the
    /// gate keeps its state.
    pub fn clear(&mut self) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.stats.cleared += dropped as u64;
        if dropped > 0 {
            tracing::debug!("Cleared {} buffered events", dropped);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity. When shrinking below the current length, the newest
    /// events are dropped and counted as rejected.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if self.queue.len() > capacity {
            let dropped = self.queue.len() - capacity;
            self.queue.truncate(capacity);
            self.stats.rejected += dropped as u64;
            tracing::debug!(
                "Input buffer shrunk to {}, dropped {} newest events",
                capacity,
                dropped
            );
        }
        self.capacity = capacity;
    }

    pub fn validity_window(&self) -> Duration {
        self.validity_window
    }

    /// Changes the validity window. Applies from the next tick on.
    pub fn set_validity_window(&mut self, validity_window: Duration) {
        self.validity_window = validity_window;
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// `true` while no dispatched action is waiting for [`InputBuffer::finish`].
    pub fn is_gate_open(&self) -> bool {
        self.gate_open
    }

    /// The event that the next tick will look at.
    pub fn front(&self) -> Option<&BufferedEvent> {
        self.queue.front()
    }

    /// Queued events from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &BufferedEvent> {
        self.queue.iter()
    }

    pub fn stats(&self) -> BufferStats {
        self.stats
    }
}
