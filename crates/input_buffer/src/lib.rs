//! Time-windowed buffering of player input.
//!
//! Players rarely press a button at the exact frame an action becomes possible. This
//! crate records discrete intents (jump, attack, dodge) as they happen, keeps them for
//! a short validity window, and hands them to gameplay one at a time, only after the
//! previous action reported that it finished. A combo then chains naturally without
//! the player having to spam the attack button.
//!
//! The core ([`InputBuffer`]) is engine agnostic and takes the current time as an
//! argument. [`InputBufferPlugin`] wires it into Bevy: presses are captured in
//! `Update` and the queue is drained in `FixedUpdate`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use input_buffer::{ActionKind, InputBuffer};
//!
//! let mut buffer = InputBuffer::new(3, Duration::from_secs(1));
//! assert!(buffer.submit(ActionKind::Attack, Duration::ZERO));
//! assert!(buffer.submit(ActionKind::Attack, Duration::from_millis(200)));
//!
//! // First attack starts, the second waits for it to finish.
//! assert_eq!(buffer.tick(Duration::from_millis(250)), Some(ActionKind::Attack));
//! assert_eq!(buffer.tick(Duration::from_millis(300)), None);
//!
//! buffer.finish();
//! assert_eq!(buffer.tick(Duration::from_millis(350)), Some(ActionKind::Attack));
//! ```

pub mod action;
pub mod bindings;
pub mod buffer;
pub mod error;
pub mod handler;
pub mod plugin;
pub mod settings;

// Re-export main types
pub use action::ActionKind;
pub use bindings::{InputBinding, InputBindings, PhysicalInput};
pub use buffer::{
    BufferStats, BufferedEvent, InputBuffer, DEFAULT_CAPACITY, DEFAULT_VALIDITY_WINDOW,
};
pub use error::SettingsError;
pub use handler::{ActionHandler, Completion};
pub use plugin::{
    ActionBindings, ActionDispatched, ActionFinished, ActionQueue, ClearActionQueue,
    InputBufferPlugin, InputBufferSet,
};
pub use settings::InputBufferSettings;
