//! Bevy integration for the input buffer.
//!
//! Presses are captured every frame in `Update` and the queue is drained in
//! `FixedUpdate`, so gameplay sees at most one buffered action per simulation step.
//! Gameplay code reacts to [`ActionDispatched`] and answers with [`ActionFinished`]
//! once the effect (animation, dash, ...) is over.
//!
//! ```ignore
//! use bevy::prelude::*;
//! use input_buffer::{ActionDispatched, ActionFinished, ActionKind, InputBufferPlugin};
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(InputBufferPlugin::default())
//!     .add_systems(Update, perform_actions)
//!     .run();
//!
//! fn perform_actions(
//!     mut dispatched: MessageReader<ActionDispatched>,
//!     mut finished: MessageWriter<ActionFinished>,
//! ) {
//!     for action in dispatched.read() {
//!         if action.kind == ActionKind::Jump {
//!             // start jump ...
//!         }
//!         finished.write(ActionFinished);
//!     }
//! }
//! ```

use std::path::Path;

use bevy::prelude::*;

use crate::action::ActionKind;
use crate::bindings::InputBindings;
use crate::buffer::InputBuffer;
use crate::error::SettingsError;
use crate::settings::InputBufferSettings;

// ============================================================================
// Resources & Messages
// ============================================================================

/// The buffer as a Bevy resource.
#[derive(Resource, Deref, DerefMut, Debug, Default)]
pub struct ActionQueue(pub InputBuffer);

/// Binding table used by [`capture_actions`].
#[derive(Resource, Deref, DerefMut, Debug, Default)]
pub struct ActionBindings(pub InputBindings);

/// Written when the buffer releases an action to gameplay.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDispatched {
    pub kind: ActionKind,
}

/// Written by gameplay once the dispatched action is complete. Reopens the gate.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ActionFinished;

/// Drops all queued (not in-flight) actions, e.g. on death or level change.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ClearActionQueue;

/// System sets for the buffer pipeline.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum InputBufferSet {
    /// Records presses. Runs in `Update`.
    Capture,
    /// Applies finish/clear requests, then releases at most one action. Runs in `FixedUpdate`.
    Drain,
}

// ============================================================================
// Plugin
// ============================================================================

/// Adds the input buffer to an app.
///
/// Requires the resources of Bevy's `InputPlugin` and `TimePlugin`
/// (`ButtonInput<KeyCode>`, `ButtonInput<MouseButton>`, `Time<Virtual>`).
#[derive(Default)]
pub struct InputBufferPlugin {
    pub settings: InputBufferSettings,
}

impl InputBufferPlugin {
    pub fn with_settings(settings: InputBufferSettings) -> Self {
        Self { settings }
    }

    /// Builds the plugin from a RON settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Ok(Self::with_settings(InputBufferSettings::load(path)?))
    }
}

impl Plugin for InputBufferPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActionQueue(InputBuffer::from_settings(&self.settings)))
            .insert_resource(ActionBindings(self.settings.bindings.clone()))
            .add_message::<ActionDispatched>()
            .add_message::<ActionFinished>()
            .add_message::<ClearActionQueue>()
            .add_systems(Startup, log_input_buffer_config)
            .add_systems(Update, capture_actions.in_set(InputBufferSet::Capture))
            .add_systems(
                FixedUpdate,
                (apply_finished_actions, apply_clear_requests, drain_action_queue)
                    .chain()
                    .in_set(InputBufferSet::Drain),
            );
    }

    fn name(&self) -> &str {
        "InputBufferPlugin"
    }
}

fn log_input_buffer_config(queue: Res<ActionQueue>, bindings: Res<ActionBindings>) {
    info!(
        "Input buffer ready: capacity {}, validity window {:?}, {} bindings",
        queue.capacity(),
        queue.validity_window(),
        bindings.len()
    );

    for binding in bindings.iter() {
        debug!("  {:?} => {}", binding.input, binding.action);
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Submits an action for every bound input pressed this frame.
pub fn capture_actions(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<ActionBindings>,
    time: Res<Time<Virtual>>,
    mut queue: ResMut<ActionQueue>,
) {
    let now = time.elapsed();
    for kind in bindings.just_pressed(&keys, &mouse) {
        if !queue.submit(kind, now) {
            debug!("Dropped {kind} input, buffer is full");
        }
    }
}

/// Reopens the gate for every [`ActionFinished`] received.
pub fn apply_finished_actions(
    mut finished: MessageReader<ActionFinished>,
    mut queue: ResMut<ActionQueue>,
) {
    if finished.read().count() > 0 {
        queue.finish();
    }
}

/// Empties the queue when a [`ClearActionQueue`] was requested.
pub fn apply_clear_requests(
    mut requests: MessageReader<ClearActionQueue>,
    mut queue: ResMut<ActionQueue>,
) {
    if requests.read().count() > 0 {
        queue.clear();
    }
}

/// One simulation tick of the buffer.
pub fn drain_action_queue(
    time: Res<Time<Virtual>>,
    mut queue: ResMut<ActionQueue>,
    mut dispatched: MessageWriter<ActionDispatched>,
) {
    if let Some(kind) = queue.tick(time.elapsed()) {
        dispatched.write(ActionDispatched { kind });
    }
}
