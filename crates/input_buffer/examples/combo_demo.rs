//! Headless demo of the input buffer.
//!
//! A scripted "player" mashes buttons faster than the character can act. The buffer
//! keeps the presses, drops what does not fit, lets stale presses expire, and feeds
//! the rest to the character one action at a time.
//!
//! Run with an optional RON settings file:
//! `cargo run -p input_buffer --example combo_demo -- input_buffer.ron`

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use input_buffer::{
    ActionDispatched, ActionFinished, ActionKind, ActionQueue, ClearActionQueue,
    InputBufferPlugin, InputBufferSet, PhysicalInput,
};

/// Simulated frame length (~60 FPS).
const FRAME: Duration = Duration::from_millis(16);
const FRAMES: u32 = 240;

/// Frame on which the character "dies" and buffered input is thrown away.
const DEATH_FRAME: u32 = 200;

/// Presses of the scripted player, by frame.
const SCRIPT: &[(u32, PhysicalInput)] = &[
    (5, PhysicalInput::Mouse(MouseButton::Left)),
    (8, PhysicalInput::Mouse(MouseButton::Left)),
    (11, PhysicalInput::Mouse(MouseButton::Left)),
    (14, PhysicalInput::Key(KeyCode::Space)),
    (60, PhysicalInput::Key(KeyCode::KeyQ)),
    (150, PhysicalInput::Key(KeyCode::Space)),
    (195, PhysicalInput::Mouse(MouseButton::Left)),
    (196, PhysicalInput::Key(KeyCode::KeyQ)),
];

/// The action the character is currently performing.
#[derive(Resource, Default)]
struct Performing {
    kind: Option<ActionKind>,
    remaining: f32,
}

fn animation_length(kind: ActionKind) -> f32 {
    match kind {
        ActionKind::Attack => 0.35,
        ActionKind::Jump => 0.5,
        ActionKind::Dodge => 0.25,
    }
}

fn main() {
    let plugin = match std::env::args().nth(1) {
        Some(path) => InputBufferPlugin::from_file(&path).unwrap_or_else(|err| {
            eprintln!("Could not load {path}: {err}, using defaults");
            InputBufferPlugin::default()
        }),
        None => InputBufferPlugin::default(),
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        LogPlugin {
            filter: "info,input_buffer=debug".into(),
            ..default()
        },
        plugin,
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
    .init_resource::<ButtonInput<KeyCode>>()
    .init_resource::<ButtonInput<MouseButton>>()
    .init_resource::<Performing>()
    .add_systems(
        Update,
        (
            play_script.before(InputBufferSet::Capture),
            (start_actions, advance_actions)
                .chain()
                .after(InputBufferSet::Capture),
        ),
    );

    app.finish();
    app.cleanup();

    for _ in 0..FRAMES {
        app.update();
    }

    let stats = app.world().resource::<ActionQueue>().stats();
    info!(
        "Done: {} submitted, {} rejected, {} expired, {} dispatched, {} cleared",
        stats.submitted, stats.rejected, stats.expired, stats.dispatched, stats.cleared
    );
}

fn play_script(
    mut frame: Local<u32>,
    mut keys: ResMut<ButtonInput<KeyCode>>,
    mut mouse: ResMut<ButtonInput<MouseButton>>,
    mut clear: MessageWriter<ClearActionQueue>,
) {
    *frame += 1;

    keys.release_all();
    keys.clear();
    mouse.release_all();
    mouse.clear();

    for (_, input) in SCRIPT.iter().filter(|(at, _)| *at == *frame) {
        match *input {
            PhysicalInput::Key(key) => keys.press(key),
            PhysicalInput::Mouse(button) => mouse.press(button),
        }
    }

    if *frame == DEATH_FRAME {
        warn!("Character died, dropping buffered input");
        clear.write(ClearActionQueue);
    }
}

fn start_actions(
    mut dispatched: MessageReader<ActionDispatched>,
    mut performing: ResMut<Performing>,
    time: Res<Time>,
) {
    for action in dispatched.read() {
        info!("{:>6.3}s  start {}", time.elapsed_secs(), action.kind);
        performing.kind = Some(action.kind);
        performing.remaining = animation_length(action.kind);
    }
}

fn advance_actions(
    mut performing: ResMut<Performing>,
    mut finished: MessageWriter<ActionFinished>,
    time: Res<Time>,
) {
    let Some(kind) = performing.kind else {
        return;
    };

    performing.remaining -= time.delta_secs();
    if performing.remaining <= 0.0 {
        info!("{:>6.3}s  end   {}", time.elapsed_secs(), kind);
        performing.kind = None;
        finished.write(ActionFinished);
    }
}
