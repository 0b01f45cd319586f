//! Mapping from physical inputs to buffered actions.
//!
//! The table is plain data so it can live in the settings file and be rebound at
//! runtime. It only decides *which* action a press means; the buffer decides *when*
//! that action runs.

use bevy::input::ButtonInput;
use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use serde::{Deserialize, Serialize};

use crate::action::ActionKind;

/// A physical button that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalInput {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl PhysicalInput {
    /// Whether this input went down during the current frame.
    pub fn just_pressed(
        &self,
        keys: &ButtonInput<KeyCode>,
        mouse: &ButtonInput<MouseButton>,
    ) -> bool {
        match *self {
            Self::Key(key) => keys.just_pressed(key),
            Self::Mouse(button) => mouse.just_pressed(button),
        }
    }
}

impl From<KeyCode> for PhysicalInput {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for PhysicalInput {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// One entry of the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBinding {
    pub input: PhysicalInput,
    pub action: ActionKind,
}

/// Ordered binding table. Each physical input maps to at most one action, while an
/// action may have several inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBindings {
    bindings: Vec<InputBinding>,
}

impl Default for InputBindings {
    /// Space jumps, left mouse attacks, Q dodges.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::Space, ActionKind::Jump);
        bindings.bind(MouseButton::Left, ActionKind::Attack);
        bindings.bind(KeyCode::KeyQ, ActionKind::Dodge);
        bindings
    }
}

impl InputBindings {
    /// A table without any bindings.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `input` to `action`, replacing any previous action for that input.
    pub fn bind(&mut self, input: impl Into<PhysicalInput>, action: ActionKind) -> &mut Self {
        let input = input.into();
        match self.bindings.iter_mut().find(|b| b.input == input) {
            Some(existing) => existing.action = action,
            None => self.bindings.push(InputBinding { input, action }),
        }
        self
    }

    /// Removes the binding for `input`. Returns the action it was bound to.
    pub fn unbind(&mut self, input: impl Into<PhysicalInput>) -> Option<ActionKind> {
        let input = input.into();
        let index = self.bindings.iter().position(|b| b.input == input)?;
        Some(self.bindings.remove(index).action)
    }

    pub fn kind_for(&self, input: impl Into<PhysicalInput>) -> Option<ActionKind> {
        let input = input.into();
        self.bindings
            .iter()
            .find(|b| b.input == input)
            .map(|b| b.action)
    }

    /// All inputs bound to `action`.
    pub fn inputs_for(&self, action: ActionKind) -> impl Iterator<Item = PhysicalInput> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.action == action)
            .map(|b| b.input)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Actions whose inputs were pressed this frame, in table order.
    pub fn just_pressed(
        &self,
        keys: &ButtonInput<KeyCode>,
        mouse: &ButtonInput<MouseButton>,
    ) -> Vec<ActionKind> {
        self.bindings
            .iter()
            .filter(|b| b.input.just_pressed(keys, mouse))
            .map(|b| b.action)
            .collect()
    }
}
