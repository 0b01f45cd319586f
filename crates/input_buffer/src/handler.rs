//! Consumer side of the buffer.

use crate::action::ActionKind;

/// What the handler reports back after receiving an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The effect is done; the next buffered action may be dispatched.
    Finished,
    /// The effect is still running (e.g. an attack animation). The caller must call
    /// [`InputBuffer::finish`](crate::InputBuffer::finish) once it ends.
    Pending,
}

/// Performs the gameplay effect of a dispatched action.
///
/// The buffer never knows what an action does; integrators implement this per game.
pub trait ActionHandler {
    fn handle(&mut self, kind: ActionKind) -> Completion;
}

impl<F> ActionHandler for F
where
    F: FnMut(ActionKind) -> Completion,
{
    fn handle(&mut self, kind: ActionKind) -> Completion {
        self(kind)
    }
}
