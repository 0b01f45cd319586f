//! Player intents that can be buffered.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A discrete player intent.
///
/// The set is closed on purpose: gameplay code matches on it exhaustively, so adding
/// a variant forces every handler to decide what the new intent does.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum ActionKind {
    Attack,
    Jump,
    Dodge,
}

impl ActionKind {
    /// Stable name used in logs and configuration files.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
