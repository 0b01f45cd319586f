//! Construction-time configuration, persisted as RON.
//!
//! ```ron
//! (
//!     capacity: 3,
//!     validity_window: 1.0,
//!     bindings: [
//!         (input: Key(Space), action: Jump),
//!         (input: Mouse(Left), action: Attack),
//!         (input: Key(KeyQ), action: Dodge),
//!     ],
//! )
//! ```
//!
//! Missing fields fall back to their defaults, so a file may only override what it
//! cares about.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bindings::InputBindings;
use crate::buffer::{DEFAULT_CAPACITY, DEFAULT_VALIDITY_WINDOW};
use crate::error::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBufferSettings {
    /// Maximum number of events held at once.
    pub capacity: usize,
    /// Seconds a queued event stays valid.
    pub validity_window: f64,
    pub bindings: InputBindings,
}

impl Default for InputBufferSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            validity_window: DEFAULT_VALIDITY_WINDOW.as_secs_f64(),
            bindings: InputBindings::default(),
        }
    }
}

impl InputBufferSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        // Anything a `Duration` cannot represent is rejected here.
        if Duration::try_from_secs_f64(self.validity_window).is_err() {
            return Err(SettingsError::InvalidValidityWindow(self.validity_window));
        }
        Ok(())
    }

    /// The validity window as a [`Duration`]. Invalid values map to zero; call
    /// [`validate`](Self::validate) first to reject them instead.
    pub fn validity_window_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.validity_window).unwrap_or(Duration::ZERO)
    }

    /// Parses and validates settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Reads settings from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_ron_str(&text)?;
        tracing::info!("Input buffer settings loaded from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Validates and writes settings to a RON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        self.validate()?;
        std::fs::write(path.as_ref(), self.to_ron_string()?)?;
        tracing::info!("Input buffer settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
