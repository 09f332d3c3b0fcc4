//! App settings
//!
//! Presentation preferences live in one explicit settings object with a
//! load/save lifecycle against secure storage, passed to the UI layer by
//! reference instead of living in ambient global state.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::SecureStorage;
use crate::SETTINGS_KEY;

/// Presentation-layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Dark color scheme
    pub dark_mode: bool,
    /// Follow the platform's dynamic color scheme where supported
    pub dynamic_theme: bool,
    /// Accent color as ARGB
    pub accent_color: u32,
    /// Corner radius for cards, in dp
    pub corner_radius: f32,
    /// Haptic feedback on interactions
    pub haptics: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            dynamic_theme: false,
            accent_color: 0xFF6200EE,
            corner_radius: 12.0,
            haptics: true,
        }
    }
}

impl AppSettings {
    /// Load settings, falling back to defaults when nothing is stored
    /// or the stored blob is unusable
    pub fn load(storage: &dyn SecureStorage) -> Self {
        let bytes = match storage.get(SETTINGS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Falling back to default settings: {}", e);
                return Self::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!("Unparseable settings, using defaults: {}", e);
            Self::default()
        })
    }

    /// Persist the settings
    pub fn save(&self, storage: &mut dyn SecureStorage) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        storage.put(SETTINGS_KEY, &bytes)
    }
}
