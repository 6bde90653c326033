//! App state persistence - JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::{AppState, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub welcome_dismissed: bool,
    /// Prefills the ZIP input on the next run.
    pub last_zip_code: Option<String>,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState, previous_welcome_dismissed: bool) -> PersistedState {
    let zip = app.zip_input.trim();
    PersistedState {
        welcome_dismissed: previous_welcome_dismissed || app.overlay != Overlay::Welcome,
        last_zip_code: (zip.len() == 5).then(|| zip.to_string()),
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: &PersistedState) {
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
    if let Some(zip) = &state.last_zip_code {
        app.zip_input = zip.clone();
        app.zip_changed();
    }
}
