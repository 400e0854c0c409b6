use gloo::console;
use web_sys::Storage;

use tesuri_core::PreferenceSet;

const PREFS_KEY: &str = "a11y-state";
const HINT_KEY: &str = "a11y-hint-shown";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `None` means nothing usable was persisted — the slot is absent, the
/// storage is unreadable, or the snapshot is unparsable — and the caller
/// starts from defaults. The controls keep working for the session either way.
pub(crate) fn load_prefs() -> Option<PreferenceSet> {
    let raw = local_storage().and_then(|storage| storage.get_item(PREFS_KEY).ok().flatten())?;
    let prefs = PreferenceSet::from_json(&raw);
    if prefs.is_none() {
        console::warn!("a11y: stored preferences unreadable, falling back to defaults");
    }
    prefs
}

pub(crate) fn save_prefs(prefs: &PreferenceSet) {
    let Some(raw) = prefs.to_json() else {
        return;
    };
    let Some(storage) = local_storage() else {
        console::warn!("a11y: local storage unavailable, preferences held for this session only");
        return;
    };
    if storage.set_item(PREFS_KEY, &raw).is_err() {
        console::warn!("a11y: failed to persist preferences");
    }
}

/// The hint marker lives in its own slot so a reset of the preferences slot
/// never resurrects the onboarding hint.
pub(crate) fn hint_shown() -> bool {
    local_storage()
        .and_then(|storage| storage.get_item(HINT_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<bool>(&raw).ok())
        .unwrap_or(false)
}

pub(crate) fn mark_hint_shown() {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = storage.set_item(HINT_KEY, "true");
}
