pub mod controller;
pub mod prefs;
pub mod shortcuts;

pub use controller::{Controller, EffectSink, PanelState};
pub use prefs::{
    Flag, FlagInfo, PreferenceSet, FLAGS, FLAG_COUNT, FLAG_TABLE, FONT_SIZE_DEFAULT, FONT_SIZE_MAX,
    FONT_SIZE_MIN, FONT_SIZE_STEP,
};
pub use shortcuts::{action_for, is_cancel, KeyChord, ShortcutAction, ShortcutBinding, SHORTCUTS};
