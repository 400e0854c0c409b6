#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutAction {
    TogglePanel,
    ToggleHighContrast,
    ToggleGrayscale,
    IncreaseFont,
    DecreaseFont,
    Reset,
}

/// A keystroke as reported by the browser: `key` plus modifier state.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

pub struct ShortcutBinding {
    pub label: &'static str,
    pub action: ShortcutAction,
    pub description: &'static str,
}

/// The fixed chord map, in the order the first-run hint lists it.
pub const SHORTCUTS: [ShortcutBinding; 6] = [
    ShortcutBinding {
        label: "Alt+A",
        action: ShortcutAction::TogglePanel,
        description: "open or close the accessibility panel",
    },
    ShortcutBinding {
        label: "Alt+C",
        action: ShortcutAction::ToggleHighContrast,
        description: "toggle high contrast",
    },
    ShortcutBinding {
        label: "Alt+G",
        action: ShortcutAction::ToggleGrayscale,
        description: "toggle grayscale",
    },
    ShortcutBinding {
        label: "Alt+Plus",
        action: ShortcutAction::IncreaseFont,
        description: "increase text size",
    },
    ShortcutBinding {
        label: "Alt+Minus",
        action: ShortcutAction::DecreaseFont,
        description: "decrease text size",
    },
    ShortcutBinding {
        label: "Alt+R",
        action: ShortcutAction::Reset,
        description: "reset all preferences",
    },
];

/// The cancel key closes the panel only as a bare keystroke; modified Escape
/// chords (Ctrl+Escape, Alt+Escape, …) belong to the browser.
pub fn is_cancel(chord: &KeyChord) -> bool {
    chord.key == "Escape" && !chord.alt && !chord.ctrl && !chord.shift && !chord.meta
}

/// Resolve a keystroke against the chord map. Chords with Ctrl or Meta held
/// are never claimed; those belong to the browser. Shift is tolerated because
/// `+` arrives shifted on most layouts.
pub fn action_for(chord: &KeyChord) -> Option<ShortcutAction> {
    if !chord.alt || chord.ctrl || chord.meta {
        return None;
    }
    let action = match chord.key {
        "a" | "A" => ShortcutAction::TogglePanel,
        "c" | "C" => ShortcutAction::ToggleHighContrast,
        "g" | "G" => ShortcutAction::ToggleGrayscale,
        "+" | "=" => ShortcutAction::IncreaseFont,
        "-" | "_" => ShortcutAction::DecreaseFont,
        "r" | "R" => ShortcutAction::Reset,
        _ => return None,
    };
    Some(action)
}
