use serde::Serialize;
use serde_json::Value;

pub const FONT_SIZE_MIN: u32 = 80;
pub const FONT_SIZE_MAX: u32 = 150;
pub const FONT_SIZE_STEP: u32 = 10;
pub const FONT_SIZE_DEFAULT: u32 = 100;

/// One boolean accommodation. Order matches [`FLAG_TABLE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    HighContrast,
    Grayscale,
    Invert,
    DyslexiaFont,
    HighlightLinks,
    ReadingGuide,
    NoMotion,
    LineSpacing,
    LetterSpacing,
    BigCursor,
    FocusMode,
    Saturate,
    HideImages,
}

pub const FLAG_COUNT: usize = 13;

pub const FLAGS: [Flag; FLAG_COUNT] = [
    Flag::HighContrast,
    Flag::Grayscale,
    Flag::Invert,
    Flag::DyslexiaFont,
    Flag::HighlightLinks,
    Flag::ReadingGuide,
    Flag::NoMotion,
    Flag::LineSpacing,
    Flag::LetterSpacing,
    Flag::BigCursor,
    Flag::FocusMode,
    Flag::Saturate,
    Flag::HideImages,
];

/// Static wiring metadata for one flag: its persisted field name, the marker
/// class applied to `<body>`, and the id of the toggle control that mirrors it.
pub struct FlagInfo {
    pub flag: Flag,
    pub field: &'static str,
    pub marker_class: &'static str,
    pub control_id: &'static str,
}

pub const FLAG_TABLE: [FlagInfo; FLAG_COUNT] = [
    FlagInfo {
        flag: Flag::HighContrast,
        field: "highContrast",
        marker_class: "high-contrast",
        control_id: "a11y-toggle-high-contrast",
    },
    FlagInfo {
        flag: Flag::Grayscale,
        field: "grayscale",
        marker_class: "grayscale",
        control_id: "a11y-toggle-grayscale",
    },
    FlagInfo {
        flag: Flag::Invert,
        field: "invert",
        marker_class: "invert-colors",
        control_id: "a11y-toggle-invert",
    },
    FlagInfo {
        flag: Flag::DyslexiaFont,
        field: "dyslexiaFont",
        marker_class: "dyslexia-font",
        control_id: "a11y-toggle-dyslexia",
    },
    FlagInfo {
        flag: Flag::HighlightLinks,
        field: "highlightLinks",
        marker_class: "highlight-links",
        control_id: "a11y-toggle-highlight",
    },
    FlagInfo {
        flag: Flag::ReadingGuide,
        field: "readingGuide",
        marker_class: "reading-guide",
        control_id: "a11y-toggle-reading-guide",
    },
    FlagInfo {
        flag: Flag::NoMotion,
        field: "noMotion",
        marker_class: "no-motion",
        control_id: "a11y-toggle-no-motion",
    },
    FlagInfo {
        flag: Flag::LineSpacing,
        field: "lineSpacing",
        marker_class: "line-spacing",
        control_id: "a11y-toggle-line-spacing",
    },
    FlagInfo {
        flag: Flag::LetterSpacing,
        field: "letterSpacing",
        marker_class: "letter-spacing",
        control_id: "a11y-toggle-letter-spacing",
    },
    FlagInfo {
        flag: Flag::BigCursor,
        field: "bigCursor",
        marker_class: "big-cursor",
        control_id: "a11y-toggle-big-cursor",
    },
    FlagInfo {
        flag: Flag::FocusMode,
        field: "focusMode",
        marker_class: "focus-mode",
        control_id: "a11y-toggle-focus-mode",
    },
    FlagInfo {
        flag: Flag::Saturate,
        field: "saturate",
        marker_class: "saturate",
        control_id: "a11y-toggle-saturate",
    },
    FlagInfo {
        flag: Flag::HideImages,
        field: "hideImages",
        marker_class: "hide-images",
        control_id: "a11y-toggle-hide-images",
    },
];

impl Flag {
    pub fn info(self) -> &'static FlagInfo {
        &FLAG_TABLE[self as usize]
    }
}

/// The full set of visitor accommodations. Serializes to the exact JSON shape
/// stored under the preferences key; loading goes through [`PreferenceSet::from_json`]
/// instead of a derived `Deserialize` so a single bad field degrades to its
/// default instead of poisoning the whole record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSet {
    pub font_size_percent: u32,
    pub high_contrast: bool,
    pub grayscale: bool,
    pub invert: bool,
    pub dyslexia_font: bool,
    pub highlight_links: bool,
    pub reading_guide: bool,
    pub no_motion: bool,
    pub line_spacing: bool,
    pub letter_spacing: bool,
    pub big_cursor: bool,
    pub focus_mode: bool,
    pub saturate: bool,
    pub hide_images: bool,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            font_size_percent: FONT_SIZE_DEFAULT,
            high_contrast: false,
            grayscale: false,
            invert: false,
            dyslexia_font: false,
            highlight_links: false,
            reading_guide: false,
            no_motion: false,
            line_spacing: false,
            letter_spacing: false,
            big_cursor: false,
            focus_mode: false,
            saturate: false,
            hide_images: false,
        }
    }
}

impl PreferenceSet {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::HighContrast => self.high_contrast,
            Flag::Grayscale => self.grayscale,
            Flag::Invert => self.invert,
            Flag::DyslexiaFont => self.dyslexia_font,
            Flag::HighlightLinks => self.highlight_links,
            Flag::ReadingGuide => self.reading_guide,
            Flag::NoMotion => self.no_motion,
            Flag::LineSpacing => self.line_spacing,
            Flag::LetterSpacing => self.letter_spacing,
            Flag::BigCursor => self.big_cursor,
            Flag::FocusMode => self.focus_mode,
            Flag::Saturate => self.saturate,
            Flag::HideImages => self.hide_images,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::HighContrast => self.high_contrast = on,
            Flag::Grayscale => self.grayscale = on,
            Flag::Invert => self.invert = on,
            Flag::DyslexiaFont => self.dyslexia_font = on,
            Flag::HighlightLinks => self.highlight_links = on,
            Flag::ReadingGuide => self.reading_guide = on,
            Flag::NoMotion => self.no_motion = on,
            Flag::LineSpacing => self.line_spacing = on,
            Flag::LetterSpacing => self.letter_spacing = on,
            Flag::BigCursor => self.big_cursor = on,
            Flag::FocusMode => self.focus_mode = on,
            Flag::Saturate => self.saturate = on,
            Flag::HideImages => self.hide_images = on,
        }
    }

    /// Count of enabled flags. Font size never contributes.
    pub fn active_count(&self) -> usize {
        FLAGS.iter().filter(|flag| self.flag(**flag)).count()
    }

    /// Snap an arbitrary persisted value back into the valid scale: round to
    /// the nearest step, clamp to the bounds.
    pub fn sanitize_font_size(raw: i64) -> u32 {
        let clamped = raw.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u32;
        let step = FONT_SIZE_STEP;
        ((clamped + step / 2) / step) * step
    }

    /// Overlay a persisted snapshot onto defaults, field by field. Unknown
    /// keys are ignored, type-mismatched keys keep their default. Returns
    /// `None` only when the payload is not a JSON object at all.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let object = value.as_object()?;
        let mut prefs = Self::default();
        if let Some(size) = object.get("fontSizePercent").and_then(Value::as_i64) {
            prefs.font_size_percent = Self::sanitize_font_size(size);
        }
        for info in &FLAG_TABLE {
            if let Some(on) = object.get(info.field).and_then(Value::as_bool) {
                prefs.set_flag(info.flag, on);
            }
        }
        Some(prefs)
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
