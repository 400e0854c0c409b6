use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use web_sys::Document;

use tesuri_core::SHORTCUTS;

use crate::storage;

const HINT_ID: &str = "a11y-shortcut-hint";
const HINT_CLASS: &str = "a11y-hint";
const HINT_DELAY_MS: u32 = 2_000;
const HINT_DURATION_MS: u32 = 8_000;

/// Show the shortcut summary once per client: the marker is written when the
/// hint appears, so a visitor who never dismisses it still never sees it twice.
pub(crate) fn schedule_first_run(document: &Document) {
    if storage::hint_shown() {
        return;
    }
    let document = document.clone();
    Timeout::new(HINT_DELAY_MS, move || show(&document)).forget();
}

fn show(document: &Document) {
    let Some(body) = document.body() else {
        return;
    };
    let Ok(hint) = document.create_element("div") else {
        return;
    };
    hint.set_id(HINT_ID);
    hint.set_class_name(HINT_CLASS);
    hint.set_text_content(Some(&summary_text()));
    if body.append_child(&hint).is_err() {
        return;
    }
    storage::mark_hint_shown();

    let auto_dismiss = Rc::new(RefCell::new(None::<Timeout>));
    {
        let dismissed = hint.clone();
        let auto_dismiss = auto_dismiss.clone();
        EventListener::once(&hint, "click", move |_| {
            // Cancel the pending auto-dismiss so it cannot fire after the
            // element is already gone.
            auto_dismiss.borrow_mut().take();
            dismissed.remove();
        })
        .forget();
    }
    let timer = Timeout::new(HINT_DURATION_MS, move || hint.remove());
    *auto_dismiss.borrow_mut() = Some(timer);
}

fn summary_text() -> String {
    let mut text = String::from("Keyboard shortcuts: ");
    for (index, binding) in SHORTCUTS.iter().enumerate() {
        if index > 0 {
            text.push_str(", ");
        }
        text.push_str(binding.label);
        text.push(' ');
        text.push_str(binding.description);
    }
    text.push_str(". Click to dismiss.");
    text
}
