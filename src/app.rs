use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Window};

use tesuri_core::{action_for, is_cancel, Controller, Flag, KeyChord, ShortcutAction, FLAG_TABLE};

use crate::effects::{self, DomEffects};
use crate::hint;
use crate::storage;

const LAUNCHER_ID: &str = "a11y-fab";
const PANEL_ID: &str = "a11y-panel";
const SCRIM_ID: &str = "a11y-overlay";
const CLOSE_ID: &str = "a11y-close";
const FONT_DECREASE_ID: &str = "a11y-font-decrease";
const FONT_INCREASE_ID: &str = "a11y-font-increase";
const RESET_ID: &str = "a11y-reset";
const RESET_PROMPT: &str = "Reset all accessibility preferences?";

type Shared = Rc<RefCell<Controller<DomEffects>>>;

/// Attach the controller to the current page. A page without the launcher and
/// panel markup simply does not get the widget; a partially present control
/// set skips only the missing pieces.
pub(crate) fn mount() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(launcher) = effects::element_by_id(&document, LAUNCHER_ID) else {
        return;
    };
    let Some(panel) = effects::element_by_id(&document, PANEL_ID) else {
        return;
    };
    let scrim = effects::element_by_id(&document, SCRIM_ID);
    let Some(sink) = DomEffects::bind(&window, &document, &launcher, &panel, scrim.clone()) else {
        return;
    };

    let stored = storage::load_prefs();
    let had_snapshot = stored.is_some();
    let controller: Shared = Rc::new(RefCell::new(Controller::new(
        stored.unwrap_or_default(),
        sink,
    )));
    // Only a persisted snapshot warrants announcing the motion preference at
    // mount; a fresh session has nothing to tell the animation layer.
    if had_snapshot {
        controller.borrow_mut().apply_all();
    } else {
        controller.borrow_mut().apply_defaults();
    }

    wire_panel_controls(&document, &launcher, scrim, &controller);
    wire_font_steppers(&document, &controller);
    wire_flag_toggles(&document, &controller);
    wire_reset(&document, &window, &controller);
    wire_shortcuts(&window, &controller);
    hint::schedule_first_run(&document);
}

fn on_click(target: &HtmlElement, callback: impl FnMut(&Event) + 'static) {
    EventListener::new(target, "click", callback).forget();
}

fn wire_panel_controls(
    document: &Document,
    launcher: &HtmlElement,
    scrim: Option<HtmlElement>,
    controller: &Shared,
) {
    {
        let controller = controller.clone();
        on_click(launcher, move |_| {
            if let Ok(mut active) = controller.try_borrow_mut() {
                active.toggle_panel();
            }
        });
    }
    let close_controls = [scrim, effects::element_by_id(document, CLOSE_ID)];
    for control in close_controls.into_iter().flatten() {
        let controller = controller.clone();
        on_click(&control, move |_| {
            if let Ok(mut active) = controller.try_borrow_mut() {
                active.close_panel();
            }
        });
    }
}

fn wire_font_steppers(document: &Document, controller: &Shared) {
    for (id, steps) in [(FONT_DECREASE_ID, -1), (FONT_INCREASE_ID, 1)] {
        let Some(control) = effects::element_by_id(document, id) else {
            continue;
        };
        let controller = controller.clone();
        on_click(&control, move |_| step_font(&controller, steps));
    }
}

fn wire_flag_toggles(document: &Document, controller: &Shared) {
    for info in &FLAG_TABLE {
        let Some(control) = effects::element_by_id(document, info.control_id) else {
            continue;
        };
        let controller = controller.clone();
        let flag = info.flag;
        on_click(&control, move |_| toggle_flag(&controller, flag));
    }
}

fn wire_reset(document: &Document, window: &Window, controller: &Shared) {
    let Some(control) = effects::element_by_id(document, RESET_ID) else {
        return;
    };
    let window = window.clone();
    let controller = controller.clone();
    on_click(&control, move |_| {
        reset_with_confirmation(&window, &controller);
    });
}

fn wire_shortcuts(window: &Window, controller: &Shared) {
    let target = window.clone();
    let window = window.clone();
    let controller = controller.clone();
    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };
    EventListener::new_with_options(&target, "keydown", options, move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if event.repeat() {
            return;
        }
        if handle_key(&window, &controller, event) {
            event.prevent_default();
            event.stop_propagation();
        }
    })
    .forget();
}

/// Returns whether the keystroke was consumed.
fn handle_key(window: &Window, controller: &Shared, event: &KeyboardEvent) -> bool {
    let key = event.key();
    let chord = KeyChord {
        key: &key,
        alt: event.alt_key(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
        meta: event.meta_key(),
    };
    if is_cancel(&chord) {
        let Ok(mut active) = controller.try_borrow_mut() else {
            return false;
        };
        return active.close_panel();
    }
    let Some(action) = action_for(&chord) else {
        return false;
    };
    match action {
        ShortcutAction::TogglePanel => {
            if let Ok(mut active) = controller.try_borrow_mut() {
                active.toggle_panel();
            }
        }
        ShortcutAction::ToggleHighContrast => toggle_flag(controller, Flag::HighContrast),
        ShortcutAction::ToggleGrayscale => toggle_flag(controller, Flag::Grayscale),
        ShortcutAction::IncreaseFont => step_font(controller, 1),
        ShortcutAction::DecreaseFont => step_font(controller, -1),
        ShortcutAction::Reset => reset_with_confirmation(window, controller),
    }
    true
}

// Mutation helpers release the borrow before persisting: the motion
// announcement dispatches synchronously, so a boundary-event listener may
// re-enter the widget while a handler is still on the stack. A reentrant
// gesture is dropped rather than allowed to alias the controller.

fn toggle_flag(controller: &Shared, flag: Flag) {
    let Ok(mut active) = controller.try_borrow_mut() else {
        return;
    };
    active.toggle_flag(flag);
    let snapshot = active.prefs().clone();
    drop(active);
    storage::save_prefs(&snapshot);
}

fn step_font(controller: &Shared, steps: i32) {
    let Ok(mut active) = controller.try_borrow_mut() else {
        return;
    };
    if !active.step_font(steps) {
        return;
    }
    let snapshot = active.prefs().clone();
    drop(active);
    storage::save_prefs(&snapshot);
}

fn reset_with_confirmation(window: &Window, controller: &Shared) {
    let confirmed = window.confirm_with_message(RESET_PROMPT).unwrap_or(false);
    if !confirmed {
        return;
    }
    let Ok(mut active) = controller.try_borrow_mut() else {
        return;
    };
    active.reset();
    let snapshot = active.prefs().clone();
    drop(active);
    storage::save_prefs(&snapshot);
}
