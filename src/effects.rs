use std::collections::HashMap;

use gloo::events::EventListener;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, HtmlElement, MouseEvent, Window};

use tesuri_core::{EffectSink, Flag, FLAG_TABLE};

/// Boundary event consumed by the background animation layer.
pub(crate) const MOTION_EVENT: &str = "a11y:no-motion";

const GUIDE_ID: &str = "a11y-reading-guide";
const FONT_READOUT_ID: &str = "a11y-font-size-display";
const INDICATOR_ACTIVE_CLASS: &str = "active";
const PANEL_OPEN_CLASS: &str = "open";
const BADGE_CLASS: &str = "a11y-badge";

pub(crate) fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    if on {
        let _ = classes.add_1(class);
    } else {
        let _ = classes.remove_1(class);
    }
}

/// Live-document implementation of the controller's presentation seam. Binds
/// whatever controls the page ships; anything absent stays unwired and the
/// corresponding calls become no-ops.
pub(crate) struct DomEffects {
    window: Window,
    document: Document,
    body: HtmlElement,
    root: HtmlElement,
    launcher: HtmlElement,
    panel: HtmlElement,
    scrim: Option<HtmlElement>,
    guide: Option<HtmlElement>,
    guide_tracker: Option<EventListener>,
    font_readout: Option<HtmlElement>,
    indicators: HashMap<Flag, HtmlElement>,
    badge: Option<Element>,
}

impl DomEffects {
    pub(crate) fn bind(
        window: &Window,
        document: &Document,
        launcher: &HtmlElement,
        panel: &HtmlElement,
        scrim: Option<HtmlElement>,
    ) -> Option<Self> {
        let body = document.body()?;
        let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
        let mut indicators = HashMap::new();
        for info in &FLAG_TABLE {
            if let Some(control) = element_by_id(document, info.control_id) {
                indicators.insert(info.flag, control);
            }
        }
        Some(Self {
            guide: element_by_id(document, GUIDE_ID),
            guide_tracker: None,
            font_readout: element_by_id(document, FONT_READOUT_ID),
            indicators,
            badge: None,
            window: window.clone(),
            document: document.clone(),
            body,
            root,
            launcher: launcher.clone(),
            panel: panel.clone(),
            scrim,
        })
    }
}

impl EffectSink for DomEffects {
    fn set_marker(&mut self, flag: Flag, on: bool) {
        set_class(&self.body, flag.info().marker_class, on);
    }

    fn set_indicator(&mut self, flag: Flag, on: bool) {
        let Some(control) = self.indicators.get(&flag) else {
            return;
        };
        set_class(control, INDICATOR_ACTIVE_CLASS, on);
        let _ = control.set_attribute("aria-pressed", if on { "true" } else { "false" });
    }

    fn set_font_scale(&mut self, percent: u32) {
        let text = format!("{percent}%");
        let _ = self.root.style().set_property("font-size", &text);
        if let Some(readout) = &self.font_readout {
            readout.set_text_content(Some(&text));
        }
    }

    fn set_guide_tracking(&mut self, on: bool) {
        // Dropping the listener detaches it, so re-enabling can never stack a
        // second subscription.
        self.guide_tracker = None;
        let Some(guide) = self.guide.clone() else {
            return;
        };
        set_class(&guide, INDICATOR_ACTIVE_CLASS, on);
        if !on {
            return;
        }
        self.guide_tracker = Some(EventListener::new(
            &self.document,
            "mousemove",
            move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let _ = guide
                        .style()
                        .set_property("top", &format!("{}px", event.client_y()));
                }
            },
        ));
    }

    fn announce_motion(&mut self, enabled: bool) {
        let detail = js_sys::Object::new();
        if Reflect::set(
            &detail,
            &JsValue::from_str("enabled"),
            &JsValue::from_bool(enabled),
        )
        .is_err()
        {
            return;
        }
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let Ok(event) = CustomEvent::new_with_event_init_dict(MOTION_EVENT, &init) else {
            return;
        };
        let _ = self.window.dispatch_event(&event);
    }

    fn set_active_count(&mut self, count: usize) {
        if count == 0 {
            if let Some(badge) = self.badge.take() {
                badge.remove();
            }
            return;
        }
        if self.badge.is_none() {
            let Ok(badge) = self.document.create_element("span") else {
                return;
            };
            badge.set_class_name(BADGE_CLASS);
            if self.launcher.append_child(&badge).is_err() {
                return;
            }
            self.badge = Some(badge);
        }
        if let Some(badge) = &self.badge {
            badge.set_text_content(Some(&count.to_string()));
        }
    }

    fn set_panel_open(&mut self, open: bool) {
        set_class(&self.panel, PANEL_OPEN_CLASS, open);
        if let Some(scrim) = &self.scrim {
            set_class(scrim, PANEL_OPEN_CLASS, open);
        }
        let _ = self
            .launcher
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }
}
