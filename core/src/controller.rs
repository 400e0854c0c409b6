use crate::prefs::{Flag, PreferenceSet, FLAGS, FONT_SIZE_MAX, FONT_SIZE_MIN, FONT_SIZE_STEP};

/// Presentation seam. The browser side renders these onto the live document;
/// tests record them. Every call is synchronous and must be idempotent for a
/// repeated value.
pub trait EffectSink {
    /// Add or remove the flag's marker class on the presentation root.
    fn set_marker(&mut self, flag: Flag, on: bool);
    /// Mirror the flag onto its bound toggle control (active + pressed state).
    fn set_indicator(&mut self, flag: Flag, on: bool);
    /// Write the root font scale and refresh the percent readout.
    fn set_font_scale(&mut self, percent: u32);
    /// Start or stop pointer tracking for the reading guide. Starting while
    /// already tracking must replace the subscription, never stack a second one.
    fn set_guide_tracking(&mut self, on: bool);
    /// Broadcast the motion preference to the animation layer. Fire-and-forget;
    /// a missing listener is not an error.
    fn announce_motion(&mut self, enabled: bool);
    /// Reflect the number of non-default flags on the badge.
    fn set_active_count(&mut self, count: usize);
    /// Reflect panel visibility on the panel, scrim and launcher.
    fn set_panel_open(&mut self, open: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Single owner of the mutable preference state. All mutating entry points
/// (clicks, key chords, reset) funnel through these methods; the sink is the
/// only way changes reach the presentation surface.
pub struct Controller<S: EffectSink> {
    prefs: PreferenceSet,
    panel: PanelState,
    sink: S,
}

impl<S: EffectSink> Controller<S> {
    pub fn new(prefs: PreferenceSet, sink: S) -> Self {
        Self {
            prefs,
            panel: PanelState::Closed,
            sink,
        }
    }

    pub fn prefs(&self) -> &PreferenceSet {
        &self.prefs
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn active_count(&self) -> usize {
        self.prefs.active_count()
    }

    /// Push the whole preference set onto the presentation surface. Used when
    /// re-applying a persisted snapshot and after reset; safe to call
    /// repeatedly. Announces the motion preference so a persisted "motion
    /// disabled" state reaches the animation layer.
    pub fn apply_all(&mut self) {
        self.apply(true);
    }

    /// First-paint application for a session with nothing persisted: the page
    /// already sits in its default state and the animation layer has been
    /// told nothing, so no motion announcement is emitted.
    pub fn apply_defaults(&mut self) {
        self.apply(false);
    }

    fn apply(&mut self, announce_motion: bool) {
        self.sink.set_font_scale(self.prefs.font_size_percent);
        for flag in FLAGS {
            self.apply_flag_with(flag, announce_motion);
        }
        self.push_active_count();
    }

    fn apply_flag(&mut self, flag: Flag) {
        self.apply_flag_with(flag, true);
    }

    fn apply_flag_with(&mut self, flag: Flag, announce_motion: bool) {
        let on = self.prefs.flag(flag);
        self.sink.set_marker(flag, on);
        match flag {
            Flag::ReadingGuide => self.sink.set_guide_tracking(on),
            Flag::NoMotion if announce_motion => self.sink.announce_motion(on),
            _ => {}
        }
        self.sink.set_indicator(flag, on);
    }

    pub fn toggle_flag(&mut self, flag: Flag) {
        let next = !self.prefs.flag(flag);
        self.prefs.set_flag(flag, next);
        self.apply_flag(flag);
        self.push_active_count();
    }

    /// Move the font size by `steps` increments. A request past either bound
    /// is a no-op and reports `false` so callers can skip persisting.
    pub fn step_font(&mut self, steps: i32) -> bool {
        let next = self.prefs.font_size_percent as i32 + steps * FONT_SIZE_STEP as i32;
        if next < FONT_SIZE_MIN as i32 || next > FONT_SIZE_MAX as i32 {
            return false;
        }
        self.prefs.font_size_percent = next as u32;
        self.sink.set_font_scale(self.prefs.font_size_percent);
        true
    }

    /// Restore every preference to its default and re-apply. Confirmation is
    /// the caller's job; the first-run-hint marker is deliberately untouched.
    pub fn reset(&mut self) {
        self.prefs = PreferenceSet::default();
        self.apply_all();
    }

    pub fn toggle_panel(&mut self) -> PanelState {
        self.panel = match self.panel {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        };
        self.sink.set_panel_open(self.panel == PanelState::Open);
        self.panel
    }

    /// Close the panel if it is open. Reports whether anything changed, so the
    /// key handler can decide whether it consumed the keystroke.
    pub fn close_panel(&mut self) -> bool {
        if self.panel == PanelState::Closed {
            return false;
        }
        self.panel = PanelState::Closed;
        self.sink.set_panel_open(false);
        true
    }

    fn push_active_count(&mut self) {
        let count = self.prefs.active_count();
        self.sink.set_active_count(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct SinkLog {
        markers: HashMap<Flag, bool>,
        indicators: HashMap<Flag, bool>,
        font_scales: Vec<u32>,
        guide_tracking: Vec<bool>,
        motion_events: Vec<bool>,
        active_counts: Vec<usize>,
        panel_open: Vec<bool>,
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        log: Rc<RefCell<SinkLog>>,
    }

    impl EffectSink for RecordingSink {
        fn set_marker(&mut self, flag: Flag, on: bool) {
            self.log.borrow_mut().markers.insert(flag, on);
        }

        fn set_indicator(&mut self, flag: Flag, on: bool) {
            self.log.borrow_mut().indicators.insert(flag, on);
        }

        fn set_font_scale(&mut self, percent: u32) {
            self.log.borrow_mut().font_scales.push(percent);
        }

        fn set_guide_tracking(&mut self, on: bool) {
            self.log.borrow_mut().guide_tracking.push(on);
        }

        fn announce_motion(&mut self, enabled: bool) {
            self.log.borrow_mut().motion_events.push(enabled);
        }

        fn set_active_count(&mut self, count: usize) {
            self.log.borrow_mut().active_counts.push(count);
        }

        fn set_panel_open(&mut self, open: bool) {
            self.log.borrow_mut().panel_open.push(open);
        }
    }

    fn build_controller() -> (Controller<RecordingSink>, Rc<RefCell<SinkLog>>) {
        let sink = RecordingSink::default();
        let log = sink.log.clone();
        (Controller::new(PreferenceSet::default(), sink), log)
    }

    #[test]
    fn font_steps_clamp_at_the_upper_bound() {
        let (mut controller, _log) = build_controller();
        let mut applied = 0;
        for _ in 0..6 {
            if controller.step_font(1) {
                applied += 1;
            }
        }
        assert_eq!(applied, 5);
        assert_eq!(controller.prefs().font_size_percent, FONT_SIZE_MAX);
        assert!(!controller.step_font(1));
        assert_eq!(controller.prefs().font_size_percent, FONT_SIZE_MAX);
    }

    #[test]
    fn font_steps_clamp_at_the_lower_bound() {
        let (mut controller, _log) = build_controller();
        while controller.step_font(1) {}
        assert_eq!(controller.prefs().font_size_percent, FONT_SIZE_MAX);
        let mut applied = 0;
        while controller.step_font(-1) {
            applied += 1;
        }
        assert_eq!(applied, 7);
        assert_eq!(controller.prefs().font_size_percent, FONT_SIZE_MIN);
        assert!(!controller.step_font(-1));
        assert_eq!(controller.prefs().font_size_percent, FONT_SIZE_MIN);
    }

    #[test]
    fn rejected_font_step_does_not_touch_the_sink() {
        let (mut controller, log) = build_controller();
        while controller.step_font(-1) {}
        let before = log.borrow().font_scales.len();
        assert!(!controller.step_font(-1));
        assert_eq!(log.borrow().font_scales.len(), before);
    }

    #[test]
    fn toggling_twice_is_an_involution() {
        for flag in FLAGS {
            let (mut controller, log) = build_controller();
            controller.apply_all();
            let baseline_prefs = controller.prefs().clone();
            let baseline_markers = log.borrow().markers.clone();
            let baseline_indicators = log.borrow().indicators.clone();

            controller.toggle_flag(flag);
            assert!(controller.prefs().flag(flag));
            controller.toggle_flag(flag);

            assert_eq!(controller.prefs(), &baseline_prefs);
            assert_eq!(log.borrow().markers, baseline_markers);
            assert_eq!(log.borrow().indicators, baseline_indicators);
        }
    }

    #[test]
    fn active_count_tracks_every_mutation() {
        let (mut controller, log) = build_controller();
        controller.toggle_flag(Flag::HighContrast);
        controller.toggle_flag(Flag::BigCursor);
        controller.toggle_flag(Flag::Saturate);
        assert_eq!(controller.active_count(), 3);
        controller.toggle_flag(Flag::BigCursor);
        assert_eq!(controller.active_count(), 2);
        // Font size never contributes to the count.
        controller.step_font(1);
        assert_eq!(controller.active_count(), 2);
        assert_eq!(log.borrow().active_counts.last(), Some(&2));
    }

    #[test]
    fn motion_toggle_emits_one_event_per_edge() {
        let (mut controller, log) = build_controller();
        controller.toggle_flag(Flag::NoMotion);
        controller.toggle_flag(Flag::NoMotion);
        assert_eq!(log.borrow().motion_events, vec![true, false]);
    }

    #[test]
    fn apply_defaults_stays_silent_toward_the_animation_layer() {
        let (mut controller, log) = build_controller();
        controller.apply_defaults();
        assert!(log.borrow().motion_events.is_empty());
        // Everything else still reaches the page.
        assert_eq!(log.borrow().markers.get(&Flag::NoMotion), Some(&false));
        assert_eq!(log.borrow().font_scales.last(), Some(&100));
        assert_eq!(log.borrow().active_counts.last(), Some(&0));
    }

    #[test]
    fn load_time_apply_announces_persisted_motion_state() {
        let sink = RecordingSink::default();
        let log = sink.log.clone();
        let prefs = PreferenceSet::from_json(r#"{"noMotion":true}"#).unwrap();
        let mut controller = Controller::new(prefs, sink);
        controller.apply_all();
        assert_eq!(log.borrow().motion_events, vec![true]);
    }

    #[test]
    fn guide_tracking_follows_the_flag() {
        let (mut controller, log) = build_controller();
        controller.toggle_flag(Flag::ReadingGuide);
        controller.toggle_flag(Flag::ReadingGuide);
        assert_eq!(log.borrow().guide_tracking, vec![true, false]);
    }

    #[test]
    fn apply_all_is_idempotent() {
        let (mut controller, log) = build_controller();
        controller.toggle_flag(Flag::Invert);
        controller.toggle_flag(Flag::NoMotion);
        controller.apply_all();
        let markers = log.borrow().markers.clone();
        let indicators = log.borrow().indicators.clone();
        let count = log.borrow().active_counts.last().copied();

        controller.apply_all();
        assert_eq!(log.borrow().markers, markers);
        assert_eq!(log.borrow().indicators, indicators);
        assert_eq!(log.borrow().active_counts.last().copied(), count);
    }

    #[test]
    fn reset_restores_defaults_and_reapplies() {
        let (mut controller, log) = build_controller();
        controller.toggle_flag(Flag::HighContrast);
        controller.toggle_flag(Flag::ReadingGuide);
        while controller.step_font(1) {}

        controller.reset();
        assert_eq!(controller.prefs(), &PreferenceSet::default());
        assert_eq!(controller.active_count(), 0);
        assert_eq!(log.borrow().active_counts.last(), Some(&0));
        assert_eq!(log.borrow().font_scales.last(), Some(&100));
        assert_eq!(log.borrow().guide_tracking.last(), Some(&false));
        for flag in FLAGS {
            assert_eq!(log.borrow().markers.get(&flag), Some(&false));
        }
    }

    #[test]
    fn panel_starts_closed_and_transitions() {
        let (mut controller, log) = build_controller();
        assert_eq!(controller.panel(), PanelState::Closed);
        assert!(!controller.close_panel());
        assert!(log.borrow().panel_open.is_empty());

        assert_eq!(controller.toggle_panel(), PanelState::Open);
        assert_eq!(controller.toggle_panel(), PanelState::Closed);
        assert_eq!(controller.toggle_panel(), PanelState::Open);
        assert!(controller.close_panel());
        assert!(!controller.close_panel());
        assert_eq!(log.borrow().panel_open, vec![true, false, true, false]);
    }
}
