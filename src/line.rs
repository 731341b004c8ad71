//! # Double-Buffered Text Lines
//!
//! Each of the three time lines owns two text slots. One slot sits at the home
//! position and is visible; the other waits at the parked position just past
//! the right edge of the screen and still holds the previous text.
//!
//! ## Rotation
//! When a line receives new text that differs from what it shows:
//! 1. The hidden slot is cleared and the new text copied in
//! 2. The hidden slot slides from parked to home while the visible slot slides
//!    from home to one offset left of the screen, both with the same curve
//! 3. The hidden slot becomes the visible one at that moment (the state is
//!    switched when the slide starts, not when it ends)
//! 4. When the slide completes the outgoing slot is snapped to the parked
//!    coordinate so it is ready to be the next incoming slot
//!
//! ## Contention
//! A tick can arrive while a slide is still running. [`ContentionPolicy`]
//! decides what happens; see its variants.

use crate::animation::{Curve, Slide};
use crate::text_buffer::{fit_to_capacity, TextBuffer};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// X coordinate of the visible slot.
pub const HOME_X: i32 = 0;

/// One of the two slots of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

/// Rule deciding whether new text counts as a change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDetection {
    /// Any difference counts
    #[default]
    Exact,
    /// Compare only the first `len(new)` bytes of the shown text, and treat
    /// new empty text over non-empty text as a change. Misses changes where the
    /// new text is a prefix of the old one ("nineteen" to "nine").
    PrefixBounded,
}

impl ChangeDetection {
    pub fn is_change(self, shown: &str, next: &str) -> bool {
        match self {
            ChangeDetection::Exact => shown != next,
            ChangeDetection::PrefixBounded => {
                !shown.as_bytes().starts_with(next.as_bytes())
                    || (next.is_empty() && !shown.is_empty())
            }
        }
    }
}

/// What to do with an update that arrives mid-slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionPolicy {
    /// Keep the newest text and start it once the running slide completes
    #[default]
    Queue,
    /// Snap the running slide to its end and start the new one right away
    CancelAndRestart,
    /// Drop the update; the next tick diffs again
    IgnoreUntilIdle,
}

/// Outcome of [`Line::update_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineUpdate {
    Unchanged,
    Started,
    Queued,
    Restarted,
    Ignored,
}

/// Behavior shared by every line of a face.
#[derive(Clone, Debug)]
pub struct LinePolicy {
    pub detection: ChangeDetection,
    pub contention: ContentionPolicy,
    pub duration: Duration,
    pub curve: Curve,
    /// Distance a slot travels, also the parked x coordinate
    pub slide_offset: i32,
}

impl Default for LinePolicy {
    fn default() -> Self {
        Self {
            detection: ChangeDetection::Exact,
            contention: ContentionPolicy::Queue,
            duration: Duration::from_millis(400),
            curve: Curve::EaseOut,
            slide_offset: 144,
        }
    }
}

#[derive(Clone, Debug)]
struct Transition {
    incoming: Slot,
    incoming_slide: Slide,
    outgoing_slide: Slide,
}

/// A slot as it should be drawn right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub slot: Slot,
    pub x: i32,
    pub text: &'a str,
}

#[derive(Clone, Debug)]
pub struct Line {
    slots: [TextBuffer; 2],
    x: [i32; 2],
    visible: Slot,
    transition: Option<Transition>,
    pending: Option<String>,
    policy: LinePolicy,
}

impl Line {
    /// Both slots empty, A at home, B parked.
    pub fn new(policy: LinePolicy) -> Self {
        Self {
            slots: [TextBuffer::new(), TextBuffer::new()],
            x: [HOME_X, policy.slide_offset],
            visible: Slot::A,
            transition: None,
            pending: None,
            policy,
        }
    }

    pub fn visible_slot(&self) -> Slot {
        self.visible
    }

    pub fn visible_text(&self) -> &str {
        self.slots[self.visible.index()].as_str()
    }

    pub fn hidden_text(&self) -> &str {
        self.slots[self.visible.other().index()].as_str()
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn policy(&self) -> &LinePolicy {
        &self.policy
    }

    /// Whether `text` differs from the text this line shows.
    ///
    /// Oversized text is compared in its truncated form, the way a slot would
    /// hold it.
    pub fn needs_update(&self, text: &str) -> bool {
        self.policy
            .detection
            .is_change(self.visible_text(), fit_to_capacity(text))
    }

    /// Show `text` in the visible slot at once, without a slide.
    ///
    /// Any running slide is snapped to its end and queued text is dropped.
    pub fn show_immediately(&mut self, text: &str) {
        self.complete_transition();
        self.pending = None;
        self.slots[self.visible.index()].set_truncating(text);
    }

    /// Diff `text` against the shown text and rotate on change.
    pub fn update_to(&mut self, text: &str) -> LineUpdate {
        if self.transition.is_none() {
            if !self.needs_update(text) {
                return LineUpdate::Unchanged;
            }
            self.start_transition(text);
            return LineUpdate::Started;
        }

        let target = self
            .pending
            .as_deref()
            .map(fit_to_capacity)
            .unwrap_or(self.visible_text());
        if !self.policy.detection.is_change(target, fit_to_capacity(text)) {
            return LineUpdate::Unchanged;
        }

        match self.policy.contention {
            ContentionPolicy::Queue => {
                debug!("queueing {:?} behind running slide", text);
                self.pending = Some(text.to_string());
                LineUpdate::Queued
            }
            ContentionPolicy::CancelAndRestart => {
                self.complete_transition();
                if !self.needs_update(text) {
                    return LineUpdate::Unchanged;
                }
                self.start_transition(text);
                LineUpdate::Restarted
            }
            ContentionPolicy::IgnoreUntilIdle => {
                debug!("ignoring {:?} while sliding", text);
                LineUpdate::Ignored
            }
        }
    }

    /// Step the running slide by `dt`. Returns whether the line is still animating.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        transition.incoming_slide.advance(dt);
        transition.outgoing_slide.advance(dt);

        let incoming = transition.incoming;
        let outgoing = incoming.other();
        self.x[incoming.index()] = transition.incoming_slide.x();
        self.x[outgoing.index()] = transition.outgoing_slide.x();

        let finished =
            transition.incoming_slide.is_finished() && transition.outgoing_slide.is_finished();
        if finished {
            self.complete_transition();
            if let Some(next) = self.pending.take() {
                if self.needs_update(&next) {
                    self.start_transition(&next);
                }
            }
        }
        self.is_animating()
    }

    /// Both slots with their current coordinates, visible slot first.
    pub fn positions(&self) -> [SlotView<'_>; 2] {
        let view = |slot: Slot| SlotView {
            slot,
            x: self.x[slot.index()],
            text: self.slots[slot.index()].as_str(),
        };
        [view(self.visible), view(self.visible.other())]
    }

    fn start_transition(&mut self, text: &str) {
        let incoming = self.visible.other();
        let outgoing = self.visible;
        self.slots[incoming.index()].set_truncating(text);

        let offset = self.policy.slide_offset;
        let incoming_from = self.x[incoming.index()];
        let outgoing_from = self.x[outgoing.index()];
        let incoming_slide = Slide::new(
            incoming_from,
            incoming_from - offset,
            self.policy.duration,
            self.policy.curve,
        );
        let outgoing_slide = Slide::new(
            outgoing_from,
            outgoing_from - offset,
            self.policy.duration,
            self.policy.curve,
        );

        debug!(
            "sliding {:?} -> {:?} ({:?} in, {:?} out)",
            self.visible_text(),
            text,
            incoming,
            outgoing
        );
        self.visible = incoming;
        self.transition = Some(Transition {
            incoming,
            incoming_slide,
            outgoing_slide,
        });
    }

    /// Snap both slots to their resting coordinates.
    fn complete_transition(&mut self) {
        if let Some(transition) = self.transition.take() {
            let incoming = transition.incoming;
            self.x[incoming.index()] = HOME_X;
            self.x[incoming.other().index()] = self.policy.slide_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_buffer::LINE_CAPACITY;

    const FULL: Duration = Duration::from_millis(400);

    fn line_with(contention: ContentionPolicy) -> Line {
        Line::new(LinePolicy {
            contention,
            ..LinePolicy::default()
        })
    }

    fn shown(text: &str) -> Line {
        let mut line = Line::new(LinePolicy::default());
        line.show_immediately(text);
        line
    }

    #[test]
    fn test_new_line_has_a_home_and_b_parked() {
        let line = Line::new(LinePolicy::default());
        let [visible, hidden] = line.positions();
        assert_eq!((visible.slot, visible.x), (Slot::A, HOME_X));
        assert_eq!((hidden.slot, hidden.x), (Slot::B, 144));
        assert_eq!(line.visible_text(), "");
    }

    #[test]
    fn test_same_text_is_idempotent() {
        let mut line = shown("ten");
        assert_eq!(line.update_to("ten"), LineUpdate::Unchanged);
        assert!(!line.is_animating());
        assert_eq!(line.visible_slot(), Slot::A);
    }

    #[test]
    fn test_second_identical_update_schedules_nothing() {
        let mut line = shown("ten");
        assert_eq!(line.update_to("eleven"), LineUpdate::Started);
        line.advance(FULL);
        assert_eq!(line.update_to("eleven"), LineUpdate::Unchanged);
        assert!(!line.is_animating());
    }

    #[test]
    fn test_empty_text_is_a_change() {
        let mut line = shown("ten");
        assert!(line.needs_update(""));
        assert_eq!(line.update_to(""), LineUpdate::Started);

        let empty = Line::new(LinePolicy::default());
        assert!(!empty.needs_update(""));
    }

    #[test]
    fn test_change_writes_hidden_slot_and_swaps_state() {
        let mut line = shown("ten");
        line.update_to("eleven");
        assert_eq!(line.visible_slot(), Slot::B);
        assert_eq!(line.visible_text(), "eleven");
        assert_eq!(line.hidden_text(), "ten");
    }

    #[test]
    fn test_slide_moves_both_slots_left() {
        let mut line = shown("ten");
        line.update_to("eleven");
        line.advance(Duration::from_millis(200));
        let [incoming, outgoing] = line.positions();
        assert!(incoming.x > HOME_X && incoming.x < 144);
        assert!(outgoing.x < HOME_X && outgoing.x > -144);
        assert_eq!(incoming.x - outgoing.x, 144);
    }

    #[test]
    fn test_completion_parks_outgoing_slot() {
        let mut line = shown("ten");
        line.update_to("eleven");
        assert!(!line.advance(Duration::from_millis(1000)));
        let [visible, hidden] = line.positions();
        assert_eq!((visible.slot, visible.x), (Slot::B, HOME_X));
        assert_eq!((hidden.slot, hidden.x), (Slot::A, 144));

        // and the next change slides A back in from the parked spot
        line.update_to("twelve");
        line.advance(FULL);
        assert_eq!(line.visible_slot(), Slot::A);
        assert_eq!(line.positions()[1].x, 144);
    }

    #[test]
    fn test_queue_policy_applies_latest_text_after_slide() {
        let mut line = line_with(ContentionPolicy::Queue);
        line.show_immediately("one");
        line.update_to("two");
        assert_eq!(line.update_to("three"), LineUpdate::Queued);
        assert_eq!(line.update_to("four"), LineUpdate::Queued);
        assert_eq!(line.pending_text(), Some("four"));

        // first slide ends, queued text starts its own slide
        assert!(line.advance(FULL));
        assert_eq!(line.visible_text(), "four");
        assert!(!line.advance(FULL));
        assert_eq!(line.positions()[0].x, HOME_X);
    }

    #[test]
    fn test_queue_drops_text_equal_to_target() {
        let mut line = line_with(ContentionPolicy::Queue);
        line.show_immediately("one");
        line.update_to("two");
        assert_eq!(line.update_to("two"), LineUpdate::Unchanged);
        line.update_to("one");
        line.update_to("two");
        assert!(!line.advance(FULL));
        assert_eq!(line.visible_text(), "two");
    }

    #[test]
    fn test_cancel_and_restart_policy() {
        let mut line = line_with(ContentionPolicy::CancelAndRestart);
        line.show_immediately("one");
        line.update_to("two");
        line.advance(Duration::from_millis(100));
        assert_eq!(line.update_to("three"), LineUpdate::Restarted);
        // the restart begins from clean coordinates
        let [incoming, outgoing] = line.positions();
        assert_eq!((incoming.x, outgoing.x), (144, HOME_X));
        assert_eq!(line.visible_text(), "three");
        assert_eq!(line.hidden_text(), "two");
    }

    #[test]
    fn test_ignore_until_idle_policy() {
        let mut line = line_with(ContentionPolicy::IgnoreUntilIdle);
        line.show_immediately("one");
        line.update_to("two");
        assert_eq!(line.update_to("three"), LineUpdate::Ignored);
        line.advance(FULL);
        assert_eq!(line.visible_text(), "two");
        assert_eq!(line.update_to("three"), LineUpdate::Started);
    }

    #[test]
    fn test_oversized_text_is_truncated_in_the_incoming_slot() {
        let mut line = shown("ten");
        let long = "x".repeat(60);
        assert_eq!(line.update_to(&long), LineUpdate::Started);
        assert_eq!(line.visible_text(), &long[..LINE_CAPACITY]);
        assert_eq!(line.hidden_text(), "ten");

        // the same oversized text again is not a change
        assert!(!line.advance(FULL));
        assert!(!line.needs_update(&long));
        assert_eq!(line.update_to(&long), LineUpdate::Unchanged);
        assert_eq!(line.positions()[0].x, HOME_X);
    }

    #[test]
    fn test_oversized_text_equal_to_running_target_is_not_queued() {
        let mut line = line_with(ContentionPolicy::Queue);
        line.show_immediately("one");
        let long = "y".repeat(50);
        line.update_to(&long);
        assert_eq!(line.update_to(&"y".repeat(70)), LineUpdate::Unchanged);
        assert_eq!(line.pending_text(), None);
    }

    #[test]
    fn test_exact_detection() {
        let exact = ChangeDetection::Exact;
        assert!(exact.is_change("ten", ""));
        assert!(!exact.is_change("", ""));
        assert!(exact.is_change("nineteen", "nine"));
        assert!(!exact.is_change("five", "five"));
    }

    #[test]
    fn test_prefix_bounded_detection() {
        let legacy = ChangeDetection::PrefixBounded;
        assert!(legacy.is_change("ten", ""));
        assert!(!legacy.is_change("", ""));
        assert!(legacy.is_change("nine", "nineteen"));
        // new text that is a prefix of the old one goes unnoticed
        assert!(!legacy.is_change("nineteen", "nine"));
    }

    #[test]
    fn test_show_immediately_cancels_slide() {
        let mut line = shown("ten");
        line.update_to("eleven");
        line.show_immediately("twelve");
        assert!(!line.is_animating());
        assert_eq!(line.visible_text(), "twelve");
        assert_eq!(line.positions()[0].x, HOME_X);
    }
}
