// Per-element trigger state.
// Tracks the playback state machine and timeline position of one animation.

use super::dom::{Bounds, ElementId, Viewport};
use super::effect::{
    COUNTER_DURATION, Frame, STAGGER_STEP, Tween, counter_text, parallax_frame, tween_for,
};
use super::marker::{AnimationDescriptor, AnimationKind, VisibilityBand};

/// Playback state of a trigger.
///
/// Reversible kinds cycle `Unarmed → Armed → Settled → Reversing → Armed`;
/// a reversal that runs all the way back lands in `Unarmed`. One-shot kinds
/// stop at `Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Unarmed,
    Armed,
    Settled,
    Reversing,
}

/// Receives frames as triggers play.
pub trait RenderSink {
    fn apply(&mut self, element: &ElementId, frame: &Frame);
}

/// One registered binding between an element's visibility and its effect.
#[derive(Debug, Clone)]
pub struct Trigger {
    element: ElementId,
    kind: AnimationKind,
    band: VisibilityBand,
    tween: Option<Tween>,
    state: TriggerState,
    /// Timeline position in seconds, 0..=total.
    time: f64,
    total: f64,
    delay: f64,
    delay_left: f64,
    in_band: bool,
}

impl Trigger {
    pub fn new(descriptor: AnimationDescriptor, delay: f64) -> Self {
        let tween = tween_for(&descriptor.kind);
        let total = match &descriptor.kind {
            AnimationKind::StaggeredList { children } => {
                let duration = tween.as_ref().map_or(0.0, |t| t.duration);
                duration + STAGGER_STEP * children.len().saturating_sub(1) as f64
            }
            AnimationKind::CounterTally { .. } => COUNTER_DURATION,
            AnimationKind::ParallaxScroll { .. } => 1.0,
            _ => tween.as_ref().map_or(0.0, |t| t.duration),
        };

        Self {
            element: descriptor.element,
            kind: descriptor.kind,
            band: descriptor.band,
            tween,
            state: TriggerState::Unarmed,
            time: 0.0,
            total,
            delay,
            delay_left: delay,
            in_band: false,
        }
    }

    pub fn element(&self) -> &ElementId {
        &self.element
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Linear progress through the timeline, 0..=1.
    pub fn progress(&self) -> f64 {
        if self.total <= 0.0 {
            return if self.time > 0.0 { 1.0 } else { 0.0 };
        }
        (self.time / self.total).clamp(0.0, 1.0)
    }

    /// Whether the element sits between the start and end lines.
    pub fn is_in_band(&self) -> bool {
        self.in_band
    }

    /// React to a new element position. Returns true if a frame should be drawn.
    pub fn on_scroll(&mut self, bounds: Bounds, viewport: Viewport) -> bool {
        let start_line = self.band.start * viewport.height;
        let end_line = self.band.end * viewport.height;
        self.in_band = bounds.top <= start_line && bounds.bottom() >= end_line;

        if let AnimationKind::ParallaxScroll { .. } = self.kind {
            return self.scrub(bounds, viewport);
        }

        let past_start = bounds.top <= start_line;
        let next = match (self.state, past_start) {
            (TriggerState::Unarmed | TriggerState::Reversing, true) => TriggerState::Armed,
            (TriggerState::Armed | TriggerState::Settled, false) if !self.kind.is_one_shot() => {
                TriggerState::Reversing
            }
            (state, _) => state,
        };

        if next == TriggerState::Armed && self.state == TriggerState::Unarmed {
            self.delay_left = self.delay;
        }
        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Tie progress to the element's traversal: 0 when its top meets the
    /// viewport bottom, 1 when its bottom meets the viewport top.
    fn scrub(&mut self, bounds: Bounds, viewport: Viewport) -> bool {
        let span = viewport.height + bounds.height;
        let p = if span > 0.0 {
            ((viewport.height - bounds.top) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let changed = p != self.time;
        self.time = p;
        self.state = if p <= 0.0 {
            TriggerState::Unarmed
        } else if p >= 1.0 {
            TriggerState::Settled
        } else {
            TriggerState::Armed
        };
        changed
    }

    /// Move time-based playback forward by `dt` seconds. Returns true if the
    /// timeline moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.kind.is_scrubbed() || dt <= 0.0 {
            return false;
        }

        match self.state {
            TriggerState::Armed => {
                let mut dt = dt;
                if self.delay_left > 0.0 {
                    let used = dt.min(self.delay_left);
                    self.delay_left -= used;
                    dt -= used;
                    if dt <= 0.0 {
                        return false;
                    }
                }
                self.time = (self.time + dt).min(self.total);
                if self.time >= self.total {
                    self.state = TriggerState::Settled;
                }
                true
            }
            TriggerState::Reversing => {
                self.time = (self.time - dt).max(0.0);
                if self.time <= 0.0 {
                    self.state = TriggerState::Unarmed;
                }
                true
            }
            TriggerState::Unarmed | TriggerState::Settled => false,
        }
    }

    /// Write the current frame(s) to the sink.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        match &self.kind {
            AnimationKind::ParallaxScroll { speed } => {
                sink.apply(&self.element, &parallax_frame(*speed, self.time));
            }
            AnimationKind::CounterTally { target } => {
                let frame = Frame {
                    text: Some(counter_text(*target, self.progress())),
                    ..Frame::resting()
                };
                sink.apply(&self.element, &frame);
            }
            AnimationKind::StaggeredList { children } => {
                let Some(tween) = &self.tween else { return };
                for (i, child) in children.iter().enumerate() {
                    let offset = STAGGER_STEP * i as f64;
                    let t = if tween.duration > 0.0 {
                        ((self.time - offset) / tween.duration).clamp(0.0, 1.0)
                    } else {
                        1.0
                    };
                    sink.apply(child, &tween.frame_at(t));
                }
            }
            _ => {
                if let Some(tween) = &self.tween {
                    sink.apply(&self.element, &tween.frame_at(self.progress()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport { height: 1000.0 };

    fn trigger(kind: AnimationKind) -> Trigger {
        Trigger::new(
            AnimationDescriptor {
                element: ElementId::from("el"),
                kind,
                band: VisibilityBand::default(),
            },
            0.0,
        )
    }

    fn below_fold() -> Bounds {
        Bounds::new(950.0, 200.0)
    }

    fn in_view() -> Bounds {
        Bounds::new(500.0, 200.0)
    }

    #[test]
    fn test_reversible_cycle() {
        let mut t = trigger(AnimationKind::CardReveal);
        assert_eq!(t.state(), TriggerState::Unarmed);

        assert!(!t.on_scroll(below_fold(), VIEWPORT));
        assert!(t.on_scroll(in_view(), VIEWPORT));
        assert_eq!(t.state(), TriggerState::Armed);

        t.advance(1.0);
        assert_eq!(t.state(), TriggerState::Settled);
        assert_eq!(t.progress(), 1.0);

        t.on_scroll(below_fold(), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Reversing);
        t.advance(0.2);
        assert_eq!(t.state(), TriggerState::Reversing);

        // Re-entry mid-reversal plays forward again
        t.on_scroll(in_view(), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Armed);

        t.on_scroll(below_fold(), VIEWPORT);
        t.advance(5.0);
        assert_eq!(t.state(), TriggerState::Unarmed);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn test_one_shot_never_reverses() {
        let mut t = trigger(AnimationKind::CounterTally { target: 10 });
        t.on_scroll(in_view(), VIEWPORT);
        t.advance(COUNTER_DURATION);
        assert_eq!(t.state(), TriggerState::Settled);

        assert!(!t.on_scroll(below_fold(), VIEWPORT));
        assert_eq!(t.state(), TriggerState::Settled);
        t.on_scroll(in_view(), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Settled);
    }

    #[test]
    fn test_delay_holds_playback() {
        let mut t = Trigger::new(
            AnimationDescriptor {
                element: ElementId::from("el"),
                kind: AnimationKind::TextSlide,
                band: VisibilityBand::default(),
            },
            0.3,
        );
        t.on_scroll(in_view(), VIEWPORT);

        assert!(!t.advance(0.2));
        assert_eq!(t.progress(), 0.0);
        assert!(t.advance(0.2));
        assert!(t.progress() > 0.0);
    }

    #[test]
    fn test_parallax_scrub() {
        let mut t = trigger(AnimationKind::ParallaxScroll { speed: 0.5 });

        t.on_scroll(Bounds::new(1000.0, 200.0), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Unarmed);

        t.on_scroll(Bounds::new(400.0, 200.0), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Armed);
        assert_eq!(t.progress(), 0.5);

        t.on_scroll(Bounds::new(-200.0, 200.0), VIEWPORT);
        assert_eq!(t.state(), TriggerState::Settled);
        // Scrubbed triggers ignore frame time
        assert!(!t.advance(1.0));
    }

    #[test]
    fn test_in_band_tracks_end_line() {
        let mut t = trigger(AnimationKind::SectionReveal);
        t.on_scroll(in_view(), VIEWPORT);
        assert!(t.is_in_band());

        // Bottom above the 20% line: past the band, still armed
        t.on_scroll(Bounds::new(-100.0, 200.0), VIEWPORT);
        assert!(!t.is_in_band());
        assert_eq!(t.state(), TriggerState::Armed);
    }
}
