// Visual effects per animation kind.
// Each time-based kind tweens from a starting pose to the resting pose.

use super::easing::Ease;
use super::marker::AnimationKind;

/// Delay between successive reveals of the same kind in a region, and between
/// children of a staggered list.
pub const STAGGER_STEP: f64 = 0.1;

pub const COUNTER_DURATION: f64 = 2.0;

/// Visual state written to an element on every animation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    /// Vertical offset as a percentage of the element's own height.
    pub y_percent: f64,
    pub scale: f64,
    pub rotation: f64,
    pub rotation_x: f64,
    /// Replacement text content, for counters.
    pub text: Option<String>,
}

impl Frame {
    /// The element at rest.
    pub fn resting() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            rotation: 0.0,
            rotation_x: 0.0,
            text: None,
        }
    }

    /// Interpolate from `self` toward rest by eased progress `k`. `k` may leave
    /// 0..=1 for overshooting curves; opacity stays clamped.
    fn toward_rest(&self, k: f64) -> Self {
        let rest = Self::resting();
        let lerp = |from: f64, to: f64| from + (to - from) * k;
        Self {
            opacity: lerp(self.opacity, rest.opacity).clamp(0.0, 1.0),
            x: lerp(self.x, rest.x),
            y: lerp(self.y, rest.y),
            y_percent: lerp(self.y_percent, rest.y_percent),
            scale: lerp(self.scale, rest.scale),
            rotation: lerp(self.rotation, rest.rotation),
            rotation_x: lerp(self.rotation_x, rest.rotation_x),
            text: None,
        }
    }
}

/// A tween from a starting frame to rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: Frame,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    /// Frame at linear progress `t` in 0..=1.
    pub fn frame_at(&self, t: f64) -> Frame {
        self.from.toward_rest(self.ease.apply(t))
    }
}

/// Common starting pose for reveals before per-kind overrides.
fn hidden() -> Frame {
    Frame {
        opacity: 0.0,
        y: 50.0,
        scale: 0.9,
        ..Frame::resting()
    }
}

/// Tween for a time-based kind. Staggered lists get the per-child tween.
/// Scrubbed and counter kinds have no pose tween.
pub fn tween_for(kind: &AnimationKind) -> Option<Tween> {
    let tween = match kind {
        AnimationKind::SectionReveal => Tween {
            from: Frame { y: 80.0, ..hidden() },
            duration: 1.0,
            ease: Ease::Power3Out,
        },
        AnimationKind::CardReveal => Tween {
            from: Frame {
                y: 30.0,
                rotation_x: 15.0,
                ..hidden()
            },
            duration: 0.6,
            ease: Ease::BackOut(1.2),
        },
        AnimationKind::SkillPop => Tween {
            from: Frame {
                scale: 0.0,
                rotation: -10.0,
                ..hidden()
            },
            duration: 0.5,
            ease: Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.3,
            },
        },
        AnimationKind::TextSlide => Tween {
            from: Frame { x: -30.0, ..hidden() },
            duration: 0.7,
            ease: Ease::Power3Out,
        },
        AnimationKind::StaggeredList { .. } => Tween {
            from: Frame {
                opacity: 0.0,
                y: 20.0,
                scale: 0.8,
                ..Frame::resting()
            },
            duration: 0.5,
            ease: Ease::Power2Out,
        },
        AnimationKind::ParallaxScroll { .. } | AnimationKind::CounterTally { .. } => return None,
    };
    Some(tween)
}

/// Counter display at linear progress `t`. The last frame is the exact target
/// even where `f64` can't represent it.
pub fn counter_text(target: u64, t: f64) -> String {
    if t >= 1.0 {
        return target.to_string();
    }
    let value = (target as f64 * Ease::Power2Out.apply(t)).round() as u64;
    value.min(target).to_string()
}

/// Parallax frame for scroll progress `p` in 0..=1.
pub fn parallax_frame(speed: f64, p: f64) -> Frame {
    Frame {
        y_percent: -50.0 * speed * p,
        ..Frame::resting()
    }
}
