// Declarative animation markers.
// Parses the data-* attributes the presentational layer puts on elements into
// typed descriptors, once, at mount time.

use crate::config::AnimationConfig;
use crate::error::MarkerError;

use super::dom::{Element, ElementId};

pub const ANIMATE_ATTR: &str = "data-animate";
pub const PARALLAX_ATTR: &str = "data-parallax";
pub const COUNT_ATTR: &str = "data-count";
pub const START_ATTR: &str = "data-start";
pub const END_ATTR: &str = "data-end";

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

/// What an element does when its trigger fires.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationKind {
    SectionReveal,
    CardReveal,
    SkillPop,
    TextSlide,
    /// Direct children animate as a group, each offset a little.
    StaggeredList { children: Vec<ElementId> },
    /// Displacement follows scroll position.
    ParallaxScroll { speed: f64 },
    /// Displayed integer tallies from 0 up to `target`.
    CounterTally { target: u64 },
}

impl AnimationKind {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::SectionReveal => "section",
            AnimationKind::CardReveal => "card",
            AnimationKind::SkillPop => "skill",
            AnimationKind::TextSlide => "text",
            AnimationKind::StaggeredList { .. } => "stagger",
            AnimationKind::ParallaxScroll { .. } => "parallax",
            AnimationKind::CounterTally { .. } => "count",
        }
    }

    /// Plays once and never reverses.
    pub fn is_one_shot(&self) -> bool {
        matches!(self, AnimationKind::CounterTally { .. })
    }

    /// Tied to scroll position instead of time.
    pub fn is_scrubbed(&self) -> bool {
        matches!(self, AnimationKind::ParallaxScroll { .. })
    }

    /// Single-element reveals, which are delayed by their order within a region.
    pub fn is_reveal(&self) -> bool {
        matches!(
            self,
            AnimationKind::SectionReveal
                | AnimationKind::CardReveal
                | AnimationKind::SkillPop
                | AnimationKind::TextSlide
        )
    }
}

/// Visibility band as fractions of viewport height from the top.
///
/// A trigger arms when the element top crosses above `start`. Passing `end`
/// takes no action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityBand {
    pub start: f64,
    pub end: f64,
}

impl Default for VisibilityBand {
    fn default() -> Self {
        Self {
            start: 0.85,
            end: 0.20,
        }
    }
}

impl From<&AnimationConfig> for VisibilityBand {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            start: config.start,
            end: config.end,
        }
    }
}

/// Parsed form of one marker on one element.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDescriptor {
    pub element: ElementId,
    pub kind: AnimationKind,
    pub band: VisibilityBand,
}

/// Parse every marker on `element`. An element may carry more than one, e.g.
/// a revealed card that is also a counter; each yields its own descriptor.
pub fn parse_markers(
    element: &Element,
    defaults: VisibilityBand,
) -> Vec<Result<AnimationDescriptor, MarkerError>> {
    let mut out = Vec::new();
    let has_marker = [ANIMATE_ATTR, PARALLAX_ATTR, COUNT_ATTR]
        .iter()
        .any(|attr| element.attr(attr).is_some());
    if !has_marker {
        return out;
    }

    let band = match parse_band(element, defaults) {
        Ok(band) => band,
        Err(e) => {
            out.push(Err(e));
            return out;
        }
    };

    let descriptor = |kind: AnimationKind| AnimationDescriptor {
        element: element.id.clone(),
        kind,
        band,
    };

    if let Some(value) = element.attr(ANIMATE_ATTR) {
        out.push(parse_animate(element, value).map(descriptor));
    }
    if let Some(value) = element.attr(PARALLAX_ATTR) {
        out.push(parse_speed(element, value).map(|speed| descriptor(AnimationKind::ParallaxScroll { speed })));
    }
    if let Some(value) = element.attr(COUNT_ATTR) {
        out.push(parse_count(element, value).map(|target| descriptor(AnimationKind::CounterTally { target })));
    }
    out
}

fn malformed(element: &Element, attribute: &'static str, reason: impl Into<String>) -> MarkerError {
    MarkerError::Malformed {
        element: element.id.to_string(),
        attribute,
        reason: reason.into(),
    }
}

fn parse_animate(element: &Element, value: &str) -> Result<AnimationKind, MarkerError> {
    match value.trim() {
        "section" => Ok(AnimationKind::SectionReveal),
        "card" => Ok(AnimationKind::CardReveal),
        "skill" => Ok(AnimationKind::SkillPop),
        "text" => Ok(AnimationKind::TextSlide),
        "stagger" => Ok(AnimationKind::StaggeredList {
            children: element.children.iter().map(|c| c.id.clone()).collect(),
        }),
        other => Err(malformed(
            element,
            ANIMATE_ATTR,
            format!("unknown animation kind {:?}", other),
        )),
    }
}

fn parse_speed(element: &Element, value: &str) -> Result<f64, MarkerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_PARALLAX_SPEED);
    }
    match value.parse::<f64>() {
        Ok(speed) if speed.is_finite() => Ok(speed),
        _ => Err(malformed(
            element,
            PARALLAX_ATTR,
            format!("expected a finite number, got {:?}", value),
        )),
    }
}

fn parse_count(element: &Element, value: &str) -> Result<u64, MarkerError> {
    value.trim().parse::<u64>().map_err(|_| {
        malformed(
            element,
            COUNT_ATTR,
            format!("expected a non-negative integer, got {:?}", value),
        )
    })
}

fn parse_band(element: &Element, defaults: VisibilityBand) -> Result<VisibilityBand, MarkerError> {
    let fraction = |attribute: &'static str, default: f64| -> Result<f64, MarkerError> {
        let Some(raw) = element.attr(attribute) else {
            return Ok(default);
        };
        match raw.trim().parse::<f64>() {
            Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
            _ => Err(malformed(
                element,
                attribute,
                format!("expected a fraction between 0 and 1, got {:?}", raw),
            )),
        }
    };

    Ok(VisibilityBand {
        start: fraction(START_ATTR, defaults.start)?,
        end: fraction(END_ATTR, defaults.end)?,
    })
}
