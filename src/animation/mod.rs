// Scroll-driven animation module.
// Parses declarative markers, registers visibility triggers per page region and
// releases them when the region goes away.

pub mod dom;
pub mod easing;
pub mod effect;
pub mod manager;
pub mod marker;
pub mod trigger;

pub use dom::{Bounds, Element, ElementId, Layout, Region, RegionHandle, Viewport};
pub use effect::Frame;
pub use manager::{AnimationManager, MountReport, TriggerToken};
pub use marker::{AnimationDescriptor, AnimationKind, VisibilityBand};
pub use trigger::{RenderSink, Trigger, TriggerState};
