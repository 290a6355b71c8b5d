// Animation lifecycle manager.
// Owns every trigger in an arena and a registry from region handle to the
// tokens it created, so a region's triggers are released together.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use crate::config::AnimationConfig;
use crate::error::MarkerError;

use super::dom::{Layout, Region, RegionHandle, Viewport};
use super::effect::STAGGER_STEP;
use super::marker::{VisibilityBand, parse_markers};
use super::trigger::{RenderSink, Trigger};

/// Handle to one registered trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerToken(u64);

/// What a `mount_region` call did.
#[derive(Debug, Clone)]
pub struct MountReport {
    pub handle: RegionHandle,
    /// Tokens for the triggers now owned by the region.
    pub tokens: Vec<TriggerToken>,
    /// Markers that were skipped.
    pub skipped: Vec<MarkerError>,
    /// Triggers released because the region was already mounted.
    pub replaced: usize,
}

#[derive(Debug, Default)]
pub struct AnimationManager {
    defaults: VisibilityBand,
    next_token: u64,
    triggers: BTreeMap<TriggerToken, Trigger>,
    regions: HashMap<RegionHandle, Vec<TriggerToken>>,
}

impl AnimationManager {
    pub fn new(defaults: VisibilityBand) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(VisibilityBand::from(config))
    }

    /// Scan `region` for markers and register one trigger per target.
    ///
    /// A region that is already mounted is fully unmounted first. Malformed
    /// markers are skipped and reported without affecting other elements.
    /// Every trigger's initial frame is written to `sink`.
    pub fn mount_region(&mut self, region: &Region, sink: &mut dyn RenderSink) -> MountReport {
        let replaced = self.unmount_region(&region.handle);

        let mut tokens = Vec::new();
        let mut skipped = Vec::new();
        let mut reveal_index: HashMap<&'static str, usize> = HashMap::new();

        for element in region.elements() {
            for parsed in parse_markers(element, self.defaults) {
                let descriptor = match parsed {
                    Ok(descriptor) => descriptor,
                    Err(e) => {
                        warn!(region = %region.handle, error = %e, "skipping animation marker");
                        skipped.push(e);
                        continue;
                    }
                };

                let delay = if descriptor.kind.is_reveal() {
                    let index = reveal_index.entry(descriptor.kind.name()).or_insert(0);
                    let delay = STAGGER_STEP * *index as f64;
                    *index += 1;
                    delay
                } else {
                    0.0
                };

                let trigger = Trigger::new(descriptor, delay);
                trigger.render(sink);

                let token = TriggerToken(self.next_token);
                self.next_token += 1;
                self.triggers.insert(token, trigger);
                tokens.push(token);
            }
        }

        info!(
            region = %region.handle,
            triggers = tokens.len(),
            skipped = skipped.len(),
            "mounted animation region"
        );
        self.regions.insert(region.handle.clone(), tokens.clone());

        MountReport {
            handle: region.handle.clone(),
            tokens,
            skipped,
            replaced,
        }
    }

    /// Release every trigger the region owns. Returns how many were released;
    /// unknown or already-unmounted regions release nothing.
    pub fn unmount_region(&mut self, handle: &RegionHandle) -> usize {
        let Some(tokens) = self.regions.remove(handle) else {
            return 0;
        };

        let mut released = 0;
        for token in &tokens {
            if self.triggers.remove(token).is_some() {
                released += 1;
            }
        }
        debug!(region = %handle, released, "unmounted animation region");
        released
    }

    pub fn is_mounted(&self, handle: &RegionHandle) -> bool {
        self.regions.contains_key(handle)
    }

    pub fn active_trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn region_trigger_count(&self, handle: &RegionHandle) -> usize {
        self.regions.get(handle).map_or(0, Vec::len)
    }

    pub fn trigger(&self, token: TriggerToken) -> Option<&Trigger> {
        self.triggers.get(&token)
    }

    /// Update triggers for a new scroll position. Scrubbed triggers render
    /// immediately; time-based ones render on the next `advance`.
    pub fn on_scroll(&mut self, viewport: Viewport, layout: &dyn Layout, sink: &mut dyn RenderSink) {
        for trigger in self.triggers.values_mut() {
            let Some(bounds) = layout.bounds(trigger.element()) else {
                continue;
            };
            if trigger.on_scroll(bounds, viewport) && trigger.kind().is_scrubbed() {
                trigger.render(sink);
            }
        }
    }

    /// Advance time-based playback by `dt` seconds, rendering each trigger
    /// whose timeline moved.
    pub fn advance(&mut self, dt: f64, sink: &mut dyn RenderSink) {
        for trigger in self.triggers.values_mut() {
            if trigger.advance(dt) {
                trigger.render(sink);
            }
        }
    }

    /// Count of live triggers of a kind, by marker name.
    pub fn count_by_kind(&self, name: &str) -> usize {
        self.triggers
            .values()
            .filter(|t| t.kind().name() == name)
            .count()
    }
}
