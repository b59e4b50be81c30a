use crate::{
    clock::format::BLANK,
    font::provider::{GlyphKey, GlyphShapeProvider},
    foundation::time::ClockInstant,
    glyph::activity::{ActivityMachine, ActivityState, ActivityTarget},
    glyph::role::GlyphRole,
    glyph::visibility::{VisibilityMachine, VisibilityPolicy, VisibilityState, VisibilityTarget},
    layout::options::StateTimings,
    render::surface::Paint,
};

/// One character cell of the clock face.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    role: GlyphRole,
    scale: f64,
    key: GlyphKey,
    color_offset: u32,
    activity: ActivityMachine,
    activity_lock: Option<ActivityTarget>,
    visibility: VisibilityMachine,
}

impl Glyph {
    pub fn new(role: GlyphRole, ch: char, color_offset: u32, now: ClockInstant) -> Self {
        Self {
            role,
            scale: 1.0,
            key: GlyphKey::fixed(ch),
            color_offset,
            activity: ActivityMachine::new(ActivityState::Inactive, now),
            activity_lock: None,
            visibility: VisibilityMachine::new(VisibilityState::Visible, now),
        }
    }

    /// Start in `state` instead of Visible.
    pub fn with_visibility(mut self, state: VisibilityState, now: ClockInstant) -> Self {
        self.visibility = VisibilityMachine::new(state, now);
        self
    }

    pub fn role(&self) -> GlyphRole {
        self.role
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    pub fn key(&self) -> GlyphKey {
        self.key
    }

    pub fn set_key(&mut self, key: GlyphKey) {
        self.key = key;
    }

    pub fn color_offset(&self) -> u32 {
        self.color_offset
    }

    pub fn activity(&self) -> ActivityState {
        self.activity.state()
    }

    pub fn activity_lock(&self) -> Option<ActivityTarget> {
        self.activity_lock
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn visibility_lock(&self) -> Option<VisibilityTarget> {
        self.visibility.lock()
    }

    pub fn pending_visibility(&self) -> Option<VisibilityTarget> {
        self.visibility.pending()
    }

    pub fn request_activity(&mut self, target: ActivityTarget, now: ClockInstant, timings: &StateTimings) {
        if let Some(next) = self.activity.request(target, self.activity_lock) {
            self.activity.apply(next, now, timings);
        }
    }

    pub fn set_activity_lock(&mut self, lock: Option<ActivityTarget>) {
        self.activity_lock = lock;
    }

    pub fn request_visibility(
        &mut self,
        target: VisibilityTarget,
        policy: VisibilityPolicy,
        now: ClockInstant,
        timings: &StateTimings,
    ) -> bool {
        self.visibility
            .request(target, policy, now, timings.visibility_millis)
    }

    pub fn set_visibility_lock(&mut self, lock: Option<VisibilityTarget>, now: ClockInstant) {
        self.visibility.set_lock(lock, now);
    }

    pub fn on_second_boundary(&mut self, policy: VisibilityPolicy, now: ClockInstant) {
        self.visibility.on_second_boundary(policy, now);
    }

    /// Advance both machines. Next states are computed first and then
    /// committed together.
    pub fn tick(&mut self, now: ClockInstant, timings: &StateTimings, policy: VisibilityPolicy) {
        let next_activity = self.activity.tick(now, timings, self.activity_lock);
        let next_visibility = self
            .visibility
            .tick(now, policy, timings.visibility_millis);
        if let Some(next) = next_activity {
            self.activity.apply(next, now, timings);
        }
        if let Some(next) = next_visibility {
            self.visibility.apply(next, now, timings.visibility_millis);
        }
    }

    /// The key actually drawn. A synchronized appearance morphs in from a
    /// blank and a synchronized disappearance morphs out to one.
    pub fn effective_key(&self, policy: VisibilityPolicy) -> GlyphKey {
        if policy != VisibilityPolicy::Synchronized {
            return self.key;
        }
        match self.visibility.state() {
            VisibilityState::Appearing => GlyphKey::between(BLANK, self.key.end),
            VisibilityState::Disappearing => GlyphKey::between(self.key.start, BLANK),
            _ => self.key,
        }
    }

    /// Progress of the running visibility change. The synchronized policy
    /// rides the second's morph.
    pub fn visibility_progress(
        &self,
        now: ClockInstant,
        morph_progress: f64,
        policy: VisibilityPolicy,
        timings: &StateTimings,
    ) -> f64 {
        match policy {
            VisibilityPolicy::Synchronized => morph_progress,
            VisibilityPolicy::Desynchronized => self
                .visibility
                .changed_progress(now, timings.visibility_millis),
        }
    }

    pub fn presence(
        &self,
        now: ClockInstant,
        morph_progress: f64,
        policy: VisibilityPolicy,
        timings: &StateTimings,
    ) -> f64 {
        self.visibility
            .presence(self.visibility_progress(now, morph_progress, policy, timings))
    }

    pub fn emphasis(&self, now: ClockInstant, timings: &StateTimings) -> f64 {
        self.activity.emphasis(now, timings)
    }

    /// Skipped glyphs take no space and draw nothing.
    pub fn is_skipped(&self) -> bool {
        self.visibility.state() == VisibilityState::Hidden || self.scale <= 0.0
    }

    /// Unscaled width this frame. A desynchronized change narrows the cell by
    /// its presence; a synchronized one is already covered by the blank key.
    pub fn native_width(
        &self,
        provider: &dyn GlyphShapeProvider,
        now: ClockInstant,
        morph_progress: f64,
        policy: VisibilityPolicy,
        timings: &StateTimings,
    ) -> f64 {
        let width = provider.width_at(self.effective_key(policy), morph_progress);
        match policy {
            VisibilityPolicy::Synchronized => width,
            VisibilityPolicy::Desynchronized => {
                width * self.presence(now, morph_progress, policy, timings)
            }
        }
    }

    pub fn paint(
        &self,
        now: ClockInstant,
        morph_progress: f64,
        policy: VisibilityPolicy,
        timings: &StateTimings,
    ) -> Paint {
        let opacity = match policy {
            VisibilityPolicy::Synchronized => 1.0,
            VisibilityPolicy::Desynchronized => self.presence(now, morph_progress, policy, timings),
        };
        Paint {
            emphasis: self.emphasis(now, timings),
            opacity,
            color_offset: self.color_offset,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/glyph.rs"]
mod tests;
