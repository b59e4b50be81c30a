use std::sync::Arc;

use crate::{
    clock::config::ClockConfig,
    clock::format::TimeFormat,
    font::provider::{GlyphKey, GlyphShapeProvider},
    foundation::core::{Point, Rect, Size},
    foundation::error::{ClockError, ClockResult},
    foundation::time::{ClockInstant, MILLIS_PER_SECOND},
    glyph::activity::ActivityTarget,
    glyph::glyph::Glyph,
    glyph::role::GlyphRole,
    glyph::visibility::{VisibilityPolicy, VisibilityState, VisibilityTarget},
    layout::engine::{GlyphBox, LayoutEngine, LayoutFrame},
    layout::options::LayoutOptions,
    render::surface::Surface,
};

/// Font handle shared between clock instances.
pub type SharedProvider = Arc<dyn GlyphShapeProvider + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No format or options yet; `update` and `render` do nothing.
    Uninitialized,
    Ready,
}

/// Drives one clock face: time diffing, glyph state, layout and drawing.
///
/// Call [`ClockDriver::update`] then [`ClockDriver::render`] once per frame.
pub struct ClockDriver {
    provider: SharedProvider,
    state: DriverState,
    format: TimeFormat,
    engine: LayoutEngine,
    glyphs: Vec<Glyph>,
    available: Size,
    measured: Size,
    now: Option<ClockInstant>,
    morph_progress: f64,
    animation_time_millis: u64,
    seconds_visible: bool,
}

impl std::fmt::Debug for ClockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockDriver")
            .field("state", &self.state)
            .field("format", &self.format)
            .field("glyphs", &self.glyphs.len())
            .field("available", &self.available)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl ClockDriver {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            provider,
            state: DriverState::Uninitialized,
            format: TimeFormat::default(),
            engine: LayoutEngine::default(),
            glyphs: Vec::new(),
            available: Size::ZERO,
            measured: Size::ZERO,
            now: None,
            morph_progress: 0.0,
            animation_time_millis: 0,
            seconds_visible: true,
        }
    }

    pub fn with_config(provider: SharedProvider, config: &ClockConfig) -> ClockResult<Self> {
        config.validate()?;
        let mut driver = Self::new(provider);
        driver.configure(config.format, config.effective_layout())?;
        Ok(driver)
    }

    /// Set options and allocate glyphs; moves the driver to Ready.
    pub fn configure(&mut self, format: TimeFormat, options: LayoutOptions) -> ClockResult<()> {
        options.validate()?;
        self.engine.set_options(options);
        self.state = DriverState::Ready;
        self.set_format(format);
        Ok(())
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn options(&self) -> &LayoutOptions {
        self.engine.options()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    /// Reallocate the glyph list, one glyph per character position.
    #[tracing::instrument(skip(self))]
    pub fn set_format(&mut self, format: TimeFormat) {
        self.format = format;
        let now = self.now.unwrap_or_default();
        let chars = format.render(now);
        let hidden_seconds = !self.seconds_visible;
        self.glyphs = format
            .roles()
            .into_iter()
            .zip(chars)
            .enumerate()
            .map(|(idx, (role, ch))| {
                let glyph = Glyph::new(role, ch, idx as u32, now);
                if hidden_seconds && role.is_seconds_part() {
                    glyph.with_visibility(VisibilityState::Hidden, now)
                } else {
                    glyph
                }
            })
            .collect();
        tracing::debug!(glyphs = self.glyphs.len(), "glyphs allocated");
        self.set_constraints(self.available);
    }

    pub fn set_options(&mut self, options: LayoutOptions) -> ClockResult<()> {
        options.validate()?;
        self.engine.set_options(options);
        self.set_constraints(self.available);
        Ok(())
    }

    /// Fit the face into `available` and return the size it will occupy.
    ///
    /// Sizing uses each role's widest canonical glyph, so the result does not
    /// depend on the current time.
    #[tracing::instrument(skip(self))]
    pub fn set_constraints(&mut self, available: Size) -> Size {
        self.available = available;
        let options = *self.engine.options();
        let height = self.provider.native_height();

        let boxes: Vec<GlyphBox> = self
            .glyphs
            .iter()
            .map(|g| {
                let role = g.role();
                let width = self.provider.max_canonical_width(&|c| role.accepts(c));
                GlyphBox {
                    role,
                    native: Size::new(width, height),
                    scale: role_scale(role, &options),
                    skipped: false,
                    presence: 1.0,
                }
            })
            .collect();

        self.engine.set_scale(1.0);
        let native = self.engine.measure(&boxes).bounds;
        let scale = if native.width > 0.0
            && native.height > 0.0
            && available.width > 0.0
            && available.height > 0.0
        {
            (available.width / native.width).min(available.height / native.height)
        } else {
            0.0
        };

        self.engine.set_scale(scale);
        for g in &mut self.glyphs {
            g.set_scale(scale * role_scale(g.role(), &options));
        }
        self.measured = Size::new(native.width * scale, native.height * scale);
        tracing::debug!(scale, width = self.measured.width, height = self.measured.height, "constraints");
        self.measured
    }

    pub fn measured_size(&self) -> Size {
        self.measured
    }

    pub fn scale(&self) -> f64 {
        self.engine.scale()
    }

    pub fn is_drawable(&self) -> bool {
        self.state == DriverState::Ready
            && self.engine.scale() > 0.0
            && self.available.width > 0.0
            && self.available.height > 0.0
    }

    /// Advance to `now`: re-key glyphs from the current and next second, fire
    /// second-boundary callbacks, and tick every glyph.
    pub fn update(&mut self, now: ClockInstant) {
        if self.state != DriverState::Ready {
            return;
        }
        let options = *self.engine.options();
        let policy = options.visibility_policy;
        let boundary = self
            .now
            .is_some_and(|prev| prev.second_index() != now.second_index());

        let current = self.format.render(now);
        let next = self.format.render(now.plus_seconds(1));

        for (idx, glyph) in self.glyphs.iter_mut().enumerate() {
            let (Some(&cur), Some(&nxt)) = (current.get(idx), next.get(idx)) else {
                continue;
            };
            if boundary {
                glyph.on_second_boundary(policy, now);
                if glyph.key().start != cur {
                    glyph.request_activity(ActivityTarget::Active, now, &options.timings);
                }
            }
            glyph.set_key(GlyphKey::between(cur, nxt));
            glyph.tick(now, &options.timings, policy);
        }

        self.animation_time_millis = u64::from(now.millis());
        self.morph_progress = morph_progress(self.animation_time_millis, options.morph_duration_millis);
        self.now = Some(now);
    }

    /// Intra-second morph progress recorded by the last `update`.
    pub fn morph_progress(&self) -> f64 {
        self.morph_progress
    }

    /// Milliseconds into the current second at the last `update`.
    pub fn animation_time_millis(&self) -> u64 {
        self.animation_time_millis
    }

    /// Lay out and draw the face as of the last `update`.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        if !self.is_drawable() {
            return;
        }
        let Some(now) = self.now else {
            return;
        };
        let options = *self.engine.options();
        let policy = options.visibility_policy;
        let timings = options.timings;
        let progress = self.morph_progress;
        let provider = self.provider.as_ref();
        let height = provider.native_height();

        let boxes: Vec<GlyphBox> = self
            .glyphs
            .iter()
            .map(|g| GlyphBox {
                role: g.role(),
                native: Size::new(g.native_width(provider, now, progress, policy, &timings), height),
                scale: g.scale(),
                skipped: g.is_skipped(),
                presence: g.presence(now, progress, policy, &timings),
            })
            .collect();

        let area = Rect::from_origin_size(Point::ORIGIN, self.available);
        let frame = self.engine.layout(&boxes, area);
        for placement in &frame.glyphs {
            let Some(glyph) = self.glyphs.get(placement.index) else {
                continue;
            };
            let squeeze = match policy {
                VisibilityPolicy::Synchronized => 1.0,
                VisibilityPolicy::Desynchronized => glyph.presence(now, progress, policy, &timings),
            };
            let paint = glyph.paint(now, progress, policy, &timings);
            surface.save();
            surface.translate(placement.rect.origin().to_vec2());
            surface.scale(placement.scale * squeeze, placement.scale);
            provider.plot(glyph.effective_key(policy), progress, surface, &paint);
            surface.restore();
        }
    }

    /// Layout produced by the last `render`.
    pub fn frame(&self) -> &LayoutFrame {
        self.engine.frame()
    }

    /// Index of the glyph drawn at `point` in the last frame.
    pub fn glyph_at(&self, point: Point) -> Option<usize> {
        self.engine.glyph_at(point)
    }

    /// Pin every glyph's activity, or release with `None`.
    pub fn force_activity(&mut self, lock: Option<ActivityTarget>) {
        for g in &mut self.glyphs {
            g.set_activity_lock(lock);
        }
    }

    pub fn force_glyph_activity(&mut self, index: usize, lock: Option<ActivityTarget>) -> ClockResult<()> {
        self.glyph_mut(index)?.set_activity_lock(lock);
        Ok(())
    }

    /// Pin every glyph's visibility, or release with `None`.
    pub fn force_visibility(&mut self, lock: Option<VisibilityTarget>) {
        let now = self.now.unwrap_or_default();
        for g in &mut self.glyphs {
            g.set_visibility_lock(lock, now);
        }
    }

    pub fn force_glyph_visibility(&mut self, index: usize, lock: Option<VisibilityTarget>) -> ClockResult<()> {
        let now = self.now.unwrap_or_default();
        self.glyph_mut(index)?.set_visibility_lock(lock, now);
        Ok(())
    }

    /// Animate the seconds field in or out through the visibility policy.
    pub fn set_seconds_visible(&mut self, visible: bool) {
        self.seconds_visible = visible;
        let now = self.now.unwrap_or_default();
        let options = *self.engine.options();
        let target = if visible {
            VisibilityTarget::Visible
        } else {
            VisibilityTarget::Hidden
        };
        for g in self.glyphs.iter_mut().filter(|g| g.role().is_seconds_part()) {
            g.request_visibility(target, options.visibility_policy, now, &options.timings);
        }
    }

    pub fn seconds_visible(&self) -> bool {
        self.seconds_visible
    }

    fn glyph_mut(&mut self, index: usize) -> ClockResult<&mut Glyph> {
        let count = self.glyphs.len();
        self.glyphs
            .get_mut(index)
            .ok_or_else(|| ClockError::validation(format!("glyph index {index} out of range (have {count})")))
    }
}

fn role_scale(role: GlyphRole, options: &LayoutOptions) -> f64 {
    if role.is_seconds_part() {
        options.seconds_scale
    } else {
        1.0
    }
}

/// Each second morphs during its last `duration` milliseconds.
fn morph_progress(millis_in_second: u64, duration: u64) -> f64 {
    let duration = duration.clamp(1, MILLIS_PER_SECOND);
    let start = MILLIS_PER_SECOND - duration;
    if millis_in_second <= start {
        return 0.0;
    }
    ((millis_in_second - start) as f64 / duration as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/clock/driver.rs"]
mod tests;
