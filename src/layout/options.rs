use crate::{
    foundation::error::{ClockError, ClockResult},
    glyph::visibility::VisibilityPolicy,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayoutMode {
    /// One row.
    #[default]
    Horizontal,
    /// A row per field, broken at every separator.
    Vertical,
    /// Hours and minutes on one row, seconds below.
    Wrapped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

/// Placement of the whole glyph block inside the available area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OuterAlignment {
    pub horizontal: Align,
    pub vertical: Align,
}

/// Durations driving the per-glyph state machines, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StateTimings {
    /// How long a glyph stays Active before decaying on its own.
    pub active_millis: u64,
    /// Length of Activating and Deactivating.
    pub change_millis: u64,
    /// Length of Appearing and Disappearing under the desynchronized policy.
    pub visibility_millis: u64,
}

impl Default for StateTimings {
    fn default() -> Self {
        Self {
            active_millis: 2_000,
            change_millis: 400,
            visibility_millis: 600,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub mode: LayoutMode,
    /// Gap between adjacent glyphs and between rows, in native units.
    pub spacing: f64,
    /// Alignment of each row against the widest row.
    pub inner_alignment: Align,
    pub outer_alignment: OuterAlignment,
    pub timings: StateTimings,
    /// Extra scale applied to the seconds glyphs and their separator.
    pub seconds_scale: f64,
    /// Stroke width of the widest stroked style, in native units.
    pub stroke_width: f64,
    pub visibility_policy: VisibilityPolicy,
    /// Each second's morph plays during its final `morph_duration_millis`.
    pub morph_duration_millis: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Horizontal,
            spacing: 8.0,
            inner_alignment: Align::Center,
            outer_alignment: OuterAlignment::default(),
            timings: StateTimings::default(),
            seconds_scale: 1.0,
            stroke_width: 0.0,
            visibility_policy: VisibilityPolicy::Synchronized,
            morph_duration_millis: 700,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> ClockResult<()> {
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ClockError::validation(format!(
                "layout spacing must be finite and >= 0 (got {})",
                self.spacing
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ClockError::validation(format!(
                "stroke width must be finite and >= 0 (got {})",
                self.stroke_width
            )));
        }
        if !self.seconds_scale.is_finite() || self.seconds_scale <= 0.0 {
            return Err(ClockError::validation(format!(
                "seconds scale must be finite and > 0 (got {})",
                self.seconds_scale
            )));
        }
        let t = &self.timings;
        if t.active_millis == 0 || t.change_millis == 0 || t.visibility_millis == 0 {
            return Err(ClockError::validation("state durations must be > 0 ms"));
        }
        if self.morph_duration_millis == 0 || self.morph_duration_millis > 1_000 {
            return Err(ClockError::validation(format!(
                "morph duration must be within 1..=1000 ms (got {})",
                self.morph_duration_millis
            )));
        }
        Ok(())
    }
}
