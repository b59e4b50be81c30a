//! morphclock is a morphing digital-clock engine.
//!
//! Each character cell morphs continuously into the next one ("2" deforms into
//! "3") instead of cross-fading. The engine is split into small layers:
//!
//! 1. **Shapes**: [`Shape`] and [`PathImage`] hold vector commands that
//!    interpolate command-for-command.
//! 2. **Animations**: [`KeyframeAnimation`] sequences images over progress
//!    `[0, 1]`; a [`GlyphShapeProvider`] (font) maps character pairs to them.
//! 3. **Glyphs**: every [`Glyph`] carries two independent state machines,
//!    activity (emphasis) and visibility (presence).
//! 4. **Layout**: [`LayoutEngine`] measures rows, then places glyphs whose
//!    widths change every frame.
//! 5. **Driver**: [`ClockDriver`] diffs "now" against "one second later",
//!    ticks the glyphs, and draws onto any [`Surface`].
//!
//! Drawing is backend-agnostic. [`SceneRecorder`] records kurbo paths and
//! [`to_svg`] serializes them.
#![forbid(unsafe_code)]

mod animation;
mod clock;
mod font;
mod foundation;
mod glyph;
mod layout;
mod render;
mod shape;

pub use animation::ease::Ease;
pub use animation::keyframe::{Animation, Keyframe, KeyframeAnimation, KeyframeTransition};
pub use clock::config::ClockConfig;
pub use clock::driver::{ClockDriver, DriverState, SharedProvider};
pub use clock::format::{BLANK, HourCycle, ReachableGlyphs, TimeFormat};
pub use font::provider::{FontBuilder, GlyphFont, GlyphKey, GlyphShapeProvider};
pub use font::segments::{build_segment_font, segment_font, supported_formats};
pub use foundation::core::{
    Affine, BezPath, Lerp, Point, Rect, Rgba8, Size, Transform2D, Vec2, lerp,
};
pub use foundation::error::{ClockError, ClockResult};
pub use foundation::time::{ClockInstant, MILLIS_PER_DAY, MILLIS_PER_SECOND, SECONDS_PER_DAY};
pub use glyph::activity::{ActivityMachine, ActivityState, ActivityTarget};
pub use glyph::glyph::Glyph;
pub use glyph::role::GlyphRole;
pub use glyph::visibility::{
    VisibilityMachine, VisibilityPolicy, VisibilityState, VisibilityTarget,
};
pub use layout::engine::{
    GlyphBox, GlyphPlacement, LayoutEngine, LayoutFrame, Measurement, RowMetrics,
};
pub use layout::options::{Align, LayoutMode, LayoutOptions, OuterAlignment, StateTimings};
pub use render::measure::PathMeasure;
pub use render::palette::{Palette, StyleKind, StyleSpec};
pub use render::scene::{DrawOp, SceneRecorder};
pub use render::surface::{Paint, StyleIndex, Surface};
pub use render::svg::{to_svg, write_svg};
pub use shape::command::{Command, CommandKind, Shape};
pub use shape::image::{Layer, PathImage};
