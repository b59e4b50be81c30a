use crate::{
    foundation::core::{Lerp, Rgba8},
    render::surface::{Paint, StyleIndex},
};

/// How a style paints its path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleKind {
    Fill,
    Stroke { width: f64 },
    /// Stroke that draws only the first `emphasis` fraction of the outline.
    Trace { width: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleSpec {
    pub kind: StyleKind,
    /// Color at rest.
    pub color: Rgba8,
    /// Color at full emphasis; the palette cycle overrides it when non-empty.
    pub accent: Rgba8,
}

impl StyleSpec {
    pub fn stroke_width(&self) -> f64 {
        match self.kind {
            StyleKind::Fill => 0.0,
            StyleKind::Stroke { width } | StyleKind::Trace { width } => width,
        }
    }
}

/// Style table indexed by [`StyleIndex`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub styles: Vec<StyleSpec>,
    pub background: Option<Rgba8>,
    /// Accent colors handed out by per-glyph color offset.
    pub cycle: Vec<Rgba8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: vec![
                StyleSpec {
                    kind: StyleKind::Fill,
                    color: Rgba8::opaque(0x9a, 0xa3, 0xad),
                    accent: Rgba8::opaque(0xff, 0xff, 0xff),
                },
                StyleSpec {
                    kind: StyleKind::Trace { width: 3.0 },
                    color: Rgba8::opaque(0x3a, 0x40, 0x48),
                    accent: Rgba8::opaque(0xff, 0xa0, 0x28),
                },
            ],
            background: Some(Rgba8::opaque(0x12, 0x14, 0x18)),
            cycle: vec![
                Rgba8::opaque(0xff, 0xa0, 0x28),
                Rgba8::opaque(0x4c, 0xc9, 0xf0),
                Rgba8::opaque(0x9b, 0xe5, 0x64),
                Rgba8::opaque(0xf2, 0x5f, 0x8c),
            ],
        }
    }
}

impl Palette {
    /// Style for `index`; out-of-range indices wrap. `None` on an empty table.
    pub fn style(&self, index: StyleIndex) -> Option<&StyleSpec> {
        if self.styles.is_empty() {
            return None;
        }
        self.styles.get(usize::from(index.0) % self.styles.len())
    }

    /// Widest stroke in the table, for layout padding.
    pub fn max_stroke_width(&self) -> f64 {
        self.styles
            .iter()
            .map(StyleSpec::stroke_width)
            .fold(0.0, f64::max)
    }

    pub fn resolve(&self, style: &StyleSpec, paint: &Paint) -> Rgba8 {
        let accent = if self.cycle.is_empty() {
            style.accent
        } else {
            self.cycle[paint.color_offset as usize % self.cycle.len()]
        };
        Rgba8::lerp(&style.color, &accent, paint.emphasis.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
