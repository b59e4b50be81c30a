use crate::{
    foundation::core::{Point, Rect, Size, Vec2},
    glyph::role::GlyphRole,
    layout::options::{Align, LayoutOptions},
};

/// Per-frame layout input for one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphBox {
    pub role: GlyphRole,
    /// Unscaled size this frame.
    pub native: Size,
    pub scale: f64,
    /// Hidden or zero-scale; keeps its slot for line-break bookkeeping only.
    pub skipped: bool,
    /// Visibility in `[0, 1]`. Weighs the gap in front of the glyph so a
    /// fading glyph and its spacing reach zero together.
    pub presence: f64,
}

impl GlyphBox {
    pub fn scaled(&self) -> Size {
        Size::new(self.native.width * self.scale, self.native.height * self.scale)
    }
}

/// One row of glyphs: indices `[first, end)` of the input sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowMetrics {
    pub first: usize,
    pub end: usize,
    pub size: Size,
    pub visible: usize,
    /// Highest glyph presence in the row.
    pub presence: f64,
}

impl RowMetrics {
    pub fn is_empty(&self) -> bool {
        self.visible == 0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    pub rows: Vec<RowMetrics>,
    /// Union of the rows, without stroke padding.
    pub content: Size,
    /// `content` padded by one stroke width.
    pub bounds: Size,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    pub index: usize,
    pub rect: Rect,
    pub scale: f64,
}

/// Everything the render pass produced for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutFrame {
    pub glyphs: Vec<GlyphPlacement>,
    pub rows: Vec<Rect>,
    pub bounds: Rect,
}

/// Two-pass glyph layout: measure rows, then place glyphs inside an area.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    options: LayoutOptions,
    /// Base scale applied to spacing and stroke padding.
    scale: f64,
    frame: LayoutFrame,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            scale: 1.0,
            frame: LayoutFrame::default(),
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    fn spacing(&self) -> f64 {
        self.options.spacing * self.scale
    }

    fn stroke(&self) -> f64 {
        self.options.stroke_width * self.scale
    }

    /// First pass: split into rows and size them.
    pub fn measure(&self, boxes: &[GlyphBox]) -> Measurement {
        let spacing = self.spacing();
        let mut rows = Vec::new();
        let mut row = RowMetrics::default();
        let mut prior = 0.0;

        for (idx, b) in boxes.iter().enumerate() {
            if b.role.breaks_line(self.options.mode) {
                row.end = idx;
                rows.push(row);
                row = RowMetrics {
                    first: idx + 1,
                    ..RowMetrics::default()
                };
                prior = 0.0;
                continue;
            }
            if b.skipped {
                continue;
            }
            let size = b.scaled();
            row.size.width += gap(spacing, b.presence, prior);
            row.size.width += size.width;
            row.size.height = row.size.height.max(size.height);
            row.visible += 1;
            prior = f64::max(prior, b.presence.clamp(0.0, 1.0));
            row.presence = prior;
        }
        row.end = boxes.len();
        rows.push(row);

        let mut content = Size::ZERO;
        let mut prior = 0.0;
        for r in rows.iter().filter(|r| !r.is_empty()) {
            content.width = content.width.max(r.size.width);
            content.height += gap(spacing, r.presence, prior) + r.size.height;
            prior = f64::max(prior, r.presence);
        }
        let stroke = self.stroke();
        let bounds = Size::new(content.width + stroke, content.height + stroke);

        tracing::trace!(
            rows = rows.len(),
            width = content.width,
            height = content.height,
            "layout measured"
        );
        Measurement {
            rows,
            content,
            bounds,
        }
    }

    /// Second pass: place every non-skipped glyph inside `area`.
    ///
    /// Rows align against the widest row, the block aligns against `area`.
    /// Glyphs sit on the row's bottom edge.
    pub fn render(&mut self, boxes: &[GlyphBox], measurement: &Measurement, area: Rect) -> &LayoutFrame {
        let spacing = self.spacing();
        let stroke = self.stroke();
        let outer = self.options.outer_alignment;
        let origin = Vec2::new(
            area.x0 + align_offset(area.width(), measurement.bounds.width, outer.horizontal),
            area.y0 + align_offset(area.height(), measurement.bounds.height, outer.vertical),
        ) + Vec2::new(stroke * 0.5, stroke * 0.5);

        let mut glyphs = Vec::with_capacity(boxes.len());
        let mut row_rects = Vec::with_capacity(measurement.rows.len());
        let mut y = 0.0;
        let mut prior_row = 0.0;
        for row in measurement.rows.iter().filter(|r| !r.is_empty()) {
            y += gap(spacing, row.presence, prior_row);
            prior_row = f64::max(prior_row, row.presence);
            let inner = align_offset(
                measurement.content.width,
                row.size.width,
                self.options.inner_alignment,
            );
            let top_left = Point::new(origin.x + inner, origin.y + y);
            row_rects.push(Rect::from_origin_size(top_left, row.size));

            let mut x = 0.0;
            let mut prior = 0.0;
            for idx in row.first..row.end.min(boxes.len()) {
                let b = &boxes[idx];
                if b.skipped || b.role.breaks_line(self.options.mode) {
                    continue;
                }
                let size = b.scaled();
                x += gap(spacing, b.presence, prior);
                prior = f64::max(prior, b.presence.clamp(0.0, 1.0));
                let at = Point::new(top_left.x + x, top_left.y + row.size.height - size.height);
                glyphs.push(GlyphPlacement {
                    index: idx,
                    rect: Rect::from_origin_size(at, size),
                    scale: b.scale,
                });
                x += size.width;
            }
            y += row.size.height;
        }

        self.frame = LayoutFrame {
            glyphs,
            rows: row_rects,
            bounds: Rect::from_origin_size(
                Point::new(origin.x - stroke * 0.5, origin.y - stroke * 0.5),
                measurement.bounds,
            ),
        };
        &self.frame
    }

    /// Measure and place in one go.
    pub fn layout(&mut self, boxes: &[GlyphBox], area: Rect) -> &LayoutFrame {
        let measurement = self.measure(boxes);
        self.render(boxes, &measurement, area)
    }

    pub fn frame(&self) -> &LayoutFrame {
        &self.frame
    }

    /// Topmost glyph under `point` in the last frame.
    pub fn glyph_at(&self, point: Point) -> Option<usize> {
        self.frame
            .glyphs
            .iter()
            .rev()
            .find(|g| g.rect.contains(point))
            .map(|g| g.index)
    }
}

/// Spacing in front of a glyph (or row): weighted by its own presence, capped
/// by the strongest one before it. Zero for the first item.
fn gap(spacing: f64, presence: f64, prior: f64) -> f64 {
    spacing * presence.clamp(0.0, 1.0).min(prior)
}

fn align_offset(container: f64, content: f64, align: Align) -> f64 {
    let rem = (container - content).max(0.0);
    match align {
        Align::Start => 0.0,
        Align::Center => rem * 0.5,
        Align::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
