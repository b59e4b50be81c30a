use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Index into the palette of draw styles a glyph picture refers to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StyleIndex(pub u16);

/// Per-glyph paint state forwarded with every `draw_path` call.
///
/// The engine never resolves colors itself. It tells the surface how
/// emphasized the glyph is (activity), how present it is (visibility), and
/// which cosmetic cycle slot it owns; the surface maps that onto its styles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Paint {
    /// Activity emphasis in `[0, 1]`; `1` is fully active.
    pub emphasis: f64,
    /// Visibility presence in `[0, 1]`; `0` is fully hidden.
    pub opacity: f64,
    /// Per-glyph offset into cyclic cosmetic tables (accent colors, etc).
    pub color_offset: u32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            emphasis: 0.0,
            opacity: 1.0,
            color_offset: 0,
        }
    }
}

/// Abstract drawing target.
///
/// Path construction calls accumulate into a pending path which
/// [`Surface::draw_path`] consumes. Angles are in degrees.
pub trait Surface {
    fn move_to(&mut self, p: Point);

    fn line_to(&mut self, p: Point);

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point);

    /// Elliptical arc segment; connects to the arc start with a line when a
    /// path is already open.
    fn arc(&mut self, center: Point, radii: Vec2, start_deg: f64, sweep_deg: f64);

    fn rect(&mut self, rect: Rect);

    fn circle(&mut self, center: Point, radius: f64);

    fn close(&mut self);

    /// Paint and reset the pending path.
    fn draw_path(&mut self, style: StyleIndex, paint: &Paint);

    fn save(&mut self);

    fn restore(&mut self);

    /// Concatenate `affine` onto the current transform (`current * affine`).
    fn transform(&mut self, affine: Affine);

    fn translate(&mut self, v: Vec2) {
        self.transform(Affine::translate(v));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    fn rotate(&mut self, degrees: f64, pivot: Point) {
        let pivot = pivot.to_vec2();
        self.transform(
            Affine::translate(pivot) * Affine::rotate(degrees.to_radians()) * Affine::translate(-pivot),
        );
    }
}
