use kurbo::{Arc, Circle, PathEl, Shape as _};

use crate::{
    foundation::core::{Affine, BezPath, Point, Rect, Vec2},
    render::surface::{Paint, StyleIndex, Surface},
};

const FLATTEN_TOLERANCE: f64 = 0.05;

/// One painted path with everything needed to rasterize or serialize it.
#[derive(Clone, Debug)]
pub struct DrawOp {
    pub style: StyleIndex,
    pub paint: Paint,
    /// Already in surface (device) coordinates.
    pub path: BezPath,
}

/// A [`Surface`] that records transformed kurbo paths instead of drawing.
#[derive(Debug)]
pub struct SceneRecorder {
    ops: Vec<DrawOp>,
    pending: BezPath,
    transform: Affine,
    stack: Vec<Affine>,
}

impl Default for SceneRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pending: BezPath::new(),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    pub fn current_transform(&self) -> Affine {
        self.transform
    }

    /// Save-stack depth; zero after a balanced frame.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.pending = BezPath::new();
        self.transform = Affine::IDENTITY;
        self.stack.clear();
    }

    fn push_el(&mut self, el: PathEl) {
        self.pending.push(self.transform * el);
    }

    fn extend_els(&mut self, els: impl Iterator<Item = PathEl>) {
        for el in els {
            self.push_el(el);
        }
    }

    fn has_open_subpath(&self) -> bool {
        matches!(
            self.pending.elements().last(),
            Some(PathEl::MoveTo(_) | PathEl::LineTo(_) | PathEl::QuadTo(..) | PathEl::CurveTo(..))
        )
    }
}

impl Surface for SceneRecorder {
    fn move_to(&mut self, p: Point) {
        self.push_el(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        if self.has_open_subpath() {
            self.push_el(PathEl::LineTo(p));
        } else {
            self.push_el(PathEl::MoveTo(p));
        }
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        if !self.has_open_subpath() {
            self.push_el(PathEl::MoveTo(c1));
        }
        self.push_el(PathEl::CurveTo(c1, c2, p));
    }

    fn arc(&mut self, center: Point, radii: Vec2, start_deg: f64, sweep_deg: f64) {
        let arc = Arc::new(
            center,
            radii,
            start_deg.to_radians(),
            sweep_deg.to_radians(),
            0.0,
        );
        let start = center
            + Vec2::new(
                radii.x * start_deg.to_radians().cos(),
                radii.y * start_deg.to_radians().sin(),
            );
        self.line_to(start);
        self.extend_els(arc.append_iter(FLATTEN_TOLERANCE));
    }

    fn rect(&mut self, rect: Rect) {
        self.extend_els(rect.path_elements(FLATTEN_TOLERANCE));
    }

    fn circle(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        self.extend_els(Circle::new(center, radius).path_elements(FLATTEN_TOLERANCE));
    }

    fn close(&mut self) {
        if self.has_open_subpath() {
            self.pending.close_path();
        }
    }

    fn draw_path(&mut self, style: StyleIndex, paint: &Paint) {
        let path = std::mem::take(&mut self.pending);
        if path.elements().is_empty() {
            return;
        }
        self.ops.push(DrawOp {
            style,
            paint: *paint,
            path,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn transform(&mut self, affine: Affine) {
        self.transform *= affine;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
