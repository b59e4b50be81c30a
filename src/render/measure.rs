use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::foundation::core::{BezPath, Point};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Arclength lookup over a path, used by stroke-animated styles.
#[derive(Clone, Debug)]
pub struct PathMeasure {
    segments: Vec<MeasuredSeg>,
    length: f64,
}

#[derive(Clone, Copy, Debug)]
struct MeasuredSeg {
    seg: PathSeg,
    start: f64,
    len: f64,
}

impl PathMeasure {
    pub fn new(path: &BezPath) -> Self {
        let mut segments = Vec::new();
        let mut length = 0.0;
        for seg in path.segments() {
            let len = seg.arclen(ARCLEN_ACCURACY);
            segments.push(MeasuredSeg {
                seg,
                start: length,
                len,
            });
            length += len;
        }
        Self { segments, length }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Point at arclength `distance`, clamped to the path.
    pub fn point_at(&self, distance: f64) -> Option<Point> {
        let d = distance.clamp(0.0, self.length);
        let ms = self.locate(d)?;
        Some(ms.seg.eval(ms.param_at(d - ms.start)))
    }

    /// The sub-path covering arclengths `[start, end]`.
    pub fn segment(&self, start: f64, end: f64) -> BezPath {
        let start = start.clamp(0.0, self.length);
        let end = end.clamp(0.0, self.length);
        let mut out = BezPath::new();
        if end <= start {
            return out;
        }

        let mut last_end: Option<Point> = None;
        for ms in &self.segments {
            let seg_end = ms.start + ms.len;
            if seg_end <= start || ms.start >= end || ms.len <= 0.0 {
                continue;
            }
            let t0 = ms.param_at((start - ms.start).max(0.0));
            let t1 = ms.param_at((end - ms.start).min(ms.len));
            let piece = ms.seg.subsegment(t0..t1);
            let piece_start = piece.start();
            if last_end.is_none_or(|p| p.distance(piece_start) > 1e-9) {
                out.move_to(piece_start);
            }
            out.push(piece.as_path_el());
            last_end = Some(piece.end());
        }
        out
    }

    fn locate(&self, d: f64) -> Option<&MeasuredSeg> {
        if self.segments.is_empty() {
            return None;
        }
        let idx = self
            .segments
            .partition_point(|ms| ms.start + ms.len < d)
            .min(self.segments.len() - 1);
        self.segments.get(idx)
    }
}

impl MeasuredSeg {
    fn param_at(&self, local: f64) -> f64 {
        if self.len <= 0.0 {
            return 0.0;
        }
        if local >= self.len {
            return 1.0;
        }
        self.seg.inv_arclen(local, ARCLEN_ACCURACY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/measure.rs"]
mod tests;
