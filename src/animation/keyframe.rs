use crate::{
    animation::ease::Ease,
    foundation::core::lerp,
    foundation::error::{ClockError, ClockResult},
    render::surface::{Paint, Surface},
    shape::image::PathImage,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub progress: f64, // 0..=1
    pub image: PathImage,
}

impl Keyframe {
    pub fn new(progress: f64, image: PathImage) -> Self {
        Self { progress, image }
    }
}

/// A blend between two keyframes over `[start.progress, end.progress)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeTransition {
    start: Keyframe,
    end: Keyframe,
}

impl KeyframeTransition {
    pub fn new(start: Keyframe, end: Keyframe) -> ClockResult<Self> {
        if !(0.0..=1.0).contains(&start.progress) || !(0.0..=1.0).contains(&end.progress) {
            return Err(ClockError::validation(format!(
                "keyframe progress must be within [0, 1] (got {} -> {})",
                start.progress, end.progress
            )));
        }
        if start.progress >= end.progress {
            return Err(ClockError::validation(format!(
                "keyframe transition must move forward (got {} -> {})",
                start.progress, end.progress
            )));
        }
        start.image.check_compatible(&end.image)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &Keyframe {
        &self.start
    }

    pub fn end(&self) -> &Keyframe {
        &self.end
    }

    /// Half-open, except that a transition ending at `1` also owns `1`.
    pub fn contains(&self, p: f64) -> bool {
        self.start.progress <= p && (p < self.end.progress || (self.end.progress >= 1.0 && p >= 1.0))
    }

    /// Remap `p` into `[0, 1]` across this transition.
    pub fn local_progress(&self, p: f64) -> f64 {
        ((p - self.start.progress) / (self.end.progress - self.start.progress)).clamp(0.0, 1.0)
    }
}

/// Piecewise keyframed morph across progress `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeAnimation {
    canonical: PathImage,
    transitions: Vec<KeyframeTransition>, // sorted by start progress
    ease: Ease,
    /// Transitions never overlap; evaluation stops at the first match.
    linear: bool,
}

/// What an animation shows at a given progress.
#[derive(Debug)]
enum Sample<'a> {
    Canonical(&'a PathImage),
    Hold(&'a PathImage),
    Blend(&'a KeyframeTransition, f64),
}

impl KeyframeAnimation {
    pub fn new(
        canonical: PathImage,
        mut transitions: Vec<KeyframeTransition>,
        ease: Ease,
        linear: bool,
    ) -> ClockResult<Self> {
        transitions.sort_by(|a, b| a.start.progress.total_cmp(&b.start.progress));
        if linear {
            for pair in transitions.windows(2) {
                if pair[1].start.progress < pair[0].end.progress {
                    return Err(ClockError::validation(format!(
                        "linear animation has overlapping transitions at {}",
                        pair[1].start.progress
                    )));
                }
            }
        }
        Ok(Self {
            canonical,
            transitions,
            ease,
            linear,
        })
    }

    /// Evenly spaced, contiguous keyframes over `images`.
    pub fn sequence(images: Vec<PathImage>, ease: Ease) -> ClockResult<Self> {
        let Some(first) = images.first().cloned() else {
            return Err(ClockError::validation("animation needs at least one image"));
        };
        let steps = images.len().saturating_sub(1);
        let mut transitions = Vec::with_capacity(steps);
        for (idx, pair) in images.windows(2).enumerate() {
            let p0 = idx as f64 / steps as f64;
            let p1 = (idx + 1) as f64 / steps as f64;
            transitions.push(KeyframeTransition::new(
                Keyframe::new(p0, pair[0].clone()),
                Keyframe::new(p1, pair[1].clone()),
            )?);
        }
        Self::new(first, transitions, ease, true)
    }

    pub fn canonical(&self) -> &PathImage {
        &self.canonical
    }

    pub fn transitions(&self) -> &[KeyframeTransition] {
        &self.transitions
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    pub fn is_linear(&self) -> bool {
        self.linear
    }

    fn samples(&self, progress: f64) -> Vec<Sample<'_>> {
        let p = progress.clamp(0.0, 1.0);
        if p == 0.0 {
            return vec![Sample::Canonical(&self.canonical)];
        }

        let mut out = Vec::new();
        for tr in &self.transitions {
            if tr.contains(p) {
                out.push(Sample::Blend(tr, self.ease.apply(tr.local_progress(p))));
                if self.linear {
                    break;
                }
            }
        }
        if out.is_empty() {
            // Between non-contiguous transitions: hold the latest settled keyframe.
            let held = self
                .transitions
                .iter()
                .filter(|tr| tr.end.progress <= p)
                .max_by(|a, b| a.end.progress.total_cmp(&b.end.progress))
                .map_or(&self.canonical, |tr| &tr.end.image);
            out.push(Sample::Hold(held));
        }
        out
    }

    pub fn plot(&self, progress: f64, surface: &mut dyn Surface, paint: &Paint) {
        for sample in self.samples(progress) {
            match sample {
                Sample::Canonical(img) | Sample::Hold(img) => img.plot(surface, paint),
                Sample::Blend(tr, t) => {
                    PathImage::plot_interpolated(&tr.start.image, &tr.end.image, t, surface, paint)
                }
            }
        }
    }

    /// Native width at `progress`; the widest sample wins when transitions overlap.
    pub fn width_at(&self, progress: f64) -> f64 {
        self.samples(progress)
            .into_iter()
            .map(|sample| match sample {
                Sample::Canonical(img) | Sample::Hold(img) => img.width(),
                Sample::Blend(tr, t) => lerp(tr.start.image.width(), tr.end.image.width(), t),
            })
            .fold(0.0, f64::max)
    }

    pub fn height_at(&self, progress: f64) -> f64 {
        self.samples(progress)
            .into_iter()
            .map(|sample| match sample {
                Sample::Canonical(img) | Sample::Hold(img) => img.height(),
                Sample::Blend(tr, t) => lerp(tr.start.image.height(), tr.end.image.height(), t),
            })
            .fold(0.0, f64::max)
    }

    /// Materialize the picture at `progress`. With overlapping transitions the
    /// layers of every active sample are stacked in order.
    pub fn image_at(&self, progress: f64) -> ClockResult<PathImage> {
        let mut layers = Vec::new();
        for sample in self.samples(progress) {
            let img = match sample {
                Sample::Canonical(img) | Sample::Hold(img) => img.clone(),
                Sample::Blend(tr, t) => tr.start.image.interpolate(&tr.end.image, t)?,
            };
            layers.extend(img.layers().iter().cloned());
        }
        Ok(PathImage::new(layers))
    }
}

/// A glyph transition: one keyframed morph, or several running on
/// independent schedules inside the same cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Animation {
    Keyframes(KeyframeAnimation),
    Multipart(Vec<KeyframeAnimation>),
}

impl Animation {
    pub fn parts(&self) -> &[KeyframeAnimation] {
        match self {
            Self::Keyframes(anim) => std::slice::from_ref(anim),
            Self::Multipart(parts) => parts,
        }
    }

    pub fn plot(&self, progress: f64, surface: &mut dyn Surface, paint: &Paint) {
        for part in self.parts() {
            part.plot(progress, surface, paint);
        }
    }

    pub fn width_at(&self, progress: f64) -> f64 {
        self.parts()
            .iter()
            .map(|p| p.width_at(progress))
            .fold(0.0, f64::max)
    }

    pub fn height_at(&self, progress: f64) -> f64 {
        self.parts()
            .iter()
            .map(|p| p.height_at(progress))
            .fold(0.0, f64::max)
    }

    pub fn image_at(&self, progress: f64) -> ClockResult<PathImage> {
        let mut layers = Vec::new();
        for part in self.parts() {
            layers.extend(part.image_at(progress)?.layers().iter().cloned());
        }
        Ok(PathImage::new(layers))
    }
}

impl From<KeyframeAnimation> for Animation {
    fn from(value: KeyframeAnimation) -> Self {
        Self::Keyframes(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
