use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::{
    animation::keyframe::Animation,
    clock::format::TimeFormat,
    foundation::core::lerp,
    foundation::error::{ClockError, ClockResult},
    render::surface::{Paint, Surface},
    shape::image::PathImage,
};

const WIDTH_EPSILON: f64 = 1e-6;

/// Which picture a glyph shows: a static character, or a morph `start -> end`.
///
/// Displays as `"2"` or `"2_3"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphKey {
    pub start: char,
    pub end: char,
}

impl GlyphKey {
    pub fn fixed(ch: char) -> Self {
        Self { start: ch, end: ch }
    }

    /// Equal ends behave like [`GlyphKey::fixed`].
    pub fn between(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub fn is_static(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}_{}", self.start, self.end)
        }
    }
}

impl FromStr for GlyphKey {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        match chars.as_slice() {
            [c] => Ok(Self::fixed(*c)),
            [a, '_', b] => Ok(Self::between(*a, *b)),
            _ => Err(ClockError::validation(format!("invalid glyph key '{s}'"))),
        }
    }
}

/// Source of glyph artwork: canonical pictures and character-pair morphs.
///
/// Implementations are immutable data shared across clock instances.
pub trait GlyphShapeProvider {
    fn canonical(&self, ch: char) -> Option<&PathImage>;

    fn transition(&self, from: char, to: char) -> Option<&Animation>;

    /// Native cell height shared by every glyph.
    fn native_height(&self) -> f64;

    /// Characters with a canonical picture.
    fn characters(&self) -> Vec<char>;

    fn width_at(&self, key: GlyphKey, progress: f64) -> f64 {
        if key.is_static() {
            return self.canonical(key.start).map_or(0.0, PathImage::width);
        }
        if let Some(anim) = self.transition(key.start, key.end) {
            return anim.width_at(progress);
        }
        let a = self.canonical(key.start).map_or(0.0, PathImage::width);
        let b = self.canonical(key.end).map_or(0.0, PathImage::width);
        lerp(a, b, progress.clamp(0.0, 1.0))
    }

    /// Draw `key` at `progress` in native glyph coordinates.
    fn plot(&self, key: GlyphKey, progress: f64, surface: &mut dyn Surface, paint: &Paint) {
        if !key.is_static() {
            if let Some(anim) = self.transition(key.start, key.end) {
                anim.plot(progress, surface, paint);
                return;
            }
            tracing::warn!(%key, "no transition for key, drawing the start glyph");
        }
        if let Some(img) = self.canonical(key.start) {
            img.plot(surface, paint);
        }
    }

    /// Widest canonical picture among the characters `filter` accepts.
    fn max_canonical_width(&self, filter: &dyn Fn(char) -> bool) -> f64 {
        self.characters()
            .into_iter()
            .filter(|&c| filter(c))
            .filter_map(|c| self.canonical(c).map(PathImage::width))
            .fold(0.0, f64::max)
    }
}

/// Plain-data font: canonical pictures by character, morphs by character pair.
#[derive(Clone, Debug)]
pub struct GlyphFont {
    name: String,
    native_height: f64,
    canonical: BTreeMap<char, PathImage>,
    transitions: HashMap<(char, char), Animation>,
}

impl GlyphFont {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

impl GlyphShapeProvider for GlyphFont {
    fn canonical(&self, ch: char) -> Option<&PathImage> {
        self.canonical.get(&ch)
    }

    fn transition(&self, from: char, to: char) -> Option<&Animation> {
        self.transitions.get(&(from, to))
    }

    fn native_height(&self) -> f64 {
        self.native_height
    }

    fn characters(&self) -> Vec<char> {
        self.canonical.keys().copied().collect()
    }
}

/// Collects font data and checks it against the formats it must serve.
#[derive(Debug, Default)]
pub struct FontBuilder {
    name: String,
    native_height: f64,
    canonical: BTreeMap<char, PathImage>,
    transitions: HashMap<(char, char), Animation>,
    formats: Vec<TimeFormat>,
}

impl FontBuilder {
    pub fn new(name: impl Into<String>, native_height: f64) -> Self {
        Self {
            name: name.into(),
            native_height,
            ..Self::default()
        }
    }

    pub fn canonical(mut self, ch: char, image: PathImage) -> Self {
        self.canonical.insert(ch, image);
        self
    }

    pub fn transition(mut self, from: char, to: char, anim: impl Into<Animation>) -> Self {
        self.transitions.insert((from, to), anim.into());
        self
    }

    /// Require every glyph pair reachable under `format` to be present.
    pub fn validate_for(mut self, format: TimeFormat) -> Self {
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
        self
    }

    #[tracing::instrument(skip(self), fields(font = %self.name))]
    pub fn build(self) -> ClockResult<GlyphFont> {
        if self.native_height.is_nan() || self.native_height <= 0.0 {
            return Err(ClockError::font(format!(
                "font '{}' native height must be > 0",
                self.name
            )));
        }

        let font = GlyphFont {
            name: self.name,
            native_height: self.native_height,
            canonical: self.canonical,
            transitions: self.transitions,
        };

        for (&(from, to), anim) in &font.transitions {
            check_transition_widths(&font, from, to, anim)?;
        }

        for format in &self.formats {
            let reachable = format.reachable();
            for &ch in &reachable.chars {
                if font.canonical(ch).is_none() {
                    return Err(ClockError::font(format!(
                        "font '{}' has no canonical glyph for {ch:?} (format {format:?})",
                        font.name
                    )));
                }
            }
            for &(from, to) in &reachable.transitions {
                if font.transition(from, to).is_none() {
                    return Err(ClockError::font(format!(
                        "font '{}' has no transition {} (format {format:?})",
                        font.name,
                        GlyphKey::between(from, to)
                    )));
                }
            }
            tracing::debug!(
                ?format,
                chars = reachable.chars.len(),
                transitions = reachable.transitions.len(),
                "font covers format"
            );
        }

        Ok(font)
    }
}

fn check_transition_widths(
    font: &GlyphFont,
    from: char,
    to: char,
    anim: &Animation,
) -> ClockResult<()> {
    let key = GlyphKey::between(from, to);
    if key.is_static() {
        return Err(ClockError::font(format!(
            "font '{}' maps static glyph {key} as a transition",
            font.name
        )));
    }
    let Some(start) = font.canonical(from) else {
        return Err(ClockError::font(format!(
            "font '{}' transition {key} starts from a character without a canonical glyph",
            font.name
        )));
    };
    let w0 = anim.width_at(0.0);
    if (w0 - start.width()).abs() > WIDTH_EPSILON {
        return Err(ClockError::font(format!(
            "font '{}' transition {key} starts {w0} wide, canonical {from:?} is {}",
            font.name,
            start.width()
        )));
    }
    let Some(end) = font.canonical(to) else {
        return Err(ClockError::font(format!(
            "font '{}' transition {key} ends on a character without a canonical glyph",
            font.name
        )));
    };
    let w1 = anim.width_at(1.0);
    if (w1 - end.width()).abs() > WIDTH_EPSILON {
        return Err(ClockError::font(format!(
            "font '{}' transition {key} ends {w1} wide, canonical {to:?} is {}",
            font.name,
            end.width()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/font/provider.rs"]
mod tests;
