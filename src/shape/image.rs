use crate::{
    foundation::core::{Size, lerp},
    foundation::error::{ClockError, ClockResult},
    render::surface::{Paint, StyleIndex, Surface},
    shape::command::Shape,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub shape: Shape,
    pub style: StyleIndex,
}

/// A multi-layer glyph picture: shapes painted in order, each with a style.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathImage {
    layers: Vec<Layer>,
}

impl PathImage {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn single(shape: Shape, style: StyleIndex) -> Self {
        Self::new(vec![Layer { shape, style }])
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Union of the layers' native sizes.
    pub fn size(&self) -> Size {
        self.layers.iter().fold(Size::ZERO, |acc, l| {
            Size::new(acc.width.max(l.shape.width()), acc.height.max(l.shape.height()))
        })
    }

    pub fn width(&self) -> f64 {
        self.size().width
    }

    pub fn height(&self) -> f64 {
        self.size().height
    }

    pub fn is_compatible(&self, other: &Self) -> bool {
        self.layers.len() == other.layers.len()
            && self
                .layers
                .iter()
                .zip(&other.layers)
                .all(|(a, b)| a.shape.is_compatible(&b.shape))
    }

    pub fn check_compatible(&self, other: &Self) -> ClockResult<()> {
        if self.layers.len() != other.layers.len() {
            return Err(ClockError::shape(format!(
                "layer count differs ({} vs {})",
                self.layers.len(),
                other.layers.len()
            )));
        }
        for (idx, (a, b)) in self.layers.iter().zip(&other.layers).enumerate() {
            a.shape
                .check_compatible(&b.shape)
                .map_err(|e| ClockError::shape(format!("layer {idx}: {e}")))?;
        }
        Ok(())
    }

    /// Styles are taken from `self`; only geometry blends.
    pub fn interpolate(&self, other: &Self, t: f64) -> ClockResult<Self> {
        self.check_compatible(other)?;
        let layers = self
            .layers
            .iter()
            .zip(&other.layers)
            .map(|(a, b)| {
                Ok(Layer {
                    shape: a.shape.interpolate(&b.shape, t)?,
                    style: a.style,
                })
            })
            .collect::<ClockResult<Vec<_>>>()?;
        Ok(Self { layers })
    }

    pub fn width_between(a: &Self, b: &Self, t: f64) -> f64 {
        lerp(a.width(), b.width(), t)
    }

    pub fn plot(&self, surface: &mut dyn Surface, paint: &Paint) {
        for layer in &self.layers {
            let style = layer.style;
            layer
                .shape
                .plot(surface, &mut |s| s.draw_path(style, paint));
        }
    }

    pub fn plot_interpolated(
        a: &Self,
        b: &Self,
        t: f64,
        surface: &mut dyn Surface,
        paint: &Paint,
    ) {
        if a.layers.len() != b.layers.len() {
            debug_assert!(
                false,
                "interpolating images with {} and {} layers",
                a.layers.len(),
                b.layers.len()
            );
            tracing::warn!(
                start = a.layers.len(),
                end = b.layers.len(),
                "layer count mismatch, drawing the start image only"
            );
            a.plot(surface, paint);
            return;
        }
        for (la, lb) in a.layers.iter().zip(&b.layers) {
            let style = la.style;
            Shape::plot_interpolated(&la.shape, &lb.shape, t, surface, &mut |s| {
                s.draw_path(style, paint)
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/image.rs"]
mod tests;
