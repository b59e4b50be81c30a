use std::path::Path;

use anyhow::Context;

use crate::{
    clock::format::TimeFormat,
    foundation::error::{ClockError, ClockResult},
    layout::options::LayoutOptions,
    render::palette::Palette,
};

/// Everything a clock face needs besides its font, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub format: TimeFormat,
    pub layout: LayoutOptions,
    pub palette: Palette,
}

impl ClockConfig {
    pub fn from_json_str(json: &str) -> ClockResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ClockResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ClockResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ClockResult<()> {
        self.layout.validate()?;
        if self.palette.styles.is_empty() {
            return Err(ClockError::validation("palette needs at least one style"));
        }
        for (idx, style) in self.palette.styles.iter().enumerate() {
            let w = style.stroke_width();
            if !w.is_finite() || w < 0.0 {
                return Err(ClockError::validation(format!(
                    "palette style {idx} has invalid stroke width {w}"
                )));
            }
        }
        Ok(())
    }

    /// Layout options with stroke padding raised to cover the palette.
    pub fn effective_layout(&self) -> LayoutOptions {
        LayoutOptions {
            stroke_width: self.layout.stroke_width.max(self.palette.max_stroke_width()),
            ..self.layout
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/config.rs"]
mod tests;
