use crate::layout::options::LayoutMode;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GlyphRole {
    #[default]
    Default,
    Hour,
    Minute,
    Second,
    SeparatorHoursMinutes,
    SeparatorMinutesSeconds,
}

impl GlyphRole {
    pub fn is_separator(self) -> bool {
        matches!(
            self,
            Self::SeparatorHoursMinutes | Self::SeparatorMinutesSeconds
        )
    }

    /// Whether this glyph ends the current row (and is consumed by the break).
    pub fn breaks_line(self, mode: LayoutMode) -> bool {
        match mode {
            LayoutMode::Horizontal => false,
            LayoutMode::Vertical => self.is_separator(),
            LayoutMode::Wrapped => self == Self::SeparatorMinutesSeconds,
        }
    }

    /// Glyphs that follow the "show seconds" toggle.
    pub fn is_seconds_part(self) -> bool {
        matches!(self, Self::Second | Self::SeparatorMinutesSeconds)
    }

    /// Whether `ch` can ever be displayed by a glyph with this role.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Default => true,
            Self::Hour | Self::Minute | Self::Second => ch == ' ' || ch.is_ascii_digit(),
            Self::SeparatorHoursMinutes | Self::SeparatorMinutesSeconds => ch == ' ' || ch == ':',
        }
    }
}
