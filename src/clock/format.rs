use std::collections::BTreeSet;

use crate::{
    foundation::time::{ClockInstant, SECONDS_PER_DAY},
    glyph::role::GlyphRole,
};

pub const BLANK: char = ' ';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HourCycle {
    /// 1..=12
    H12,
    /// 0..=23
    #[default]
    H24,
}

/// Display format of the clock face. Changing it reallocates the glyph list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimeFormat {
    pub hour_cycle: HourCycle,
    /// Without a leading zero the tens-of-hours digit renders blank.
    pub leading_zero: bool,
    pub show_seconds: bool,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            hour_cycle: HourCycle::H24,
            leading_zero: true,
            show_seconds: true,
        }
    }
}

/// Every character and (start, end) pair a format can put on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReachableGlyphs {
    pub chars: BTreeSet<char>,
    pub transitions: BTreeSet<(char, char)>,
}

impl ReachableGlyphs {
    pub fn merge(&mut self, other: Self) {
        self.chars.extend(other.chars);
        self.transitions.extend(other.transitions);
    }
}

impl TimeFormat {
    pub fn roles(&self) -> Vec<GlyphRole> {
        let mut roles = vec![
            GlyphRole::Hour,
            GlyphRole::Hour,
            GlyphRole::SeparatorHoursMinutes,
            GlyphRole::Minute,
            GlyphRole::Minute,
        ];
        if self.show_seconds {
            roles.extend([
                GlyphRole::SeparatorMinutesSeconds,
                GlyphRole::Second,
                GlyphRole::Second,
            ]);
        }
        roles
    }

    pub fn glyph_count(&self) -> usize {
        if self.show_seconds { 8 } else { 5 }
    }

    pub fn display_hour(&self, t: ClockInstant) -> u32 {
        let h = t.hour();
        match self.hour_cycle {
            HourCycle::H24 => h,
            HourCycle::H12 => match h % 12 {
                0 => 12,
                v => v,
            },
        }
    }

    /// Fixed-length character sequence for `t`, one char per glyph.
    pub fn render(&self, t: ClockInstant) -> Vec<char> {
        let hour = self.display_hour(t);
        let tens = if hour < 10 && !self.leading_zero {
            BLANK
        } else {
            digit(hour / 10)
        };
        let mut out = vec![
            tens,
            digit(hour % 10),
            ':',
            digit(t.minute() / 10),
            digit(t.minute() % 10),
        ];
        if self.show_seconds {
            out.extend([':', digit(t.second() / 10), digit(t.second() % 10)]);
        }
        out
    }

    /// Walk a whole day second by second and collect what each position can show.
    ///
    /// Seconds glyphs may also fade in and out through the visibility machine,
    /// which morphs them from or to a blank, so those pairs are included too.
    pub fn reachable(&self) -> ReachableGlyphs {
        let roles = self.roles();
        let mut per_position: Vec<BTreeSet<char>> = vec![BTreeSet::new(); roles.len()];
        let mut out = ReachableGlyphs::default();

        let mut now = self.render(ClockInstant::from_second_of_day(0));
        for s in 0..SECONDS_PER_DAY {
            let next = self.render(ClockInstant::from_second_of_day(s + 1));
            for (idx, (&a, &b)) in now.iter().zip(&next).enumerate() {
                per_position[idx].insert(a);
                out.chars.insert(a);
                if a != b {
                    out.transitions.insert((a, b));
                }
            }
            now = next;
        }

        for (role, chars) in roles.iter().zip(&per_position) {
            if !role.is_seconds_part() {
                continue;
            }
            out.chars.insert(BLANK);
            for &c in chars {
                if c != BLANK {
                    out.transitions.insert((BLANK, c));
                    out.transitions.insert((c, BLANK));
                }
            }
        }
        out
    }
}

fn digit(v: u32) -> char {
    char::from_digit(v % 10, 10).unwrap_or('0')
}

#[cfg(test)]
#[path = "../../tests/unit/clock/format.rs"]
mod tests;
