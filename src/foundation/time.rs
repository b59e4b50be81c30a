use std::str::FromStr;

use crate::foundation::error::{ClockError, ClockResult};

pub const MILLIS_PER_SECOND: u64 = 1_000;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const MILLIS_PER_DAY: u64 = SECONDS_PER_DAY * MILLIS_PER_SECOND;

/// A monotonic local wall-clock instant, in milliseconds.
///
/// The clock face only cares about the time of day, so every accessor below
/// works modulo one day. State machines compare raw millisecond values, which
/// keeps them correct across midnight.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClockInstant(pub u64);

impl ClockInstant {
    pub fn from_hms(hour: u32, minute: u32, second: u32, millis: u32) -> ClockResult<Self> {
        if hour > 23 || minute > 59 || second > 59 || millis > 999 {
            return Err(ClockError::validation(format!(
                "time {hour:02}:{minute:02}:{second:02}.{millis:03} is out of range"
            )));
        }
        let secs = u64::from(hour) * 3_600 + u64::from(minute) * 60 + u64::from(second);
        Ok(Self(secs * MILLIS_PER_SECOND + u64::from(millis)))
    }

    pub fn from_second_of_day(second: u64) -> Self {
        Self((second % SECONDS_PER_DAY) * MILLIS_PER_SECOND)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn millis_of_day(self) -> u64 {
        self.0 % MILLIS_PER_DAY
    }

    pub fn hour(self) -> u32 {
        (self.millis_of_day() / 3_600_000) as u32
    }

    pub fn minute(self) -> u32 {
        ((self.millis_of_day() / 60_000) % 60) as u32
    }

    pub fn second(self) -> u32 {
        ((self.millis_of_day() / MILLIS_PER_SECOND) % 60) as u32
    }

    pub fn millis(self) -> u32 {
        (self.0 % MILLIS_PER_SECOND) as u32
    }

    /// Whole seconds since the origin; changes exactly at each second boundary.
    pub fn second_index(self) -> u64 {
        self.0 / MILLIS_PER_SECOND
    }

    /// The instant at which the current second started.
    pub fn floor_second(self) -> Self {
        Self(self.second_index() * MILLIS_PER_SECOND)
    }

    pub fn plus_seconds(self, seconds: u64) -> Self {
        Self(
            self.0
                .saturating_add(seconds.saturating_mul(MILLIS_PER_SECOND)),
        )
    }

    pub fn plus_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Milliseconds elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn millis_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl FromStr for ClockInstant {
    type Err = ClockError;

    /// Parses `HH:MM:SS` or `HH:MM:SS.mmm`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ClockError::validation(format!("invalid time '{s}', expected HH:MM:SS[.mmm]"));

        let (hms, frac) = match s.split_once('.') {
            Some((hms, frac)) => (hms, Some(frac)),
            None => (s, None),
        };
        let mut parts = hms.split(':');
        let mut next_num = || -> ClockResult<u32> {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .ok_or_else(bad)
        };
        let hour = next_num()?;
        let minute = next_num()?;
        let second = next_num()?;
        if parts.next().is_some() {
            return Err(bad());
        }

        let millis = match frac {
            None => 0,
            Some(f) if !f.is_empty() && f.len() <= 3 && f.bytes().all(|b| b.is_ascii_digit()) => {
                let v: u32 = f.parse().map_err(|_| bad())?;
                v * 10u32.pow(3 - f.len() as u32)
            }
            Some(_) => return Err(bad()),
        };

        Self::from_hms(hour, minute, second, millis)
    }
}

impl std::fmt::Display for ClockInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour(),
            self.minute(),
            self.second(),
            self.millis()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
