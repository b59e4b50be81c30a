use crate::{foundation::time::ClockInstant, layout::options::StateTimings};

/// Emphasis lifecycle of one glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActivityState {
    Active,
    Activating,
    Deactivating,
    #[default]
    Inactive,
}

impl ActivityState {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Activating | Self::Deactivating)
    }
}

/// A steady state to request, or to pin a glyph to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActivityTarget {
    Active,
    Inactive,
}

/// Timestamp-driven activity machine.
///
/// [`ActivityMachine::request`] and [`ActivityMachine::tick`] only compute the
/// next state; [`ActivityMachine::apply`] commits it. A lock suppresses
/// requests and decay, but never stops an in-flight transition from finishing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityMachine {
    state: ActivityState,
    changed_at: ClockInstant,
}

impl ActivityMachine {
    pub fn new(state: ActivityState, now: ClockInstant) -> Self {
        Self {
            state,
            changed_at: now,
        }
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    pub fn changed_at(&self) -> ClockInstant {
        self.changed_at
    }

    pub fn request(&self, target: ActivityTarget, lock: Option<ActivityTarget>) -> Option<ActivityState> {
        if lock.is_some() {
            return None;
        }
        match (target, self.state) {
            (ActivityTarget::Active, ActivityState::Inactive | ActivityState::Deactivating) => {
                Some(ActivityState::Activating)
            }
            (ActivityTarget::Inactive, ActivityState::Active | ActivityState::Activating) => {
                Some(ActivityState::Deactivating)
            }
            _ => None,
        }
    }

    pub fn tick(
        &self,
        now: ClockInstant,
        timings: &StateTimings,
        lock: Option<ActivityTarget>,
    ) -> Option<ActivityState> {
        let elapsed = now.millis_since(self.changed_at);
        match self.state {
            ActivityState::Activating if elapsed > timings.change_millis => Some(ActivityState::Active),
            ActivityState::Deactivating if elapsed > timings.change_millis => {
                Some(ActivityState::Inactive)
            }
            ActivityState::Active => match lock {
                Some(ActivityTarget::Active) => None,
                Some(ActivityTarget::Inactive) => Some(ActivityState::Deactivating),
                None if elapsed > timings.active_millis => Some(ActivityState::Deactivating),
                None => None,
            },
            ActivityState::Inactive if lock == Some(ActivityTarget::Active) => {
                Some(ActivityState::Activating)
            }
            _ => None,
        }
    }

    /// Commit `next`. Reversing mid-transition back-dates the change so
    /// emphasis stays continuous.
    pub fn apply(&mut self, next: ActivityState, now: ClockInstant, timings: &StateTimings) {
        let reversing = matches!(
            (self.state, next),
            (ActivityState::Activating, ActivityState::Deactivating)
                | (ActivityState::Deactivating, ActivityState::Activating)
        );
        let changed_at = if reversing {
            let done = now.millis_since(self.changed_at).min(timings.change_millis);
            ClockInstant(now.0.saturating_sub(timings.change_millis - done))
        } else {
            now
        };
        tracing::debug!(from = ?self.state, to = ?next, at = %now, "activity");
        self.state = next;
        self.changed_at = changed_at;
    }

    /// Emphasis in `[0, 1]`: `1` when Active, ramping linearly in between.
    pub fn emphasis(&self, now: ClockInstant, timings: &StateTimings) -> f64 {
        let ramp = (now.millis_since(self.changed_at) as f64 / timings.change_millis.max(1) as f64)
            .clamp(0.0, 1.0);
        match self.state {
            ActivityState::Active => 1.0,
            ActivityState::Inactive => 0.0,
            ActivityState::Activating => ramp,
            ActivityState::Deactivating => 1.0 - ramp,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/activity.rs"]
mod tests;
