use crate::foundation::time::ClockInstant;

/// Presence lifecycle of one glyph, independent of its activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VisibilityState {
    #[default]
    Visible,
    Appearing,
    Disappearing,
    Hidden,
}

impl VisibilityState {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Appearing | Self::Disappearing)
    }

    fn settled(self) -> Self {
        match self {
            Self::Appearing => Self::Visible,
            Self::Disappearing => Self::Hidden,
            steady => steady,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VisibilityTarget {
    Visible,
    Hidden,
}

impl VisibilityTarget {
    fn steady(self) -> VisibilityState {
        match self {
            Self::Visible => VisibilityState::Visible,
            Self::Hidden => VisibilityState::Hidden,
        }
    }
}

/// How visibility changes are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VisibilityPolicy {
    /// Requests queue up and commit at the next second boundary, so the
    /// change plays as that second's morph from or to a blank.
    #[default]
    Synchronized,
    /// Requests start at once and run on their own timer on top of the morph.
    Desynchronized,
}

/// Visibility machine shared by both policies.
///
/// A lock pins the glyph to a steady state immediately. Unlike the activity
/// lock it does not let an in-flight change finish, and it drops pending
/// requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibilityMachine {
    state: VisibilityState,
    changed_at: ClockInstant,
    pending: Option<VisibilityTarget>,
    lock: Option<VisibilityTarget>,
}

impl VisibilityMachine {
    pub fn new(state: VisibilityState, now: ClockInstant) -> Self {
        Self {
            state,
            changed_at: now,
            pending: None,
            lock: None,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn pending(&self) -> Option<VisibilityTarget> {
        self.pending
    }

    pub fn lock(&self) -> Option<VisibilityTarget> {
        self.lock
    }

    fn next_for(&self, target: VisibilityTarget) -> Option<VisibilityState> {
        match (target, self.state) {
            (VisibilityTarget::Visible, VisibilityState::Hidden | VisibilityState::Disappearing) => {
                Some(VisibilityState::Appearing)
            }
            (VisibilityTarget::Hidden, VisibilityState::Visible | VisibilityState::Appearing) => {
                Some(VisibilityState::Disappearing)
            }
            _ => None,
        }
    }

    /// Ask for `target`. Returns `false` when a lock swallowed the request.
    pub fn request(
        &mut self,
        target: VisibilityTarget,
        policy: VisibilityPolicy,
        now: ClockInstant,
        duration_millis: u64,
    ) -> bool {
        if self.lock.is_some() {
            return false;
        }
        match policy {
            VisibilityPolicy::Synchronized => self.pending = Some(target),
            VisibilityPolicy::Desynchronized => {
                if let Some(next) = self.next_for(target) {
                    self.apply(next, now, duration_millis);
                }
            }
        }
        true
    }

    /// Second-boundary callback: settle the change that just played, then
    /// start the queued one. Only the synchronized policy reacts.
    pub fn on_second_boundary(&mut self, policy: VisibilityPolicy, now: ClockInstant) {
        if policy != VisibilityPolicy::Synchronized || self.lock.is_some() {
            return;
        }
        let settled = self.state.settled();
        if settled != self.state {
            self.apply(settled, now, 0);
        }
        if let Some(target) = self.pending.take()
            && let Some(next) = self.next_for(target)
        {
            self.apply(next, now, 0);
        }
    }

    /// Timer-driven completion for the desynchronized policy. Pure.
    pub fn tick(
        &self,
        now: ClockInstant,
        policy: VisibilityPolicy,
        duration_millis: u64,
    ) -> Option<VisibilityState> {
        if policy != VisibilityPolicy::Desynchronized || self.lock.is_some() {
            return None;
        }
        let settled = self.state.settled();
        (settled != self.state && now.millis_since(self.changed_at) > duration_millis).then_some(settled)
    }

    /// Commit `next`. With a non-zero duration a mid-change reversal is
    /// back-dated so presence stays continuous.
    pub fn apply(&mut self, next: VisibilityState, now: ClockInstant, duration_millis: u64) {
        let reversing = matches!(
            (self.state, next),
            (VisibilityState::Appearing, VisibilityState::Disappearing)
                | (VisibilityState::Disappearing, VisibilityState::Appearing)
        );
        let changed_at = if reversing && duration_millis > 0 {
            let done = now.millis_since(self.changed_at).min(duration_millis);
            ClockInstant(now.0.saturating_sub(duration_millis - done))
        } else {
            now
        };
        tracing::debug!(from = ?self.state, to = ?next, at = %now, "visibility");
        self.state = next;
        self.changed_at = changed_at;
    }

    /// Pin to a steady state (or release with `None`).
    pub fn set_lock(&mut self, lock: Option<VisibilityTarget>, now: ClockInstant) {
        self.lock = lock;
        if let Some(target) = lock {
            self.pending = None;
            let steady = target.steady();
            if self.state != steady {
                self.apply(steady, now, 0);
            }
        }
    }

    /// Progress of the running change on a free-running timer.
    pub fn changed_progress(&self, now: ClockInstant, duration_millis: u64) -> f64 {
        if !self.state.is_transitioning() {
            return 1.0;
        }
        (now.millis_since(self.changed_at) as f64 / duration_millis.max(1) as f64).clamp(0.0, 1.0)
    }

    /// Presence in `[0, 1]` for a change that is `progress` of the way done.
    pub fn presence(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self.state {
            VisibilityState::Visible => 1.0,
            VisibilityState::Hidden => 0.0,
            VisibilityState::Appearing => p,
            VisibilityState::Disappearing => 1.0 - p,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/visibility.rs"]
mod tests;
