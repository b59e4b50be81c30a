use super::*;

const SYNC: VisibilityPolicy = VisibilityPolicy::Synchronized;
const DESYNC: VisibilityPolicy = VisibilityPolicy::Desynchronized;

fn t(ms: u64) -> ClockInstant {
    ClockInstant(36_000_000 + ms)
}

#[test]
fn synchronized_request_waits_for_the_boundary() {
    let mut m = VisibilityMachine::new(VisibilityState::Visible, t(0));
    assert!(m.request(VisibilityTarget::Hidden, SYNC, t(400), 600));
    for ms in (400..1_000).step_by(16) {
        assert_eq!(m.tick(t(ms), SYNC, 600), None);
        assert_eq!(m.state(), VisibilityState::Visible);
    }
    m.on_second_boundary(SYNC, t(1_000));
    assert_eq!(m.state(), VisibilityState::Disappearing);
    m.on_second_boundary(SYNC, t(2_000));
    assert_eq!(m.state(), VisibilityState::Hidden);
}

#[test]
fn newer_pending_request_wins() {
    let mut m = VisibilityMachine::new(VisibilityState::Visible, t(0));
    m.request(VisibilityTarget::Hidden, SYNC, t(100), 600);
    m.request(VisibilityTarget::Visible, SYNC, t(200), 600);
    assert_eq!(m.pending(), Some(VisibilityTarget::Visible));
    m.on_second_boundary(SYNC, t(1_000));
    assert_eq!(m.state(), VisibilityState::Visible);
    assert_eq!(m.pending(), None);
}

#[test]
fn desynchronized_runs_on_its_own_timer() {
    let mut m = VisibilityMachine::new(VisibilityState::Hidden, t(0));
    m.request(VisibilityTarget::Visible, DESYNC, t(250), 600);
    assert_eq!(m.state(), VisibilityState::Appearing);
    assert!((m.changed_progress(t(550), 600) - 0.5).abs() < 1e-9);
    assert!((m.presence(m.changed_progress(t(550), 600)) - 0.5).abs() < 1e-9);

    // Boundaries are ignored by this policy.
    m.on_second_boundary(DESYNC, t(1_000));
    assert_eq!(m.state(), VisibilityState::Appearing);

    assert_eq!(m.tick(t(850), DESYNC, 600), None);
    let next = m.tick(t(851), DESYNC, 600);
    assert_eq!(next, Some(VisibilityState::Visible));
}

#[test]
fn lock_snaps_and_blocks_without_finishing_in_flight() {
    let mut m = VisibilityMachine::new(VisibilityState::Visible, t(0));
    m.request(VisibilityTarget::Hidden, DESYNC, t(0), 600);
    assert_eq!(m.state(), VisibilityState::Disappearing);

    m.set_lock(Some(VisibilityTarget::Visible), t(100));
    assert_eq!(m.state(), VisibilityState::Visible);
    assert!(!m.request(VisibilityTarget::Hidden, DESYNC, t(200), 600));
    assert!(!m.request(VisibilityTarget::Hidden, SYNC, t(200), 600));
    assert_eq!(m.pending(), None);
    m.on_second_boundary(SYNC, t(1_000));
    assert_eq!(m.state(), VisibilityState::Visible);

    m.set_lock(None, t(1_100));
    assert!(m.request(VisibilityTarget::Hidden, SYNC, t(1_200), 600));
}

#[test]
fn desynchronized_reversal_is_continuous() {
    let mut m = VisibilityMachine::new(VisibilityState::Hidden, t(0));
    m.request(VisibilityTarget::Visible, DESYNC, t(0), 600);
    let p = m.presence(m.changed_progress(t(150), 600));
    m.request(VisibilityTarget::Hidden, DESYNC, t(150), 600);
    assert_eq!(m.state(), VisibilityState::Disappearing);
    let q = m.presence(m.changed_progress(t(150), 600));
    assert!((p - q).abs() < 1e-9, "{p} vs {q}");
}
