use super::*;
use crate::font::segments::{DIGIT_WIDTH, segment_font};

fn t(ms: u64) -> ClockInstant {
    ClockInstant(36_000_000 + ms)
}

#[test]
fn synchronized_appearance_morphs_from_blank() {
    let timings = StateTimings::default();
    let mut g = Glyph::new(GlyphRole::Second, '5', 6, t(0));
    g.set_visibility_lock(Some(VisibilityTarget::Hidden), t(0));
    assert!(g.is_skipped());
    g.set_visibility_lock(None, t(0));

    g.request_visibility(VisibilityTarget::Visible, VisibilityPolicy::Synchronized, t(10), &timings);
    assert_eq!(g.visibility(), VisibilityState::Hidden);
    g.on_second_boundary(VisibilityPolicy::Synchronized, t(1_000));
    assert_eq!(g.visibility(), VisibilityState::Appearing);
    assert!(!g.is_skipped());

    g.set_key(GlyphKey::between('5', '6'));
    assert_eq!(
        g.effective_key(VisibilityPolicy::Synchronized),
        GlyphKey::between(BLANK, '6')
    );
    assert_eq!(g.effective_key(VisibilityPolicy::Desynchronized), GlyphKey::between('5', '6'));

    let font = segment_font().unwrap();
    let policy = VisibilityPolicy::Synchronized;
    assert_eq!(g.native_width(font.as_ref(), t(1_100), 0.0, policy, &timings), 0.0);
    assert_eq!(g.native_width(font.as_ref(), t(1_999), 1.0, policy, &timings), DIGIT_WIDTH);
}

#[test]
fn desynchronized_presence_scales_width_and_opacity() {
    let timings = StateTimings::default();
    let policy = VisibilityPolicy::Desynchronized;
    let font = segment_font().unwrap();
    let mut g = Glyph::new(GlyphRole::Minute, '8', 0, t(0));
    g.request_visibility(VisibilityTarget::Hidden, policy, t(0), &timings);
    assert_eq!(g.visibility(), VisibilityState::Disappearing);

    let w = g.native_width(font.as_ref(), t(300), 0.0, policy, &timings);
    assert!((w - DIGIT_WIDTH * 0.5).abs() < 1e-9);
    assert!((g.paint(t(300), 0.0, policy, &timings).opacity - 0.5).abs() < 1e-9);

    g.tick(t(601), &timings, policy);
    assert_eq!(g.visibility(), VisibilityState::Hidden);
    assert!(g.is_skipped());
}

#[test]
fn tick_advances_both_machines_together() {
    let timings = StateTimings::default();
    let policy = VisibilityPolicy::Desynchronized;
    let mut g = Glyph::new(GlyphRole::Hour, '1', 2, t(0));
    g.request_activity(ActivityTarget::Active, t(0), &timings);
    g.request_visibility(VisibilityTarget::Hidden, policy, t(0), &timings);
    g.tick(t(700), &timings, policy);
    assert_eq!(g.activity(), ActivityState::Active);
    assert_eq!(g.visibility(), VisibilityState::Hidden);

    let paint = g.paint(t(700), 0.0, policy, &timings);
    assert_eq!(paint.emphasis, 1.0);
    assert_eq!(paint.color_offset, 2);
}

#[test]
fn zero_scale_is_skipped() {
    let mut g = Glyph::new(GlyphRole::Minute, '0', 0, t(0));
    assert!(!g.is_skipped());
    g.set_scale(0.0);
    assert!(g.is_skipped());
    g.set_scale(-2.0);
    assert_eq!(g.scale(), 0.0);
}
