use super::*;
use crate::{
    foundation::core::{Rect, Size},
    render::scene::SceneRecorder,
    render::surface::StyleIndex,
    shape::command::{Command, Shape},
};

fn bar(width: f64) -> PathImage {
    PathImage::single(
        Shape::new(
            Size::new(width, 10.0),
            vec![Command::Rect(Rect::new(0.0, 0.0, width, 10.0))],
        ),
        StyleIndex(0),
    )
}

fn three_step() -> KeyframeAnimation {
    KeyframeAnimation::sequence(vec![bar(10.0), bar(40.0), bar(20.0)], Ease::InOutCubic).unwrap()
}

#[test]
fn zero_progress_is_canonical() {
    let anim = three_step();
    assert_eq!(anim.image_at(0.0).unwrap(), bar(10.0));
    assert_eq!(anim.width_at(0.0), 10.0);
    assert_eq!(anim.width_at(-1.0), 10.0);
}

#[test]
fn contiguous_transitions_are_continuous_at_boundaries() {
    let anim = three_step();
    let trs = anim.transitions();
    assert_eq!(trs.len(), 2);
    for pair in trs.windows(2) {
        let boundary = pair[0].end().progress;
        let before = anim.image_at(boundary - 1e-9).unwrap();
        let at = anim.image_at(boundary).unwrap();
        assert!(
            (before.width() - at.width()).abs() < 1e-6,
            "jump at {boundary}: {} vs {}",
            before.width(),
            at.width()
        );
        assert_eq!(at, pair[1].start().image);
    }
    assert_eq!(anim.image_at(1.0).unwrap(), bar(20.0));
}

#[test]
fn easing_is_applied_per_transition() {
    let anim = three_step();
    // A quarter of the way through the first half is local progress 0.5.
    assert!((anim.width_at(0.25) - 25.0).abs() < 1e-9);
    let eased = Ease::InOutCubic.apply(0.2);
    assert!((anim.width_at(0.1) - (10.0 + 30.0 * eased)).abs() < 1e-9);
}

#[test]
fn gaps_hold_the_last_settled_keyframe() {
    let tr = KeyframeTransition::new(Keyframe::new(0.0, bar(10.0)), Keyframe::new(0.4, bar(30.0)))
        .unwrap();
    let late = KeyframeTransition::new(Keyframe::new(0.6, bar(30.0)), Keyframe::new(1.0, bar(50.0)))
        .unwrap();
    let anim = KeyframeAnimation::new(bar(10.0), vec![late, tr], Ease::Linear, true).unwrap();
    assert_eq!(anim.transitions()[0].start().progress, 0.0, "sorted on construction");
    assert_eq!(anim.width_at(0.5), 30.0);
    assert!((anim.width_at(0.8) - 40.0).abs() < 1e-9);
    assert_eq!(anim.width_at(1.0), 50.0);
}

#[test]
fn linear_rejects_overlaps_but_layered_draws_all() {
    let a = KeyframeTransition::new(Keyframe::new(0.0, bar(10.0)), Keyframe::new(0.8, bar(20.0)))
        .unwrap();
    let b = KeyframeTransition::new(Keyframe::new(0.5, bar(5.0)), Keyframe::new(1.0, bar(60.0)))
        .unwrap();
    assert!(
        KeyframeAnimation::new(bar(10.0), vec![a.clone(), b.clone()], Ease::Linear, true).is_err()
    );

    let layered = KeyframeAnimation::new(bar(10.0), vec![a, b], Ease::Linear, false).unwrap();
    let mut rec = SceneRecorder::new();
    layered.plot(0.6, &mut rec, &Paint::default());
    assert_eq!(rec.ops().len(), 2);
    assert_eq!(layered.image_at(0.6).unwrap().layers().len(), 2);
    assert!((layered.width_at(0.6) - 17.5).abs() < 1e-9);
}

#[test]
fn transition_validation() {
    assert!(KeyframeTransition::new(Keyframe::new(0.5, bar(1.0)), Keyframe::new(0.5, bar(1.0))).is_err());
    assert!(KeyframeTransition::new(Keyframe::new(0.0, bar(1.0)), Keyframe::new(1.5, bar(1.0))).is_err());
    let incompatible = PathImage::single(Shape::empty(Size::new(1.0, 1.0)), StyleIndex(0));
    assert!(
        KeyframeTransition::new(Keyframe::new(0.0, bar(1.0)), Keyframe::new(1.0, incompatible))
            .is_err()
    );
    assert!(KeyframeAnimation::sequence(vec![], Ease::Linear).is_err());
}

#[test]
fn multipart_forwards_every_part() {
    let segments = three_step();
    let accent = KeyframeAnimation::sequence(vec![bar(2.0), bar(80.0)], Ease::Linear).unwrap();
    let anim = Animation::Multipart(vec![segments, accent]);
    let mut rec = SceneRecorder::new();
    anim.plot(0.5, &mut rec, &Paint::default());
    assert_eq!(rec.ops().len(), 2);
    assert!((anim.width_at(0.5) - 41.0).abs() < 1e-9);
    assert_eq!(anim.image_at(0.0).unwrap().layers().len(), 2);
    assert_eq!(Animation::from(three_step()).parts().len(), 1);
}
