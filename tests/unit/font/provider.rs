use super::*;
use crate::{
    animation::ease::Ease,
    animation::keyframe::KeyframeAnimation,
    clock::format::{BLANK, HourCycle},
    foundation::core::{Point, Size},
    render::scene::SceneRecorder,
    render::surface::StyleIndex,
    shape::command::{Command, Shape},
};
use kurbo::Shape as _;

fn bar(w: f64) -> PathImage {
    PathImage::single(
        Shape::new(
            Size::new(w, 10.0),
            vec![
                Command::MoveTo(Point::new(0.0, 0.0)),
                Command::LineTo(Point::new(w, 10.0)),
                Command::Close,
            ],
        ),
        StyleIndex(0),
    )
}

fn morph(a: f64, b: f64) -> KeyframeAnimation {
    KeyframeAnimation::sequence(vec![bar(a), bar(b)], Ease::Linear).unwrap()
}

#[test]
fn glyph_key_display_and_parse() {
    assert_eq!(GlyphKey::fixed('2').to_string(), "2");
    assert_eq!(GlyphKey::between('2', '3').to_string(), "2_3");
    assert_eq!(GlyphKey::between(' ', '1').to_string(), " _1");

    assert_eq!("7".parse::<GlyphKey>().unwrap(), GlyphKey::fixed('7'));
    assert_eq!("5_6".parse::<GlyphKey>().unwrap(), GlyphKey::between('5', '6'));
    assert!("".parse::<GlyphKey>().is_err());
    assert!("12".parse::<GlyphKey>().is_err());
    assert!("1-2".parse::<GlyphKey>().is_err());
}

#[test]
fn build_rejects_bad_height() {
    assert!(FontBuilder::new("f", 0.0).build().is_err());
    assert!(FontBuilder::new("f", f64::NAN).build().is_err());
}

#[test]
fn build_rejects_transition_width_mismatch() {
    let err = FontBuilder::new("f", 10.0)
        .canonical('a', bar(10.0))
        .canonical('b', bar(20.0))
        .transition('a', 'b', morph(12.0, 20.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ClockError::Font(_)));
    assert!(err.to_string().contains("a_b"), "{err}");
}

#[test]
fn build_rejects_transition_without_start_canonical() {
    let err = FontBuilder::new("f", 10.0)
        .canonical('b', bar(20.0))
        .transition('a', 'b', morph(10.0, 20.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ClockError::Font(_)));
}

#[test]
fn build_rejects_transition_ending_off_canonical_width() {
    let err = FontBuilder::new("f", 10.0)
        .canonical('a', bar(10.0))
        .canonical('b', bar(20.0))
        .transition('a', 'b', morph(10.0, 35.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ClockError::Font(_)));
    assert!(err.to_string().contains("ends 35 wide"), "{err}");
}

#[test]
fn build_rejects_transition_without_end_canonical() {
    let err = FontBuilder::new("f", 10.0)
        .canonical('a', bar(10.0))
        .transition('a', 'b', morph(10.0, 20.0))
        .build()
        .unwrap_err();
    assert!(matches!(err, ClockError::Font(_)));
    assert!(err.to_string().contains("ends on"), "{err}");
}

#[test]
fn build_rejects_missing_reachable_glyphs() {
    let format = TimeFormat {
        hour_cycle: HourCycle::H24,
        leading_zero: true,
        show_seconds: false,
    };
    let mut builder = FontBuilder::new("digits", 10.0);
    for c in ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'] {
        builder = builder.canonical(c, bar(10.0));
    }
    // No ':' yet.
    let err = builder.validate_for(format).build().unwrap_err();
    assert!(err.to_string().contains("canonical"), "{err}");

    let mut builder = FontBuilder::new("digits", 10.0).canonical(':', bar(4.0));
    for c in ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'] {
        builder = builder.canonical(c, bar(10.0));
    }
    let err = builder.validate_for(format).build().unwrap_err();
    assert!(err.to_string().contains("no transition"), "{err}");
}

#[test]
fn width_at_uses_transition_then_falls_back_to_canonicals() {
    let font = FontBuilder::new("f", 10.0)
        .canonical('a', bar(10.0))
        .canonical('b', bar(20.0))
        .canonical(BLANK, bar(0.0))
        .transition('a', 'b', morph(10.0, 20.0))
        .build()
        .unwrap();

    assert_eq!(font.width_at(GlyphKey::fixed('b'), 0.7), 20.0);
    assert_eq!(font.width_at(GlyphKey::between('a', 'b'), 1.0), 20.0);
    // No transition b -> a: lerp the canonical widths.
    assert_eq!(font.width_at(GlyphKey::between('b', 'a'), 0.5), 15.0);
    assert_eq!(font.width_at(GlyphKey::fixed('z'), 0.0), 0.0);
    assert_eq!(font.max_canonical_width(&|c| c != 'b'), 10.0);
    assert_eq!(font.transition_count(), 1);
    assert_eq!(font.characters(), vec![BLANK, 'a', 'b']);
}

#[test]
fn plot_falls_back_to_start_glyph() {
    let font = FontBuilder::new("f", 10.0)
        .canonical('a', bar(10.0))
        .canonical('b', bar(30.0))
        .build()
        .unwrap();
    let mut rec = SceneRecorder::new();
    font.plot(GlyphKey::between('a', 'b'), 0.5, &mut rec, &Paint::default());
    assert_eq!(rec.ops().len(), 1);
    assert_eq!(rec.ops()[0].path.bounding_box().width(), 10.0);
}
