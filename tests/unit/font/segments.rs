use super::*;
use crate::font::provider::{GlyphKey, GlyphShapeProvider};
use crate::render::scene::SceneRecorder;
use crate::render::surface::Paint;
use kurbo::Shape as _;

#[test]
fn every_digit_interpolates_with_every_other() {
    for a in CHARS {
        for b in CHARS {
            assert!(
                digit_image(a).is_compatible(&digit_image(b)),
                "{a:?} vs {b:?}"
            );
        }
    }
}

#[test]
fn reference_font_covers_all_formats() {
    let font = segment_font().unwrap();
    assert_eq!(font.native_height(), CELL_HEIGHT);
    assert_eq!(font.transition_count(), 11 * 10 + 2);
    assert_eq!(font.width_at(GlyphKey::fixed('1'), 0.0), NARROW_DIGIT_WIDTH);
    assert_eq!(font.width_at(GlyphKey::fixed(BLANK), 0.0), 0.0);
    assert_eq!(font.width_at(GlyphKey::fixed(':'), 0.0), COLON_WIDTH);
}

#[test]
fn digit_morph_endpoints_match_canonicals() {
    let font = segment_font().unwrap();
    for (a, b) in [('1', '2'), ('9', '0'), (BLANK, '7'), ('5', BLANK)] {
        let key = GlyphKey::between(a, b);
        assert_eq!(font.width_at(key, 0.0), glyph_width(a));
        assert_eq!(font.width_at(key, 1.0), glyph_width(b));
        let anim = font.transition(a, b).unwrap();
        assert_eq!(anim.image_at(1.0).unwrap(), digit_image(b), "{key}");
    }
}

#[test]
fn accent_lags_behind_segments() {
    let anim = digit_morph('1', '2').unwrap();
    let img = anim.image_at(0.3).unwrap();
    let accent = &img.layers()[1];
    assert_eq!(accent.style, STYLE_ACCENT);
    assert_eq!(accent.shape.width(), NARROW_DIGIT_WIDTH);
}

#[test]
fn each_segment_is_its_own_draw_call() {
    let font = segment_font().unwrap();
    let mut rec = SceneRecorder::new();
    font.plot(GlyphKey::fixed('1'), 0.0, &mut rec, &Paint::default());
    let ops = rec.ops();
    assert_eq!(ops.len(), 8);
    for op in &ops[..7] {
        assert_eq!(op.style, STYLE_BODY);
        // '1' is narrow; even collapsed segments stay inside its cell.
        assert!(op.path.bounding_box().x1 <= NARROW_DIGIT_WIDTH + 1e-9);
    }
    assert_eq!(ops[7].style, STYLE_ACCENT);
    assert_eq!(rec.depth(), 0);
}
