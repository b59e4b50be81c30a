use super::*;
use crate::{
    foundation::core::{Rect, Rgba8},
    render::palette::StyleSpec,
    render::scene::SceneRecorder,
    render::surface::{Paint, StyleIndex, Surface},
};

fn palette(kind: StyleKind) -> Palette {
    Palette {
        styles: vec![StyleSpec {
            kind,
            color: Rgba8::opaque(0, 0, 0),
            accent: Rgba8::opaque(255, 255, 255),
        }],
        background: None,
        cycle: Vec::new(),
    }
}

fn square(paint: Paint) -> Vec<DrawOp> {
    let mut rec = SceneRecorder::new();
    rec.rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    rec.draw_path(StyleIndex(0), &paint);
    rec.into_ops()
}

#[test]
fn fill_paths_carry_color_and_opacity() {
    let ops = square(Paint {
        emphasis: 1.0,
        opacity: 0.5,
        color_offset: 0,
    });
    let svg = to_svg(&ops, &palette(StyleKind::Fill), Size::new(20.0, 10.0)).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="20""#));
    assert!(svg.contains(r##"fill="#ffffff""##), "{svg}");
    assert!(svg.contains(r#"fill-opacity="0.5""#), "{svg}");
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn hidden_ops_are_dropped() {
    let ops = square(Paint {
        opacity: 0.0,
        ..Paint::default()
    });
    let svg = to_svg(&ops, &palette(StyleKind::Fill), Size::new(10.0, 10.0)).unwrap();
    assert!(!svg.contains("<path"));
}

#[test]
fn trace_draws_a_prefix_of_the_outline() {
    let half = square(Paint {
        emphasis: 0.5,
        ..Paint::default()
    });
    let svg = to_svg(&half, &palette(StyleKind::Trace { width: 2.0 }), Size::new(10.0, 10.0)).unwrap();
    assert!(svg.contains(r#"stroke-width="2""#), "{svg}");
    // Half of a 40-long square outline ends at the opposite corner.
    assert!(svg.contains("L10,10") || svg.contains("L10 10"), "{svg}");

    let none = square(Paint::default());
    let svg = to_svg(&none, &palette(StyleKind::Trace { width: 2.0 }), Size::new(10.0, 10.0)).unwrap();
    assert!(!svg.contains("<path"));
}

#[test]
fn numbers_are_trimmed() {
    assert_eq!(fmt_num(2.0), "2");
    assert_eq!(fmt_num(0.25), "0.25");
    assert_eq!(fmt_num(-0.0001), "0");
    assert_eq!(fmt_num(1.23456), "1.235");
    assert_eq!(fmt_num(10.0), "10");
}

/// Accepts `room` bytes, then refuses every write.
struct Cramped {
    room: usize,
    written: String,
}

impl fmt::Write for Cramped {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.written.len() + s.len() > self.room {
            return Err(fmt::Error);
        }
        self.written.push_str(s);
        Ok(())
    }
}

#[test]
fn write_errors_reach_the_caller() {
    let ops = square(Paint::default());
    let pal = palette(StyleKind::Fill);
    let full = to_svg(&ops, &pal, Size::new(10.0, 10.0)).unwrap();

    let mut out = Cramped {
        room: full.len() - 1,
        written: String::new(),
    };
    assert!(write_svg(&mut out, &ops, &pal, Size::new(10.0, 10.0)).is_err());

    let mut out = Cramped {
        room: full.len(),
        written: String::new(),
    };
    write_svg(&mut out, &ops, &pal, Size::new(10.0, 10.0)).unwrap();
    assert_eq!(out.written, full);
}
