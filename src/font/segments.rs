//! Procedural seven-segment reference font.
//!
//! Every digit (and the blank) is drawn as the same seven quads, so any two of
//! them interpolate command-for-command: unlit segments collapse to their
//! center point. Each digit morph runs as two parts: the segments pass through
//! the union of both digits, while the accent bar under the glyph lags behind
//! and then slides to its new width.

use std::sync::{Arc, OnceLock};

use crate::{
    animation::ease::Ease,
    animation::keyframe::{Animation, Keyframe, KeyframeAnimation, KeyframeTransition},
    clock::format::{BLANK, HourCycle, TimeFormat},
    font::provider::{FontBuilder, GlyphFont},
    foundation::core::{Point, Rect, Size},
    foundation::error::ClockResult,
    render::surface::StyleIndex,
    shape::command::{Command, Shape},
    shape::image::{Layer, PathImage},
};

pub const STYLE_BODY: StyleIndex = StyleIndex(0);
pub const STYLE_ACCENT: StyleIndex = StyleIndex(1);

pub const CELL_HEIGHT: f64 = 110.0;
pub const DIGIT_WIDTH: f64 = 60.0;
pub const NARROW_DIGIT_WIDTH: f64 = 30.0;
pub const COLON_WIDTH: f64 = 24.0;

const SEGMENT_THICKNESS: f64 = 10.0;
const DIGIT_HEIGHT: f64 = 100.0;
const ACCENT_TOP: f64 = 103.0;
const ACCENT_BOTTOM: f64 = 107.0;
const DOT_RADIUS: f64 = 6.0;
const ACCENT_DELAY: f64 = 0.4;

// Segment order: a (top), b (upper right), c (lower right), d (bottom),
// e (lower left), f (upper left), g (middle).
const SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true; 7],
    [true, true, true, true, false, true, true],
];

const CHARS: [char; 11] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', BLANK];

/// Every format combination the reference font is checked against.
pub fn supported_formats() -> Vec<TimeFormat> {
    let mut out = Vec::new();
    for hour_cycle in [HourCycle::H12, HourCycle::H24] {
        for leading_zero in [false, true] {
            for show_seconds in [false, true] {
                out.push(TimeFormat {
                    hour_cycle,
                    leading_zero,
                    show_seconds,
                });
            }
        }
    }
    out
}

/// The shared, validated reference font.
pub fn segment_font() -> ClockResult<Arc<GlyphFont>> {
    static FONT: OnceLock<Arc<GlyphFont>> = OnceLock::new();
    if let Some(font) = FONT.get() {
        return Ok(Arc::clone(font));
    }
    let font = Arc::new(build_segment_font(&supported_formats())?);
    Ok(Arc::clone(FONT.get_or_init(|| font)))
}

pub fn build_segment_font(formats: &[TimeFormat]) -> ClockResult<GlyphFont> {
    let mut builder = FontBuilder::new("segments", CELL_HEIGHT);

    for ch in CHARS {
        builder = builder.canonical(ch, digit_image(ch));
    }
    builder = builder.canonical(':', colon_image(DOT_RADIUS, COLON_WIDTH));

    for from in CHARS {
        for to in CHARS {
            if from != to {
                builder = builder.transition(from, to, digit_morph(from, to)?);
            }
        }
    }

    let hidden_colon = colon_image(0.0, 0.0);
    let shown_colon = colon_image(DOT_RADIUS, COLON_WIDTH);
    builder = builder
        .transition(
            BLANK,
            ':',
            KeyframeAnimation::sequence(vec![hidden_colon.clone(), shown_colon.clone()], Ease::OutCubic)?,
        )
        .transition(
            ':',
            BLANK,
            KeyframeAnimation::sequence(vec![shown_colon, hidden_colon], Ease::InCubic)?,
        );

    for format in formats {
        builder = builder.validate_for(*format);
    }
    builder.build()
}

fn lit_segments(ch: char) -> [bool; 7] {
    ch.to_digit(10)
        .map_or([false; 7], |d| SEGMENTS[d as usize])
}

fn glyph_width(ch: char) -> f64 {
    match ch {
        BLANK => 0.0,
        '1' => NARROW_DIGIT_WIDTH,
        _ => DIGIT_WIDTH,
    }
}

fn segment_rect(idx: usize, w: f64) -> Rect {
    let t = SEGMENT_THICKNESS;
    let mid = DIGIT_HEIGHT * 0.5;
    let right = (w - t).max(0.0);
    match idx {
        0 => Rect::new(0.0, 0.0, w, t),
        1 => Rect::new(right, 0.0, w, mid),
        2 => Rect::new(right, mid, w, DIGIT_HEIGHT),
        3 => Rect::new(0.0, DIGIT_HEIGHT - t, w, DIGIT_HEIGHT),
        4 => Rect::new(0.0, mid, t.min(w), DIGIT_HEIGHT),
        5 => Rect::new(0.0, 0.0, t.min(w), mid),
        _ => Rect::new(0.0, mid - t * 0.5, w, mid + t * 0.5),
    }
}

fn segments_shape(lit: [bool; 7], w: f64) -> Shape {
    let mut commands = Vec::with_capacity(7 * 5);
    for (idx, on) in lit.into_iter().enumerate() {
        let r = segment_rect(idx, w);
        let corners = if on {
            [
                Point::new(r.x0, r.y0),
                Point::new(r.x1, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
            ]
        } else {
            [r.center(); 4]
        };
        commands.push(Command::MoveTo(corners[0]));
        for p in &corners[1..] {
            commands.push(Command::LineTo(*p));
        }
        commands.push(Command::Close);
    }
    Shape::new(Size::new(w, CELL_HEIGHT), commands)
}

fn accent_shape(w: f64) -> Shape {
    Shape::new(
        Size::new(w, CELL_HEIGHT),
        vec![Command::Rect(Rect::new(0.0, ACCENT_TOP, w, ACCENT_BOTTOM))],
    )
}

fn segments_image(lit: [bool; 7], w: f64) -> PathImage {
    PathImage::single(segments_shape(lit, w), STYLE_BODY)
}

fn accent_image(w: f64) -> PathImage {
    PathImage::single(accent_shape(w), STYLE_ACCENT)
}

fn digit_image(ch: char) -> PathImage {
    let w = glyph_width(ch);
    PathImage::new(vec![
        Layer {
            shape: segments_shape(lit_segments(ch), w),
            style: STYLE_BODY,
        },
        Layer {
            shape: accent_shape(w),
            style: STYLE_ACCENT,
        },
    ])
}

fn colon_image(radius: f64, w: f64) -> PathImage {
    let x = w * 0.5;
    PathImage::single(
        Shape::new(
            Size::new(w, CELL_HEIGHT),
            vec![
                Command::Circle {
                    center: Point::new(x, 30.0),
                    radius,
                },
                Command::Circle {
                    center: Point::new(x, 70.0),
                    radius,
                },
            ],
        ),
        STYLE_BODY,
    )
}

fn digit_morph(from: char, to: char) -> ClockResult<Animation> {
    let (la, lb) = (lit_segments(from), lit_segments(to));
    let (wa, wb) = (glyph_width(from), glyph_width(to));
    let mut union = [false; 7];
    for (u, (a, b)) in union.iter_mut().zip(la.into_iter().zip(lb)) {
        *u = a || b;
    }

    let body = KeyframeAnimation::sequence(
        vec![
            segments_image(la, wa),
            segments_image(union, wa.max(wb)),
            segments_image(lb, wb),
        ],
        Ease::InOutCubic,
    )?;

    let accent = KeyframeAnimation::new(
        accent_image(wa),
        vec![KeyframeTransition::new(
            Keyframe::new(ACCENT_DELAY, accent_image(wa)),
            Keyframe::new(1.0, accent_image(wb)),
        )?],
        Ease::OutQuad,
        true,
    )?;

    Ok(Animation::Multipart(vec![body, accent]))
}

#[cfg(test)]
#[path = "../../tests/unit/font/segments.rs"]
mod tests;
