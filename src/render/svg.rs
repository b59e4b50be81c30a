use std::fmt;

use crate::{
    foundation::core::Size,
    render::measure::PathMeasure,
    render::palette::{Palette, StyleKind},
    render::scene::DrawOp,
};

/// Serialize recorded draw ops as a standalone SVG document.
pub fn to_svg(ops: &[DrawOp], palette: &Palette, size: Size) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_svg(&mut out, ops, palette, size)?;
    Ok(out)
}

/// Stream the SVG document for `ops` into `out`.
pub fn write_svg(
    out: &mut impl fmt::Write,
    ops: &[DrawOp],
    palette: &Palette,
    size: Size,
) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(size.width),
        h = fmt_num(size.height),
    )?;
    if let Some(bg) = palette.background {
        writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}" fill-opacity="{}"/>"#,
            bg.to_hex(),
            fmt_num(bg.alpha_f64())
        )?;
    }

    for op in ops {
        let Some(style) = palette.style(op.style) else {
            continue;
        };
        let opacity = op.paint.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            continue;
        }
        let color = palette.resolve(style, &op.paint);
        let alpha = fmt_num(color.alpha_f64() * opacity);
        match style.kind {
            StyleKind::Fill => {
                writeln!(
                    out,
                    r#"  <path d="{}" fill="{}" fill-opacity="{alpha}"/>"#,
                    op.path.to_svg(),
                    color.to_hex()
                )?;
            }
            StyleKind::Stroke { width } => {
                writeln!(
                    out,
                    r#"  <path d="{}" fill="none" stroke="{}" stroke-opacity="{alpha}" stroke-width="{}"/>"#,
                    op.path.to_svg(),
                    color.to_hex(),
                    fmt_num(width)
                )?;
            }
            StyleKind::Trace { width } => {
                let measure = PathMeasure::new(&op.path);
                let traced = measure.segment(0.0, op.paint.emphasis.clamp(0.0, 1.0) * measure.length());
                if traced.elements().is_empty() {
                    continue;
                }
                writeln!(
                    out,
                    r#"  <path d="{}" fill="none" stroke="{}" stroke-opacity="{alpha}" stroke-width="{}" stroke-linecap="round"/>"#,
                    traced.to_svg(),
                    color.to_hex(),
                    fmt_num(width)
                )?;
            }
        }
    }
    out.write_str("</svg>\n")
}

fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
