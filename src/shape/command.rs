use crate::{
    foundation::core::{Lerp, Point, Rect, Size, Transform2D, Vec2, lerp},
    foundation::error::{ClockError, ClockResult},
    render::surface::Surface,
};

/// One drawing instruction of a [`Shape`].
///
/// Every numeric parameter interpolates independently, so two shapes blend
/// only when their command lists line up kind-for-kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Arc {
        center: Point,
        radii: Vec2,
        start_deg: f64,
        sweep_deg: f64,
    },
    Rect(Rect),
    Circle {
        center: Point,
        radius: f64,
    },
    /// Applies to every following command of the same shape.
    Transform(Transform2D),
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    CubicTo,
    Arc,
    Rect,
    Circle,
    Transform,
    Close,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::MoveTo(_) => CommandKind::MoveTo,
            Self::LineTo(_) => CommandKind::LineTo,
            Self::CubicTo(..) => CommandKind::CubicTo,
            Self::Arc { .. } => CommandKind::Arc,
            Self::Rect(_) => CommandKind::Rect,
            Self::Circle { .. } => CommandKind::Circle,
            Self::Transform(_) => CommandKind::Transform,
            Self::Close => CommandKind::Close,
        }
    }

    /// `None` when the two commands are of different kinds.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Option<Self> {
        let out = match (a, b) {
            (Self::MoveTo(p), Self::MoveTo(q)) => Self::MoveTo(<Point as Lerp>::lerp(p, q, t)),
            (Self::LineTo(p), Self::LineTo(q)) => Self::LineTo(<Point as Lerp>::lerp(p, q, t)),
            (Self::CubicTo(a1, a2, a3), Self::CubicTo(b1, b2, b3)) => Self::CubicTo(
                <Point as Lerp>::lerp(a1, b1, t),
                <Point as Lerp>::lerp(a2, b2, t),
                <Point as Lerp>::lerp(a3, b3, t),
            ),
            (
                Self::Arc {
                    center: c0,
                    radii: r0,
                    start_deg: s0,
                    sweep_deg: w0,
                },
                Self::Arc {
                    center: c1,
                    radii: r1,
                    start_deg: s1,
                    sweep_deg: w1,
                },
            ) => Self::Arc {
                center: <Point as Lerp>::lerp(c0, c1, t),
                radii: <Vec2 as Lerp>::lerp(r0, r1, t),
                start_deg: lerp(*s0, *s1, t),
                sweep_deg: lerp(*w0, *w1, t),
            },
            (Self::Rect(r0), Self::Rect(r1)) => Self::Rect(<Rect as Lerp>::lerp(r0, r1, t)),
            (
                Self::Circle {
                    center: c0,
                    radius: r0,
                },
                Self::Circle {
                    center: c1,
                    radius: r1,
                },
            ) => Self::Circle {
                center: <Point as Lerp>::lerp(c0, c1, t),
                radius: lerp(*r0, *r1, t),
            },
            (Self::Transform(t0), Self::Transform(t1)) => {
                Self::Transform(Transform2D::lerp(t0, t1, t))
            }
            (Self::Close, Self::Close) => Self::Close,
            _ => return None,
        };
        Some(out)
    }

    /// Emit this command onto `surface`. Returns `true` at structural
    /// boundaries (close, rect, circle) where the pending path must be drawn.
    pub(crate) fn replay(&self, surface: &mut dyn Surface) -> bool {
        match *self {
            Self::MoveTo(p) => surface.move_to(p),
            Self::LineTo(p) => surface.line_to(p),
            Self::CubicTo(c1, c2, p) => surface.cubic_to(c1, c2, p),
            Self::Arc {
                center,
                radii,
                start_deg,
                sweep_deg,
            } => surface.arc(center, radii, start_deg, sweep_deg),
            Self::Rect(r) => {
                surface.rect(r);
                return true;
            }
            Self::Circle { center, radius } => {
                surface.circle(center, radius);
                return true;
            }
            Self::Transform(t) => surface.transform(t.to_affine()),
            Self::Close => {
                surface.close();
                return true;
            }
        }
        false
    }
}

/// Immutable vector picture with a native (unscaled) size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    size: Size,
    commands: Vec<Command>,
}

impl Shape {
    pub fn new(size: Size, commands: Vec<Command>) -> Self {
        Self { size, commands }
    }

    pub fn empty(size: Size) -> Self {
        Self::new(size, Vec::new())
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_compatible(&self, other: &Self) -> bool {
        self.commands.len() == other.commands.len()
            && self
                .commands
                .iter()
                .zip(&other.commands)
                .all(|(a, b)| a.kind() == b.kind())
    }

    /// Describe the first structural difference, if any.
    pub fn check_compatible(&self, other: &Self) -> ClockResult<()> {
        if self.commands.len() != other.commands.len() {
            return Err(ClockError::shape(format!(
                "command count differs ({} vs {})",
                self.commands.len(),
                other.commands.len()
            )));
        }
        for (idx, (a, b)) in self.commands.iter().zip(&other.commands).enumerate() {
            if a.kind() != b.kind() {
                return Err(ClockError::shape(format!(
                    "command {idx} kind differs ({:?} vs {:?})",
                    a.kind(),
                    b.kind()
                )));
            }
        }
        Ok(())
    }

    pub fn interpolate(&self, other: &Self, t: f64) -> ClockResult<Self> {
        self.check_compatible(other)?;
        let commands = self
            .commands
            .iter()
            .zip(&other.commands)
            .filter_map(|(a, b)| Command::lerp(a, b, t))
            .collect();
        Ok(Self {
            size: <Size as Lerp>::lerp(&self.size, &other.size, t),
            commands,
        })
    }

    /// Replay the commands onto `surface`, calling `render` at every
    /// structural boundary. Transforms are scoped to this shape.
    pub fn plot(&self, surface: &mut dyn Surface, render: &mut dyn FnMut(&mut dyn Surface)) {
        surface.save();
        for cmd in &self.commands {
            if cmd.replay(surface) {
                render(surface);
            }
        }
        surface.restore();
    }

    /// Plot the blend of `a` and `b` at `t` without materializing it.
    ///
    /// Incompatible inputs are an authoring defect in font data: debug builds
    /// panic, release builds fall back to plotting `a`.
    pub fn plot_interpolated(
        a: &Self,
        b: &Self,
        t: f64,
        surface: &mut dyn Surface,
        render: &mut dyn FnMut(&mut dyn Surface),
    ) {
        if let Err(err) = a.check_compatible(b) {
            debug_assert!(false, "interpolating incompatible shapes: {err}");
            tracing::warn!(%err, "incompatible shapes, drawing the start shape only");
            a.plot(surface, render);
            return;
        }

        surface.save();
        for (ca, cb) in a.commands.iter().zip(&b.commands) {
            let Some(cmd) = Command::lerp(ca, cb, t) else {
                continue;
            };
            if cmd.replay(surface) {
                render(surface);
            }
        }
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/command.rs"]
mod tests;
