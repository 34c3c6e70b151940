use crate::{Color, Point2};

/// A 2D raster target that the render pass draws onto. The method set mirrors
/// the subset of the HTML canvas path API that the renderer needs, so a
/// browser canvas context is a thin wrapper. Any other backend just has to
/// follow the same path semantics:
///
/// - [Self::begin_path] discards the current path
/// - [Self::fill] and [Self::stroke] paint the current path with the current
///   fill/stroke style, and leave the path intact
/// - Styles persist until they're set again
pub trait Surface {
    /// Reset a rectangle of the surface to fully transparent
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point2);

    fn line_to(&mut self, point: Point2);

    /// Connect the last point of the path back to its first point
    fn close_path(&mut self);

    fn set_fill_style(&mut self, color: Color);

    fn set_stroke_style(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Set the font for subsequent text, as a CSS font string (e.g.
    /// `12px sans-serif`)
    fn set_font(&mut self, font: &str);

    fn fill(&mut self);

    fn stroke(&mut self);

    /// Draw text horizontally centered on `position`, using the current fill
    /// style and font
    fn fill_text(&mut self, text: &str, position: Point2);
}

/// A single recorded call on a [Surface]. See the trait for what each one
/// does.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    MoveTo(Point2),
    LineTo(Point2),
    ClosePath,
    SetFillStyle(Color),
    SetStrokeStyle(Color),
    SetLineWidth(f64),
    SetFont(String),
    Fill,
    Stroke,
    FillText { text: String, position: Point2 },
}

impl DrawCommand {
    /// Replay this command onto another surface
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            Self::ClearRect {
                x,
                y,
                width,
                height,
            } => surface.clear_rect(*x, *y, *width, *height),
            Self::BeginPath => surface.begin_path(),
            Self::MoveTo(point) => surface.move_to(*point),
            Self::LineTo(point) => surface.line_to(*point),
            Self::ClosePath => surface.close_path(),
            Self::SetFillStyle(color) => surface.set_fill_style(*color),
            Self::SetStrokeStyle(color) => surface.set_stroke_style(*color),
            Self::SetLineWidth(width) => surface.set_line_width(*width),
            Self::SetFont(font) => surface.set_font(font),
            Self::Fill => surface.fill(),
            Self::Stroke => surface.stroke(),
            Self::FillText { text, position } => {
                surface.fill_text(text, *position)
            }
        }
    }
}

/// A surface that doesn't draw anything, it just records every call made on
/// it. Useful for testing, and for deferring a render to replay it onto a
/// real surface later (see [Self::replay]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Every command recorded since the last [Self::clear]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Apply every recorded command, in order, to another surface
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            command.apply(surface);
        }
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for DrawList {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point2) {
        self.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point2) {
        self.push(DrawCommand::LineTo(point));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.push(DrawCommand::SetFillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.push(DrawCommand::SetStrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::SetFont(font.to_owned()));
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, position: Point2) {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            position,
        });
    }
}
