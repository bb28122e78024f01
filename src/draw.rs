use image::Rgb;
use nalgebra::Point2;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// One step of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vertex {
    Point(Point2<f32>),
    /// Straight to `start`, then a cubic Bézier to `end`.
    Curve {
        start: Point2<f32>,
        control1: Point2<f32>,
        control2: Point2<f32>,
        end: Point2<f32>,
    },
}

impl Vertex {
    pub fn start(&self) -> Point2<f32> {
        match *self {
            Vertex::Point(point) => point,
            Vertex::Curve { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point2<f32> {
        match *self {
            Vertex::Point(point) => point,
            Vertex::Curve { end, .. } => end,
        }
    }
}

impl From<Point2<f32>> for Vertex {
    fn from(point: Point2<f32>) -> Self {
        Vertex::Point(point)
    }
}

pub type Line = Vec<Vertex>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub colour: Rgb<u8>,
    /// In page units.
    pub width: f32,
}

impl Stroke {
    pub fn black(width: f32) -> Self {
        Stroke {
            colour: BLACK,
            width,
        }
    }
}

/// Immediate-mode 2D drawing target, in page units.
pub trait Surface {
    fn fill(&mut self, colour: Rgb<u8>);
    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point2<f32>);
    fn line_to(&mut self, point: Point2<f32>);
    fn bezier_curve_to(&mut self, control1: Point2<f32>, control2: Point2<f32>, end: Point2<f32>);
    /// Stroke every subpath since the last `begin_path`.
    fn stroke(&mut self, stroke: &Stroke);
}

/// Surface that ignores everything, for SVG-only runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blank;

impl Surface for Blank {
    fn fill(&mut self, _colour: Rgb<u8>) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _point: Point2<f32>) {}
    fn line_to(&mut self, _point: Point2<f32>) {}
    fn bezier_curve_to(&mut self, _: Point2<f32>, _: Point2<f32>, _: Point2<f32>) {}
    fn stroke(&mut self, _stroke: &Stroke) {}
}

pub trait DrawSink {
    fn surface(&mut self) -> &mut dyn Surface;
    fn emit(&mut self, line: Line);
}

/// The usual sink: strokes on a borrowed surface and keeps the lines.
pub struct Recorder<'a> {
    surface: &'a mut dyn Surface,
    lines: Vec<Line>,
}

impl<'a> Recorder<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Recorder {
            surface,
            lines: Vec::new(),
        }
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}

impl DrawSink for Recorder<'_> {
    fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    fn emit(&mut self, line: Line) {
        self.lines.push(line);
    }
}

/// Run one frame's drawing against `surface` and return what it emitted.
pub fn record<F>(surface: &mut dyn Surface, render: F) -> Vec<Line>
where
    F: FnOnce(&mut dyn DrawSink),
{
    let mut recorder = Recorder::new(surface);
    render(&mut recorder);
    recorder.into_lines()
}

/// Trace `line` on the sink's surface, then emit it unchanged.
///
/// Lines with fewer than two vertices are dropped.
pub fn draw_line<S: DrawSink + ?Sized>(sink: &mut S, line: Line) {
    if line.len() < 2 {
        return;
    }

    let surface = sink.surface();
    for (index, vertex) in line.iter().enumerate() {
        if index == 0 {
            surface.move_to(vertex.start());
        } else {
            surface.line_to(vertex.start());
        }
        if let Vertex::Curve {
            control1,
            control2,
            end,
            ..
        } = *vertex
        {
            surface.bezier_curve_to(control1, control2, end);
        }
    }

    sink.emit(line);
}
