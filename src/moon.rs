use std::f32::consts::FRAC_PI_2;

use image::Rgb;
use nalgebra::{Point2, Vector2};
use tracing::debug;

use crate::Error;
use crate::config::{MoonSettings, Settings};
use crate::draw::{DrawSink, Line, Stroke, Surface, Vertex, draw_line, record};
use crate::penplot::{Pen, paths_to_svg};
use crate::sketch::{Artifact, RenderParams, Sketch};

fn on_circle(center: Point2<f32>, radius: f32, angle: f32) -> Point2<f32> {
    center + Vector2::new(angle.cos(), angle.sin()) * radius
}

/// Circular arc from `start` to `end` radians as cubic Béziers of at most
/// a quarter turn each. Angles grow clockwise on the page.
pub fn arc(center: Point2<f32>, radius: f32, start: f32, end: f32) -> Line {
    let sweep = end - start;
    if sweep == 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    // tolerance keeps a float-rounded full turn at four segments
    let segments = (sweep.abs() / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
    let step = sweep / segments as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;

    (0..segments)
        .map(|segment| {
            let a0 = start + step * segment as f32;
            let a1 = a0 + step;
            let tangent0 = Vector2::new(-a0.sin(), a0.cos());
            let tangent1 = Vector2::new(-a1.sin(), a1.cos());
            let from = on_circle(center, radius, a0);
            let to = on_circle(center, radius, a1);
            Vertex::Curve {
                start: from,
                control1: from + tangent0 * k,
                control2: to - tangent1 * k,
                end: to,
            }
        })
        .collect()
}

/// A single arc centred on the page.
pub struct Moon {
    settings: MoonSettings,
    ink: Rgb<u8>,
    paper: Rgb<u8>,
    ink_hex: String,
}

impl Moon {
    pub fn new(settings: &Settings, moon: MoonSettings) -> Result<Self, Error> {
        debug!(radius = moon.radius, "moon set up");
        Ok(Moon {
            settings: moon,
            ink: settings.ink_colour()?,
            paper: settings.paper_colour()?,
            ink_hex: settings.ink.clone(),
        })
    }

    fn draw(&self, sink: &mut dyn DrawSink, center: Point2<f32>) {
        let surface = sink.surface();
        surface.fill(self.paper);
        surface.begin_path();
        draw_line(
            sink,
            arc(
                center,
                self.settings.radius,
                self.settings.start_angle.to_radians(),
                self.settings.end_angle.to_radians(),
            ),
        );
        sink.surface().stroke(&Stroke {
            colour: self.ink,
            width: self.settings.line_width,
        });
    }
}

impl Sketch for Moon {
    fn render(&mut self, params: &RenderParams<'_>, surface: &mut dyn Surface) -> Vec<Artifact> {
        let center = Point2::new(params.page.width / 2.0, params.page.height / 2.0);
        let lines = record(surface, |sink| self.draw(sink, center));
        let pen = Pen {
            ink: self.ink_hex.clone(),
            width: self.settings.line_width,
        };
        vec![Artifact::Canvas, Artifact::svg(paths_to_svg(&lines, params.page, &pen))]
    }
}
