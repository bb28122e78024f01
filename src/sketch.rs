use image::Rgb;
use nalgebra::Point2;
use tracing::{debug, info};

use crate::Error;
use crate::boids::Flock;
use crate::config::{self, FlockSettings, Page, Render, Settings, SketchKind};
use crate::draw::{DrawSink, Line, Stroke, Surface, Vertex, draw_line, record};
use crate::geometry::rotate;
use crate::history::{History, trails};
use crate::moon::Moon;
use crate::penplot::{Pen, paths_to_svg};
use crate::random::Random;
use crate::waves::Waves;

/// Per-frame input from the driver.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub page: &'a Page,
    /// Position in the loop, in `[0, 1)`.
    pub playhead: f32,
    pub frame: usize,
}

/// What a frame hands back to the driver for export.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// The surface the frame was drawn on.
    Canvas,
    File { data: String, extension: &'static str },
}

impl Artifact {
    pub fn svg(data: String) -> Self {
        Artifact::File {
            data,
            extension: ".svg",
        }
    }
}

pub trait Sketch {
    fn render(&mut self, params: &RenderParams<'_>, surface: &mut dyn Surface) -> Vec<Artifact>;
}

/// Set up the sketch named in `settings`.
pub fn build(settings: &Settings, random: Random) -> Result<Box<dyn Sketch>, Error> {
    info!(sketch = settings.sketch.name(), seed = random.seed(), "building sketch");
    Ok(match settings.sketch {
        SketchKind::Murmuration => {
            let flock = settings.flock.unwrap_or_else(config::murmuration);
            Box::new(FlockSketch::new(settings, flock, random)?)
        }
        SketchKind::Lichen => {
            let flock = settings.flock.unwrap_or_else(config::lichen);
            Box::new(FlockSketch::new(settings, flock, random)?)
        }
        SketchKind::Waves => {
            let waves = settings.waves.unwrap_or_default();
            Box::new(Waves::new(settings, waves, random)?)
        }
        SketchKind::Moon => {
            let moon = settings.moon.unwrap_or_default();
            Box::new(Moon::new(settings, moon)?)
        }
    })
}

/// A flock drawn either as trails or as heading strokes.
pub struct FlockSketch {
    flock: Flock,
    random: Random,
    render: Render,
    history: History<Vec<Point2<f32>>>,
    ink: Rgb<u8>,
    paper: Rgb<u8>,
    ink_hex: String,
}

impl FlockSketch {
    pub fn new(
        settings: &Settings,
        flock: FlockSettings,
        mut random: Random,
    ) -> Result<Self, Error> {
        let origin = Point2::new(settings.page.width / 2.0, settings.page.height / 2.0);
        let history = match flock.render {
            Render::Trails { history, .. } => History::new(history),
            Render::Strokes { .. } => History::new(0),
        };
        let sketch = FlockSketch {
            flock: Flock::new(flock.params, origin, &mut random),
            random,
            render: flock.render,
            history,
            ink: settings.ink_colour()?,
            paper: settings.paper_colour()?,
            ink_hex: settings.ink.clone(),
        };
        debug!(boids = sketch.flock.boids().len(), "flock seeded");
        Ok(sketch)
    }

    fn line_width(&self) -> f32 {
        match self.render {
            Render::Trails { line_width, .. } | Render::Strokes { line_width, .. } => line_width,
        }
    }

    fn draw(&mut self, sink: &mut dyn DrawSink) {
        let stroke = Stroke {
            colour: self.ink,
            width: self.line_width(),
        };
        let surface = sink.surface();
        surface.fill(self.paper);
        surface.begin_path();

        match self.render {
            Render::Trails { .. } => {
                self.history.push(self.flock.positions());
                for trail in trails(&self.history, self.flock.boids().len()) {
                    draw_line(sink, trail.into_iter().map(Vertex::from).collect());
                }
                sink.surface().stroke(&stroke);
            }
            Render::Strokes { length, .. } => {
                for boid in self.flock.boids() {
                    let center = boid.position();
                    let half = length / 2.0;
                    let start = rotate(center, Point2::new(center.x - half, center.y), boid.angle);
                    let end = rotate(center, Point2::new(center.x + half, center.y), boid.angle);
                    sink.surface().begin_path();
                    draw_line(sink, vec![start.into(), end.into()]);
                    sink.surface().stroke(&stroke);
                }
            }
        }
    }
}

impl Sketch for FlockSketch {
    fn render(&mut self, params: &RenderParams<'_>, surface: &mut dyn Surface) -> Vec<Artifact> {
        self.flock.update(params.playhead, &mut self.random);
        let lines: Vec<Line> = record(surface, |sink| self.draw(sink));
        let pen = Pen {
            ink: self.ink_hex.clone(),
            width: self.line_width(),
        };
        vec![Artifact::Canvas, Artifact::svg(paths_to_svg(&lines, params.page, &pen))]
    }
}
