use image::Rgb;
use nalgebra::Point2;
use tracing::debug;

use crate::Error;
use crate::config::{Settings, WaveSettings};
use crate::draw::{DrawSink, Line, Stroke, Surface, Vertex, draw_line, record};
use crate::penplot::{Pen, paths_to_svg};
use crate::random::Random;
use crate::sketch::{Artifact, RenderParams, Sketch};

/// One generated line, column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveLine {
    pub start_row: i32,
    /// Per column: `0` to carry on, otherwise the row offset of a wave.
    pub actions: Vec<i32>,
    /// Row after each column's action.
    pub rows: Vec<i32>,
}

/// Grow `settings.iterations` lines, each reacting to those before it.
pub fn generate(settings: &WaveSettings, random: &mut Random) -> Vec<WaveLine> {
    let mut lines = Vec::with_capacity(settings.iterations);
    for _ in 0..settings.iterations {
        let line = next_line(settings, &lines, random);
        lines.push(line);
    }
    lines
}

fn next_line(settings: &WaveSettings, lines: &[WaveLine], random: &mut Random) -> WaveLine {
    let start_row = random.interval(0.0, settings.grid_size as f32).round() as i32;
    let mut row = start_row;
    let mut move_up = settings.decision_probability();
    let mut move_down = settings.decision_probability();
    let mut previous_neighbours: Vec<&WaveLine> = Vec::new();
    let mut actions = Vec::with_capacity(settings.grid_size + 1);
    let mut rows = Vec::with_capacity(settings.grid_size + 1);

    for column in 0..=settings.grid_size {
        let neighbours: Vec<&WaveLine> = lines
            .iter()
            .filter(|line| line.rows.get(column) == Some(&row))
            .collect();
        for neighbour in &previous_neighbours {
            let act = column
                .checked_sub(1)
                .and_then(|before| neighbour.actions.get(before))
                .copied()
                .unwrap_or(0);
            if act > 0 {
                move_down *= settings.decision_nudge;
            }
            if act < 0 {
                move_up *= settings.decision_nudge;
            }
        }
        previous_neighbours = neighbours;

        let act = if random.next() <= move_up {
            -settings.wave_height
        } else if random.next() <= move_down {
            settings.wave_height
        } else {
            0
        };
        row += act;
        actions.push(act);
        rows.push(row);
    }

    WaveLine {
        start_row,
        actions,
        rows,
    }
}

/// Grid cell to page position, the grid filling a `settings.width` square
/// centred on `center`.
fn to_page(settings: &WaveSettings, center: Point2<f32>, column: f32, row: f32) -> Point2<f32> {
    let grid = settings.grid_size as f32;
    Point2::new(
        column.min(grid) / grid * settings.width - settings.width / 2.0 + center.x,
        row / grid * settings.width - settings.width / 2.0 + center.y,
    )
}

/// Vertices tracing `line`, stopping once past the right edge of the grid.
pub fn vertices(settings: &WaveSettings, line: &WaveLine, center: Point2<f32>) -> Line {
    let grid = settings.grid_size as f32;
    let half = settings.wave_length as f32 / 2.0;
    let length = settings.wave_length as f32;
    let mut column = 0.0;
    let mut row = line.start_row as f32;
    let mut out = Vec::new();

    for &act in &line.actions {
        if column > grid {
            break;
        }
        if act == 0 {
            let point = to_page(settings, center, column, row);
            column += 1.0;
            if settings.draw_lines {
                out.push(Vertex::Point(point));
            }
        } else {
            let offset = act as f32;
            let wave = Vertex::Curve {
                start: to_page(settings, center, column, row),
                control1: to_page(settings, center, column + half, row),
                control2: to_page(settings, center, column + half, row + offset),
                end: to_page(settings, center, column + length, row + offset),
            };
            row += offset;
            column += length;
            if settings.draw_waves {
                out.push(wave);
            }
        }
    }
    out
}

/// Horizontal lines that now and then hop a row with a wave, more readily
/// where earlier lines hopped the other way.
pub struct Waves {
    settings: WaveSettings,
    lines: Vec<WaveLine>,
    ink: Rgb<u8>,
    paper: Rgb<u8>,
    ink_hex: String,
}

impl Waves {
    pub fn new(
        settings: &Settings,
        waves: WaveSettings,
        mut random: Random,
    ) -> Result<Self, Error> {
        let lines = generate(&waves, &mut random);
        debug!(lines = lines.len(), "waves generated");
        Ok(Waves {
            settings: waves,
            lines,
            ink: settings.ink_colour()?,
            paper: settings.paper_colour()?,
            ink_hex: settings.ink.clone(),
        })
    }

    fn draw(&self, sink: &mut dyn DrawSink, center: Point2<f32>) {
        let surface = sink.surface();
        surface.fill(self.paper);
        surface.begin_path();
        for line in &self.lines {
            draw_line(sink, vertices(&self.settings, line, center));
        }
        sink.surface().stroke(&Stroke {
            colour: self.ink,
            width: self.settings.line_width,
        });
    }
}

impl Sketch for Waves {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WaveSettings {
        WaveSettings {
            grid_size: 20,
            iterations: 40,
            ..WaveSettings::default()
        }
    }

    #[test]
    fn same_seed_same_lines() {
        let a = generate(&small(), &mut Random::new(8));
        let b = generate(&small(), &mut Random::new(8));
        assert_eq!(a, b);
    }

    #[test]
    fn rows_follow_actions() {
        let settings = small();
        for line in generate(&settings, &mut Random::new(21)) {
            assert_eq!(line.actions.len(), settings.grid_size + 1);
            let mut row = line.start_row;
            for (act, expected) in line.actions.iter().zip(&line.rows) {
                assert!([-1, 0, 1].contains(act));
                row += act;
                assert_eq!(row, *expected);
            }
        }
    }

    #[test]
    fn empty_grid_always_climbs() {
        // base probability is 0.5 / 0: every column moves up
        let settings = WaveSettings {
            grid_size: 0,
            iterations: 3,
            ..WaveSettings::default()
        };
        for line in generate(&settings, &mut Random::new(2)) {
            assert_eq!(line.actions, vec![-1]);
            assert_eq!(line.rows, vec![line.start_row - 1]);
        }
    }

    #[test]
    fn stays_inside_its_square() {
        let settings = small();
        let center = Point2::new(10.5, 14.85);
        for line in generate(&settings, &mut Random::new(5)) {
            for vertex in vertices(&settings, &line, center) {
                let (left, right) = (center.x - 5.0, center.x + 5.0);
                assert!(vertex.start().x >= left - 1e-4 && vertex.start().x <= right + 1e-4);
                assert!(vertex.end().x >= left - 1e-4 && vertex.end().x <= right + 1e-4);
            }
        }
    }

    #[test]
    fn flat_line_is_a_straight_run() {
        let settings = WaveSettings {
            grid_size: 4,
            wave_length: 2,
            ..WaveSettings::default()
        };
        let line = WaveLine {
            start_row: 2,
            actions: vec![0, 0, 1, 0],
            rows: vec![2, 2, 3, 3],
        };
        let line = vertices(&settings, &line, Point2::new(5.0, 5.0));
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], Vertex::Point(Point2::new(0.0, 5.0)));
        assert_eq!(line[1], Vertex::Point(Point2::new(2.5, 5.0)));
        assert_eq!(
            line[2],
            Vertex::Curve {
                start: Point2::new(5.0, 5.0),
                control1: Point2::new(7.5, 5.0),
                control2: Point2::new(7.5, 7.5),
                end: Point2::new(10.0, 7.5),
            }
        );
        assert_eq!(line[3], Vertex::Point(Point2::new(10.0, 7.5)));
    }
}
