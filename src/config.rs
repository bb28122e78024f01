use std::fs;
use std::path::Path;
use std::str::FromStr;

use colors_transform::{Color, Rgb as Hex};
use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{Boundary, Error, NeighborScan, Parameters, Perturbation};

/// 300 pixels per inch, in pixels per centimetre.
pub const PIXELS_PER_CM: f32 = 300.0 / 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SketchKind {
    Murmuration,
    Lichen,
    Waves,
    Moon,
}

impl SketchKind {
    pub fn name(self) -> &'static str {
        match self {
            SketchKind::Murmuration => "murmuration",
            SketchKind::Lichen => "lichen",
            SketchKind::Waves => "waves",
            SketchKind::Moon => "moon",
        }
    }
}

impl FromStr for SketchKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "murmuration" => Ok(SketchKind::Murmuration),
            "lichen" => Ok(SketchKind::Lichen),
            "waves" => Ok(SketchKind::Waves),
            "moon" => Ok(SketchKind::Moon),
            other => Err(Error::UnknownSketch(other.to_string())),
        }
    }
}

/// Physical page the sketch is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub units: String,
}

impl Page {
    pub fn a4_portrait() -> Self {
        Page {
            width: 21.0,
            height: 29.7,
            units: "cm".to_string(),
        }
    }
}

/// How a flock ends up on paper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Render {
    /// One polyline per boid through its last `history` positions.
    Trails { history: usize, line_width: f32 },
    /// One short segment per boid, centred on it and turned to its heading.
    Strokes { length: f32, line_width: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockSettings {
    pub params: Parameters,
    pub render: Render,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSettings {
    /// Side of the drawn square, in page units.
    pub width: f32,
    pub grid_size: usize,
    /// Columns covered by one wave.
    pub wave_length: usize,
    /// Rows a wave climbs or drops.
    pub wave_height: i32,
    pub iterations: usize,
    /// Multiplier applied to the move probabilities per neighbour that moved.
    pub decision_nudge: f32,
    pub draw_waves: bool,
    pub draw_lines: bool,
    pub line_width: f32,
}

impl Default for WaveSettings {
    fn default() -> Self {
        let grid_size = 50;
        WaveSettings {
            width: 10.0,
            grid_size,
            wave_length: 15,
            wave_height: 1,
            iterations: grid_size * 5,
            decision_nudge: 2.0,
            draw_waves: true,
            draw_lines: true,
            line_width: 0.03,
        }
    }
}

impl WaveSettings {
    /// Base probability of moving up or down at each column.
    pub fn decision_probability(&self) -> f32 {
        0.5 / self.grid_size as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonSettings {
    /// In page units.
    pub radius: f32,
    /// Degrees, clockwise from the positive x axis.
    pub start_angle: f32,
    pub end_angle: f32,
    pub line_width: f32,
}

impl Default for MoonSettings {
    fn default() -> Self {
        MoonSettings {
            radius: 10.0,
            start_angle: 0.0,
            end_angle: 360.0,
            line_width: 0.03,
        }
    }
}

/// Everything a run needs besides the seed override from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub sketch: SketchKind,
    pub page: Page,
    pub pixels_per_unit: f32,
    pub animate: bool,
    pub fps: u32,
    /// Seconds.
    pub duration: f32,
    #[serde(default)]
    pub seed: Option<u64>,
    pub ink: String,
    pub paper: String,
    #[serde(default)]
    pub flock: Option<FlockSettings>,
    #[serde(default)]
    pub waves: Option<WaveSettings>,
    #[serde(default)]
    pub moon: Option<MoonSettings>,
}

impl Settings {
    pub fn preset(kind: SketchKind) -> Self {
        let base = Settings {
            sketch: kind,
            page: Page::a4_portrait(),
            pixels_per_unit: PIXELS_PER_CM,
            animate: true,
            fps: 30,
            duration: 3.0,
            seed: None,
            ink: "#000000".to_string(),
            paper: "#ffffff".to_string(),
            flock: None,
            waves: None,
            moon: None,
        };
        match kind {
            SketchKind::Murmuration => Settings {
                fps: 24,
                flock: Some(murmuration()),
                ..base
            },
            SketchKind::Lichen => Settings {
                flock: Some(lichen()),
                ..base
            },
            SketchKind::Waves => Settings {
                animate: false,
                fps: 10,
                waves: Some(WaveSettings::default()),
                ..base
            },
            SketchKind::Moon => Settings {
                animate: false,
                moon: Some(MoonSettings::default()),
                ..base
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Frames in one loop; a still sketch renders once.
    pub fn frame_count(&self) -> usize {
        if self.animate {
            ((self.duration * self.fps as f32).round() as usize).max(1)
        } else {
            1
        }
    }

    pub fn playhead(&self, frame: usize) -> f32 {
        let total = self.frame_count();
        if total <= 1 {
            0.0
        } else {
            frame as f32 / total as f32
        }
    }

    pub fn ink_colour(&self) -> Result<Rgb<u8>, Error> {
        parse_colour(&self.ink)
    }

    pub fn paper_colour(&self) -> Result<Rgb<u8>, Error> {
        parse_colour(&self.paper)
    }
}

/// Parse a `#rrggbb` colour.
pub fn parse_colour(value: &str) -> Result<Rgb<u8>, Error> {
    let hex = Hex::from_hex_str(value).map_err(|_| Error::Colour(value.to_string()))?;
    Ok(Rgb([
        hex.get_red().round() as u8,
        hex.get_green().round() as u8,
        hex.get_blue().round() as u8,
    ]))
}

/// Five hundred slow boids that only mind their nearest neighbour.
pub fn murmuration() -> FlockSettings {
    FlockSettings {
        params: Parameters {
            count: 500,
            diameter: 7.0,
            fov: 1.0,
            angle_of_view: 60.0,
            inertia: 10.0,
            right_spot: 0.2,
            base_speed: 0.1,
            speed_jitter: (1.0, 1.0),
            angle_range: (-180.0, 180.0),
            scan: NeighborScan::Closest,
            boundary: Boundary::Reverse,
            perturbation: Perturbation::None,
        },
        render: Render::Strokes {
            length: 0.5,
            line_width: 0.04,
        },
    }
}

/// Forty boids flying loops inside a small disc, drawn as trails.
pub fn lichen() -> FlockSettings {
    FlockSettings {
        params: Parameters {
            count: 40,
            diameter: 8.0,
            fov: 100.0,
            angle_of_view: 100.0,
            inertia: 1.0,
            right_spot: 0.8,
            base_speed: 0.3,
            speed_jitter: (0.95, 1.05),
            angle_range: (-360.0, 360.0),
            scan: NeighborScan::AllVisible,
            boundary: Boundary::Kick {
                min: -90.0,
                max: 0.0,
            },
            perturbation: Perturbation::Oscillate {
                frequency: 10.0,
                amplitude: 4.0,
            },
        },
        render: Render::Trails {
            history: 150,
            line_width: 0.05,
        },
    }
}
