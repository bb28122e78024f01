mod support;

use flocklines::config::{self, Page, Render, Settings, SketchKind, WaveSettings};
use flocklines::draw::Blank;
use flocklines::random::Random;
use flocklines::sketch::{self, Artifact, RenderParams, Sketch};
use support::{Tape, path_count, svg_of, svg_ops};

fn render_frames(sketch: &mut dyn Sketch, settings: &Settings, frames: usize) -> Vec<Artifact> {
    let mut last = Vec::new();
    for frame in 0..frames {
        let params = RenderParams {
            page: &settings.page,
            playhead: settings.playhead(frame),
            frame,
        };
        last = sketch.render(&params, &mut Blank);
    }
    last
}

fn small_lichen() -> Settings {
    let mut flock = config::lichen();
    flock.params.count = 12;
    flock.render = Render::Trails {
        history: 10,
        line_width: 0.05,
    };
    Settings {
        flock: Some(flock),
        ..Settings::preset(SketchKind::Lichen)
    }
}

#[test]
fn drawn_geometry_is_serialized_geometry() {
    for settings in [
        small_lichen(),
        Settings::preset(SketchKind::Murmuration),
        Settings {
            waves: Some(WaveSettings {
                iterations: 30,
                ..WaveSettings::default()
            }),
            ..Settings::preset(SketchKind::Waves)
        },
        Settings::preset(SketchKind::Moon),
    ] {
        let mut sketch = sketch::build(&settings, Random::new(77)).unwrap();
        // a few frames first so trails have more than one point
        render_frames(sketch.as_mut(), &settings, 3);

        let mut tape = Tape::default();
        let params = RenderParams {
            page: &settings.page,
            playhead: settings.playhead(3),
            frame: 3,
        };
        let artifacts = sketch.render(&params, &mut tape);
        assert_eq!(artifacts[0], Artifact::Canvas);

        let ops = svg_ops(svg_of(&artifacts));
        assert!(!ops.is_empty(), "{:?} drew nothing", settings.sketch);
        assert_eq!(ops, tape.ops, "{:?} svg differs from canvas", settings.sketch);
    }
}

#[test]
fn same_seed_same_drawing() {
    let settings = small_lichen();
    let draw = |seed| {
        let mut sketch = sketch::build(&settings, Random::new(seed)).unwrap();
        svg_of(&render_frames(sketch.as_mut(), &settings, 20)).to_string()
    };
    assert_eq!(draw(4242), draw(4242));
    assert_ne!(draw(4242), draw(4243));
}

#[test]
fn trails_are_capped_by_history() {
    let settings = small_lichen();
    let mut sketch = sketch::build(&settings, Random::new(9)).unwrap();
    let artifacts = render_frames(sketch.as_mut(), &settings, 25);
    let document = svg_of(&artifacts);

    assert_eq!(path_count(document), 12);
    let ops = svg_ops(document);
    assert!(ops.iter().all(|op| op.0 == 'M' || op.0 == 'L'));
    // ten points per trail: one move and nine lines
    assert_eq!(ops.iter().filter(|op| op.0 == 'M').count(), 12);
    assert_eq!(ops.iter().filter(|op| op.0 == 'L').count(), 12 * 9);
}

#[test]
fn first_frame_trails_are_not_drawn() {
    let settings = small_lichen();
    let mut sketch = sketch::build(&settings, Random::new(9)).unwrap();
    let artifacts = render_frames(sketch.as_mut(), &settings, 1);
    // a single snapshot is one point per boid: nothing to draw yet
    assert_eq!(path_count(svg_of(&artifacts)), 0);
}

#[test]
fn murmuration_draws_one_stroke_per_boid() {
    let settings = Settings::preset(SketchKind::Murmuration);
    let mut sketch = sketch::build(&settings, Random::new(31)).unwrap();
    let mut tape = Tape::default();
    let params = RenderParams {
        page: &settings.page,
        playhead: 0.0,
        frame: 0,
    };
    let artifacts = sketch.render(&params, &mut tape);
    assert_eq!(path_count(svg_of(&artifacts)), 500);
    assert_eq!(tape.strokes, 500);
}

#[test]
fn moon_is_one_closed_path() {
    let settings = Settings::preset(SketchKind::Moon);
    let mut sketch = sketch::build(&settings, Random::new(5)).unwrap();
    let document = svg_of(&render_frames(sketch.as_mut(), &settings, 1)).to_string();
    assert_eq!(path_count(&document), 1);
    let ops = svg_ops(&document);
    assert_eq!(ops.iter().filter(|op| op.0 == 'C').count(), 4);
    assert_eq!(ops[0].0, 'M');
    let last = &ops[ops.len() - 1].1;
    assert!((last[4] - ops[0].1[0]).abs() < 1e-3);
    assert!((last[5] - ops[0].1[1]).abs() < 1e-3);
}

#[test]
fn page_sized_document() {
    let settings = Settings {
        page: Page {
            width: 30.0,
            height: 20.0,
            units: "mm".into(),
        },
        ..small_lichen()
    };
    let mut sketch = sketch::build(&settings, Random::new(1)).unwrap();
    let document = svg_of(&render_frames(sketch.as_mut(), &settings, 2)).to_string();
    assert!(document.contains("width=\"30mm\""));
    assert!(document.contains("height=\"20mm\""));
    assert!(document.contains("viewBox=\"0 0 30 20\""));
}
