use flocklines::draw::{Stroke, Surface};
use flocklines::sketch::Artifact;
use image::Rgb;
use nalgebra::Point2;
use svg::node::element::path::{Command, Data, Position};
use svg::node::element::tag;
use svg::parser::Event;

/// A path command as `(letter, absolute coordinates)`.
pub type Op = (char, Vec<f32>);

/// Surface that remembers every path command it is given.
#[derive(Debug, Default)]
pub struct Tape {
    pub ops: Vec<Op>,
    pub strokes: usize,
}

impl Surface for Tape {
    fn fill(&mut self, _colour: Rgb<u8>) {}

    fn begin_path(&mut self) {}

    fn move_to(&mut self, point: Point2<f32>) {
        self.ops.push(('M', vec![point.x, point.y]));
    }

    fn line_to(&mut self, point: Point2<f32>) {
        self.ops.push(('L', vec![point.x, point.y]));
    }

    fn bezier_curve_to(&mut self, a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) {
        self.ops.push(('C', vec![a.x, a.y, b.x, b.y, c.x, c.y]));
    }

    fn stroke(&mut self, _stroke: &Stroke) {
        self.strokes += 1;
    }
}

/// The SVG document among a frame's artifacts.
pub fn svg_of(artifacts: &[Artifact]) -> &str {
    artifacts
        .iter()
        .find_map(|artifact| match artifact {
            Artifact::File { data, extension } if *extension == ".svg" => Some(data.as_str()),
            _ => None,
        })
        .expect("frame produced no svg")
}

/// Every path command of every `<path>` in `document`, in order.
pub fn svg_ops(document: &str) -> Vec<Op> {
    let mut ops = Vec::new();
    for event in svg::read(document).expect("svg parses") {
        if let Event::Tag(tag::Path, _, attributes) = event {
            let d = attributes.get("d").expect("path has data");
            let data = Data::parse(d).expect("path data parses");
            for command in data.iter() {
                let op = match command {
                    Command::Move(Position::Absolute, params) => ('M', params.to_vec()),
                    Command::Line(Position::Absolute, params) => ('L', params.to_vec()),
                    Command::CubicCurve(Position::Absolute, params) => ('C', params.to_vec()),
                    other => panic!("unexpected command {other:?}"),
                };
                ops.push(op);
            }
        }
    }
    ops
}

pub fn path_count(document: &str) -> usize {
    document.matches("<path").count()
}
