use std::fs;
use std::path::Path as FilePath;

use svg::Document;
use svg::node::element::Path;
use svg::node::element::path::Data;

use crate::Error;
use crate::config::Page;
use crate::draw::{Line, Vertex};

/// Pen used for every path in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Any SVG colour, usually `#rrggbb`.
    pub ink: String,
    /// In page units.
    pub width: f32,
}

/// Path data tracing `line` exactly as [`crate::draw::draw_line`] traces it
/// on a surface.
pub fn path_data(line: &[Vertex]) -> Data {
    let mut data = Data::new();
    for (index, vertex) in line.iter().enumerate() {
        let start = vertex.start();
        data = if index == 0 {
            data.move_to(vec![start.x, start.y])
        } else {
            data.line_to(vec![start.x, start.y])
        };
        if let Vertex::Curve {
            control1,
            control2,
            end,
            ..
        } = *vertex
        {
            data = data.cubic_curve_to(vec![
                control1.x, control1.y, control2.x, control2.y, end.x, end.y,
            ]);
        }
    }
    data
}

/// One `<path>` per line on a page-sized document.
pub fn paths_to_document(lines: &[Line], page: &Page, pen: &Pen) -> Document {
    let document = Document::new()
        .set("width", format!("{}{}", page.width, page.units))
        .set("height", format!("{}{}", page.height, page.units))
        .set("viewBox", format!("0 0 {} {}", page.width, page.height));

    lines
        .iter()
        .filter(|line| line.len() >= 2)
        .fold(document, |document, line| {
            document.add(
                Path::new()
                    .set("fill", "none")
                    .set("stroke", pen.ink.as_str())
                    .set("stroke-width", pen.width)
                    .set("stroke-linecap", "round")
                    .set("stroke-linejoin", "round")
                    .set("d", path_data(line)),
            )
        })
}

pub fn paths_to_svg(lines: &[Line], page: &Page, pen: &Pen) -> String {
    paths_to_document(lines, page, pen).to_string()
}

pub fn save(path: &FilePath, data: &str) -> Result<(), Error> {
    fs::write(path, data).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
