use std::path::Path;

use image::{Rgb, RgbImage};
use nalgebra::Point2;

use crate::Error;
use crate::config::Page;
use crate::draw::{Stroke, Surface};

const CURVE_STEPS: usize = 24;

/// Raster surface: page units in, pixels out.
pub struct Canvas {
    image: RgbImage,
    pixels_per_unit: f32,
    subpaths: Vec<Vec<Point2<f32>>>,
}

impl Canvas {
    pub fn new(page: &Page, pixels_per_unit: f32, paper: Rgb<u8>) -> Self {
        let width = (page.width * pixels_per_unit).round().max(1.0) as u32;
        let height = (page.height * pixels_per_unit).round().max(1.0) as u32;
        Canvas {
            image: RgbImage::from_pixel(width, height, paper),
            pixels_per_unit,
            subpaths: Vec::new(),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        self.image.save(path)?;
        Ok(())
    }

    fn to_pixels(&self, point: Point2<f32>) -> Point2<f32> {
        Point2::from(point.coords * self.pixels_per_unit)
    }

    fn pen(&self) -> Option<Point2<f32>> {
        self.subpaths.last().and_then(|subpath| subpath.last().copied())
    }

    /// Filled disc, clipped to the image.
    fn dot(&mut self, center: Point2<f32>, radius: f32, colour: Rgb<u8>) {
        let (width, height) = self.image.dimensions();
        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = (center.x + radius).ceil().min(width as f32 - 1.0);
        let max_y = (center.y + radius).ceil().min(height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        for y in min_y..=max_y as u32 {
            for x in min_x..=max_x as u32 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius * radius {
                    self.image.put_pixel(x, y, colour);
                }
            }
        }
    }

    /// Round-capped segment between two pixel positions.
    fn segment(&mut self, from: Point2<f32>, to: Point2<f32>, radius: f32, colour: Rgb<u8>) {
        let length = nalgebra::distance(&from, &to);
        let steps = (length / 0.5).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            self.dot(from + (to - from) * t, radius, colour);
        }
    }
}

impl Surface for Canvas {
    fn fill(&mut self, colour: Rgb<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = colour;
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Point2<f32>) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: Point2<f32>) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.move_to(point),
        }
    }

    fn bezier_curve_to(&mut self, control1: Point2<f32>, control2: Point2<f32>, end: Point2<f32>) {
        let Some(start) = self.pen() else {
            self.move_to(control1);
            return self.bezier_curve_to(control1, control2, end);
        };
        for step in 1..=CURVE_STEPS {
            let t = step as f32 / CURVE_STEPS as f32;
            let u = 1.0 - t;
            let point = start.coords * (u * u * u)
                + control1.coords * (3.0 * u * u * t)
                + control2.coords * (3.0 * u * t * t)
                + end.coords * (t * t * t);
            self.line_to(Point2::from(point));
        }
    }

    fn stroke(&mut self, stroke: &Stroke) {
        let radius = (stroke.width * self.pixels_per_unit / 2.0).max(0.5);
        let subpaths: Vec<Vec<Point2<f32>>> = self
            .subpaths
            .iter()
            .map(|subpath| subpath.iter().map(|point| self.to_pixels(*point)).collect())
            .collect();
        for subpath in subpaths {
            if let [only] = subpath.as_slice() {
                self.dot(*only, radius, stroke.colour);
            }
            for pair in subpath.windows(2) {
                self.segment(pair[0], pair[1], radius, stroke.colour);
            }
        }
    }
}
