use nalgebra::Point2;
use tracing::trace;

use crate::geometry::{bearing, nudge_angle, rotate, square_distance};
use crate::random::Random;
use crate::{Boundary, NeighborScan, Parameters, Perturbation};

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    id: usize,
    pub x: f32,
    pub y: f32,
    /// Depth, only used to modulate how a boid is drawn.
    pub z: f32,
    /// Signed: a negative speed travels backwards along `angle`.
    pub speed: f32,
    /// Heading in degrees, never wrapped.
    pub angle: f32,
}

impl Boid {
    pub fn new(id: usize, x: f32, y: f32, z: f32, speed: f32, angle: f32) -> Self {
        Boid {
            id,
            x,
            y,
            z,
            speed,
            angle,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Advance `speed` units along the current heading.
    fn step(&mut self) {
        let here = self.position();
        let there = rotate(here, Point2::new(self.x + self.speed, self.y), self.angle);
        self.x = there.x;
        self.y = there.y;
    }
}

/// Bearings computed during the current tick, keyed by boid id pair.
///
/// Both orientations are written together, `(b, a)` holding the negated
/// `(a, b)` bearing.
#[derive(Debug, Clone)]
pub struct BearingCache {
    size: usize,
    angles: Vec<Option<f32>>,
}

impl BearingCache {
    pub fn new(size: usize) -> Self {
        BearingCache {
            size,
            angles: vec![None; size * size],
        }
    }

    pub fn reset(&mut self) {
        self.angles.fill(None);
    }

    pub fn get(&self, from: usize, to: usize) -> Option<f32> {
        self.angles[from * self.size + to]
            .or_else(|| self.angles[to * self.size + from].map(|angle| -angle))
    }

    pub fn is_empty(&self) -> bool {
        self.angles.iter().all(Option::is_none)
    }

    /// Bearing from `boids[from]` to `boids[to]`, computed at most once per tick.
    pub fn bearing(&mut self, boids: &[Boid], from: usize, to: usize) -> f32 {
        if let Some(angle) = self.get(from, to) {
            return angle;
        }
        let theta = bearing(boids[from].position(), boids[to].position());
        self.angles[from * self.size + to] = Some(theta);
        self.angles[to * self.size + from] = Some(-theta);
        theta
    }
}

pub struct Flock {
    params: Parameters,
    origin: Point2<f32>,
    boids: Vec<Boid>,
    cache: BearingCache,
}

impl Flock {
    /// Scatter `params.count` boids around `origin`.
    pub fn new(params: Parameters, origin: Point2<f32>, rng: &mut Random) -> Self {
        let half = params.diameter / 2.0;
        let boids = (0..params.count)
            .map(|id| {
                let x = origin.x + rng.interval(-half, half);
                let y = origin.y + rng.interval(-half, half);
                let z = rng.interval(-params.diameter, params.diameter);
                let speed =
                    params.base_speed * rng.interval(params.speed_jitter.0, params.speed_jitter.1);
                let angle = rng.interval(params.angle_range.0, params.angle_range.1);
                Boid::new(id, x, y, z, speed, angle)
            })
            .collect();
        Flock::from_boids(params, origin, boids)
    }

    /// Build a flock from an explicit population. Ids are reassigned to
    /// match positions in `boids`.
    pub fn from_boids(params: Parameters, origin: Point2<f32>, mut boids: Vec<Boid>) -> Self {
        for (id, boid) in boids.iter_mut().enumerate() {
            boid.id = id;
        }
        let cache = BearingCache::new(boids.len());
        Flock {
            params,
            origin,
            boids,
            cache,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn cache(&self) -> &BearingCache {
        &self.cache
    }

    pub fn positions(&self) -> Vec<Point2<f32>> {
        self.boids.iter().map(Boid::position).collect()
    }

    pub fn bearing(&mut self, from: usize, to: usize) -> f32 {
        self.cache.bearing(&self.boids, from, to)
    }

    /// Advance every boid by one tick. Boids update in order, each one
    /// seeing the already-updated state of those before it.
    pub fn update(&mut self, playhead: f32, rng: &mut Random) {
        self.cache.reset();

        let diameter_squared = self.params.diameter.powi(2);
        for index in 0..self.boids.len() {
            let previous = square_distance(self.boids[index].position(), self.origin);

            let boid = &mut self.boids[index];
            boid.step();

            if let Perturbation::Oscillate {
                frequency,
                amplitude,
            } = self.params.perturbation
            {
                let phase = playhead * frequency;
                let wobble = if index % 2 == 1 { phase.cos() } else { phase.sin() };
                boid.angle += wobble * amplitude;
            }

            let distance = square_distance(boid.position(), self.origin);
            if distance > diameter_squared && previous < distance {
                if let Boundary::Kick { min, max } = self.params.boundary {
                    boid.angle += rng.interval(min, max);
                }
                boid.speed = -boid.speed;
                trace!(boid = boid.id(), distance, "turned back at boundary");
            }

            match self.params.scan {
                NeighborScan::AllVisible => {
                    for other in 0..self.boids.len() {
                        if self.is_viewing(index, other) {
                            self.interact(index, other);
                        }
                    }
                }
                NeighborScan::Closest => {
                    if let Some(other) = self.closest(index) {
                        if self.is_viewing(index, other) {
                            self.interact(index, other);
                        }
                    }
                }
            }
        }
    }

    /// Nearest other boid strictly inside the field of view.
    fn closest(&self, index: usize) -> Option<usize> {
        let here = self.boids[index].position();
        let mut best = self.params.fov.powi(2);
        let mut closest = None;
        for (other, boid) in self.boids.iter().enumerate() {
            if other == index {
                continue;
            }
            let distance = square_distance(here, boid.position());
            if distance < best {
                best = distance;
                closest = Some(other);
            }
        }
        closest
    }

    /// Whether `boids[index]` can see `boids[other]`.
    pub fn is_viewing(&mut self, index: usize, other: usize) -> bool {
        if index == other {
            return false;
        }
        let distance = square_distance(self.boids[index].position(), self.boids[other].position());
        if distance > self.params.fov.powi(2) {
            return false;
        }
        let half_view = self.params.angle_of_view / 2.0;
        let angle = self.bearing(index, other);
        (-half_view..=half_view).contains(&angle)
    }

    /// Steer `boids[index]` in reaction to `boids[other]`.
    pub fn interact(&mut self, index: usize, other: usize) {
        if index == other {
            return;
        }

        let Parameters {
            fov,
            inertia,
            right_spot,
            ..
        } = self.params;
        let angle_between = self.bearing(index, other);
        let distance = square_distance(self.boids[index].position(), self.boids[other].position());
        if distance > fov.powi(2) {
            return;
        }

        let other_angle = self.boids[other].angle;
        let boid = &mut self.boids[index];
        if distance > (fov * (0.5 + right_spot / 2.0)).powi(2) {
            // too far
            boid.angle = nudge_angle(inertia, boid.angle, boid.angle + angle_between);
        } else if distance < (fov * (0.5 - right_spot / 2.0)).powi(2) {
            // too close
            boid.angle = nudge_angle(inertia / 10.0, boid.angle, boid.angle - angle_between);
        } else {
            boid.angle = nudge_angle(inertia, boid.angle, other_angle);
        }
    }
}
