//! Sub-pixel sample generation for anti-aliasing.
//!
//! Both strategies place `⌊√n⌋²` points in the requested rectangle. Exact
//! positions are random; counts and stratification are not.

use lumen_math::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How sub-pixel samples are distributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingStrategy {
    /// One random point per cell of a √n × √n grid.
    #[default]
    Jitter,
    /// Jitter plus Latin-hypercube stratification along each axis.
    MultiJitter,
}

impl SamplingStrategy {
    /// Build the samples for pixel (x, y) with this strategy.
    pub fn pixel(self, x: u32, y: u32, samples: u32, rng: &mut impl Rng) -> PixelSample {
        match self {
            SamplingStrategy::Jitter => jitter_pixel(x, y, samples, rng),
            SamplingStrategy::MultiJitter => multi_jitter_pixel(x, y, samples, rng),
        }
    }
}

/// A pixel coordinate together with its sub-pixel sample points.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    /// Points in image space, inside `[x, x+1) × [y, y+1)`.
    pub points: Vec<Vec2>,
}

/// Largest `s` with `s * s <= n`.
fn grid_size(n: u32) -> u32 {
    let mut size = (n as f64).sqrt() as u32;
    while size * size > n {
        size -= 1;
    }
    while (size + 1) * (size + 1) <= n {
        size += 1;
    }
    size
}

/// Jittered grid sampling over `[min_x, max_x) × [min_y, max_y)`.
pub fn jitter(min_x: f32, max_x: f32, min_y: f32, max_y: f32, n: u32, rng: &mut impl Rng) -> Vec<Vec2> {
    let size = grid_size(n);
    let unit_width = (max_x - min_x) / size as f32;
    let unit_height = (max_y - min_y) / size as f32;

    let mut samples = Vec::with_capacity((size * size) as usize);
    for grid_x in 0..size {
        for grid_y in 0..size {
            let x = min_x + (grid_x as f32 + rng.gen::<f32>()) * unit_width;
            let y = min_y + (grid_y as f32 + rng.gen::<f32>()) * unit_height;
            samples.push(Vec2::new(x, y));
        }
    }
    samples
}

/// Multi-jittered sampling over `[min_x, max_x) × [min_y, max_y)`.
///
/// Every cell of the coarse `size × size` grid holds exactly one point, and
/// every one of the `size²` fine strata along x (and along y) holds exactly
/// one point. Sub-cell offsets are shuffled within each column and row, and
/// the returned order is shuffled too.
pub fn multi_jitter(min_x: f32, max_x: f32, min_y: f32, max_y: f32, n: u32, rng: &mut impl Rng) -> Vec<Vec2> {
    let size = grid_size(n);
    let strata = (size * size) as f32;
    let sub_width = (max_x - min_x) / strata;
    let sub_height = (max_y - min_y) / strata;

    let column_offsets: Vec<Vec<u32>> = (0..size).map(|_| shuffled_range(size, &mut *rng)).collect();
    let row_offsets: Vec<Vec<u32>> = (0..size).map(|_| shuffled_range(size, &mut *rng)).collect();

    let mut samples = Vec::with_capacity((size * size) as usize);
    for column in 0..size {
        for row in 0..size {
            let fine_x = column * size + column_offsets[column as usize][row as usize];
            let fine_y = row * size + row_offsets[row as usize][column as usize];
            let x = min_x + (fine_x as f32 + rng.gen::<f32>()) * sub_width;
            let y = min_y + (fine_y as f32 + rng.gen::<f32>()) * sub_height;
            samples.push(Vec2::new(x, y));
        }
    }
    samples.shuffle(rng);
    samples
}

fn shuffled_range(size: u32, rng: &mut impl Rng) -> Vec<u32> {
    let mut order: Vec<u32> = (0..size).collect();
    order.shuffle(rng);
    order
}

pub fn jitter_pixel(x: u32, y: u32, n: u32, rng: &mut impl Rng) -> PixelSample {
    let (fx, fy) = (x as f32, y as f32);
    PixelSample {
        x,
        y,
        points: jitter(fx, fx + 1.0, fy, fy + 1.0, n, rng),
    }
}

pub fn multi_jitter_pixel(x: u32, y: u32, n: u32, rng: &mut impl Rng) -> PixelSample {
    let (fx, fy) = (x as f32, y as f32);
    PixelSample {
        x,
        y,
        points: multi_jitter(fx, fx + 1.0, fy, fy + 1.0, n, rng),
    }
}
