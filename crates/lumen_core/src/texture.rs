//! Texture loading and nearest-sample lookup.
//!
//! A texture that fails to load is reported and then treated as absent,
//! so a missing image never takes down a render.

use std::path::Path;
use std::sync::Arc;

use lumen_math::Vec3;
use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with RGB pixel data in [0, 1], row-major, top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Decode an image file. Channels are scaled to [0, 1] without any
    /// color-space conversion.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Texture> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path.display().to_string()));
        }

        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Ok(Texture::new(width, height, pixels, path.to_string_lossy()))
    }

    /// Load a texture, logging and returning `None` on failure.
    pub fn load_or_warn(path: impl AsRef<Path>) -> Option<Arc<Texture>> {
        let path = path.as_ref();
        match Texture::load(path) {
            Ok(texture) => Some(Arc::new(texture)),
            Err(e) => {
                log::warn!("Ignoring texture {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Nearest-sample lookup at normalized (u, v); (0, 0) is the top-left pixel.
    /// Coordinates outside [0, 1] clamp to the edge. An empty texture samples
    /// as black.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::ZERO;
        }
        let x = (u * self.width as f32).max(0.0) as u32;
        let y = (v * self.height as f32).max(0.0) as u32;
        self.get_pixel(x.min(self.width - 1), y.min(self.height - 1))
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: black, white / red, green
        Texture::new(
            2,
            2,
            vec![
                Vec3::ZERO,
                Vec3::ONE,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            "<checker>",
        )
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);
        assert_eq!(tex.sample(0.5, 0.5), Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.sample(1.0, 1.0), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_nearest_sample_quadrants() {
        let tex = checker();
        assert_eq!(tex.sample(0.1, 0.1), Vec3::ZERO);
        assert_eq!(tex.sample(0.9, 0.1), Vec3::ONE);
        assert_eq!(tex.sample(0.1, 0.9), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(0.9, 0.9), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_sample_clamps_edges() {
        let tex = checker();
        assert_eq!(tex.sample(1.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(-0.5, -0.5), Vec3::ZERO);
    }

    #[test]
    fn test_empty_texture_samples_black() {
        let tex = Texture::new(0, 0, vec![], "<empty>");
        assert_eq!(tex.sample(0.5, 0.5), Vec3::ZERO);
        assert_eq!(tex.sample(0.0, 0.0), Vec3::ZERO);

        let zero_height = Texture::new(4, 0, vec![], "<empty>");
        assert_eq!(zero_height.sample(1.0, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_missing_file_degrades() {
        assert!(Texture::load("definitely/not/here.png").is_err());
        assert!(Texture::load_or_warn("definitely/not/here.png").is_none());
    }
}
