//! Oriented sprite handles for image-rendered particles.
//!
//! The core never blits. A [`Sprite`] only carries the shared source image
//! and the rotation (in degrees, counter-clockwise) the external renderer
//! should apply when drawing it at the particle's position.

use glam::Vec2;
use image::RgbaImage;
use std::sync::Arc;

/// Smallest speed used when computing a heading in release builds.
pub const MIN_HEADING_SPEED: f32 = 1e-6;

/// Shared source image plus its current rotation.
#[derive(Clone, Debug)]
pub struct Sprite {
    image: Arc<RgbaImage>,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Sprite {
    pub fn new(image: Arc<RgbaImage>) -> Self {
        Self { image, rotation: 0.0 }
    }

    /// Source image, unrotated.
    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    /// Unrotated size in pixels.
    pub fn size(&self) -> Vec2 {
        let (w, h) = self.image.dimensions();
        Vec2::new(w as f32, h as f32)
    }

    /// Half the image width.
    pub fn half_width(&self) -> f32 {
        self.size().x / 2.0
    }

    /// Half the image diagonal, the radius a circle test falls back to
    /// when a sprite declares none.
    pub fn half_diagonal(&self) -> f32 {
        self.size().length() / 2.0
    }
}

/// Unsigned angle in degrees between `velocity` and the +x axis.
///
/// Zero velocity is a logic error: it panics in debug builds and is
/// treated as a tiny +x vector in release builds.
pub fn velocity_angle(velocity: Vec2) -> f32 {
    let mag = velocity.length();
    debug_assert!(mag > 0.0, "heading requested for zero velocity");
    let mag = mag.max(MIN_HEADING_SPEED);
    (velocity.x / mag).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Signed heading in degrees, negated when the velocity points down the
/// screen (`y > 0`).
pub fn heading(velocity: Vec2) -> f32 {
    let phi = velocity_angle(velocity);
    if velocity.y > 0.0 {
        -phi
    } else {
        phi
    }
}

/// Solid-color square, used when no artwork is loaded.
pub fn solid_image(size: u32, rgba: [u8; 4]) -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_pixel(size, size, image::Rgba(rgba)))
}
