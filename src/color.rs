//! RGB colors for point particles.
//!
//! [`Rgb`] is a plain byte triple. It is `Pod`, so a slice of colors can be
//! handed to a renderer as raw bytes with [`bytemuck::cast_slice`].

use bytemuck::{Pod, Zeroable};

/// 8-bit RGB color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Engine exhaust at ignition.
    pub const EXHAUST: Rgb = Rgb::new(255, 200, 128);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level with all three channels equal to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Subtract `delta` from every channel, saturating at 0.
    #[inline]
    pub fn faded(self, delta: u8) -> Self {
        Self::new(
            self.r.saturating_sub(delta),
            self.g.saturating_sub(delta),
            self.b.saturating_sub(delta),
        )
    }

    /// True once every channel has reached 0.
    #[inline]
    pub fn is_black(self) -> bool {
        self == Self::BLACK
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        bytemuck::cast(c)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb(c.into())
    }
}

/// View a color buffer as raw bytes (3 per pixel).
pub fn as_bytes(colors: &[Rgb]) -> &[u8] {
    bytemuck::cast_slice(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faded_floors_at_zero() {
        let c = Rgb::new(10, 3, 200).faded(7);
        assert_eq!(c, Rgb::new(3, 0, 193));
        assert!(Rgb::new(4, 4, 4).faded(7).is_black());
    }

    #[test]
    fn test_as_bytes_layout() {
        let colors = [Rgb::new(1, 2, 3), Rgb::EXHAUST];
        assert_eq!(as_bytes(&colors), &[1, 2, 3, 255, 200, 128]);
    }
}
