//! Per-vertex colors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color with `f32` components in the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexColor {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (1 = opaque).
    pub a: f32,
}

impl VertexColor {
    /// Create a color from RGBA components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::VertexColor;
    ///
    /// let c = VertexColor::new(1.0, 0.5, 0.0, 0.25);
    /// assert_eq!(c.to_array(), [1.0, 0.5, 0.0, 0.25]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit components.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::VertexColor;
    ///
    /// let c = VertexColor::from_rgba8(255, 0, 51, 255);
    /// assert!((c.b - 0.2).abs() < 1e-6);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Copy of this color with every component clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Components as `[r, g, b, a]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Black color (0, 0, 0, 1).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// White color (1, 1, 1, 1).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Red color (1, 0, 0, 1).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Green color (0, 1, 0, 1).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);

    /// Blue color (0, 0, 1, 1).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl Default for VertexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for VertexColor {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(VertexColor::default().to_array(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn clamp_out_of_range() {
        let c = VertexColor::new(-0.5, 2.0, 0.5, 1.5).clamped();
        assert_eq!(c.to_array(), [0.0, 1.0, 0.5, 1.0]);
    }

    #[test]
    fn from_array_roundtrip() {
        let c = VertexColor::from([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    }
}
