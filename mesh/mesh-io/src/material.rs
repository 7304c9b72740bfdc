//! Material and light descriptors consumed by the exporters.
//!
//! These are plain records. Exporters read their fields and never modify
//! them.

use mesh_types::{Point3, Vector3, VertexColor};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface appearance in the classic Phong/MTL model.
///
/// Only the RGB channels of each color are exported. `transparency` is
/// written unchanged as MTL `d` and as the glTF base color alpha, so `1.0`
/// means fully opaque.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialProperties {
    /// Material name used by `newmtl` / `usemtl` and the glTF material.
    pub name: String,
    /// Ambient color (`Ka`).
    pub ambient: VertexColor,
    /// Diffuse color (`Kd`).
    pub diffuse: VertexColor,
    /// Specular color (`Ks`).
    pub specular: VertexColor,
    /// Emissive color (`Ke`).
    pub emission: VertexColor,
    /// Specular exponent (`Ns`).
    pub shininess: f32,
    /// Opacity (`d`), `1.0` is opaque.
    pub transparency: f32,
    /// Diffuse texture path (`map_Kd`).
    pub diffuse_texture: Option<String>,
    /// Bump map path (`map_Bump`).
    pub bump_texture: Option<String>,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            name: "material".to_string(),
            ambient: VertexColor::rgb(0.2, 0.2, 0.2),
            diffuse: VertexColor::rgb(0.8, 0.8, 0.8),
            specular: VertexColor::BLACK,
            emission: VertexColor::BLACK,
            shininess: 32.0,
            transparency: 1.0,
            diffuse_texture: None,
            bump_texture: None,
        }
    }
}

impl MaterialProperties {
    /// Create a default material with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the diffuse color.
    #[must_use]
    pub const fn with_diffuse(mut self, diffuse: VertexColor) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub const fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
}

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightKind {
    /// Parallel rays from infinitely far away.
    #[default]
    Directional,
    /// Omnidirectional point source.
    Point,
    /// Cone-shaped source.
    Spot,
    /// Rectangular area source.
    Area,
    /// Uniform ambient term.
    Ambient,
}

impl LightKind {
    /// Name used in `KHR_lights_punctual`.
    ///
    /// Kinds the extension does not define map to `"ambient"`.
    #[must_use]
    pub const fn gltf_type(self) -> &'static str {
        match self {
            Self::Directional => "directional",
            Self::Point => "point",
            Self::Spot => "spot",
            Self::Area | Self::Ambient => "ambient",
        }
    }
}

/// A light source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Light {
    /// Light name.
    pub name: String,
    /// Kind of source.
    pub kind: LightKind,
    /// Light color (RGB used).
    pub color: VertexColor,
    /// Brightness.
    pub intensity: f32,
    /// Position (point, spot and area lights).
    pub position: Point3<f64>,
    /// Direction (directional, spot and area lights).
    pub direction: Vector3<f64>,
    /// Outer cone angle in radians (spot lights).
    pub spot_angle: f32,
    /// Width and height (area lights).
    pub area_size: [f32; 2],
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: "light".to_string(),
            kind: LightKind::Directional,
            color: VertexColor::WHITE,
            intensity: 1.0,
            position: Point3::origin(),
            direction: -Vector3::z(),
            spot_angle: std::f32::consts::FRAC_PI_4,
            area_size: [1.0, 1.0],
        }
    }
}

impl Light {
    /// Create a light of the given kind with default parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: LightKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Set the color.
    #[must_use]
    pub const fn with_color(mut self, color: VertexColor) -> Self {
        self.color = color;
        self
    }

    /// Set the intensity.
    #[must_use]
    pub const fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}
