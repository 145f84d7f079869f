use glam::{Affine3A, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Stable identifier of a celestial body.
///
/// This is the node name the body carries in the system model, e.g.
/// `mars_BezierCircle_14`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Uniform scale followed by a translation.
    pub fn scaled_at(scale: f32, position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::splat(scale),
            ..Self::default()
        }
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Map a point from this transform's local space into its parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.to_affine().transform_point3(point)
    }
}

/// Linear RGB color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// Size of the surface the pointer coordinates refer to, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Convert a pointer position (origin top-left, y down) into
    /// normalized device coordinates (origin center, y up, range -1..1).
    pub fn to_ndc(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            (pointer.x / self.width.max(1.0)) * 2.0 - 1.0,
            -(pointer.y / self.height.max(1.0)) * 2.0 + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn scaled_at_applies_scale_then_offset() {
        let t = Transform::scaled_at(0.5, Vec3::new(0.0, 1.0, 0.0));
        let p = t.transform_point(Vec3::new(4.0, 0.0, -2.0));
        assert!((p - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn color_hex_round_trip() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), 0xff8000);
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }

    #[test]
    fn viewport_center_maps_to_ndc_origin() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn body_id_displays_raw_name() {
        let id = BodyId::from("venus_BezierCircle_7");
        assert_eq!(id.to_string(), "venus_BezierCircle_7");
        assert_eq!(id.as_str(), "venus_BezierCircle_7");
    }
}
