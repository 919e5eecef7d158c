//! CubeFace - the six faces of the patch cube.
//!
//! Face space is the square `[-1, 1]^2` on the `z = 1` plane. Each face owns a
//! fixed rotation that carries face space onto its side of the cube. All six
//! bases are proper rotations, so a grid laid out with `x` along columns and
//! `y` along rows stays counter-clockwise seen from outside.

use glam::{Mat3, Vec2, Vec3};

/// One face of the patch cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
  /// No rotation.
  PosZ,
  /// +90 degrees about Y.
  PosX,
  /// 180 degrees about Y.
  NegZ,
  /// -90 degrees about Y.
  NegX,
  /// +90 degrees about X.
  NegY,
  /// -90 degrees about X.
  PosY,
}

impl CubeFace {
  /// Root order used by the patch cube.
  pub const ALL: [CubeFace; 6] = [
    CubeFace::PosZ,
    CubeFace::PosX,
    CubeFace::NegZ,
    CubeFace::NegX,
    CubeFace::NegY,
    CubeFace::PosY,
  ];

  /// Rotation whose columns are the face's `x`, `y` and outward axes.
  pub fn basis(self) -> Mat3 {
    let (u, v, n) = match self {
      CubeFace::PosZ => (Vec3::X, Vec3::Y, Vec3::Z),
      CubeFace::PosX => (Vec3::NEG_Z, Vec3::Y, Vec3::X),
      CubeFace::NegZ => (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
      CubeFace::NegX => (Vec3::Z, Vec3::Y, Vec3::NEG_X),
      CubeFace::NegY => (Vec3::X, Vec3::Z, Vec3::NEG_Y),
      CubeFace::PosY => (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    };
    Mat3::from_cols(u, v, n)
  }

  /// Outward axis of the face.
  #[inline]
  pub fn normal(self) -> Vec3 {
    self.basis().z_axis
  }

  /// Point `(x, y, 1)` of face space on the cube surface.
  #[inline]
  pub fn to_cube(self, p: Vec2) -> Vec3 {
    self.basis() * p.extend(1.0)
  }

  /// Unit direction through a face space point.
  #[inline]
  pub fn direction(self, p: Vec2) -> Vec3 {
    self.to_cube(p).normalize()
  }
}

#[cfg(test)]
#[path = "face_test.rs"]
mod face_test;
