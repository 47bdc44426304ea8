//! Per-session camera state negotiated at registration.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use glam::{DMat3, DVec3};
use uuid::Uuid;

use crate::protocol::{CameraIntrinsics, ColorStream};

// ============================================================================
// SessionId
// ============================================================================

/// Identifies one registration for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a new random session ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Intrinsics
// ============================================================================

/// Pinhole intrinsics at transmitted resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// Focal length X.
    pub fx: f64,
    /// Focal length Y.
    pub fy: f64,
    /// Principal point X.
    pub cx: f64,
    /// Principal point Y.
    pub cy: f64,
    /// Axis skew.
    pub skew: f64,
}

impl Intrinsics {
    /// Scales capture-resolution intrinsics by the color stream's resize
    /// factors. Skew is zero.
    #[must_use]
    pub fn scaled(camera: &CameraIntrinsics, color: &ColorStream) -> Self {
        Self {
            fx: camera.focal_length_x * color.resize_factor_x,
            fy: camera.focal_length_y * color.resize_factor_y,
            cx: camera.principal_point_x * color.resize_factor_x,
            cy: camera.principal_point_y * color.resize_factor_y,
            skew: 0.0,
        }
    }

    /// Returns `[fx, fy, cx, cy]` as sent in the `initialize` message.
    #[inline]
    #[must_use]
    pub const fn to_wire(&self) -> [f64; 4] {
        [self.fx, self.fy, self.cx, self.cy]
    }

    /// Returns the 3×3 camera matrix `K`.
    ///
    /// ```text
    /// | fx  skew cx |
    /// | 0   fy   cy |
    /// | 0   0    1  |
    /// ```
    #[must_use]
    pub fn camera_matrix(&self) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(self.fx, 0.0, 0.0),
            DVec3::new(self.skew, self.fy, 0.0),
            DVec3::new(self.cx, self.cy, 1.0),
        )
    }
}

// ============================================================================
// SessionState
// ============================================================================

/// State of the current capture session.
///
/// Replaced wholesale by every successful registration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Log correlation ID.
    id: SessionId,
    /// Scaled intrinsics.
    intrinsics: Intrinsics,
    /// Shared color/depth resolution `(width, height)`.
    rgb_resolution: (u32, u32),
    /// Initial object position in right-handed space.
    object_position: DVec3,
}

impl SessionState {
    /// Creates a session with a fresh ID.
    #[must_use]
    pub fn new(intrinsics: Intrinsics, rgb_resolution: (u32, u32), object_position: DVec3) -> Self {
        Self {
            id: SessionId::generate(),
            intrinsics,
            rgb_resolution,
            object_position,
        }
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the scaled intrinsics.
    #[inline]
    #[must_use]
    pub const fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Returns the camera matrix built from the intrinsics.
    #[inline]
    #[must_use]
    pub fn camera_matrix(&self) -> DMat3 {
        self.intrinsics.camera_matrix()
    }

    /// Returns the resolution used for both streams.
    #[inline]
    #[must_use]
    pub const fn rgb_resolution(&self) -> (u32, u32) {
        self.rgb_resolution
    }

    /// Returns the converted object position.
    #[inline]
    #[must_use]
    pub const fn object_position(&self) -> DVec3 {
        self.object_position
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraIntrinsics {
        CameraIntrinsics {
            focal_length_x: 1000.0,
            focal_length_y: 1000.0,
            principal_point_x: 500.0,
            principal_point_y: 400.0,
        }
    }

    #[test]
    fn test_scaled_intrinsics() {
        let color = ColorStream {
            resize_factor_x: 0.5,
            resize_factor_y: 0.5,
        };
        let intrinsics = Intrinsics::scaled(&camera(), &color);
        assert_eq!(intrinsics.to_wire(), [500.0, 500.0, 250.0, 200.0]);
        assert_eq!(intrinsics.skew, 0.0);
    }

    #[test]
    fn test_scaled_intrinsics_per_axis() {
        let color = ColorStream {
            resize_factor_x: 0.25,
            resize_factor_y: 0.5,
        };
        let intrinsics = Intrinsics::scaled(&camera(), &color);
        assert_eq!(intrinsics.to_wire(), [250.0, 500.0, 125.0, 200.0]);
    }

    #[test]
    fn test_camera_matrix_layout() {
        let intrinsics = Intrinsics::scaled(&camera(), &ColorStream::default());
        let k = intrinsics.camera_matrix();

        assert_eq!(k.row(0), DVec3::new(1000.0, 0.0, 500.0));
        assert_eq!(k.row(1), DVec3::new(0.0, 1000.0, 400.0));
        assert_eq!(k.row(2), DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let intrinsics = Intrinsics::scaled(&camera(), &ColorStream::default());
        let a = SessionState::new(intrinsics, (640, 480), DVec3::ZERO);
        let b = SessionState::new(intrinsics, (640, 480), DVec3::ZERO);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.rgb_resolution(), (640, 480));
    }
}
