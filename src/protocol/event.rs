//! Inbound capture-session events.
//!
//! These are delivered by the capture framework: one registration per
//! session, then any number of decoded frames.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;

// ============================================================================
// RegisterRequest
// ============================================================================

/// Camera intrinsics as reported by the capture client.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraIntrinsics {
    /// Focal length along X, in pixels.
    pub focal_length_x: f64,
    /// Focal length along Y, in pixels.
    pub focal_length_y: f64,
    /// Principal point X, in pixels.
    pub principal_point_x: f64,
    /// Principal point Y, in pixels.
    pub principal_point_y: f64,
}

/// Color stream parameters.
///
/// The resize factors map capture resolution to transmitted resolution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorStream {
    /// Horizontal resize factor.
    pub resize_factor_x: f64,
    /// Vertical resize factor.
    pub resize_factor_y: f64,
}

impl Default for ColorStream {
    fn default() -> Self {
        Self {
            resize_factor_x: 1.0,
            resize_factor_y: 1.0,
        }
    }
}

/// Depth stream parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthStream {
    /// Width in pixels.
    pub resolution_x: u32,
    /// Height in pixels.
    pub resolution_y: u32,
}

impl DepthStream {
    /// Returns `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn resolution(&self) -> (u32, u32) {
        (self.resolution_x, self.resolution_y)
    }
}

/// One-time session registration.
///
/// # Format
///
/// ```json
/// {
///   "objectPosition": "1.0,2.0,3.0",
///   "cameraIntrinsics": { "focalLengthX": 1000, ... },
///   "cameraColor": { "resizeFactorX": 0.5, "resizeFactorY": 0.5 },
///   "cameraDepth": { "resolutionX": 640, "resolutionY": 480 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Initial object position as three comma-separated floats, in the
    /// client's left-handed space.
    pub object_position: String,
    /// Intrinsics at capture resolution.
    pub camera_intrinsics: CameraIntrinsics,
    /// Color stream parameters.
    pub camera_color: ColorStream,
    /// Depth stream parameters.
    pub camera_depth: DepthStream,
}

// ============================================================================
// DecodedFrame
// ============================================================================

/// A frame already decoded into raw sample buffers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecodedFrame {
    /// Color samples, in whatever layout the decoder produced.
    pub color: Vec<u8>,
    /// Depth samples as raw bytes.
    pub depth: Vec<u8>,
    /// Camera pose, row-major, in the client's left-handed space.
    pub transform: [[f64; 4]; 4],
}

impl DecodedFrame {
    /// Creates a frame from raw byte buffers.
    #[inline]
    #[must_use]
    pub fn new(color: Vec<u8>, depth: Vec<u8>, transform: [[f64; 4]; 4]) -> Self {
        Self {
            color,
            depth,
            transform,
        }
    }

    /// Creates a frame from typed depth samples (`f32` meters, `u16`
    /// millimeters, ...).
    ///
    /// Depth bytes are taken in native endianness.
    #[must_use]
    pub fn from_samples<T: bytemuck::Pod>(
        color: Vec<u8>,
        depth: &[T],
        transform: [[f64; 4]; 4],
    ) -> Self {
        Self::new(color, bytemuck::cast_slice::<T, u8>(depth).to_vec(), transform)
    }
}

// ============================================================================
// SessionEvent
// ============================================================================

/// An event delivered by the capture framework.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Session registration.
    Register(RegisterRequest),
    /// Decoded frame.
    Frame(DecodedFrame),
}

impl From<RegisterRequest> for SessionEvent {
    fn from(request: RegisterRequest) -> Self {
        Self::Register(request)
    }
}

impl From<DecodedFrame> for SessionEvent {
    fn from(frame: DecodedFrame) -> Self {
        Self::Frame(frame)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: [[f64; 4]; 4] = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];

    #[test]
    fn test_register_request_deserialization() {
        let json_str = r#"{
            "objectPosition": "1.0,2.0,3.0",
            "cameraIntrinsics": {
                "focalLengthX": 1000.0,
                "focalLengthY": 1000.0,
                "principalPointX": 500.0,
                "principalPointY": 400.0
            },
            "cameraColor": { "resizeFactorX": 0.5, "resizeFactorY": 0.5 },
            "cameraDepth": { "resolutionX": 640, "resolutionY": 480 }
        }"#;

        let request: RegisterRequest = serde_json::from_str(json_str).expect("parse");
        assert_eq!(request.object_position, "1.0,2.0,3.0");
        assert_eq!(request.camera_intrinsics.principal_point_y, 400.0);
        assert_eq!(request.camera_color.resize_factor_x, 0.5);
        assert_eq!(request.camera_depth.resolution(), (640, 480));
    }

    #[test]
    fn test_register_request_requires_color_stream() {
        let json_str = r#"{
            "objectPosition": "0,0,0",
            "cameraIntrinsics": {
                "focalLengthX": 1.0,
                "focalLengthY": 1.0,
                "principalPointX": 1.0,
                "principalPointY": 1.0
            },
            "cameraDepth": { "resolutionX": 1, "resolutionY": 1 }
        }"#;

        let err = serde_json::from_str::<RegisterRequest>(json_str).unwrap_err();
        assert!(err.to_string().contains("cameraColor"), "{err}");
    }

    #[test]
    fn test_from_samples_keeps_native_bytes() {
        let depth = [1.5f32, -0.25];
        let frame = DecodedFrame::from_samples(vec![1, 2, 3], &depth, IDENTITY);

        let mut expected = Vec::new();
        for sample in depth {
            expected.extend_from_slice(&sample.to_ne_bytes());
        }
        assert_eq!(frame.depth, expected);
        assert_eq!(frame.color, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_samples_accepts_integer_depth() {
        let depth = [1200u16, 0, u16::MAX];
        let frame = DecodedFrame::from_samples(Vec::new(), &depth, IDENTITY);

        let expected: Vec<u8> = depth.iter().flat_map(|d| d.to_ne_bytes()).collect();
        assert_eq!(frame.depth, expected);
        assert_eq!(frame.depth.len(), 6);
    }

    #[test]
    fn test_session_event_from() {
        let frame = DecodedFrame::new(Vec::new(), Vec::new(), IDENTITY);
        assert!(matches!(SessionEvent::from(frame), SessionEvent::Frame(_)));
    }
}
