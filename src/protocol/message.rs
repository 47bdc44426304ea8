//! Outbound messages to the visualization consumer.
//!
//! Every message is one JSON text frame with a `type` discriminator.

// ============================================================================
// Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Sensor intrinsics of the bundled sample frame (`fx, fy, cx, cy, skew`).
const TEMPLATE_INTRINSICS: [f64; 5] = [
    1363.1690673828125,
    1363.1690673828125,
    956.9332275390625,
    725.69940185546875,
    0.0,
];

/// Image label of the bundled sample frame.
const TEMPLATE_IMAGE: &str = "test_data/frame_0.jpg";

/// Timestamp of the bundled sample frame.
const TEMPLATE_TIMESTAMP: f64 = 119035.448430708;

/// Depth label of the bundled sample frame.
const TEMPLATE_DEPTH: &str = "test_data/depth_0.bin";

// ============================================================================
// FrameMetadata
// ============================================================================

/// Metadata attached to every frame message.
///
/// Starts out as a template describing a bundled sample frame. Only the
/// object position (at registration) and the pose and resolutions (per
/// frame) are ever refreshed; the other fields go out unchanged.
///
/// # Format
///
/// ```json
/// {
///   "intrinsics": [fx, fy, cx, cy, skew],
///   "image": "test_data/frame_0.jpg",
///   "timestamp": 119035.448430708,
///   "depth": "test_data/depth_0.bin",
///   "objPosition": [x, y, z],
///   "pose4x4": [16 values],
///   "resolution": [w, h],
///   "depthResolution": [w, h]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMetadata {
    /// Sensor intrinsics list.
    pub intrinsics: Vec<f64>,

    /// Reference image label.
    pub image: String,

    /// Reference timestamp.
    pub timestamp: f64,

    /// Reference depth file label.
    pub depth: String,

    /// Object position in right-handed space.
    pub obj_position: [f64; 3],

    /// Latest pose, converted, transposed and flattened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose4x4: Option<[f64; 16]>,

    /// Latest color resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<(u32, u32)>,

    /// Latest depth resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_resolution: Option<(u32, u32)>,
}

impl Default for FrameMetadata {
    fn default() -> Self {
        Self {
            intrinsics: TEMPLATE_INTRINSICS.to_vec(),
            image: TEMPLATE_IMAGE.to_string(),
            timestamp: TEMPLATE_TIMESTAMP,
            depth: TEMPLATE_DEPTH.to_string(),
            obj_position: [0.0; 3],
            pose4x4: None,
            resolution: None,
            depth_resolution: None,
        }
    }
}

// ============================================================================
// OutboundMessage
// ============================================================================

/// A message sent from the relay to the consumer.
///
/// # Format
///
/// ```json
/// {"type": "initialize", "rgbResolution": [w, h], "depthResolution": [w, h], "intrinsics": [fx, fy, cx, cy]}
/// {"type": "frame", "metadata": {...}, "rgbResolution": [w, h], "rgbImage": "<base64>", "depthData": "<base64>"}
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage<'a> {
    /// Session initialization, sent once per registration.
    #[serde(rename_all = "camelCase")]
    Initialize {
        /// Color resolution.
        rgb_resolution: (u32, u32),
        /// Depth resolution.
        depth_resolution: (u32, u32),
        /// Scaled `[fx, fy, cx, cy]`.
        intrinsics: [f64; 4],
    },

    /// One captured frame.
    #[serde(rename_all = "camelCase")]
    Frame {
        /// Session metadata with the latest pose.
        metadata: &'a FrameMetadata,
        /// Color resolution.
        rgb_resolution: (u32, u32),
        /// Base64 color bytes.
        rgb_image: String,
        /// Base64 depth bytes.
        depth_data: String,
    },
}

impl<'a> OutboundMessage<'a> {
    /// Creates a frame message, base64-encoding both buffers verbatim.
    #[must_use]
    pub fn frame(
        metadata: &'a FrameMetadata,
        rgb_resolution: (u32, u32),
        color: &[u8],
        depth: &[u8],
    ) -> Self {
        Self::Frame {
            metadata,
            rgb_resolution,
            rgb_image: Base64Standard.encode(color),
            depth_data: Base64Standard.encode(depth),
        }
    }

    /// Returns the wire `type` value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::Frame { .. } => "frame",
        }
    }

    /// Serializes to a JSON text payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    #[test]
    fn test_initialize_serialization() {
        let message = OutboundMessage::Initialize {
            rgb_resolution: (640, 480),
            depth_resolution: (640, 480),
            intrinsics: [500.0, 500.0, 250.0, 200.0],
        };

        let value: Value = serde_json::from_str(&message.to_json().expect("serialize")).expect("parse");
        assert_eq!(
            value,
            json!({
                "type": "initialize",
                "rgbResolution": [640, 480],
                "depthResolution": [640, 480],
                "intrinsics": [500.0, 500.0, 250.0, 200.0]
            })
        );
    }

    #[test]
    fn test_frame_serialization() {
        let metadata = FrameMetadata {
            pose4x4: Some([0.0; 16]),
            resolution: Some((2, 1)),
            depth_resolution: Some((2, 1)),
            ..FrameMetadata::default()
        };
        let message = OutboundMessage::frame(&metadata, (2, 1), b"rgb", &[0, 255]);
        assert_eq!(message.kind(), "frame");

        let value: Value = serde_json::from_str(&message.to_json().expect("serialize")).expect("parse");
        assert_eq!(value["type"], "frame");
        assert_eq!(value["rgbResolution"], json!([2, 1]));
        assert_eq!(value["rgbImage"], "cmdi");
        assert_eq!(value["depthData"], "AP8=");
        assert_eq!(value["metadata"]["image"], "test_data/frame_0.jpg");
        assert_eq!(value["metadata"]["depthResolution"], json!([2, 1]));
        assert_eq!(value["metadata"]["pose4x4"].as_array().map(Vec::len), Some(16));
    }

    #[test]
    fn test_default_metadata_omits_frame_fields() {
        let value = serde_json::to_value(FrameMetadata::default()).expect("serialize");
        let object = value.as_object().expect("object");

        assert_eq!(object.len(), 5);
        assert_eq!(value["intrinsics"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["timestamp"], 119035.448430708);
        assert_eq!(value["objPosition"], json!([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_metadata_template_from_json() {
        let json_str = r#"{
            "intrinsics": [1.0, 2.0, 3.0, 4.0, 0.0],
            "image": "live.jpg",
            "timestamp": 1.5,
            "depth": "live.bin",
            "objPosition": [0.0, 0.0, 0.0]
        }"#;

        let metadata: FrameMetadata = serde_json::from_str(json_str).expect("parse");
        assert_eq!(metadata.image, "live.jpg");
        assert!(metadata.pose4x4.is_none());
    }
}
