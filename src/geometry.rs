//! Handedness conversion for poses and transforms.
//!
//! Capture clients report poses in a left-handed, Y-up space. The
//! visualization consumer works in a right-handed space with the same X and
//! Y axes and Z pointing toward the viewer.
//!
//! Inbound matrices arrive as row-major `[[f64; 4]; 4]` (`rows[r][c]`).
//! `glam` stores matrices column-major, so every crossing between the two
//! layouts goes through [`pose_from_rows`] or [`flatten_row_major`].

// ============================================================================
// Imports
// ============================================================================

use glam::{DMat4, DVec3, DVec4};

// ============================================================================
// Constants
// ============================================================================

/// `diag(1, 1, -1, 1)`: mirrors the Z axis.
const FLIP_Z: DMat4 = DMat4::from_cols(DVec4::X, DVec4::Y, DVec4::NEG_Z, DVec4::W);

// ============================================================================
// Conversion
// ============================================================================

/// Converts a 4×4 transform from left-handed Y-up to right-handed space.
///
/// Computes `F · m · F` with `F = diag(1, 1, -1, 1)`. This negates the
/// coupling between Z and the other axes (row 2 and column 2, excluding the
/// `[2][2]` entry) and the Z translation. The operation is its own inverse.
#[inline]
#[must_use]
pub fn convert(matrix: &DMat4) -> DMat4 {
    FLIP_Z * *matrix * FLIP_Z
}

/// Builds a translation-only transform.
#[inline]
#[must_use]
pub fn translation_matrix(translation: DVec3) -> DMat4 {
    DMat4::from_translation(translation)
}

/// Reads the translation column of a transform.
#[inline]
#[must_use]
pub fn translation_of(matrix: &DMat4) -> DVec3 {
    matrix.w_axis.truncate()
}

/// Builds a matrix from row-major rows.
#[inline]
#[must_use]
pub fn pose_from_rows(rows: &[[f64; 4]; 4]) -> DMat4 {
    // Columns of the transpose are the rows we were given.
    DMat4::from_cols_array_2d(rows).transpose()
}

/// Flattens a matrix row by row into 16 values.
#[inline]
#[must_use]
pub fn flatten_row_major(matrix: &DMat4) -> [f64; 16] {
    matrix.transpose().to_cols_array()
}

// ============================================================================
// Tests
// ============================================================================
