//! Utility helpers for tests.
//!
//! Recording bodies, tracked objects and canned force contexts shared by the
//! unit and integration suites.

pub mod bodies;
pub mod contexts;

pub use bodies::{RecordingBody, TestObject};

use glam::DVec3;

/// Assert that `actual` matches `expected` component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors if any component differs by more than `epsilon`.
pub fn assert_vec_close(actual: DVec3, expected: DVec3, epsilon: f64) {
    let difference = (actual - expected).abs();
    assert!(
        difference.max_element() <= epsilon,
        "{actual} differs from {expected} by more than {epsilon}"
    );
}
