//! Camera system for the campus view.
//!
//! Provides the perspective camera and screen projection, the fly-to focus
//! controller, and orbit-style user control with a clamped pan region.

/// Perspective camera, camera state, viewport and projection helpers.
pub mod core;
/// Time-bounded fly-to toward a building.
pub mod focus;
/// User drag rotate/pan/zoom with limits and inertia.
pub mod orbit;
