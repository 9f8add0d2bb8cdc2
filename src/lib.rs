// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test code may unwrap freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Camera fly-to, hover annotations and orbit controls for interactive 3D
//! campus maps.
//!
//! The crate owns the interactive part of a campus viewer and leaves scene
//! construction, meshes, lighting and the DOM to the host page.
//!
//! # Key entry points
//!
//! - [`CampusMap`] - the map context: commands in, frame reports out
//! - [`camera::focus::FocusController`] - time-bounded fly-to a building
//! - [`annotation::AnnotationProjector`] - hover overlays in screen space
//! - [`options::CampusOptions`] - TOML configuration and building layout
//!
//! # Frame loop
//!
//! Pointer events go through [`input::InputProcessor`] (or arrive as
//! [`MapCommand`]s directly from menus and the picking layer). Once per
//! display refresh the page calls [`CampusMap::frame`], which updates the
//! camera, re-projects visible annotations, and returns everything needed
//! to draw.

pub mod annotation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod loading;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use engine::{CampusMap, CommandEffect, FrameReport, MapCommand};
pub use error::{CampusError, UnknownBuildingError};
