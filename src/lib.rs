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
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive island timeline: a ring of houses around a floating island,
//! each one a stop on a history timeline, with an eased camera flight
//! between stops and click-to-visit picking.
//!
//! The crate is headless. It owns the scene graph, the camera and the
//! timeline state, and hands back a camera pose each frame; drawing is the
//! embedder's business.
//!
//! # Key entry points
//!
//! - [`engine::IsleEngine`] - owns everything; takes commands and ticks
//! - [`timeline::TimelineNavigator`] - the only mutator of the current stop
//! - [`camera::CameraAnimator`] - eased flights, at most one at a time
//! - [`picking::SelectionResolver`] - maps a clicked node to a stop index
//! - [`options::Options`] - runtime configuration loaded from TOML
//!
//! # Frame flow
//!
//! Input events become [`IsleCommand`]s through the
//! [`input::InputProcessor`]. Each frame the embedder calls
//! [`IsleEngine::update`], which fires the intro visit when due, runs the
//! ambient motion over the [`scene::SceneGraph`], then advances either the
//! active flight or the orbit controller.

pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod timeline;
pub mod tour;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use engine::{FrameState, IsleCommand, IsleEngine};
pub use error::IsleError;
pub use options::Options;
pub use timeline::{InfoPanel, LogPanel, Timeline};
