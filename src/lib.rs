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
// Function signature hygiene
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

//! New Year fireworks canvas with a countdown clock.
//!
//! The heart of the crate is a particle animation loop: every frame the
//! render surface is dimmed with a translucent fill, live particles are drawn
//! and advanced (velocity decays by a friction factor, opacity by a fixed
//! step), expired particles are dropped, and with a small per-frame
//! probability a new burst ignites somewhere on the surface.
//!
//! # Key entry points
//!
//! - [`engine::AnimationEngine`] - particle state and the per-frame `step`
//! - [`engine::FireworksTask`] - owns an engine, a render surface and a host,
//!   and drives the Running/Stopped lifecycle
//! - [`surface::RenderSurface`] - the five drawing primitives the engine uses
//! - [`host::AnimationHost`] - frame scheduling and resize subscription
//! - [`countdown::Countdown`] - time remaining until the next New Year
//! - [`options::Options`] - tunables with TOML load/save
//!
//! # Hosts
//!
//! With the `viewer` feature, `Viewer` opens a winit window and presents a
//! software [`surface::PixelCanvas`] through wgpu. With the `web` feature,
//! `web::start` mounts the same loop on an HTML canvas driven by
//! `requestAnimationFrame`.

pub mod color;
pub mod countdown;
pub mod engine;
mod error;
#[cfg(feature = "viewer")]
pub mod gpu;
pub mod host;
pub mod options;
pub mod surface;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use error::FireworksError;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
