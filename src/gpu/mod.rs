//! GPU presentation of the software canvas.
//!
//! Owns the wgpu device and window surface and runs a full-screen pass that
//! copies a [`PixelCanvas`](crate::surface::PixelCanvas) to the window.

/// Window surface, canvas upload and full-screen blit.
pub mod present;
/// GPU texture mirroring the CPU canvas.
pub mod texture;
