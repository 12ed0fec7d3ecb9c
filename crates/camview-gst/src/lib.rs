//! camview-gst — GStreamer collaborators for the camera viewer.
//!
//! # Pieces
//! - [`GstRuntime`]: process-wide `gst::init` / `gst::deinit`, scoped to `main`.
//! - [`AppSinkCapture`]: `cpu` mode, pulls BGR frames from `appsink name=sink`.
//! - [`AppSrcWindow`]: `cpu` mode, pushes frames into `appsrc ! videoconvert ! autovideosink`.
//! - [`BusEngine`]: `gpu` mode, runs the GL pipeline and polls its bus.
//! - [`launch`]: `gpu` mode alternative, runs `gst-launch-1.0` out of process.

mod backend;
mod capture;
mod display;
mod elements;
mod engine;
mod launcher;
mod runtime;

pub use backend::GstBackend;
pub use capture::AppSinkCapture;
pub use display::AppSrcWindow;
pub use elements::{has_element, missing_elements};
pub use engine::BusEngine;
pub use launcher::launch;
pub use runtime::GstRuntime;
