pub mod config;
pub mod errors;
pub mod fps;
pub mod mode;
pub mod pipeline;
pub mod session;
pub mod types;
pub mod viewer;

pub use config::{AcceleratedStrategy, ViewerConfig};
pub use errors::ViewerError;
pub use fps::{FpsMeter, StatusLine};
pub use mode::Mode;
pub use pipeline::PipelineDescriptor;
pub use session::{BusEvent, FrameDisplay, FrameSource, Key, KeyPoller, PipelineEngine, Release, SessionGuard, ViewerBackend};
pub use types::*;
pub use viewer::{RunOutcome, Viewer};
