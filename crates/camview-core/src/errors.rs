use thiserror::Error;

/// Every failure is terminal for the run; nothing is retried.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Invalid mode '{token}'. Use 'cpu' or 'gpu'.")]
    InvalidMode { token: String },

    #[error("Unable to open pipeline: {reason}")]
    OpenFailure { reason: String },

    #[error("Captured empty frame")]
    EmptyFrame,

    #[error("GStreamer error: {message}")]
    EngineError { message: String },

    #[error("Pipeline process exited with status {status}")]
    LaunchFailure { status: i32 },

    #[error("Display error: {reason}")]
    DisplayFailure { reason: String },

    #[error("Unsupported pixel format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Configuration invalid: {reason}")]
    Config { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    pub fn open(reason: impl Into<String>) -> Self {
        Self::OpenFailure { reason: reason.into() }
    }

    pub fn display(reason: impl Into<String>) -> Self {
        Self::DisplayFailure { reason: reason.into() }
    }
}
