use std::str::FromStr;

use crate::errors::ViewerError;

// MARK: - Mode

/// How decoded frames reach the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Frames are pulled into a CPU buffer and shown in a window (`cpu`).
    Local,
    /// A GL sink renders directly; the bus is polled for status (`gpu`).
    Accelerated,
}

impl Mode {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Local => "cpu",
            Self::Accelerated => "gpu",
        }
    }

    /// Prefix used for the window title and the FPS status line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "CPU Mode",
            Self::Accelerated => "GPU Mode",
        }
    }
}

impl FromStr for Mode {
    type Err = ViewerError;

    /// Exact, case-sensitive match.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "cpu" => Ok(Self::Local),
            "gpu" => Ok(Self::Accelerated),
            other => Err(ViewerError::InvalidMode { token: other.to_string() }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
