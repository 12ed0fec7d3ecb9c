use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ViewerError;
use crate::types::Resolution;

/// How the `gpu` mode drives its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcceleratedStrategy {
    /// Parse the descriptor in-process and poll the bus.
    #[default]
    InProcess,
    /// Run `gst-launch-1.0` as a child process and wait for it.
    Spawn,
}

/// Viewer settings. Defaults reproduce the fixed libcamera pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Source element, optionally with properties (`v4l2src device=/dev/video0`).
    pub source: String,
    #[serde(alias = "captureFormat")]
    pub capture_format: String,
    #[serde(alias = "captureResolution")]
    pub capture_resolution: Resolution,
    /// Size of the BGR frames handed to the window in `cpu` mode.
    #[serde(alias = "outputResolution")]
    pub output_resolution: Resolution,
    #[serde(alias = "busPollIntervalMs")]
    pub bus_poll_interval_ms: u64,
    #[serde(alias = "keyWaitMs")]
    pub key_wait_ms: u64,
    #[serde(alias = "windowTitle")]
    pub window_title: Option<String>,
    #[serde(alias = "acceleratedStrategy")]
    pub accelerated_strategy: AcceleratedStrategy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: "libcamerasrc".to_string(),
            capture_format: "NV12".to_string(),
            capture_resolution: Resolution::HD,
            output_resolution: Resolution::VGA,
            bus_poll_interval_ms: 100,
            key_wait_ms: 1,
            window_title: None,
            accelerated_strategy: AcceleratedStrategy::InProcess,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ViewerError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ViewerError::Config { reason: e.to_string() })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        let invalid = |reason: &str| Err(ViewerError::Config { reason: reason.to_string() });
        if self.source.trim().is_empty() {
            return invalid("source element must not be empty");
        }
        if self.capture_format.trim().is_empty() {
            return invalid("capture format must not be empty");
        }
        if self.capture_resolution.is_zero() || self.output_resolution.is_zero() {
            return invalid("resolutions must be non-zero");
        }
        if self.bus_poll_interval_ms == 0 {
            return invalid("bus poll interval must be positive");
        }
        Ok(())
    }

    pub fn bus_poll_interval(&self) -> Duration {
        Duration::from_millis(self.bus_poll_interval_ms)
    }

    pub fn key_wait(&self) -> Duration {
        Duration::from_millis(self.key_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{AcceleratedStrategy, ViewerConfig};
    use crate::errors::ViewerError;
    use crate::types::Resolution;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "source": "v4l2src device=/dev/video2",
            "captureResolution": {"width": 1920, "height": 1080},
            "busPollIntervalMs": 50,
            "keyWaitMs": 10,
            "acceleratedStrategy": "spawn"
        }"#;

        let cfg = ViewerConfig::from_json_str(json).expect("valid camelCase config");
        assert_eq!(cfg.source, "v4l2src device=/dev/video2");
        assert_eq!(cfg.capture_resolution, Resolution::new(1920, 1080));
        assert_eq!(cfg.bus_poll_interval_ms, 50);
        assert_eq!(cfg.key_wait_ms, 10);
        assert_eq!(cfg.accelerated_strategy, AcceleratedStrategy::Spawn);
        assert_eq!(cfg.output_resolution, Resolution::VGA);
    }

    #[test]
    fn deserializes_snake_case_fields() {
        let json = r#"{
            "output_resolution": {"width": 320, "height": 240},
            "bus_poll_interval_ms": 200,
            "window_title": "Front camera"
        }"#;

        let cfg = ViewerConfig::from_json_str(json).expect("valid snake_case config");
        assert_eq!(cfg.output_resolution, Resolution::new(320, 240));
        assert_eq!(cfg.bus_poll_interval_ms, 200);
        assert_eq!(cfg.window_title.as_deref(), Some("Front camera"));
        assert_eq!(cfg.source, "libcamerasrc");
    }

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ViewerConfig::from_json_str("{ not json"),
            Err(ViewerError::Config { .. })
        ));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"busPollIntervalMs": 0}"#),
            Err(ViewerError::Config { .. })
        ));
    }

    #[test]
    fn rejects_zero_resolution() {
        let cfg = ViewerConfig {
            output_resolution: Resolution::new(0, 480),
            ..ViewerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
