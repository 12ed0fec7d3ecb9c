//! Pipeline descriptors handed to GStreamer.
//!
//! ```text
//! cpu: source ! caps ! videoconvert ! videoscale ! video/x-raw,format=BGR ! appsink name=sink max-buffers=2 drop=true
//! gpu: source ! caps ! glupload ! glcolorconvert ! glcolorscale ! glimagesink
//! ```

use crate::config::ViewerConfig;
use crate::mode::Mode;

/// Prefix used when the descriptor runs as an external process.
pub const LAUNCH_PROGRAM: &str = "gst-launch-1.0";

/// Textual pipeline description, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDescriptor(String);

impl PipelineDescriptor {
    /// Name of the appsink the `cpu` pipeline ends in.
    pub const APPSINK_NAME: &'static str = "sink";

    pub fn for_mode(mode: Mode, config: &ViewerConfig) -> Self {
        let capture = config.capture_resolution;
        let source = format!(
            "{} ! video/x-raw,format={},width={},height={}",
            config.source.trim(),
            config.capture_format,
            capture.width,
            capture.height,
        );

        let descriptor = match mode {
            Mode::Local => {
                let output = config.output_resolution;
                format!(
                    "{source} ! videoconvert ! videoscale \
                     ! video/x-raw,width={},height={},format=BGR \
                     ! appsink name={} max-buffers=2 drop=true",
                    output.width,
                    output.height,
                    Self::APPSINK_NAME,
                )
            }
            Mode::Accelerated => {
                format!("{source} ! glupload ! glcolorconvert ! glcolorscale ! glimagesink")
            }
        };
        Self(descriptor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Element factory names in order, skipping caps filters and properties.
    pub fn element_names(&self) -> Vec<&str> {
        self.0
            .split('!')
            .filter_map(|segment| segment.split_whitespace().next())
            .filter(|name| !name.contains('/') && !name.contains('='))
            .collect()
    }

    /// Shell command line running this pipeline out of process.
    pub fn launch_command(&self) -> String {
        format!("{LAUNCH_PROGRAM} {}", self.0)
    }
}

impl std::fmt::Display for PipelineDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineDescriptor;
    use crate::config::ViewerConfig;
    use crate::mode::Mode;
    use crate::types::Resolution;

    #[test]
    fn default_cpu_descriptor() {
        let d = PipelineDescriptor::for_mode(Mode::Local, &ViewerConfig::default());
        assert_eq!(
            d.as_str(),
            "libcamerasrc ! video/x-raw,format=NV12,width=1280,height=720 \
             ! videoconvert ! videoscale \
             ! video/x-raw,width=640,height=480,format=BGR \
             ! appsink name=sink max-buffers=2 drop=true"
        );
    }

    #[test]
    fn default_gpu_descriptor() {
        let d = PipelineDescriptor::for_mode(Mode::Accelerated, &ViewerConfig::default());
        assert_eq!(
            d.as_str(),
            "libcamerasrc ! video/x-raw,format=NV12,width=1280,height=720 \
             ! glupload ! glcolorconvert ! glcolorscale ! glimagesink"
        );
    }

    #[test]
    fn descriptor_is_deterministic() {
        let cfg = ViewerConfig::default();
        for mode in [Mode::Local, Mode::Accelerated] {
            assert_eq!(
                PipelineDescriptor::for_mode(mode, &cfg),
                PipelineDescriptor::for_mode(mode, &cfg)
            );
        }
    }

    #[test]
    fn descriptor_reflects_config() {
        let cfg = ViewerConfig {
            source: "v4l2src device=/dev/video1".into(),
            capture_format: "YUY2".into(),
            capture_resolution: Resolution::new(1920, 1080),
            output_resolution: Resolution::new(320, 240),
            ..ViewerConfig::default()
        };
        let d = PipelineDescriptor::for_mode(Mode::Local, &cfg);
        assert!(d.as_str().starts_with("v4l2src device=/dev/video1 ! video/x-raw,format=YUY2,width=1920,height=1080"));
        assert!(d.as_str().contains("width=320,height=240,format=BGR"));
    }

    #[test]
    fn element_names_skip_caps() {
        let d = PipelineDescriptor::for_mode(Mode::Local, &ViewerConfig::default());
        assert_eq!(d.element_names(), vec!["libcamerasrc", "videoconvert", "videoscale", "appsink"]);

        let d = PipelineDescriptor::for_mode(Mode::Accelerated, &ViewerConfig::default());
        assert_eq!(
            d.element_names(),
            vec!["libcamerasrc", "glupload", "glcolorconvert", "glcolorscale", "glimagesink"]
        );
    }

    #[test]
    fn launch_command_prefixes_gst_launch() {
        let d = PipelineDescriptor::for_mode(Mode::Accelerated, &ViewerConfig::default());
        let cmd = d.launch_command();
        assert!(cmd.starts_with("gst-launch-1.0 libcamerasrc"));
        assert!(cmd.ends_with("glimagesink"));
    }
}
