use bytes::Bytes;
use camview_core::{Frame, FrameSource, PipelineDescriptor, PixelFormat, Release, ViewerError};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use tracing::{debug, info};

/// Pull-based capture over a pipeline ending in `appsink name=sink`.
///
/// `read` blocks inside `pull_sample`; the appsink's own queue bounds it.
pub struct AppSinkCapture {
    pipeline: gst::Pipeline,
    appsink: AppSink,
    opened: bool,
}

impl AppSinkCapture {
    /// Build the pipeline and start it. Requires [`crate::GstRuntime`].
    pub fn open(descriptor: &PipelineDescriptor) -> Result<Self, ViewerError> {
        let pipeline = gst::parse::launch(descriptor.as_str())
            .map_err(|e| ViewerError::open(e.to_string()))?
            .downcast::<gst::Pipeline>()
            .map_err(|_| ViewerError::open("Not a pipeline"))?;

        let appsink = pipeline
            .by_name(PipelineDescriptor::APPSINK_NAME)
            .and_then(|element| element.downcast::<AppSink>().ok())
            .ok_or_else(|| ViewerError::open("No appsink named 'sink'"))?;

        let opened = match pipeline.set_state(gst::State::Playing) {
            Ok(_) => true,
            Err(e) => {
                debug!("Capture pipeline refused Playing: {}", e);
                false
            }
        };

        info!("AppSinkCapture ready (opened={})", opened);
        Ok(Self { pipeline, appsink, opened })
    }
}

impl FrameSource for AppSinkCapture {
    fn is_opened(&self) -> bool {
        self.opened
    }

    fn read(&mut self) -> Result<Frame, ViewerError> {
        // EOS or a flushing pipeline both surface as a failed pull.
        let Ok(sample) = self.appsink.pull_sample() else {
            debug!("appsink returned no sample");
            return Ok(Frame::empty());
        };

        let (Some(caps), Some(buffer)) = (sample.caps(), sample.buffer()) else {
            return Ok(Frame::empty());
        };
        let info = VideoInfo::from_caps(caps)
            .map_err(|e| ViewerError::EngineError { message: format!("bad caps: {e}") })?;
        let format_name = info.format().to_string();
        let format = PixelFormat::from_caps_name(&format_name)
            .ok_or(ViewerError::UnsupportedFormat { format: format_name })?;

        let map = buffer
            .map_readable()
            .map_err(|_| ViewerError::EngineError { message: "read map failed".into() })?;

        Ok(Frame::new(Bytes::copy_from_slice(map.as_slice()), info.width(), info.height(), format))
    }
}

impl Release for AppSinkCapture {
    fn release(&mut self) {
        debug!("Releasing capture pipeline");
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
