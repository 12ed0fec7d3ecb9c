use camview_core::{Frame, FrameDisplay, PixelFormat, Release, ViewerError};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app::{AppSrc, AppStreamType};
use tracing::{debug, info};

const DISPLAY_PIPELINE: &str = "\
    appsrc name=frames is-live=true format=time do-timestamp=true \
    ! videoconvert \
    ! autovideosink sync=false";

/// On-screen window fed with CPU frames.
///
/// Caps are (re)negotiated whenever the incoming frame layout changes.
pub struct AppSrcWindow {
    pipeline: gst::Pipeline,
    appsrc: AppSrc,
    bus: gst::Bus,
    title: String,
    layout: Option<(PixelFormat, u32, u32)>,
}

impl AppSrcWindow {
    pub fn open(title: &str) -> Result<Self, ViewerError> {
        let pipeline = gst::parse::launch(DISPLAY_PIPELINE)
            .map_err(|e| ViewerError::display(e.to_string()))?
            .downcast::<gst::Pipeline>()
            .map_err(|_| ViewerError::display("Not a pipeline"))?;

        let appsrc = pipeline
            .by_name("frames")
            .and_then(|element| element.downcast::<AppSrc>().ok())
            .ok_or_else(|| ViewerError::display("No appsrc"))?;
        appsrc.set_stream_type(AppStreamType::Stream);

        let bus = pipeline.bus().ok_or_else(|| ViewerError::display("No bus"))?;

        pipeline
            .set_state(gst::State::Playing)
            .map_err(|_| ViewerError::display("Failed to start display pipeline"))?;

        info!("Window '{}' opened", title);
        Ok(Self { pipeline, appsrc, bus, title: title.to_string(), layout: None })
    }

    fn negotiate(&mut self, frame: &Frame) {
        let layout = (frame.format, frame.width, frame.height);
        if self.layout == Some(layout) {
            return;
        }

        let caps = gst::Caps::builder("video/x-raw")
            .field("format", frame.format.caps_name())
            .field("width", frame.width as i32)
            .field("height", frame.height as i32)
            .field("framerate", gst::Fraction::new(0, 1))
            .build();
        debug!("Window caps: {}", caps);
        self.appsrc.set_caps(Some(&caps));

        if self.layout.is_none() {
            // Video sinks use the title tag for their window decoration.
            let mut tags = gst::TagList::new();
            tags.make_mut()
                .add::<gst::tags::Title>(&self.title.as_str(), gst::TagMergeMode::Replace);
            if !self.appsrc.send_event(gst::event::Tag::new(tags)) {
                debug!("Window title tag not accepted");
            }
        }
        self.layout = Some(layout);
    }
}

impl FrameDisplay for AppSrcWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), ViewerError> {
        if let Some(msg) = self.bus.pop_filtered(&[gst::MessageType::Error]) {
            if let gst::MessageView::Error(err) = msg.view() {
                return Err(ViewerError::display(err.error().to_string()));
            }
        }

        self.negotiate(frame);
        let buffer = gst::Buffer::from_slice(frame.data.clone());
        self.appsrc
            .push_buffer(buffer)
            .map_err(|e| ViewerError::display(format!("appsrc push failed: {e:?}")))?;
        Ok(())
    }
}

impl Release for AppSrcWindow {
    fn release(&mut self) {
        debug!("Closing window '{}'", self.title);
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
