use std::time::Duration;

use camview_core::{BusEvent, PipelineDescriptor, PipelineEngine, Release, ViewerError};
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

/// Name of the application element message counted as a rendered frame.
pub const FRAME_RENDERED: &str = "frame-rendered";

/// A self-rendering pipeline driven by polling its bus.
pub struct BusEngine {
    pipeline: gst::Pipeline,
    bus: gst::Bus,
}

impl BusEngine {
    pub fn open(descriptor: &PipelineDescriptor) -> Result<Self, ViewerError> {
        Self::from_description(descriptor.as_str())
    }

    fn from_description(description: &str) -> Result<Self, ViewerError> {
        let pipeline = gst::parse::launch(description)
            .map_err(|e| ViewerError::open(format!("Failed to create GStreamer pipeline: {e}")))?
            .downcast::<gst::Pipeline>()
            .map_err(|_| ViewerError::open("Not a pipeline"))?;

        let bus = pipeline.bus().ok_or_else(|| ViewerError::open("No bus"))?;
        Ok(Self { pipeline, bus })
    }
}

impl PipelineEngine for BusEngine {
    fn play(&mut self) -> Result<(), ViewerError> {
        self.pipeline
            .set_state(gst::State::Playing)
            .map_err(|e| ViewerError::open(format!("Failed to start pipeline: {e}")))?;
        info!("BusEngine playing");
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Option<BusEvent> {
        let msg = self.bus.timed_pop_filtered(
            gst::ClockTime::from_mseconds(timeout.as_millis() as u64),
            &[gst::MessageType::Error, gst::MessageType::Eos, gst::MessageType::Element],
        )?;

        let event = match msg.view() {
            gst::MessageView::Error(err) => {
                debug!(
                    "Error from {:?}: {:?}",
                    err.src().map(|s| s.path_string()),
                    err.debug()
                );
                BusEvent::Error(err.error().to_string())
            }
            gst::MessageView::Eos(_) => BusEvent::EndOfStream,
            gst::MessageView::Element(_) => match msg.structure() {
                Some(s) if s.has_name(FRAME_RENDERED) => BusEvent::FrameRendered,
                _ => BusEvent::Other,
            },
            _ => {
                warn!("Unexpected bus message {:?}", msg.type_());
                BusEvent::Other
            }
        };
        Some(event)
    }
}

impl Release for BusEngine {
    fn release(&mut self) {
        debug!("Releasing render pipeline");
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use camview_core::{BusEvent, PipelineEngine};
    use gstreamer as gst;

    use super::{BusEngine, FRAME_RENDERED};

    const WAIT: Duration = Duration::from_millis(100);

    #[test]
    fn translates_posted_bus_messages() {
        if gst::init().is_err() {
            return;
        }
        let Ok(mut engine) = BusEngine::from_description("fakesrc num-buffers=1 ! fakesink") else {
            return;
        };
        engine.bus.set_flushing(false);

        let messages = [
            gst::message::Element::new(gst::Structure::new_empty(FRAME_RENDERED)),
            gst::message::Element::new(gst::Structure::new_empty("prepare-window-handle")),
            gst::message::Error::new(gst::CoreError::Failed, "camera unplugged"),
            gst::message::Eos::new(),
        ];
        for msg in messages {
            engine.bus.post(msg).expect("bus accepts message");
        }

        assert_eq!(engine.poll(WAIT), Some(BusEvent::FrameRendered));
        assert_eq!(engine.poll(WAIT), Some(BusEvent::Other));
        assert_eq!(engine.poll(WAIT), Some(BusEvent::Error("camera unplugged".into())));
        assert_eq!(engine.poll(WAIT), Some(BusEvent::EndOfStream));
        assert_eq!(engine.poll(Duration::ZERO), None);
    }
}
