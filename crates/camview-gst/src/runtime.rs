use camview_core::ViewerError;
use gstreamer as gst;
use tracing::{debug, info};

/// GStreamer initialised for the lifetime of this value.
///
/// Create it before any pipeline and keep it alive until every pipeline has
/// been dropped; `main` holds it as its first local so it is dropped last.
pub struct GstRuntime {
    _private: (),
}

impl GstRuntime {
    pub fn init() -> Result<Self, ViewerError> {
        gst::init().map_err(|e| ViewerError::open(format!("GStreamer init failed: {e}")))?;
        let (major, minor, micro, _) = gst::version();
        info!("GStreamer {}.{}.{} initialised", major, minor, micro);
        Ok(Self { _private: () })
    }
}

impl Drop for GstRuntime {
    fn drop(&mut self) {
        debug!("GStreamer deinit");
        // SAFETY: only `GstRuntime::init` creates this value and every
        // pipeline created under it is dropped first.
        unsafe { gst::deinit() };
    }
}
