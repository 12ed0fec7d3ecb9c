use camview_core::PipelineDescriptor;
use gstreamer as gst;
use tracing::debug;

pub fn has_element(name: &str) -> bool {
    gst::ElementFactory::find(name).is_some()
}

/// Element factories the descriptor needs that are not installed.
pub fn missing_elements(descriptor: &PipelineDescriptor) -> Vec<String> {
    descriptor
        .element_names()
        .into_iter()
        .filter(|name| {
            let found = has_element(name);
            if !found {
                debug!("GStreamer element '{}' not found", name);
            }
            !found
        })
        .map(str::to_string)
        .collect()
}
