use std::time::Duration;

use camview_core::{Key, KeyPoller, PipelineDescriptor, ViewerBackend, ViewerError};

use crate::capture::AppSinkCapture;
use crate::display::AppSrcWindow;
use crate::engine::BusEngine;
use crate::launcher;
use crate::elements::missing_elements;

/// Real backend: GStreamer for media, `K` for quit keys.
pub struct GstBackend<K: KeyPoller> {
    keys: K,
}

impl<K: KeyPoller> GstBackend<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    fn ensure_elements(descriptor: &PipelineDescriptor) -> Result<(), ViewerError> {
        let missing = missing_elements(descriptor);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ViewerError::open(format!("missing GStreamer elements: {}", missing.join(", "))))
        }
    }
}

impl<K: KeyPoller> ViewerBackend for GstBackend<K> {
    type Source = AppSinkCapture;
    type Display = AppSrcWindow;
    type Engine = BusEngine;

    fn open_capture(&mut self, descriptor: &PipelineDescriptor) -> Result<AppSinkCapture, ViewerError> {
        Self::ensure_elements(descriptor)?;
        AppSinkCapture::open(descriptor)
    }

    fn open_window(&mut self, title: &str) -> Result<AppSrcWindow, ViewerError> {
        AppSrcWindow::open(title)
    }

    fn open_engine(&mut self, descriptor: &PipelineDescriptor) -> Result<BusEngine, ViewerError> {
        Self::ensure_elements(descriptor)?;
        BusEngine::open(descriptor)
    }

    fn launch(&mut self, command: &str) -> Result<i32, ViewerError> {
        launcher::launch(command)
    }

    fn poll_key(&mut self, wait: Duration) -> Option<Key> {
        self.keys.poll_key(wait)
    }

    fn end_input(&mut self) {
        self.keys.end_input();
    }
}
