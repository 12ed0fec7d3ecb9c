use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::errors::ViewerError;
use crate::pipeline::PipelineDescriptor;
use crate::types::Frame;

// MARK: - Release

/// A resource that must be handed back exactly once.
pub trait Release {
    fn release(&mut self);
}

/// Owns a session resource and releases it when dropped.
///
/// Every exit from a run (quit, error, end-of-stream) goes through `Drop`, so
/// the resource is released once and only once.
pub struct SessionGuard<T: Release> {
    inner: T,
}

impl<T: Release> SessionGuard<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Release> Deref for SessionGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Release> DerefMut for SessionGuard<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: Release> Drop for SessionGuard<T> {
    fn drop(&mut self) {
        self.inner.release();
    }
}

// MARK: - Collaborators

/// Pull-based capture that yields decoded frames.
pub trait FrameSource: Release {
    fn is_opened(&self) -> bool;

    /// Blocks for the next frame. An empty frame means the capture is done.
    fn read(&mut self) -> Result<Frame, ViewerError>;
}

/// A named window frames are shown in.
pub trait FrameDisplay: Release {
    fn show(&mut self, frame: &Frame) -> Result<(), ViewerError>;
}

/// Events of interest reported on the pipeline bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Error(String),
    EndOfStream,
    /// Element message named `frame-rendered`.
    FrameRendered,
    Other,
}

/// A pipeline that renders by itself and reports through its bus.
pub trait PipelineEngine: Release {
    fn play(&mut self) -> Result<(), ViewerError>;

    /// Waits at most `timeout` for the next message of interest.
    fn poll(&mut self, timeout: Duration) -> Option<BusEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    /// Ctrl-C, from the terminal or a signal.
    Interrupt,
}

impl Key {
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Char('q') | Self::Escape | Self::Interrupt)
    }
}

/// Source of quit requests while a run is active.
pub trait KeyPoller {
    /// Waits at most `wait` for a key press.
    fn poll_key(&mut self, wait: Duration) -> Option<Key>;

    /// Called once the run is over; no polls follow.
    fn end_input(&mut self) {}
}

/// Everything a run needs from the outside world.
///
/// Opened resources are owned values, so the backend stays free to answer key
/// polls while they are alive.
pub trait ViewerBackend {
    type Source: FrameSource;
    type Display: FrameDisplay;
    type Engine: PipelineEngine;

    fn open_capture(&mut self, descriptor: &PipelineDescriptor) -> Result<Self::Source, ViewerError>;

    fn open_window(&mut self, title: &str) -> Result<Self::Display, ViewerError>;

    fn open_engine(&mut self, descriptor: &PipelineDescriptor) -> Result<Self::Engine, ViewerError>;

    /// Runs a shell command line to completion and returns its exit status.
    fn launch(&mut self, command: &str) -> Result<i32, ViewerError>;

    /// Waits at most `wait` for a key press.
    fn poll_key(&mut self, wait: Duration) -> Option<Key>;

    /// Restores whatever input state polling changed.
    fn end_input(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{Key, Release, SessionGuard};

    struct Counted(Rc<Cell<u32>>);

    impl Release for Counted {
        fn release(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn guard_releases_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let _guard = SessionGuard::new(Counted(count.clone()));
            assert_eq!(count.get(), 0);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn quit_keys() {
        assert!(Key::Char('q').is_quit());
        assert!(Key::Escape.is_quit());
        assert!(Key::Interrupt.is_quit());
        assert!(!Key::Char('Q').is_quit());
        assert!(!Key::Char(' ').is_quit());
    }
}
