//! The camera viewer control loop.
//!
//! ```text
//! Created ──open──► Opened ──play/first read──► Running ──► Quit | Error | EndOfStream
//! ```
//!
//! Both modes run on the calling thread. Resources are wrapped in
//! [`SessionGuard`]s as soon as they are opened, so every exit past `Created`
//! releases them exactly once.

use std::io::Write;

use tracing::{debug, info};

use crate::config::{AcceleratedStrategy, ViewerConfig};
use crate::errors::ViewerError;
use crate::fps::{FpsMeter, StatusLine};
use crate::mode::Mode;
use crate::pipeline::PipelineDescriptor;
use crate::session::{BusEvent, FrameDisplay, FrameSource, Key, PipelineEngine, SessionGuard, ViewerBackend};

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    EndOfStream,
}

pub struct Viewer {
    mode: Mode,
    config: ViewerConfig,
    descriptor: PipelineDescriptor,
}

impl Viewer {
    pub fn new(mode: Mode, config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let descriptor = PipelineDescriptor::for_mode(mode, &config);
        debug!("{} pipeline: {}", mode.label(), descriptor);
        Ok(Self { mode, config, descriptor })
    }

    /// Parses the CLI mode token first, so a bad token never opens anything.
    pub fn from_token(token: &str, config: ViewerConfig) -> Result<Self, ViewerError> {
        Self::new(token.parse()?, config)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn descriptor(&self) -> &PipelineDescriptor {
        &self.descriptor
    }

    pub fn window_title(&self) -> &str {
        self.config.window_title.as_deref().unwrap_or(self.mode.label())
    }

    /// Blocks until the user quits, the stream ends or something fails.
    ///
    /// FPS status goes to `out`; errors are logged and returned.
    pub fn run<B: ViewerBackend, W: Write>(&self, backend: &mut B, out: W) -> Result<RunOutcome, ViewerError> {
        let mut status = StatusLine::new(out, self.mode.label());
        let result = match (self.mode, self.config.accelerated_strategy) {
            (Mode::Local, _) => self.run_local(backend, &mut status),
            (Mode::Accelerated, AcceleratedStrategy::InProcess) => self.run_accelerated(backend, &mut status),
            (Mode::Accelerated, AcceleratedStrategy::Spawn) => self.run_spawned(backend),
        };

        // Give the terminal back before anything else is printed.
        backend.end_input();
        let _ = status.finish();
        match &result {
            Ok(RunOutcome::Quit) => info!("{} quit", self.mode.label()),
            Ok(RunOutcome::EndOfStream) => {
                info!("{} reached end of stream", self.mode.label());
                status.message("End of stream.")?;
            }
            Err(e) => debug!("{} stopped: {}", self.mode.label(), e),
        }
        result
    }

    fn run_local<B: ViewerBackend, W: Write>(
        &self,
        backend: &mut B,
        status: &mut StatusLine<W>,
    ) -> Result<RunOutcome, ViewerError> {
        let mut source = SessionGuard::new(backend.open_capture(&self.descriptor)?);
        if !source.is_opened() {
            debug!("Capture did not open: {}", self.descriptor);
            return Err(ViewerError::open("unable to open the CPU pipeline"));
        }
        let mut window = SessionGuard::new(backend.open_window(self.window_title())?);
        info!("{} running", self.mode.label());

        let key_wait = self.config.key_wait();
        let mut meter = FpsMeter::new();
        loop {
            let frame = source.read()?;
            if frame.is_empty() {
                debug!("Captured empty frame after {} frames", meter.frames());
                return Err(ViewerError::EmptyFrame);
            }

            window.show(&frame)?;
            meter.record();
            if let Some(fps) = meter.rate() {
                status.report_fps(fps)?;
            }

            if backend.poll_key(key_wait).is_some_and(|key| key.is_quit()) {
                debug!("Quit requested after {} frames", meter.frames());
                return Ok(RunOutcome::Quit);
            }
        }
    }

    fn run_accelerated<B: ViewerBackend, W: Write>(
        &self,
        backend: &mut B,
        status: &mut StatusLine<W>,
    ) -> Result<RunOutcome, ViewerError> {
        let mut engine = SessionGuard::new(backend.open_engine(&self.descriptor)?);
        engine.play()?;
        info!("{} running", self.mode.label());

        let poll_interval = self.config.bus_poll_interval();
        let key_wait = self.config.key_wait();
        let mut meter = FpsMeter::new();
        loop {
            match engine.poll(poll_interval) {
                Some(BusEvent::Error(message)) => {
                    debug!("Bus error: {}", message);
                    return Err(ViewerError::EngineError { message });
                }
                Some(BusEvent::EndOfStream) => {
                    debug!("End of stream after {} frames", meter.frames());
                    return Ok(RunOutcome::EndOfStream);
                }
                Some(BusEvent::FrameRendered) => {
                    meter.record();
                    if let Some(fps) = meter.rate() {
                        status.report_fps(fps)?;
                    }
                }
                Some(BusEvent::Other) | None => {}
            }

            // Interrupts always stop the run. `q`/Esc only count once the
            // sink has put something on screen.
            match backend.poll_key(key_wait) {
                Some(Key::Interrupt) => {
                    debug!("Interrupted after {} frames", meter.frames());
                    return Ok(RunOutcome::Quit);
                }
                Some(key) if key.is_quit() && meter.frames() > 0 => {
                    debug!("Quit requested after {} frames", meter.frames());
                    return Ok(RunOutcome::Quit);
                }
                _ => {}
            }
        }
    }

    fn run_spawned<B: ViewerBackend>(&self, backend: &mut B) -> Result<RunOutcome, ViewerError> {
        let command = self.descriptor.launch_command();
        info!("Launching: {}", command);
        match backend.launch(&command)? {
            0 => Ok(RunOutcome::EndOfStream),
            status => {
                debug!("Pipeline process failed with status {}", status);
                Err(ViewerError::LaunchFailure { status })
            }
        }
    }
}
