use std::io::Write;
use std::time::Instant;

// MARK: - FpsMeter

/// Frame counter for a single run.
///
/// The rate is `frames / elapsed_whole_seconds` and only exists once a full
/// second has passed since the meter started.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    start: Instant,
    frames: u64,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(start: Instant) -> Self {
        Self { start, frames: 0 }
    }

    /// Counts one observed frame and returns the new total.
    pub fn record(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate_at(Instant::now())
    }

    pub fn rate_at(&self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.start).as_secs();
        (elapsed > 0).then(|| self.frames as f64 / elapsed as f64)
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

// MARK: - StatusLine

/// Transient status output rewritten in place with `\r`.
pub struct StatusLine<W: Write> {
    out: W,
    label: &'static str,
    dirty: bool,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, label: &'static str) -> Self {
        Self { out, label, dirty: false }
    }

    pub fn report_fps(&mut self, fps: f64) -> std::io::Result<()> {
        write!(self.out, "\r{} FPS: {:.2}", self.label, fps)?;
        self.out.flush()?;
        self.dirty = true;
        Ok(())
    }

    /// Prints a permanent line, moving past any pending status first.
    pub fn message(&mut self, text: &str) -> std::io::Result<()> {
        if self.dirty {
            writeln!(self.out)?;
            self.dirty = false;
        }
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Terminates a pending status line so later output starts clean.
    pub fn finish(&mut self) -> std::io::Result<()> {
        if self.dirty {
            writeln!(self.out)?;
            self.dirty = false;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
