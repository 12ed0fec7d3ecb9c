use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use camview_core::{Key, KeyPoller};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, warn};

/// Exit status when a second Ctrl-C arrives before the run saw the first.
const FORCED_EXIT_STATUS: i32 = 130;

/// Quit keys from the controlling terminal, plus Ctrl-C as a signal.
///
/// Raw mode is entered on the first poll, so runs that never poll (the
/// `--spawn` path) leave the terminal alone. It is restored by `end_input`
/// or on drop. A Ctrl-C that is still pending when another one arrives
/// terminates the process, so a run blocked outside the poll loop can
/// always be interrupted.
pub struct TerminalKeys {
    interactive: bool,
    raw_mode: bool,
    interrupted: Arc<AtomicBool>,
}

impl TerminalKeys {
    pub fn new() -> Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || {
            if !record_interrupt(&flag) {
                std::process::exit(FORCED_EXIT_STATUS);
            }
        })
        .context("Failed to install Ctrl-C handler")?;

        Ok(Self {
            interactive: std::io::stdin().is_terminal(),
            raw_mode: false,
            interrupted,
        })
    }
}

impl KeyPoller for TerminalKeys {
    fn poll_key(&mut self, wait: Duration) -> Option<Key> {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            return Some(Key::Interrupt);
        }
        if !self.interactive {
            std::thread::sleep(wait);
            return None;
        }
        if !self.raw_mode {
            if let Err(e) = terminal::enable_raw_mode() {
                warn!("Keyboard input unavailable: {}", e);
                self.interactive = false;
                return None;
            }
            debug!("Terminal raw mode on");
            self.raw_mode = true;
        }

        match event::poll(wait) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => map_key(key),
                _ => None,
            },
            _ => None,
        }
    }

    fn end_input(&mut self) {
        self.interactive = false;
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
            self.raw_mode = false;
            debug!("Terminal raw mode off");
        }
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        self.end_input();
    }
}

/// Marks a Ctrl-C as pending. `false` means one was already pending.
fn record_interrupt(pending: &AtomicBool) -> bool {
    !pending.swap(true, Ordering::SeqCst)
}

fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Interrupt),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{map_key, record_interrupt};
    use camview_core::Key;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn maps_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Key::Char('q')));
        assert_eq!(map_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
        assert_eq!(map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Key::Interrupt));
    }

    #[test]
    fn ignores_other_keys_and_releases() {
        assert_eq!(map_key(press(KeyCode::Enter, KeyModifiers::NONE)), None);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn second_pending_interrupt_forces_exit() {
        let pending = AtomicBool::new(false);
        assert!(record_interrupt(&pending));
        assert!(!record_interrupt(&pending));

        // Once the run consumes the flag, the next Ctrl-C is a fresh request.
        pending.swap(false, Ordering::SeqCst);
        assert!(record_interrupt(&pending));
    }
}
