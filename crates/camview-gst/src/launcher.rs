use std::process::Command;

use camview_core::ViewerError;
use tracing::debug;

/// Runs `command` through `sh -c` and waits for it, with no timeout.
///
/// A child killed by a signal has no exit code and reports `-1`.
pub fn launch(command: &str) -> Result<i32, ViewerError> {
    let status = Command::new("sh").arg("-c").arg(command).status()?;
    debug!("'{}' exited with {}", command, status);
    Ok(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::launch;

    #[test]
    fn reports_exit_status() {
        assert_eq!(launch("true").unwrap(), 0);
        assert_eq!(launch("exit 3").unwrap(), 3);
    }
}
