use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// Exit status for every failure, the unsigned form of -1.
pub const FAILURE_STATUS: u8 = 255;

/// Open a camera through GStreamer and show it on screen.
#[derive(Parser, Debug)]
#[command(name = "camview", version, about)]
pub struct Cli {
    /// Display mode: `cpu` pulls frames into a window, `gpu` renders through GL
    pub mode: String,

    /// JSON file overriding the default pipeline settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run the `gpu` pipeline as a `gst-launch-1.0` child process
    #[arg(long)]
    pub spawn: bool,
}

/// Prints a clap error where clap wants it and picks the exit status.
///
/// `--help` and `--version` succeed; anything else is a usage failure.
pub fn report_parse_error(err: &clap::Error) -> u8 {
    let _ = err.print();
    parse_error_status(err)
}

pub fn parse_error_status(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => FAILURE_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::Parser;

    use super::{parse_error_status, Cli, FAILURE_STATUS};

    #[test]
    fn missing_mode_is_a_usage_failure() {
        let err = Cli::try_parse_from(["camview"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(parse_error_status(&err), FAILURE_STATUS);
        assert!(err.render().to_string().contains("Usage:"));
    }

    #[test]
    fn help_exits_successfully() {
        let err = Cli::try_parse_from(["camview", "--help"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 0);
    }

    #[test]
    fn mode_token_is_taken_verbatim() {
        let cli = Cli::try_parse_from(["camview", "GPU"]).unwrap();
        assert_eq!(cli.mode, "GPU");
        assert!(!cli.spawn);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from(["camview", "gpu", "--spawn", "--config", "cam.json"]).unwrap();
        assert_eq!(cli.mode, "gpu");
        assert!(cli.spawn);
        assert_eq!(cli.config.unwrap().to_str(), Some("cam.json"));
    }
}
