//! Logger setup for the binary.

use std::io::Write;

use env_logger::{Builder, Env, Target};
use owo_colors::Stream;

/// Stream log lines are written to. Colour support is detected against it.
pub(crate) const LOG_STREAM: Stream = Stream::Stderr;

fn target_for(stream: Stream) -> Target {
    match stream {
        Stream::Stdout => Target::Stdout,
        Stream::Stderr => Target::Stderr,
    }
}

/// Install the global logger.
///
/// `--verbose` shows debug messages with timestamps, `--quiet` only warnings
/// and errors. `RUST_LOG` overrides both. Output goes to stderr so command
/// results on stdout stay machine-readable.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(level));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.target(target_for(LOG_STREAM)).init();
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_go_to_stderr() {
        assert!(matches!(LOG_STREAM, Stream::Stderr));
        assert!(matches!(target_for(LOG_STREAM), Target::Stderr));
    }
}
