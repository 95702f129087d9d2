// crates/tp_cli/src/logging.rs
//
// tracing + tracing-subscriber, initialized once per process.
// RUST_LOG wins when set; otherwise `info` (or `warn` with --quiet).
// Events go to stderr so stdout stays clean for --print / --list.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}
