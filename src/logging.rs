//! Logging setup for the binary
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! caller's choice.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the console subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` for our own
/// targets when `verbose` is on.
pub fn init(verbose: bool) {
    let default = if verbose { "info,mimicme=debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // A second init (tests, embedding) is not an error worth surfacing
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
