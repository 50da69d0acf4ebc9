//! Logging setup for the terminal front end.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (for example `warn`
/// or `prompt_store=debug`) is used. Output goes to stderr so it never mixes
/// with the list rendered on stdout.
///
/// # Errors
///
/// Fails when `default_filter` cannot be parsed or a global subscriber is
/// already installed.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
