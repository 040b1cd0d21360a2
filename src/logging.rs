use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "countryinfo=debug";

/// Install the global subscriber. `RUST_LOG` takes precedence over `--verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let fallback = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
