use tracing_subscriber::EnvFilter;

use crate::cli::context::Verbosity;

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(verbosity: Verbosity) {
    let default = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "lfcgeo_vault=warn",
        Verbosity::Verbose => "lfcgeo_vault=debug",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
