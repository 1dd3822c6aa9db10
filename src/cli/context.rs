use std::path::Path;
use std::sync::OnceLock;

use crate::config::app_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::core::errors::Result;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }
}

/// Load the global configuration and record the output verbosity.
/// If `custom` is provided the file must exist; otherwise `lfcgeo.toml` is optional.
pub fn init(custom: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    let _ = VERBOSITY.set(verbosity);

    let config = match custom {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    let _ = CONFIG.set(config);
    Ok(())
}

/// The loaded configuration, or defaults if `init` never ran.
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

pub fn verbosity() -> Verbosity {
    VERBOSITY.get().copied().unwrap_or(Verbosity::Normal)
}
