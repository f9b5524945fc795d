//! Command execution context
//!
//! Loads configuration and wires the backend client, the session cache and
//! the view coordinator together.

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::cache::RequestCache;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::HttpFeedClient;
use crate::config::Config;
use crate::error::Result;
use crate::view::ViewCoordinator;

/// Context for command execution containing the coordinator and runtime options.
pub struct CommandContext {
    /// Coordinator over a cached HTTP client (Arc-wrapped for background loads)
    pub coordinator: Arc<ViewCoordinator<HttpFeedClient>>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or no API host is configured.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref().map(Path::new))?;
        let api_host = config.resolve_api_host(opts.api_host_ref())?;
        let format = resolve_format(opts.format, &config)?;

        debug!(
            "Using backend {} (cache {})",
            api_host,
            if opts.no_cache { "disabled" } else { "enabled" }
        );

        let client = HttpFeedClient::new(
            api_host,
            config.api_key.clone(),
            config.preferences.requests_per_second,
        )?;

        // Wrap with caching layer (disabled if --no-cache)
        let cache = Arc::new(RequestCache::new(client, !opts.no_cache));
        let coordinator = Arc::new(ViewCoordinator::new(cache));

        Ok(Self {
            coordinator,
            format,
        })
    }
}

/// Flag value first, then `preferences.format`, then pretty.
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.preferences.format.as_deref() {
        Some(preference) => Ok(preference.parse()?),
        None => Ok(OutputFormat::default()),
    }
}
