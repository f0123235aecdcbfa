//! `mbridge serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mbridge_config::{CliSettings, Config};
use mbridge_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mbridge.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Default markup dialect for /contentapi2discord (overrides config).
    #[arg(long)]
    lang: Option<String>,

    /// Fail requests containing constructs markdown cannot express,
    /// instead of degrading them.
    #[arg(long)]
    strict_render: bool,

    /// Enable verbose output (log every conversion request).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            default_dialect: self.lang,
            strict_render: self.strict_render.then_some(true),
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.info(&format!(
            "Starting markup service on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Default dialect: {}",
            config.markup.default_dialect
        ));
        if config.markup.strict_render {
            output.info("Unsupported constructs: rejected (strict)");
        } else {
            output.info("Unsupported constructs: degraded to plain output");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
