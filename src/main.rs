//! `dockhand` application entry point.
//!
//! This binary exercises the provider bootstrap from the command line: it
//! resolves connection settings, validates them, and probes the daemon. It
//! uses `eyre` for opaque error handling at the application boundary,
//! converting domain-specific errors into human-readable reports.
//!
//! Configuration is resolved with this precedence (lowest first):
//! 1. Literal defaults (`unix:///var/run/docker.sock` for the host)
//! 2. `DOCKER_*` environment variables
//! 3. Configuration file (`~/.config/dockhand/config.toml` or path from
//!    `DOCKHAND_CONFIG_PATH`)
//! 4. Command-line arguments

use clap::Parser;
use dockhand::config::schema::conflicts_of;
use dockhand::config::{Cli, Commands, ResolvedConfig, load_config};
use dockhand::engine::ConnectionDescriptor;
use dockhand::error::{EngineError, ProviderError, Result as ProviderResult};
use dockhand::provider::Provider;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Installs logging, resolves configuration, then dispatches to the
/// subcommand handler.
fn main() -> EyreResult<()> {
    init_logging();

    let cli = Cli::parse();
    run(&cli).map_err(Report::from)
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`. Configuration is only loaded by the
/// subcommands that read it.
fn run(cli: &Cli) -> ProviderResult<()> {
    let provider = Provider::new();
    match &cli.command {
        Commands::Check => check(&provider, &load_config(cli, &DefaultEnv::new())?),
        Commands::Validate => validate(&load_config(cli, &DefaultEnv::new())?),
        Commands::Schema => {
            print_schema();
            Ok(())
        }
        Commands::Resources => {
            print_resources(&provider);
            Ok(())
        }
    }
}

/// Configure the provider and report the daemon version.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn check(provider: &Provider, config: &ResolvedConfig) -> ProviderResult<()> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        ProviderError::from(EngineError::RuntimeCreationFailed {
            message: e.to_string(),
        })
    })?;

    let version = rt.block_on(async {
        let handle = provider.configure_async(config).await?;
        handle.server_version().await
    })?;

    println!("Connected to Docker daemon at {}", config.host);
    println!(
        "Server version {} (API {}, {}/{})",
        version.version, version.api_version, version.os, version.arch
    );
    Ok(())
}

/// Validate configuration without connecting, printing every failure.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn validate(config: &ResolvedConfig) -> ProviderResult<()> {
    let errors = config.validation_errors();
    for error in &errors {
        println!("error: {error}");
    }

    if let Some(first) = errors.into_iter().next() {
        return Err(ProviderError::from(first));
    }

    let descriptor = ConnectionDescriptor::from_config(config)?;
    println!(
        "Configuration is valid (host {}, tls {})",
        descriptor.host(),
        descriptor.tls().label()
    );
    Ok(())
}

/// Print the recognised configuration options.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_schema() {
    for spec in Provider::schema() {
        let default = if spec.default.is_empty() {
            "-"
        } else {
            spec.default
        };
        let conflicting = conflicts_of(spec.name);
        let conflicts = if conflicting.is_empty() {
            String::from("-")
        } else {
            conflicting.join(", ")
        };
        println!(
            "{:<14} {:<22} required={:<5} default={} conflicts={}",
            spec.name, spec.env_var, spec.required, default, conflicts
        );
        println!("    {}", spec.description);
    }
}

/// Print the registered handler names.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_resources(provider: &Provider) {
    for name in provider.resource_names() {
        println!("resource     {name}");
    }
    for name in provider.data_source_names() {
        println!("data source  {name}");
    }
}
