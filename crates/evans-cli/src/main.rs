//! Evans - configuration front end
//!
//! Usage:
//!   evans config show          # Effective configuration as TOML
//!   evans config show --json   # Effective configuration as JSON
//!   evans config edit          # Open the user config in $EDITOR
//!   evans config path          # Store path and local override path

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evans_config::config::{PersistedStore, to_toml};
use evans_config::resolver::ConfigResolver;

#[derive(Parser)]
#[command(name = "evans")]
#[command(about = "gRPC client configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ConfigCommand {
    /// Print the effective configuration
    Show {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Open the user config file in the editor
    Edit,

    /// Print the user config path and the local override path, if any
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evans=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut resolver = ConfigResolver::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Config(ConfigCommand::Show { json }) => run_show(&resolver, json),
        Commands::Config(ConfigCommand::Edit) => run_edit(&mut resolver),
        Commands::Config(ConfigCommand::Path) => run_path(&resolver),
    }
}

fn run_show(resolver: &ConfigResolver, json: bool) -> Result<()> {
    let resolution = resolver
        .resolve()
        .context("Failed to resolve effective configuration")?;

    if let Some(local) = &resolution.local_path {
        eprintln!("# local overrides from {}", local.display());
    }

    let rendered = if json {
        serde_json::to_string_pretty(&resolution.config)
            .context("Failed to render configuration as JSON")?
    } else {
        to_toml(&resolution.config).context("Failed to render configuration as TOML")?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_edit(resolver: &mut ConfigResolver) -> Result<()> {
    let path = resolver.store().path().to_path_buf();
    resolver
        .edit()
        .with_context(|| format!("Failed to edit {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn run_path(resolver: &ConfigResolver) -> Result<()> {
    println!("store: {}", resolver.store().path().display());

    let local = resolver
        .discovery()
        .locate()
        .context("Failed to look up local override")?;
    match local {
        Some(path) => println!("local: {}", path.display()),
        None => println!("local: (none)"),
    }
    Ok(())
}
