pub mod applications;
pub mod commands;
pub mod error;
pub mod http;
pub mod prompt;

use crate::commands::{execute, Command};
use crate::error::CliError;
use crate::http::ReqwestApi;
use crate::prompt::StdinConfirm;
use clap::Parser;
use institution_core::config::ClientConfig;
use institution_core::memory::InMemoryApi;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "registry", version, about = "Medical institution registry client")]
pub struct Cli {
    /// Backend base URL [default: $REGISTRY_BASE_URL or http://localhost:8080]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Work against a seeded in-memory registry instead of a backend
    #[arg(long)]
    pub demo: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let config = match &self.base_url {
            Some(url) => ClientConfig::new(url)?,
            None => ClientConfig::from_env()?,
        };
        Ok(config)
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if cli.demo {
        return run_demo(cli.command, &mut stdout).await;
    }

    let config = cli.client_config()?;
    tracing::debug!("Using backend at {}", config.base_url);
    let api = ReqwestApi::new(config);
    execute(&api, &StdinConfirm, cli.command, &mut stdout).await
}

pub async fn run_demo<W: std::io::Write>(command: Command, out: &mut W) -> Result<(), CliError> {
    tracing::info!("Running against in-memory demo registry");
    let api = InMemoryApi::with_demo_data();
    execute(&api, &StdinConfirm, command, out).await
}
