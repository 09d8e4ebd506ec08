// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, sync::Arc};

use clap::{Parser, Subcommand};
use franky_agent_kit::{
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    kit::AgentKit,
    tools::{Tool, ToolContext, ToolRegistry},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "franky-agent-kit", version)]
#[command(about = "Run Hedera agent tools from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every tool definition as JSON
    List,
    /// Invoke one tool and print its JSON output
    Call {
        /// Tool name, e.g. hedera_get_hbar_balance
        tool: String,

        /// Tool input as a JSON object
        #[arg(default_value = "{}")]
        input: String,

        /// Sign and execute with the operator key
        #[arg(long, conflicts_with = "non_custodial")]
        custodial: bool,

        /// Return unsigned transaction bytes instead of executing
        #[arg(long)]
        non_custodial: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // An invalid LOG_FORMAT is reported below with the rest of the config.
    init_logging(LogFormat::from_env().unwrap_or_default());

    let config = AppConfig::from_env()
        .inspect_err(|err| tracing::error!(error = %err, "Invalid configuration"))?;
    let kit = AgentKit::from_config(&config)
        .inspect_err(|err| tracing::error!(error = %err, "Failed to set up the agent kit"))?;
    let kit = Arc::new(kit);
    let registry = ToolRegistry::ledger_tools(kit);

    match cli.command {
        Commands::List => {
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        }
        Commands::Call {
            tool,
            input,
            custodial,
            non_custodial,
        } => {
            let Some(selected) = registry.get(&tool) else {
                return Err(format!("Unknown tool `{tool}`, run `list` to see available tools").into());
            };

            let ctx = ToolContext {
                is_custodial: match (custodial, non_custodial) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            println!("{}", selected.call(&input, &ctx).await);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only tool output.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
