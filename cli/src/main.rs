//! CLI entrypoint for scribe-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod console;

use anyhow::{bail, Result};
use clap::Parser;
use cli::{Cli, Command};
use console::{ConsoleApproval, ConsoleProgress};
use scribe_application::ports::approval::{ApprovalPort, AutoApproveApproval, AutoDenyApproval};
use scribe_application::ToolOrchestrator;
use scribe_domain::{OutcomePayload, ToolParams, ToolRequest};
use scribe_infrastructure::{vault_registry, ApprovalMode, ConfigLoader, FileConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match args.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if args.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(args.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    for warning in config.validate() {
        warn!("{}", warning);
    }

    if let Command::Config = args.command {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let vault_root = args
        .vault
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.vault.root));
    info!(vault = %vault_root.display(), "starting scribe");

    let params = match &args.command {
        Command::Search { query, names } => ToolParams::CorpusSearch {
            query: query.clone(),
            scope: if *names {
                scribe_domain::SearchScope::Names
            } else {
                scribe_domain::SearchScope::Content
            },
        },
        Command::Read { path } => ToolParams::FileRead { path: path.clone() },
        #[cfg(feature = "web-tools")]
        Command::Web { query } => ToolParams::WebSearch {
            query: query.clone(),
        },
        Command::Config => unreachable!("handled above"),
    };

    // === Dependency Injection ===
    let turn = config.turn_config();
    let capabilities = Arc::new(vault_registry(
        vault_root,
        turn.caps,
        turn.max_concurrent_tools,
    ));
    let approval = build_approval(&config, args.yes);

    // Ctrl-C cancels the in-flight call; pending gates resolve as
    // denials.
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let orchestrator =
        ToolOrchestrator::new(approval, capabilities).with_cancellation(token);
    let request = ToolRequest::new("cli-1", params);
    let outcome = orchestrator.run(request, &ConsoleProgress).await;

    match outcome.payload {
        OutcomePayload::Released {
            results,
            total_found,
            returned,
        } => {
            println!();
            println!(
                "Released {} of {} result(s) ({} found in total):",
                results.len(),
                returned,
                total_found
            );
            for result in results {
                println!();
                println!("=== {} ===", result.id);
                println!("{}", result.raw);
            }
            Ok(())
        }
        OutcomePayload::Cancelled => {
            println!("Cancelled; nothing was released.");
            Ok(())
        }
        OutcomePayload::Failed { kind, message } => {
            bail!("tool execution failed [{}]: {}", kind, message)
        }
    }
}

fn build_approval(config: &FileConfig, auto_yes: bool) -> Arc<dyn ApprovalPort> {
    if auto_yes {
        return Arc::new(AutoApproveApproval);
    }
    let (mode, _) = config.approvals.parse_mode();
    match mode {
        ApprovalMode::Interactive => Arc::new(ConsoleApproval),
        ApprovalMode::AutoApprove => Arc::new(AutoApproveApproval),
        ApprovalMode::AutoDeny => Arc::new(AutoDenyApproval),
    }
}
