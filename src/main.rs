use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, fmt};

mod client;
mod commands;
mod domain;
mod lookup;
mod state;
#[cfg(test)]
mod test_utils;

use crate::{
    client::{MetadataClient, SolanaClient},
    commands::{App, SearchOutcome, confirm, format_history_entry},
    domain::{Explorer, LookupError, Network, SearchKind},
    lookup::Resolver,
    state::{AppConfig, JsonFileStore, platform::ClipboardManager},
};

type CliApp = App<SolanaClient, MetadataClient, JsonFileStore>;

const CLEAR_HISTORY_PROMPT: &str =
    "Are you sure you want to clear all search history? This action cannot be undone.";

/// solprobe - look up Solana addresses, transactions, blocks and tokens
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log request flow to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a query and print the result as markdown
    Search {
        /// Address, transaction signature, slot number or token account
        #[arg(required_unless_present = "paste")]
        query: Option<String>,
        /// Read the query from the clipboard
        #[arg(long, conflicts_with = "query")]
        paste: bool,
        /// Cluster to search (defaults to the last one used)
        #[arg(short, long)]
        network: Option<Network>,
        /// Explorer to link to (defaults to the configured one)
        #[arg(short, long)]
        explorer: Option<Explorer>,
        /// Open the result in the explorer
        #[arg(long)]
        open: bool,
        /// Copy the query to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print only the explorer URL
        #[arg(long)]
        url_only: bool,
    },
    /// Print the detected kind of a query
    Classify {
        query: String,
        #[arg(short, long)]
        network: Option<Network>,
    },
    /// Print the explorer URL for a query
    Url {
        query: String,
        /// Skip detection and use this kind
        #[arg(short, long)]
        kind: Option<SearchKind>,
        #[arg(short, long)]
        network: Option<Network>,
        #[arg(short, long)]
        explorer: Option<Explorer>,
    },
    /// Manage recent searches
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Show or change the selected network
    Network {
        #[command(subcommand)]
        command: Option<NetworkCommand>,
    },
    /// Read queries from stdin, one per line
    Interactive {
        #[arg(short, long)]
        network: Option<Network>,
    },
    /// Show or change stored preferences
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    /// List recent searches, newest first
    List,
    /// Forget one search
    Remove { query: String },
    /// Forget all searches
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a remembered search in the explorer
    Open { query: String },
    /// Search a remembered query again
    Show { query: String },
}

#[derive(Debug, Subcommand)]
enum NetworkCommand {
    /// Print the selected network
    Get,
    /// Select a network
    Set { network: Network },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the configuration file location and current values
    Show,
    /// Set the explorer that links are built for
    SetExplorer { explorer: Explorer },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("solprobe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .try_init();
}

fn build_app(config: &AppConfig, explorer: Option<Explorer>) -> Result<CliApp> {
    let http = config
        .http_config()
        .build_client()
        .map_err(LookupError::into_report)?;

    let chain = SolanaClient::new(config.rpc_endpoints(), http.clone());
    let metadata = MetadataClient::new(
        config.metadata_api_url.clone(),
        config.metadata_api_key(),
        http,
    );
    if !metadata.is_configured() {
        tracing::debug!("no metadata API key configured; token metadata disabled");
    }

    let store = Arc::new(JsonFileStore::open_default()?);
    tracing::debug!(path = %store.path().display(), "using state store");

    Ok(App::new(
        Resolver::new(chain, metadata),
        store,
        explorer.unwrap_or(config.explorer),
    )?)
}

/// Print the generic failure text and log the cause.
fn report_failure(query: &str, error: &LookupError) -> ExitCode {
    tracing::debug!(query, "lookup failed: {error}");
    eprintln!("{}", error.user_message());
    ExitCode::FAILURE
}

fn confirm_clear_history() -> io::Result<bool> {
    confirm(
        CLEAR_HISTORY_PROMPT,
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )
}

fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("failed to open browser: {e}");
        eprintln!("Could not open browser. URL: {url}");
    }
}

fn print_outcome(outcome: &SearchOutcome, url_only: bool) {
    if url_only {
        println!("{}", outcome.url);
    } else {
        println!(
            "{}\n\n{}\n\n{}",
            outcome.result.subtitle(),
            outcome.markdown,
            outcome.url
        );
    }
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load();

    match cli.command {
        Command::Search {
            query,
            paste,
            network,
            explorer,
            open,
            copy,
            url_only,
        } => {
            let clipboard = ClipboardManager::new();
            let query = if paste {
                clipboard
                    .read_text()
                    .wrap_err("Failed to read from clipboard")?
            } else {
                query.unwrap_or_default()
            };

            let mut app = build_app(&config, explorer)?;
            let outcome = match app.search(&query, network).await {
                Ok(outcome) => outcome,
                Err(e) => return Ok(report_failure(&query, &e)),
            };

            print_outcome(&outcome, url_only);

            if copy {
                match clipboard.copy_text(&outcome.query) {
                    Ok(()) => eprintln!("Copied to clipboard"),
                    Err(e) => eprintln!("Failed to copy to clipboard: {e}"),
                }
            }
            if open {
                open_in_browser(&outcome.url);
            }
        }

        Command::Classify { query, network } => {
            let app = build_app(&config, None)?;
            println!("{}", app.classify(&query, network).await);
        }

        Command::Url {
            query,
            kind,
            network,
            explorer,
        } => {
            let app = build_app(&config, explorer)?;
            println!("{}", app.url(&query, kind, network).await);
        }

        Command::History { command } => {
            let mut app = build_app(&config, None)?;
            match command {
                HistoryCommand::List => {
                    let entries = app.history()?;
                    if entries.is_empty() {
                        println!("No search history");
                    }
                    for entry in &entries {
                        println!("{}", format_history_entry(entry));
                    }
                }
                HistoryCommand::Remove { query } => {
                    if app.remove_history(&query)? {
                        println!("Removed '{}' from history", query.trim());
                    } else {
                        println!("'{}' is not in history", query.trim());
                    }
                }
                HistoryCommand::Clear { yes } => {
                    if yes || confirm_clear_history()? {
                        app.clear_history()?;
                        println!("Search history cleared");
                    }
                }
                HistoryCommand::Open { query } => match app.history_url(&query, None)? {
                    Some(url) => {
                        println!("{url}");
                        open_in_browser(&url);
                    }
                    None => {
                        eprintln!("'{}' is not in history", query.trim());
                        return Ok(ExitCode::FAILURE);
                    }
                },
                HistoryCommand::Show { query } => {
                    let Some(entry) = app.history_entry(&query)? else {
                        eprintln!("'{}' is not in history", query.trim());
                        return Ok(ExitCode::FAILURE);
                    };
                    match app.search_as(&entry.query, entry.kind, None).await {
                        Ok(outcome) => print_outcome(&outcome, false),
                        Err(e) => return Ok(report_failure(&entry.query, &e)),
                    }
                }
            }
        }

        Command::Network { command } => {
            let mut app = build_app(&config, None)?;
            match command.unwrap_or(NetworkCommand::Get) {
                NetworkCommand::Get => println!("{}", app.network()),
                NetworkCommand::Set { network } => {
                    app.set_network(network)?;
                    println!("Network: {}", network.display_name());
                }
            }
        }

        Command::Interactive { network } => {
            let mut app = build_app(&config, None)?;
            if let Some(network) = network {
                app.set_network(network)?;
            }
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            app.interactive(stdin, &mut io::stdout()).await?;
        }

        Command::Config { command } => match command.unwrap_or(ConfigCommand::Show) {
            ConfigCommand::Show => {
                println!("Config file: {}", AppConfig::config_path()?.display());
                println!("Explorer: {}", config.explorer);
                let metadata = if config.metadata_api_key().is_some() {
                    "configured"
                } else {
                    "not configured"
                };
                println!("Metadata API key: {metadata}");
            }
            ConfigCommand::SetExplorer { explorer } => {
                let mut config = config;
                config.explorer = explorer;
                config.save().wrap_err("Failed to save configuration")?;
                println!("Explorer: {explorer}");
            }
        },
    }

    io::stdout().flush()?;
    Ok(ExitCode::SUCCESS)
}
