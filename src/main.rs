//! netopt CLI - race candidate endpoints and pick the fastest valid one

use clap::{Parser, Subcommand};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use net_optimizer::{
    default_networks, probe_indexer, probe_node, ConfigError, ConfigFile, EndpointSelector,
    NetworkConfig, SelectorConfig, Session,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "netopt")]
#[command(
    version,
    about = "Validator and indexer endpoint optimizer with parallel latency probing"
)]
#[command(after_help = r#"EXAMPLES:
    # Pick the fastest mainnet validator node
    netopt select-node --network mainnet

    # Race explicit candidates against an expected chain id
    netopt select-node --chain-id dydx-mainnet-1 \
                       https://dydx-rpc.polkachu.com https://dydx-rpc.publicnode.com

    # Pick the fastest indexer
    netopt select-indexer --network mainnet

    # Show per-endpoint latencies without selecting
    netopt probe --network mainnet

CONFIG FILE:
    Default: ~/.config/net-optimizer/config.toml
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Named network (built-in or from config file)
    #[arg(long, global = true)]
    network: Option<String>,

    /// Per-probe timeout in seconds (overrides config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the fastest validator node reporting the expected chain id
    SelectNode {
        /// Candidate node RPC URLs (defaults to the network's candidates)
        urls: Vec<String>,

        /// Chain id a genuine node must report
        #[arg(long)]
        chain_id: Option<String>,
    },

    /// Select the fastest reachable indexer
    SelectIndexer {
        /// Candidate indexer URLs (defaults to the network's candidates)
        urls: Vec<String>,
    },

    /// Select both a node and an indexer for a network
    Connect,

    /// Probe every candidate and print per-endpoint latencies
    Probe {
        /// Candidate URLs (defaults to the network's node candidates)
        urls: Vec<String>,

        /// Probe indexer health endpoints instead of node status
        #[arg(long)]
        indexer: bool,
    },

    /// Inspect built-in and configured networks
    Networks {
        #[command(subcommand)]
        action: NetworkCommands,
    },
}

#[derive(Subcommand)]
enum NetworkCommands {
    /// List all known networks
    List,

    /// Show one network's candidates
    Show {
        /// Network name
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config_file = load_config(&cli)?;
    let selector = build_selector(&cli, &config_file);

    match &cli.command {
        Commands::SelectNode { urls, chain_id } => {
            let (urls, chain_id) = resolve_node_candidates(&cli, &config_file, urls, chain_id)?;

            let spinner = make_spinner(cli.quiet, urls.len());
            let winner = selector.select_best_node(&urls, &chain_id).await;
            finish_spinner(spinner);

            println!("{}", winner?);
        }

        Commands::SelectIndexer { urls } => {
            let urls = resolve_indexer_candidates(&cli, &config_file, urls)?;

            let spinner = make_spinner(cli.quiet, urls.len());
            let winner = selector.select_best_indexer(&urls).await;
            finish_spinner(spinner);

            println!("{}", winner?);
        }

        Commands::Connect => {
            let network = resolve_network(&cli, &config_file)?
                .ok_or_else(|| anyhow::anyhow!("--network is required for connect"))?;

            let spinner = make_spinner(cli.quiet, network.node_urls.len());
            let session = Session::connect(network, &selector).await;
            finish_spinner(spinner);

            let session = session?;
            println!("chain id: {}", session.chain_id());
            println!("node:     {}", session.node_url());
            if let Some(indexer) = session.indexer_url() {
                println!("indexer:  {}", indexer);
            }
        }

        Commands::Probe { urls, indexer } => {
            run_probe(&cli, &config_file, urls, *indexer).await?;
        }

        Commands::Networks { action } => {
            handle_networks(action, &config_file);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Option<ConfigFile>> {
    match &cli.config {
        Some(path) => Ok(Some(ConfigFile::load(path)?)),
        None => Ok(ConfigFile::load_default()?),
    }
}

fn build_selector(cli: &Cli, config_file: &Option<ConfigFile>) -> EndpointSelector {
    let mut settings = config_file
        .as_ref()
        .map(|c| c.settings.clone())
        .unwrap_or_default();

    if let Some(secs) = cli.timeout {
        settings = SelectorConfig::with_timeout(Duration::from_secs(secs));
    }

    EndpointSelector::new(settings)
}

/// All networks visible to this invocation: config-file networks shadow
/// built-ins by name.
fn known_networks(config_file: &Option<ConfigFile>) -> Vec<NetworkConfig> {
    let mut networks: Vec<NetworkConfig> = config_file
        .as_ref()
        .map(|c| c.networks.clone())
        .unwrap_or_default();

    for builtin in default_networks() {
        if !networks.iter().any(|n| n.name == builtin.name) {
            networks.push(builtin);
        }
    }

    networks
}

fn resolve_network(
    cli: &Cli,
    config_file: &Option<ConfigFile>,
) -> anyhow::Result<Option<NetworkConfig>> {
    let name = cli.network.clone().or_else(|| {
        config_file
            .as_ref()
            .and_then(|c| c.default_network.clone())
    });

    let Some(name) = name else {
        return Ok(None);
    };

    known_networks(config_file)
        .into_iter()
        .find(|n| n.name == name)
        .map(Some)
        .ok_or_else(|| ConfigError::UnknownNetwork(name).into())
}

fn resolve_node_candidates(
    cli: &Cli,
    config_file: &Option<ConfigFile>,
    urls: &[String],
    chain_id: &Option<String>,
) -> anyhow::Result<(Vec<String>, String)> {
    if let Some(network) = resolve_network(cli, config_file)? {
        let urls = if urls.is_empty() {
            network.node_urls.clone()
        } else {
            urls.to_vec()
        };
        let chain_id = chain_id.clone().unwrap_or(network.chain_id);
        return Ok((urls, chain_id));
    }

    let chain_id = chain_id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--chain-id is required when no --network is given"))?;
    Ok((urls.to_vec(), chain_id))
}

fn resolve_indexer_candidates(
    cli: &Cli,
    config_file: &Option<ConfigFile>,
    urls: &[String],
) -> anyhow::Result<Vec<String>> {
    if !urls.is_empty() {
        return Ok(urls.to_vec());
    }

    Ok(resolve_network(cli, config_file)?
        .map(|n| n.indexer_urls)
        .unwrap_or_default())
}

fn make_spinner(quiet: bool, count: usize) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Probing {} endpoints...", count));
    Some(spinner)
}

fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

async fn run_probe(
    cli: &Cli,
    config_file: &Option<ConfigFile>,
    urls: &[String],
    indexer: bool,
) -> anyhow::Result<()> {
    let network = resolve_network(cli, config_file)?;

    let urls: Vec<String> = if !urls.is_empty() {
        urls.to_vec()
    } else {
        match &network {
            Some(n) if indexer => n.indexer_urls.clone(),
            Some(n) => n.node_urls.clone(),
            None => Vec::new(),
        }
    };

    if urls.is_empty() {
        return Err(anyhow::anyhow!("no candidate endpoints to probe"));
    }

    let timeout = build_selector(cli, config_file).probe_timeout();

    let spinner = make_spinner(cli.quiet, urls.len());

    let probes = urls.iter().map(|url| async move {
        if indexer {
            probe_indexer(url, timeout)
                .await
                .map(|latency| (latency, None))
        } else {
            probe_node(url, timeout)
                .await
                .map(|status| (status.latency, Some(status.chain_id)))
        }
    });
    let results = join_all(probes).await;

    finish_spinner(spinner);

    println!(
        "PROBE RESULTS ({} candidates, {}s timeout)\n",
        urls.len(),
        timeout.as_secs()
    );

    for (url, result) in urls.iter().zip(&results) {
        match result {
            Ok((latency, chain_id)) => {
                println!(
                    "  ✓ {:<55} {:>6}ms{}",
                    url,
                    latency.as_millis(),
                    chain_id
                        .as_ref()
                        .map(|c| format!("  [{}]", c))
                        .unwrap_or_default()
                );
            }
            Err(e) => {
                println!("  ✗ {:<55} {}", url, e);
            }
        }
    }

    Ok(())
}

fn handle_networks(action: &NetworkCommands, config_file: &Option<ConfigFile>) {
    match action {
        NetworkCommands::List => {
            let networks = known_networks(config_file);
            println!("NETWORKS ({} known)\n", networks.len());

            for network in networks {
                println!(
                    "  {:<12} {:<20} {} nodes, {} indexers",
                    network.name,
                    network.chain_id,
                    network.node_urls.len(),
                    network.indexer_urls.len()
                );
            }
        }

        NetworkCommands::Show { name } => {
            let Some(network) = known_networks(config_file).into_iter().find(|n| &n.name == name)
            else {
                eprintln!("Unknown network: {}", name);
                return;
            };

            println!("{} (chain id: {})\n", network.name, network.chain_id);
            println!("Nodes:");
            for url in &network.node_urls {
                println!("  {}", url);
            }
            if network.has_indexers() {
                println!("\nIndexers:");
                for url in &network.indexer_urls {
                    println!("  {}", url);
                }
            }
        }
    }
}
