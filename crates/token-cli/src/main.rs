use std::path::PathBuf;
use std::time::Duration;

use alloy::consensus::{Transaction as _, TxType};
use alloy::rpc::types::eth::{Transaction, TransactionReceipt};
use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use token_analysis::events::decode_token_event;
use token_analysis::fees::{format_eth, format_gwei, format_token_amount};
use token_analysis::ordering::{sort_by_inclusion, MinedTx};
use token_analysis::report::TxReport;
use token_analysis::FeeSource;
use token_chain::artifact::ContractArtifact;
use token_chain::client::{ensure_success, ChainClient, SigningClient};
use token_chain::config::ConfigSources;
use token_chain::run_file::{RunRecord, DEFAULT_RUN_FILE};
use token_chain::scenario::scripted_sequence;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "token-ops")]
#[command(about = "ERC-20 deployment, scripted fee-tier interaction, and receipt analysis")]
#[command(version)]
struct Cli {
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Deploy the token contract and print its address.
    Deploy(DeployArgs),
    /// Run the scripted transfer/approve sequence with varied fee tiers.
    Interact(InteractArgs),
    /// Analyze the recorded transactions: fees, events, mined order.
    Analyze(AnalyzeArgs),
}

/// Endpoint options shared by every subcommand.
#[derive(Args, Debug)]
struct NodeArgs {
    /// JSON-RPC endpoint of the target network.
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    /// Chain id the node is expected to report.
    #[arg(long, env = "CHAIN_ID")]
    chain_id: Option<u64>,
}

#[derive(Args, Debug)]
struct DeployArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Hex private key of the deploying account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Directory holding compiled contract artifacts.
    #[arg(long, default_value = "artifacts")]
    artifact_dir: PathBuf,

    /// Contract name used to resolve the artifact file.
    #[arg(long, default_value = "CampusCredit")]
    contract: String,

    /// Initial supply in whole tokens (human-decimal string).
    #[arg(long, env = "TOKEN_INITIAL")]
    initial_supply: Option<String>,

    /// Seconds to wait for a submitted transaction to be mined.
    #[arg(long, default_value_t = 120)]
    wait_timeout_secs: u64,
}

#[derive(Args, Debug)]
struct InteractArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Hex private key of the sending account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Address of the deployed token contract.
    #[arg(long, env = "TOKEN")]
    token: Option<String>,

    /// Transfer recipient and approval spender.
    #[arg(long, env = "RECIPIENT")]
    recipient: Option<String>,

    /// Where to record the transaction hashes for later analysis.
    #[arg(long, default_value = DEFAULT_RUN_FILE)]
    out: PathBuf,

    /// Seconds to wait for each submitted transaction to be mined.
    #[arg(long, default_value_t = 120)]
    wait_timeout_secs: u64,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Run file written by the interact command.
    #[arg(long, default_value = DEFAULT_RUN_FILE)]
    run_file: PathBuf,

    /// Output format: table (default) or json.
    #[arg(long, default_value = "table")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Deploy(args) => handle_deploy(args).await,
        Commands::Interact(args) => handle_interact(args).await,
        Commands::Analyze(args) => handle_analyze(args).await,
    }
}

fn init_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .wrap_err("failed to initialize tracing filter")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

async fn handle_deploy(args: DeployArgs) -> Result<()> {
    let sources = ConfigSources {
        rpc_url: args.node.rpc_url,
        chain_id: args.node.chain_id,
        private_key: args.private_key,
        initial_supply: args.initial_supply,
        ..ConfigSources::default()
    };
    let node = sources.node()?;
    let key = sources.signing_key()?;
    let supply = sources.initial_supply()?;

    let artifact = ContractArtifact::load(&args.artifact_dir, &args.contract)
        .wrap_err("failed to load contract artifact")?;
    let deploy_code = artifact.deploy_code(supply)?;

    let signer = SigningClient::connect(&node, &key)?;
    let reader = ChainClient::connect(&node).await?;

    println!("Deploying {}...", args.contract);
    println!("  deployer : {}", signer.sender());
    println!("  supply   : {} whole tokens", sources.initial_supply_text());

    let tx_hash = signer.deploy(deploy_code).await?;
    println!("  tx hash  : {tx_hash}");

    let spinner = wait_spinner("waiting for deployment to be mined")?;
    let waited = reader
        .wait_for_receipt(tx_hash, Duration::from_secs(args.wait_timeout_secs))
        .await;
    spinner.finish_and_clear();

    let receipt = ensure_success(waited?)?;
    let address = receipt
        .contract_address
        .ok_or_else(|| eyre!("node reported no contract address for deployment {tx_hash}"))?;
    let block = receipt.block_number.unwrap_or_default();

    println!("Deployed at {address} (block {block})");
    info!(
        contract = %address,
        block,
        tx_hash = %tx_hash,
        "deploy command completed"
    );

    Ok(())
}

async fn handle_interact(args: InteractArgs) -> Result<()> {
    let sources = ConfigSources {
        rpc_url: args.node.rpc_url,
        chain_id: args.node.chain_id,
        private_key: args.private_key,
        token: args.token,
        recipient: args.recipient,
        ..ConfigSources::default()
    };
    let node = sources.node()?;
    let key = sources.signing_key()?;
    let token = sources.token_address()?;
    let recipient = sources.recipient_address()?;

    let signer = SigningClient::connect(&node, &key)?;
    let reader = ChainClient::connect(&node).await?;
    let sender = signer.sender();

    println!("=== INTERACT ===");
    println!("  token    : {token}");
    println!("  sender   : {sender}");
    println!("  recipient: {recipient}");

    let sender_before = reader.balance_of(token, sender).await?;
    let recipient_before = reader.balance_of(token, recipient).await?;
    println!("Balances before:");
    println!("  sender   : {}", format_token_amount(sender_before));
    println!("  recipient: {}", format_token_amount(recipient_before));

    let timeout = Duration::from_secs(args.wait_timeout_secs);
    let plan = scripted_sequence(recipient);
    let mut hashes = Vec::with_capacity(plan.len());

    // Strictly sequential: each transaction is confirmed before the next
    // fee tier is submitted, and any revert aborts the run unrecorded.
    for planned in &plan {
        let tx_hash = signer
            .token_call(token, planned.call.abi_encode(), planned.fees)
            .await?;
        println!(
            "{}: {tx_hash} (priority {}, max {})",
            planned.label,
            format_gwei(planned.fees.priority_fee_wei),
            format_gwei(planned.fees.max_fee_wei)
        );

        let spinner = wait_spinner(&format!("waiting for {} to be mined", planned.label))?;
        let waited = reader.wait_for_receipt(tx_hash, timeout).await;
        spinner.finish_and_clear();

        let receipt = ensure_success(waited?)?;
        hashes.push(receipt.transaction_hash);
    }

    let sender_after = reader.balance_of(token, sender).await?;
    let recipient_after = reader.balance_of(token, recipient).await?;
    let granted = reader.allowance(token, sender, recipient).await?;
    println!("Balances after:");
    println!("  sender   : {}", format_token_amount(sender_after));
    println!("  recipient: {}", format_token_amount(recipient_after));
    println!("Allowance granted to recipient: {}", format_token_amount(granted));

    let record = RunRecord {
        token,
        recipient,
        tx1: hashes[0],
        tx2: hashes[1],
        tx3: hashes[2],
    };
    record.save(&args.out)?;
    println!("Recorded transaction hashes in {}", args.out.display());

    info!(
        token = %token,
        recipient = %recipient,
        run_file = %args.out.display(),
        "interact command completed"
    );

    Ok(())
}

async fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let sources = ConfigSources {
        rpc_url: args.node.rpc_url,
        chain_id: args.node.chain_id,
        ..ConfigSources::default()
    };
    let node = sources.node()?;

    let record = RunRecord::load(&args.run_file)?;
    let reader = ChainClient::connect(&node).await?;

    let mut reports = Vec::new();
    for hash in record.tx_hashes() {
        let receipt = reader.receipt(hash).await?;
        let tx = reader.transaction(hash).await?;

        let events = receipt
            .inner
            .logs()
            .iter()
            .filter_map(|log| decode_token_event(&log.inner.data))
            .collect();

        reports.push(TxReport::new(
            hash,
            receipt.block_number.unwrap_or_default(),
            receipt.transaction_index.unwrap_or_default(),
            receipt.status(),
            receipt.gas_used,
            fee_source_from(&receipt, &tx),
            events,
        ));
    }

    let mined = sort_by_inclusion(reports.iter().map(TxReport::mined_position).collect());

    match args.output.to_lowercase().as_str() {
        "table" => print_analysis_tables(&record, &reports, &mined)?,
        "json" => print_analysis_json(&reports, &mined)?,
        _ => {
            return Err(eyre!(
                "unknown output format '{}'; use 'table' or 'json'",
                args.output
            ))
        }
    }

    info!(
        run_file = %args.run_file.display(),
        txs = reports.len(),
        "analyze command completed"
    );

    Ok(())
}

/// Gather the fee-rate fields the resolution policy consults.
fn fee_source_from(receipt: &TransactionReceipt, tx: &Transaction) -> FeeSource {
    FeeSource {
        effective_gas_price: Some(receipt.effective_gas_price),
        max_fee_per_gas: Some(tx.max_fee_per_gas()),
        gas_price: tx.gas_price(),
        is_fee_market: tx.inner.tx_type() != TxType::Legacy,
    }
}

fn print_analysis_tables(
    record: &RunRecord,
    reports: &[TxReport],
    mined: &[MinedTx],
) -> Result<()> {
    println!("=== ANALYZE ===");
    println!("  token    : {}", record.token);
    println!("  recipient: {}", record.recipient);

    for (position, report) in reports.iter().enumerate() {
        println!("\nTx #{}: {}", position + 1, report.hash);
        println!("  block      : {}", report.block_number);
        println!("  status     : {}", report.status_label());
        println!("  gas used   : {}", report.gas_used);
        println!("  gas price  : {}", format_gwei(report.gas_price_wei));
        println!("  fee        : {}", format_eth(report.fee_wei));
        for event in &report.events {
            println!("  event {}", event.describe());
        }
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Mined", "Block", "Index", "Tx Hash", "Submitted"]);

    let submitted = record.tx_hashes();
    for (rank, tx) in mined.iter().enumerate() {
        let submitted_as = submitted
            .iter()
            .position(|h| *h == tx.hash)
            .map(|i| format!("#{}", i + 1))
            .unwrap_or_default();
        table.add_row(vec![
            format!("#{}", rank + 1),
            tx.block_number.to_string(),
            tx.tx_index.to_string(),
            truncate_hash(&tx.hash.to_string()),
            submitted_as,
        ]);
    }

    println!("\nMined order (by block, then index):");
    println!("{table}");

    Ok(())
}

fn print_analysis_json(reports: &[TxReport], mined: &[MinedTx]) -> Result<()> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct JsonOutput<'a> {
        transactions: &'a [TxReport],
        mined_order: &'a [MinedTx],
    }

    let output = JsonOutput {
        transactions: reports,
        mined_order: mined,
    };
    let json = serde_json::to_string_pretty(&output).wrap_err("failed to serialize JSON")?;
    println!("{json}");

    Ok(())
}

fn wait_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .wrap_err("failed to create progress style")?,
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Truncate a hex hash for compact table display.
fn truncate_hash(hash: &str) -> String {
    if hash.len() > 14 {
        format!("{}…{}", &hash[..8], &hash[hash.len() - 4..])
    } else {
        hash.to_string()
    }
}
