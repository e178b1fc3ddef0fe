//! Command-line tool that pulls inscription payloads out of transactions.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bitcoin::{BlockHash, Txid};
use bitcoincore_rpc::{Auth, Client, RpcApi};
use clap::{Args, Parser, Subcommand};
use ordx_envelope_fmt::{InscriptionEnvelope, parse_envelope};
use ordx_witness::{ExtractedInscription, scan_transaction};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ordx", about = "Extract ordinals inscriptions from bitcoin transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a single hex-encoded witness stack element.
    Decode(DecodeArgs),

    /// Fetch a transaction over RPC and scan its witnesses.
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Hex-encoded witness stack element.
    hex: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Transaction to scan.
    txid: Txid,

    /// Block containing the transaction (needed when the node has no
    /// txindex).
    #[arg(long)]
    block: Option<BlockHash>,

    /// RPC endpoint of a Core-compatible node.
    #[arg(long, default_value = "http://127.0.0.1:8332")]
    rpc_url: String,

    /// RPC username.
    #[arg(long)]
    rpc_user: Option<String>,

    /// RPC password.
    #[arg(long)]
    rpc_pass: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write the payload to this file instead of printing it.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the result as JSON (payload hex-encoded).
    #[arg(long)]
    json: bool,
}

/// JSON view of one inscription and where it was found.
#[derive(Debug, Serialize)]
struct InscriptionReport<'a> {
    input: u32,
    item: u32,
    envelope: &'a InscriptionEnvelope,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Decode(args) => run_decode(args),
        Command::Fetch(args) => run_fetch(args),
    }
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let raw = hex::decode(args.hex.trim()).context("witness element is not valid hex")?;
    let envelope = parse_envelope(&raw).context("failed to decode inscription envelope")?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    print_envelope(&envelope);
    emit_payload(&envelope, args.output.out.as_deref())
}

fn run_fetch(args: FetchArgs) -> Result<()> {
    let auth = match (args.rpc_user, args.rpc_pass) {
        (Some(user), Some(pass)) => Auth::UserPass(user, pass),
        _ => Auth::None,
    };
    let client =
        Client::new(&args.rpc_url, auth).context("failed to construct RPC client")?;

    let blocks = client
        .get_block_count()
        .context("failed to reach the node")?;
    info!(blocks, "connected to node");

    let tx = client
        .get_raw_transaction(&args.txid, args.block.as_ref())
        .context("failed to fetch transaction")?;

    let found = scan_transaction(&tx);
    if found.is_empty() {
        anyhow::bail!("no inscription envelope in any witness of {}", args.txid);
    }

    if args.output.json {
        let reports: Vec<InscriptionReport<'_>> = found
            .iter()
            .map(|f| InscriptionReport {
                input: f.input(),
                item: f.item(),
                envelope: f.envelope(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    report_found(&found, args.output.out.as_deref())
}

fn report_found(
    found: &[ExtractedInscription],
    out: Option<&std::path::Path>,
) -> Result<()> {
    for extracted in found {
        println!(
            "Input {} witness item {}:",
            extracted.input(),
            extracted.item()
        );
        print_envelope(extracted.envelope());
    }

    if found.len() > 1 && out.is_some() {
        info!("multiple inscriptions found; writing only the first payload");
    }
    emit_payload(found[0].envelope(), out)
}

fn print_envelope(envelope: &InscriptionEnvelope) {
    println!(
        "Content type: {}",
        String::from_utf8_lossy(envelope.content_type())
    );
    println!("Total size: {} bytes", envelope.payload().len());
}

fn emit_payload(envelope: &InscriptionEnvelope, out: Option<&std::path::Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, envelope.payload())
                .with_context(|| format!("failed to write payload to {}", path.display()))?;
            info!(path = %path.display(), "payload written");
        }
        None => println!("{}", String::from_utf8_lossy(envelope.payload())),
    }
    Ok(())
}
