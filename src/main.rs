//! zotero-mcp: MCP server for a personal Zotero reference library.
//!
//! Reads credentials from the environment, then serves JSON-RPC 2.0 over
//! stdio until the client disconnects. Logs go to stderr so stdout stays
//! protocol-clean.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use zotero_mcp::{mcp, ZoteroClient};

/// MCP server exposing a personal Zotero library to AI assistants.
///
/// Requires ZOTERO_API_KEY and ZOTERO_USER_ID in the environment.
#[derive(Parser, Debug)]
#[command(name = "zotero-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn get_log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(get_log_level(args.verbose, args.quiet));

    // Missing credentials are fatal before any request can be served.
    let client = match ZoteroClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Fatal: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        user_id = client.user_id(),
        "starting zotero-mcp server"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal: failed to create runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(mcp::run_server(client)) {
        Ok(()) => {
            info!("server shut down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}
