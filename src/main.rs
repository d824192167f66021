//! UFVK Viewer CLI
//!
//! Command-line client for a Zcash viewing-key scan service.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- height
//! cargo run -- import --key uview1... --birthday 2600000
//! cargo run -- import --key uview1... --birthday 2600000 --filter memo --sort amount_desc --page 2
//! cargo run -- --server http://localhost:5000 import --key uview1... --birthday 2600000 --all --export csv,json --out exports
//! ```
//!
//! The `import` command submits the key, follows the background scan until it
//! finishes, then prints one page of the filtered and sorted transactions to stdout.
//! Progress and log lines go to stderr. Logging is controlled through `RUST_LOG`
//! (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, unreachable server, failed scan, unwritable export, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use ufvk_viewer::cli;

fn main() {
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    // Listings go to stdout
    let mut output = std::io::stdout();
    if let Err(e) = runtime.block_on(cli::run(&args, &mut output)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
