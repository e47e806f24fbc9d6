#![deny(missing_docs)]

//! # protoc-gen-rpc-contract
//!
//! protoc plugin emitting, per contracted gRPC service, a mock client and a
//! conformance harness from a JSON contract.
//!
//! Modes:
//! - plugin (default): `protoc --rpc-contract_out=. --rpc-contract_opt=contract-file=contract.json`
//! - standalone: `--descriptor-set <file> --contract-file <file> --out-dir <dir>`
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use clap::Parser;
use rpc_contract_core::TonicStrategy;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;
use crate::options::Cli;

mod error;
mod options;
mod plugin;
mod standalone;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("protoc-gen-rpc-contract: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Injecting the tonic + prost strategy
    let strategy = TonicStrategy;
    match cli.descriptor_set.clone() {
        Some(path) => standalone::execute(&cli, &path, &strategy).map(|_| ()),
        None => plugin::execute(cli, &strategy),
    }
}
