#![deny(missing_docs)]

//! # Options
//!
//! Command line arguments, with `RPC_CONTRACT_FILE` as an environment
//! fallback. In plugin mode protoc passes options as a single comma separated
//! parameter (`--rpc-contract_opt=contract-file=contract.json`); those are
//! folded into the same struct and take precedence.

use clap::Parser;
use rpc_contract_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Name of the contract file option.
pub const CONTRACT_FILE: &str = "contract-file";

/// Plugin options.
#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "Emits contract mock clients and conformance harnesses for gRPC services"
)]
pub struct Cli {
    /// Contract file (JSON, or YAML with a `.yaml`/`.yml` extension).
    #[clap(long, env = "RPC_CONTRACT_FILE")]
    pub contract_file: Option<PathBuf>,

    /// Read a serialized FileDescriptorSet instead of a protoc request on stdin.
    #[clap(long)]
    pub descriptor_set: Option<PathBuf>,

    /// Output directory for units written from a descriptor set.
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Files of the descriptor set to generate for. Defaults to every file
    /// declaring a service.
    #[clap(long = "file")]
    pub files: Vec<String>,
}

impl Cli {
    /// Folds a protoc parameter string into the options.
    pub fn apply_parameter(&mut self, parameter: &str) {
        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            match key.trim() {
                "contract-file" | "contract_file" => {
                    self.contract_file = Some(PathBuf::from(value.trim()));
                }
                other => tracing::warn!(option = %other, "ignoring unknown plugin option"),
            }
        }
    }

    /// Path of the contract file.
    pub fn contract_file(&self) -> AppResult<&Path> {
        self.contract_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| AppError::MissingOption(CONTRACT_FILE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("protoc-gen-rpc-contract").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parameter_sets_contract_file() {
        let mut cli = parse(&[]);
        cli.contract_file = None;
        cli.apply_parameter("foo=bar, contract-file=contracts/users.json");
        assert_eq!(
            cli.contract_file().unwrap(),
            Path::new("contracts/users.json")
        );
    }

    #[test]
    fn test_parameter_overrides_argument() {
        let mut cli = parse(&["--contract-file", "from-argv.json"]);
        cli.apply_parameter("contract_file=from-protoc.json");
        assert_eq!(cli.contract_file().unwrap(), Path::new("from-protoc.json"));
    }

    #[test]
    fn test_missing_contract_file() {
        let mut cli = parse(&[]);
        cli.contract_file = None;
        match cli.contract_file() {
            Err(AppError::MissingOption(name)) => assert_eq!(name, "contract-file"),
            other => panic!("unexpected {other:?}"),
        }

        cli.apply_parameter("contract-file=");
        assert!(matches!(cli.contract_file(), Err(AppError::MissingOption(_))));
    }

    #[test]
    fn test_standalone_arguments() {
        let cli = parse(&[
            "--descriptor-set",
            "set.bin",
            "--out-dir",
            "gen",
            "--file",
            "a.proto",
            "--file",
            "b.proto",
        ]);
        assert_eq!(cli.descriptor_set.as_deref(), Some(Path::new("set.bin")));
        assert_eq!(cli.out_dir, PathBuf::from("gen"));
        assert_eq!(cli.files, vec!["a.proto", "b.proto"]);
    }
}
