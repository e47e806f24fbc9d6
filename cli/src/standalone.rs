#![deny(missing_docs)]

//! # Standalone Mode
//!
//! Generates from a serialized `FileDescriptorSet` (e.g. the output of
//! `protoc --descriptor_set_out --include_imports`) and writes the units to
//! disk, so the generator can run from a build script without protoc.

use std::fs;
use std::path::{Path, PathBuf};

use prost_reflect::DescriptorPool;
use rpc_contract_core::{generate_units, read_contract_file, AppError, RuntimeStrategy};

use crate::error::CliResult;
use crate::options::Cli;

/// Generates every requested unit and writes it under `cli.out_dir`.
///
/// Returns the written paths.
pub fn execute(
    cli: &Cli,
    descriptor_set: &Path,
    strategy: &impl RuntimeStrategy,
) -> CliResult<Vec<PathBuf>> {
    let contract = read_contract_file(cli.contract_file()?)?;

    let bytes = fs::read(descriptor_set)?;
    let pool = DescriptorPool::decode(bytes.as_slice())
        .map_err(|e| AppError::Descriptor(e.to_string()))?;

    let files: Vec<String> = if cli.files.is_empty() {
        pool.files()
            .filter(|file| file.services().next().is_some())
            .map(|file| file.name().to_string())
            .collect()
    } else {
        cli.files.clone()
    };

    let units = generate_units(&pool, &files, &contract, strategy)?;

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = cli.out_dir.join(&unit.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, unit.content)?;
        tracing::info!(path = %path.display(), "wrote contract unit");
        written.push(path);
    }
    Ok(written)
}
