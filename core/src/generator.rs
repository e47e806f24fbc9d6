#![deny(missing_docs)]

//! # Unit Generator
//!
//! Orchestrates one generation run: for each schema file with at least one
//! contracted service, compile its cases and emit a single source unit holding
//! the mock clients and conformance harnesses of those services.
//!
//! The emitted text is parsed with `ra_ap_syntax` before it is returned.

use crate::conformance::generate_conformance_harness;
use crate::contract::Contract;
use crate::dispatch::CaseCompiler;
use crate::error::{AppError, AppResult};
use crate::mock_client::generate_mock_client;
use crate::schema::{SchemaFile, SchemaIndex};
use crate::strategies::RuntimeStrategy;
use prost_reflect::{DescriptorPool, FileDescriptor};
use ra_ap_edition::Edition;
use ra_ap_syntax::SourceFile;

/// An emitted source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Relative path of the unit.
    pub name: String,
    /// Source text.
    pub content: String,
}

/// Emits the unit of one schema file.
///
/// Returns `None` when none of the file's services appears in the contract.
pub fn generate_unit(
    file: &FileDescriptor,
    contract: &Contract,
    index: &SchemaIndex,
    strategy: &impl RuntimeStrategy,
) -> AppResult<Option<GeneratedUnit>> {
    let schema = SchemaFile::from_descriptor(file);
    let compiled = CaseCompiler::new(index).compile_contracted(&schema.services, contract)?;
    if compiled.is_empty() {
        tracing::debug!(file = %schema.name, "no contracted service, skipping");
        return Ok(None);
    }

    let mut content = strategy.unit_header(&schema.name, &contract.name);
    for (i, service) in compiled.iter().enumerate() {
        if i > 0 {
            content.push('\n');
        }
        content.push_str(&generate_mock_client(service, &contract.name, strategy));
        content.push('\n');
        content.push_str(&generate_conformance_harness(service, &contract.name, strategy));
        tracing::debug!(file = %schema.name, service = %service.schema.name, "emitted service");
    }

    check_syntax(&schema.name, &content)?;

    Ok(Some(GeneratedUnit {
        name: strategy.unit_file_name(&schema.name),
        content,
    }))
}

/// Emits the units of the named files, in order. Fails on the first error.
///
/// Contract services matching no service of any requested file are logged.
pub fn generate_units(
    pool: &DescriptorPool,
    files: &[String],
    contract: &Contract,
    strategy: &impl RuntimeStrategy,
) -> AppResult<Vec<GeneratedUnit>> {
    let index = SchemaIndex::new(pool);
    let descriptors = files
        .iter()
        .map(|name| {
            pool.get_file_by_name(name)
                .ok_or_else(|| AppError::Descriptor(format!("file {name} is not in the descriptor pool")))
        })
        .collect::<AppResult<Vec<_>>>()?;

    for name in contract.services.keys() {
        let known = descriptors
            .iter()
            .any(|file| file.services().any(|s| s.name() == name.as_str()));
        if !known {
            tracing::warn!(service = %name, "contract service does not exist in the schema");
        }
    }

    let mut units = Vec::new();
    for file in &descriptors {
        if let Some(unit) = generate_unit(file, contract, &index, strategy)? {
            units.push(unit);
        }
    }
    Ok(units)
}

fn check_syntax(source_file: &str, content: &str) -> AppResult<()> {
    let parse = SourceFile::parse(content, Edition::Edition2021);
    if !parse.errors().is_empty() {
        let errs: Vec<String> = parse.errors().into_iter().map(|e| e.to_string()).collect();
        return Err(AppError::General(format!(
            "Generated code for {} does not parse: {}",
            source_file,
            errs.join(", ")
        )));
    }
    Ok(())
}
