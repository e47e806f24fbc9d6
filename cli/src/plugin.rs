#![deny(missing_docs)]

//! # Plugin Mode
//!
//! protoc plugin protocol: a `CodeGeneratorRequest` on stdin, a
//! `CodeGeneratorResponse` on stdout. Nothing else may be written to stdout.

use std::io::{Read, Write};

use prost::Message;
use prost_reflect::DescriptorPool;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::FileDescriptorSet;
use rpc_contract_core::{generate_units, read_contract_file, AppError, RuntimeStrategy};

use crate::error::CliResult;
use crate::options::Cli;

/// Reads the request from stdin and writes the response to stdout.
pub fn execute(cli: Cli, strategy: &impl RuntimeStrategy) -> CliResult<()> {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;
    let request = CodeGeneratorRequest::decode(input.as_slice())?;

    let response = respond(cli, &request, strategy)?;

    let mut output = Vec::new();
    response.encode(&mut output)?;
    std::io::stdout().write_all(&output)?;
    Ok(())
}

/// Builds the response for one request.
pub fn respond(
    mut cli: Cli,
    request: &CodeGeneratorRequest,
    strategy: &impl RuntimeStrategy,
) -> CliResult<CodeGeneratorResponse> {
    if let Some(parameter) = request.parameter.as_deref() {
        cli.apply_parameter(parameter);
    }
    let contract = read_contract_file(cli.contract_file()?)?;

    let pool = DescriptorPool::from_file_descriptor_set(FileDescriptorSet {
        file: request.proto_file.clone(),
    })
    .map_err(|e| AppError::Descriptor(e.to_string()))?;

    let units = generate_units(&pool, &request.file_to_generate, &contract, strategy)?;
    tracing::debug!(
        requested = request.file_to_generate.len(),
        emitted = units.len(),
        "plugin run complete"
    );

    Ok(CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file: units
            .into_iter()
            .map(|unit| File {
                name: Some(unit.name),
                content: Some(unit.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    })
}
