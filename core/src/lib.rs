#![deny(missing_docs)]

//! # RPC Contract Core
//!
//! Core library of the contract-test generator: compiles JSON contracts
//! against protobuf schemas and emits mock clients and conformance harnesses.

/// Shared error types.
pub mod error;

/// Standard RPC status codes.
pub mod status;

/// Contract document model and loader.
pub mod contract;

/// Schema model and per-type field tables.
pub mod schema;

/// Schema-validated values.
pub mod value;

/// JSON to resolved message decoding.
pub mod resolver;

/// Case compilation and dispatch.
pub mod dispatch;

/// Strategy Pattern Interfaces.
pub mod strategies;

/// Mock client emission.
pub mod mock_client;

/// Conformance harness emission.
pub mod conformance;

/// Per-file unit generation.
pub mod generator;

#[cfg(test)]
mod test_support;

pub use conformance::generate_conformance_harness;
pub use contract::{
    read_contract_file, Contract, ErrorSpec, FailureCase, MethodContract, ServiceContract,
    SuccessCase,
};
pub use dispatch::{
    CaseCompiler, CaseError, CompiledMethod, CompiledService, DispatchEntry, DispatchSpec, Outcome,
};
pub use error::{AppError, AppResult};
pub use generator::{generate_unit, generate_units, GeneratedUnit};
pub use mock_client::generate_mock_client;
pub use resolver::ValueResolver;
pub use schema::{FieldTable, MethodSchema, SchemaFile, SchemaIndex, ServiceSchema};
pub use status::{validate_error_code, StatusCode};
pub use strategies::{RuntimeStrategy, TonicStrategy};
pub use value::{FieldValue, MapKey, ResolvedField, ResolvedMessage, Scalar, ValueKind};
