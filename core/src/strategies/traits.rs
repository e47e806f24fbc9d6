#![deny(missing_docs)]

//! # Runtime Strategy Trait
//!
//! Defines the interface required to emit contract code for a specific RPC
//! runtime (e.g. tonic + prost).

use crate::dispatch::CaseError;
use crate::value::ResolvedMessage;
use prost_reflect::MessageDescriptor;

/// One row of a harness success table, already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessRow<'a> {
    /// Subtest name, `<Method>/<description>`.
    pub name: &'a str,
    /// Request literal.
    pub request: String,
    /// Expected response literal.
    pub expected: String,
}

/// One row of a harness failure table, already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRow<'a> {
    /// Subtest name, `<Method>/<description>`.
    pub name: &'a str,
    /// Request literal.
    pub request: String,
    /// Expected status.
    pub error: &'a CaseError,
}

/// A strategy trait for decoupling runtime-specific code emission.
///
/// Implementors define how the emitted unit names types, writes message
/// literals, and lays out the mock client and the conformance harness.
/// The emitters own the ordering; hooks only produce text.
pub trait RuntimeStrategy {
    // --- Unit ---

    /// File name of the unit emitted for `source_file` (a `.proto` path).
    fn unit_file_name(&self, source_file: &str) -> String;

    /// Leading comment block of an emitted unit.
    fn unit_header(&self, source_file: &str, contract_name: &str) -> String;

    // --- Types & Literals ---

    /// Type of a message as seen from code living in `package`.
    fn message_type(&self, message: &MessageDescriptor, package: &str) -> String;

    /// Expression constructing a resolved message.
    fn message_literal(&self, message: &ResolvedMessage, package: &str) -> String;

    // --- Mock Client ---

    /// Opens the mock client type of `service`.
    fn mock_client_open(&self, service: &str, contract_name: &str) -> String;

    /// Opens one mock method.
    ///
    /// # Arguments
    ///
    /// * `method` - Schema name of the method (e.g. `MyMethod`).
    /// * `input_type` - Rust type of the request message.
    /// * `output_type` - Rust type of the response message.
    /// * `case_count` - Number of dispatch entries that follow.
    fn mock_method_open(
        &self,
        method: &str,
        input_type: &str,
        output_type: &str,
        case_count: usize,
    ) -> String;

    /// One dispatch branch: return `outcome` when the request equals `request_literal`.
    fn mock_case(&self, description: &str, request_literal: &str, outcome: &str) -> String;

    /// Outcome statement answering with a response literal.
    fn mock_success_outcome(&self, response_literal: &str) -> String;

    /// Outcome statement answering with a status.
    fn mock_error_outcome(&self, error: &CaseError) -> String;

    /// Trailing statement for requests matching no case.
    fn mock_default_outcome(&self) -> String;

    /// Closes one mock method.
    fn mock_method_close(&self) -> String;

    /// Closes the mock client type.
    fn mock_client_close(&self) -> String;

    // --- Conformance Harness ---

    /// Entry point wiring a live server and a client together, then running
    /// the contract tables.
    fn harness_exercise_fn(&self, service: &str, contract_name: &str) -> String;

    /// Opens the function running the tables of `service`.
    fn harness_runner_open(&self, service: &str, has_cases: bool) -> String;

    /// Success table of one method plus the loop checking it.
    fn harness_success_table(
        &self,
        method: &str,
        input_type: &str,
        output_type: &str,
        rows: &[SuccessRow<'_>],
    ) -> String;

    /// Failure table of one method plus the loop checking it.
    fn harness_failure_table(&self, method: &str, input_type: &str, rows: &[FailureRow<'_>])
        -> String;

    /// Opens the block grouping the tables of one method.
    fn harness_method_open(&self, _method: &str) -> String {
        "    {\n".to_string()
    }

    /// Closes the block grouping the tables of one method.
    fn harness_method_close(&self) -> String {
        "    }\n".to_string()
    }

    /// Closes the runner function.
    fn harness_runner_close(&self) -> String;
}
