#![deny(missing_docs)]

//! # Tonic Strategy Module
//!
//! Implementation of `RuntimeStrategy` for `prost` messages and `tonic` stubs.
//! Relies on submodules for naming, literal rendering, the mock client and
//! the conformance harness.
//!
//! An emitted unit is meant to be included in the module that holds the
//! `prost`/`tonic` output of the same package, so message types are named
//! relative to that package.

pub mod harness;
pub mod literals;
pub mod mock;
pub mod naming;

use crate::dispatch::CaseError;
use crate::strategies::traits::{FailureRow, RuntimeStrategy, SuccessRow};
use crate::value::ResolvedMessage;
use prost_reflect::MessageDescriptor;

/// Strategy for emitting tonic + prost compatible code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TonicStrategy;

impl RuntimeStrategy for TonicStrategy {
    // --- Unit ---

    fn unit_file_name(&self, source_file: &str) -> String {
        let stem = source_file.strip_suffix(".proto").unwrap_or(source_file);
        format!("{stem}_contract.rs")
    }

    fn unit_header(&self, source_file: &str, contract_name: &str) -> String {
        let mut code = String::new();
        code.push_str("// @generated by protoc-gen-rpc-contract. DO NOT EDIT.\n");
        code.push_str(&format!("// source: {}\n", naming::comment_text(source_file)));
        code.push_str(&format!("// contract: {}\n", naming::comment_text(contract_name)));
        code.push_str("//\n");
        code.push_str("// Include next to the prost and tonic output of the same package:\n");
        code.push_str(&format!(
            "//     include!(concat!(env!(\"OUT_DIR\"), \"/{}\"));\n",
            self.unit_file_name(source_file)
        ));
        code.push_str("// The conformance harness needs tokio, tokio-stream, tokio-util (rt),\n");
        code.push_str("// tower and hyper-util.\n\n");
        code
    }

    // --- Types & Literals ---

    fn message_type(&self, message: &MessageDescriptor, package: &str) -> String {
        naming::message_type(message, package)
    }

    fn message_literal(&self, message: &ResolvedMessage, package: &str) -> String {
        literals::message_literal(message, package)
    }

    // --- Mock Client ---

    fn mock_client_open(&self, service: &str, contract_name: &str) -> String {
        mock::client_open(service, contract_name)
    }

    fn mock_method_open(
        &self,
        method: &str,
        input_type: &str,
        output_type: &str,
        case_count: usize,
    ) -> String {
        mock::method_open(method, input_type, output_type, case_count)
    }

    fn mock_case(&self, description: &str, request_literal: &str, outcome: &str) -> String {
        mock::case(description, request_literal, outcome)
    }

    fn mock_success_outcome(&self, response_literal: &str) -> String {
        mock::success_outcome(response_literal)
    }

    fn mock_error_outcome(&self, error: &CaseError) -> String {
        mock::error_outcome(error)
    }

    fn mock_default_outcome(&self) -> String {
        mock::default_outcome()
    }

    fn mock_method_close(&self) -> String {
        mock::method_close()
    }

    fn mock_client_close(&self) -> String {
        mock::client_close()
    }

    // --- Conformance Harness ---

    fn harness_exercise_fn(&self, service: &str, contract_name: &str) -> String {
        harness::exercise_fn(service, contract_name)
    }

    fn harness_runner_open(&self, service: &str, has_cases: bool) -> String {
        harness::runner_open(service, has_cases)
    }

    fn harness_success_table(
        &self,
        method: &str,
        input_type: &str,
        output_type: &str,
        rows: &[SuccessRow<'_>],
    ) -> String {
        harness::success_table(method, input_type, output_type, rows)
    }

    fn harness_failure_table(
        &self,
        method: &str,
        input_type: &str,
        rows: &[FailureRow<'_>],
    ) -> String {
        harness::failure_table(method, input_type, rows)
    }

    fn harness_runner_close(&self) -> String {
        harness::runner_close()
    }
}
