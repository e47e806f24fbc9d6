#![deny(missing_docs)]

//! # Mock Client Scaffolding
//!
//! Text of the `<Service>ContractClient` type: one async method per unary RPC
//! with the same signature as the tonic client method it stands in for.

use super::literals::rust_string_literal;
use super::naming::{comment_text, to_snake, to_upper_camel};
use crate::dispatch::CaseError;

/// Opens the mock struct and its impl block.
pub fn client_open(service: &str, contract_name: &str) -> String {
    let ty = to_upper_camel(service);
    let mut code = String::new();
    code.push_str(&format!(
        "/// Contract mock of the `{}` client, answering from contract `{}`.\n",
        comment_text(service),
        comment_text(contract_name)
    ));
    code.push_str("///\n");
    code.push_str("/// Each method compares the request with the contract cases in order,\n");
    code.push_str("/// success cases first, and answers with the first match.\n");
    code.push_str("///\n");
    code.push_str("/// **Unmatched requests are not errors.** A request equal to no case gets\n");
    code.push_str("/// `Ok` carrying `Default::default()`.\n");
    code.push_str("#[derive(Debug, Clone, Copy, Default)]\n");
    code.push_str(&format!("pub struct {ty}ContractClient;\n\n"));
    code.push_str("#[allow(clippy::needless_update, clippy::unit_cmp)]\n");
    code.push_str(&format!("impl {ty}ContractClient {{\n"));
    code
}

/// Opens one async method, binding the incoming message to `request`.
pub fn method_open(method: &str, input_type: &str, output_type: &str, case_count: usize) -> String {
    let mut code = format!(
        "    /// `{}`: {} contract case{}.\n",
        comment_text(method),
        case_count,
        if case_count == 1 { "" } else { "s" }
    );
    code.push_str(&format!(
        "    pub async fn {}(\n        &mut self,\n        request: impl tonic::IntoRequest<{}>,\n    ) -> std::result::Result<tonic::Response<{}>, tonic::Status> {{\n",
        to_snake(method),
        input_type,
        output_type
    ));
    if case_count == 0 {
        code.push_str("        let _ = request;\n");
    } else {
        code.push_str("        let request = request.into_request().into_inner();\n");
    }
    code
}

/// One `if request == (..)` branch.
pub fn case(description: &str, request_literal: &str, outcome: &str) -> String {
    format!(
        "        // {}\n        if request == ({}) {{\n            {}\n        }}\n",
        comment_text(description),
        request_literal,
        outcome
    )
}

/// `return Ok(..)` with the response literal.
pub fn success_outcome(response_literal: &str) -> String {
    format!("return Ok(tonic::Response::new({response_literal}));")
}

/// `return Err(..)` with the status of a failure case.
pub fn error_outcome(error: &CaseError) -> String {
    format!(
        "return Err(tonic::Status::new(tonic::Code::{}, {}));",
        error.code.tonic_variant(),
        rust_string_literal(&error.message)
    )
}

/// Zero-value response for unmatched requests.
pub fn default_outcome() -> String {
    "        Ok(tonic::Response::new(Default::default()))\n".to_string()
}

/// Closes a method.
pub fn method_close() -> String {
    "    }\n".to_string()
}

/// Closes the impl block.
pub fn client_close() -> String {
    "}\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_outcome_uses_tonic_spelling() {
        let error = CaseError {
            code: StatusCode::Canceled,
            message: "stopped \"early\"".into(),
        };
        assert_eq!(
            error_outcome(&error),
            "return Err(tonic::Status::new(tonic::Code::Cancelled, \"stopped \\\"early\\\"\"));"
        );
    }

    #[test]
    fn test_method_without_cases_ignores_request() {
        let code = method_open("MyMethod", "MyMethodRequest", "MyMethodResponse", 0);
        assert!(code.contains("pub async fn my_method("));
        assert!(code.contains("impl tonic::IntoRequest<MyMethodRequest>"));
        assert!(code.contains("let _ = request;"));
        assert!(!code.contains("into_inner"));
    }

    #[test]
    fn test_client_open_flags_default() {
        let code = client_open("MyService", "my-service-contract");
        assert!(code.contains("pub struct MyServiceContractClient;"));
        assert!(code.contains("**Unmatched requests are not errors.**"));
    }
}
