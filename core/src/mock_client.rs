#![deny(missing_docs)]

//! # Mock Client Emitter
//!
//! Renders the dispatch specs of a compiled service as a client type that
//! answers calls from the contract alone.

use crate::dispatch::{CompiledService, Outcome};
use crate::strategies::RuntimeStrategy;

/// Emits the mock client of one service.
///
/// Every unary method gets a method on the client, including those without
/// contract cases; those only return the default outcome. Branches follow the
/// dispatch order, so the first matching case wins.
pub fn generate_mock_client(
    service: &CompiledService,
    contract_name: &str,
    strategy: &impl RuntimeStrategy,
) -> String {
    let package = service.schema.package.as_str();
    let mut code = strategy.mock_client_open(&service.schema.name, contract_name);

    for (i, method) in service.unary_methods().enumerate() {
        if i > 0 {
            code.push('\n');
        }
        let input = strategy.message_type(&method.schema.input, package);
        let output = strategy.message_type(&method.schema.output, package);
        code.push_str(&strategy.mock_method_open(
            &method.schema.name,
            &input,
            &output,
            method.spec.entries.len(),
        ));

        for entry in &method.spec.entries {
            let request = strategy.message_literal(&entry.request, package);
            let outcome = match &entry.outcome {
                Outcome::Response(response) => {
                    strategy.mock_success_outcome(&strategy.message_literal(response, package))
                }
                Outcome::Error(error) => strategy.mock_error_outcome(error),
            };
            code.push_str(&strategy.mock_case(&entry.description, &request, &outcome));
        }

        code.push_str(&strategy.mock_default_outcome());
        code.push_str(&strategy.mock_method_close());
    }

    code.push_str(&strategy.mock_client_close());
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::CaseCompiler;
    use crate::schema::{SchemaFile, SchemaIndex};
    use crate::strategies::TonicStrategy;
    use crate::test_support::{fixture_contract, fixture_pool};

    fn my_service_code() -> String {
        let pool = fixture_pool();
        let index = SchemaIndex::new(&pool);
        let file = SchemaFile::from_descriptor(&pool.get_file_by_name("contract.proto").unwrap());
        let contract = fixture_contract();
        let compiled = CaseCompiler::new(&index)
            .compile_contracted(&file.services, &contract)
            .unwrap();
        generate_mock_client(&compiled[0], &contract.name, &TonicStrategy)
    }

    #[test]
    fn test_known_request_returns_contract_response() {
        let code = my_service_code();
        let expected = [
            "        // known value\n",
            "        if request == (MyMethodRequest { request_field: String::from(\"VALUE\"), ..Default::default() }) {\n",
            "            return Ok(tonic::Response::new(MyMethodResponse { response_field: 42i64, ..Default::default() }));\n",
            "        }\n",
        ]
        .concat();
        assert!(code.contains(&expected), "{code}");
    }

    #[test]
    fn test_failure_request_returns_contract_status() {
        let code = my_service_code();
        let expected = [
            "        // unknown value\n",
            "        if request == (MyMethodRequest { request_field: String::from(\"ANOTHER_VALUE\"), ..Default::default() }) {\n",
            "            return Err(tonic::Status::new(tonic::Code::NotFound, \"ANOTHER_VALUE NotFound\"));\n",
            "        }\n",
        ]
        .concat();
        assert!(code.contains(&expected), "{code}");
    }

    #[test]
    fn test_success_branch_precedes_failure_branch() {
        let code = my_service_code();
        let success = code.find("// known value").unwrap();
        let failure = code.find("// unknown value").unwrap();
        assert!(success < failure);
    }

    #[test]
    fn test_every_unary_method_falls_back_to_default() {
        let code = my_service_code();
        assert!(code.contains("pub struct MyServiceContractClient;"));
        assert!(code.contains("pub async fn my_method("));
        assert!(code.contains("pub async fn lookup("));
        assert!(code.contains("pub async fn ping("));
        assert!(!code.contains("pub async fn watch("));
        assert_eq!(
            code.matches("Ok(tonic::Response::new(Default::default()))").count(),
            3
        );
        assert!(code.contains("request: impl tonic::IntoRequest<()>,"));
    }
}
