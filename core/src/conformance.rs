#![deny(missing_docs)]

//! # Conformance Harness Emitter
//!
//! Renders the table-driven test that runs every contract case of a service
//! against a live server implementation.
//!
//! Only methods with at least one case get tables. Rows follow contract
//! order and are named `<Method>/<description>`.

use crate::dispatch::{CompiledService, Outcome};
use crate::strategies::{FailureRow, RuntimeStrategy, SuccessRow};

/// Emits the exercise function and the table runner of one service.
pub fn generate_conformance_harness(
    service: &CompiledService,
    contract_name: &str,
    strategy: &impl RuntimeStrategy,
) -> String {
    let package = service.schema.package.as_str();
    let mut code = strategy.harness_exercise_fn(&service.schema.name, contract_name);
    code.push('\n');

    let has_cases = service.tested_methods().next().is_some();
    code.push_str(&strategy.harness_runner_open(&service.schema.name, has_cases));

    for method in service.tested_methods() {
        let name = &method.schema.name;
        let input = strategy.message_type(&method.schema.input, package);
        let output = strategy.message_type(&method.schema.output, package);
        let row_names: Vec<String> = method
            .spec
            .entries
            .iter()
            .map(|entry| format!("{}/{}", name, entry.description))
            .collect();

        let mut success = Vec::new();
        let mut failure = Vec::new();
        for (entry, row_name) in method.spec.entries.iter().zip(&row_names) {
            let request = strategy.message_literal(&entry.request, package);
            match &entry.outcome {
                Outcome::Response(response) => success.push(SuccessRow {
                    name: row_name,
                    request,
                    expected: strategy.message_literal(response, package),
                }),
                Outcome::Error(error) => failure.push(FailureRow {
                    name: row_name,
                    request,
                    error,
                }),
            }
        }

        code.push_str(&strategy.harness_method_open(name));
        if !success.is_empty() {
            code.push_str(&strategy.harness_success_table(name, &input, &output, &success));
        }
        if !failure.is_empty() {
            code.push_str(&strategy.harness_failure_table(name, &input, &failure));
        }
        code.push_str(&strategy.harness_method_close());
    }

    code.push_str(&strategy.harness_runner_close());
    tracing::debug!(
        service = %service.schema.name,
        methods = service.tested_methods().count(),
        "emitted conformance harness"
    );
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
        generate_conformance_harness(&compiled[0], &contract.name, &TonicStrategy)
    }

    #[test]
    fn test_success_row_pairs_request_and_expected_response() {
        let code = my_service_code();
        let expected = [
            "            (\n",
            "                \"MyMethod/known value\",\n",
            "                MyMethodRequest { request_field: String::from(\"VALUE\"), ..Default::default() },\n",
            "                MyMethodResponse { response_field: 42i64, ..Default::default() },\n",
            "            ),\n",
        ]
        .concat();
        assert!(code.contains(&expected), "{code}");
        assert!(code.contains("Vec<(&str, MyMethodRequest, MyMethodResponse)>"));
    }

    #[test]
    fn test_failure_row_carries_literal_message() {
        let code = my_service_code();
        let expected = [
            "            (\n",
            "                \"MyMethod/unknown value\",\n",
            "                MyMethodRequest { request_field: String::from(\"ANOTHER_VALUE\"), ..Default::default() },\n",
            "                tonic::Code::NotFound,\n",
            "                \"ANOTHER_VALUE NotFound\",\n",
            "            ),\n",
        ]
        .concat();
        assert!(code.contains(&expected), "{code}");
        assert!(code.contains("status.message() != message"));
    }

    #[test]
    fn test_only_methods_with_cases_get_tables() {
        let code = my_service_code();
        assert!(code.contains("client.my_method(request)"));
        assert!(code.contains("client.lookup(request)"));
        assert!(!code.contains("client.ping("));
        assert!(!code.contains("client.watch("));
        // Lookup has no failure case, so one failure table in total.
        assert_eq!(code.matches("let failure_cases").count(), 1);
        assert_eq!(code.matches("let success_cases").count(), 2);
    }

    #[test]
    fn test_exercise_fn_precedes_runner() {
        let code = my_service_code();
        let exercise = code.find("pub async fn my_service_contract_test<S>(").unwrap();
        let runner = code.find("pub async fn run_my_service_contract_tests(").unwrap();
        assert!(exercise < runner);
    }
}
