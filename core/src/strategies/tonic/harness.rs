#![deny(missing_docs)]

//! # Conformance Harness Scaffolding
//!
//! Text of the emitted conformance test: an exercise function serving the
//! user's implementation over an in-memory `tokio::io::duplex` pipe, and a
//! runner walking the per-method case tables through a tonic client.

use super::literals::rust_string_literal;
use super::naming::{client_module, comment_text, server_module, to_snake, to_upper_camel};
use crate::strategies::traits::{FailureRow, SuccessRow};

/// Size of the in-memory transport buffer, in bytes.
pub const DUPLEX_BUFFER_SIZE: usize = 1024 * 1024;

/// `<service>_contract_test`: starts the server, connects, runs the tables.
pub fn exercise_fn(service: &str, contract_name: &str) -> String {
    let ty = to_upper_camel(service);
    let snake = to_snake(service);
    let server = server_module(service);
    let client = client_module(service);
    let label = rust_string_literal(service);

    let mut code = String::new();
    code.push_str(&format!(
        "/// Drives `server` through every case of contract `{}` for `{}`.\n",
        comment_text(contract_name),
        comment_text(service)
    ));
    code.push_str("///\n");
    code.push_str("/// The server is stopped when this function returns or unwinds. Panics\n");
    code.push_str("/// listing every failed subtest.\n");
    code.push_str(&format!(
        "pub async fn {snake}_contract_test<S>(server: S, ctx: tokio_util::sync::CancellationToken)\n"
    ));
    code.push_str("where\n");
    code.push_str(&format!("    S: {server}::{ty},\n"));
    code.push_str("{\n");
    code.push_str("    let shutdown = ctx.child_token();\n");
    code.push_str("    let _shutdown_guard = shutdown.clone().drop_guard();\n");
    code.push_str(&format!(
        "    let (client_io, server_io) = tokio::io::duplex({DUPLEX_BUFFER_SIZE});\n\n"
    ));
    code.push_str("    let _server = tokio_util::task::AbortOnDropHandle::new(tokio::spawn(\n");
    code.push_str("        tonic::transport::Server::builder()\n");
    code.push_str(&format!(
        "            .add_service({server}::{ty}Server::new(server))\n"
    ));
    code.push_str("            .serve_with_incoming_shutdown(\n");
    code.push_str("                tokio_stream::StreamExt::chain(\n");
    code.push_str("                    tokio_stream::once(Ok::<_, std::io::Error>(server_io)),\n");
    code.push_str("                    tokio_stream::pending(),\n");
    code.push_str("                ),\n");
    code.push_str("                shutdown.cancelled_owned(),\n");
    code.push_str("            ),\n");
    code.push_str("    ));\n\n");
    code.push_str("    let mut client_io = Some(client_io);\n");
    code.push_str("    let channel = match tonic::transport::Endpoint::from_static(\"http://contract.local\")\n");
    code.push_str("        .connect_with_connector(tower::service_fn(move |_: tonic::transport::Uri| {\n");
    code.push_str("            let io = client_io.take();\n");
    code.push_str("            async move {\n");
    code.push_str("                io.map(hyper_util::rt::TokioIo::new).ok_or_else(|| {\n");
    code.push_str("                    std::io::Error::other(\"in-memory transport already connected\")\n");
    code.push_str("                })\n");
    code.push_str("            }\n");
    code.push_str("        }))\n");
    code.push_str("        .await\n");
    code.push_str("    {\n");
    code.push_str("        Ok(channel) => channel,\n");
    code.push_str(&format!(
        "        Err(err) => panic!(\"{{}}: connecting over the in-memory transport: {{}}\", {label}, err),\n"
    ));
    code.push_str("    };\n");
    code.push_str(&format!(
        "    let mut client = {client}::{ty}Client::new(channel);\n\n"
    ));
    code.push_str(&format!(
        "    let failures = run_{snake}_contract_tests(&mut client, &ctx).await;\n"
    ));
    code.push_str("    assert!(\n");
    code.push_str("        failures.is_empty(),\n");
    code.push_str("        \"{} contract failures:\\n{}\",\n");
    code.push_str(&format!("        {label},\n"));
    code.push_str("        failures.join(\"\\n\")\n");
    code.push_str("    );\n");
    code.push_str("}\n");
    code
}

/// Opens `run_<service>_contract_tests`.
pub fn runner_open(service: &str, has_cases: bool) -> String {
    let ty = to_upper_camel(service);
    let mut code = String::new();
    code.push_str(&format!(
        "/// Runs every contract case of `{}` through `client`.\n",
        comment_text(service)
    ));
    code.push_str("///\n");
    code.push_str("/// Returns one message per failed subtest. Subtests run in contract order\n");
    code.push_str("/// and a failure does not stop the remaining ones.\n");
    if !has_cases {
        code.push_str("#[allow(unused_mut, unused_variables)]\n");
    }
    code.push_str(&format!(
        "pub async fn run_{}_contract_tests(\n",
        to_snake(service)
    ));
    code.push_str(&format!(
        "    client: &mut {}::{ty}Client<tonic::transport::Channel>,\n",
        client_module(service)
    ));
    code.push_str("    ctx: &tokio_util::sync::CancellationToken,\n");
    code.push_str(") -> Vec<String> {\n");
    code.push_str("    let mut failures: Vec<String> = Vec::new();\n");
    code
}

/// Success rows plus the loop asserting `Ok` with an equal response.
pub fn success_table(
    method: &str,
    input_type: &str,
    output_type: &str,
    rows: &[SuccessRow<'_>],
) -> String {
    let mut code = format!(
        "        let success_cases: Vec<(&str, {input_type}, {output_type})> = vec![\n"
    );
    for row in rows {
        code.push_str(&format!(
            "            (\n                {},\n                {},\n                {},\n            ),\n",
            rust_string_literal(row.name),
            row.request,
            row.expected
        ));
    }
    code.push_str("        ];\n");
    code.push_str("        for (name, request, expected) in success_cases {\n");
    code.push_str(&format!(
        "            match ctx.run_until_cancelled(client.{}(request)).await {{\n",
        to_snake(method)
    ));
    code.push_str("                None => failures.push(format!(\"{name}: cancelled\")),\n");
    code.push_str("                Some(Err(status)) => failures.push(format!(\n");
    code.push_str("                    \"{name}: expected a response, got status {:?}: {:?}\",\n");
    code.push_str("                    status.code(),\n");
    code.push_str("                    status.message()\n");
    code.push_str("                )),\n");
    code.push_str("                Some(Ok(response)) => {\n");
    code.push_str("                    let actual = response.into_inner();\n");
    code.push_str("                    if actual != expected {\n");
    code.push_str("                        failures.push(format!(\n");
    code.push_str("                            \"{name}: response mismatch\\n  expected: {expected:?}\\n  actual:   {actual:?}\"\n");
    code.push_str("                        ));\n");
    code.push_str("                    }\n");
    code.push_str("                }\n");
    code.push_str("            }\n");
    code.push_str("        }\n");
    code
}

/// Failure rows plus the loop asserting `Err` with equal code and message.
pub fn failure_table(method: &str, input_type: &str, rows: &[FailureRow<'_>]) -> String {
    let mut code = format!(
        "        let failure_cases: Vec<(&str, {input_type}, tonic::Code, &str)> = vec![\n"
    );
    for row in rows {
        code.push_str(&format!(
            "            (\n                {},\n                {},\n                tonic::Code::{},\n                {},\n            ),\n",
            rust_string_literal(row.name),
            row.request,
            row.error.code.tonic_variant(),
            rust_string_literal(&row.error.message)
        ));
    }
    code.push_str("        ];\n");
    code.push_str("        for (name, request, code, message) in failure_cases {\n");
    code.push_str(&format!(
        "            match ctx.run_until_cancelled(client.{}(request)).await {{\n",
        to_snake(method)
    ));
    code.push_str("                None => failures.push(format!(\"{name}: cancelled\")),\n");
    code.push_str("                Some(Ok(response)) => failures.push(format!(\n");
    code.push_str("                    \"{name}: expected status {code:?}: {message:?}, got response {:?}\",\n");
    code.push_str("                    response.get_ref()\n");
    code.push_str("                )),\n");
    code.push_str("                Some(Err(status)) => {\n");
    code.push_str("                    if status.code() != code || status.message() != message {\n");
    code.push_str("                        failures.push(format!(\n");
    code.push_str("                            \"{name}: expected status {code:?}: {message:?}, got {:?}: {:?}\",\n");
    code.push_str("                            status.code(),\n");
    code.push_str("                            status.message()\n");
    code.push_str("                        ));\n");
    code.push_str("                    }\n");
    code.push_str("                }\n");
    code.push_str("            }\n");
    code.push_str("        }\n");
    code
}

/// Closes the runner, returning the collected failures.
pub fn runner_close() -> String {
    "    failures\n}\n".to_string()
}
