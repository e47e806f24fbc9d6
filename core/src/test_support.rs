//! Shared fixtures for unit tests.

use crate::contract::Contract;
use prost_reflect::{DescriptorPool, MessageDescriptor};
use std::path::PathBuf;

pub(crate) fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub(crate) fn fixture_pool() -> DescriptorPool {
    let mut compiler = protox::Compiler::new([fixtures_dir()]).expect("fixture includes");
    compiler.include_imports(true);
    compiler
        .open_file("contract.proto")
        .expect("fixture proto compiles");
    compiler.descriptor_pool()
}

pub(crate) fn fixture_contract() -> Contract {
    let source = std::fs::read_to_string(fixtures_dir().join("contract.json")).unwrap();
    Contract::from_json(&source).unwrap()
}

pub(crate) fn message(pool: &DescriptorPool, name: &str) -> MessageDescriptor {
    pool.get_message_by_name(&format!("contract.v1.{name}"))
        .unwrap_or_else(|| panic!("fixture message {name}"))
}
