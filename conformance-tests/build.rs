use std::env;
use std::fs;
use std::path::PathBuf;

use prost_reflect::DescriptorPool;
use rpc_contract_core::{generate_units, read_contract_file, TonicStrategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let fixtures = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("../core/tests/fixtures");
    println!("cargo:rerun-if-changed={}", fixtures.display());

    let mut compiler = protox::Compiler::new([&fixtures])?;
    compiler.include_imports(true);
    compiler.open_file("contract.proto")?;
    let descriptors = compiler.file_descriptor_set();

    tonic_build::configure().compile_fds(descriptors.clone())?;

    let pool = DescriptorPool::from_file_descriptor_set(descriptors)?;
    let contract = read_contract_file(&fixtures.join("contract.json"))?;
    let units = generate_units(
        &pool,
        &["contract.proto".to_string()],
        &contract,
        &TonicStrategy,
    )?;
    for unit in units {
        fs::write(out_dir.join(&unit.name), unit.content)?;
    }
    Ok(())
}
