//! prost/tonic output of the contract fixture, with its generated contract
//! unit included in the same package module.

pub mod contract {
    pub mod v1 {
        tonic::include_proto!("contract.v1");
        include!(concat!(env!("OUT_DIR"), "/contract_contract.rs"));
    }
}
