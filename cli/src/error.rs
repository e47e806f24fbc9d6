#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the plugin binary.

use derive_more::{Display, From};
use rpc_contract_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure inside the generation engine.
    #[display("{}", _0)]
    App(AppError),

    /// The protoc request could not be decoded.
    #[display("Invalid CodeGeneratorRequest: {}", _0)]
    Decode(prost::DecodeError),

    /// The protoc response could not be encoded.
    #[display("Failed to encode CodeGeneratorResponse: {}", _0)]
    Encode(prost::EncodeError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::App(e) => Some(e),
            CliError::Decode(e) => Some(e),
            CliError::Encode(e) => Some(e),
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
