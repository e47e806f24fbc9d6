#![deny(missing_docs)]

//! # Strategies
//!
//! This module defines the architecture for pluggable runtime emission.
//!
//! - **traits**: Defines `RuntimeStrategy` for supporting new RPC runtimes.
//! - **tonic**: The default implementation for tonic + prost.

pub mod tonic;
pub mod traits;

// Re-export for easier access downstream
pub use self::tonic::TonicStrategy;
pub use traits::{FailureRow, RuntimeStrategy, SuccessRow};
