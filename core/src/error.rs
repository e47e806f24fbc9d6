//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every failure during a generation run aborts the whole run, so each variant
//! carries enough context (message type, field, status code, case) for the
//! contract author to locate the problem.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The contract document does not fit the contract shape.
    #[from(ignore)]
    #[display("Malformed contract: {_0}")]
    MalformedContract(String),

    /// A required option was not supplied.
    #[from(ignore)]
    #[display("'{_0}' option not provided")]
    MissingOption(String),

    /// A contract value does not decode against its declared message type.
    #[from(ignore)]
    #[display("Value does not conform to message {message}: {reason}")]
    SchemaConformance {
        /// Full name of the target message type.
        message: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A populated field has no descriptor in the message's field table.
    #[from(ignore)]
    #[display("Field not found {field} while inspecting message {message}")]
    FieldMismatch {
        /// Name of the offending field.
        field: String,
        /// Full name of the message being inspected.
        message: String,
    },

    /// A failure case names a status code outside the closed set.
    #[from(ignore)]
    #[display("Invalid error code: {_0}")]
    InvalidErrorCode(String),

    /// Contract cases were declared for a streaming method.
    #[from(ignore)]
    #[display("Method {service}.{method} is streaming; contract cases only support unary methods")]
    StreamingMethod {
        /// Service name.
        service: String,
        /// Method name.
        method: String,
    },

    /// Descriptor pool could not be built or decoded.
    #[from(ignore)]
    #[display("Descriptor Error: {_0}")]
    Descriptor(String),

    /// Locates an error inside a specific contract case.
    #[from(ignore)]
    #[display("{service}.{method} case {case:?}: {source}")]
    Case {
        /// Service name.
        service: String,
        /// Method name.
        method: String,
        /// Case description.
        case: String,
        /// Underlying failure.
        source: Box<AppError>,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Wraps `self` with the service, method and case it was raised for.
    pub fn in_case(self, service: &str, method: &str, case: &str) -> Self {
        AppError::Case {
            service: service.to_string(),
            method: method.to_string(),
            case: case.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping `Case` context wrappers.
    pub fn root_cause(&self) -> &AppError {
        match self {
            AppError::Case { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Case { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
