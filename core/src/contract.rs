#![deny(missing_docs)]

//! # Contract Model
//!
//! Serde representation of the contract document:
//!
//! ```json
//! {
//!   "name": "users",
//!   "services": {
//!     "MyService": {
//!       "MyMethod": {
//!         "successCases": [{"description": "...", "request": {}, "response": {}}],
//!         "failureCases": [{"description": "...", "request": {}, "error": {"code": "NotFound", "message": "..."}}]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Values stay untyped JSON here. They are checked against the schema later,
//! when each case is compiled.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A parsed contract document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contract {
    /// Human readable contract name.
    #[serde(default)]
    pub name: String,
    /// Service name -> service contract.
    #[serde(default)]
    pub services: IndexMap<String, ServiceContract>,
}

/// Method name -> method contract.
pub type ServiceContract = IndexMap<String, MethodContract>;

/// Ordered cases for one method.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodContract {
    /// Request/response pairs, in authoring order.
    #[serde(default)]
    pub success_cases: Vec<SuccessCase>,
    /// Request/error pairs, in authoring order.
    #[serde(default)]
    pub failure_cases: Vec<FailureCase>,
}

impl MethodContract {
    /// True when the method declares no case at all.
    pub fn is_empty(&self) -> bool {
        self.success_cases.is_empty() && self.failure_cases.is_empty()
    }
}

/// A request that must be answered with a response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuccessCase {
    /// Free text used for test naming.
    #[serde(default)]
    pub description: String,
    /// JSON matching the method input type.
    pub request: serde_json::Value,
    /// JSON matching the method output type.
    pub response: serde_json::Value,
}

/// A request that must be answered with an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FailureCase {
    /// Free text used for test naming.
    #[serde(default)]
    pub description: String,
    /// JSON matching the method input type.
    pub request: serde_json::Value,
    /// Expected status.
    pub error: ErrorSpec,
}

/// Status code name and literal message of a failure case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorSpec {
    /// Status code name, validated at compile time.
    #[serde(alias = "errorCode")]
    pub code: String,
    /// Literal status message.
    #[serde(default)]
    pub message: String,
}

impl Contract {
    /// Parses a JSON contract document.
    pub fn from_json(source: &str) -> AppResult<Self> {
        serde_json::from_str(source).map_err(|e| AppError::MalformedContract(e.to_string()))
    }

    /// Parses a YAML contract document with the same shape.
    pub fn from_yaml(source: &str) -> AppResult<Self> {
        serde_yaml::from_str(source).map_err(|e| AppError::MalformedContract(e.to_string()))
    }

    /// Looks up the contract of a service.
    pub fn service(&self, name: &str) -> Option<&ServiceContract> {
        self.services.get(name)
    }
}

/// Reads and parses a contract file.
///
/// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
pub fn read_contract_file(path: &Path) -> AppResult<Contract> {
    let source = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        Contract::from_yaml(&source)
    } else {
        Contract::from_json(&source)
    }
}
