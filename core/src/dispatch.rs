#![deny(missing_docs)]

//! # Case Compiler
//!
//! Turns the ordered cases of a method contract into a `DispatchSpec`: an
//! ordered list of `(request, outcome)` entries.
//!
//! Success cases come first in authoring order, followed by failure cases in
//! authoring order. Dispatch is first-match-wins over that order. A request
//! that matches no entry gets the default outcome: a zero-value response and
//! no error.

use crate::contract::{Contract, MethodContract, ServiceContract};
use crate::error::{AppError, AppResult};
use crate::resolver::ValueResolver;
use crate::schema::{MethodSchema, SchemaIndex, ServiceSchema};
use crate::status::{validate_error_code, StatusCode};
use crate::value::ResolvedMessage;

/// Expected status of a failure case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseError {
    /// Validated status code.
    pub code: StatusCode,
    /// Literal status message.
    pub message: String,
}

/// What a matched entry answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Success case: the resolved response.
    Response(ResolvedMessage),
    /// Failure case: the canned status.
    Error(CaseError),
}

impl Outcome {
    /// True for failure entries.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

/// One compiled case.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchEntry {
    /// Case description from the contract.
    pub description: String,
    /// Resolved request the incoming call is compared with.
    pub request: ResolvedMessage,
    /// Outcome returned on match.
    pub outcome: Outcome,
}

/// Ordered match table of one method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchSpec {
    /// Success entries followed by failure entries.
    pub entries: Vec<DispatchEntry>,
}

impl DispatchSpec {
    /// Returns the first entry whose request equals `request`.
    ///
    /// `None` means the default outcome applies.
    pub fn dispatch(&self, request: &ResolvedMessage) -> Option<&DispatchEntry> {
        self.entries.iter().find(|entry| &entry.request == request)
    }

    /// Success entries, in order.
    pub fn success_entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.entries.iter().filter(|e| !e.outcome.is_error())
    }

    /// Failure entries, in order.
    pub fn failure_entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.entries.iter().filter(|e| e.outcome.is_error())
    }

    /// True when the method declares no case.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A method paired with its compiled cases.
#[derive(Debug, Clone)]
pub struct CompiledMethod {
    /// Method schema.
    pub schema: MethodSchema,
    /// Compiled cases; empty when the contract has none.
    pub spec: DispatchSpec,
}

/// A contracted service with every method compiled.
#[derive(Debug, Clone)]
pub struct CompiledService {
    /// Service schema.
    pub schema: ServiceSchema,
    /// One entry per method, in declaration order.
    pub methods: Vec<CompiledMethod>,
}

impl CompiledService {
    /// Methods the emitters can render (unary ones).
    pub fn unary_methods(&self) -> impl Iterator<Item = &CompiledMethod> {
        self.methods.iter().filter(|m| m.schema.is_unary())
    }

    /// Unary methods with at least one case.
    pub fn tested_methods(&self) -> impl Iterator<Item = &CompiledMethod> {
        self.unary_methods().filter(|m| !m.spec.is_empty())
    }
}

/// Compiles contract cases against the schema.
#[derive(Debug, Clone, Copy)]
pub struct CaseCompiler<'a> {
    resolver: ValueResolver<'a>,
}

impl<'a> CaseCompiler<'a> {
    /// Creates a compiler resolving values through `index`.
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self {
            resolver: ValueResolver::new(index),
        }
    }

    /// Compiles the cases of one method.
    ///
    /// The first invalid case aborts compilation. Errors carry the service,
    /// method and case description.
    pub fn compile_method(
        &self,
        service: &str,
        method: &MethodSchema,
        contract: Option<&MethodContract>,
    ) -> AppResult<DispatchSpec> {
        let Some(contract) = contract else {
            return Ok(DispatchSpec::default());
        };

        if !contract.is_empty() && !method.is_unary() {
            return Err(AppError::StreamingMethod {
                service: service.to_string(),
                method: method.name.clone(),
            });
        }

        let mut entries =
            Vec::with_capacity(contract.success_cases.len() + contract.failure_cases.len());

        for case in &contract.success_cases {
            let entry = self
                .resolver
                .resolve(&case.request, &method.input)
                .and_then(|request| {
                    let response = self.resolver.resolve(&case.response, &method.output)?;
                    Ok(DispatchEntry {
                        description: case.description.clone(),
                        request,
                        outcome: Outcome::Response(response),
                    })
                })
                .map_err(|e| e.in_case(service, &method.name, &case.description))?;
            entries.push(entry);
        }

        for case in &contract.failure_cases {
            let entry = self
                .resolver
                .resolve(&case.request, &method.input)
                .and_then(|request| {
                    let code = validate_error_code(&case.error.code)?;
                    Ok(DispatchEntry {
                        description: case.description.clone(),
                        request,
                        outcome: Outcome::Error(CaseError {
                            code,
                            message: case.error.message.clone(),
                        }),
                    })
                })
                .map_err(|e| e.in_case(service, &method.name, &case.description))?;
            entries.push(entry);
        }

        tracing::debug!(
            service,
            method = %method.name,
            entries = entries.len(),
            "compiled method contract"
        );
        Ok(DispatchSpec { entries })
    }

    /// Compiles every method of a service.
    pub fn compile_service(
        &self,
        service: &ServiceSchema,
        contract: &ServiceContract,
    ) -> AppResult<CompiledService> {
        for name in contract.keys() {
            if !service.methods.iter().any(|m| &m.name == name) {
                tracing::warn!(
                    service = %service.name,
                    method = %name,
                    "contract method does not exist in the schema"
                );
            }
        }

        let methods = service
            .methods
            .iter()
            .map(|method| {
                let spec = self.compile_method(&service.name, method, contract.get(&method.name))?;
                Ok(CompiledMethod {
                    schema: method.clone(),
                    spec,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CompiledService {
            schema: service.clone(),
            methods,
        })
    }

    /// Compiles the services of a file that appear in the contract.
    pub fn compile_contracted(
        &self,
        services: &[ServiceSchema],
        contract: &Contract,
    ) -> AppResult<Vec<CompiledService>> {
        services
            .iter()
            .filter_map(|service| {
                contract
                    .service(&service.name)
                    .map(|service_contract| self.compile_service(service, service_contract))
            })
            .collect()
    }
}
