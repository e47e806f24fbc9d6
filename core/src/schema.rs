#![deny(missing_docs)]

//! # Schema Model
//!
//! Read-only view of the resolved protobuf schema: files, services, methods
//! and the message types they exchange.
//!
//! Descriptors come from `prost_reflect`. The `SchemaIndex` precomputes one
//! field-number table per message type so every case that references a type
//! shares the same lookup.

use crate::error::{AppError, AppResult};
use prost_reflect::{
    DescriptorPool, FieldDescriptor, FileDescriptor, MessageDescriptor, MethodDescriptor,
    ServiceDescriptor,
};
use std::collections::{BTreeMap, HashMap};

/// Services declared by one `.proto` file.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    /// Path of the file as known to the compiler (e.g. `users/v1/users.proto`).
    pub name: String,
    /// Protobuf package of the file.
    pub package: String,
    /// Services in declaration order.
    pub services: Vec<ServiceSchema>,
}

impl SchemaFile {
    /// Builds the view of a file descriptor.
    pub fn from_descriptor(file: &FileDescriptor) -> Self {
        Self {
            name: file.name().to_string(),
            package: file.package_name().to_string(),
            services: file.services().map(|s| ServiceSchema::from_descriptor(&s)).collect(),
        }
    }
}

/// A service and its methods.
#[derive(Debug, Clone)]
pub struct ServiceSchema {
    /// Unqualified service name, as used for contract lookup.
    pub name: String,
    /// Protobuf package the service belongs to.
    pub package: String,
    /// Methods in declaration order.
    pub methods: Vec<MethodSchema>,
}

impl ServiceSchema {
    /// Builds the view of a service descriptor.
    pub fn from_descriptor(service: &ServiceDescriptor) -> Self {
        Self {
            name: service.name().to_string(),
            package: service.parent_file().package_name().to_string(),
            methods: service.methods().map(|m| MethodSchema::from_descriptor(&m)).collect(),
        }
    }
}

/// A method with its input and output message types.
#[derive(Debug, Clone)]
pub struct MethodSchema {
    /// Unqualified method name, as used for contract lookup.
    pub name: String,
    /// Request message type.
    pub input: MessageDescriptor,
    /// Response message type.
    pub output: MessageDescriptor,
    /// Client sends a stream of requests.
    pub client_streaming: bool,
    /// Server answers with a stream of responses.
    pub server_streaming: bool,
}

impl MethodSchema {
    /// Builds the view of a method descriptor.
    pub fn from_descriptor(method: &MethodDescriptor) -> Self {
        Self {
            name: method.name().to_string(),
            input: method.input(),
            output: method.output(),
            client_streaming: method.is_client_streaming(),
            server_streaming: method.is_server_streaming(),
        }
    }

    /// True for plain request/response methods.
    pub fn is_unary(&self) -> bool {
        !self.client_streaming && !self.server_streaming
    }
}

/// Field number -> descriptor lookup for one message type.
#[derive(Debug, Clone)]
pub struct FieldTable {
    message: String,
    by_number: BTreeMap<u32, FieldDescriptor>,
}

impl FieldTable {
    /// Builds the table of a message type.
    pub fn new(message: &MessageDescriptor) -> Self {
        Self {
            message: message.full_name().to_string(),
            by_number: message.fields().map(|f| (f.number(), f)).collect(),
        }
    }

    /// Full name of the message type this table describes.
    pub fn message_name(&self) -> &str {
        &self.message
    }

    /// Looks up a field by number.
    pub fn get(&self, number: u32) -> Option<&FieldDescriptor> {
        self.by_number.get(&number)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    /// True when the type declares no field.
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

/// Precomputed field tables for every message type of a descriptor pool.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    tables: HashMap<String, FieldTable>,
}

impl SchemaIndex {
    /// Indexes all message types, nested and map entry types included.
    pub fn new(pool: &DescriptorPool) -> Self {
        let tables = pool
            .all_messages()
            .map(|m| (m.full_name().to_string(), FieldTable::new(&m)))
            .collect();
        Self { tables }
    }

    /// Returns the table of a message type.
    pub fn table(&self, message: &MessageDescriptor) -> AppResult<&FieldTable> {
        self.tables.get(message.full_name()).ok_or_else(|| {
            AppError::Descriptor(format!(
                "message {} is not part of the indexed schema",
                message.full_name()
            ))
        })
    }

    /// Number of indexed message types.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no message type was indexed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_pool;

    #[test]
    fn test_schema_file_lists_services_and_methods() {
        let pool = fixture_pool();
        let file = pool.get_file_by_name("contract.proto").unwrap();
        let schema = SchemaFile::from_descriptor(&file);

        assert_eq!(schema.package, "contract.v1");
        let names: Vec<&str> = schema.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["MyService", "Unlisted"]);

        let my_service = &schema.services[0];
        let methods: Vec<&str> = my_service.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, vec!["MyMethod", "Lookup", "Watch", "Ping"]);
        assert_eq!(my_service.methods[0].input.name(), "MyMethodRequest");
        assert!(my_service.methods[0].is_unary());
        assert!(!my_service.methods[2].is_unary());
        assert!(my_service.methods[3].is_unary());
    }

    #[test]
    fn test_index_covers_nested_types() {
        let pool = fixture_pool();
        let index = SchemaIndex::new(&pool);

        let filter = pool
            .get_message_by_name("contract.v1.LookupRequest.Filter")
            .unwrap();
        let table = index.table(&filter).unwrap();
        assert_eq!(table.message_name(), "contract.v1.LookupRequest.Filter");
        assert_eq!(table.get(1).unwrap().name(), "status");
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_index_rejects_foreign_message() {
        let index = SchemaIndex::default();
        let pool = fixture_pool();
        let message = pool.get_message_by_name("contract.v1.MyMethodRequest").unwrap();
        assert!(matches!(
            index.table(&message).unwrap_err(),
            AppError::Descriptor(_)
        ));
    }
}
