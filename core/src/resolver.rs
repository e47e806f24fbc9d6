#![deny(missing_docs)]

//! # Value Resolver
//!
//! Decodes untyped contract JSON into `ResolvedMessage`s.
//!
//! Decoding is schema aware: the JSON is read with the protobuf JSON mapping
//! of the target message type, so type mismatches and unknown names are
//! rejected by the decoder. Every populated field is then looked up by number
//! in the type's precomputed field table; a field the table does not know
//! means the contract and the schema have drifted.

use crate::error::{AppError, AppResult};
use crate::schema::SchemaIndex;
use crate::value::{FieldValue, MapKey, ResolvedField, ResolvedMessage, Scalar};
use prost_reflect::{DynamicMessage, Kind, MessageDescriptor, ReflectMessage, Value as ReflectValue};

/// Resolves contract values against a schema index.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    index: &'a SchemaIndex,
}

impl<'a> ValueResolver<'a> {
    /// Creates a resolver over the given index.
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self { index }
    }

    /// Decodes `json` as an instance of `message`.
    pub fn resolve(
        &self,
        json: &serde_json::Value,
        message: &MessageDescriptor,
    ) -> AppResult<ResolvedMessage> {
        let decoded = DynamicMessage::deserialize(message.clone(), json).map_err(|e| {
            AppError::SchemaConformance {
                message: message.full_name().to_string(),
                reason: e.to_string(),
            }
        })?;
        self.resolve_dynamic(&decoded)
    }

    /// Resolves an already decoded message.
    pub fn resolve_dynamic(&self, message: &DynamicMessage) -> AppResult<ResolvedMessage> {
        let descriptor = message.descriptor();
        let table = self.index.table(&descriptor)?;

        if let Some((extension, _)) = message.extensions().next() {
            return Err(AppError::FieldMismatch {
                field: extension.full_name().to_string(),
                message: descriptor.full_name().to_string(),
            });
        }

        let mut fields = Vec::new();
        for (populated, value) in message.fields() {
            let field = table
                .get(populated.number())
                .ok_or_else(|| AppError::FieldMismatch {
                    field: populated.name().to_string(),
                    message: descriptor.full_name().to_string(),
                })?;

            let value = if field.is_map() {
                self.map_value(&field.kind(), value)?
            } else if field.is_list() {
                self.list_value(&field.kind(), value)?
            } else {
                self.single_value(&field.kind(), value)?
            };

            fields.push(ResolvedField {
                descriptor: field.clone(),
                value,
            });
        }

        Ok(ResolvedMessage { descriptor, fields })
    }

    fn list_value(&self, kind: &Kind, value: &ReflectValue) -> AppResult<FieldValue> {
        let items = value
            .as_list()
            .ok_or_else(|| unexpected("list", value))?
            .iter()
            .map(|item| self.single_value(kind, item))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(FieldValue::Repeated(items))
    }

    fn map_value(&self, kind: &Kind, value: &ReflectValue) -> AppResult<FieldValue> {
        let entry = kind
            .as_message()
            .ok_or_else(|| AppError::General("map field without entry type".into()))?;
        let value_kind = entry.map_entry_value_field().kind();

        let mut entries = value
            .as_map()
            .ok_or_else(|| unexpected("map", value))?
            .iter()
            .map(|(key, item)| Ok((MapKey::from_reflect(key), self.single_value(&value_kind, item)?)))
            .collect::<AppResult<Vec<_>>>()?;
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(FieldValue::Map(entries))
    }

    fn single_value(&self, kind: &Kind, value: &ReflectValue) -> AppResult<FieldValue> {
        let resolved = match value {
            ReflectValue::Bool(v) => FieldValue::Scalar(Scalar::Bool(*v)),
            ReflectValue::I32(v) => FieldValue::Scalar(Scalar::I32(*v)),
            ReflectValue::I64(v) => FieldValue::Scalar(Scalar::I64(*v)),
            ReflectValue::U32(v) => FieldValue::Scalar(Scalar::U32(*v)),
            ReflectValue::U64(v) => FieldValue::Scalar(Scalar::U64(*v)),
            ReflectValue::F32(v) => FieldValue::Scalar(Scalar::F32(*v)),
            ReflectValue::F64(v) => FieldValue::Scalar(Scalar::F64(*v)),
            ReflectValue::String(v) => FieldValue::Scalar(Scalar::String(v.clone())),
            ReflectValue::Bytes(v) => FieldValue::Scalar(Scalar::Bytes(v.to_vec())),
            ReflectValue::EnumNumber(number) => FieldValue::Enum {
                descriptor: kind
                    .as_enum()
                    .cloned()
                    .ok_or_else(|| unexpected("enum", value))?,
                number: *number,
            },
            ReflectValue::Message(message) => FieldValue::Message(self.resolve_dynamic(message)?),
            ReflectValue::List(_) | ReflectValue::Map(_) => {
                return Err(unexpected("single value", value))
            }
        };
        Ok(resolved)
    }
}

fn unexpected(expected: &str, value: &ReflectValue) -> AppError {
    AppError::General(format!("expected {expected} while resolving, found {value:?}"))
}
