#![deny(missing_docs)]

//! # Resolved Values
//!
//! Schema-validated representation of contract values.
//!
//! A `ResolvedMessage` pairs a message type with its populated fields only,
//! in ascending field-number order. Values belong to a closed set of kinds
//! (`ValueKind`) so the resolver and every emitter work against the same
//! interface.

use prost::bytes::Bytes;
use prost_reflect::{
    DynamicMessage, EnumDescriptor, FieldDescriptor, Kind, MessageDescriptor,
    MapKey as ReflectMapKey, Value as ReflectValue,
};
use std::collections::HashMap;

/// Closed set of value kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Numbers, booleans, strings and bytes.
    Scalar,
    /// Enum value, stored by number.
    Enum,
    /// Nested message.
    Message,
    /// Repeated field.
    Repeated,
    /// Map field.
    Map,
}

impl ValueKind {
    /// Kind of the values a field holds.
    pub fn of(field: &FieldDescriptor) -> Self {
        if field.is_map() {
            ValueKind::Map
        } else if field.is_list() {
            ValueKind::Repeated
        } else {
            match field.kind() {
                Kind::Message(_) => ValueKind::Message,
                Kind::Enum(_) => ValueKind::Enum,
                _ => ValueKind::Scalar,
            }
        }
    }
}

/// A scalar protobuf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `bool`
    Bool(bool),
    /// `int32`, `sint32`, `sfixed32`
    I32(i32),
    /// `int64`, `sint64`, `sfixed64`
    I64(i64),
    /// `uint32`, `fixed32`
    U32(u32),
    /// `uint64`, `fixed64`
    U64(u64),
    /// `float`
    F32(f32),
    /// `double`
    F64(f64),
    /// `string`
    String(String),
    /// `bytes`
    Bytes(Vec<u8>),
}

/// A map key. Ordered so map entries render deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// `bool` key.
    Bool(bool),
    /// 32-bit signed key.
    I32(i32),
    /// 64-bit signed key.
    I64(i64),
    /// 32-bit unsigned key.
    U32(u32),
    /// 64-bit unsigned key.
    U64(u64),
    /// `string` key.
    String(String),
}

impl MapKey {
    /// Converts a dynamic map key.
    pub fn from_reflect(key: &ReflectMapKey) -> Self {
        match key {
            ReflectMapKey::Bool(v) => MapKey::Bool(*v),
            ReflectMapKey::I32(v) => MapKey::I32(*v),
            ReflectMapKey::I64(v) => MapKey::I64(*v),
            ReflectMapKey::U32(v) => MapKey::U32(*v),
            ReflectMapKey::U64(v) => MapKey::U64(*v),
            ReflectMapKey::String(v) => MapKey::String(v.clone()),
        }
    }

    /// Converts back into a dynamic map key.
    pub fn to_reflect(&self) -> ReflectMapKey {
        match self {
            MapKey::Bool(v) => ReflectMapKey::Bool(*v),
            MapKey::I32(v) => ReflectMapKey::I32(*v),
            MapKey::I64(v) => ReflectMapKey::I64(*v),
            MapKey::U32(v) => ReflectMapKey::U32(*v),
            MapKey::U64(v) => ReflectMapKey::U64(*v),
            MapKey::String(v) => ReflectMapKey::String(v.clone()),
        }
    }
}

/// The value of one populated field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Scalar value.
    Scalar(Scalar),
    /// Enum value. `number` may be undeclared in open enums.
    Enum {
        /// Enum type of the field.
        descriptor: EnumDescriptor,
        /// Wire number of the value.
        number: i32,
    },
    /// Nested message.
    Message(ResolvedMessage),
    /// Elements of a repeated field.
    Repeated(Vec<FieldValue>),
    /// Entries of a map field, sorted by key.
    Map(Vec<(MapKey, FieldValue)>),
}

impl FieldValue {
    /// Kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Scalar(_) => ValueKind::Scalar,
            FieldValue::Enum { .. } => ValueKind::Enum,
            FieldValue::Message(_) => ValueKind::Message,
            FieldValue::Repeated(_) => ValueKind::Repeated,
            FieldValue::Map(_) => ValueKind::Map,
        }
    }

    /// Converts back into a dynamic value.
    pub fn to_reflect(&self) -> ReflectValue {
        match self {
            FieldValue::Scalar(scalar) => match scalar {
                Scalar::Bool(v) => ReflectValue::Bool(*v),
                Scalar::I32(v) => ReflectValue::I32(*v),
                Scalar::I64(v) => ReflectValue::I64(*v),
                Scalar::U32(v) => ReflectValue::U32(*v),
                Scalar::U64(v) => ReflectValue::U64(*v),
                Scalar::F32(v) => ReflectValue::F32(*v),
                Scalar::F64(v) => ReflectValue::F64(*v),
                Scalar::String(v) => ReflectValue::String(v.clone()),
                Scalar::Bytes(v) => ReflectValue::Bytes(Bytes::from(v.clone())),
            },
            FieldValue::Enum { number, .. } => ReflectValue::EnumNumber(*number),
            FieldValue::Message(message) => ReflectValue::Message(message.to_dynamic()),
            FieldValue::Repeated(items) => {
                ReflectValue::List(items.iter().map(FieldValue::to_reflect).collect())
            }
            FieldValue::Map(entries) => ReflectValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_reflect(), v.to_reflect()))
                    .collect::<HashMap<_, _>>(),
            ),
        }
    }
}

/// A populated field and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Descriptor taken from the message's field table.
    pub descriptor: FieldDescriptor,
    /// The value.
    pub value: FieldValue,
}

/// A message type with its populated fields, in ascending field-number order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMessage {
    /// Message type.
    pub descriptor: MessageDescriptor,
    /// Populated fields.
    pub fields: Vec<ResolvedField>,
}

impl ResolvedMessage {
    /// A message with no populated field.
    pub fn empty(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            fields: Vec::new(),
        }
    }

    /// Numbers of the populated fields.
    pub fn field_numbers(&self) -> Vec<u32> {
        self.fields.iter().map(|f| f.descriptor.number()).collect()
    }

    /// Value of a populated field.
    pub fn get(&self, number: u32) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.descriptor.number() == number)
            .map(|f| &f.value)
    }

    /// Re-serializes the populated fields into a dynamic message.
    pub fn to_dynamic(&self) -> DynamicMessage {
        let mut message = DynamicMessage::new(self.descriptor.clone());
        for field in &self.fields {
            message.set_field(&field.descriptor, field.value.to_reflect());
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_pool, message};

    #[test]
    fn test_value_kind_classification() {
        let pool = fixture_pool();
        let lookup = message(&pool, "LookupRequest");
        let kind = |name: &str| ValueKind::of(&lookup.get_field_by_name(name).unwrap());

        assert_eq!(kind("type"), ValueKind::Scalar);
        assert_eq!(kind("filter"), ValueKind::Message);
        assert_eq!(kind("ids"), ValueKind::Repeated);
        assert_eq!(kind("weights"), ValueKind::Map);

        let filter = pool
            .get_message_by_name("contract.v1.LookupRequest.Filter")
            .unwrap();
        assert_eq!(
            ValueKind::of(&filter.get_field_by_name("status").unwrap()),
            ValueKind::Enum
        );
    }

    #[test]
    fn test_map_keys_sort() {
        let mut keys = vec![
            MapKey::String("b".into()),
            MapKey::String("a".into()),
            MapKey::String("c".into()),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MapKey::String("a".into()),
                MapKey::String("b".into()),
                MapKey::String("c".into())
            ]
        );
        assert_eq!(
            MapKey::from_reflect(&MapKey::I64(-3).to_reflect()),
            MapKey::I64(-3)
        );
    }

    #[test]
    fn test_to_dynamic_sets_populated_fields_only() {
        let pool = fixture_pool();
        let request = message(&pool, "MyMethodRequest");
        let field = request.get_field_by_name("request_field").unwrap();
        let resolved = ResolvedMessage {
            descriptor: request.clone(),
            fields: vec![ResolvedField {
                descriptor: field.clone(),
                value: FieldValue::Scalar(Scalar::String("VALUE".into())),
            }],
        };

        let dynamic = resolved.to_dynamic();
        assert!(dynamic.has_field(&field));
        assert_eq!(
            dynamic.get_field(&field).as_str(),
            Some("VALUE")
        );
        assert_eq!(resolved.field_numbers(), vec![1]);
        assert!(ResolvedMessage::empty(request).to_dynamic().fields().next().is_none());
    }
}
