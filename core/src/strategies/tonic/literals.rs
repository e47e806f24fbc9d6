#![deny(missing_docs)]

//! # Prost Literals
//!
//! Renders resolved messages as Rust expressions constructing the matching
//! `prost` structs.
//!
//! Only populated fields are written; `..Default::default()` fills the rest,
//! which mirrors the zero-value semantics of absent protobuf fields.

use super::naming::{
    enum_variant, field_ident, message_module, primitive_well_known, to_snake, to_upper_camel,
    type_path,
};
use crate::value::{FieldValue, MapKey, ResolvedField, ResolvedMessage, Scalar};
use prost_reflect::{Cardinality, Kind};

/// Expression constructing `message`, for code living in `package`.
pub fn message_literal(message: &ResolvedMessage, package: &str) -> String {
    let full_name = message.descriptor.full_name();

    if let Some(primitive) = primitive_well_known(full_name) {
        return wrapper_literal(message, primitive, package);
    }

    let path = type_path(full_name, package);
    if message.fields.is_empty() {
        return format!("{path}::default()");
    }

    let fields: Vec<String> = message
        .fields
        .iter()
        .map(|field| field_initializer(message, field, package))
        .collect();
    format!("{path} {{ {}, ..Default::default() }}", fields.join(", "))
}

/// Wrapper types map to their inner value; `Empty` maps to `()`.
fn wrapper_literal(message: &ResolvedMessage, primitive: &str, package: &str) -> String {
    if primitive == "()" {
        return "()".to_string();
    }
    match message.get(1) {
        Some(value) => value_expr(value, package),
        None => format!("<{primitive}>::default()"),
    }
}

fn field_initializer(parent: &ResolvedMessage, field: &ResolvedField, package: &str) -> String {
    let descriptor = &field.descriptor;
    let name = field_ident(descriptor);
    let value = value_expr(&field.value, package);

    let synthetic = descriptor.field_descriptor_proto().proto3_optional();
    if let Some(oneof) = descriptor.containing_oneof().filter(|_| !synthetic) {
        return format!(
            "{}: Some({}::{}::{}({}))",
            to_snake(oneof.name()),
            message_module(&parent.descriptor, package),
            to_upper_camel(oneof.name()),
            to_upper_camel(descriptor.name()),
            value
        );
    }

    if descriptor.is_list() || descriptor.is_map() {
        return format!("{name}: {value}");
    }

    let optional = match descriptor.kind() {
        Kind::Message(_) => true,
        _ => descriptor.supports_presence() && descriptor.cardinality() != Cardinality::Required,
    };
    if optional {
        format!("{name}: Some({value})")
    } else {
        format!("{name}: {value}")
    }
}

/// Expression for a single value, without field-level `Some` wrapping.
pub fn value_expr(value: &FieldValue, package: &str) -> String {
    match value {
        FieldValue::Scalar(scalar) => scalar_expr(scalar),
        FieldValue::Enum { descriptor, number } => match enum_variant(descriptor, *number, package) {
            Some(variant) => format!("{variant} as i32"),
            None => format!("{number}i32"),
        },
        FieldValue::Message(message) => message_literal(message, package),
        FieldValue::Repeated(items) => {
            let items: Vec<String> = items.iter().map(|i| value_expr(i, package)).collect();
            format!("vec![{}]", items.join(", "))
        }
        FieldValue::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("({}, {})", map_key_expr(k), value_expr(v, package)))
                .collect();
            format!("[{}].into_iter().collect()", entries.join(", "))
        }
    }
}

/// Expression for a scalar value.
pub fn scalar_expr(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Bool(v) => v.to_string(),
        Scalar::I32(v) if *v == i32::MIN => "i32::MIN".to_string(),
        Scalar::I32(v) => format!("{v}i32"),
        Scalar::I64(v) if *v == i64::MIN => "i64::MIN".to_string(),
        Scalar::I64(v) => format!("{v}i64"),
        Scalar::U32(v) => format!("{v}u32"),
        Scalar::U64(v) => format!("{v}u64"),
        Scalar::F32(v) => float_expr(f64::from(*v), &format!("{v:?}"), "f32"),
        Scalar::F64(v) => float_expr(*v, &format!("{v:?}"), "f64"),
        Scalar::String(v) => format!("String::from({})", rust_string_literal(v)),
        Scalar::Bytes(v) if v.is_empty() => "Vec::new()".to_string(),
        Scalar::Bytes(v) => {
            let bytes: Vec<String> = v.iter().map(|b| format!("{b}u8")).collect();
            format!("vec![{}]", bytes.join(", "))
        }
    }
}

fn float_expr(value: f64, debug: &str, ty: &str) -> String {
    if value.is_nan() {
        format!("{ty}::NAN")
    } else if value == f64::INFINITY {
        format!("{ty}::INFINITY")
    } else if value == f64::NEG_INFINITY {
        format!("{ty}::NEG_INFINITY")
    } else {
        format!("{debug}{ty}")
    }
}

fn map_key_expr(key: &MapKey) -> String {
    match key {
        MapKey::Bool(v) => scalar_expr(&Scalar::Bool(*v)),
        MapKey::I32(v) => scalar_expr(&Scalar::I32(*v)),
        MapKey::I64(v) => scalar_expr(&Scalar::I64(*v)),
        MapKey::U32(v) => scalar_expr(&Scalar::U32(*v)),
        MapKey::U64(v) => scalar_expr(&Scalar::U64(*v)),
        MapKey::String(v) => scalar_expr(&Scalar::String(v.clone())),
    }
}

/// Rust string literal with escapes.
pub fn rust_string_literal(value: &str) -> String {
    format!("{:?}", value)
}
