#![deny(missing_docs)]

//! # Prost Naming
//!
//! Reproduces the identifiers `prost-build` and `tonic-build` generate, so the
//! emitted code can name the user's generated types.

use heck::{ToSnakeCase, ToUpperCamelCase};
use prost_reflect::{EnumDescriptor, FieldDescriptor, MessageDescriptor};

const WELL_KNOWN_PACKAGE: &str = "google.protobuf";

/// Escapes identifiers that collide with Rust keywords.
pub fn sanitize_identifier(ident: &str) -> String {
    match ident {
        "as" | "break" | "const" | "continue" | "else" | "enum" | "false" | "fn" | "for"
        | "if" | "impl" | "in" | "let" | "loop" | "match" | "mod" | "move" | "mut" | "pub"
        | "ref" | "return" | "static" | "struct" | "trait" | "true" | "type" | "unsafe"
        | "use" | "where" | "while" | "dyn" | "abstract" | "become" | "box" | "do" | "final"
        | "macro" | "override" | "priv" | "typeof" | "unsized" | "virtual" | "yield"
        | "async" | "await" | "try" | "gen" => format!("r#{ident}"),
        "self" | "super" | "Self" | "crate" | "extern" => format!("{ident}_"),
        s if s.starts_with(|c: char| c.is_numeric()) => format!("_{ident}"),
        _ => ident.to_string(),
    }
}

/// snake_case identifier for fields, modules and methods.
pub fn to_snake(name: &str) -> String {
    sanitize_identifier(&name.to_snake_case())
}

/// UpperCamelCase identifier for types and variants.
pub fn to_upper_camel(name: &str) -> String {
    sanitize_identifier(&name.to_upper_camel_case())
}

/// Field name inside a prost struct.
pub fn field_ident(field: &FieldDescriptor) -> String {
    to_snake(field.name())
}

/// Rust type for wrapper and empty well-known types, which prost maps to
/// primitives instead of structs.
pub fn primitive_well_known(full_name: &str) -> Option<&'static str> {
    let ty = match full_name {
        "google.protobuf.BoolValue" => "bool",
        "google.protobuf.BytesValue" => "Vec<u8>",
        "google.protobuf.DoubleValue" => "f64",
        "google.protobuf.Empty" => "()",
        "google.protobuf.FloatValue" => "f32",
        "google.protobuf.Int32Value" => "i32",
        "google.protobuf.Int64Value" => "i64",
        "google.protobuf.StringValue" => "String",
        "google.protobuf.UInt32Value" => "u32",
        "google.protobuf.UInt64Value" => "u64",
        _ => return None,
    };
    Some(ty)
}

/// Path of a type named `full_name` as seen from code living in `package`.
///
/// Nested types live in snake_case modules named after their parent message.
/// Types of other packages are reached through `super::`, well-known types
/// through `::prost_types`.
pub fn type_path(full_name: &str, package: &str) -> String {
    if let Some(rest) = full_name.strip_prefix("google.protobuf.") {
        if package != WELL_KNOWN_PACKAGE {
            return join_path("::prost_types", rest.split('.'));
        }
    }

    let mut local = package.split('.').filter(|s| !s.is_empty()).peekable();
    let mut target = full_name.split('.').filter(|s| !s.is_empty()).peekable();
    while local.peek().is_some() && local.peek() == target.peek() {
        local.next();
        target.next();
    }

    let supers: Vec<String> = local.map(|_| "super".to_string()).collect();
    let target: Vec<&str> = target.collect();
    let mut segments = supers;
    if let Some((last, modules)) = target.split_last() {
        segments.extend(modules.iter().map(|m| to_snake(m)));
        segments.push(to_upper_camel(last));
    }
    segments.join("::")
}

fn join_path<'a>(prefix: &str, parts: impl Iterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = parts.collect();
    let mut path = prefix.to_string();
    if let Some((last, modules)) = parts.split_last() {
        for module in modules {
            path.push_str("::");
            path.push_str(&to_snake(module));
        }
        path.push_str("::");
        path.push_str(&to_upper_camel(last));
    }
    path
}

/// Rust type of a message as seen from `package`.
pub fn message_type(message: &MessageDescriptor, package: &str) -> String {
    match primitive_well_known(message.full_name()) {
        Some(primitive) => primitive.to_string(),
        None => type_path(message.full_name(), package),
    }
}

/// Module holding the nested types (and oneof enums) of a message.
pub fn message_module(message: &MessageDescriptor, package: &str) -> String {
    let path = type_path(message.full_name(), package);
    match path.rsplit_once("::") {
        Some((prefix, _)) => format!("{prefix}::{}", to_snake(message.name())),
        None => to_snake(message.name()),
    }
}

/// Enum variant path for a declared value, `None` for undeclared numbers.
pub fn enum_variant(descriptor: &EnumDescriptor, number: i32, package: &str) -> Option<String> {
    let value = descriptor.get_value(number)?;
    let prefix = to_upper_camel(descriptor.name());
    let name = value.name().to_upper_camel_case();
    let variant = match name.strip_prefix(&prefix) {
        Some(stripped) if stripped.starts_with(|c: char| c.is_uppercase()) => stripped.to_string(),
        _ => name,
    };
    Some(format!(
        "{}::{}",
        type_path(descriptor.full_name(), package),
        sanitize_identifier(&variant)
    ))
}

/// Module generated by tonic for a service's client.
pub fn client_module(service: &str) -> String {
    format!("{}_client", service.to_snake_case())
}

/// Module generated by tonic for a service's server.
pub fn server_module(service: &str) -> String {
    format!("{}_server", service.to_snake_case())
}

/// Free text made safe for a single `//` or `///` line.
pub fn comment_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_pool, message};

    #[test]
    fn test_keywords_escaped() {
        assert_eq!(to_snake("type"), "r#type");
        assert_eq!(to_snake("self"), "self_");
        assert_eq!(to_snake("requestField"), "request_field");
        assert_eq!(to_upper_camel("my_service"), "MyService");
    }

    #[test]
    fn test_type_path_same_package() {
        assert_eq!(
            type_path("contract.v1.MyMethodRequest", "contract.v1"),
            "MyMethodRequest"
        );
        assert_eq!(
            type_path("contract.v1.LookupRequest.Filter", "contract.v1"),
            "lookup_request::Filter"
        );
    }

    #[test]
    fn test_type_path_other_package() {
        assert_eq!(
            type_path("common.Money", "shop.v1"),
            "super::super::common::Money"
        );
        assert_eq!(type_path("shop.v2.Order", "shop.v1"), "super::v2::Order");
        assert_eq!(type_path("Bare", ""), "Bare");
    }

    #[test]
    fn test_well_known_types() {
        assert_eq!(
            type_path("google.protobuf.Timestamp", "contract.v1"),
            "::prost_types::Timestamp"
        );
        assert_eq!(primitive_well_known("google.protobuf.StringValue"), Some("String"));
        assert_eq!(primitive_well_known("google.protobuf.Timestamp"), None);
    }

    #[test]
    fn test_message_module_and_enum_variants() {
        let pool = fixture_pool();
        let lookup = message(&pool, "LookupRequest");
        assert_eq!(message_module(&lookup, "contract.v1"), "lookup_request");

        let filter = pool
            .get_message_by_name("contract.v1.LookupRequest.Filter")
            .unwrap();
        assert_eq!(message_module(&filter, "contract.v1"), "lookup_request::filter");

        let status = pool.get_enum_by_name("contract.v1.Status").unwrap();
        assert_eq!(
            enum_variant(&status, 1, "contract.v1").as_deref(),
            Some("Status::Active")
        );
        assert_eq!(enum_variant(&status, 42, "contract.v1"), None);
    }

    #[test]
    fn test_service_modules() {
        assert_eq!(client_module("MyService"), "my_service_client");
        assert_eq!(server_module("MyService"), "my_service_server");
    }

    #[test]
    fn test_comment_text_single_line() {
        assert_eq!(comment_text("known\nvalue  case"), "known value case");
    }
}
