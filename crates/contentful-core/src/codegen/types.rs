//! Field type to generated Rust type mapping.
//!
//! Entry and mapper generation both consult [`type_mapping`], so the accessor
//! type and the converter feeding it can never disagree.

use crate::schema::{FieldType, ItemsType};

/// How a field is represented in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    /// Accessor value type, as written in generated code
    pub rust_type: &'static str,
    /// Converter in `contentful_core::field` producing that type
    pub converter: &'static str,
    /// Alias from `contentful_core::field` the type needs imported
    pub import: Option<&'static str>,
    pub link: LinkArity,
}

/// Whether a field holds links a `resolve_*` helper is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkArity {
    None,
    One,
    Many,
}

pub fn type_mapping(field_type: &FieldType) -> TypeMapping {
    let (rust_type, converter, import, link) = match field_type {
        FieldType::Symbol | FieldType::Text => ("String", "string", None, LinkArity::None),
        FieldType::Integer => ("i64", "integer", None, LinkArity::None),
        FieldType::Number => ("f64", "number", None, LinkArity::None),
        FieldType::Boolean => ("bool", "boolean", None, LinkArity::None),
        FieldType::Date => ("Date", "date", Some("Date"), LinkArity::None),
        FieldType::Location => ("Location", "location", Some("Location"), LinkArity::None),
        FieldType::Object => ("Json", "object", Some("Json"), LinkArity::None),
        FieldType::Link(_) => ("Link", "link", Some("Link"), LinkArity::One),
        FieldType::Array(ItemsType::Symbol) => ("Vec<String>", "symbols", None, LinkArity::None),
        FieldType::Array(ItemsType::Link(_)) => ("Vec<Link>", "links", Some("Link"), LinkArity::Many),
    };
    TypeMapping {
        rust_type,
        converter,
        import,
        link,
    }
}

/// Human description of a field type, e.g. `Array of Link to Entry`
pub fn describe(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Link(link) => format!("Link to {}", link.as_str()),
        FieldType::Array(ItemsType::Symbol) => "Array of Symbol".to_string(),
        FieldType::Array(ItemsType::Link(link)) => format!("Array of Link to {}", link.as_str()),
        other => other.kind().to_string(),
    }
}
