//! Content-type field schema consumed by the code generator.
//!
//! Schemas are built either by hand or from a content type fetched from the
//! API. Validations are checked against the field type when they are
//! attached, so a schema that exists is always valid for generation.
//!
//! # Examples
//!
//! ```
//! use contentful_core::schema::{Bounds, ContentTypeSchema, FieldSchema, FieldType, Rule};
//!
//! let title = FieldSchema::new("title", "Title", FieldType::Symbol)
//!     .required()
//!     .with_validation(Rule::Size(Bounds::new(None, Some(255.0))))
//!     .unwrap();
//!
//! let schema = ContentTypeSchema::new("blogPost", "Blog Post").with_field(title);
//! assert_eq!(schema.fields.len(), 1);
//!
//! // a range only applies to numbers
//! assert!(FieldSchema::new("slug", "Slug", FieldType::Symbol)
//!     .with_validation(Rule::Range(Bounds::default()))
//!     .is_err());
//! ```

mod validation;

// Internal imports (std, crate)
use std::fmt;

use crate::error::{Error, Result};

// External imports (alphabetized)
use serde::Deserialize;
use serde_json::Value as JsonValue;

pub use validation::{Bounds, Rule, Validation};

/// Plain field kind, used to check validation compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Symbol,
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Location,
    Object,
    Link,
    Array,
}

impl FieldKind {
    /// Returns the wire name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "Symbol",
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::Location => "Location",
            Self::Object => "Object",
            Self::Link => "Link",
            Self::Array => "Array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of resource a Link field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Entry,
    Asset,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Asset => "Asset",
        }
    }

    fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            Some("Entry") => Ok(Self::Entry),
            Some("Asset") => Ok(Self::Asset),
            Some(other) => Err(Error::UnknownFieldType(format!("Link<{other}>"))),
            None => Err(Error::payload("link field without linkType")),
        }
    }
}

/// Item type of an Array field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemsType {
    Symbol,
    Link(LinkType),
}

impl ItemsType {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Symbol => FieldKind::Symbol,
            Self::Link(_) => FieldKind::Link,
        }
    }
}

/// Type of a content-type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Symbol,
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Location,
    Object,
    Link(LinkType),
    Array(ItemsType),
}

impl FieldType {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Symbol => FieldKind::Symbol,
            Self::Text => FieldKind::Text,
            Self::Integer => FieldKind::Integer,
            Self::Number => FieldKind::Number,
            Self::Boolean => FieldKind::Boolean,
            Self::Date => FieldKind::Date,
            Self::Location => FieldKind::Location,
            Self::Object => FieldKind::Object,
            Self::Link(_) => FieldKind::Link,
            Self::Array(_) => FieldKind::Array,
        }
    }

    /// Item type, for Array fields
    pub fn items(&self) -> Option<ItemsType> {
        match self {
            Self::Array(items) => Some(*items),
            _ => None,
        }
    }
}

/// One field of a content type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Wire identifier, used as the key in raw entry JSON
    pub id: String,
    /// Human label, used in generated docs
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub localized: bool,
    pub disabled: bool,
    pub omitted: bool,
    validations: Vec<Validation>,
    item_validations: Vec<Validation>,
}

impl FieldSchema {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            required: false,
            localized: false,
            disabled: false,
            omitted: false,
            validations: Vec::new(),
            item_validations: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn omitted(mut self) -> Self {
        self.omitted = true;
        self
    }

    /// Attach a field-level validation.
    ///
    /// Fails when the rule does not apply to the field type. Array fields
    /// accept rules that apply to arrays or to their item type.
    pub fn with_validation(mut self, validation: impl Into<Validation>) -> Result<Self> {
        let validation = validation.into();
        let kind = self.field_type.kind();
        let allowed = validation.rule.allows(kind)
            || self
                .field_type
                .items()
                .is_some_and(|items| validation.rule.allows(items.kind()));
        if !allowed {
            return Err(Error::InvalidValidation {
                validation: validation.rule.name().to_string(),
                field_type: kind.to_string(),
            });
        }
        self.validations.push(validation);
        Ok(self)
    }

    /// Attach a validation applied to each item of an Array field
    pub fn with_item_validation(mut self, validation: impl Into<Validation>) -> Result<Self> {
        let validation = validation.into();
        let items = self.field_type.items().ok_or_else(|| Error::InvalidValidation {
            validation: validation.rule.name().to_string(),
            field_type: self.field_type.kind().to_string(),
        })?;
        if !validation.rule.allows(items.kind()) {
            return Err(Error::InvalidValidation {
                validation: validation.rule.name().to_string(),
                field_type: items.kind().to_string(),
            });
        }
        self.item_validations.push(validation);
        Ok(self)
    }

    pub fn validations(&self) -> &[Validation] {
        &self.validations
    }

    pub fn item_validations(&self) -> &[Validation] {
        &self.item_validations
    }

    /// Parse a field from a content type payload
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let wire = FieldWire::deserialize(value)?;

        let field_type = match wire.kind.as_str() {
            "Symbol" => FieldType::Symbol,
            "Text" => FieldType::Text,
            "Integer" => FieldType::Integer,
            "Number" => FieldType::Number,
            "Boolean" => FieldType::Boolean,
            "Date" => FieldType::Date,
            "Location" => FieldType::Location,
            "Object" => FieldType::Object,
            "Link" => FieldType::Link(LinkType::parse(wire.link_type.as_deref())?),
            "Array" => {
                let items = wire
                    .items
                    .as_ref()
                    .ok_or_else(|| Error::payload(format!("array field \"{}\" without items", wire.id)))?;
                match items.kind.as_str() {
                    "Symbol" => FieldType::Array(ItemsType::Symbol),
                    "Link" => FieldType::Array(ItemsType::Link(LinkType::parse(
                        items.link_type.as_deref(),
                    )?)),
                    other => return Err(Error::UnknownFieldType(format!("Array<{other}>"))),
                }
            }
            other => return Err(Error::UnknownFieldType(other.to_string())),
        };

        let mut field = Self::new(wire.id, wire.name, field_type);
        field.required = wire.required;
        field.localized = wire.localized;
        field.disabled = wire.disabled;
        field.omitted = wire.omitted;
        for raw in &wire.validations {
            field = field.with_validation(Validation::from_json(raw)?)?;
        }
        if let Some(items) = &wire.items {
            for raw in &items.validations {
                field = field.with_item_validation(Validation::from_json(raw)?)?;
            }
        }
        Ok(field)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldWire {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    link_type: Option<String>,
    items: Option<ItemsWire>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    localized: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    omitted: bool,
    #[serde(default)]
    validations: Vec<JsonValue>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemsWire {
    #[serde(rename = "type")]
    kind: String,
    link_type: Option<String>,
    #[serde(default)]
    validations: Vec<JsonValue>,
}

/// A content type's ID, name and ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeSchema {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub display_field: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl ContentTypeSchema {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            display_field: None,
            fields: Vec::new(),
        }
    }

    /// Append a field; order is preserved into generated code
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_rejected_at_construction() {
        let err = FieldSchema::new("title", "Title", FieldType::Symbol)
            .with_validation(Rule::Range(Bounds::new(Some(1.0), None)))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValidation { validation, field_type }
                if validation == "range" && field_type == "Symbol"
        ));
    }

    #[test]
    fn test_array_validations() -> Result<()> {
        let tags = FieldSchema::new("tags", "Tags", FieldType::Array(ItemsType::Symbol))
            .with_validation(Rule::Size(Bounds::new(None, Some(5.0))))?
            .with_item_validation(Rule::In(vec![json!("news"), json!("tech")]))?;
        assert_eq!(tags.validations().len(), 1);
        assert_eq!(tags.item_validations().len(), 1);

        let related = FieldSchema::new(
            "related",
            "Related",
            FieldType::Array(ItemsType::Link(LinkType::Entry)),
        );
        assert!(related
            .clone()
            .with_validation(Rule::LinkContentType(vec!["blogPost".into()]))
            .is_ok());
        assert!(related
            .with_item_validation(Rule::RegExp {
                pattern: ".*".into(),
                flags: None
            })
            .is_err());

        assert!(FieldSchema::new("title", "Title", FieldType::Symbol)
            .with_item_validation(Rule::Unique(true))
            .is_err());
        Ok(())
    }

    #[test]
    fn test_field_from_json() -> Result<()> {
        let raw = json!({
            "id": "related",
            "name": "Related posts",
            "type": "Array",
            "localized": true,
            "required": false,
            "disabled": false,
            "omitted": false,
            "validations": [{"size": {"max": 3}}],
            "items": {
                "type": "Link",
                "linkType": "Entry",
                "validations": [{"linkContentType": ["blogPost"]}]
            }
        });
        let field = FieldSchema::from_json(&raw)?;
        assert_eq!(field.id, "related");
        assert_eq!(
            field.field_type,
            FieldType::Array(ItemsType::Link(LinkType::Entry))
        );
        assert!(field.localized);
        assert_eq!(field.validations().len(), 1);
        assert_eq!(field.item_validations().len(), 1);
        Ok(())
    }

    #[test]
    fn test_field_from_json_rejects_bad_input() {
        assert!(matches!(
            FieldSchema::from_json(&json!({"id": "body", "name": "Body", "type": "RichText"})),
            Err(Error::UnknownFieldType(t)) if t == "RichText"
        ));
        assert!(matches!(
            FieldSchema::from_json(&json!({"id": "x", "name": "X", "type": "Link", "linkType": "Space"})),
            Err(Error::UnknownFieldType(_))
        ));
        assert!(matches!(
            FieldSchema::from_json(&json!({
                "id": "title", "name": "Title", "type": "Symbol",
                "validations": [{"dateRange": {"min": "2020-01-01"}}]
            })),
            Err(Error::InvalidValidation { .. })
        ));
    }
}
