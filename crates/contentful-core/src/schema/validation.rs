//! Field validations and the field kinds each one applies to.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use super::FieldKind;
use crate::error::{Error, Result};

/// Inclusive bounds shared by the size, range and file-size rules.
///
/// Bounds are always `f64`: integer limits are represented exactly and
/// `Number` fields need fractional ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

/// A validation rule, keyed on the wire by its camelCase name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    Size(Bounds),
    Range(Bounds),
    #[serde(rename = "regexp")]
    RegExp {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flags: Option<String>,
    },
    In(Vec<JsonValue>),
    Unique(bool),
    LinkContentType(Vec<String>),
    LinkMimetypeGroup(Vec<String>),
    DateRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
    AssetFileSize(Bounds),
    AssetImageDimensions {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<Bounds>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<Bounds>,
    },
}

impl Rule {
    /// Wire name of the rule
    pub fn name(&self) -> &'static str {
        match self {
            Self::Size(_) => "size",
            Self::Range(_) => "range",
            Self::RegExp { .. } => "regexp",
            Self::In(_) => "in",
            Self::Unique(_) => "unique",
            Self::LinkContentType(_) => "linkContentType",
            Self::LinkMimetypeGroup(_) => "linkMimetypeGroup",
            Self::DateRange { .. } => "dateRange",
            Self::AssetFileSize(_) => "assetFileSize",
            Self::AssetImageDimensions { .. } => "assetImageDimensions",
        }
    }

    /// Field kinds the rule may be attached to
    pub fn allowed_kinds(&self) -> &'static [FieldKind] {
        use FieldKind::*;
        match self {
            Self::Size(_) => &[Array, Text, Symbol],
            Self::Range(_) => &[Number, Integer],
            Self::RegExp { .. } => &[Text, Symbol],
            Self::In(_) => &[Text, Symbol, Integer, Number],
            Self::Unique(_) => &[Symbol, Integer, Number],
            Self::LinkContentType(_) => &[Link],
            Self::LinkMimetypeGroup(_) => &[Link],
            Self::DateRange { .. } => &[Date],
            Self::AssetFileSize(_) => &[Link],
            Self::AssetImageDimensions { .. } => &[Link],
        }
    }

    /// Whether the rule applies to `kind`
    pub fn allows(&self, kind: FieldKind) -> bool {
        self.allowed_kinds().contains(&kind)
    }

    /// Short human-readable summary used in generated docs
    pub fn summary(&self) -> String {
        let bounds = |b: &Bounds| match (b.min, b.max) {
            (Some(min), Some(max)) => format!("{min}..={max}"),
            (Some(min), None) => format!(">= {min}"),
            (None, Some(max)) => format!("<= {max}"),
            (None, None) => "any".to_string(),
        };
        match self {
            Self::Size(b) => format!("size {}", bounds(b)),
            Self::Range(b) => format!("range {}", bounds(b)),
            Self::AssetFileSize(b) => format!("file size {}", bounds(b)),
            Self::In(values) => format!("one of {} values", values.len()),
            Self::LinkContentType(types) => format!("links to {}", types.join(", ")),
            Self::LinkMimetypeGroup(groups) => format!("mime type {}", groups.join(", ")),
            other => other.name().to_string(),
        }
    }
}

/// A rule together with its optional custom error message.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub rule: Rule,
    pub message: Option<String>,
}

impl From<Rule> for Validation {
    fn from(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }
}

impl Validation {
    /// Attach a custom error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Parse the wire form, e.g. `{"size": {"max": 255}, "message": "Too long"}`
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::payload("validation must be an object"))?;

        let mut message = None;
        let mut rule = None;
        for (key, body) in object {
            if key == "message" {
                message = body.as_str().map(String::from);
                continue;
            }
            if rule.is_some() {
                return Err(Error::payload("validation must contain a single rule"));
            }
            let mut single = Map::new();
            single.insert(key.clone(), body.clone());
            rule = Some(
                serde_json::from_value::<Rule>(JsonValue::Object(single))
                    .map_err(|_| Error::UnknownValidation(key.clone()))?,
            );
        }

        let rule = rule.ok_or_else(|| Error::payload("validation without a rule"))?;
        Ok(Self { rule, message })
    }

    /// Render the wire form
    pub fn to_json(&self) -> Result<JsonValue> {
        let mut value = serde_json::to_value(&self.rule)?;
        if let (Some(message), Some(object)) = (&self.message, value.as_object_mut()) {
            object.insert("message".to_string(), json!(message));
        }
        Ok(value)
    }
}
