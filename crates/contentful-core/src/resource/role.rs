//! Roles and their access-control policies.
//!
//! A policy's constraint is a small boolean expression tree. Every node is a
//! JSON object with exactly one key:
//!
//! - `and` / `or`: an array of child nodes
//! - `not`: a single-element array holding one child
//! - `equals`: a two-element array, one slot being a `{"doc": path}` tag and
//!   the other the literal to compare against (in either order)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

use super::SystemProperties;
use crate::error::{Error, Result};

/// A role and the permissions it grants.
#[derive(Debug, Clone, Default)]
pub struct Role {
    pub sys: SystemProperties,
    pub name: String,
    pub description: Option<String>,
    pub policies: Vec<Policy>,
    /// Permission area (`ContentModel`, `Settings`, ...) to granted actions
    pub permissions: BTreeMap<String, Actions>,
}

impl Role {
    /// Parse a role payload, including every policy constraint
    pub fn from_payload(payload: &JsonValue) -> Result<Self> {
        let sys = SystemProperties::from_payload(payload)?;
        let name = payload
            .get("name")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();
        let description = payload
            .get("description")
            .and_then(JsonValue::as_str)
            .map(String::from);

        let policies = match payload.get("policies") {
            Some(JsonValue::Array(items)) => items
                .iter()
                .map(Policy::from_json)
                .collect::<Result<Vec<_>>>()?,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(_) => return Err(Error::payload("role policies must be an array")),
        };

        let mut permissions = BTreeMap::new();
        if let Some(map) = payload.get("permissions").and_then(JsonValue::as_object) {
            for (area, actions) in map {
                permissions.insert(area.clone(), Actions::from_json(actions)?);
            }
        }

        Ok(Self {
            sys,
            name,
            description,
            policies,
            permissions,
        })
    }
}

/// Whether a policy grants or withholds its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

/// Either every action or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actions {
    All,
    List(Vec<String>),
}

impl Actions {
    fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(s) if s == "all" => Ok(Self::All),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(String::from)
                        .ok_or_else(|| Error::payload("actions must be strings"))
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => Err(Error::payload(format!("invalid actions value {other}"))),
        }
    }

    /// Render the wire form
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::All => json!("all"),
            Self::List(actions) => json!(actions),
        }
    }
}

/// One entry of a role's policy list.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub effect: Effect,
    pub actions: Actions,
    pub constraint: Option<Constraint>,
}

impl Policy {
    fn from_json(value: &JsonValue) -> Result<Self> {
        let effect = Effect::deserialize(
            value
                .get("effect")
                .ok_or_else(|| Error::payload("policy without effect"))?,
        )?;
        let actions = Actions::from_json(
            value
                .get("actions")
                .ok_or_else(|| Error::payload("policy without actions"))?,
        )?;
        let constraint = match value.get("constraint") {
            None | Some(JsonValue::Null) => None,
            Some(node) => Some(Constraint::parse(node)?),
        };

        Ok(Self {
            effect,
            actions,
            constraint,
        })
    }
}

/// Boolean expression limiting where a policy applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    And(Vec<Constraint>),
    Or(Vec<Constraint>),
    Not(Box<Constraint>),
    Equals {
        /// Document path, e.g. `sys.type`
        doc: String,
        value: JsonValue,
    },
}

impl Constraint {
    /// Parse a constraint node and its children
    pub fn parse(node: &JsonValue) -> Result<Self> {
        let object = node
            .as_object()
            .ok_or_else(|| Error::payload("constraint must be an object"))?;
        let mut entries = object.iter();
        let (key, operand) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(Error::payload(
                    "constraint must have exactly one operator key",
                ))
            }
        };

        match key.as_str() {
            "and" => Ok(Self::And(Self::parse_children(key, operand)?)),
            "or" => Ok(Self::Or(Self::parse_children(key, operand)?)),
            "not" => {
                let mut children = Self::parse_children(key, operand)?;
                match (children.pop(), children.is_empty()) {
                    (Some(child), true) => Ok(Self::Not(Box::new(child))),
                    _ => Err(Error::payload("\"not\" takes exactly one constraint")),
                }
            }
            "equals" => Self::parse_equals(operand),
            other => Err(Error::InvalidConstraintKey(other.to_string())),
        }
    }

    fn parse_children(key: &str, operand: &JsonValue) -> Result<Vec<Self>> {
        operand
            .as_array()
            .ok_or_else(|| Error::payload(format!("\"{key}\" takes an array of constraints")))?
            .iter()
            .map(Self::parse)
            .collect()
    }

    fn parse_equals(operand: &JsonValue) -> Result<Self> {
        let pair = match operand.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => return Err(Error::payload("\"equals\" takes exactly two operands")),
        };

        match (doc_path(&pair[0]), doc_path(&pair[1])) {
            (Some(doc), None) => Ok(Self::Equals {
                doc,
                value: pair[1].clone(),
            }),
            (None, Some(doc)) => Ok(Self::Equals {
                doc,
                value: pair[0].clone(),
            }),
            _ => Err(Error::payload(
                "\"equals\" needs exactly one {\"doc\": ...} operand",
            )),
        }
    }

    /// Render the wire form, with the doc tag in the first slot
    pub fn to_json(&self) -> JsonValue {
        let render = |children: &[Constraint]| -> Vec<JsonValue> {
            children.iter().map(Self::to_json).collect()
        };
        match self {
            Self::And(children) => json!({ "and": render(children) }),
            Self::Or(children) => json!({ "or": render(children) }),
            Self::Not(child) => json!({ "not": [child.to_json()] }),
            Self::Equals { doc, value } => json!({ "equals": [{ "doc": doc }, value] }),
        }
    }
}

/// The path of a `{"doc": path}` tag object
fn doc_path(value: &JsonValue) -> Option<String> {
    let object: &Map<String, JsonValue> = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.get("doc")?.as_str().map(String::from)
}
