//! Built-in mappers for every resource kind.

// Internal imports (std, crate)
use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    resource::{
        ContentType, ContentTypeSnapshot, Entry, EntrySnapshot, FieldValue, Link, Localized,
        Resource, ResourceArray, ResourceKind, ResourceReferences, Role, SystemProperties,
        WebhookHealth,
    },
    schema::FieldSchema,
};

use super::{Mapper, ResourceBuilder};

// External imports (alphabetized)
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value as JsonValue;

/// Only an instance of the same kind may be refreshed
fn check_existing(kind: ResourceKind, existing: Option<&Resource>) -> Result<()> {
    match existing {
        Some(resource) if resource.kind() != kind => Err(Error::payload(format!(
            "can not update a {} with a {} payload",
            resource.kind(),
            kind
        ))),
        _ => Ok(()),
    }
}

fn reject_update(kind: ResourceKind, existing: Option<&Resource>) -> Result<()> {
    match existing {
        Some(_) => Err(Error::UnsupportedUpdate(kind.to_string())),
        None => Ok(()),
    }
}

/// Maps resources whose wire form deserializes directly.
pub struct DataMapper<T> {
    kind: ResourceKind,
    wrap: fn(T) -> Resource,
    creation_only: bool,
}

impl<T> DataMapper<T> {
    pub fn new(kind: ResourceKind, wrap: fn(T) -> Resource) -> Self {
        Self {
            kind,
            wrap,
            creation_only: false,
        }
    }

    /// Reject updates of existing instances
    pub fn creation_only(mut self) -> Self {
        self.creation_only = true;
        self
    }
}

impl<T: DeserializeOwned> Mapper for DataMapper<T> {
    fn map(
        &self,
        _builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        if self.creation_only {
            reject_update(self.kind, existing.as_ref())?;
        }
        check_existing(self.kind, existing.as_ref())?;
        Ok((self.wrap)(<T as Deserialize>::deserialize(payload)?))
    }
}

/// Generic entries; field values are normalised into [`FieldValue`]s.
pub struct EntryMapper;

impl EntryMapper {
    fn field_value(builder: &ResourceBuilder, value: &JsonValue) -> Result<FieldValue> {
        if let Some(link) = Link::from_json(value) {
            return Ok(FieldValue::Link(link));
        }
        if let Some(items) = value.as_array().filter(|items| !items.is_empty()) {
            if let Some(links) = items.iter().map(Link::from_json).collect::<Option<Vec<_>>>() {
                return Ok(FieldValue::Links(links));
            }
        }
        // linked entries and assets delivered inline
        if let Some("Entry" | "Asset") = value.pointer("/sys/type").and_then(JsonValue::as_str) {
            return Ok(FieldValue::Resource(Box::new(builder.build(value, None)?)));
        }
        Ok(FieldValue::Json(value.clone()))
    }
}

impl Mapper for EntryMapper {
    fn map(
        &self,
        builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        check_existing(ResourceKind::Entry, existing.as_ref())?;

        let mut fields = BTreeMap::new();
        if let Some(raw) = payload.get("fields").and_then(JsonValue::as_object) {
            for (id, locales) in raw {
                let locales = locales
                    .as_object()
                    .ok_or_else(|| Error::payload(format!("field \"{id}\" is not keyed by locale")))?;
                let mut values = Localized::new();
                for (locale, value) in locales {
                    values.insert(locale.clone(), Self::field_value(builder, value)?);
                }
                fields.insert(id.clone(), values);
            }
        }

        Ok(Resource::Entry(Entry {
            sys: SystemProperties::from_payload(payload)?,
            fields,
        }))
    }
}

/// Content types, including their field definitions.
pub struct ContentTypeMapper;

impl ContentTypeMapper {
    fn content_type(payload: &JsonValue) -> Result<ContentType> {
        let text = |key: &str| payload.get(key).and_then(JsonValue::as_str).map(String::from);
        let fields = match payload.get("fields") {
            Some(JsonValue::Array(raw)) => raw
                .iter()
                .map(FieldSchema::from_json)
                .collect::<Result<Vec<_>>>()?,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(_) => return Err(Error::payload("content type fields must be an array")),
        };

        Ok(ContentType {
            sys: SystemProperties::from_payload(payload)?,
            name: text("name").unwrap_or_default(),
            description: text("description"),
            display_field: text("displayField"),
            fields,
        })
    }
}

impl Mapper for ContentTypeMapper {
    fn map(
        &self,
        _builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        check_existing(ResourceKind::ContentType, existing.as_ref())?;
        Ok(Resource::ContentType(Self::content_type(payload)?))
    }
}

/// Snapshots of entries or content types; read-only.
pub struct SnapshotMapper {
    kind: ResourceKind,
}

impl SnapshotMapper {
    pub fn entry() -> Self {
        Self {
            kind: ResourceKind::EntrySnapshot,
        }
    }

    pub fn content_type() -> Self {
        Self {
            kind: ResourceKind::ContentTypeSnapshot,
        }
    }
}

impl Mapper for SnapshotMapper {
    fn map(
        &self,
        builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        reject_update(self.kind, existing.as_ref())?;

        let sys = SystemProperties::from_payload(payload)?;
        let raw = payload
            .get("snapshot")
            .ok_or_else(|| Error::payload("snapshot payload without \"snapshot\""))?;

        if self.kind == ResourceKind::ContentTypeSnapshot {
            return Ok(Resource::ContentTypeSnapshot(ContentTypeSnapshot {
                sys,
                snapshot: ContentTypeMapper::content_type(raw)?,
            }));
        }

        let snapshot = builder.build(raw, None)?;
        if snapshot.kind() != ResourceKind::Entry {
            return Err(Error::payload(format!(
                "entry snapshot holds a {}",
                snapshot.kind()
            )));
        }
        Ok(Resource::EntrySnapshot(EntrySnapshot {
            sys,
            snapshot: Box::new(snapshot),
        }))
    }
}

/// Roles, parsing every policy constraint.
pub struct RoleMapper;

impl Mapper for RoleMapper {
    fn map(
        &self,
        _builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        check_existing(ResourceKind::Role, existing.as_ref())?;
        Ok(Resource::Role(Role::from_payload(payload)?))
    }
}

/// Webhook health summaries (wire type `Webhook`); read-only.
pub struct WebhookHealthMapper;

impl Mapper for WebhookHealthMapper {
    fn map(
        &self,
        _builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        reject_update(ResourceKind::WebhookHealth, existing.as_ref())?;

        let count = |key: &str| {
            payload
                .pointer(&format!("/calls/{key}"))
                .and_then(JsonValue::as_u64)
                .unwrap_or_default()
        };
        Ok(Resource::WebhookHealth(WebhookHealth {
            sys: SystemProperties::from_payload(payload)?,
            total: count("total"),
            healthy: count("healthy"),
        }))
    }
}

fn build_items(builder: &ResourceBuilder, items: Option<&JsonValue>) -> Result<Vec<Resource>> {
    match items {
        Some(JsonValue::Array(raw)) => raw.iter().map(|item| builder.build(item, None)).collect(),
        Some(JsonValue::Null) | None => Ok(Vec::new()),
        Some(_) => Err(Error::payload("\"items\" must be an array")),
    }
}

/// Pages of resources; every item is built recursively.
pub struct ArrayMapper;

impl Mapper for ArrayMapper {
    fn map(
        &self,
        builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        check_existing(ResourceKind::ResourceArray, existing.as_ref())?;

        let items = build_items(builder, payload.get("items"))?;
        let number = |key: &str| payload.get(key).and_then(JsonValue::as_u64);
        Ok(Resource::Array(ResourceArray {
            total: number("total").unwrap_or(items.len() as u64),
            skip: number("skip").unwrap_or_default(),
            limit: number("limit").unwrap_or_default(),
            items,
        }))
    }
}

/// Entries delivered together with their linked resources.
pub struct ReferencesMapper;

impl Mapper for ReferencesMapper {
    fn map(
        &self,
        builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource> {
        check_existing(ResourceKind::ResourceReferences, existing.as_ref())?;

        let mut includes = BTreeMap::new();
        if let Some(raw) = payload.get("includes").and_then(JsonValue::as_object) {
            for (kind, items) in raw {
                includes.insert(kind.clone(), build_items(builder, Some(items))?);
            }
        }
        Ok(Resource::References(ResourceReferences {
            items: build_items(builder, payload.get("items"))?,
            includes,
        }))
    }
}
