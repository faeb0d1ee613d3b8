//! Data holders for each resource kind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Link, Resource, SystemProperties};
use crate::schema::{ContentTypeSchema, FieldSchema};

/// Values keyed by locale code
pub type Localized<T> = BTreeMap<String, T>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub sys: SystemProperties,
    #[serde(default)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub title: Localized<String>,
    #[serde(default)]
    pub description: Localized<String>,
    #[serde(default)]
    pub file: Localized<AssetFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub file_name: String,
    pub content_type: String,
    pub url: Option<String>,
    pub upload: Option<String>,
    pub upload_from: Option<Link>,
    pub details: Option<JsonValue>,
}

impl Asset {
    /// The title for `locale`
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.fields.title.get(locale).map(String::as_str)
    }

    /// The file for `locale`
    pub fn file(&self, locale: &str) -> Option<&AssetFile> {
        self.fields.file.get(locale)
    }
}

/// A content type and its ordered field definitions.
#[derive(Debug, Clone, Default)]
pub struct ContentType {
    pub sys: SystemProperties,
    pub name: String,
    pub description: Option<String>,
    pub display_field: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl ContentType {
    /// The schema the code generator consumes
    pub fn schema(&self) -> ContentTypeSchema {
        ContentTypeSchema {
            id: self.sys.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            display_field: self.display_field.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Look up a field by ID
    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.id == id)
    }
}

/// Point-in-time copy of a content type.
#[derive(Debug, Clone)]
pub struct ContentTypeSnapshot {
    pub sys: SystemProperties,
    pub snapshot: ContentType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryApiKey {
    pub sys: SystemProperties,
    pub name: String,
    pub description: Option<String>,
    pub access_token: Option<String>,
    #[serde(default)]
    pub environments: Vec<Link>,
    pub preview_api_key: Option<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorInterface {
    pub sys: SystemProperties,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl EditorInterface {
    /// The control configured for `field_id`
    pub fn control(&self, field_id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.field_id == field_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub field_id: String,
    pub widget_id: Option<String>,
    pub settings: Option<JsonValue>,
}

/// Value of a generic entry field for one locale.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Link(Link),
    Links(Vec<Link>),
    /// A linked resource delivered inline
    Resource(Box<Resource>),
    Json(JsonValue),
}

/// An entry of a content type no generated mapper is registered for.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub sys: SystemProperties,
    pub fields: BTreeMap<String, Localized<FieldValue>>,
}

impl Entry {
    /// The value of field `id` for `locale`
    pub fn field(&self, id: &str, locale: &str) -> Option<&FieldValue> {
        self.fields.get(id)?.get(locale)
    }

    /// ID of the content type this entry belongs to
    pub fn content_type_id(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(Link::id)
    }
}

/// Point-in-time copy of an entry.
#[derive(Debug, Clone)]
pub struct EntrySnapshot {
    pub sys: SystemProperties,
    /// The entry as it was, generic or generated
    pub snapshot: Box<Resource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub sys: SystemProperties,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub sys: SystemProperties,
    pub extension: ExtensionDefinition,
    pub parameters: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDefinition {
    pub name: String,
    pub src: Option<String>,
    pub srcdoc: Option<String>,
    #[serde(default)]
    pub field_types: Vec<JsonValue>,
    #[serde(default)]
    pub sidebar: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    pub sys: SystemProperties,
    pub name: String,
    pub code: String,
    pub fallback_code: Option<String>,
    #[serde(default)]
    pub content_delivery_api: bool,
    #[serde(default)]
    pub content_management_api: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub sys: SystemProperties,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAccessToken {
    pub sys: SystemProperties,
    pub name: String,
    /// Only present in the response to the creating request
    pub token: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl PersonalAccessToken {
    /// Whether the token only grants read access
    pub fn is_read_only(&self) -> bool {
        !self.scopes.iter().any(|s| s == "content_management_manage")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewApiKey {
    pub sys: SystemProperties,
    pub name: String,
    pub description: Option<String>,
    pub access_token: Option<String>,
    #[serde(default)]
    pub environments: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub sys: SystemProperties,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceMembership {
    pub sys: SystemProperties,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub roles: Vec<Link>,
    pub user: Option<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Upload {
    pub sys: SystemProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub sys: SystemProperties,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub activated: bool,
    #[serde(default)]
    pub sign_in_count: u64,
    #[serde(default)]
    pub confirmed: bool,
}

/// A webhook definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub sys: SystemProperties,
    pub name: String,
    pub url: String,
    pub http_basic_username: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub headers: Vec<WebhookHeader>,
    pub filters: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookHeader {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub secret: bool,
}

/// One delivery attempt of a webhook, as overview or with full details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCall {
    pub sys: SystemProperties,
    pub status_code: Option<u16>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub event_type: Option<String>,
    pub url: Option<String>,
    pub request_at: Option<DateTime<Utc>>,
    pub response_at: Option<DateTime<Utc>>,
    pub request: Option<JsonValue>,
    pub response: Option<JsonValue>,
}

impl WebhookCall {
    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && matches!(self.status_code, Some(200..=299))
    }
}

/// Health summary of a webhook's recent calls.
#[derive(Debug, Clone, Default)]
pub struct WebhookHealth {
    pub sys: SystemProperties,
    pub total: u64,
    pub healthy: u64,
}

/// A page of resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceArray {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub items: Vec<Resource>,
}

impl ResourceArray {
    /// Whether more pages follow this one
    pub fn has_more(&self) -> bool {
        self.skip + (self.items.len() as u64) < self.total
    }
}

/// Entries together with the resources they reference.
#[derive(Debug, Clone, Default)]
pub struct ResourceReferences {
    pub items: Vec<Resource>,
    /// Included resources keyed by type, e.g. `"Entry"`, `"Asset"`
    pub includes: BTreeMap<String, Vec<Resource>>,
}
