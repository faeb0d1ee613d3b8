//! Domain resources returned by the Content Management API.
//!
//! Resources are plain data holders. They are only ever constructed by the
//! mappers in [`crate::builder`], which turn a decoded JSON payload into one
//! of the [`Resource`] variants.

pub mod role;
mod types;

// Internal imports (std, crate)
use std::{any::Any, fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    registry::Typed,
    uri::Parameters,
};

// External imports (alphabetized)
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

pub use role::{Actions, Constraint, Effect, Policy, Role};
pub use types::{
    Asset, AssetFields, AssetFile, ContentType, ContentTypeSnapshot, Control, DeliveryApiKey,
    EditorInterface, Entry, EntrySnapshot, Environment, Extension, ExtensionDefinition,
    FieldValue, Locale, Localized, Organization, PersonalAccessToken, PreviewApiKey, ResourceArray,
    ResourceReferences, Space, SpaceMembership, Upload, User, Webhook, WebhookCall,
    WebhookHeader, WebhookHealth,
};

/// A reference to another resource that may not have been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LinkWire", into = "LinkWire")]
pub struct Link {
    id: String,
    link_type: String,
}

impl Link {
    /// Create a link to the resource `id` of kind `link_type`
    pub fn new(id: impl Into<String>, link_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link_type: link_type.into(),
        }
    }

    /// ID of the linked resource
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wire link type, e.g. `"Entry"` or `"WebhookDefinition"`
    pub fn link_type(&self) -> &str {
        &self.link_type
    }

    /// Parse the `{"sys": {"type": "Link", ...}}` wire form
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let sys = value.get("sys")?;
        if sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        Some(Self::new(
            sys.get("id")?.as_str()?,
            sys.get("linkType")?.as_str()?,
        ))
    }

    /// Render the wire form
    pub fn to_json(&self) -> JsonValue {
        json!({
            "sys": {
                "type": "Link",
                "linkType": self.link_type,
                "id": self.id,
            }
        })
    }
}

#[derive(Serialize, Deserialize)]
struct LinkWire {
    sys: LinkSys,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkSys {
    #[serde(rename = "type")]
    kind: String,
    link_type: String,
    id: String,
}

impl TryFrom<LinkWire> for Link {
    type Error = String;

    fn try_from(wire: LinkWire) -> std::result::Result<Self, Self::Error> {
        if wire.sys.kind != "Link" {
            return Err(format!("expected a Link, found \"{}\"", wire.sys.kind));
        }
        Ok(Self::new(wire.sys.id, wire.sys.link_type))
    }
}

impl From<Link> for LinkWire {
    fn from(link: Link) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link.link_type,
                id: link.id,
            },
        }
    }
}

/// Geographic coordinates stored in a Location field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// The `sys` block carried by every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProperties {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub version: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_version: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
    pub archived_version: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub space: Option<Link>,
    pub environment: Option<Link>,
    pub content_type: Option<Link>,
    pub created_by: Option<Link>,
    pub updated_by: Option<Link>,
    pub snapshot_type: Option<String>,
    pub snapshot_entity_type: Option<String>,
}

impl SystemProperties {
    /// Extract the `sys` block of a payload
    pub fn from_payload(payload: &JsonValue) -> Result<Self> {
        let sys = payload
            .get("sys")
            .ok_or_else(|| Error::payload("missing \"sys\" block"))?;
        Ok(Self::deserialize(sys)?)
    }

    /// Path parameters identifying where this resource lives, for resolving its links
    pub fn link_parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if let Some(space) = &self.space {
            parameters.insert("space".to_string(), space.id().to_string());
        }
        if let Some(environment) = &self.environment {
            parameters.insert("environment".to_string(), environment.id().to_string());
        }
        parameters
    }
}

/// An entry type generated for one content type.
///
/// Generated code implements this trait so instances can travel through the
/// [`Resource`] enum and be recovered with [`Resource::downcast_custom`].
pub trait CustomEntry: Typed + fmt::Debug + Send + Sync + 'static {
    /// ID of the content type the entry belongs to
    fn content_type_id(&self) -> &str;

    /// System properties of the entry
    fn sys(&self) -> &SystemProperties;

    /// Upcast for downcasting to the concrete generated type
    fn as_any(&self) -> &dyn Any;
}

/// Names of every resource kind the SDK can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Asset,
    ContentType,
    ContentTypeSnapshot,
    DeliveryApiKey,
    EditorInterface,
    Entry,
    EntrySnapshot,
    Environment,
    Extension,
    Locale,
    Organization,
    PersonalAccessToken,
    PreviewApiKey,
    Role,
    Space,
    SpaceMembership,
    Upload,
    User,
    Webhook,
    WebhookCall,
    WebhookHealth,
    ResourceArray,
    ResourceReferences,
}

impl ResourceKind {
    /// Returns the resource type name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::ContentType => "ContentType",
            Self::ContentTypeSnapshot => "ContentTypeSnapshot",
            Self::DeliveryApiKey => "DeliveryApiKey",
            Self::EditorInterface => "EditorInterface",
            Self::Entry => "Entry",
            Self::EntrySnapshot => "EntrySnapshot",
            Self::Environment => "Environment",
            Self::Extension => "Extension",
            Self::Locale => "Locale",
            Self::Organization => "Organization",
            Self::PersonalAccessToken => "PersonalAccessToken",
            Self::PreviewApiKey => "PreviewApiKey",
            Self::Role => "Role",
            Self::Space => "Space",
            Self::SpaceMembership => "SpaceMembership",
            Self::Upload => "Upload",
            Self::User => "User",
            Self::Webhook => "Webhook",
            Self::WebhookCall => "WebhookCall",
            Self::WebhookHealth => "WebhookHealth",
            Self::ResourceArray => "ResourceArray",
            Self::ResourceReferences => "ResourceReferences",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Typed for ResourceKind {
    fn type_name(&self) -> &str {
        self.as_str()
    }
}

/// A hydrated API resource.
#[derive(Debug, Clone)]
pub enum Resource {
    Asset(Asset),
    ContentType(ContentType),
    ContentTypeSnapshot(ContentTypeSnapshot),
    DeliveryApiKey(DeliveryApiKey),
    EditorInterface(EditorInterface),
    Entry(Entry),
    EntrySnapshot(EntrySnapshot),
    Environment(Environment),
    Extension(Extension),
    Locale(Locale),
    Organization(Organization),
    PersonalAccessToken(PersonalAccessToken),
    PreviewApiKey(PreviewApiKey),
    Role(Role),
    Space(Space),
    SpaceMembership(SpaceMembership),
    Upload(Upload),
    User(User),
    Webhook(Webhook),
    WebhookCall(WebhookCall),
    WebhookHealth(WebhookHealth),
    Array(ResourceArray),
    References(ResourceReferences),
    /// An entry hydrated through a generated mapper
    Custom(Arc<dyn CustomEntry>),
}

impl Resource {
    /// The kind of resource; generated entries report [`ResourceKind::Entry`]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Asset(_) => ResourceKind::Asset,
            Self::ContentType(_) => ResourceKind::ContentType,
            Self::ContentTypeSnapshot(_) => ResourceKind::ContentTypeSnapshot,
            Self::DeliveryApiKey(_) => ResourceKind::DeliveryApiKey,
            Self::EditorInterface(_) => ResourceKind::EditorInterface,
            Self::Entry(_) | Self::Custom(_) => ResourceKind::Entry,
            Self::EntrySnapshot(_) => ResourceKind::EntrySnapshot,
            Self::Environment(_) => ResourceKind::Environment,
            Self::Extension(_) => ResourceKind::Extension,
            Self::Locale(_) => ResourceKind::Locale,
            Self::Organization(_) => ResourceKind::Organization,
            Self::PersonalAccessToken(_) => ResourceKind::PersonalAccessToken,
            Self::PreviewApiKey(_) => ResourceKind::PreviewApiKey,
            Self::Role(_) => ResourceKind::Role,
            Self::Space(_) => ResourceKind::Space,
            Self::SpaceMembership(_) => ResourceKind::SpaceMembership,
            Self::Upload(_) => ResourceKind::Upload,
            Self::User(_) => ResourceKind::User,
            Self::Webhook(_) => ResourceKind::Webhook,
            Self::WebhookCall(_) => ResourceKind::WebhookCall,
            Self::WebhookHealth(_) => ResourceKind::WebhookHealth,
            Self::Array(_) => ResourceKind::ResourceArray,
            Self::References(_) => ResourceKind::ResourceReferences,
        }
    }

    /// System properties, for every resource that carries them
    pub fn sys(&self) -> Option<&SystemProperties> {
        let sys = match self {
            Self::Asset(r) => &r.sys,
            Self::ContentType(r) => &r.sys,
            Self::ContentTypeSnapshot(r) => &r.sys,
            Self::DeliveryApiKey(r) => &r.sys,
            Self::EditorInterface(r) => &r.sys,
            Self::Entry(r) => &r.sys,
            Self::EntrySnapshot(r) => &r.sys,
            Self::Environment(r) => &r.sys,
            Self::Extension(r) => &r.sys,
            Self::Locale(r) => &r.sys,
            Self::Organization(r) => &r.sys,
            Self::PersonalAccessToken(r) => &r.sys,
            Self::PreviewApiKey(r) => &r.sys,
            Self::Role(r) => &r.sys,
            Self::Space(r) => &r.sys,
            Self::SpaceMembership(r) => &r.sys,
            Self::Upload(r) => &r.sys,
            Self::User(r) => &r.sys,
            Self::Webhook(r) => &r.sys,
            Self::WebhookCall(r) => &r.sys,
            Self::WebhookHealth(r) => &r.sys,
            Self::Custom(entry) => entry.sys(),
            Self::Array(_) | Self::References(_) => return None,
        };
        Some(sys)
    }

    /// Recover a generated entry type
    pub fn downcast_custom<T: CustomEntry>(&self) -> Option<&T> {
        match self {
            Self::Custom(entry) => entry.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl Typed for Resource {
    fn type_name(&self) -> &str {
        match self {
            Self::Custom(entry) => entry.type_name(),
            other => other.kind().as_str(),
        }
    }

    fn ancestors(&self) -> Vec<&str> {
        match self {
            Self::Custom(entry) => entry.ancestors(),
            _ => Vec::new(),
        }
    }
}
