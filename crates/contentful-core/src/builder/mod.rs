//! Resource dispatch: turning decoded payloads into [`Resource`] values.
//!
//! Every payload carries a `sys.type` discriminator. [`ResourceBuilder::type_name_for`]
//! maps it to a resource type name (the wire names differ from the SDK names
//! for several kinds) and [`ResourceBuilder::build`] hands the payload to the
//! [`Mapper`] registered under that name.
//!
//! # Examples
//!
//! ```
//! use contentful_core::{Resource, ResourceBuilder};
//! use serde_json::json;
//!
//! let builder = ResourceBuilder::new();
//! let payload = json!({"sys": {"type": "ApiKey", "id": "key1"}, "name": "Website"});
//!
//! assert_eq!(ResourceBuilder::type_name_for(&payload).unwrap(), "DeliveryApiKey");
//! match builder.build(&payload, None).unwrap() {
//!     Resource::DeliveryApiKey(key) => assert_eq!(key.name, "Website"),
//!     other => panic!("unexpected resource {other:?}"),
//! }
//! ```

mod mappers;

// Internal imports (std, crate)
use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    resource::{Resource, ResourceKind},
};

// External imports (alphabetized)
use log::{debug, trace};
use serde_json::Value as JsonValue;

pub use mappers::{
    ArrayMapper, ContentTypeMapper, DataMapper, EntryMapper, ReferencesMapper, RoleMapper,
    SnapshotMapper, WebhookHealthMapper,
};

/// Converts one payload into a resource.
///
/// `existing` is the instance being refreshed, if any. Mappers for read-only
/// kinds reject it with [`Error::UnsupportedUpdate`].
pub trait Mapper: Send + Sync {
    fn map(
        &self,
        builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &JsonValue,
    ) -> Result<Resource>;
}

/// Picks a content-type specific mapper for an entry payload
pub type EntryMatcher = Arc<dyn Fn(&JsonValue) -> Option<Arc<dyn Mapper>> + Send + Sync>;

/// Registry of mappers keyed by resource type name.
#[derive(Clone)]
pub struct ResourceBuilder {
    mappers: HashMap<String, Arc<dyn Mapper>>,
    entry_matcher: Option<EntryMatcher>,
}

impl fmt::Debug for ResourceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.mappers.keys().collect();
        types.sort();
        f.debug_struct("ResourceBuilder")
            .field("mappers", &types)
            .field("entry_matcher", &self.entry_matcher.is_some())
            .finish()
    }
}

impl Default for ResourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceBuilder {
    /// Create a builder with a mapper for every built-in resource kind
    pub fn new() -> Self {
        let mut builder = Self {
            mappers: HashMap::new(),
            entry_matcher: None,
        };

        use ResourceKind as K;
        builder.register(K::Asset, DataMapper::new(K::Asset, Resource::Asset));
        builder.register(K::ContentType, ContentTypeMapper);
        builder.register(K::ContentTypeSnapshot, SnapshotMapper::content_type());
        builder.register(
            K::DeliveryApiKey,
            DataMapper::new(K::DeliveryApiKey, Resource::DeliveryApiKey),
        );
        builder.register(
            K::EditorInterface,
            DataMapper::new(K::EditorInterface, Resource::EditorInterface),
        );
        builder.register(K::Entry, EntryMapper);
        builder.register(K::EntrySnapshot, SnapshotMapper::entry());
        builder.register(
            K::Environment,
            DataMapper::new(K::Environment, Resource::Environment),
        );
        builder.register(K::Extension, DataMapper::new(K::Extension, Resource::Extension));
        builder.register(K::Locale, DataMapper::new(K::Locale, Resource::Locale));
        builder.register(
            K::Organization,
            DataMapper::new(K::Organization, Resource::Organization).creation_only(),
        );
        builder.register(
            K::PersonalAccessToken,
            DataMapper::new(K::PersonalAccessToken, Resource::PersonalAccessToken),
        );
        builder.register(
            K::PreviewApiKey,
            DataMapper::new(K::PreviewApiKey, Resource::PreviewApiKey),
        );
        builder.register(K::Role, RoleMapper);
        builder.register(K::Space, DataMapper::new(K::Space, Resource::Space));
        builder.register(
            K::SpaceMembership,
            DataMapper::new(K::SpaceMembership, Resource::SpaceMembership),
        );
        builder.register(K::Upload, DataMapper::new(K::Upload, Resource::Upload));
        builder.register(
            K::User,
            DataMapper::new(K::User, Resource::User).creation_only(),
        );
        builder.register(K::Webhook, DataMapper::new(K::Webhook, Resource::Webhook));
        builder.register(
            K::WebhookCall,
            DataMapper::new(K::WebhookCall, Resource::WebhookCall).creation_only(),
        );
        builder.register(K::WebhookHealth, WebhookHealthMapper);
        builder.register(K::ResourceArray, ArrayMapper);
        builder.register(K::ResourceReferences, ReferencesMapper);

        builder
    }

    fn register(&mut self, kind: ResourceKind, mapper: impl Mapper + 'static) {
        self.mappers.insert(kind.as_str().to_string(), Arc::new(mapper));
    }

    /// Register (or replace) the mapper for `type_name`
    pub fn register_mapper(&mut self, type_name: impl Into<String>, mapper: Arc<dyn Mapper>) {
        self.mappers.insert(type_name.into(), mapper);
    }

    /// Install the hook generated loaders use to map entries of known content types.
    ///
    /// Entry payloads for which the matcher returns `None` fall back to the
    /// generic [`EntryMapper`].
    pub fn set_entry_matcher<F>(&mut self, matcher: F)
    where
        F: Fn(&JsonValue) -> Option<Arc<dyn Mapper>> + Send + Sync + 'static,
    {
        self.entry_matcher = Some(Arc::new(matcher));
    }

    /// Resolve the resource type name for a payload from its `sys.type`
    pub fn type_name_for(payload: &JsonValue) -> Result<String> {
        let sys = payload
            .get("sys")
            .ok_or_else(|| Error::payload("missing \"sys\" block"))?;
        let system_type = sys
            .get("type")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::payload("missing \"sys.type\""))?;

        let type_name = match system_type {
            "Array" if payload.get("includes").is_some() => "ResourceReferences",
            "Array" => "ResourceArray",
            "Asset" | "ContentType" | "EditorInterface" | "Entry" | "Environment"
            | "Extension" | "Locale" | "Organization" | "Role" | "PersonalAccessToken"
            | "PreviewApiKey" | "Space" | "SpaceMembership" | "Upload" | "User" => system_type,
            "Snapshot" => {
                let entity = sys
                    .get("snapshotEntityType")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| Error::payload("snapshot without \"sys.snapshotEntityType\""))?;
                return Ok(format!("{entity}Snapshot"));
            }
            "ApiKey" => "DeliveryApiKey",
            "Webhook" => "WebhookHealth",
            "WebhookCallDetails" | "WebhookCallOverview" => "WebhookCall",
            "WebhookDefinition" => "Webhook",
            other => return Err(Error::UnrecognizedSystemType(other.to_string())),
        };
        Ok(type_name.to_string())
    }

    /// Build a resource from `payload`, refreshing `existing` when given
    pub fn build(&self, payload: &JsonValue, existing: Option<Resource>) -> Result<Resource> {
        let type_name = Self::type_name_for(payload)?;
        let mapper = self.mapper_for(&type_name, payload)?;
        debug!(
            "Building {} (update: {})",
            type_name,
            existing.is_some()
        );
        mapper.map(self, existing, payload)
    }

    /// Refresh `resource` in place from a newer payload
    pub fn rehydrate(&self, resource: &mut Resource, payload: &JsonValue) -> Result<()> {
        *resource = self.build(payload, Some(resource.clone()))?;
        Ok(())
    }

    fn mapper_for(&self, type_name: &str, payload: &JsonValue) -> Result<Arc<dyn Mapper>> {
        if type_name == ResourceKind::Entry.as_str() {
            if let Some(mapper) = self.entry_matcher.as_ref().and_then(|matcher| matcher(payload)) {
                trace!("Using content type mapper for entry");
                return Ok(mapper);
            }
        }
        self.mappers
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::NoMapper(type_name.to_string()))
    }
}
