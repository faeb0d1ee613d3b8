//! Endpoint registry for Contentful Management API resources.
//!
//! Every resource type the SDK can request is described by an
//! [`EndpointDescriptor`]: its URI template, the path parameters a caller
//! must supply and the placeholder naming the resource's own ID. The table is
//! compiled in and never mutated, so a single [`ApiConfiguration`] can be
//! shared freely between threads.
//!
//! Types that are not registered themselves (for instance generated entry
//! types) declare their ancestry through the [`Typed`] trait and resolve to
//! the nearest registered ancestor.
//!
//! # Examples
//!
//! ```
//! use contentful_core::ApiConfiguration;
//!
//! let config = ApiConfiguration::global();
//! let asset = config.resolve("Asset").unwrap();
//! assert_eq!(asset.id_parameter(), "asset");
//! assert_eq!(asset.required_parameters(), ["space", "environment"]);
//!
//! let webhook = config.resolve_link("WebhookDefinition").unwrap();
//! assert_eq!(webhook.resource_type(), "Webhook");
//! ```

// Internal imports (std, crate)
use std::collections::HashMap;

use crate::error::{Error, Result};

// External imports (alphabetized)
use once_cell::sync::Lazy;

/// Host serving file uploads.
pub const UPLOAD_HOST: &str = "https://upload.contentful.com";

/// A type identity the registry can resolve.
///
/// This replaces class inheritance: a type reports its own name and, when it
/// extends a registered resource kind, the chain of ancestors (nearest first)
/// the registry should fall back to.
pub trait Typed {
    /// Identifier of the most-derived type
    fn type_name(&self) -> &str;

    /// Ancestor type identifiers, nearest first
    fn ancestors(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Typed for str {
    fn type_name(&self) -> &str {
        self
    }
}

impl Typed for String {
    fn type_name(&self) -> &str {
        self
    }
}

impl<T: Typed + ?Sized> Typed for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn ancestors(&self) -> Vec<&str> {
        (**self).ancestors()
    }
}

/// Static configuration row for one resource type.
#[derive(Debug, Clone, Copy)]
struct EndpointConfig {
    resource_type: &'static str,
    uri: &'static str,
    parameters: &'static [&'static str],
    id: &'static str,
    host: Option<&'static str>,
}

const fn endpoint(
    resource_type: &'static str,
    uri: &'static str,
    parameters: &'static [&'static str],
    id: &'static str,
) -> EndpointConfig {
    EndpointConfig {
        resource_type,
        uri,
        parameters,
        id,
        host: None,
    }
}

const SPACE_ENV: &[&str] = &["space", "environment"];

const ENDPOINTS: &[EndpointConfig] = &[
    endpoint(
        "Asset",
        "/spaces/{space}/environments/{environment}/assets/{asset}",
        SPACE_ENV,
        "asset",
    ),
    endpoint(
        "ContentType",
        "/spaces/{space}/environments/{environment}/content_types/{contentType}",
        SPACE_ENV,
        "contentType",
    ),
    endpoint(
        "ContentTypeSnapshot",
        "/spaces/{space}/environments/{environment}/content_types/{contentType}/snapshots/{snapshot}",
        &["space", "environment", "contentType"],
        "snapshot",
    ),
    endpoint(
        "DeliveryApiKey",
        "/spaces/{space}/api_keys/{deliveryApiKey}",
        &["space"],
        "deliveryApiKey",
    ),
    endpoint(
        "EditorInterface",
        "/spaces/{space}/environments/{environment}/content_types/{contentType}/editor_interface",
        &["space", "environment", "contentType"],
        "",
    ),
    endpoint(
        "Entry",
        "/spaces/{space}/environments/{environment}/entries/{entry}",
        SPACE_ENV,
        "entry",
    ),
    endpoint(
        "EntrySnapshot",
        "/spaces/{space}/environments/{environment}/entries/{entry}/snapshots/{snapshot}",
        &["space", "environment", "entry"],
        "snapshot",
    ),
    endpoint(
        "Environment",
        "/spaces/{space}/environments/{environment}",
        &["space"],
        "environment",
    ),
    endpoint(
        "Extension",
        "/spaces/{space}/environments/{environment}/extensions/{extension}",
        SPACE_ENV,
        "extension",
    ),
    endpoint(
        "Locale",
        "/spaces/{space}/environments/{environment}/locales/{locale}",
        SPACE_ENV,
        "locale",
    ),
    endpoint("Organization", "/organizations", &[], ""),
    endpoint(
        "PersonalAccessToken",
        "/users/me/access_tokens/{personalAccessToken}",
        &[],
        "personalAccessToken",
    ),
    endpoint(
        "PreviewApiKey",
        "/spaces/{space}/preview_api_keys/{previewApiKey}",
        &["space"],
        "previewApiKey",
    ),
    endpoint(
        "PublishedContentType",
        "/spaces/{space}/environments/{environment}/public/content_types/{contentType}",
        SPACE_ENV,
        "contentType",
    ),
    endpoint("Role", "/spaces/{space}/roles/{role}", &["space"], "role"),
    endpoint("Space", "/spaces/{space}", &[], "space"),
    endpoint(
        "SpaceMembership",
        "/spaces/{space}/space_memberships/{spaceMembership}",
        &["space"],
        "spaceMembership",
    ),
    EndpointConfig {
        resource_type: "Upload",
        uri: "/spaces/{space}/uploads/{upload}",
        parameters: &["space"],
        id: "upload",
        host: Some(UPLOAD_HOST),
    },
    endpoint("User", "/users/me", &[], ""),
    endpoint(
        "Webhook",
        "/spaces/{space}/webhook_definitions/{webhook}",
        &["space"],
        "webhook",
    ),
    endpoint(
        "WebhookCall",
        "/spaces/{space}/webhooks/{webhook}/calls/{call}",
        &["space", "webhook"],
        "call",
    ),
    endpoint(
        "WebhookHealth",
        "/spaces/{space}/webhooks/{webhook}/health",
        &["space", "webhook"],
        "",
    ),
];

/// Wire-level link types and the resource type each one refers to.
const LINK_ALIASES: &[(&str, &str)] = &[
    ("ApiKey", "DeliveryApiKey"),
    ("Asset", "Asset"),
    ("ContentType", "ContentType"),
    ("Entry", "Entry"),
    ("Environment", "Environment"),
    ("Extension", "Extension"),
    ("Locale", "Locale"),
    ("Organization", "Organization"),
    ("PreviewApiKey", "PreviewApiKey"),
    ("Role", "Role"),
    ("Space", "Space"),
    ("SpaceMembership", "SpaceMembership"),
    ("Upload", "Upload"),
    ("User", "User"),
    ("WebhookDefinition", "Webhook"),
];

static GLOBAL: Lazy<ApiConfiguration> = Lazy::new(ApiConfiguration::new);

/// Resolved endpoint configuration for a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    resource_type: String,
    uri_template: &'static str,
    required_parameters: &'static [&'static str],
    id_parameter: &'static str,
    host: Option<&'static str>,
}

impl EndpointDescriptor {
    /// The type this descriptor was resolved for (not necessarily the registered one)
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// URI template with `{name}` placeholders
    pub fn uri_template(&self) -> &str {
        self.uri_template
    }

    /// Path parameters the caller must supply, excluding the ID placeholder
    pub fn required_parameters(&self) -> &[&'static str] {
        self.required_parameters
    }

    /// Placeholder naming the resource's own ID; empty for singletons
    pub fn id_parameter(&self) -> &str {
        self.id_parameter
    }

    /// Whether the resource has no per-instance ID segment
    pub fn is_singleton(&self) -> bool {
        self.id_parameter.is_empty()
    }

    /// Alternate API host, if the resource is not served from the default one
    pub fn host(&self) -> Option<&str> {
        self.host
    }
}

/// Table-driven endpoint configuration for every resource type.
#[derive(Debug)]
pub struct ApiConfiguration {
    endpoints: HashMap<&'static str, EndpointConfig>,
    links: HashMap<&'static str, &'static str>,
}

impl Default for ApiConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiConfiguration {
    /// Build the configuration from the compiled-in tables
    pub fn new() -> Self {
        Self {
            endpoints: ENDPOINTS.iter().map(|e| (e.resource_type, *e)).collect(),
            links: LINK_ALIASES.iter().copied().collect(),
        }
    }

    /// Shared process-wide instance
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Resolve the endpoint configuration for a type or instance.
    ///
    /// Falls back to the nearest registered ancestor, but the returned
    /// descriptor keeps reporting the original type.
    pub fn resolve<T: Typed + ?Sized>(&self, typed: &T) -> Result<EndpointDescriptor> {
        let name = normalize(typed.type_name());
        if let Some(config) = self.endpoints.get(name) {
            return Ok(describe(name, config));
        }

        for ancestor in typed.ancestors() {
            if let Some(config) = self.endpoints.get(normalize(ancestor)) {
                log::trace!("resolved {name} through ancestor {ancestor}");
                return Ok(describe(name, config));
            }
        }

        Err(Error::UnknownResourceType(name.to_string()))
    }

    /// Resolve the endpoint configuration for a link type such as `"WebhookDefinition"`
    pub fn resolve_link(&self, link_type: &str) -> Result<EndpointDescriptor> {
        let resource_type = self
            .links
            .get(link_type)
            .ok_or_else(|| Error::UnknownLinkType(link_type.to_string()))?;

        let mut descriptor = self.resolve(*resource_type)?;
        descriptor.resource_type = (*resource_type).to_string();
        Ok(descriptor)
    }

    /// Iterate over every registered descriptor, sorted by resource type
    pub fn descriptors(&self) -> Vec<EndpointDescriptor> {
        let mut all: Vec<_> = self
            .endpoints
            .values()
            .map(|config| describe(config.resource_type, config))
            .collect();
        all.sort_by(|a, b| a.resource_type.cmp(&b.resource_type));
        all
    }
}

/// Strip a leading namespace separator (`\Asset`, `::Asset`)
fn normalize(name: &str) -> &str {
    name.trim_start_matches('\\').trim_start_matches("::")
}

fn describe(resource_type: &str, config: &EndpointConfig) -> EndpointDescriptor {
    EndpointDescriptor {
        resource_type: resource_type.to_string(),
        uri_template: config.uri,
        required_parameters: config.parameters,
        id_parameter: config.id,
        host: config.host,
    }
}
