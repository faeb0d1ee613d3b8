//! Link resolution: fetching the resource a [`Link`] points at.
//!
//! The core does no I/O itself. A [`Transport`] performs the GET request,
//! while [`ApiLinkResolver`] computes the request path from the registry and
//! hydrates the response through a [`ResourceBuilder`]. Generated entry types
//! take a `&dyn LinkResolver` in their `resolve_*` helpers.

// Internal imports (std, crate)
use crate::{
    builder::ResourceBuilder,
    error::Result,
    registry::ApiConfiguration,
    resource::{Link, Resource},
    uri::{Parameters, RequestUriBuilder},
};

// External imports (alphabetized)
use log::debug;
use serde_json::Value as JsonValue;

/// Performs GET requests against the API.
pub trait Transport: Send + Sync {
    /// Fetch `path`, on `host` when the endpoint is not served by the default API host
    fn get(&self, path: &str, host: Option<&str>) -> Result<JsonValue>;
}

/// Turns links into the resources they reference.
pub trait LinkResolver {
    /// Resolve one link; `parameters` supplies the space and environment
    fn resolve_link(&self, link: &Link, parameters: &Parameters) -> Result<Resource>;

    /// Resolve several links, stopping at the first failure
    fn resolve_links(&self, links: &[Link], parameters: &Parameters) -> Result<Vec<Resource>> {
        links
            .iter()
            .map(|link| self.resolve_link(link, parameters))
            .collect()
    }
}

/// Resolves links with the endpoint registry and a [`Transport`].
#[derive(Debug)]
pub struct ApiLinkResolver<T> {
    transport: T,
    builder: ResourceBuilder,
    configuration: &'static ApiConfiguration,
}

impl<T: Transport> ApiLinkResolver<T> {
    pub fn new(transport: T, builder: ResourceBuilder) -> Self {
        Self {
            transport,
            builder,
            configuration: ApiConfiguration::global(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> LinkResolver for ApiLinkResolver<T> {
    fn resolve_link(&self, link: &Link, parameters: &Parameters) -> Result<Resource> {
        let descriptor = self.configuration.resolve_link(link.link_type())?;
        let path = RequestUriBuilder::build(&descriptor, parameters, Some(link.id()))?;
        debug!("Resolving {} link {} via {}", link.link_type(), link.id(), path);

        let payload = self.transport.get(&path, descriptor.host())?;
        self.builder.build(&payload, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, registry::UPLOAD_HOST, resource::ResourceKind};
    use serde_json::json;
    use std::{collections::HashMap, sync::Mutex};

    /// Serves canned payloads and records every request
    #[derive(Default)]
    struct MemoryTransport {
        responses: HashMap<String, JsonValue>,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MemoryTransport {
        fn with(mut self, path: &str, payload: JsonValue) -> Self {
            self.responses.insert(path.to_string(), payload);
            self
        }
    }

    impl Transport for MemoryTransport {
        fn get(&self, path: &str, host: Option<&str>) -> Result<JsonValue> {
            self.requests
                .lock()
                .unwrap()
                .push((path.to_string(), host.map(String::from)));
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| Error::payload(format!("no response for {path}")))
        }
    }

    fn space_parameters() -> Parameters {
        [
            ("space".to_string(), "s1".to_string()),
            ("environment".to_string(), "master".to_string()),
        ]
        .into()
    }

    #[test]
    fn test_resolve_entry_link() -> Result<()> {
        let transport = MemoryTransport::default().with(
            "/spaces/s1/environments/master/entries/ada",
            json!({"sys": {"type": "Entry", "id": "ada"}, "fields": {}}),
        );
        let resolver = ApiLinkResolver::new(transport, ResourceBuilder::new());

        let resource = resolver.resolve_link(&Link::new("ada", "Entry"), &space_parameters())?;
        assert_eq!(resource.kind(), ResourceKind::Entry);
        assert_eq!(resource.sys().map(|sys| sys.id.as_str()), Some("ada"));
        Ok(())
    }

    #[test]
    fn test_aliased_link_and_host_override() -> Result<()> {
        let transport = MemoryTransport::default()
            .with(
                "/spaces/s1/webhook_definitions/hook",
                json!({"sys": {"type": "WebhookDefinition", "id": "hook"}, "name": "Hook", "url": "https://example.com"}),
            )
            .with(
                "/spaces/s1/uploads/up1",
                json!({"sys": {"type": "Upload", "id": "up1"}}),
            );
        let resolver = ApiLinkResolver::new(transport, ResourceBuilder::new());

        let resources = resolver.resolve_links(
            &[
                Link::new("hook", "WebhookDefinition"),
                Link::new("up1", "Upload"),
            ],
            &space_parameters(),
        )?;
        assert_eq!(resources[0].kind(), ResourceKind::Webhook);
        assert_eq!(resources[1].kind(), ResourceKind::Upload);

        let requests = resolver.transport().requests.lock().unwrap();
        assert_eq!(requests[0].1, None);
        assert_eq!(requests[1].1.as_deref(), Some(UPLOAD_HOST));
        Ok(())
    }

    #[test]
    fn test_resolution_failures() {
        let resolver = ApiLinkResolver::new(MemoryTransport::default(), ResourceBuilder::new());

        assert!(matches!(
            resolver.resolve_link(&Link::new("x", "Snapshot"), &space_parameters()),
            Err(Error::UnknownLinkType(t)) if t == "Snapshot"
        ));
        assert!(matches!(
            resolver.resolve_link(&Link::new("x", "Asset"), &Parameters::new()),
            Err(Error::MissingParameters { parameters, .. }) if parameters == ["space", "environment"]
        ));
        // nothing was requested for either failure
        assert!(resolver.transport().requests.lock().unwrap().is_empty());
    }
}
