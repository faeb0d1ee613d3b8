//! Request path construction from endpoint descriptors.
//!
//! # Examples
//!
//! ```
//! use contentful_core::{ApiConfiguration, RequestUriBuilder};
//! use contentful_core::uri::Parameters;
//!
//! let descriptor = ApiConfiguration::global().resolve("Asset").unwrap();
//! let mut parameters = Parameters::new();
//! parameters.insert("space".into(), "s1".into());
//! parameters.insert("environment".into(), "e1".into());
//!
//! let path = RequestUriBuilder::build(&descriptor, &parameters, Some("a1")).unwrap();
//! assert_eq!(path, "/spaces/s1/environments/e1/assets/a1");
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    registry::EndpointDescriptor,
};

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Path parameter bag, keyed by placeholder name
pub type Parameters = BTreeMap<String, String>;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/?\{(\w+)\}").expect("placeholder pattern is valid"));

/// Builds request paths by substituting parameters into URI templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestUriBuilder;

impl RequestUriBuilder {
    /// Build the request path for `descriptor`.
    ///
    /// The ID placeholder takes `resource_id` unless `parameters` sets it
    /// explicitly. Every missing required parameter is reported in a single
    /// [`Error::MissingParameters`]. When no ID is available the ID segment is
    /// left out, yielding the collection path.
    pub fn build(
        descriptor: &EndpointDescriptor,
        parameters: &Parameters,
        resource_id: Option<&str>,
    ) -> Result<String> {
        let missing: Vec<String> = descriptor
            .required_parameters()
            .iter()
            .filter(|name| !parameters.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingParameters {
                parameters: missing,
                resource_type: descriptor.resource_type().to_string(),
            });
        }

        let id_parameter = descriptor.id_parameter();
        let id = if id_parameter.is_empty() {
            None
        } else {
            parameters
                .get(id_parameter)
                .map(String::as_str)
                .or(resource_id)
        };

        let path = PLACEHOLDER.replace_all(descriptor.uri_template(), |caps: &Captures| {
            let segment = &caps[0];
            let name = &caps[1];
            let value = if !id_parameter.is_empty() && name == id_parameter {
                id
            } else {
                parameters.get(name).map(String::as_str)
            };
            match value {
                Some(value) => segment.replace(&format!("{{{name}}}"), value),
                None if name == id_parameter => String::new(),
                None => segment.to_string(),
            }
        });

        Ok(path.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ApiConfiguration;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn descriptor(name: &str) -> EndpointDescriptor {
        ApiConfiguration::global().resolve(name).unwrap()
    }

    #[test]
    fn test_substitutes_every_placeholder() -> Result<()> {
        let path = RequestUriBuilder::build(
            &descriptor("Asset"),
            &params(&[("space", "s1"), ("environment", "e1")]),
            Some("a1"),
        )?;
        assert_eq!(path, "/spaces/s1/environments/e1/assets/a1");
        Ok(())
    }

    #[test]
    fn test_explicit_id_parameter_wins() -> Result<()> {
        let path = RequestUriBuilder::build(
            &descriptor("Asset"),
            &params(&[("space", "s1"), ("environment", "e1"), ("asset", "a2")]),
            Some("a1"),
        )?;
        assert_eq!(path, "/spaces/s1/environments/e1/assets/a2");
        Ok(())
    }

    #[test]
    fn test_missing_parameters_are_aggregated() {
        let err = RequestUriBuilder::build(&descriptor("Asset"), &Parameters::new(), Some("a1"))
            .unwrap_err();
        match err {
            Error::MissingParameters {
                parameters,
                resource_type,
            } => {
                assert_eq!(parameters, vec!["space", "environment"]);
                assert_eq!(resource_type, "Asset");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_parameter_reports_resolved_type() {
        struct Post;
        impl crate::registry::Typed for Post {
            fn type_name(&self) -> &str {
                "Post"
            }
            fn ancestors(&self) -> Vec<&str> {
                vec!["Entry"]
            }
        }

        let descriptor = ApiConfiguration::global().resolve(&Post).unwrap();
        let err = RequestUriBuilder::build(&descriptor, &params(&[("space", "s1")]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingParameters { parameters, resource_type }
                if parameters == vec!["environment"] && resource_type == "Post"
        ));
    }

    #[test]
    fn test_singleton_has_no_id_segment() -> Result<()> {
        let path =
            RequestUriBuilder::build(&descriptor("Organization"), &Parameters::new(), Some("o1"))?;
        assert_eq!(path, "/organizations");

        let path = RequestUriBuilder::build(
            &descriptor("WebhookHealth"),
            &params(&[("space", "s1"), ("webhook", "w1")]),
            Some("ignored"),
        )?;
        assert_eq!(path, "/spaces/s1/webhooks/w1/health");
        Ok(())
    }

    #[test]
    fn test_collection_path_without_id() -> Result<()> {
        let path = RequestUriBuilder::build(
            &descriptor("ContentType"),
            &params(&[("space", "s1"), ("environment", "master")]),
            None,
        )?;
        assert_eq!(path, "/spaces/s1/environments/master/content_types");
        Ok(())
    }

    #[test]
    fn test_substitution_is_single_pass() -> Result<()> {
        let path = RequestUriBuilder::build(
            &descriptor("Space"),
            &Parameters::new(),
            Some("{space}"),
        )?;
        assert_eq!(path, "/spaces/{space}");
        Ok(())
    }
}
