//! Contentful Management Core Library
//!
//! This library provides the pieces the management SDK is built from: the
//! endpoint registry and URI builder, resource dispatch from decoded JSON
//! payloads, and generation of typed entry code from content types.

pub mod builder;
pub mod codegen;
pub mod config;
pub mod error;
pub mod field;
pub mod link;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod uri;
pub mod utils;

pub use crate::{
    builder::{Mapper, ResourceBuilder},
    codegen::{GeneratedArtifact, Generator, TemplateKind, TemplateManager},
    config::Config,
    error::{Error, Result},
    link::{ApiLinkResolver, LinkResolver, Transport},
    registry::{ApiConfiguration, EndpointDescriptor, Typed},
    resource::{CustomEntry, Link, Location, Resource, ResourceKind, SystemProperties},
    uri::{Parameters, RequestUriBuilder},
};
