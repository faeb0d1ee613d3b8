//! Error handling for the Contentful SDK core.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every failure the registry, the
//! URI builder, the resource builder and the code generator can raise has its
//! own variant so callers can tell *why* a resolution failed.
//!
//! # Examples
//!
//! ```
//! use contentful_core::error::{Error, Result};
//! use contentful_core::ApiConfiguration;
//!
//! fn lookup() -> Result<()> {
//!     match ApiConfiguration::global().resolve("TotallyMadeUp") {
//!         Err(Error::UnknownResourceType(name)) => assert_eq!(name, "TotallyMadeUp"),
//!         other => panic!("unexpected result: {other:?}"),
//!     }
//!     Ok(())
//! }
//! # lookup().unwrap();
//! ```

use thiserror::Error;

/// Result type for Contentful SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Contentful SDK operations
#[derive(Debug, Error)]
pub enum Error {
    /// Neither the type nor any of its ancestors has an endpoint configuration
    #[error("Trying to access invalid configuration for class \"{0}\".")]
    UnknownResourceType(String),

    /// The link type is not part of the link alias table
    #[error("Trying to get link configuration for an invalid link type \"{0}\".")]
    UnknownLinkType(String),

    /// One or more required path parameters were not supplied
    #[error(
        "Trying to make an API call on resource of class \"{resource_type}\" without required parameters \"{}\".",
        .parameters.join("\", \"")
    )]
    MissingParameters {
        /// Every missing parameter, in declaration order
        parameters: Vec<String>,
        /// The resource type the request was built for
        resource_type: String,
    },

    /// The payload's `sys.type` has no row in the dispatch table
    #[error("Unexpected system type \"{0}\" while trying to build a resource.")]
    UnrecognizedSystemType(String),

    /// The dispatch table resolved a type no mapper is registered for
    #[error("No mapper is registered for resource type \"{0}\".")]
    NoMapper(String),

    /// A creation-only mapper was asked to update an existing instance
    #[error("Mapper \"{0}\" only supports creating new objects, not updating existing ones.")]
    UnsupportedUpdate(String),

    /// A role constraint node used a key outside `and`, `or`, `not`, `equals`
    #[error("Trying to parse a constraint with an invalid key \"{0}\".")]
    InvalidConstraintKey(String),

    /// A validation was attached to a field whose type it does not support
    #[error("The validation \"{validation}\" can not be used for fields of type \"{field_type}\".")]
    InvalidValidation {
        /// Wire name of the validation rule
        validation: String,
        /// Field (or items) type it was attached to
        field_type: String,
    },

    /// Field type outside the supported enumeration
    #[error("Unknown field type \"{0}\".")]
    UnknownFieldType(String),

    /// Validation rule outside the supported set
    #[error("Unknown validation \"{0}\".")]
    UnknownValidation(String),

    /// A raw field value could not be converted to its accessor type
    #[error("Field \"{field}\" expected a value of type {expected}.")]
    FieldConversion {
        /// Field identifier
        field: String,
        /// Description of the expected value
        expected: &'static str,
    },

    /// Structurally invalid payload
    #[error("Malformed payload: {0}")]
    Payload(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new malformed payload error
    pub fn payload<S: Into<String>>(msg: S) -> Self {
        Self::Payload(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new field conversion error
    pub fn conversion(field: impl Into<String>, expected: &'static str) -> Self {
        Self::FieldConversion {
            field: field.into(),
            expected,
        }
    }
}
