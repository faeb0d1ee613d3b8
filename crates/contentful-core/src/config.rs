//! Configuration for fetching content types and generating entry code.
//!
//! The configuration can be created programmatically or loaded from a YAML or
//! TOML file; the format is picked from the file extension.
//!
//! # Examples
//!
//! ```no_run
//! use contentful_core::config::Config;
//!
//! # async fn run() -> contentful_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("cfexampleapi", "src/content");
//! config.namespace = "crate::content".to_string();
//!
//! // Or load it from a file
//! let config = Config::from_file("contentful.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::{
    codegen::validate_namespace,
    error::{Error, Result},
};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Environment variable consulted when no access token is configured
pub const ACCESS_TOKEN_ENV: &str = "CONTENTFUL_MANAGEMENT_ACCESS_TOKEN";

/// Largest page size the Content Management API accepts
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Configuration for content type generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Space to read content types from
    pub space_id: String,

    /// Environment within the space
    #[serde(default = "default_environment")]
    pub environment_id: String,

    /// Management API token; falls back to the environment when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Base URL of the Content Management API
    #[serde(default = "default_api_host")]
    pub api_host: Url,

    /// Output directory for generated code
    pub output_dir: String,

    /// Rust module path the generated code lives at
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Content types requested per page
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Optional directory with template overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(space_id: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            environment_id: default_environment(),
            access_token: None,
            api_host: default_api_host(),
            output_dir: output_dir.into(),
            namespace: default_namespace(),
            page_limit: default_page_limit(),
            template_dir: None,
        }
    }

    /// Load configuration from a `.yaml`/`.yml` or `.toml` file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the values a generation run depends on
    pub fn validate(&self) -> Result<()> {
        if self.space_id.trim().is_empty() {
            return Err(Error::config("space_id must not be empty"));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&self.page_limit) {
            return Err(Error::config(format!(
                "page_limit must be between 1 and {MAX_PAGE_LIMIT}, got {}",
                self.page_limit
            )));
        }
        validate_namespace(&self.namespace)
    }

    /// The configured token, or the one in [`ACCESS_TOKEN_ENV`]
    pub fn resolve_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
            .filter(|token| !token.is_empty())
    }
}

fn default_environment() -> String {
    "master".to_string()
}

fn default_api_host() -> Url {
    Url::parse("https://api.contentful.com").expect("default API host is a valid URL")
}

fn default_namespace() -> String {
    "crate::content".to_string()
}

fn default_page_limit() -> u32 {
    100
}
