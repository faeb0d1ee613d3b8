//! Template loading and rendering for generated sources.
//!
//! The templates ship inside the crate. A directory of overrides may replace
//! any of them by file name, e.g. a custom `entry.rs.tera`.

// Internal imports (std, crate)
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use crate::error::{Error, Result};

// External imports (alphabetized)
use serde::Serialize;
use tera::{Context, Tera};

/// The templates the generator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// One entry type per content type
    Entry,
    /// One mapper per content type
    Mapper,
    /// Content type ID to mapper dispatch
    Loader,
    /// Root `mod.rs` of the generated namespace
    ModuleRoot,
    /// `entry/mod.rs` and `mapper/mod.rs`
    ModuleList,
}

impl TemplateKind {
    /// Returns the template file name as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry.rs.tera",
            Self::Mapper => "mapper.rs.tera",
            Self::Loader => "loader.rs.tera",
            Self::ModuleRoot => "mod.rs.tera",
            Self::ModuleList => "module_list.rs.tera",
        }
    }

    /// Returns an iterator over all template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplateKind::*;
        [Entry, Mapper, Loader, ModuleRoot, ModuleList].into_iter()
    }

    fn embedded_source(&self) -> &'static str {
        match self {
            Self::Entry => include_str!("../../templates/entry.rs.tera"),
            Self::Mapper => include_str!("../../templates/mapper.rs.tera"),
            Self::Loader => include_str!("../../templates/loader.rs.tera"),
            Self::ModuleRoot => include_str!("../../templates/mod.rs.tera"),
            Self::ModuleList => include_str!("../../templates/module_list.rs.tera"),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TemplateKind::all()
            .find(|kind| kind.as_str() == s || kind.as_str().trim_end_matches(".rs.tera") == s)
            .ok_or_else(|| format!("Unknown template: {}", s))
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Manages loading and rendering of code generation templates
#[derive(Debug, Clone)]
pub struct TemplateManager {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    /// Directory overrides were loaded from, if any
    template_dir: Option<PathBuf>,
}

impl TemplateManager {
    /// Create a manager with the built-in templates
    pub fn embedded() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(
            TemplateKind::all().map(|kind| (kind.as_str(), kind.embedded_source())),
        )?;
        Ok(Self {
            tera: Arc::new(tera),
            template_dir: None,
        })
    }

    /// Create a manager whose templates are replaced by the files found in `dir`
    ///
    /// Templates missing from `dir` keep their built-in version.
    pub async fn with_overrides(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !tokio::fs::metadata(dir).await?.is_dir() {
            return Err(Error::template(format!(
                "Template directory {} is not a directory",
                dir.display()
            )));
        }

        let mut sources = Vec::new();
        for kind in TemplateKind::all() {
            let path = dir.join(kind.as_str());
            let source = match tokio::fs::read_to_string(&path).await {
                Ok(source) => {
                    log::debug!("Using template override {}", path.display());
                    source
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    kind.embedded_source().to_string()
                }
                Err(e) => return Err(e.into()),
            };
            sources.push((kind.as_str(), source));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources).map_err(|e| {
            Error::template(format!(
                "Failed to parse templates in {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self {
            tera: Arc::new(tera),
            template_dir: Some(dir.to_path_buf()),
        })
    }

    /// Directory overrides were loaded from
    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Render `kind` with `context` and normalise the output
    pub fn render<T: Serialize>(&self, kind: TemplateKind, context: &T) -> Result<String> {
        let context = Context::from_serialize(context)?;
        let rendered = self.tera.render(kind.as_str(), &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", kind, e);
            Error::template(format!("Failed to render template '{}': {}", kind, e))
        })?;
        Ok(normalize(&rendered))
    }
}

/// Normalise whitespace so rendered output is stable.
///
/// Trailing whitespace is trimmed, runs of blank lines collapse to one,
/// blank lines directly inside braces are dropped, and the text ends with
/// exactly one newline.
pub fn normalize(source: &str) -> String {
    let lines: Vec<&str> = source.lines().map(str::trim_end).collect();

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            kept.push(line);
            continue;
        }
        let after_open = kept.last().map_or(true, |prev| prev.is_empty() || prev.ends_with('{'));
        let before_close = lines[i + 1..]
            .iter()
            .find(|next| !next.is_empty())
            .map_or(true, |next| next.trim_start().starts_with('}'));
        if !after_open && !before_close {
            kept.push(line);
        }
    }

    let mut output = kept.join("\n");
    output.push('\n');
    output
}
