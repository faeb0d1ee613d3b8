//! Code generation of typed entry code for content types.
//!
//! For every [`ContentTypeSchema`] the generator emits an entry type with
//! locale-scoped accessors and a [`Mapper`](crate::Mapper) filling it from raw
//! payloads. A loader maps content type IDs to those mappers, and module
//! index files tie everything together under one namespace:
//!
//! ```text
//! mod.rs
//! loader.rs
//! entry/mod.rs
//! entry/blog_post.rs
//! mapper/mod.rs
//! mapper/blog_post.rs
//! ```
//!
//! Generation is a pure function of its input: the same schemas always
//! produce byte-identical files.
//!
//! # Examples
//!
//! ```
//! use contentful_core::codegen::Generator;
//! use contentful_core::schema::{ContentTypeSchema, FieldSchema, FieldType};
//!
//! let schema = ContentTypeSchema::new("blog-post", "Blog Post")
//!     .with_field(FieldSchema::new("title", "Title", FieldType::Symbol));
//!
//! let generator = Generator::new().unwrap();
//! let entry = generator.generate_entry_class(&schema, "crate::content").unwrap();
//! assert_eq!(entry.path.to_str(), Some("entry/blog_post.rs"));
//! assert!(entry.content.contains("pub struct BlogPost {"));
//! ```

mod context;
mod templates;
mod types;

// Internal imports (std, crate)
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    schema::ContentTypeSchema,
};

use context::{
    EntryContext, LoaderContext, MapperContext, ModuleEntry, ModuleListContext,
    ModuleRootContext, Naming,
};

// External imports (alphabetized)
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

pub use templates::{normalize, TemplateKind, TemplateManager};
pub use types::{type_mapping, LinkArity, TypeMapping};

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(crate|[A-Za-z_][A-Za-z0-9_]*)(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("namespace pattern is valid")
});

/// Check that `namespace` is a Rust module path such as `crate::content`
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if NAMESPACE.is_match(namespace) {
        Ok(())
    } else {
        Err(Error::config(format!(
            "Namespace \"{namespace}\" is not a Rust module path"
        )))
    }
}

/// A generated source file, relative to the namespace's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedArtifact {
    fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Write the artifact below `root`, creating directories as needed
    pub async fn write_to(&self, root: impl AsRef<Path>) -> Result<PathBuf> {
        let target = root.as_ref().join(&self.path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &self.content).await?;
        Ok(target)
    }
}

/// Renders entry, mapper, loader and module files from content type schemas.
#[derive(Debug, Clone)]
pub struct Generator {
    templates: TemplateManager,
}

impl Generator {
    /// Create a generator with the built-in templates
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: TemplateManager::embedded()?,
        })
    }

    /// Create a generator using `templates`
    pub fn with_templates(templates: TemplateManager) -> Self {
        Self { templates }
    }

    pub fn generate_entry_class(
        &self,
        schema: &ContentTypeSchema,
        namespace: &str,
    ) -> Result<GeneratedArtifact> {
        validate_namespace(namespace)?;
        let naming = Naming::new(&schema.id);
        debug!("Generating entry {} for {}", naming.class_name, schema.id);

        let content = self
            .templates
            .render(TemplateKind::Entry, &EntryContext::new(schema, namespace))?;
        Ok(GeneratedArtifact::new(
            Path::new("entry").join(format!("{}.rs", naming.module)),
            content,
        ))
    }

    pub fn generate_mapper_class(
        &self,
        schema: &ContentTypeSchema,
        namespace: &str,
    ) -> Result<GeneratedArtifact> {
        validate_namespace(namespace)?;
        let naming = Naming::new(&schema.id);
        debug!("Generating mapper {} for {}", naming.mapper_name, schema.id);

        let content = self
            .templates
            .render(TemplateKind::Mapper, &MapperContext::new(schema, namespace))?;
        Ok(GeneratedArtifact::new(
            Path::new("mapper").join(format!("{}.rs", naming.module)),
            content,
        ))
    }

    /// Generate the dispatch from content type ID to mapper
    pub fn generate_loader(
        &self,
        schemas: &[ContentTypeSchema],
        namespace: &str,
    ) -> Result<GeneratedArtifact> {
        validate_namespace(namespace)?;
        let sorted = sorted_unique(schemas)?;
        let content = self
            .templates
            .render(TemplateKind::Loader, &LoaderContext::new(&sorted, namespace))?;
        Ok(GeneratedArtifact::new("loader.rs", content))
    }

    /// Generate `mod.rs`, `entry/mod.rs` and `mapper/mod.rs`
    pub fn generate_module_index(
        &self,
        schemas: &[ContentTypeSchema],
        namespace: &str,
    ) -> Result<Vec<GeneratedArtifact>> {
        validate_namespace(namespace)?;
        let sorted = sorted_unique(schemas)?;
        let list = |summary: &'static str, item: fn(Naming) -> (String, String)| {
            let mut modules: Vec<ModuleEntry> = sorted
                .iter()
                .map(|schema| {
                    let (module, item) = item(Naming::new(&schema.id));
                    ModuleEntry { module, item }
                })
                .collect();
            modules.sort_by(|a, b| a.module.cmp(&b.module));
            ModuleListContext { summary, modules }
        };

        let root = self.templates.render(
            TemplateKind::ModuleRoot,
            &ModuleRootContext {
                namespace: namespace.to_string(),
            },
        )?;
        let entries = self.templates.render(
            TemplateKind::ModuleList,
            &list("Entry types, one per content type.", |n| (n.module, n.class_name)),
        )?;
        let mappers = self.templates.render(
            TemplateKind::ModuleList,
            &list("Mappers, one per content type.", |n| (n.module, n.mapper_name)),
        )?;

        Ok(vec![
            GeneratedArtifact::new("mod.rs", root),
            GeneratedArtifact::new(Path::new("entry").join("mod.rs"), entries),
            GeneratedArtifact::new(Path::new("mapper").join("mod.rs"), mappers),
        ])
    }

    /// Generate every file for `schemas`, ordered by path
    pub fn generate_all(
        &self,
        schemas: &[ContentTypeSchema],
        namespace: &str,
    ) -> Result<Vec<GeneratedArtifact>> {
        let mut artifacts = self.generate_module_index(schemas, namespace)?;
        artifacts.push(self.generate_loader(schemas, namespace)?);
        for schema in sorted_unique(schemas)? {
            artifacts.push(self.generate_entry_class(schema, namespace)?);
            artifacts.push(self.generate_mapper_class(schema, namespace)?);
        }
        artifacts.sort_by(|a, b| a.path.cmp(&b.path));

        if let Some(pair) = artifacts.windows(2).find(|pair| pair[0].path == pair[1].path) {
            return Err(Error::config(format!(
                "Two generated files share the path {}",
                pair[0].path.display()
            )));
        }
        Ok(artifacts)
    }
}

/// Sort schemas by ID, rejecting IDs that map to the same type or module
fn sorted_unique(schemas: &[ContentTypeSchema]) -> Result<Vec<&ContentTypeSchema>> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for schema in schemas {
        let naming = Naming::new(&schema.id);
        if naming.class_name.is_empty() {
            return Err(Error::config(format!(
                "Content type ID \"{}\" does not yield a type name",
                schema.id
            )));
        }
        for key in [naming.class_name, naming.module] {
            if let Some(other) = seen.insert(key.clone(), &schema.id) {
                if other != schema.id {
                    return Err(Error::config(format!(
                        "Content types \"{other}\" and \"{}\" both generate \"{key}\"",
                        schema.id
                    )));
                }
            }
        }
    }

    let mut sorted: Vec<_> = schemas.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted.dedup_by(|a, b| a.id == b.id);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType, ItemsType, LinkType};

    fn post() -> ContentTypeSchema {
        ContentTypeSchema::new("post", "Post")
            .with_field(FieldSchema::new("title", "Title", FieldType::Symbol))
            .with_field(FieldSchema::new(
                "author",
                "Author",
                FieldType::Link(LinkType::Entry),
            ))
    }

    #[test]
    fn test_validate_namespace() {
        for ok in ["crate", "crate::content", "my_app::cms::generated", "content"] {
            assert!(validate_namespace(ok).is_ok(), "{ok}");
        }
        for bad in ["", "crate::", "App\\Content", "crate::9lives", "crate content", "::crate"] {
            assert!(
                matches!(validate_namespace(bad), Err(Error::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_invalid_namespace_fails_every_generator() -> Result<()> {
        let generator = Generator::new()?;
        let schemas = [post()];
        assert!(generator.generate_entry_class(&schemas[0], "App\\Content").is_err());
        assert!(generator.generate_mapper_class(&schemas[0], "App\\Content").is_err());
        assert!(generator.generate_loader(&schemas, "App\\Content").is_err());
        assert!(generator.generate_module_index(&schemas, "App\\Content").is_err());
        Ok(())
    }

    #[test]
    fn test_entry_is_deterministic() -> Result<()> {
        let generator = Generator::new()?;
        let first = generator.generate_entry_class(&post(), "crate::content")?;
        let second = generator.generate_entry_class(&post(), "crate::content")?;
        assert_eq!(first, second);
        assert!(first.content.ends_with("}\n"));
        assert!(!first.content.ends_with("\n\n"));
        assert!(!first.content.contains("\n\n\n"));
        Ok(())
    }

    #[test]
    fn test_field_order_is_preserved() -> Result<()> {
        let generator = Generator::new()?;
        let reversed = ContentTypeSchema::new("post", "Post")
            .with_field(FieldSchema::new(
                "author",
                "Author",
                FieldType::Link(LinkType::Entry),
            ))
            .with_field(FieldSchema::new("title", "Title", FieldType::Symbol));

        let original = generator.generate_entry_class(&post(), "crate::content")?.content;
        let permuted = generator.generate_entry_class(&reversed, "crate::content")?.content;
        assert_ne!(original, permuted);
        assert!(original.find("get_title").unwrap() < original.find("get_author").unwrap());
        assert!(permuted.find("get_author").unwrap() < permuted.find("get_title").unwrap());
        Ok(())
    }

    #[test]
    fn test_link_helpers_only_for_link_fields() -> Result<()> {
        let generator = Generator::new()?;
        let schema = ContentTypeSchema::new("gallery", "Gallery")
            .with_field(FieldSchema::new("name", "Name", FieldType::Symbol))
            .with_field(FieldSchema::new(
                "images",
                "Images",
                FieldType::Array(ItemsType::Link(LinkType::Asset)),
            ));
        let entry = generator.generate_entry_class(&schema, "crate::content")?.content;
        assert!(entry.contains("pub fn resolve_images_links("));
        assert!(!entry.contains("resolve_name"));
        assert!(entry.contains("use contentful_core::field::Link;"));

        let plain = ContentTypeSchema::new("note", "Note")
            .with_field(FieldSchema::new("body", "Body", FieldType::Text));
        let entry = generator.generate_entry_class(&plain, "crate::content")?.content;
        assert!(!entry.contains("LinkResolver"));
        Ok(())
    }

    #[test]
    fn test_loader_branches() -> Result<()> {
        let generator = Generator::new()?;
        let schemas = [
            ContentTypeSchema::new("page", "Page"),
            ContentTypeSchema::new("blog-post", "Blog Post"),
        ];
        let loader = generator.generate_loader(&schemas, "crate::cms")?;
        assert_eq!(loader.path, Path::new("loader.rs"));
        assert!(loader
            .content
            .contains("\"blog-post\" => Some(\"crate::cms::mapper::BlogPostMapper\"),"));
        assert!(loader.content.contains("\"page\" => Arc::new(PageMapper),"));
        assert!(loader
            .content
            .contains("use crate::cms::mapper::{BlogPostMapper, PageMapper};"));
        // sorted by content type ID
        assert!(loader.content.find("\"blog-post\"").unwrap() < loader.content.find("\"page\"").unwrap());

        let empty = generator.generate_loader(&[], "crate::cms")?;
        assert!(empty.content.contains("content_type_id(payload).and(None)"));
        Ok(())
    }

    #[test]
    fn test_colliding_ids_are_rejected() -> Result<()> {
        let generator = Generator::new()?;
        let schemas = [
            ContentTypeSchema::new("blog-post", "Blog Post"),
            ContentTypeSchema::new("blogPost", "Blog Post"),
        ];
        assert!(matches!(
            generator.generate_all(&schemas, "crate::content"),
            Err(Error::Config(msg)) if msg.contains("BlogPost")
        ));
        Ok(())
    }

    #[test]
    fn test_awkward_ids_yield_valid_names() -> Result<()> {
        let generator = Generator::new()?;
        let schemas = [
            ContentTypeSchema::new("2fa-settings", "2FA settings"),
            ContentTypeSchema::new("self", "Self"),
            ContentTypeSchema::new("mod", "Mod"),
        ];
        let artifacts = generator.generate_all(&schemas, "crate::content")?;
        let file = |path: &str| {
            artifacts
                .iter()
                .find(|artifact| artifact.path == Path::new(path))
                .map(|artifact| artifact.content.as_str())
                .unwrap_or_else(|| panic!("missing {path}"))
        };

        assert!(file("entry/_2fa_settings.rs").contains("pub struct _2faSettings {"));
        assert!(file("entry/self_.rs").contains("pub struct Self_ {"));
        assert!(file("entry/mod_.rs").contains("pub struct Mod {"));
        assert!(file("mapper/mod_.rs").contains("pub struct ModMapper;"));

        let index = file("entry/mod.rs");
        assert!(index.contains("mod _2fa_settings;\nmod mod_;\nmod self_;\n"));
        assert!(index.contains("pub use mod_::Mod;"));
        assert!(!index.contains("pub struct"));

        let mut paths: Vec<_> = artifacts.iter().map(|artifact| &artifact.path).collect();
        paths.dedup();
        assert_eq!(paths.len(), artifacts.len());
        Ok(())
    }

    #[test]
    fn test_generate_all_paths() -> Result<()> {
        let generator = Generator::new()?;
        let artifacts = generator.generate_all(&[post()], "crate::content")?;
        let paths: Vec<_> = artifacts
            .iter()
            .map(|a| a.path.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            paths,
            vec![
                "entry/mod.rs",
                "entry/post.rs",
                "loader.rs",
                "mapper/mod.rs",
                "mapper/post.rs",
                "mod.rs",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_write_to_creates_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let generator = Generator::new()?;
        let artifact = generator.generate_mapper_class(&post(), "crate::content")?;

        let written = artifact.write_to(dir.path()).await?;
        assert_eq!(written, dir.path().join("mapper").join("post.rs"));
        assert_eq!(std::fs::read_to_string(written)?, artifact.content);
        Ok(())
    }
}
