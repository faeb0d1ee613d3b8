//! Template contexts for each generated artifact.
//!
//! Everything the templates print is computed here, so the templates only
//! loop and substitute.

// Internal imports (std, crate)
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use crate::{
    schema::{ContentTypeSchema, FieldSchema, Validation},
    utils::{to_field_ident, to_module_ident, to_snake_case, to_type_ident},
};

use super::types::{describe, type_mapping, LinkArity};

// External imports (alphabetized)
use serde::Serialize;

/// `use` declarations, one per module, in the order rustfmt puts them.
#[derive(Debug, Default)]
pub struct Imports(BTreeMap<String, BTreeSet<String>>);

impl Imports {
    pub fn add(&mut self, module: impl Into<String>, item: impl Into<String>) -> &mut Self {
        self.0.entry(module.into()).or_default().insert(item.into());
        self
    }

    pub fn render(&self) -> Vec<String> {
        let mut uses: Vec<(Vec<Segment>, String)> = self
            .0
            .iter()
            .map(|(module, items)| {
                let mut items: Vec<&str> = items.iter().map(String::as_str).collect();
                items.sort_by(|a, b| compare_names(a, b));

                let mut path: Vec<Segment> = module.split("::").map(Segment::Name).collect();
                let line = match items.as_slice() {
                    [single] => {
                        path.push(Segment::Name(*single));
                        format!("use {module}::{single};")
                    }
                    _ => {
                        path.push(Segment::List);
                        format!("use {module}::{{{}}};", items.join(", "))
                    }
                };
                (path, line)
            })
            .collect();

        uses.sort_by(|(a, _), (b, _)| compare_paths(a, b));
        uses.into_iter().map(|(_, line)| line).collect()
    }
}

/// One segment of a `use` path; `List` is a braced group of items.
#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Name(&'a str),
    List,
}

fn compare_paths(a: &[Segment], b: &[Segment]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|pair| match pair {
            (Segment::Name(x), Segment::Name(y)) => compare_names(x, y),
            (Segment::Name(_), Segment::List) => Ordering::Less,
            (Segment::List, Segment::Name(_)) => Ordering::Greater,
            (Segment::List, Segment::List) => Ordering::Equal,
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// rustfmt's name order: `self`, `super` and `crate` first, then snake_case
/// before CamelCase before SCREAMING_SNAKE_CASE, then bytewise.
fn compare_names(a: &str, b: &str) -> Ordering {
    fn rank(name: &str) -> u8 {
        match name {
            "self" => 0,
            "super" => 1,
            "crate" => 2,
            _ => 3,
        }
    }
    fn is_screaming(name: &str) -> bool {
        name.chars().all(|c| c.is_uppercase() || c == '_' || c.is_numeric())
    }
    let upper = |name: &str| name.starts_with(char::is_uppercase);
    let lower = |name: &str| name.starts_with(char::is_lowercase);

    rank(a).cmp(&rank(b)).then_with(|| {
        if upper(a) && lower(b) {
            Ordering::Greater
        } else if lower(a) && upper(b) {
            Ordering::Less
        } else {
            is_screaming(a)
                .cmp(&is_screaming(b))
                .then_with(|| a.cmp(b))
        }
    })
}

/// `text` fit for a single comment line
fn comment_line(text: &str) -> String {
    text.replace(char::is_control, " ").trim_end().to_string()
}

/// Names derived from a content type ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Entry type name, e.g. `BlogPost`
    pub class_name: String,
    /// Mapper type name, e.g. `BlogPostMapper`
    pub mapper_name: String,
    /// Module file stem, e.g. `blog_post`
    pub module: String,
}

impl Naming {
    pub fn new(content_type_id: &str) -> Self {
        let class_name = to_type_ident(content_type_id);
        Self {
            mapper_name: format!("{class_name}Mapper"),
            module: to_module_ident(content_type_id),
            class_name,
        }
    }
}

/// Per-field values shared by the entry and mapper templates.
#[derive(Debug, Clone, Serialize)]
pub struct FieldContext {
    /// Wire ID as a Rust string literal
    pub id_literal: String,
    pub id: String,
    pub name: String,
    /// Struct field name
    pub ident: String,
    /// Accessor suffix, as in `get_{method}`
    pub method: String,
    pub rust_type: &'static str,
    pub converter: &'static str,
    /// Type description plus flags, e.g. `Symbol, required`
    pub summary: String,
    pub validations: String,
    pub item_validations: String,
    /// `none`, `one` or `many`
    pub link: &'static str,
}

impl FieldContext {
    fn new(field: &FieldSchema) -> Self {
        let mapping = type_mapping(&field.field_type);

        let mut summary = describe(&field.field_type);
        for (flag, label) in [
            (field.required, "required"),
            (field.localized, "localized"),
            (field.disabled, "disabled"),
            (field.omitted, "omitted"),
        ] {
            if flag {
                summary.push_str(", ");
                summary.push_str(label);
            }
        }

        let mut ident = to_field_ident(&field.id);
        if ident == "sys" {
            ident.push('_');
        }

        Self {
            id_literal: format!("{:?}", field.id),
            id: field.id.clone(),
            name: comment_line(&field.name),
            ident,
            method: to_snake_case(&field.id),
            rust_type: mapping.rust_type,
            converter: mapping.converter,
            summary,
            validations: summarize(field.validations()),
            item_validations: summarize(field.item_validations()),
            link: match mapping.link {
                LinkArity::None => "none",
                LinkArity::One => "one",
                LinkArity::Many => "many",
            },
        }
    }
}

fn summarize(validations: &[Validation]) -> String {
    validations
        .iter()
        .map(|validation| validation.rule.summary())
        .collect::<Vec<_>>()
        .join("; ")
}

fn module_path(namespace: &str, kind: &str) -> String {
    format!("{namespace}::{kind}")
}

#[derive(Debug, Serialize)]
pub struct EntryContext {
    pub entry_path: String,
    pub name: String,
    pub content_type_id: String,
    pub content_type_literal: String,
    pub class_name: String,
    pub doc_lines: Vec<String>,
    pub imports: Vec<String>,
    pub fields: Vec<FieldContext>,
}

impl EntryContext {
    pub fn new(schema: &ContentTypeSchema, namespace: &str) -> Self {
        let naming = Naming::new(&schema.id);
        let fields: Vec<_> = schema.fields.iter().map(FieldContext::new).collect();

        let mut imports = Imports::default();
        imports
            .add("contentful_core", "CustomEntry")
            .add("contentful_core", "SystemProperties")
            .add("contentful_core", "Typed")
            .add("std::any", "Any")
            .add("std::collections", "BTreeMap");
        for field in &schema.fields {
            if let Some(alias) = type_mapping(&field.field_type).import {
                imports.add("contentful_core::field", alias);
            }
        }
        if fields.iter().any(|field| field.link != "none") {
            imports
                .add("contentful_core", "LinkResolver")
                .add("contentful_core", "Resource")
                .add("contentful_core", "Result");
        }

        let mut doc_lines = Vec::new();
        if let Some(description) = schema.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                doc_lines.push(String::new());
                doc_lines.extend(description.lines().map(comment_line));
            }
        }

        Self {
            entry_path: format!("{}::{}", module_path(namespace, "entry"), naming.class_name),
            name: comment_line(&schema.name),
            content_type_id: schema.id.clone(),
            content_type_literal: format!("{:?}", schema.id),
            class_name: naming.class_name,
            doc_lines,
            imports: imports.render(),
            fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MapperContext {
    pub mapper_path: String,
    pub name: String,
    pub content_type_id: String,
    pub class_name: String,
    pub mapper_name: String,
    pub imports: Vec<String>,
    pub fields: Vec<FieldContext>,
}

impl MapperContext {
    pub fn new(schema: &ContentTypeSchema, namespace: &str) -> Self {
        let naming = Naming::new(&schema.id);

        let mut imports = Imports::default();
        imports
            .add("contentful_core", "field")
            .add("contentful_core", "Mapper")
            .add("contentful_core", "Resource")
            .add("contentful_core", "ResourceBuilder")
            .add("contentful_core", "Result")
            .add("contentful_core", "SystemProperties")
            .add(module_path(namespace, "entry"), naming.class_name.clone())
            .add("std::sync", "Arc");

        Self {
            mapper_path: format!("{}::{}", module_path(namespace, "mapper"), naming.mapper_name),
            name: comment_line(&schema.name),
            content_type_id: schema.id.clone(),
            class_name: naming.class_name,
            mapper_name: naming.mapper_name,
            imports: imports.render(),
            fields: schema.fields.iter().map(FieldContext::new).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoaderEntry {
    pub content_type_literal: String,
    pub mapper_name: String,
    pub mapper_path_literal: String,
}

#[derive(Debug, Serialize)]
pub struct LoaderContext {
    pub loader_path: String,
    pub imports: Vec<String>,
    pub entries: Vec<LoaderEntry>,
}

impl LoaderContext {
    /// `schemas` are expected sorted by content type ID
    pub fn new(schemas: &[&ContentTypeSchema], namespace: &str) -> Self {
        let mapper_module = module_path(namespace, "mapper");

        let mut imports = Imports::default();
        imports
            .add("contentful_core", "Mapper")
            .add("contentful_core", "ResourceBuilder")
            .add("contentful_core::field", "Json")
            .add("std::sync", "Arc");

        let entries = schemas
            .iter()
            .map(|schema| {
                let naming = Naming::new(&schema.id);
                imports.add(mapper_module.as_str(), naming.mapper_name.as_str());
                LoaderEntry {
                    content_type_literal: format!("{:?}", schema.id),
                    mapper_path_literal: format!("{:?}", format!("{mapper_module}::{}", naming.mapper_name)),
                    mapper_name: naming.mapper_name,
                }
            })
            .collect();

        Self {
            loader_path: module_path(namespace, "loader"),
            imports: imports.render(),
            entries,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    pub module: String,
    pub item: String,
}

/// Context for `entry/mod.rs` and `mapper/mod.rs`
#[derive(Debug, Serialize)]
pub struct ModuleListContext {
    pub summary: &'static str,
    pub modules: Vec<ModuleEntry>,
}

/// Context for the root `mod.rs`
#[derive(Debug, Serialize)]
pub struct ModuleRootContext {
    pub namespace: String,
}
