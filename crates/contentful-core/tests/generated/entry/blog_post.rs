//! `crate::generated::entry::BlogPost`: entries of the "Blog Post" content type.
//!
//! Generated code; regenerate it instead of editing.

use contentful_core::field::{Date, Json, Link, Location};
use contentful_core::{CustomEntry, LinkResolver, Resource, Result, SystemProperties, Typed};
use std::any::Any;
use std::collections::BTreeMap;

/// Entry of content type `blogPost`.
///
/// A post on the company blog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPost {
    sys: SystemProperties,
    title: BTreeMap<String, String>,
    body: BTreeMap<String, String>,
    views: BTreeMap<String, i64>,
    rating: BTreeMap<String, f64>,
    featured: BTreeMap<String, bool>,
    published_at: BTreeMap<String, Date>,
    location: BTreeMap<String, Location>,
    metadata: BTreeMap<String, Json>,
    author: BTreeMap<String, Link>,
    hero_image: BTreeMap<String, Link>,
    tags: BTreeMap<String, Vec<String>>,
    related: BTreeMap<String, Vec<Link>>,
}

impl BlogPost {
    /// ID of the content type this type was generated from
    pub const CONTENT_TYPE_ID: &'static str = "blogPost";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sys(&mut self, sys: SystemProperties) -> &mut Self {
        self.sys = sys;
        self
    }

    /// Title (Symbol, required, localized)
    ///
    /// Validations: size <= 255
    pub fn get_title(&self, locale: &str) -> Option<&String> {
        self.title.get(locale)
    }

    pub fn set_title(&mut self, locale: &str, value: String) -> &mut Self {
        self.title.insert(locale.to_string(), value);
        self
    }

    /// Body (Text, localized)
    pub fn get_body(&self, locale: &str) -> Option<&String> {
        self.body.get(locale)
    }

    pub fn set_body(&mut self, locale: &str, value: String) -> &mut Self {
        self.body.insert(locale.to_string(), value);
        self
    }

    /// Views (Integer)
    pub fn get_views(&self, locale: &str) -> Option<&i64> {
        self.views.get(locale)
    }

    pub fn set_views(&mut self, locale: &str, value: i64) -> &mut Self {
        self.views.insert(locale.to_string(), value);
        self
    }

    /// Rating (Number)
    ///
    /// Validations: range 0..=5
    pub fn get_rating(&self, locale: &str) -> Option<&f64> {
        self.rating.get(locale)
    }

    pub fn set_rating(&mut self, locale: &str, value: f64) -> &mut Self {
        self.rating.insert(locale.to_string(), value);
        self
    }

    /// Featured (Boolean)
    pub fn get_featured(&self, locale: &str) -> Option<&bool> {
        self.featured.get(locale)
    }

    pub fn set_featured(&mut self, locale: &str, value: bool) -> &mut Self {
        self.featured.insert(locale.to_string(), value);
        self
    }

    /// Published at (Date, required)
    pub fn get_published_at(&self, locale: &str) -> Option<&Date> {
        self.published_at.get(locale)
    }

    pub fn set_published_at(&mut self, locale: &str, value: Date) -> &mut Self {
        self.published_at.insert(locale.to_string(), value);
        self
    }

    /// Location (Location)
    pub fn get_location(&self, locale: &str) -> Option<&Location> {
        self.location.get(locale)
    }

    pub fn set_location(&mut self, locale: &str, value: Location) -> &mut Self {
        self.location.insert(locale.to_string(), value);
        self
    }

    /// Metadata (Object)
    pub fn get_metadata(&self, locale: &str) -> Option<&Json> {
        self.metadata.get(locale)
    }

    pub fn set_metadata(&mut self, locale: &str, value: Json) -> &mut Self {
        self.metadata.insert(locale.to_string(), value);
        self
    }

    /// Author (Link to Entry)
    ///
    /// Validations: links to author
    pub fn get_author(&self, locale: &str) -> Option<&Link> {
        self.author.get(locale)
    }

    pub fn set_author(&mut self, locale: &str, value: Link) -> &mut Self {
        self.author.insert(locale.to_string(), value);
        self
    }

    /// Fetch the resource `author` links to for `locale`
    pub fn resolve_author_link(
        &self,
        locale: &str,
        resolver: &dyn LinkResolver,
    ) -> Result<Option<Resource>> {
        self.author
            .get(locale)
            .map(|link| resolver.resolve_link(link, &self.sys.link_parameters()))
            .transpose()
    }

    /// Hero image (Link to Asset)
    ///
    /// Validations: mime type image
    pub fn get_hero_image(&self, locale: &str) -> Option<&Link> {
        self.hero_image.get(locale)
    }

    pub fn set_hero_image(&mut self, locale: &str, value: Link) -> &mut Self {
        self.hero_image.insert(locale.to_string(), value);
        self
    }

    /// Fetch the resource `heroImage` links to for `locale`
    pub fn resolve_hero_image_link(
        &self,
        locale: &str,
        resolver: &dyn LinkResolver,
    ) -> Result<Option<Resource>> {
        self.hero_image
            .get(locale)
            .map(|link| resolver.resolve_link(link, &self.sys.link_parameters()))
            .transpose()
    }

    /// Tags (Array of Symbol)
    ///
    /// Validations: size <= 10
    ///
    /// Item validations: one of 3 values
    pub fn get_tags(&self, locale: &str) -> Option<&Vec<String>> {
        self.tags.get(locale)
    }

    pub fn set_tags(&mut self, locale: &str, value: Vec<String>) -> &mut Self {
        self.tags.insert(locale.to_string(), value);
        self
    }

    /// Related posts (Array of Link to Entry)
    pub fn get_related(&self, locale: &str) -> Option<&Vec<Link>> {
        self.related.get(locale)
    }

    pub fn set_related(&mut self, locale: &str, value: Vec<Link>) -> &mut Self {
        self.related.insert(locale.to_string(), value);
        self
    }

    /// Fetch the resources `related` links to for `locale`
    pub fn resolve_related_links(
        &self,
        locale: &str,
        resolver: &dyn LinkResolver,
    ) -> Result<Vec<Resource>> {
        match self.related.get(locale) {
            Some(links) => resolver.resolve_links(links, &self.sys.link_parameters()),
            None => Ok(Vec::new()),
        }
    }
}

impl Typed for BlogPost {
    fn type_name(&self) -> &str {
        "BlogPost"
    }

    fn ancestors(&self) -> Vec<&str> {
        vec!["Entry"]
    }
}

impl CustomEntry for BlogPost {
    fn content_type_id(&self) -> &str {
        Self::CONTENT_TYPE_ID
    }

    fn sys(&self) -> &SystemProperties {
        &self.sys
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
