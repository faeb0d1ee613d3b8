//! `crate::generated::mapper::BlogPostMapper`: builds "Blog Post" entries from payloads.
//!
//! Generated code; regenerate it instead of editing.

use crate::generated::entry::BlogPost;
use contentful_core::{field, Mapper, Resource, ResourceBuilder, Result, SystemProperties};
use std::sync::Arc;

/// Maps payloads of content type `blogPost` to [`BlogPost`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogPostMapper;

impl Mapper for BlogPostMapper {
    fn map(
        &self,
        _builder: &ResourceBuilder,
        existing: Option<Resource>,
        payload: &field::Json,
    ) -> Result<Resource> {
        let mut entry: BlogPost = field::existing_entry(existing.as_ref())?;
        entry.set_sys(SystemProperties::from_payload(payload)?);

        for (locale, value) in field::locales(payload, "title") {
            entry.set_title(locale, field::string("title", value)?);
        }

        for (locale, value) in field::locales(payload, "body") {
            entry.set_body(locale, field::string("body", value)?);
        }

        for (locale, value) in field::locales(payload, "views") {
            entry.set_views(locale, field::integer("views", value)?);
        }

        for (locale, value) in field::locales(payload, "rating") {
            entry.set_rating(locale, field::number("rating", value)?);
        }

        for (locale, value) in field::locales(payload, "featured") {
            entry.set_featured(locale, field::boolean("featured", value)?);
        }

        for (locale, value) in field::locales(payload, "publishedAt") {
            entry.set_published_at(locale, field::date("publishedAt", value)?);
        }

        for (locale, value) in field::locales(payload, "location") {
            entry.set_location(locale, field::location("location", value)?);
        }

        for (locale, value) in field::locales(payload, "metadata") {
            entry.set_metadata(locale, field::object("metadata", value)?);
        }

        for (locale, value) in field::locales(payload, "author") {
            entry.set_author(locale, field::link("author", value)?);
        }

        for (locale, value) in field::locales(payload, "heroImage") {
            entry.set_hero_image(locale, field::link("heroImage", value)?);
        }

        for (locale, value) in field::locales(payload, "tags") {
            entry.set_tags(locale, field::symbols("tags", value)?);
        }

        for (locale, value) in field::locales(payload, "related") {
            entry.set_related(locale, field::links("related", value)?);
        }

        Ok(Resource::Custom(Arc::new(entry)))
    }
}
