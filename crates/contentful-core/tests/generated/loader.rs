//! `crate::generated::loader`: picks the generated mapper for an entry payload.
//!
//! Generated code; regenerate it instead of editing.

use crate::generated::mapper::BlogPostMapper;
use contentful_core::field::Json;
use contentful_core::{Mapper, ResourceBuilder};
use std::sync::Arc;

/// Fully-qualified name of the mapper for the payload's content type
pub fn mapper_name(payload: &Json) -> Option<&'static str> {
    match content_type_id(payload)? {
        "blogPost" => Some("crate::generated::mapper::BlogPostMapper"),
        _ => None,
    }
}

/// Mapper for the payload's content type
pub fn mapper_for(payload: &Json) -> Option<Arc<dyn Mapper>> {
    let mapper: Arc<dyn Mapper> = match content_type_id(payload)? {
        "blogPost" => Arc::new(BlogPostMapper),
        _ => return None,
    };
    Some(mapper)
}

/// Route entries of the generated content types through their mappers
pub fn register(builder: &mut ResourceBuilder) {
    builder.set_entry_matcher(mapper_for);
}

fn content_type_id(payload: &Json) -> Option<&str> {
    payload.pointer("/sys/contentType/sys/id")?.as_str()
}
