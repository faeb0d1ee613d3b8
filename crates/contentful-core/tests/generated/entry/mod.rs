//! Entry types, one per content type.
//!
//! Generated code; regenerate it instead of editing.

mod blog_post;

pub use blog_post::BlogPost;
