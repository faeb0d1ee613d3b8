//! `crate::generated`: typed entries for the content types of a Contentful space.
//!
//! Generated code; regenerate it instead of editing. Pass a `ResourceBuilder`
//! to [`loader::register`] to build these types from entry payloads.

pub mod entry;
pub mod loader;
pub mod mapper;
