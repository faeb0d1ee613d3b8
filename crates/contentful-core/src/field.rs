//! Runtime helpers called by generated mappers.
//!
//! A raw entry payload stores each field as a map of locale code to value:
//!
//! ```json
//! {"fields": {"title": {"en-US": "Hello", "de-DE": "Hallo"}}}
//! ```
//!
//! [`locales`] walks one field's locale map and the converters turn each raw
//! value into the type the generated accessor exposes.
//!
//! # Examples
//!
//! ```
//! use contentful_core::field;
//! use serde_json::json;
//!
//! let payload = json!({"fields": {"views": {"en-US": 42}}});
//! let (locale, raw) = field::locales(&payload, "views").next().unwrap();
//! assert_eq!(locale, "en-US");
//! assert_eq!(field::integer("views", raw).unwrap(), 42);
//! ```

// Internal imports (std, crate)
use crate::{
    error::{Error, Result},
    registry::Typed,
    resource::{CustomEntry, Resource},
};

// External imports (alphabetized)
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub use crate::resource::{Link, Location};

/// Value of a Date field
pub type Date = DateTime<Utc>;

/// Value of an Object field
pub type Json = serde_json::Value;

/// Formats accepted for dates without an explicit offset, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Iterate the `(locale, raw value)` pairs of field `id` in an entry payload.
///
/// Yields nothing when the field is absent.
pub fn locales<'a>(payload: &'a Json, id: &str) -> impl Iterator<Item = (&'a str, &'a Json)> {
    payload
        .get("fields")
        .and_then(|fields| fields.get(id))
        .and_then(Json::as_object)
        .into_iter()
        .flat_map(|values| values.iter().map(|(locale, value)| (locale.as_str(), value)))
}

pub fn string(field: &str, value: &Json) -> Result<String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| Error::conversion(field, "a string"))
}

pub fn integer(field: &str, value: &Json) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| Error::conversion(field, "an integer"))
}

pub fn number(field: &str, value: &Json) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::conversion(field, "a number"))
}

pub fn boolean(field: &str, value: &Json) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::conversion(field, "a boolean"))
}

/// Parse an ISO 8601 date.
///
/// Values without an offset (`2017-08-22T10:00`, `2017-08-22`) are read as UTC.
pub fn date(field: &str, value: &Json) -> Result<Date> {
    let raw = value
        .as_str()
        .ok_or_else(|| Error::conversion(field, "an ISO 8601 date"))?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| Error::conversion(field, "an ISO 8601 date"))
}

pub fn location(field: &str, value: &Json) -> Result<Location> {
    serde_json::from_value(value.clone()).map_err(|_| Error::conversion(field, "a location"))
}

/// Object fields keep their raw JSON
pub fn object(field: &str, value: &Json) -> Result<Json> {
    match value {
        Json::Object(_) | Json::Array(_) => Ok(value.clone()),
        _ => Err(Error::conversion(field, "a JSON object")),
    }
}

pub fn link(field: &str, value: &Json) -> Result<Link> {
    Link::from_json(value).ok_or_else(|| Error::conversion(field, "a link"))
}

pub fn symbols(field: &str, value: &Json) -> Result<Vec<String>> {
    value
        .as_array()
        .ok_or_else(|| Error::conversion(field, "an array of strings"))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| Error::conversion(field, "an array of strings"))
        })
        .collect()
}

/// The entry an update is merged into: a copy of `existing`, or an empty
/// entry when there is none.
///
/// Fails when `existing` is a resource of another type.
pub fn existing_entry<T: CustomEntry + Clone + Default>(existing: Option<&Resource>) -> Result<T> {
    let Some(resource) = existing else {
        return Ok(T::default());
    };
    match resource.downcast_custom::<T>() {
        Some(entry) => Ok(entry.clone()),
        None => Err(Error::payload(format!(
            "can not update a {} with a {} payload",
            resource.type_name(),
            T::default().type_name()
        ))),
    }
}

pub fn links(field: &str, value: &Json) -> Result<Vec<Link>> {
    value
        .as_array()
        .ok_or_else(|| Error::conversion(field, "an array of links"))?
        .iter()
        .map(|item| Link::from_json(item).ok_or_else(|| Error::conversion(field, "an array of links")))
        .collect()
}
