//! Identifier transformations for generated code.

/// Words that can't be used as plain Rust identifiers
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "yield",
];

/// Type names generated files declare, import or take from the prelude
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Any", "Arc", "AsMut", "AsRef", "BTreeMap", "Box", "Clone", "Copy", "CustomEntry", "Date",
    "Default", "Drop", "Eq", "Err", "Extend", "Fn", "FnMut", "FnOnce", "From", "FromIterator",
    "Into", "IntoIterator", "Iterator", "Json", "Link", "LinkResolver", "Location", "Mapper",
    "None", "Ok", "Option", "Ord", "PartialEq", "PartialOrd", "Resource", "ResourceBuilder",
    "Result", "Self", "Send", "Sized", "Some", "String", "Sync", "SystemProperties", "ToOwned",
    "ToString", "TryFrom", "TryInto", "Typed", "Unpin", "Vec",
];

/// File stems of the generated module layout
const RESERVED_MODULES: &[&str] = &["entry", "loader", "mapper", "mod"];

/// Convert a content type or field ID to snake_case.
///
/// Word boundaries are `-`, `_`, spaces and lower-to-upper case changes;
/// other punctuation is dropped.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if matches!(ch, '-' | '_' | ' ') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_end_matches('_').to_string()
}

/// Convert an ID to UpperCamelCase, e.g. `blog-post` to `BlogPost`
pub fn to_upper_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Snake-case identifier safe to use as a struct field or method suffix.
///
/// Keywords and names starting with a digit get a `_` appended or prepended.
pub fn to_field_ident(s: &str) -> String {
    let snake = to_snake_case(s);
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{snake}")
    } else if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    }
}

/// UpperCamelCase type name for a content type ID.
///
/// A leading digit gets a `_` prepended; names that would clash with a
/// keyword, an import of the generated files or the prelude get a `_` appended.
pub fn to_type_ident(s: &str) -> String {
    let camel = to_upper_camel_case(s);
    if camel.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{camel}")
    } else if RESERVED_TYPE_NAMES.contains(&camel.as_str()) {
        format!("{camel}_")
    } else {
        camel
    }
}

/// Module name for a content type ID, never one of the generated layout's own stems
pub fn to_module_ident(s: &str) -> String {
    let ident = to_field_ident(s);
    if RESERVED_MODULES.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("blogPost"), "blog_post");
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("blog-post"), "blog_post");
        assert_eq!(to_snake_case("blog_post"), "blog_post");
        assert_eq!(to_snake_case("heroImage"), "hero_image");
        assert_eq!(to_snake_case("image2Url"), "image2_url");
        assert_eq!(to_snake_case("-landing page-"), "landing_page");
    }

    #[test]
    fn test_to_upper_camel_case() {
        assert_eq!(to_upper_camel_case("blog-post"), "BlogPost");
        assert_eq!(to_upper_camel_case("blogPost"), "BlogPost");
        assert_eq!(to_upper_camel_case("blog_post"), "BlogPost");
        assert_eq!(to_upper_camel_case("FAQ"), "Faq");
        assert_eq!(to_upper_camel_case("2fa-settings"), "2faSettings");
    }

    #[test]
    fn test_to_field_ident() {
        assert_eq!(to_field_ident("publishedAt"), "published_at");
        assert_eq!(to_field_ident("type"), "type_");
        assert_eq!(to_field_ident("self"), "self_");
        assert_eq!(to_field_ident("3d-model"), "_3d_model");
    }

    #[test]
    fn test_to_type_ident() {
        assert_eq!(to_type_ident("blogPost"), "BlogPost");
        assert_eq!(to_type_ident("2fa-settings"), "_2faSettings");
        assert_eq!(to_type_ident("self"), "Self_");
        assert_eq!(to_type_ident("mod"), "Mod");
        assert_eq!(to_type_ident("string"), "String_");
        assert_eq!(to_type_ident("resource"), "Resource_");
        assert_eq!(to_type_ident("resources"), "Resources");
    }

    #[test]
    fn test_to_module_ident() {
        assert_eq!(to_module_ident("blogPost"), "blog_post");
        assert_eq!(to_module_ident("2fa-settings"), "_2fa_settings");
        assert_eq!(to_module_ident("self"), "self_");
        assert_eq!(to_module_ident("mod"), "mod_");
        assert_eq!(to_module_ident("loader"), "loader_");
        assert_eq!(to_module_ident("entry"), "entry_");
        assert_eq!(to_module_ident("mapper"), "mapper_");
    }
}
