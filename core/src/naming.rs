//! Identifier case conversions shared by the descriptor builder and the templates.
use convert_case::{Case, Casing};

/// `blog_post`, `blog-post`, `BlogPost` and `blog post` all become `blogPost`.
pub fn camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Always `upper_first(camel_case(s))`, never an independent conversion.
pub fn pascal_case(s: &str) -> String {
    upper_first(&camel_case(s))
}

pub fn snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}
