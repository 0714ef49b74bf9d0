//! Category Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub title: String,

    /// Derived from the title when absent.
    pub slug: Option<String>,
}

impl NewCategory {
    /// The slug to store: the explicit one when present, otherwise one derived from the title.
    #[must_use]
    pub fn resolved_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slugify(slug),
            _ => slugify(&self.title),
        }
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to a single `-`.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());

    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Main  Courses!! "), "main-courses");
        assert_eq!(slugify("Drinks & Desserts"), "drinks-desserts");
    }

    #[test]
    fn slugify_of_symbols_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn resolved_slug_prefers_explicit_slug() {
        let category = NewCategory {
            uuid: CategoryUuid::new(),
            title: "Main Courses".to_string(),
            slug: Some("Mains".to_string()),
        };

        assert_eq!(category.resolved_slug(), "mains");
    }

    #[test]
    fn resolved_slug_falls_back_to_title() {
        let category = NewCategory {
            uuid: CategoryUuid::new(),
            title: "Main Courses".to_string(),
            slug: Some("  ".to_string()),
        };

        assert_eq!(category.resolved_slug(), "main-courses");
    }
}
