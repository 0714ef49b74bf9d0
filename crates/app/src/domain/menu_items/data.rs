//! Menu Item Data

use std::str::FromStr;

use thiserror::Error;

use crate::{
    domain::{categories::records::CategoryUuid, menu_items::records::MenuItemUuid},
    pagination::PageRequest,
};

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub title: String,
    pub price: u64,
    pub featured: bool,
    pub category_uuid: CategoryUuid,
}

/// Menu Item Update Data
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemUpdate {
    pub title: Option<String>,
    pub price: Option<u64>,
    pub featured: Option<bool>,
    pub category_uuid: Option<CategoryUuid>,
}

/// Sort orders accepted by the menu listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemOrdering {
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

impl MenuItemOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
            Self::TitleAsc => "title",
            Self::TitleDesc => "-title",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported ordering `{0}`")]
pub struct UnknownOrdering(pub String);

impl FromStr for MenuItemOrdering {
    type Err = UnknownOrdering;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "price" => Ok(Self::PriceAsc),
            "-price" => Ok(Self::PriceDesc),
            "title" => Ok(Self::TitleAsc),
            "-title" => Ok(Self::TitleDesc),
            other => Err(UnknownOrdering(other.to_string())),
        }
    }
}

/// Menu listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub ordering: Option<MenuItemOrdering>,
    pub page: PageRequest,
}

impl MenuItemFilter {
    /// `ILIKE` pattern matching the search term anywhere in the title.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_parses_known_values() {
        assert_eq!("price".parse(), Ok(MenuItemOrdering::PriceAsc));
        assert_eq!("-title".parse(), Ok(MenuItemOrdering::TitleDesc));
    }

    #[test]
    fn ordering_rejects_unknown_values() {
        assert_eq!(
            "featured".parse::<MenuItemOrdering>(),
            Err(UnknownOrdering("featured".to_string()))
        );
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let filter = MenuItemFilter {
            search: Some("50%_off".to_string()),
            ..MenuItemFilter::default()
        };

        assert_eq!(filter.search_pattern().as_deref(), Some("%50\\%\\_off%"));
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = MenuItemFilter {
            search: Some("   ".to_string()),
            ..MenuItemFilter::default()
        };

        assert_eq!(filter.search_pattern(), None);
    }
}
