//! Local search, category filter, and sort over the loaded page.
//!
//! These never reach the backend: they only reorder and narrow the rows
//! of the page currently held by a [`Listing`](crate::listing::Listing).

use std::cmp::Ordering;

use crate::resource::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Search box, category selector, and sort toggle of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    /// `None` (or `"all"`) shows every category.
    pub category: Option<String>,
    /// `None` keeps backend order.
    pub sort: Option<SortDirection>,
}

impl ListQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sorted(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    /// Whether `record` passes the search and category filters.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_category(record)
    }

    fn matches_search<R: Record>(&self, record: &R) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category<R: Record>(&self, record: &R) -> bool {
        match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(wanted) => record.category() == Some(wanted),
        }
    }

    /// Filter then sort `records`.
    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut rows: Vec<&R> = records.iter().filter(|r| self.matches(*r)).collect();
        if let Some(direction) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_keys(a.sort_key(), b.sort_key());
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }
}

/// Case-insensitive comparison, falling back to the raw strings so the
/// order is total.
fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::news::{NewsItem, CATEGORY_GENERAL, CATEGORY_MEDIA};

    fn news(id: &str, title: &str, description: &str, category: &str) -> NewsItem {
        NewsItem {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            date: None,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<NewsItem> {
        vec![
            news("1", "Spring Fair", "Annual fair", CATEGORY_GENERAL),
            news("2", "autumn Radio", "Weekly show", CATEGORY_MEDIA),
            news("3", "Board Meeting", "Spring agenda", CATEGORY_GENERAL),
        ]
    }

    fn ids<R: Record>(rows: &[&R]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let items = sample();
        assert_eq!(ids(&ListQuery::default().apply(&items)), ["1", "2", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_over_both_fields() {
        let items = sample();
        let rows = ListQuery::default().search("SPRING").apply(&items);
        assert_eq!(ids(&rows), ["1", "3"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let items = sample();
        let rows = ListQuery::default().category(CATEGORY_MEDIA).apply(&items);
        assert_eq!(ids(&rows), ["2"]);
        let rows = ListQuery::default().category("all").apply(&items);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn sort_ignores_case() {
        let items = sample();
        let asc = ListQuery::default().sorted(SortDirection::Asc).apply(&items);
        assert_eq!(ids(&asc), ["2", "3", "1"]);
        let desc = ListQuery::default().sorted(SortDirection::Desc).apply(&items);
        assert_eq!(ids(&desc), ["1", "3", "2"]);
    }

    #[test]
    fn toggle_flips_direction() {
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("up"), None);
    }
}
