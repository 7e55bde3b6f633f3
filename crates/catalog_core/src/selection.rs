use std::collections::BTreeMap;

use shared::domain::{FacetName, FilterKey, OptionId};

/// Current user choices: one optional id per facet plus the title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRegistry {
    selected: BTreeMap<FacetName, OptionId>,
    title_search: String,
}

impl SelectionRegistry {
    /// Returns whether the stored value changed.
    pub fn select(&mut self, facet: FacetName, option: Option<OptionId>) -> bool {
        match option {
            Some(id) => self.selected.insert(facet, id) != Some(id),
            None => self.selected.remove(&facet).is_some(),
        }
    }

    /// Returns whether the stored value changed.
    pub fn set_title_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.title_search {
            return false;
        }
        self.title_search = text;
        true
    }

    pub fn selected(&self, facet: FacetName) -> Option<OptionId> {
        self.selected.get(&facet).copied()
    }

    pub fn title_search(&self) -> &str {
        &self.title_search
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.title_search.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.title_search.is_empty()
    }
}

/// Normalized filters for the movie listing. Holds only non-empty keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieQuery {
    filters: BTreeMap<FilterKey, String>,
}

impl MovieQuery {
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.filters.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.filters.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Query-string pairs for fetching `page` of this query.
    pub fn to_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params: Vec<_> = self
            .filters
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect();
        params.push(("page", page.to_string()));
        params
    }
}

impl std::fmt::Display for MovieQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.filters.is_empty() {
            return f.write_str("{}");
        }
        let rendered: Vec<String> = self
            .filters
            .iter()
            .map(|(key, value)| format!("{}={value}", key.as_str()))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

pub fn compose_query(registry: &SelectionRegistry) -> MovieQuery {
    let mut filters = BTreeMap::new();
    if !registry.title_search.is_empty() {
        filters.insert(FilterKey::Search, registry.title_search.clone());
    }
    for (facet, id) in &registry.selected {
        filters.insert(facet.filter_key(), id.to_string());
    }
    MovieQuery { filters }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
