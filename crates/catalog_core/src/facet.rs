//! Paginated option lists backing each filter dropdown.

use shared::{
    domain::{FacetName, OptionId},
    protocol::FacetOption,
};

use crate::{
    request::{Applied, Generation, PendingLoad, RequestToken},
    CatalogError, OptionPage, MIN_SEARCH_LEN,
};

/// Facet list endpoints of the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetEndpoint {
    Genre,
    Country,
    Person,
}

impl FacetEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            FacetEndpoint::Genre => "genre",
            FacetEndpoint::Country => "country",
            FacetEndpoint::Person => "person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    /// First page loads at mount.
    Eager { endpoint: FacetEndpoint },
    /// Loads only once a qualifying search term is typed.
    LazySearch { endpoint: FacetEndpoint },
    /// Fixed local options, never fetched.
    LocalEnum,
}

impl FacetKind {
    pub fn for_facet(name: FacetName) -> Self {
        match name {
            FacetName::Genre => FacetKind::Eager {
                endpoint: FacetEndpoint::Genre,
            },
            FacetName::Country => FacetKind::Eager {
                endpoint: FacetEndpoint::Country,
            },
            FacetName::Actor | FacetName::Director => FacetKind::LazySearch {
                endpoint: FacetEndpoint::Person,
            },
            FacetName::Year => FacetKind::LocalEnum,
        }
    }

    fn endpoint(self) -> Option<FacetEndpoint> {
        match self {
            FacetKind::Eager { endpoint } | FacetKind::LazySearch { endpoint } => Some(endpoint),
            FacetKind::LocalEnum => None,
        }
    }
}

/// A fetch a facet wants issued. The coordinator runs it and hands the
/// outcome back through [`FacetSource::apply`] together with `token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRequest {
    pub facet: FacetName,
    pub endpoint: FacetEndpoint,
    pub token: RequestToken,
    pub search: String,
    pub page: u32,
}

#[derive(Debug)]
pub struct FacetSource {
    name: FacetName,
    kind: FacetKind,
    page: u32,
    has_more: bool,
    search_term: String,
    /// Term the loaded options belong to; `None` until a first page lands.
    loaded_term: Option<String>,
    requested_term: String,
    options: Vec<FacetOption>,
    generation: Generation,
    pending: Option<PendingLoad>,
    error: Option<String>,
}

impl FacetSource {
    pub fn new(name: FacetName) -> Self {
        Self::with_kind(name, FacetKind::for_facet(name))
    }

    pub fn with_kind(name: FacetName, kind: FacetKind) -> Self {
        Self {
            name,
            kind,
            page: 1,
            has_more: false,
            search_term: String::new(),
            loaded_term: None,
            requested_term: String::new(),
            options: Vec::new(),
            generation: Generation::default(),
            pending: None,
            error: None,
        }
    }

    /// A single-page facet over a fixed list of options.
    pub fn local(name: FacetName, options: Vec<FacetOption>) -> Self {
        let mut source = Self::with_kind(name, FacetKind::LocalEnum);
        source.options = options;
        source
    }

    pub fn kind(&self) -> FacetKind {
        self.kind
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Requests issued when the facet is first shown; only eager facets load.
    pub fn mount(&mut self) -> Option<OptionRequest> {
        match self.kind {
            FacetKind::Eager { .. } => self.load_first_page(),
            FacetKind::LazySearch { .. } | FacetKind::LocalEnum => None,
        }
    }

    /// Supersedes whatever is pending and asks for page 1 of the current term.
    pub fn load_first_page(&mut self) -> Option<OptionRequest> {
        let endpoint = self.kind.endpoint()?;
        let search = self.search_term.clone();
        Some(self.issue(endpoint, 1, search))
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> Option<OptionRequest> {
        self.search_term = term.into();
        if self.kind.endpoint().is_none() {
            return None;
        }
        if self.search_term.chars().count() < MIN_SEARCH_LEN {
            tracing::debug!(
                facet = %self.name,
                term = %self.search_term,
                "search term below threshold; keeping current options"
            );
            return None;
        }
        self.load_first_page()
    }

    /// Next page of the list currently shown, fetched with the term that
    /// list was loaded for. The typed term may have moved on since.
    pub fn load_more(&mut self) -> Option<OptionRequest> {
        let endpoint = self.kind.endpoint()?;
        if !self.has_more || self.pending.is_some() {
            return None;
        }
        let search = self.loaded_term.clone()?;
        Some(self.issue(endpoint, self.page + 1, search))
    }

    /// Empties the search term. A request issued for a search term is
    /// abandoned; unfiltered loads keep going. Loaded options stay, but an
    /// eager facet whose list is missing or search-filtered asks for its
    /// unfiltered first page again.
    pub fn clear_search(&mut self) -> Option<OptionRequest> {
        self.search_term.clear();
        if !self.requested_term.is_empty() {
            if let Some(pending) = self.pending.take() {
                tracing::debug!(
                    facet = %self.name,
                    token = pending.token.value(),
                    term = %self.requested_term,
                    "abandoning in-flight option search"
                );
            }
        }
        match self.kind {
            FacetKind::Eager { .. }
                if self.pending.is_none() && self.loaded_term.as_deref() != Some("") =>
            {
                self.load_first_page()
            }
            _ => None,
        }
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        outcome: Result<OptionPage, CatalogError>,
    ) -> Applied {
        let pending = match self.pending {
            Some(pending) if pending.token == token => pending,
            _ => {
                tracing::debug!(
                    facet = %self.name,
                    token = token.value(),
                    "dropping stale option response"
                );
                return Applied::Stale;
            }
        };
        self.pending = None;

        let page = match outcome {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(facet = %self.name, page = pending.page, "option load failed: {err}");
                self.error = Some(format!("could not load {} options: {err}", self.name));
                return Applied::Failed;
            }
        };

        self.error = None;
        self.has_more = page.has_more;
        self.page = pending.page;
        if pending.page == 1 {
            self.options = page.options;
            self.loaded_term = Some(self.requested_term.clone());
            Applied::Replaced
        } else {
            self.options.extend(page.options);
            Applied::Appended
        }
    }

    fn issue(&mut self, endpoint: FacetEndpoint, page: u32, search: String) -> OptionRequest {
        let token = self.generation.advance();
        self.pending = Some(PendingLoad { token, page });
        self.requested_term.clone_from(&search);
        OptionRequest {
            facet: self.name,
            endpoint,
            token,
            search,
            page,
        }
    }
}

/// Release years from `last` down to `first`, newest first.
pub fn year_options(first: i32, last: i32) -> Vec<FacetOption> {
    (first..=last)
        .rev()
        .map(|year| FacetOption::new(OptionId(i64::from(year)), year.to_string()))
        .collect()
}

#[cfg(test)]
#[path = "tests/facet_tests.rs"]
mod tests;
