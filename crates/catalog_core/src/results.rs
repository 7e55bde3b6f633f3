//! The primary paginated movie list.

use shared::protocol::Movie;

use crate::{
    request::{Applied, Generation, PendingLoad, RequestToken},
    selection::MovieQuery,
    CatalogError, MoviePage,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsStatus {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRequest {
    pub token: RequestToken,
    pub query: MovieQuery,
    pub page: u32,
}

#[derive(Debug)]
pub struct ResultSetController {
    query: MovieQuery,
    page: u32,
    items: Vec<Movie>,
    has_more: bool,
    status: ResultsStatus,
    generation: Generation,
    pending: Option<PendingLoad>,
    failed_page: Option<u32>,
}

impl Default for ResultSetController {
    fn default() -> Self {
        Self {
            query: MovieQuery::default(),
            page: 1,
            items: Vec::new(),
            has_more: false,
            status: ResultsStatus::Idle,
            generation: Generation::default(),
            pending: None,
            failed_page: None,
        }
    }
}

impl ResultSetController {
    pub fn query(&self) -> &MovieQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn status(&self) -> &ResultsStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts over at page 1 for `query`. Anything still in flight becomes stale.
    pub fn query_changed(&mut self, query: MovieQuery) -> MovieRequest {
        self.query = query;
        self.status = ResultsStatus::Loading;
        self.failed_page = None;
        self.issue(1)
    }

    pub fn load_more(&mut self) -> Option<MovieRequest> {
        if self.status != ResultsStatus::Loaded || !self.has_more || self.pending.is_some() {
            return None;
        }
        Some(self.issue(self.page + 1))
    }

    /// Re-issues the request that last failed, with the same query and page.
    pub fn retry(&mut self) -> Option<MovieRequest> {
        if !matches!(self.status, ResultsStatus::Error(_)) || self.pending.is_some() {
            return None;
        }
        let page = self.failed_page.take()?;
        if page == 1 {
            self.status = ResultsStatus::Loading;
        }
        Some(self.issue(page))
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        outcome: Result<MoviePage, CatalogError>,
    ) -> Applied {
        let pending = match self.pending {
            Some(pending) if pending.token == token => pending,
            _ => {
                tracing::debug!(token = token.value(), "dropping stale movie response");
                return Applied::Stale;
            }
        };
        self.pending = None;

        let page = match outcome {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(page = pending.page, query = %self.query, "movie load failed: {err}");
                self.status = ResultsStatus::Error(err.to_string());
                self.failed_page = Some(pending.page);
                return Applied::Failed;
            }
        };

        self.status = ResultsStatus::Loaded;
        self.has_more = page.has_more;
        self.page = pending.page;
        if pending.page == 1 {
            self.items = page.movies;
            Applied::Replaced
        } else {
            self.items.extend(page.movies);
            Applied::Appended
        }
    }

    fn issue(&mut self, page: u32) -> MovieRequest {
        let token = self.generation.advance();
        self.pending = Some(PendingLoad { token, page });
        MovieRequest {
            token,
            query: self.query.clone(),
            page,
        }
    }
}

#[cfg(test)]
#[path = "tests/results_tests.rs"]
mod tests;
