use async_trait::async_trait;
use shared::protocol::{FacetOption, Movie, Paginated};

pub mod client;
pub mod coordinator;
pub mod error;
pub mod facet;
pub mod request;
pub mod results;
pub mod selection;

pub use client::HttpCatalogClient;
pub use coordinator::{
    Completion, CoordinatorConfig, CoordinatorEvent, FacetView, FilterCoordinator, ResultsView,
    Source, UiAction,
};
pub use error::CatalogError;
pub use facet::{FacetEndpoint, FacetKind, FacetSource, OptionRequest};
pub use request::{Applied, RequestToken};
pub use results::{MovieRequest, ResultSetController, ResultsStatus};
pub use selection::{compose_query, MovieQuery, SelectionRegistry};

/// Search terms shorter than this (in characters) never reach the network.
pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPage {
    pub options: Vec<FacetOption>,
    pub has_more: bool,
}

impl From<Paginated<FacetOption>> for OptionPage {
    fn from(value: Paginated<FacetOption>) -> Self {
        let has_more = value.has_more();
        Self {
            options: value.results,
            has_more,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub has_more: bool,
}

impl From<Paginated<Movie>> for MoviePage {
    fn from(value: Paginated<Movie>) -> Self {
        let has_more = value.has_more();
        Self {
            movies: value.results,
            has_more,
        }
    }
}

/// Remote catalog consumed by the coordinator.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_options(
        &self,
        endpoint: FacetEndpoint,
        search: &str,
        page: u32,
    ) -> Result<OptionPage, CatalogError>;

    async fn fetch_movies(&self, query: &MovieQuery, page: u32) -> Result<MoviePage, CatalogError>;
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
