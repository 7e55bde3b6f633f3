use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use shared::{
    domain::{FilterKey, MovieId, OptionId},
    protocol::{FacetOption, Movie},
};
use tokio::sync::{oneshot, Mutex};

use crate::{CatalogApi, CatalogError, FacetEndpoint, MovieQuery, MoviePage, OptionPage};

pub(crate) const OPTIONS_PER_PAGE: i64 = 2;
pub(crate) const MOVIES_PER_PAGE: i64 = 3;

/// In-memory catalog with call recording, failure injection and gates that
/// hold a response back until the test releases it.
pub(crate) struct FakeCatalog {
    pub(crate) option_pages: u32,
    pub(crate) movie_pages: u32,
    pub(crate) option_calls: Mutex<Vec<(FacetEndpoint, String, u32)>>,
    pub(crate) movie_calls: Mutex<Vec<(MovieQuery, u32)>>,
    pub(crate) failing_endpoints: Mutex<HashSet<FacetEndpoint>>,
    pub(crate) fail_movies: Mutex<bool>,
    option_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    movie_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self {
            option_pages: 3,
            movie_pages: 2,
            option_calls: Mutex::new(Vec::new()),
            movie_calls: Mutex::new(Vec::new()),
            failing_endpoints: Mutex::new(HashSet::new()),
            fail_movies: Mutex::new(false),
            option_gates: Mutex::new(HashMap::new()),
            movie_gates: Mutex::new(HashMap::new()),
        }
    }
}

impl FakeCatalog {
    /// Holds movie responses for queries whose title search is `search`.
    pub(crate) async fn gate_movies(&self, search: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.movie_gates.lock().await.insert(search.to_string(), rx);
        tx
    }

    /// Holds option responses for the search term `search`.
    pub(crate) async fn gate_options(&self, search: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.option_gates.lock().await.insert(search.to_string(), rx);
        tx
    }

    pub(crate) async fn option_calls_for(&self, endpoint: FacetEndpoint) -> Vec<(String, u32)> {
        self.option_calls
            .lock()
            .await
            .iter()
            .filter(|(called, _, _)| *called == endpoint)
            .map(|(_, search, page)| (search.clone(), *page))
            .collect()
    }
}

pub(crate) fn option_for(endpoint: FacetEndpoint, search: &str, page: u32, index: i64) -> FacetOption {
    let id = i64::from(page) * 100 + index;
    FacetOption::new(
        OptionId(id),
        format!("{}:{search}:{page}:{index}", endpoint.path()),
    )
}

pub(crate) fn movie_for(query: &MovieQuery, page: u32, index: i64) -> Movie {
    Movie::new(
        MovieId(i64::from(page) * 100 + index),
        format!("{query} p{page} #{index}"),
    )
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn fetch_options(
        &self,
        endpoint: FacetEndpoint,
        search: &str,
        page: u32,
    ) -> Result<OptionPage, CatalogError> {
        self.option_calls
            .lock()
            .await
            .push((endpoint, search.to_string(), page));
        let gate = self.option_gates.lock().await.remove(search);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing_endpoints.lock().await.contains(&endpoint) {
            return Err(CatalogError::Transport("connection refused".into()));
        }
        Ok(OptionPage {
            options: (0..OPTIONS_PER_PAGE)
                .map(|index| option_for(endpoint, search, page, index))
                .collect(),
            has_more: page < self.option_pages,
        })
    }

    async fn fetch_movies(&self, query: &MovieQuery, page: u32) -> Result<MoviePage, CatalogError> {
        self.movie_calls.lock().await.push((query.clone(), page));
        let search = query.get(FilterKey::Search).unwrap_or_default().to_string();
        let gate = self.movie_gates.lock().await.remove(&search);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if *self.fail_movies.lock().await {
            return Err(CatalogError::Status {
                status: 503,
                detail: "catalog unavailable".into(),
            });
        }
        if search == "nothing" {
            return Ok(MoviePage {
                movies: Vec::new(),
                has_more: false,
            });
        }
        Ok(MoviePage {
            movies: (0..MOVIES_PER_PAGE)
                .map(|index| movie_for(query, page, index))
                .collect(),
            has_more: page < self.movie_pages,
        })
    }
}
