//! Owns facet sources, selections and the movie list, and turns user actions
//! into fetches. Fetches run as spawned tasks that report back through a
//! completion queue; completions are applied one at a time by the owner.

use std::sync::Arc;

use chrono::Datelike;
use shared::{
    domain::{FacetName, OptionId},
    protocol::{FacetOption, Movie},
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::{
    facet::{year_options, FacetSource, OptionRequest},
    request::{Applied, RequestToken},
    results::{MovieRequest, ResultSetController, ResultsStatus},
    selection::{compose_query, MovieQuery, SelectionRegistry},
    CatalogApi, CatalogError, MoviePage, OptionPage,
};

const DEFAULT_FIRST_YEAR: i32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub first_year: i32,
    pub last_year: i32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            first_year: DEFAULT_FIRST_YEAR,
            last_year: chrono::Local::now().year(),
        }
    }
}

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Select {
        facet: FacetName,
        option: Option<OptionId>,
    },
    SearchFacet {
        facet: FacetName,
        term: String,
    },
    LoadMoreOptions {
        facet: FacetName,
    },
    SetTitleSearch(String),
    LoadMoreResults,
    Reset,
    RetryResults,
}

#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    QueryChanged(MovieQuery),
    FacetUpdated {
        facet: FacetName,
        page: u32,
        total: usize,
        has_more: bool,
        received: Vec<FacetOption>,
    },
    FacetLoadFailed {
        facet: FacetName,
        message: String,
    },
    ResultsUpdated {
        page: u32,
        total: usize,
        has_more: bool,
        received: Vec<Movie>,
    },
    ResultsLoadFailed {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Facet(FacetName),
    Results,
}

#[derive(Debug)]
enum Outcome {
    Options(Result<OptionPage, CatalogError>),
    Movies(Result<MoviePage, CatalogError>),
}

/// A finished fetch waiting to be applied to its source.
#[derive(Debug)]
pub struct Completion {
    source: Source,
    token: RequestToken,
    outcome: Outcome,
}

impl Completion {
    pub fn source(&self) -> Source {
        self.source
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }
}

/// Read model handed to a dropdown.
#[derive(Debug, Clone, Copy)]
pub struct FacetView<'a> {
    pub facet: FacetName,
    pub options: &'a [FacetOption],
    pub selected_id: Option<OptionId>,
    pub has_more: bool,
    pub search_term: &'a str,
    pub loading: bool,
    pub error: Option<&'a str>,
}

/// Read model handed to the movie list.
#[derive(Debug, Clone, Copy)]
pub struct ResultsView<'a> {
    pub items: &'a [Movie],
    pub page: u32,
    pub has_more: bool,
    pub status: &'a ResultsStatus,
}

/// One slot per facet.
#[derive(Debug)]
struct FacetSet {
    genre: FacetSource,
    country: FacetSource,
    year: FacetSource,
    actor: FacetSource,
    director: FacetSource,
}

impl FacetSet {
    fn new(config: CoordinatorConfig) -> Self {
        Self {
            genre: FacetSource::new(FacetName::Genre),
            country: FacetSource::new(FacetName::Country),
            year: FacetSource::local(
                FacetName::Year,
                year_options(config.first_year, config.last_year),
            ),
            actor: FacetSource::new(FacetName::Actor),
            director: FacetSource::new(FacetName::Director),
        }
    }

    fn get(&self, facet: FacetName) -> &FacetSource {
        match facet {
            FacetName::Genre => &self.genre,
            FacetName::Country => &self.country,
            FacetName::Year => &self.year,
            FacetName::Actor => &self.actor,
            FacetName::Director => &self.director,
        }
    }

    fn get_mut(&mut self, facet: FacetName) -> &mut FacetSource {
        match facet {
            FacetName::Genre => &mut self.genre,
            FacetName::Country => &mut self.country,
            FacetName::Year => &mut self.year,
            FacetName::Actor => &mut self.actor,
            FacetName::Director => &mut self.director,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut FacetSource> {
        [
            &mut self.genre,
            &mut self.country,
            &mut self.year,
            &mut self.actor,
            &mut self.director,
        ]
        .into_iter()
    }
}

pub struct FilterCoordinator {
    api: Arc<dyn CatalogApi>,
    facets: FacetSet,
    selection: SelectionRegistry,
    results: ResultSetController,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
    events: broadcast::Sender<CoordinatorEvent>,
}

impl FilterCoordinator {
    pub fn new(api: Arc<dyn CatalogApi>, config: CoordinatorConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(256);
        Self {
            api,
            facets: FacetSet::new(config),
            selection: SelectionRegistry::default(),
            results: ResultSetController::default(),
            completion_tx,
            completion_rx,
            in_flight: 0,
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    /// Loads eager facets and the unfiltered first page of movies.
    pub fn mount(&mut self) {
        let requests: Vec<OptionRequest> = self
            .facets
            .iter_mut()
            .filter_map(FacetSource::mount)
            .collect();
        for request in requests {
            self.dispatch_options(request);
        }
        self.fire_query(compose_query(&self.selection));
    }

    pub fn handle(&mut self, action: UiAction) {
        match action {
            UiAction::Select { facet, option } => self.select(facet, option),
            UiAction::SearchFacet { facet, term } => self.search_facet(facet, term),
            UiAction::LoadMoreOptions { facet } => self.load_more_options(facet),
            UiAction::SetTitleSearch(text) => self.set_title_search(text),
            UiAction::LoadMoreResults => self.load_more_results(),
            UiAction::Reset => self.reset(),
            UiAction::RetryResults => self.retry_results(),
        }
    }

    pub fn select(&mut self, facet: FacetName, option: Option<OptionId>) {
        if self.selection.select(facet, option) {
            self.refresh_query();
        }
    }

    pub fn set_title_search(&mut self, text: impl Into<String>) {
        if self.selection.set_title_search(text) {
            self.refresh_query();
        }
    }

    pub fn search_facet(&mut self, facet: FacetName, term: impl Into<String>) {
        let request = self.facet_mut(facet).set_search(term);
        if let Some(request) = request {
            self.dispatch_options(request);
        }
    }

    pub fn load_more_options(&mut self, facet: FacetName) {
        match self.facet_mut(facet).load_more() {
            Some(request) => self.dispatch_options(request),
            None => debug!(%facet, "load more ignored; nothing more or already loading"),
        }
    }

    pub fn load_more_results(&mut self) {
        match self.results.load_more() {
            Some(request) => self.dispatch_movies(request),
            None => debug!("load more results ignored"),
        }
    }

    pub fn retry_results(&mut self) {
        if let Some(request) = self.results.retry() {
            self.dispatch_movies(request);
        }
    }

    /// Clears every selection and search term and reloads the unfiltered
    /// movie list. Loaded unfiltered facet lists are kept as they are.
    pub fn reset(&mut self) {
        self.selection.clear();
        let requests: Vec<OptionRequest> = self
            .facets
            .iter_mut()
            .filter_map(FacetSource::clear_search)
            .collect();
        for request in requests {
            self.dispatch_options(request);
        }
        info!("filters reset");
        self.fire_query(compose_query(&self.selection));
    }

    pub fn selection(&self) -> &SelectionRegistry {
        &self.selection
    }

    pub fn query(&self) -> &MovieQuery {
        self.results.query()
    }

    pub fn facet(&self, facet: FacetName) -> &FacetSource {
        self.facets.get(facet)
    }

    pub fn facet_view(&self, facet: FacetName) -> FacetView<'_> {
        let source = self.facet(facet);
        FacetView {
            facet,
            options: source.options(),
            selected_id: self.selection.selected(facet),
            has_more: source.has_more(),
            search_term: source.search_term(),
            loading: source.is_loading(),
            error: source.error(),
        }
    }

    pub fn results(&self) -> &ResultSetController {
        &self.results
    }

    pub fn results_view(&self) -> ResultsView<'_> {
        ResultsView {
            items: self.results.items(),
            page: self.results.page(),
            has_more: self.results.has_more(),
            status: self.results.status(),
        }
    }

    /// Number of fetches spawned whose completions have not been received.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next finished fetch, or returns `None` when nothing is
    /// in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        self.in_flight -= 1;
        Some(completion)
    }

    pub fn apply(&mut self, completion: Completion) -> Applied {
        let Completion {
            source,
            token,
            outcome,
        } = completion;
        match (source, outcome) {
            (Source::Facet(facet), Outcome::Options(outcome)) => {
                let received = outcome
                    .as_ref()
                    .map(|page| page.options.clone())
                    .unwrap_or_default();
                let applied = self.facet_mut(facet).apply(token, outcome);
                self.publish_facet(facet, applied, received);
                applied
            }
            (Source::Results, Outcome::Movies(outcome)) => {
                let received = outcome
                    .as_ref()
                    .map(|page| page.movies.clone())
                    .unwrap_or_default();
                let applied = self.results.apply(token, outcome);
                self.publish_results(applied, received);
                applied
            }
            (source, _) => {
                debug!(?source, "completion payload does not match its source");
                Applied::Stale
            }
        }
    }

    /// Applies completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    /// Serves actions until the sender side closes, applying completions as
    /// they arrive.
    pub async fn run(mut self, mut actions: mpsc::Receiver<UiAction>) -> Self {
        loop {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(action) => self.handle(action),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv(), if self.in_flight > 0 => {
                    self.in_flight -= 1;
                    self.apply(completion);
                }
            }
        }
        self
    }

    fn facet_mut(&mut self, facet: FacetName) -> &mut FacetSource {
        self.facets.get_mut(facet)
    }

    fn refresh_query(&mut self) {
        self.fire_query(compose_query(&self.selection));
    }

    fn fire_query(&mut self, query: MovieQuery) {
        info!(%query, "movie query changed");
        let _ = self.events.send(CoordinatorEvent::QueryChanged(query.clone()));
        let request = self.results.query_changed(query);
        self.dispatch_movies(request);
    }

    fn dispatch_options(&mut self, request: OptionRequest) {
        let OptionRequest {
            facet,
            endpoint,
            token,
            search,
            page,
        } = request;
        debug!(%facet, endpoint = endpoint.path(), %search, page, "fetching options");
        let api = Arc::clone(&self.api);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = api.fetch_options(endpoint, &search, page).await;
            let _ = tx.send(Completion {
                source: Source::Facet(facet),
                token,
                outcome: Outcome::Options(outcome),
            });
        });
    }

    fn dispatch_movies(&mut self, request: MovieRequest) {
        let MovieRequest { token, query, page } = request;
        debug!(%query, page, "fetching movies");
        let api = Arc::clone(&self.api);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = api.fetch_movies(&query, page).await;
            let _ = tx.send(Completion {
                source: Source::Results,
                token,
                outcome: Outcome::Movies(outcome),
            });
        });
    }

    fn publish_facet(&self, facet: FacetName, applied: Applied, received: Vec<FacetOption>) {
        let source = self.facet(facet);
        let event = match applied {
            Applied::Replaced | Applied::Appended => CoordinatorEvent::FacetUpdated {
                facet,
                page: source.page(),
                total: source.options().len(),
                has_more: source.has_more(),
                received,
            },
            Applied::Failed => CoordinatorEvent::FacetLoadFailed {
                facet,
                message: source.error().unwrap_or_default().to_string(),
            },
            Applied::Stale => return,
        };
        let _ = self.events.send(event);
    }

    fn publish_results(&self, applied: Applied, received: Vec<Movie>) {
        let event = match applied {
            Applied::Replaced | Applied::Appended => CoordinatorEvent::ResultsUpdated {
                page: self.results.page(),
                total: self.results.items().len(),
                has_more: self.results.has_more(),
                received,
            },
            Applied::Failed => match self.results.status() {
                ResultsStatus::Error(message) => CoordinatorEvent::ResultsLoadFailed {
                    message: message.clone(),
                },
                _ => return,
            },
            Applied::Stale => return,
        };
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
