//! Plain-text rendering of coordinator state and events.

use std::{collections::BTreeMap, fmt::Write as _};

use catalog_core::{CoordinatorEvent, FilterCoordinator, ResultsStatus};
use shared::{
    domain::FacetName,
    protocol::{FacetOption, Movie},
};

pub fn format_movies(items: &[Movie], has_more: bool) -> String {
    if items.is_empty() {
        return "no movies match the current filters".to_string();
    }
    let mut out = String::new();
    for movie in items {
        let _ = writeln!(out, "  [{}] {}", movie.id, movie.title);
    }
    if has_more {
        out.push_str("  ... more available (`more`)\n");
    }
    out
}

pub fn format_options(facet: FacetName, options: &[FacetOption], has_more: bool) -> String {
    if options.is_empty() {
        return format!("no {facet} options loaded");
    }
    let mut out = format!("{facet} options:\n");
    for option in options {
        let _ = writeln!(out, "  [{}] {}", option.id, option.name);
    }
    if has_more {
        let _ = writeln!(out, "  ... more available (`more {facet}`)");
    }
    out
}

pub fn describe(event: &CoordinatorEvent) -> String {
    match event {
        CoordinatorEvent::QueryChanged(query) => format!("filters: {query}"),
        CoordinatorEvent::FacetUpdated {
            facet,
            page,
            total,
            has_more,
            ..
        } => format!(
            "{facet}: page {page}, {total} options{}",
            if *has_more { ", more available" } else { "" }
        ),
        CoordinatorEvent::FacetLoadFailed { message, .. } => format!("! {message}"),
        CoordinatorEvent::ResultsUpdated {
            page,
            total,
            has_more,
            ..
        } => format!(
            "movies: page {page}, {total} shown{}",
            if *has_more { ", more available" } else { "" }
        ),
        CoordinatorEvent::ResultsLoadFailed { message } => {
            format!("! could not load movies: {message} (`retry` to try again)")
        }
    }
}

/// Local copy of what the user sees, kept current from coordinator events.
#[derive(Debug, Default)]
pub struct Screen {
    movies: Vec<Movie>,
    movies_have_more: bool,
    options: BTreeMap<FacetName, (Vec<FacetOption>, bool)>,
}

impl Screen {
    pub fn capture(coordinator: &FilterCoordinator) -> Self {
        let results = coordinator.results_view();
        let options = FacetName::ALL
            .into_iter()
            .map(|facet| {
                let view = coordinator.facet_view(facet);
                (facet, (view.options.to_vec(), view.has_more))
            })
            .collect();
        Self {
            movies: results.items.to_vec(),
            movies_have_more: results.has_more && results.status == &ResultsStatus::Loaded,
            options,
        }
    }

    pub fn apply(&mut self, event: &CoordinatorEvent) {
        match event {
            CoordinatorEvent::FacetUpdated {
                facet,
                page,
                has_more,
                received,
                ..
            } => {
                let entry = self.options.entry(*facet).or_default();
                if *page == 1 {
                    entry.0 = received.clone();
                } else {
                    entry.0.extend(received.iter().cloned());
                }
                entry.1 = *has_more;
            }
            CoordinatorEvent::ResultsUpdated {
                page,
                has_more,
                received,
                ..
            } => {
                if *page == 1 {
                    self.movies = received.clone();
                } else {
                    self.movies.extend(received.iter().cloned());
                }
                self.movies_have_more = *has_more;
            }
            CoordinatorEvent::QueryChanged(_)
            | CoordinatorEvent::FacetLoadFailed { .. }
            | CoordinatorEvent::ResultsLoadFailed { .. } => {}
        }
    }

    pub fn render(&self, target: Option<FacetName>) -> String {
        match target {
            None => format_movies(&self.movies, self.movies_have_more),
            Some(facet) => match self.options.get(&facet) {
                Some((options, has_more)) => format_options(facet, options, *has_more),
                None => format_options(facet, &[], false),
            },
        }
    }
}
