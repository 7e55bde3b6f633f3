use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use catalog_core::{FilterCoordinator, HttpCatalogClient, MIN_SEARCH_LEN};
use clap::Parser;
use shared::domain::{FacetName, OptionId};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod host;
mod interactive;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(about = "Browse a movie catalog by genre, country, year, cast and director")]
struct Args {
    /// Settings file; defaults to ./browser.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    genre: Option<i64>,
    #[arg(long)]
    country: Option<i64>,
    #[arg(long)]
    year: Option<i64>,
    /// Person search; the first matching actor is selected.
    #[arg(long)]
    actor: Option<String>,
    /// Person search; the first matching director is selected.
    #[arg(long)]
    director: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Result pages to fetch in one-shot mode.
    #[arg(long)]
    pages: Option<u32>,
    #[arg(long)]
    interactive: bool,
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = settings::load_settings(args.config.as_deref())?;
    if let Some(url) = &args.catalog_url {
        settings.catalog_url = url.clone();
    }
    if let Some(pages) = args.pages {
        settings.page_limit = pages;
    }
    settings.validate()?;

    if args.print_config {
        println!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let host = host::bootstrap();
    info!(platform = %host.platform, theme = ?host.theme, "host handshake complete");

    let api = HttpCatalogClient::new(&settings.catalog_url, settings.request_timeout())
        .with_context(|| format!("cannot use catalog url '{}'", settings.catalog_url))?;
    let mut coordinator = FilterCoordinator::new(Arc::new(api), settings.coordinator_config());
    coordinator.mount();
    coordinator.settle().await;

    if args.interactive {
        return interactive::run(coordinator).await;
    }
    browse_once(&mut coordinator, &args, settings.page_limit).await
}

async fn browse_once(
    coordinator: &mut FilterCoordinator,
    args: &Args,
    page_limit: u32,
) -> Result<()> {
    if let Some(term) = &args.actor {
        select_first_person(coordinator, FacetName::Actor, term).await?;
    }
    if let Some(term) = &args.director {
        select_first_person(coordinator, FacetName::Director, term).await?;
    }
    coordinator.select(FacetName::Genre, args.genre.map(OptionId));
    coordinator.select(FacetName::Country, args.country.map(OptionId));
    coordinator.select(FacetName::Year, args.year.map(OptionId));
    coordinator.set_title_search(args.search.clone().unwrap_or_default());
    coordinator.settle().await;

    for _ in 1..page_limit {
        if !coordinator.results_view().has_more {
            break;
        }
        coordinator.load_more_results();
        coordinator.settle().await;
    }

    for facet in FacetName::ALL {
        if let Some(err) = coordinator.facet_view(facet).error {
            eprintln!("warning: {err}");
        }
    }

    let view = coordinator.results_view();
    if let catalog_core::ResultsStatus::Error(message) = view.status {
        bail!("could not load movies: {message}");
    }
    println!("filters: {}", coordinator.query());
    print!("{}", render::format_movies(view.items, view.has_more));
    Ok(())
}

async fn select_first_person(
    coordinator: &mut FilterCoordinator,
    facet: FacetName,
    term: &str,
) -> Result<()> {
    if term.chars().count() < MIN_SEARCH_LEN {
        bail!("{facet} search needs at least {MIN_SEARCH_LEN} characters");
    }
    coordinator.search_facet(facet, term);
    coordinator.settle().await;

    let view = coordinator.facet_view(facet);
    if let Some(err) = view.error {
        bail!("{err}");
    }
    let Some(first) = view.options.first() else {
        bail!("no {facet} matches '{term}'");
    };
    info!(%facet, id = %first.id, name = %first.name, "selected first match");
    let id = first.id;
    coordinator.select(facet, Some(id));
    Ok(())
}
