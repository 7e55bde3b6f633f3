use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::ApiError,
    protocol::{FacetOption, Movie, Paginated},
};
use url::Url;

use crate::{
    facet::FacetEndpoint, selection::MovieQuery, CatalogApi, CatalogError, MoviePage, OptionPage,
};

const MOVIE_PATH: &str = "movie";

/// [`CatalogApi`] over the catalog's REST endpoints.
pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.base_url.join(&format!("{path}/"))?)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&'static str, String)],
    ) -> Result<Paginated<T>, CatalogError> {
        let res = self.http.get(url).query(params).send().await?;
        let status = res.status();
        if !status.is_success() {
            let detail = match res.json::<ApiError>().await {
                Ok(body) => body.message().to_string(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            };
            return Err(CatalogError::Status {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(res.json().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_options(
        &self,
        endpoint: FacetEndpoint,
        search: &str,
        page: u32,
    ) -> Result<OptionPage, CatalogError> {
        let url = self.endpoint_url(endpoint.path())?;
        let mut params = Vec::with_capacity(2);
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        params.push(("page", page.to_string()));
        let page: Paginated<FacetOption> = self.get_page(url, &params).await?;
        Ok(page.into())
    }

    async fn fetch_movies(&self, query: &MovieQuery, page: u32) -> Result<MoviePage, CatalogError> {
        let url = self.endpoint_url(MOVIE_PATH)?;
        let page: Paginated<Movie> = self.get_page(url, &query.to_params(page)).await?;
        Ok(page.into())
    }
}

/// Parses `raw` and guarantees a trailing slash so endpoint paths join below it.
fn normalize_base_url(raw: &str) -> Result<Url, CatalogError> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl(format!(
            "'{raw}' cannot be used as a base url"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
