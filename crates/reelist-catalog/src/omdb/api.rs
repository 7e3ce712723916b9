use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use reelist_models::{MovieDetail, MovieSummary};

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchHit>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Year", default)]
    year: String,
}

// Detail fields default to empty so a "False" payload still deserializes
// and can be rejected with the provider's own error text.
#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Actors", default)]
    actors: String,
}

impl From<OmdbSearchHit> for MovieSummary {
    fn from(hit: OmdbSearchHit) -> Self {
        Self {
            imdb_id: hit.imdb_id,
            title: hit.title,
            poster: hit.poster,
            year: hit.year,
        }
    }
}

impl From<DetailEnvelope> for MovieDetail {
    fn from(detail: DetailEnvelope) -> Self {
        Self {
            imdb_id: detail.imdb_id,
            title: detail.title,
            poster: detail.poster,
            runtime: detail.runtime,
            imdb_rating: detail.imdb_rating,
            plot: detail.plot,
            released: detail.released,
            director: detail.director,
            genre: detail.genre,
            actors: detail.actors,
        }
    }
}

/// Search the catalog by title fragment.
pub(crate) async fn search(
    client: &Client,
    base_url: &str,
    api_key: &str,
    term: &str,
) -> Result<Vec<MovieSummary>, CatalogError> {
    let url = format!(
        "{}?apikey={}&s={}",
        normalize_base(base_url),
        api_key,
        urlencoding::encode(term)
    );

    let response = client.get(&url).send().await.map_err(|e| {
        warn!("Search request failed: {}", e);
        CatalogError::transport()
    })?;

    if !response.status().is_success() {
        warn!("Search returned status {}", response.status());
        return Err(CatalogError::transport());
    }

    let envelope: SearchEnvelope = response.json().await.map_err(|e| {
        warn!("Failed to decode search payload: {}", e);
        CatalogError::transport()
    })?;

    if envelope.response != "True" {
        debug!(
            "Search for {:?} came back empty: {}",
            term,
            envelope.error.as_deref().unwrap_or("no provider error")
        );
        return Err(CatalogError::NotFound);
    }

    Ok(envelope.search.into_iter().map(MovieSummary::from).collect())
}

/// Fetch the full record for one imdb id.
pub(crate) async fn lookup(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: &str,
) -> Result<MovieDetail, CatalogError> {
    let url = format!(
        "{}?apikey={}&i={}",
        normalize_base(base_url),
        api_key,
        urlencoding::encode(id)
    );

    let response = client.get(&url).send().await.map_err(|e| {
        warn!("Detail request failed: {}", e);
        CatalogError::transport()
    })?;

    if !response.status().is_success() {
        warn!("Detail lookup returned status {}", response.status());
        return Err(CatalogError::transport());
    }

    let envelope: DetailEnvelope = response.json().await.map_err(|e| {
        warn!("Failed to decode detail payload: {}", e);
        CatalogError::transport()
    })?;

    if envelope.response != "True" {
        let message = envelope
            .error
            .unwrap_or_else(|| crate::error::FETCH_FAILED.to_string());
        warn!("Detail lookup for {} rejected by provider: {}", id, message);
        return Err(CatalogError::Transport(message));
    }

    Ok(MovieDetail::from(envelope))
}

fn normalize_base(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    format!("{}/", trimmed)
}
