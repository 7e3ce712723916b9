use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use reelist_models::{MovieDetail, MovieSummary};

use crate::error::CatalogError;
use crate::omdb::{api, DEFAULT_BASE_URL};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the OMDb catalog.
///
/// Both operations take a [`CancellationToken`]; the caller owns one token
/// per logical slot (search, detail) and cancels it when a newer request
/// supersedes the old one. A cancelled operation resolves to
/// [`CatalogError::Cancelled`] and must not be surfaced to the user.
#[derive(Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MovieSummary>, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(CatalogError::Cancelled),
            result = api::search(&self.http, &self.base_url, &self.api_key, term) => result,
        }
    }

    pub async fn lookup(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<MovieDetail, CatalogError> {
        if cancel.is_cancelled() {
            return Err(CatalogError::Cancelled);
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(CatalogError::Cancelled),
            result = api::lookup(&self.http, &self.base_url, &self.api_key, id) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn search_body() -> String {
        json!({
            "Response": "True",
            "Search": [
                {
                    "imdbID": "tt1375666",
                    "Title": "Inception",
                    "Poster": "https://example.com/inception.jpg",
                    "Year": "2010"
                },
                {
                    "imdbID": "tt0816692",
                    "Title": "Interstellar",
                    "Poster": "N/A",
                    "Year": "2014"
                }
            ],
            "totalResults": "2"
        })
        .to_string()
    }

    fn detail_body() -> String {
        json!({
            "Response": "True",
            "imdbID": "tt1375666",
            "Title": "Inception",
            "Poster": "https://example.com/inception.jpg",
            "Runtime": "148 min",
            "imdbRating": "8.8",
            "Plot": "A thief who steals corporate secrets.",
            "Released": "16 Jul 2010",
            "Director": "Christopher Nolan",
            "Genre": "Action, Adventure, Sci-Fi",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt"
        })
        .to_string()
    }

    #[tokio::test]
    async fn search_maps_hits_to_summaries() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("s".into(), "inception".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_body())
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test-key", server.url());
        let results = client
            .search("inception", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].imdb_id, "tt1375666");
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[1].year, "2014");
    }

    #[tokio::test]
    async fn search_miss_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"Response": "False", "Error": "Movie not found!"}).to_string())
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test-key", server.url());
        let err = client
            .search("zzzzz", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound));
        assert_eq!(err.to_string(), "Movie not found.");
    }

    #[tokio::test]
    async fn non_success_status_is_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test-key", server.url());
        let err = client
            .search("inception", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Transport(_)));
        assert_eq!(err.to_string(), crate::error::FETCH_FAILED);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let server = mockito::Server::new_async().await;
        let client = OmdbClient::with_base_url("test-key", server.url());

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.search("inception", &cancel).await.unwrap_err();
        assert!(err.is_cancelled());

        let err = client.lookup("tt1375666", &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn lookup_maps_detail_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("i".into(), "tt1375666".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(detail_body())
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test-key", server.url());
        let detail = client
            .lookup("tt1375666", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.runtime, "148 min");
        assert_eq!(detail.imdb_rating, "8.8");
        assert_eq!(detail.released, "16 Jul 2010");
    }

    #[tokio::test]
    async fn lookup_rejected_by_provider_is_transport_with_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"Response": "False", "Error": "Incorrect IMDb ID."}).to_string())
            .create_async()
            .await;

        let client = OmdbClient::with_base_url("test-key", server.url());
        let err = client
            .lookup("bogus", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CatalogError::Transport(message) => assert_eq!(message, "Incorrect IMDb ID."),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
