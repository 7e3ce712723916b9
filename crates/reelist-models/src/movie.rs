use serde::{Deserialize, Serialize};

/// One search hit. The result list is replaced wholesale on every search,
/// so summaries are never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub poster: String,
    pub year: String,
}

/// Full catalog record for a single title, fetched fresh per selection.
///
/// `runtime` and `imdb_rating` keep the provider's raw strings
/// (e.g. "142 min", "N/A"); numeric values are derived through
/// [`crate::parse`] only when a watched entry is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub poster: String,
    pub runtime: String,
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub director: String,
    pub genre: String,
    pub actors: String,
}
