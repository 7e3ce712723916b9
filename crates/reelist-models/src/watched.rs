use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieDetail;
use crate::parse::{parse_rating, runtime_minutes};

/// An entry in the persisted watched list.
///
/// `user_rating` is set once when the entry is created and never changed
/// afterwards. `imdb_rating` and `runtime` are already parsed to numbers
/// (0 when the provider reported nothing usable) so statistics never touch
/// raw provider strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub poster: String,
    pub user_rating: u8,
    pub imdb_rating: f64,
    pub runtime: u32,
    pub year: String,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

/// Aggregate statistics over the watched list.
///
/// Each mean is taken over its contributing subset only: `avg_imdb_rating`
/// and `avg_runtime` skip entries whose value is zero, `avg_user_rating`
/// covers every entry. An empty contributing set yields 0. Means carry two
/// decimals; runtime is displayed with none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedMovie {
    /// Derive a watched entry from a loaded detail and the user's rating.
    /// Numeric fields go through the total parsers; the display year is
    /// the detail's release-date string.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            poster: detail.poster.clone(),
            user_rating,
            imdb_rating: parse_rating(&detail.imdb_rating),
            runtime: runtime_minutes(&detail.runtime),
            year: detail.released.clone(),
            added_at: Utc::now(),
        }
    }
}

impl WatchedSummary {
    pub fn from_items(items: &[WatchedMovie]) -> Self {
        Self {
            count: items.len(),
            avg_imdb_rating: mean(
                items
                    .iter()
                    .filter(|m| m.imdb_rating != 0.0)
                    .map(|m| m.imdb_rating),
            ),
            avg_user_rating: mean(items.iter().map(|m| f64::from(m.user_rating))),
            avg_runtime: mean(
                items
                    .iter()
                    .filter(|m| m.runtime != 0)
                    .map(|m| f64::from(m.runtime)),
            ),
        }
    }
}

/// Sum divided by the count of contributing values, rounded to two
/// decimals; 0 when nothing contributes.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0u32;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    round2(sum / f64::from(count))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
