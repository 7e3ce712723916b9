pub mod movie;
pub mod parse;
pub mod watched;

pub use movie::{MovieDetail, MovieSummary};
pub use parse::{parse_rating, runtime_minutes};
pub use watched::{WatchedMovie, WatchedSummary};
