pub mod error;
pub mod omdb;

pub use error::CatalogError;
pub use omdb::OmdbClient;
