/// Movie metadata module
///
/// Architecture:
/// - Domain: Movie entities and the `MovieCatalog` port
/// - Infrastructure: TMDB REST client implementing the port
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use domain::{Movie, MovieCatalog, MovieDetails};
pub use infrastructure::TmdbClient;
