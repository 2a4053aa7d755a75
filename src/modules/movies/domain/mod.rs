pub mod catalog;
pub mod entities;
pub mod images;

pub use catalog::MovieCatalog;
pub use entities::{Genre, Movie, MovieDetails, ProductionCompany};
pub use images::{image_url, poster_url, IMAGE_BASE_URL, POSTER_SIZE};
