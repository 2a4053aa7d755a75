/// Home screen composition
///
/// Headless counterpart of the home and search screens: wires movie catalog
/// and search-count registry into async resources and derives what the
/// screen should show.
pub mod feed;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use feed::{HomeFeed, HomeView};
pub use search::MovieSearch;
