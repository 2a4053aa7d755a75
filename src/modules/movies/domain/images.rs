/// Image hosting for poster and backdrop paths returned by the metadata API
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Poster size used across lists and trending cards
pub const POSTER_SIZE: &str = "w500";

/// Build an image URL for a relative path such as `/abc.jpg`
pub fn image_url(path: &str, size: &str) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size, path)
}

/// Poster URL for an optional path
///
/// A missing or blank path yields `None` rather than a URL with no file name.
pub fn poster_url(path: Option<&str>) -> Option<String> {
    path.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| image_url(p, POSTER_SIZE))
}
