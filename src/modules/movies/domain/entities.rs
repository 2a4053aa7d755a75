use super::images::{image_url, poster_url};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Movie summary as shown in lists and search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>, // "YYYY-MM-DD"
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub genre_ids: Vec<u32>,
    pub original_language: Option<String>,
    pub adult: bool,
}

impl Movie {
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }

    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| image_url(p, "original"))
    }

    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u32,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

/// Full record for a single movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>, // minutes
    pub status: Option<String>, // "Released", "Post Production", ...
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub budget: u64,
    pub revenue: u64,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub adult: bool,
}

impl MovieDetails {
    pub fn poster_url(&self) -> Option<String> {
        poster_url(self.poster_path.as_deref())
    }

    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

fn release_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}
