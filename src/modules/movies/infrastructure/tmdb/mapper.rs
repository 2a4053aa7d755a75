use super::models::{TmdbMovie, TmdbMovieDetails, TmdbProductionCompany};
use crate::modules::movies::domain::{Genre, Movie, MovieDetails, ProductionCompany};

/// Converts TMDB payloads into domain entities
///
/// TMDB omits or nulls most fields for obscure titles; the domain types carry
/// neutral defaults instead so consumers never deal with half-filled records.
#[derive(Debug, Clone, Default)]
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_movie(&self, source: TmdbMovie) -> Movie {
        Movie {
            id: source.id,
            title: pick_title(source.title, source.original_title),
            overview: source.overview.unwrap_or_default(),
            poster_path: non_empty(source.poster_path),
            backdrop_path: non_empty(source.backdrop_path),
            release_date: non_empty(source.release_date),
            vote_average: source.vote_average.unwrap_or(0.0),
            vote_count: source.vote_count.unwrap_or(0),
            popularity: source.popularity.unwrap_or(0.0),
            genre_ids: source.genre_ids.unwrap_or_default(),
            original_language: non_empty(source.original_language),
            adult: source.adult.unwrap_or(false),
        }
    }

    pub fn map_movies(&self, sources: Vec<TmdbMovie>) -> Vec<Movie> {
        sources
            .into_iter()
            .map(|source| self.map_movie(source))
            .collect()
    }

    pub fn map_details(&self, source: TmdbMovieDetails) -> MovieDetails {
        MovieDetails {
            id: source.id,
            title: pick_title(source.title, source.original_title.clone()),
            original_title: non_empty(source.original_title),
            overview: source.overview.unwrap_or_default(),
            tagline: non_empty(source.tagline),
            poster_path: non_empty(source.poster_path),
            backdrop_path: non_empty(source.backdrop_path),
            release_date: non_empty(source.release_date),
            runtime: source.runtime.filter(|minutes| *minutes > 0),
            status: non_empty(source.status),
            vote_average: source.vote_average.unwrap_or(0.0),
            vote_count: source.vote_count.unwrap_or(0),
            popularity: source.popularity.unwrap_or(0.0),
            budget: source.budget.unwrap_or(0),
            revenue: source.revenue.unwrap_or(0),
            genres: source
                .genres
                .unwrap_or_default()
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            production_companies: source
                .production_companies
                .unwrap_or_default()
                .into_iter()
                .map(map_company)
                .collect(),
            homepage: non_empty(source.homepage),
            imdb_id: non_empty(source.imdb_id),
            original_language: non_empty(source.original_language),
            adult: source.adult.unwrap_or(false),
        }
    }
}

fn map_company(company: TmdbProductionCompany) -> ProductionCompany {
    ProductionCompany {
        id: company.id,
        name: company.name,
        logo_path: non_empty(company.logo_path),
        origin_country: non_empty(company.origin_country),
    }
}

fn pick_title(title: Option<String>, original_title: Option<String>) -> String {
    non_empty(title)
        .or_else(|| non_empty(original_title))
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
