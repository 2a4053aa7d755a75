use crate::modules::movies::Movie;

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
        release_date: Some("2021-09-15".to_string()),
        vote_average: 7.5,
        vote_count: 100,
        popularity: 50.0,
        genre_ids: vec![],
        original_language: Some("en".to_string()),
        adult: false,
    }
}
