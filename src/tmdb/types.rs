use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie as returned by search and discover listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MovieSummary {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    /// Listings only show entries with both an id and an original title.
    pub fn is_renderable(&self) -> bool {
        self.id != 0 && !self.original_title.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub cast_id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// `/movie/{id}?append_to_response=videos`. Only the parts the detail page
/// uses are decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub videos: Option<VideoList>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Parameters of a discover-by-genre query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverQuery {
    pub genres: Vec<u32>,
    pub release_date_lte: Option<NaiveDate>,
}

impl DiscoverQuery {
    /// Genres are OR-ed: TMDB treats `|` as "any of" and `,` as "all of".
    pub fn with_genres(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_summary_tolerates_missing_fields() {
        let movie: MovieSummary =
            serde_json::from_str(r#"{"id": 603, "title": "The Matrix", "poster_path": null}"#)
                .unwrap();
        assert_eq!(movie.id, 603);
        assert!(movie.genre_ids.is_empty());
        assert!(movie.poster_path.is_none());
        assert!(!movie.is_renderable());
    }

    #[test]
    fn test_with_genres_is_or() {
        let query = DiscoverQuery {
            genres: vec![28, 12, 16],
            release_date_lte: None,
        };
        assert_eq!(query.with_genres(), "28|12|16");
    }
}
