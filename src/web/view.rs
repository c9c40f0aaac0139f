use serde::Serialize;
use std::fmt;

use crate::tmdb::{
    image_url, wikipedia_url, youtube_url, CastMember, Genre, MovieSummary, Video, BACKDROP_SIZE,
    POSTER_SIZE, PROFILE_SIZE,
};

use super::aggregation::{genre_line, genre_names, Primary};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_RECOMMENDATIONS: &str = "No recommended movies available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    Resolved,
    NotFound,
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieView {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub rating: String,
    pub release_date: String,
    pub poster_url: String,
    pub backdrop_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastView {
    pub id: u64,
    pub name: String,
    pub profile_url: String,
    pub wiki_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrailerView {
    pub key: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MovieCard {
    pub fn new(movie: &MovieSummary, image_base: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: image_url(image_base, POSTER_SIZE, movie.poster_path.as_deref()),
            rating: movie.vote_average,
            release_date: movie.release_date.clone(),
        }
    }
}

/// Everything the detail page shows for one title.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub query: String,
    pub status: DetailStatus,
    pub movie: Option<MovieView>,
    pub cast: Vec<CastView>,
    pub trailer: Option<TrailerView>,
    pub trailer_enabled: bool,
    pub genres: Vec<String>,
    pub genre_line: String,
    pub recommendations: Vec<MovieCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations_placeholder: Option<String>,
}

fn rating(vote: Option<f64>) -> String {
    match vote {
        Some(v) if v > 0.0 => format!("{}/10", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl DetailPage {
    pub fn build(
        query: &str,
        primary: Primary,
        genre_table: &[Genre],
        recommendations: Vec<MovieSummary>,
        image_base: &str,
    ) -> Self {
        let recommendations: Vec<MovieCard> = recommendations
            .iter()
            .map(|m| MovieCard::new(m, image_base))
            .collect();
        let recommendations_placeholder = recommendations
            .is_empty()
            .then(|| NO_RECOMMENDATIONS.to_string());

        let mut page = DetailPage {
            query: query.to_string(),
            status: DetailStatus::NotFound,
            movie: None,
            cast: Vec::new(),
            trailer: None,
            trailer_enabled: false,
            genres: Vec::new(),
            genre_line: NOT_AVAILABLE.to_string(),
            recommendations,
            recommendations_placeholder,
        };

        match primary {
            Primary::Resolved {
                movie,
                cast,
                trailer,
            } => {
                page.status = DetailStatus::Resolved;
                page.genres = genre_names(&movie.genre_ids, genre_table);
                if !movie.genre_ids.is_empty() {
                    page.genre_line = genre_line(&page.genres);
                }
                page.cast = cast.iter().map(|c| cast_view(c, image_base)).collect();
                page.trailer = trailer.as_ref().map(trailer_view);
                page.trailer_enabled = page.trailer.is_some();
                page.movie = Some(movie_view(&movie, image_base));
            }
            Primary::NotFound => {}
            Primary::Unavailable(_) => page.status = DetailStatus::Unavailable,
        }

        page
    }
}

/// Plain-text rendering used by the command line.
impl fmt::Display for DetailPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.movie) {
            (DetailStatus::Resolved, Some(movie)) => {
                writeln!(f, "{}", movie.title)?;
                if !movie.overview.is_empty() {
                    writeln!(f, "\n{}\n", movie.overview)?;
                }
                let cast: Vec<&str> = self.cast.iter().map(|c| c.name.as_str()).collect();
                writeln!(f, "Cast: {}", cast.join(", "))?;
                writeln!(f, "Rating: {}", movie.rating)?;
                writeln!(f, "Release Date: {}", movie.release_date)?;
                writeln!(f, "Genres: {}", self.genre_line)?;
                match &self.trailer {
                    Some(trailer) => writeln!(f, "Trailer: {}", trailer.url)?,
                    None => writeln!(f, "Trailer: unavailable")?,
                }
            }
            (DetailStatus::Unavailable, _) => writeln!(f, "Could not load {:?}", self.query)?,
            _ => writeln!(f, "No movie found for {:?}", self.query)?,
        }

        writeln!(f, "\nRecommended Movies:")?;
        if let Some(placeholder) = &self.recommendations_placeholder {
            return writeln!(f, "  {}", placeholder);
        }
        for card in &self.recommendations {
            match card.release_date.as_deref().and_then(|d| d.get(..4)) {
                Some(year) => writeln!(f, "  - {} ({})", card.title, year)?,
                None => writeln!(f, "  - {}", card.title)?,
            }
        }
        Ok(())
    }
}

fn movie_view(movie: &MovieSummary, image_base: &str) -> MovieView {
    MovieView {
        id: movie.id,
        title: movie.title.clone(),
        overview: movie.overview.clone(),
        rating: rating(movie.vote_average),
        release_date: or_na(movie.release_date.as_deref()),
        poster_url: image_url(image_base, POSTER_SIZE, movie.poster_path.as_deref()),
        backdrop_url: image_url(image_base, BACKDROP_SIZE, movie.backdrop_path.as_deref()),
    }
}

fn cast_view(member: &CastMember, image_base: &str) -> CastView {
    CastView {
        id: member.id,
        name: member.name.clone(),
        profile_url: image_url(image_base, PROFILE_SIZE, member.profile_path.as_deref()),
        wiki_url: wikipedia_url(&member.name),
    }
}

fn trailer_view(video: &Video) -> TrailerView {
    TrailerView {
        key: video.key.clone(),
        name: video.name.clone(),
        url: youtube_url(&video.key),
    }
}
