use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::backend::RecommendationSource;
use crate::fetch::{FetchError, FetchResult};
use crate::tmdb::{
    CastMember, DiscoverQuery, Genre, MetadataApi, MovieDetails, MovieSummary, Video, VideoList,
};

fn unavailable(what: &str) -> FetchError {
    FetchError::Status {
        url: format!("fake://{}", what),
        status: 503,
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeMetadata {
    movies: HashMap<String, MovieSummary>,
    failing_searches: HashSet<String>,
    genres: Vec<Genre>,
    videos: HashMap<u64, Vec<Video>>,
    cast: HashMap<u64, Vec<CastMember>>,
    discover: Vec<MovieSummary>,
    fail_enrichment: bool,
    discover_calls: Arc<AtomicUsize>,
}

impl FakeMetadata {
    /// Register a movie found by an exact search for `title`.
    pub fn with_movie(mut self, title: &str, id: u64) -> Self {
        self.movies.insert(
            title.to_string(),
            MovieSummary {
                id,
                title: title.to_string(),
                original_title: title.to_string(),
                poster_path: Some(format!("/{}.jpg", id)),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_genre_ids(mut self, id: u64, genre_ids: Vec<u32>) -> Self {
        for movie in self.movies.values_mut().filter(|m| m.id == id) {
            movie.genre_ids = genre_ids.clone();
        }
        self
    }

    pub fn failing_search(mut self, title: &str) -> Self {
        self.failing_searches.insert(title.to_string());
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_videos(mut self, id: u64, videos: Vec<Video>) -> Self {
        self.videos.insert(id, videos);
        self
    }

    pub fn with_cast(mut self, id: u64, count: u64) -> Self {
        let cast = (0..count)
            .map(|i| CastMember {
                id: id * 100 + i,
                cast_id: Some(i),
                name: format!("Actor {}", i),
                character: None,
                profile_path: None,
            })
            .collect();
        self.cast.insert(id, cast);
        self
    }

    pub fn with_discover(mut self, movies: Vec<MovieSummary>) -> Self {
        self.discover = movies;
        self
    }

    pub fn failing_enrichment(mut self) -> Self {
        self.fail_enrichment = true;
        self
    }

    pub fn discover_calls(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataApi for FakeMetadata {
    async fn genres(&self) -> FetchResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn search_movies(&self, query: &str) -> FetchResult<Vec<MovieSummary>> {
        if self.failing_searches.contains(query) {
            return Err(unavailable("search"));
        }
        Ok(self.movies.get(query).cloned().into_iter().collect())
    }

    async fn credits(&self, movie_id: u64) -> FetchResult<Vec<CastMember>> {
        if self.fail_enrichment {
            return Err(unavailable("credits"));
        }
        Ok(self.cast.get(&movie_id).cloned().unwrap_or_default())
    }

    async fn details_with_videos(&self, movie_id: u64) -> FetchResult<MovieDetails> {
        if self.fail_enrichment {
            return Err(unavailable("details"));
        }
        Ok(MovieDetails {
            id: movie_id,
            title: String::new(),
            videos: Some(VideoList {
                results: self.videos.get(&movie_id).cloned().unwrap_or_default(),
            }),
        })
    }

    async fn discover(&self, query: &DiscoverQuery) -> FetchResult<Vec<MovieSummary>> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .discover
            .iter()
            .filter(|m| m.genre_ids.iter().any(|g| query.genres.contains(g)))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    titles: Vec<String>,
    similar: HashMap<String, Vec<String>>,
    failing: bool,
}

impl FakeBackend {
    pub fn with_titles(mut self, titles: Vec<String>) -> Self {
        self.titles = titles;
        self
    }

    pub fn with_similar(mut self, title: &str, similar: Vec<String>) -> Self {
        self.similar.insert(title.to_string(), similar);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl RecommendationSource for FakeBackend {
    async fn titles(&self) -> FetchResult<Vec<String>> {
        if self.failing {
            return Err(unavailable("movies"));
        }
        Ok(self.titles.clone())
    }

    async fn similar(&self, title: &str) -> FetchResult<Vec<String>> {
        if self.failing {
            return Err(unavailable("similarity"));
        }
        Ok(self.similar.get(title).cloned().unwrap_or_default())
    }
}
