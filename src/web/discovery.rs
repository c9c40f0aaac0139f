use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error};

use crate::fetch::FetchResult;
use crate::tmdb::{DiscoverQuery, MetadataApi, MovieSummary};

/// Selected genre identifiers, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreSelection {
    ids: Vec<u32>,
}

impl GenreSelection {
    /// Add the genre if absent, remove it if present. Returns whether the
    /// genre is selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.ids.iter().position(|g| *g == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// A discover query tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    pub generation: u64,
    pub query: DiscoverQuery,
}

/// What the caller must do after the selection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryCommand {
    Fetch(DiscoveryRequest),
    Clear,
}

/// Rendered state of the discovery grid. Loading wins over error, error over
/// empty, empty over a populated grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GridState {
    Loading,
    Error { message: String },
    Empty,
    Populated { movies: Vec<MovieSummary> },
}

/// The genre-driven home listing. Every selection change bumps the
/// generation; responses tagged with an older generation are dropped.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFlow {
    selection: GenreSelection,
    generation: u64,
    loading: bool,
    error: Option<String>,
    movies: Vec<MovieSummary>,
    release_date_lte: Option<NaiveDate>,
}

impl DiscoveryFlow {
    pub fn new(release_date_lte: Option<NaiveDate>) -> Self {
        Self {
            release_date_lte,
            ..Default::default()
        }
    }

    pub fn selection(&self) -> &GenreSelection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn toggle(&mut self, genre_id: u32) -> DiscoveryCommand {
        self.selection.toggle(genre_id);
        self.selection_changed()
    }

    /// Replace the whole selection, e.g. from a query string.
    pub fn select(&mut self, ids: impl IntoIterator<Item = u32>) -> DiscoveryCommand {
        self.selection.clear();
        for id in ids {
            if !self.selection.contains(id) {
                self.selection.toggle(id);
            }
        }
        self.selection_changed()
    }

    fn selection_changed(&mut self) -> DiscoveryCommand {
        self.generation += 1;
        self.movies.clear();
        self.error = None;

        if self.selection.is_empty() {
            self.loading = false;
            return DiscoveryCommand::Clear;
        }

        self.loading = true;
        DiscoveryCommand::Fetch(DiscoveryRequest {
            generation: self.generation,
            query: DiscoverQuery {
                genres: self.selection.ids().to_vec(),
                release_date_lte: self.release_date_lte,
            },
        })
    }

    /// Apply a response. Returns false when the response was superseded.
    pub fn apply(&mut self, generation: u64, result: FetchResult<Vec<MovieSummary>>) -> bool {
        if generation != self.generation {
            debug!(
                generation = generation,
                current = self.generation,
                "Discarding superseded discover response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(movies) => {
                self.movies = movies.into_iter().filter(|m| m.is_renderable()).collect();
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching movies by genre");
                self.movies.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn grid(&self) -> GridState {
        if self.loading {
            GridState::Loading
        } else if let Some(message) = &self.error {
            GridState::Error {
                message: message.clone(),
            }
        } else if self.movies.is_empty() {
            GridState::Empty
        } else {
            GridState::Populated {
                movies: self.movies.clone(),
            }
        }
    }

    /// Toggle a genre and, if that requires a fetch, run it to completion.
    pub async fn toggle_and_fetch(&mut self, api: &dyn MetadataApi, genre_id: u32) -> GridState {
        let command = self.toggle(genre_id);
        self.run(api, command).await
    }

    pub async fn run(&mut self, api: &dyn MetadataApi, command: DiscoveryCommand) -> GridState {
        if let DiscoveryCommand::Fetch(request) = command {
            let result = fetch(api, &request).await;
            self.apply(request.generation, result);
        }
        self.grid()
    }
}

pub async fn fetch(
    api: &dyn MetadataApi,
    request: &DiscoveryRequest,
) -> FetchResult<Vec<MovieSummary>> {
    debug!(
        genres = %request.query.with_genres(),
        generation = request.generation,
        "Discovering movies by genre"
    );
    api.discover(&request.query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            original_title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_double_toggle_restores_selection() {
        let mut selection = GenreSelection::default();
        selection.toggle(28);
        selection.toggle(12);
        let before = selection.clone();

        assert!(selection.toggle(35));
        assert!(!selection.toggle(35));
        assert_eq!(selection, before);

        assert!(!selection.toggle(28));
        assert!(selection.toggle(28));
        assert_eq!(selection.ids(), &[12, 28]);
    }

    #[test]
    fn test_empty_selection_clears_without_fetch() {
        let mut flow = DiscoveryFlow::new(None);
        let DiscoveryCommand::Fetch(request) = flow.toggle(28) else {
            panic!("expected a fetch");
        };
        assert_eq!(flow.grid(), GridState::Loading);
        flow.apply(request.generation, Ok(vec![movie(1, "Heat")]));
        assert!(matches!(flow.grid(), GridState::Populated { .. }));

        assert_eq!(flow.toggle(28), DiscoveryCommand::Clear);
        assert!(!flow.is_loading());
        assert_eq!(flow.grid(), GridState::Empty);
    }

    #[test]
    fn test_superseded_response_discarded() {
        let mut flow = DiscoveryFlow::new(None);
        let DiscoveryCommand::Fetch(first) = flow.toggle(28) else {
            panic!("expected a fetch");
        };
        let DiscoveryCommand::Fetch(second) = flow.toggle(12) else {
            panic!("expected a fetch");
        };
        assert_eq!(second.query.genres, vec![28, 12]);

        assert!(flow.apply(second.generation, Ok(vec![movie(2, "Up")])));
        // The older request lands last and must not overwrite the grid.
        assert!(!flow.apply(first.generation, Ok(vec![movie(1, "Heat")])));

        match flow.grid() {
            GridState::Populated { movies } => assert_eq!(movies[0].title, "Up"),
            other => panic!("unexpected grid {:?}", other),
        }
    }

    #[test]
    fn test_response_after_clear_discarded() {
        let mut flow = DiscoveryFlow::new(None);
        let DiscoveryCommand::Fetch(request) = flow.toggle(28) else {
            panic!("expected a fetch");
        };
        flow.toggle(28);
        assert!(!flow.apply(request.generation, Ok(vec![movie(1, "Heat")])));
        assert_eq!(flow.grid(), GridState::Empty);
    }

    #[test]
    fn test_error_state_and_precedence() {
        let mut flow = DiscoveryFlow::new(None);
        let DiscoveryCommand::Fetch(request) = flow.toggle(28) else {
            panic!("expected a fetch");
        };
        flow.apply(
            request.generation,
            Err(FetchError::Status {
                url: "u".to_string(),
                status: 500,
            }),
        );
        assert!(matches!(flow.grid(), GridState::Error { .. }));

        // A new selection goes back to loading, which hides the error.
        flow.toggle(12);
        assert_eq!(flow.grid(), GridState::Loading);
    }

    #[test]
    fn test_unrenderable_entries_skipped() {
        let mut flow = DiscoveryFlow::new(None);
        let DiscoveryCommand::Fetch(request) = flow.toggle(28) else {
            panic!("expected a fetch");
        };
        let mut nameless = movie(3, "");
        nameless.original_title.clear();
        flow.apply(request.generation, Ok(vec![nameless, movie(0, "No id")]));
        assert_eq!(flow.grid(), GridState::Empty);
    }

    #[test]
    fn test_select_dedupes() {
        let mut flow = DiscoveryFlow::new(NaiveDate::from_ymd_opt(2019, 12, 12));
        let DiscoveryCommand::Fetch(request) = flow.select([28, 12, 28]) else {
            panic!("expected a fetch");
        };
        assert_eq!(request.query.genres, vec![28, 12]);
        assert_eq!(request.query.release_date_lte, NaiveDate::from_ymd_opt(2019, 12, 12));
    }
}
