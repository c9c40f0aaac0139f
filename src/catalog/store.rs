use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::similarity::SimilarityIndex;
use super::title::{capitalize, lookup_key};

/// How many similar titles a recommendation query returns.
pub const RECOMMENDATION_COUNT: usize = 19;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    movie_title: String,
    #[serde(default)]
    comb: String,
}

/// The movie catalog behind `/api/movies` and `/api/similarity`.
#[derive(Debug)]
pub struct Catalog {
    titles: Vec<String>,
    positions: HashMap<String, usize>,
    index: SimilarityIndex,
}

impl Catalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| CatalogError::Open(path.display().to_string(), e))?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), movies = catalog.len(), "Loaded movie catalog");
        Ok(catalog)
    }

    /// Read a CSV with `movie_title` and `comb` columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();
        for row in rdr.deserialize::<CatalogRow>() {
            let row = row?;
            entries.push((row.movie_title, row.comb));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries<I, T, F>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, F)>,
        T: Into<String>,
        F: Into<String>,
    {
        let (titles, features): (Vec<String>, Vec<String>) = entries
            .into_iter()
            .map(|(t, f)| (t.into(), f.into()))
            .unzip();

        let mut positions = HashMap::new();
        for (row, title) in titles.iter().enumerate() {
            // Duplicate titles resolve to their first row.
            positions.entry(lookup_key(title)).or_insert(row);
        }

        let index = SimilarityIndex::build(features.iter().map(String::as_str));

        Self {
            titles,
            positions,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(&lookup_key(title))
    }

    /// Every title in display form, catalog order.
    pub fn all_titles(&self) -> Vec<String> {
        self.titles.iter().map(|t| capitalize(t)).collect()
    }

    /// Titles most similar to `title`; empty for titles not in the catalog.
    pub fn recommend(&self, title: &str) -> Vec<String> {
        let Some(&row) = self.positions.get(&lookup_key(title)) else {
            debug!(title = %title, "Movie not found in catalog");
            return Vec::new();
        };

        self.index
            .most_similar(row, RECOMMENDATION_COUNT)
            .into_iter()
            .map(|i| self.titles[i].clone())
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {0}: {1}")]
    Open(String, std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] csv::Error),
}
