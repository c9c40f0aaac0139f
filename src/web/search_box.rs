use super::route::Route;

/// How many suggestions are shown under the input.
pub const MAX_SUGGESTIONS: usize = 10;

/// Incremental-filter search input over a fixed list of known titles.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    candidates: Vec<String>,
    placeholder: String,
    input: String,
    filtered: Vec<String>,
    not_found: bool,
}

impl SearchBox {
    pub fn new(candidates: Vec<String>, placeholder: impl Into<String>) -> Self {
        Self {
            candidates,
            placeholder: placeholder.into(),
            ..Default::default()
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn titles(&self) -> &[String] {
        &self.candidates
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn not_found(&self) -> bool {
        self.not_found
    }

    /// Every candidate matching the current input, in candidate order.
    pub fn matches(&self) -> &[String] {
        &self.filtered
    }

    /// The matches that are actually displayed.
    pub fn suggestions(&self) -> &[String] {
        &self.filtered[..self.filtered.len().min(MAX_SUGGESTIONS)]
    }

    /// Replace the input text and refilter.
    pub fn input(&mut self, text: &str) {
        let text = text.trim();
        self.input = text.to_string();
        self.not_found = false;

        if text.is_empty() {
            self.filtered.clear();
            return;
        }

        let needle = text.to_lowercase();
        self.filtered = self
            .candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    pub fn key_press(&mut self, key: &str) -> Option<Route> {
        if key == "Enter" {
            self.submit()
        } else {
            None
        }
    }

    /// Navigate to the exact (case-insensitive) match of the input, using the
    /// canonical casing of the candidate list. Sets `not_found` otherwise.
    pub fn submit(&mut self) -> Option<Route> {
        if self.input.is_empty() {
            self.not_found = true;
            return None;
        }

        let wanted = self.input.to_lowercase();
        match self.candidates.iter().find(|c| c.to_lowercase() == wanted) {
            Some(title) => Some(Route::search(title.clone())),
            None => {
                self.not_found = true;
                None
            }
        }
    }

    /// Clicking a suggestion navigates straight to it.
    pub fn select(&self, suggestion: &str) -> Route {
        Route::search(suggestion)
    }
}
