use serde::Serialize;

const SEARCH_PREFIX: &str = "/search/";

/// Client-side routes. The title is the only routing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "title", rename_all = "snake_case")]
pub enum Route {
    Search(String),
}

impl Route {
    pub fn search(title: impl Into<String>) -> Self {
        Route::Search(title.into())
    }

    pub fn path(&self) -> String {
        match self {
            Route::Search(title) => format!("{}{}", SEARCH_PREFIX, urlencoding::encode(title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_encodes_title() {
        let route = Route::search("Amélie: The Movie?");
        assert_eq!(route.path(), "/search/Am%C3%A9lie%3A%20The%20Movie%3F");
    }

    #[test]
    fn test_path_encodes_slash() {
        assert_eq!(Route::search("AC/DC").path(), "/search/AC%2FDC");
    }
}
