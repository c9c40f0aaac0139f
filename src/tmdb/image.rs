pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w1280";
pub const PROFILE_SIZE: &str = "original";

/// Resolve an image path fragment against the image base. A missing or empty
/// fragment yields an empty reference rather than a dangling base URL.
pub fn image_url(base: &str, size: &str, fragment: Option<&str>) -> String {
    match fragment.map(str::trim) {
        Some(path) if !path.is_empty() => {
            let base = base.trim_end_matches('/');
            if path.starts_with('/') {
                format!("{}/{}{}", base, size, path)
            } else {
                format!("{}/{}/{}", base, size, path)
            }
        }
        _ => String::new(),
    }
}

pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}

pub fn wikipedia_url(name: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", urlencoding::encode(name))
}
