/// Display form of a catalog title: first character upper-cased, the rest
/// lower-cased ("the dark knight" -> "The dark knight").
pub fn capitalize(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Key used to look a title up in the catalog.
pub fn lookup_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("the dark knight"), "The dark knight");
        assert_eq!(capitalize("AVATAR"), "Avatar");
        assert_eq!(capitalize("2001: a space odyssey"), "2001: a space odyssey");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key("  The Dark Knight "), "the dark knight");
    }
}
