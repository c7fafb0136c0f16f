// Small text helpers shared by the normalizer, scorer and synthesizer.

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..100]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Title-case an identifier-ish string: `_` and `-` become spaces and the
/// first letter of every word is upper-cased. The rest of each word is kept
/// as-is, so `user_ID` becomes `User ID`.
pub fn title_case(raw: &str) -> String {
    raw.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Split text into trimmed sentences on `.`, `!` and `?`.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whitespace-separated token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("product_name"), "Product Name");
        assert_eq!(title_case("long-form-text"), "Long Form Text");
        assert_eq!(title_case("title"), "Title");
        assert_eq!(title_case("__x__"), "X");
    }

    #[test]
    fn test_sentences() {
        let s = sentences("One. Two!  Three?four");
        assert_eq!(s, vec!["One", "Two", "Three", "four"]);
        assert!(sentences("").is_empty());
    }
}
