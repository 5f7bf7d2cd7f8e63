use crate::models::Author;

/// Case-insensitive substring test on an author name.
///
/// A blank `text` matches every name. Otherwise `text` is matched as given,
/// whitespace included.
pub fn name_matches(name: &str, text: &str) -> bool {
    text.trim().is_empty() || fold_case(name).contains(&fold_case(text))
}

// Per-character lowering, so context-sensitive rules such as the Greek final
// sigma treat a needle the same way as the name it occurs in.
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

pub fn filter_by_name(authors: Vec<Author>, text: &str) -> Vec<Author> {
    if text.trim().is_empty() {
        return authors;
    }

    authors
        .into_iter()
        .filter(|author| name_matches(author.name().as_str(), text))
        .collect()
}
