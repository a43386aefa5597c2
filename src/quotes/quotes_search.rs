use super::quotes_model::Quote;

/// Client-side search over text, author, category name, and tags.
/// Case-insensitive substring match; a blank query matches everything.
pub fn filter_quotes(quotes: &[Quote], query: &str) -> Vec<Quote> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return quotes.to_vec();
    }

    quotes
        .iter()
        .filter(|quote| {
            quote.text.to_lowercase().contains(&needle)
                || quote.author.to_lowercase().contains(&needle)
                || quote
                    .category
                    .as_ref()
                    .map(|category| category.to_lowercase().contains(&needle))
                    .unwrap_or(false)
                || quote.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
