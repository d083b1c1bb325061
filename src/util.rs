/// Display label for a card: its title, or the id when untitled, cut to
/// `max_chars` with an ellipsis.
pub fn short_title(title: &str, id: &str, max_chars: usize) -> String {
    let text = if title.trim().is_empty() {
        id
    } else {
        title.trim()
    };

    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut shortened = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    shortened.push('…');
    shortened
}

/// Parses a comma separated tag list, dropping blanks.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_title_falls_back_to_id_and_truncates() {
        assert_eq!(short_title("  ", "card-9", 10), "card-9");
        assert_eq!(short_title("Pricing", "card-9", 10), "Pricing");
        assert_eq!(short_title("A very long card title", "x", 8), "A very …");
    }

    #[test]
    fn tag_list_ignores_blanks() {
        assert_eq!(parse_tag_list(" ux, ,pricing,"), vec!["ux", "pricing"]);
        assert!(parse_tag_list("").is_empty());
    }
}
