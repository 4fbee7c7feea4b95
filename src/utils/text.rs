use console::measure_text_width;

/// Wrap text into lines no wider than `max_width` terminal columns, breaking at
/// spaces where possible.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_width = if current.is_empty() {
            measure_text_width(word)
        } else {
            measure_text_width(&current) + 1 + measure_text_width(word)
        };

        if candidate_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // Word longer than a whole line: hard-split it
        let mut chunk = String::new();
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            if measure_text_width(&chunk) + measure_text_width(ch.encode_utf8(&mut buf)) > max_width
            {
                lines.push(std::mem::take(&mut chunk));
            }
            chunk.push(ch);
        }
        current = chunk;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shorten long references (data URIs run to megabytes) for display.
pub fn abbreviate(reference: &str, max_chars: usize) -> String {
    let count = reference.chars().count();
    if count <= max_chars || max_chars < 5 {
        return reference.to_string();
    }
    let keep = max_chars - 3;
    let head: String = reference.chars().take(keep * 2 / 3).collect();
    let tail: String = reference.chars().skip(count - (keep - keep * 2 / 3)).collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_spaces() {
        let lines = wrap_text("Sear the chicken in olive oil until golden", 16);
        assert_eq!(lines, vec!["Sear the chicken", "in olive oil", "until golden"]);
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn counts_wide_characters_as_two_columns() {
        let lines = wrap_text("豆腐 味噌", 4);
        assert_eq!(lines, vec!["豆腐", "味噌"]);
    }

    #[test]
    fn abbreviates_long_references() {
        let uri = format!("data:image/png;base64,{}", "A".repeat(500));
        let short = abbreviate(&uri, 40);
        assert_eq!(short.chars().count(), 40);
        assert!(short.starts_with("data:image/png"));
        assert!(short.contains("..."));
        assert_eq!(abbreviate("https://x.y/z.png", 40), "https://x.y/z.png");
    }
}
