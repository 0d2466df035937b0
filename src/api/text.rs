/// Read time reported when an article has no usable body.
pub const DEFAULT_READ_TIME_MINUTES: i64 = 5;

/// Strip HTML tags, keeping the text between them. Not a full parser; good
/// enough for word counting over CMS-authored article bodies.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tag boundaries separate words ("...text</p><p>more...")
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in minutes: words / wpm, rounded up, minimum 1.
/// Empty or missing content yields the default.
pub fn read_time_minutes(content: Option<&str>, wpm: u32) -> i64 {
    let words = match content {
        Some(c) if !c.trim().is_empty() => word_count(&strip_html(c)),
        _ => return DEFAULT_READ_TIME_MINUTES,
    };

    let wpm = wpm.max(1) as usize;
    (((words + wpm - 1) / wpm) as i64).max(1)
}

/// Short plain-text excerpt for list views, truncated on a char boundary
/// with an ellipsis.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let plain = strip_html(content);
    let trimmed: String = plain.split_whitespace().collect::<Vec<_>>().join(" ");

    if trimmed.chars().count() <= max_chars {
        return trimmed;
    }

    let cut: String = trimmed.chars().take(max_chars).collect();
    // Back off to the last space so we never cut mid-word
    match cut.rfind(' ') {
        Some(idx) => format!("{}…", &cut[..idx]),
        None => format!("{}…", cut),
    }
}

/// Escape HTML-significant characters and truncate to a bounded length.
/// Used on free-text input (lead messages, comments, aliases) before it is
/// stored.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let escaped: String = input
        .trim()
        .chars()
        .flat_map(|c| match c {
            '<' => "&lt;".chars().collect::<Vec<_>>(),
            '>' => "&gt;".chars().collect(),
            '&' => "&amp;".chars().collect(),
            '"' => "&quot;".chars().collect(),
            '\'' => "&#39;".chars().collect(),
            _ => vec![c],
        })
        .collect();

    escaped.chars().take(max_chars).collect()
}

/// Cheap shape check for email input. Deliverability is not our problem;
/// this only rejects obvious garbage before it reaches storage.
pub fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_text() {
        let html = "<p>Hola <strong>mundo</strong></p>";
        let plain = strip_html(html);
        assert_eq!(plain.split_whitespace().collect::<Vec<_>>(), vec!["Hola", "mundo"]);
    }

    #[test]
    fn thousand_words_reads_in_five_minutes() {
        let body = vec!["palabra"; 1000].join(" ");
        assert_eq!(read_time_minutes(Some(&body), 200), 5);
    }

    #[test]
    fn empty_content_uses_default() {
        assert_eq!(read_time_minutes(None, 200), DEFAULT_READ_TIME_MINUTES);
        assert_eq!(read_time_minutes(Some("   "), 200), DEFAULT_READ_TIME_MINUTES);
    }

    #[test]
    fn short_content_is_at_least_one_minute() {
        assert_eq!(read_time_minutes(Some("hola mundo"), 200), 1);
    }

    #[test]
    fn partial_minute_rounds_up() {
        let body = vec!["palabra"; 201].join(" ");
        assert_eq!(read_time_minutes(Some(&body), 200), 2);
    }

    #[test]
    fn excerpt_cuts_on_word_boundary() {
        let text = "uno dos tres cuatro cinco";
        let e = excerpt(text, 12);
        assert_eq!(e, "uno dos…");
    }

    #[test]
    fn excerpt_returns_short_text_unchanged() {
        assert_eq!(excerpt("hola mundo", 50), "hola mundo");
    }

    #[test]
    fn email_shape_check() {
        assert!(plausible_email("ana@example.com"));
        assert!(!plausible_email("not-an-email"));
        assert!(!plausible_email("@example.com"));
        assert!(!plausible_email("ana@localhost"));
        assert!(!plausible_email("ana@.com"));
    }

    #[test]
    fn sanitize_escapes_and_truncates() {
        let s = sanitize_text("  <script>alert('x')</script>  ", 500);
        assert!(!s.contains('<'));
        assert!(s.starts_with("&lt;script&gt;"));

        let long = "a".repeat(100);
        assert_eq!(sanitize_text(&long, 10).chars().count(), 10);
    }
}
