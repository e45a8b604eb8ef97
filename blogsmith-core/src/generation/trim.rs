//! Mechanical trimming to a hard word maximum

use crate::seo::metrics::word_count;

/// Share of the truncated text after which a period is an acceptable cut
const SENTENCE_CUT_RATIO: f64 = 0.8;

/// Trim `text` to at most `limit` words.
///
/// Keeps the original formatting of the retained words. When a period
/// falls in the last fifth of the truncated text, the cut moves back to it
/// so the post ends on a full sentence. Returns the text and whether it was
/// trimmed.
pub fn trim_to_word_limit(text: &str, limit: u32) -> (String, bool) {
    let limit = limit as usize;
    if word_count(text) <= limit {
        return (text.to_string(), false);
    }

    let end = end_of_nth_word(text, limit);
    let truncated = &text[..end];

    let cut = match truncated.rfind('.') {
        Some(idx) if idx as f64 > truncated.len() as f64 * SENTENCE_CUT_RATIO => &truncated[..=idx],
        _ => truncated,
    };

    (cut.trim_end().to_string(), true)
}

/// Byte offset just past the `n`-th whitespace-separated word
fn end_of_nth_word(text: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }

    let mut words = 0;
    let mut in_word = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                words += 1;
                if words == n {
                    return idx;
                }
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(count: usize, words_each: usize) -> String {
        (0..count)
            .map(|i| {
                let mut words: Vec<String> = (0..words_each).map(|w| format!("w{i}x{w}")).collect();
                if let Some(last) = words.last_mut() {
                    last.push('.');
                }
                words.join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_under_limit_unchanged() {
        let text = "# Title\n\nShort body here.";
        assert_eq!(trim_to_word_limit(text, 500), (text.to_string(), false));
    }

    #[test]
    fn test_trim_600_to_500_on_sentence_boundary() {
        // 60 sentences of 10 words: the 500th word ends sentence 50
        let text = sentences(60, 10);
        assert_eq!(word_count(&text), 600);

        let (trimmed, was_trimmed) = trim_to_word_limit(&text, 500);
        assert!(was_trimmed);
        assert_eq!(word_count(&trimmed), 500);
        assert!(trimmed.ends_with('.'));
    }

    #[test]
    fn test_trim_backs_up_to_recent_period() {
        // 7-word sentences: word 500 falls mid-sentence, last period at word 497
        let text = sentences(90, 7);
        let (trimmed, was_trimmed) = trim_to_word_limit(&text, 500);
        assert!(was_trimmed);
        assert_eq!(word_count(&trimmed), 497);
        assert!(trimmed.ends_with('.'));
    }

    #[test]
    fn test_trim_without_nearby_period() {
        let text = format!("Intro sentence. {}", vec!["word"; 50].join(" "));
        let (trimmed, was_trimmed) = trim_to_word_limit(&text, 20);
        assert!(was_trimmed);
        assert_eq!(word_count(&trimmed), 20);
        assert!(trimmed.ends_with("word"));
    }

    #[test]
    fn test_formatting_preserved() {
        let text = "# Heading\n\nOne two three.\n\n## Next\n\nfour five six seven";
        let (trimmed, _) = trim_to_word_limit(text, 5);
        assert_eq!(trimmed, "# Heading\n\nOne two three.");

        let (trimmed, _) = trim_to_word_limit(text, 9);
        assert_eq!(trimmed, "# Heading\n\nOne two three.\n\n## Next\n\nfour five");
    }
}
