//! Greedy word wrapping for caption text.
//!
//! Lines are packed by character count, not by measured pixel width, so the
//! break points of a caption depend only on its text and the template limit.

/// Split `text` into lines of at most `max_chars` characters.
///
/// Words are separated by spaces; runs of spaces collapse. A word longer than
/// the limit is never split and lands on a line of its own. The result always
/// holds at least one line (an empty caption yields a single empty line).
/// A limit of zero places every word on its own line.
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    // Untrimmed accumulator: it carries a leading space after the first append,
    // and only the trimmed form is ever measured or emitted.
    let mut current = String::new();

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let candidate_len = format!("{current} {word}").trim().chars().count();
        if max_chars > 0 && candidate_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            let finished = current.trim();
            if !finished.is_empty() {
                lines.push(finished.to_string());
            }
            current = word.to_string();
        }
    }

    lines.push(current.trim().to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPTION: &str = "1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs";

    #[test]
    fn test_default_caption_breaks() {
        assert_eq!(
            wrap_lines(CAPTION, 31),
            vec!["1 & 2 BHK Luxury Apartments at", "just Rs.34.97 Lakhs"]
        );
    }

    #[test]
    fn test_empty_text_gives_one_empty_line() {
        assert_eq!(wrap_lines("", 10), vec![String::new()]);
        assert_eq!(wrap_lines("    ", 10), vec![String::new()]);
    }

    #[test]
    fn test_long_word_is_not_split() {
        assert_eq!(
            wrap_lines("supercalifragilisticexpialidocious", 5),
            vec!["supercalifragilisticexpialidocious"]
        );
        assert_eq!(
            wrap_lines("go supercalifragilisticexpialidocious now", 5),
            vec!["go", "supercalifragilisticexpialidocious", "now"]
        );
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        assert_eq!(wrap_lines("abc def", 7), vec!["abc def"]);
        assert_eq!(wrap_lines("abc def", 6), vec!["abc", "def"]);
    }

    #[test]
    fn test_repeated_spaces_collapse() {
        assert_eq!(
            wrap_lines("  Shop   the   new   range  ", 12),
            vec!["Shop the new", "range"]
        );
    }

    #[test]
    fn test_zero_limit_is_one_word_per_line() {
        assert_eq!(wrap_lines("a bb ccc", 0), vec!["a", "bb", "ccc"]);
        assert_eq!(wrap_lines("", 0), vec![String::new()]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(wrap_lines("₹34 लाख", 7), vec!["₹34 लाख"]);
    }

    #[test]
    fn test_lines_respect_limit_and_keep_words() {
        let texts = [
            CAPTION,
            "Luxury living at the heart of the city with world class amenities",
            "a b c d e f g h i j k l m n o p",
            "Rs.34.97 Lakhs onwards | Possession 2026 | RERA approved",
        ];
        for text in texts {
            for max in 1..40 {
                let lines = wrap_lines(text, max);
                for line in &lines {
                    let len = line.chars().count();
                    assert!(
                        len <= max || !line.contains(' '),
                        "line {line:?} exceeds {max} and is not a single word"
                    );
                }
                let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
                let original: Vec<&str> = text.split(' ').filter(|w| !w.is_empty()).collect();
                assert_eq!(rejoined, original);
            }
        }
    }
}
