use std::sync::LazyLock;

use regex::Regex;

/// OCR debris seen before the real sentence: list numbering, periods,
/// angle/square brackets and all-caps tags such as `[WISDOM]`
static NOISE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s0-9.<>\[\]A-Z]+").expect("valid noise pattern"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[:\s]*").expect("valid separator pattern"));

/// Strip leading OCR noise from a recognised line
///
/// Interior text is left untouched. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();

    loop {
        let strip = leading_noise_len(text);
        if strip == 0 {
            break;
        }
        text = &text[strip..];
    }

    text.to_string()
}

/// Byte length of the leading noise run plus its separator, 0 if none
fn leading_noise_len(text: &str) -> usize {
    let Some(run) = NOISE_RUN.find(text) else {
        return 0;
    };

    let mut end = run.end();

    // A run that runs straight into a word has swallowed that word's capital
    let followed_by_content = text[end..]
        .chars()
        .next()
        .is_some_and(|c| c != ':' && !c.is_whitespace());
    if followed_by_content {
        end = text[..end]
            .trim_end_matches(|c: char| c.is_ascii_uppercase())
            .len();
    }

    if end == 0 {
        return 0;
    }

    let separator = SEPARATOR.find(&text[end..]).map_or(0, |m| m.end());
    end + separator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_numbering_and_tag() {
        assert_eq!(normalize("12. [WISDOM] Hello there."), "Hello there.");
    }

    #[test]
    fn test_strips_repeated_prefixes() {
        assert_eq!(normalize("  3. <ILLITHID> [INT]: You see it.  "), "You see it.");
        assert_eq!(normalize("[ILLITHID]: Run."), "Run.");
        assert_eq!(normalize("12.Hello"), "Hello");
    }

    #[test]
    fn test_keeps_plain_sentences() {
        assert_eq!(normalize("Hello there."), "Hello there.");
        assert_eq!(normalize("hello"), "hello");
        assert_eq!(normalize("你好。"), "你好。");
    }

    #[test]
    fn test_interior_text_untouched() {
        assert_eq!(normalize("1. Take 12 [GOLD] now"), "Take 12 [GOLD] now");
    }

    #[test]
    fn test_all_noise_becomes_empty() {
        assert_eq!(normalize("12. [WISDOM]"), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_leading_caps_word_is_a_tag() {
        assert_eq!(normalize("NPC: what now?"), "what now?");
        assert_eq!(normalize("HEllo"), "HEllo");
    }

    #[test]
    fn test_zero_length_match_stops() {
        assert_eq!(leading_noise_len("Hello"), 0);
        assert_eq!(leading_noise_len("hello"), 0);
        assert_eq!(leading_noise_len(""), 0);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "12. [WISDOM] Hello there.",
            "  <1> ::  [A] B c",
            "A",
            "I am here",
            "ABC:def",
            "12.5% off",
            "\t42\n[X]:\tText with  spaces  ",
            "]]]>>><<<...",
            "Ünïcödé [TAG] stays",
            "[TAG]HEllo",
            ": leading colon",
        ];

        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }
}
