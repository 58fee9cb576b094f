//! Text layout helpers shared by the format functions.

use regex::Regex;
use std::sync::LazyLock;

static ANSI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x1b\x{9b}][\[\]()#;?]*(?:(?:(?:[a-zA-Z\d]*(?:;[a-zA-Z\d]*)*)?\x07)|(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PRZcf-ntqry=><~]))",
    )
    .expect("valid ansi pattern")
});

/// Removes ANSI escape sequences (colors, cursor movement, OSC links) from `input`.
pub fn strip_ansi(input: &str) -> String {
    ANSI_REGEX.replace_all(input, "").into_owned()
}

/// Wraps `input` at word boundaries so no line exceeds `max_width` characters.
///
/// Every line after the first is prefixed with `hang_width` spaces. Embedded
/// newlines are kept as hard breaks and are followed by the same indent.
/// Widths are counted in characters. Words longer than the available width
/// are never split.
///
/// # Arguments
///
/// * `input` - A single logical line of text.
/// * `hang_width` - Number of spaces to indent continuation lines.
/// * `max_width` - Target line width, including the indent.
pub fn hanging_indent(input: &str, hang_width: usize, max_width: usize) -> String {
    if input.chars().count() == max_width {
        return input.to_string();
    }

    let indent = " ".repeat(hang_width);
    let continued = max_width as isize - 1 - hang_width as isize;

    let mut buf = String::with_capacity(input.len());
    let mut word = String::new();
    let mut available = max_width as isize - 1;
    // byte offset in `buf` where the current output line's text begins
    let mut line_start = 0usize;

    let break_line = |buf: &mut String, line_start: &mut usize| {
        let mut kept = buf.trim_end_matches([' ', '\t']).len().max(*line_start);
        // an empty continuation line keeps no indent
        if kept == *line_start && *line_start > 0 {
            kept -= indent.len();
        }
        buf.truncate(kept);
        buf.push('\n');
        buf.push_str(&indent);
        *line_start = buf.len();
    };

    for ch in input.trim_end_matches(' ').chars() {
        if ch == '\n' {
            buf.push_str(&word);
            word.clear();
            break_line(&mut buf, &mut line_start);
            available = continued;
            continue;
        }

        if ch.is_whitespace() {
            if word.is_empty() {
                word.push(ch);
            } else {
                buf.push_str(&word);
                word.clear();
                buf.push(ch);
            }
            available -= 1;
            continue;
        }

        if available <= 1 && buf.len() > line_start {
            break_line(&mut buf, &mut line_start);
            available = continued;
        }
        word.push(ch);
        available -= 1;
    }

    buf.push_str(&word);
    buf
}

/// Drops empty lines and removes up to `max` leading whitespace characters
/// from every remaining line. Lines left empty afterwards are dropped too.
pub fn trim_indent(input: &str, max: usize) -> String {
    input
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| {
            let skip: usize = line
                .chars()
                .take(max)
                .take_while(|c| c.is_whitespace())
                .map(char::len_utf8)
                .sum();
            &line[skip..]
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hanging_indent_short_line() {
        assert_eq!(
            hanging_indent("single line below max width", 15, 30),
            "single line below max width"
        );
    }

    #[test]
    fn test_hanging_indent_exact_width_is_unchanged() {
        let input = "exactly twenty chars";
        assert_eq!(input.len(), 20);
        assert_eq!(hanging_indent(input, 4, 20), input);
    }

    #[test]
    fn test_hanging_indent_multi_line_short() {
        assert_eq!(
            hanging_indent("The quick brown fox jumped over the lazy dog", 6, 18),
            "The quick brown\n      fox jumped\n      over the\n      lazy dog"
        );
    }

    #[test]
    fn test_hanging_indent_flag_column() {
        let input = "-s, --supported         Set to try and demonstrate some other boolean flag, but this one with is written with a short option (default true)";
        assert_eq!(
            hanging_indent(input, 24, 120),
            "-s, --supported         Set to try and demonstrate some other boolean flag, but this one with is written with a short\n                        option (default true)"
        );
    }

    #[test]
    fn test_hanging_indent_leading_spaces() {
        let input = "      --config string   config file which we would like to do something with as an example of how this will display when way too long (default is $HOME/.sample.yaml)";
        assert_eq!(
            hanging_indent(input, 24, 60),
            "      --config string   config file which we would like to\n                        do something with as an example of\n                        how this will display when way too\n                        long (default is\n                        $HOME/.sample.yaml)"
        );
    }

    #[test]
    fn test_hanging_indent_keeps_hard_breaks() {
        assert_eq!(hanging_indent("first   \nsecond", 2, 40), "first\n  second");
        assert_eq!(hanging_indent("one\ntwo\nthree", 4, 40), "one\n    two\n    three");
    }

    #[test]
    fn test_hanging_indent_blank_lines_carry_no_indent() {
        assert_eq!(hanging_indent("word\n\nx", 2, 40), "word\n\n  x");
        assert_eq!(hanging_indent("a\n   \n\nb", 3, 40), "a\n\n\n   b");
    }

    #[test]
    fn test_hanging_indent_strips_trailing_spaces() {
        assert_eq!(hanging_indent("trailing   ", 2, 40), "trailing");
    }

    #[test]
    fn test_hanging_indent_is_deterministic() {
        let input = "The quick brown fox jumped over the lazy dog";
        assert_eq!(hanging_indent(input, 3, 12), hanging_indent(input, 3, 12));
    }

    #[test]
    fn test_trim_indent() {
        assert_eq!(trim_indent("    a\n\n      b\n", 2), "  a\n    b");
        assert_eq!(trim_indent("  a\n   \n b", 4), "a\nb");
        assert_eq!(trim_indent("  a\n\n b", 0), "  a\n b");
        assert_eq!(trim_indent("\n\n", 2), "");
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m text"), "red text");
        assert_eq!(strip_ansi("\x1b[1;4mbold underline\x1b[m"), "bold underline");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
