use super::FormatFunctions;
use crate::doc::Flag;
use crate::path::clean_path;
use crate::text::{strip_ansi, trim_indent};

/// Format functions for roff manpage output.
#[derive(Debug, Clone, Default)]
pub struct ManFunctions;

/// Escapes text for roff: backslashes, hyphens, and control characters at
/// the start of a line.
fn escape(input: &str) -> String {
    input
        .split('\n')
        .map(|line| {
            let escaped = line.replace('\\', "\\e").replace('-', "\\-");
            if escaped.starts_with('.') || escaped.starts_with('\'') {
                format!("\\&{escaped}")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn no_fill(input: &str) -> String {
    format!(".nf\n{}\n.fi", escape(input))
}

impl FormatFunctions for ManFunctions {
    fn format_header(&self, input: &str) -> String {
        escape(&input.to_uppercase())
    }

    fn format_text(&self, input: &str) -> String {
        escape(&strip_ansi(input))
    }

    fn format_options(&self, input: &str) -> String {
        no_fill(&strip_ansi(&trim_indent(input, 2)))
    }

    fn format_flag(&self, input: &Flag) -> String {
        escape(input.raw_usage.trim())
    }

    /// Renders a bold `name(1)` reference to the command's page.
    fn see_also_path(&self, input: &str) -> String {
        format!("\\fB{}\\fR(1)", escape(&clean_path(input)))
    }

    fn format_example(&self, input: &str) -> String {
        no_fill(&strip_ansi(&trim_indent(input, 0)))
    }

    fn format_auto_gen_tag(&self, input: &str) -> String {
        escape(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_man_escape() {
        assert_eq!(escape("a\\b"), "a\\eb");
        assert_eq!(escape("--verbose"), "\\-\\-verbose");
        assert_eq!(escape(".start\n'quote\nplain"), "\\&.start\n\\&'quote\nplain");
    }

    #[test]
    fn test_man_header_is_upper_case() {
        assert_eq!(ManFunctions.format_header("see also"), "SEE ALSO");
    }

    #[test]
    fn test_man_options_block() {
        let input = "  -h, --help   help for app\n";
        assert_eq!(
            ManFunctions.format_options(input),
            ".nf\n\\-h, \\-\\-help   help for app\n.fi"
        );
    }

    #[test]
    fn test_man_see_also_path() {
        assert_eq!(ManFunctions.see_also_path("app sub"), "\\fBapp_sub\\fR(1)");
    }

    #[test]
    fn test_man_flag_and_example() {
        let flag = Flag {
            raw_usage: "  -v, --verbose\tbe loud\n".to_string(),
            ..Default::default()
        };
        assert_eq!(ManFunctions.format_flag(&flag), "\\-v, \\-\\-verbose\tbe loud");
        assert_eq!(
            ManFunctions.format_example("app run\n\napp stop"),
            ".nf\napp run\napp stop\n.fi"
        );
    }
}
