use super::FormatFunctions;
use crate::doc::Flag;
use crate::path::clean_path;
use crate::text::{strip_ansi, trim_indent};

const INDENT: &str = "  ";

/// Format functions for reStructuredText output.
#[derive(Debug, Clone, Default)]
pub struct RestFunctions;

impl RestFunctions {
    /// Re-indents every line by exactly two spaces, replacing whatever
    /// leading whitespace it had. Whitespace-only lines become empty.
    fn indented(input: &str) -> String {
        input
            .split('\n')
            .map(|line| {
                let content = line.trim_start();
                if content.is_empty() {
                    String::new()
                } else {
                    format!("{INDENT}{content}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FormatFunctions for RestFunctions {
    fn format_header(&self, input: &str) -> String {
        input.replace(' ', "_")
    }

    fn format_text(&self, input: &str) -> String {
        strip_ansi(input)
    }

    fn format_options(&self, input: &str) -> String {
        Self::indented(input)
    }

    fn format_flag(&self, input: &Flag) -> String {
        Self::indented(&input.usage)
    }

    /// Renders an inline hyperlink to the command's `.rst` page.
    fn see_also_path(&self, input: &str) -> String {
        format!("`{input} <{}.rst>`_", clean_path(input))
    }

    fn format_example(&self, input: &str) -> String {
        Self::indented(&trim_indent(input, 0))
    }

    fn format_auto_gen_tag(&self, input: &str) -> String {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rest_header() {
        assert_eq!(RestFunctions.format_header("app sub command"), "app_sub_command");
    }

    #[test]
    fn test_rest_text_always_strips_ansi() {
        assert_eq!(RestFunctions.format_text("\x1b[1mbold\x1b[0m"), "bold");
    }

    #[test]
    fn test_rest_options_indent() {
        let input = "  -h, --help   help for app\n      --name string   a name";
        assert_eq!(
            RestFunctions.format_options(input),
            "  -h, --help   help for app\n  --name string   a name"
        );
    }

    #[test]
    fn test_rest_indent_skips_blank_lines() {
        assert_eq!(RestFunctions::indented("a\n   \n\tb"), "  a\n\n  b");
        assert_eq!(RestFunctions::indented(""), "");
    }

    #[test]
    fn test_rest_flag_uses_usage_text() {
        let flag = Flag {
            usage: "enables verbose output".to_string(),
            raw_usage: "  -v, --verbose   enables verbose output".to_string(),
            ..Default::default()
        };
        assert_eq!(RestFunctions.format_flag(&flag), "  enables verbose output");
    }

    #[test]
    fn test_rest_see_also_path() {
        assert_eq!(
            RestFunctions.see_also_path("app sub"),
            "`app sub <app_sub.rst>`_"
        );
    }

    #[test]
    fn test_rest_example_drops_empty_lines() {
        assert_eq!(
            RestFunctions.format_example("app run\n\n    app stop\n"),
            "  app run\n  app stop"
        );
    }
}
