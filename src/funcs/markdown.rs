use super::FormatFunctions;
use crate::doc::Flag;
use crate::path::clean_path;
use crate::text::{hanging_indent, strip_ansi, trim_indent};

/// Default maximum width of the options block.
pub const DEFAULT_MAX_OPTION_WIDTH: usize = 120;
/// Smallest accepted maximum width of the options block.
pub const MIN_OPTION_WIDTH: usize = 24;

/// Outer indentation removed from each flag usage line.
const OPTIONS_OUTDENT: usize = 2;

/// Format functions for Markdown/CommonMark output.
#[derive(Debug, Clone)]
pub struct MarkdownFunctions {
    /// If true, ANSI escape sequences are removed from body text.
    pub strip_ansi: bool,
    /// Lines of the options block are wrapped at this width.
    pub max_option_width: usize,
}

impl Default for MarkdownFunctions {
    fn default() -> Self {
        MarkdownFunctions {
            strip_ansi: false,
            max_option_width: DEFAULT_MAX_OPTION_WIDTH,
        }
    }
}

/// Finds the column where flag descriptions begin: the first character that
/// follows two or more spaces and is neither a space nor a dash.
fn description_column(input: &str) -> usize {
    let chars: Vec<char> = input.chars().collect();
    let mut spaces = 0;
    for (i, c) in chars.iter().enumerate() {
        if *c == ' ' {
            spaces += 1;
            continue;
        }
        if spaces >= 2 && *c != '-' {
            return i;
        }
        spaces = 0;
    }
    0
}

impl FormatFunctions for MarkdownFunctions {
    fn format_header(&self, input: &str) -> String {
        input.to_string()
    }

    fn format_text(&self, input: &str) -> String {
        if self.strip_ansi {
            strip_ansi(input)
        } else {
            input.to_string()
        }
    }

    /// Removes the outer indent of a flag usage block, then wraps each line
    /// with continuation lines aligned to the description column.
    fn format_options(&self, input: &str) -> String {
        let left_aligned = trim_indent(input, OPTIONS_OUTDENT);
        let column = description_column(&left_aligned);
        // a column at the wrap width leaves no room for any continuation text
        let hang = if column + 1 >= self.max_option_width { 0 } else { column };

        left_aligned
            .lines()
            .map(|line| hanging_indent(line, hang, self.max_option_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_flag(&self, input: &Flag) -> String {
        input
            .raw_usage
            .strip_suffix('\n')
            .unwrap_or(&input.raw_usage)
            .to_string()
    }

    fn see_also_path(&self, input: &str) -> String {
        clean_path(input)
    }

    /// Wraps an example in exactly one fenced code block, whether or not the
    /// input already carries fences.
    fn format_example(&self, input: &str) -> String {
        let block = input.strip_suffix("\n```").unwrap_or(input);
        let block = block.strip_prefix("```\n").unwrap_or(block);
        let inline = block.strip_suffix("```").unwrap_or(block);
        let inline = inline.strip_prefix("```").unwrap_or(inline);
        format!("```\n{inline}\n```")
    }

    fn format_auto_gen_tag(&self, input: &str) -> String {
        input.to_string()
    }
}
