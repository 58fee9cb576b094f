pub mod cli;
pub mod doc;
pub mod error;
pub mod formats;
pub mod from_clap;
pub mod funcs;
pub mod options;
pub mod path;
pub mod text;
pub mod writer;

use formats::Formats;

/// Names of all output formats, in generation order.
pub fn get_format_names() -> Vec<String> {
    Formats::ORDER.iter().map(|f| f.name()).collect()
}
