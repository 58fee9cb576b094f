use crate::formats::Formats;
use thiserror::Error;

/// Boxed error type returned by injected marshal functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Represents errors that can occur while generating documentation.
#[derive(Error, Debug)]
pub enum DocsError {
    /// Invalid or incomplete options, reported before any rendering begins.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A template could not be parsed.
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// A template failed while rendering a command or the index.
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// An injected marshal function failed.
    #[error("Marshal error: {0}")]
    Marshal(#[source] BoxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid template pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unable to read template: {0}")]
    Glob(#[from] glob::GlobError),

    /// A requested format has no registered writer.
    #[error("missing output writer for format {0}")]
    UnsupportedFormat(Formats),
}

pub type Result<T> = std::result::Result<T, DocsError>;
