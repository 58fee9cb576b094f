//! Configuration for a documentation run.
//!
//! [`Options`] is built once through [`OptionsBuilder`] and validated when
//! built. [`TemplateOptions`] is the subset handed to every writer.

use crate::doc::Documentation;
use crate::error::{BoxError, DocsError, Result};
use crate::formats::Formats;
use crate::funcs::markdown::{DEFAULT_MAX_OPTION_WIDTH, MIN_OPTION_WIDTH};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Serializes a full documentation tree, e.g. to YAML or JSON bytes.
pub type MarshalFn =
    Arc<dyn Fn(&Documentation) -> std::result::Result<Vec<u8>, BoxError> + Send + Sync>;

/// Default JSON marshaler, backed by `serde_json`.
pub fn marshal_json(doc: &Documentation) -> std::result::Result<Vec<u8>, BoxError> {
    Ok(serde_json::to_vec(doc)?)
}

/// Default YAML marshaler, backed by `serde_yaml`.
pub fn marshal_yaml(doc: &Documentation) -> std::result::Result<Vec<u8>, BoxError> {
    Ok(serde_yaml::to_string(doc)?.into_bytes())
}

/// Receives the progress messages of a documentation run.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Where templates for template-driven formats come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The default templates shipped with this crate.
    Embedded,
    /// Every `**/*.tmpl` file below a directory, registered under its file name.
    Directory(PathBuf),
}

/// Options injected into each writer. Every writer receives its own copy.
#[derive(Clone, Default)]
pub struct TemplateOptions {
    pub logger: Option<Arc<dyn Logger>>,
    pub json_marshaler: Option<MarshalFn>,
    pub yaml_marshaler: Option<MarshalFn>,
    /// If true, ANSI escape sequences are stripped from Markdown body text.
    pub strip_ansi_in_markdown: bool,
    /// Width at which Markdown option blocks are wrapped.
    pub max_option_width_in_markdown: usize,
    pub templates: Option<TemplateSource>,
}

impl TemplateOptions {
    /// The options used when nothing is customized: `serde_json` and
    /// `serde_yaml` marshalers, the tracing logger, embedded templates.
    pub fn defaults() -> Self {
        TemplateOptions {
            logger: Some(Arc::new(TracingLogger)),
            json_marshaler: Some(Arc::new(marshal_json)),
            yaml_marshaler: Some(Arc::new(marshal_yaml)),
            strip_ansi_in_markdown: false,
            max_option_width_in_markdown: DEFAULT_MAX_OPTION_WIDTH,
            templates: Some(TemplateSource::Embedded),
        }
    }

    /// Checks that every option a writer may need is present and in range.
    pub fn validate(&self) -> Result<()> {
        if self.json_marshaler.is_none() {
            return Err(DocsError::Configuration("invalid json marshal provided".to_string()));
        }
        if self.yaml_marshaler.is_none() {
            return Err(DocsError::Configuration("invalid yaml marshal provided".to_string()));
        }
        if self.logger.is_none() {
            return Err(DocsError::Configuration("invalid logger provided".to_string()));
        }
        if self.templates.is_none() {
            return Err(DocsError::Configuration("invalid templates provided".to_string()));
        }
        if self.max_option_width_in_markdown < MIN_OPTION_WIDTH {
            return Err(DocsError::Configuration(format!(
                "invalid max options width in markdown provided; minimum is {MIN_OPTION_WIDTH}"
            )));
        }
        Ok(())
    }

    /// Logs `message` to the configured logger, if any.
    pub fn log(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger.log(message);
        }
    }
}

impl fmt::Debug for TemplateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateOptions")
            .field("logger", &self.logger.is_some())
            .field("json_marshaler", &self.json_marshaler.is_some())
            .field("yaml_marshaler", &self.yaml_marshaler.is_some())
            .field("strip_ansi_in_markdown", &self.strip_ansi_in_markdown)
            .field("max_option_width_in_markdown", &self.max_option_width_in_markdown)
            .field("templates", &self.templates)
            .finish()
    }
}

/// Validated options for generating documentation.
#[derive(Debug, Clone)]
pub struct Options {
    command_name: String,
    formats: Formats,
    out_dir: PathBuf,
    show_hidden_commands: bool,
    disable_user_command_options: bool,
    template_options: TemplateOptions,
}

impl Options {
    /// Starts a builder with the default command name (`docs`), format
    /// (Markdown) and output directory (`docs`).
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn formats(&self) -> Formats {
        self.formats
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn show_hidden_commands(&self) -> bool {
        self.show_hidden_commands
    }

    pub fn disable_user_command_options(&self) -> bool {
        self.disable_user_command_options
    }

    /// A copy of the options injected into writers.
    pub fn template_options(&self) -> TemplateOptions {
        self.template_options.clone()
    }

    /// Returns a copy with the user-selected run settings applied.
    ///
    /// The formats must still be valid.
    pub fn with_run_settings(
        &self,
        formats: Formats,
        out_dir: PathBuf,
        show_hidden_commands: bool,
    ) -> Result<Options> {
        if !formats.is_valid() {
            return Err(DocsError::Configuration("invalid formats selected".to_string()));
        }
        Ok(Options {
            formats,
            out_dir,
            show_hidden_commands,
            ..self.clone()
        })
    }
}

/// Builds [`Options`]. Validation happens once, in [`OptionsBuilder::build`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    command_name: String,
    formats: Formats,
    out_dir: PathBuf,
    show_hidden_commands: bool,
    disable_user_command_options: bool,
    template_options: TemplateOptions,
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        OptionsBuilder {
            command_name: "docs".to_string(),
            formats: Formats::MARKDOWN,
            out_dir: PathBuf::from("docs"),
            show_hidden_commands: false,
            disable_user_command_options: false,
            template_options: TemplateOptions::defaults(),
        }
    }
}

impl OptionsBuilder {
    /// Name of the documentation subcommand added to the host application.
    pub fn command_name(mut self, name: &str) -> Self {
        self.command_name = name.to_string();
        self
    }

    pub fn formats(mut self, formats: Formats) -> Self {
        self.formats = formats;
        self
    }

    pub fn out_dir(mut self, out: impl Into<PathBuf>) -> Self {
        self.out_dir = out.into();
        self
    }

    /// Includes hidden commands in the generated documentation.
    pub fn show_hidden_commands(mut self) -> Self {
        self.show_hidden_commands = true;
        self
    }

    /// Fixes output directory, formats and hidden-command display to the
    /// values given here instead of exposing them as subcommand flags.
    pub fn disable_user_command_options(mut self) -> Self {
        self.disable_user_command_options = true;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.template_options.logger = Some(logger);
        self
    }

    pub fn json_marshal(mut self, marshal: MarshalFn) -> Self {
        self.template_options.json_marshaler = Some(marshal);
        self
    }

    pub fn yaml_marshal(mut self, marshal: MarshalFn) -> Self {
        self.template_options.yaml_marshaler = Some(marshal);
        self
    }

    pub fn strip_ansi_in_markdown(mut self) -> Self {
        self.template_options.strip_ansi_in_markdown = true;
        self
    }

    pub fn max_option_width_in_markdown(mut self, width: usize) -> Self {
        self.template_options.max_option_width_in_markdown = width;
        self
    }

    /// Loads templates from `dir` instead of the embedded defaults.
    pub fn custom_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_options.templates = Some(TemplateSource::Directory(dir.into()));
        self
    }

    /// Replaces all writer options at once.
    pub fn template_options(mut self, options: TemplateOptions) -> Self {
        self.template_options = options;
        self
    }

    /// Validates and returns the options.
    pub fn build(self) -> Result<Options> {
        if self.command_name.is_empty() {
            return Err(DocsError::Configuration("command name can't be empty".to_string()));
        }
        if !self.formats.is_valid() {
            return Err(DocsError::Configuration(
                "invalid documentation format(s) provided".to_string(),
            ));
        }
        self.template_options.validate()?;

        Ok(Options {
            command_name: self.command_name,
            formats: self.formats,
            out_dir: self.out_dir,
            show_hidden_commands: self.show_hidden_commands,
            disable_user_command_options: self.disable_user_command_options,
            template_options: self.template_options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Command;

    fn assert_configuration_error(result: Result<Options>, expected: &str) {
        match result {
            Err(DocsError::Configuration(message)) => assert!(
                message.contains(expected),
                "unexpected message: {message}"
            ),
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_options_defaults() {
        let options = Options::builder().build().unwrap();
        assert_eq!(options.command_name(), "docs");
        assert_eq!(options.formats(), Formats::MARKDOWN);
        assert_eq!(options.out_dir(), Path::new("docs"));
        assert!(!options.show_hidden_commands());
        assert!(!options.disable_user_command_options());

        let template_options = options.template_options();
        assert_eq!(template_options.max_option_width_in_markdown, 120);
        assert!(!template_options.strip_ansi_in_markdown);
        assert_eq!(template_options.templates, Some(TemplateSource::Embedded));
    }

    #[test]
    fn test_options_builder_overrides() {
        let options = Options::builder()
            .command_name("documentation")
            .formats(Formats::YAML | Formats::JSON)
            .out_dir("out")
            .show_hidden_commands()
            .disable_user_command_options()
            .strip_ansi_in_markdown()
            .max_option_width_in_markdown(80)
            .custom_templates("templates")
            .build()
            .unwrap();
        assert_eq!(options.command_name(), "documentation");
        assert_eq!(options.formats(), Formats::YAML | Formats::JSON);
        assert_eq!(options.out_dir(), Path::new("out"));
        assert!(options.show_hidden_commands());
        assert!(options.disable_user_command_options());

        let template_options = options.template_options();
        assert!(template_options.strip_ansi_in_markdown);
        assert_eq!(template_options.max_option_width_in_markdown, 80);
        assert_eq!(
            template_options.templates,
            Some(TemplateSource::Directory(PathBuf::from("templates")))
        );
    }

    #[test]
    fn test_options_validate_command_name() {
        assert_configuration_error(
            Options::builder().command_name("").build(),
            "command name",
        );
    }

    #[test]
    fn test_options_validate_formats() {
        assert_configuration_error(
            Options::builder().formats(Formats::empty()).build(),
            "format",
        );
        assert_configuration_error(
            Options::builder().formats(Formats::from_bits(1 << 7 | 1 << 6)).build(),
            "format",
        );
        assert!(Options::builder()
            .formats(Formats::MARKDOWN | Formats::YAML)
            .build()
            .is_ok());
    }

    #[test]
    fn test_options_validate_template_options() {
        let missing_json = TemplateOptions {
            json_marshaler: None,
            ..TemplateOptions::defaults()
        };
        assert_configuration_error(
            Options::builder().template_options(missing_json).build(),
            "json",
        );

        let missing_yaml = TemplateOptions {
            yaml_marshaler: None,
            ..TemplateOptions::defaults()
        };
        assert_configuration_error(
            Options::builder().template_options(missing_yaml).build(),
            "yaml",
        );

        let missing_logger = TemplateOptions {
            logger: None,
            ..TemplateOptions::defaults()
        };
        assert_configuration_error(
            Options::builder().template_options(missing_logger).build(),
            "logger",
        );

        let missing_templates = TemplateOptions {
            templates: None,
            ..TemplateOptions::defaults()
        };
        assert_configuration_error(
            Options::builder().template_options(missing_templates).build(),
            "templates",
        );
    }

    #[test]
    fn test_options_validate_option_width() {
        assert_configuration_error(
            Options::builder().max_option_width_in_markdown(23).build(),
            "minimum is 24",
        );
        assert!(Options::builder().max_option_width_in_markdown(24).build().is_ok());
    }

    #[test]
    fn test_with_run_settings() {
        let options = Options::builder().build().unwrap();
        let run = options
            .with_run_settings(Formats::JSON, PathBuf::from("elsewhere"), true)
            .unwrap();
        assert_eq!(run.formats(), Formats::JSON);
        assert_eq!(run.out_dir(), Path::new("elsewhere"));
        assert!(run.show_hidden_commands());
        assert_eq!(options.formats(), Formats::MARKDOWN);

        assert!(options
            .with_run_settings(Formats::empty(), PathBuf::from("x"), false)
            .is_err());
    }

    #[test]
    fn test_default_marshalers() {
        let options = TemplateOptions::defaults();
        let doc = Documentation::new(Command {
            name: "app".to_string(),
            ..Default::default()
        });

        let json = (options.json_marshaler.unwrap())(&doc).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), r#"{"rootCommand":{"name":"app","hidden":false,"runnable":false}}"#);

        let yaml = (options.yaml_marshaler.unwrap())(&doc).unwrap();
        assert!(String::from_utf8(yaml).unwrap().contains("name: app"));
    }
}
