//! Writers turn a [`Documentation`] tree into files, one writer per format.
//!
//! A [`WriterRegistry`] maps each format to a factory producing a fresh
//! writer. [`WriterRegistry::generate_all`] runs every requested format in
//! the fixed order of [`Formats::ORDER`].

pub mod marshal;
pub mod template;

use crate::doc::Documentation;
use crate::error::{DocsError, Result};
use crate::formats::Formats;
use crate::options::{Options, TemplateOptions};
use std::collections::HashMap;
use std::path::Path;

pub use marshal::MarshalWriter;
pub use template::TemplateWriter;

/// Renders documentation for one output format into `out_dir`.
pub trait Writer {
    fn write(&self, out_dir: &Path, doc: &Documentation) -> Result<()>;

    /// Receives the per-run options before [`Writer::write`] is called.
    fn set_template_options(&mut self, _options: TemplateOptions) {}
}

/// Produces a fresh [`Writer`] for one format.
pub type WriterFactory = Box<dyn Fn() -> Box<dyn Writer> + Send + Sync>;

/// Maps formats to writer factories.
#[derive(Default)]
pub struct WriterRegistry {
    writers: HashMap<Formats, WriterFactory>,
}

impl WriterRegistry {
    /// Creates a registry with no writers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in writer of every format.
    pub fn with_default_writers() -> Self {
        let mut registry = Self::new();
        registry.register_writer(Formats::YAML, || Box::new(MarshalWriter::yaml()));
        registry.register_writer(Formats::JSON, || Box::new(MarshalWriter::json()));
        registry.register_writer(Formats::MARKDOWN, || Box::new(TemplateWriter::markdown()));
        registry.register_writer(Formats::MAN, || Box::new(TemplateWriter::man()));
        registry.register_writer(Formats::REST, || Box::new(TemplateWriter::rest()));
        registry
    }

    /// Associates `format` with `factory`. A later registration for the same
    /// format replaces the earlier one.
    pub fn register_writer<F>(&mut self, format: Formats, factory: F)
    where
        F: Fn() -> Box<dyn Writer> + Send + Sync + 'static,
    {
        self.writers.insert(format, Box::new(factory));
    }

    /// Looks up the factory registered for `format`.
    pub fn resolve(&self, format: Formats) -> Result<&WriterFactory> {
        self.writers
            .get(&format)
            .ok_or(DocsError::UnsupportedFormat(format))
    }

    /// Writes `documentation` in every format selected by `options`.
    ///
    /// Formats run in the order Yaml, Json, Markdown, Man, ReST regardless of
    /// how they were requested. The first failure stops the run; files
    /// already written are left in place.
    pub fn generate_all(&self, mut documentation: Documentation, options: &Options) -> Result<()> {
        let formats = options.formats();
        if !formats.is_valid() {
            return Err(DocsError::Configuration(
                "unexpected formats provided to write".to_string(),
            ));
        }

        documentation.init();

        let template_options = options.template_options();
        for format in formats.enumerate() {
            template_options.log(&format!("Generating documentation for {}", format.name()));
            let factory = self.resolve(format)?;
            let mut writer = factory();
            writer.set_template_options(template_options.clone());
            writer.write(options.out_dir(), &documentation)?;
        }
        Ok(())
    }
}

/// Writes `documentation` with the built-in writers.
pub fn write(documentation: Documentation, options: &Options) -> Result<()> {
    WriterRegistry::with_default_writers().generate_all(documentation, options)
}
