use super::Writer;
use crate::doc::Documentation;
use crate::error::{DocsError, Result};
use crate::formats::Formats;
use crate::options::{MarshalFn, TemplateOptions};
use crate::path::clean_path;
use std::fs;
use std::path::Path;

/// Serializes the whole documentation tree into a single file.
pub struct MarshalWriter {
    format: Formats,
    file_extension: &'static str,
    select: fn(&TemplateOptions) -> Option<MarshalFn>,
    options: TemplateOptions,
}

impl MarshalWriter {
    /// Writes `{root}.yml` with the configured YAML marshaler.
    pub fn yaml() -> Self {
        MarshalWriter {
            format: Formats::YAML,
            file_extension: "yml",
            select: |options| options.yaml_marshaler.clone(),
            options: TemplateOptions::default(),
        }
    }

    /// Writes `{root}.json` with the configured JSON marshaler.
    pub fn json() -> Self {
        MarshalWriter {
            format: Formats::JSON,
            file_extension: "json",
            select: |options| options.json_marshaler.clone(),
            options: TemplateOptions::default(),
        }
    }
}

impl Writer for MarshalWriter {
    fn write(&self, out_dir: &Path, doc: &Documentation) -> Result<()> {
        let marshal = (self.select)(&self.options).ok_or_else(|| {
            DocsError::Configuration(format!("invalid {} marshal provided", self.format.name()))
        })?;
        let bytes = marshal(doc).map_err(DocsError::Marshal)?;

        let name = clean_path(&doc.root_command.name);
        let doc_root = out_dir.join(&name);
        fs::create_dir_all(&doc_root)?;

        let path = doc_root.join(format!("{}.{}", name, self.file_extension));
        fs::write(&path, bytes)?;
        self.options
            .log(&format!("[{}] Wrote file {}", self.format, path.display()));
        Ok(())
    }

    fn set_template_options(&mut self, options: TemplateOptions) {
        self.options = options;
    }
}
