use super::Writer;
use crate::doc::{Command, Documentation};
use crate::error::{DocsError, Result};
use crate::formats::Formats;
use crate::funcs::{
    register_helpers, FormatFunctions, ManFunctions, MarkdownFunctions, RestFunctions,
};
use crate::options::{TemplateOptions, TemplateSource};
use crate::path::clean_path;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Default templates, registered when the template source is embedded.
const EMBEDDED_TEMPLATES: [(&str, &str); 4] = [
    ("markdown_command.tmpl", include_str!("../templates/markdown_command.tmpl")),
    ("markdown_index.tmpl", include_str!("../templates/markdown_index.tmpl")),
    ("rest_command.tmpl", include_str!("../templates/rest_command.tmpl")),
    ("man_command.tmpl", include_str!("../templates/man_command.tmpl")),
];

/// Data handed to a command template: the command's own fields plus the
/// whole documentation under `doc`.
#[derive(Serialize)]
struct CommandContext<'a> {
    #[serde(flatten)]
    command: &'a Command,
    doc: &'a Documentation,
}

/// One line of the index: a written command page, indented by nesting depth.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry<'a> {
    full_path: &'a str,
    short: &'a str,
    indent: String,
}

/// Data handed to an index template: the documentation plus every command
/// page in the order it was written.
#[derive(Serialize)]
struct IndexContext<'a> {
    #[serde(flatten)]
    doc: &'a Documentation,
    commands: Vec<IndexEntry<'a>>,
}

/// Lists `command` and its descendants depth first. The root and its direct
/// children share the top level.
fn index_entries<'a>(command: &'a Command, depth: usize, entries: &mut Vec<IndexEntry<'a>>) {
    let full_path = if command.full_path.is_empty() {
        &command.name
    } else {
        &command.full_path
    };
    entries.push(IndexEntry {
        full_path,
        short: &command.short,
        indent: "  ".repeat(depth.saturating_sub(1)),
    });
    for subcommand in &command.subcommands {
        index_entries(subcommand, depth + 1, entries);
    }
}

/// Writes one file per command, and optionally an index, by rendering
/// `{format}_command.tmpl` and `{format}_index.tmpl`.
pub struct TemplateWriter {
    format: Formats,
    file_extension: &'static str,
    include_index: bool,
    functions: fn(&TemplateOptions) -> Arc<dyn FormatFunctions>,
    options: TemplateOptions,
}

impl TemplateWriter {
    /// Markdown pages (`.md`) plus an index.
    pub fn markdown() -> Self {
        TemplateWriter {
            format: Formats::MARKDOWN,
            file_extension: "md",
            include_index: true,
            functions: |options| {
                Arc::new(MarkdownFunctions {
                    strip_ansi: options.strip_ansi_in_markdown,
                    max_option_width: options.max_option_width_in_markdown,
                })
            },
            options: TemplateOptions::default(),
        }
    }

    /// reStructuredText pages (`.rst`).
    pub fn rest() -> Self {
        TemplateWriter {
            format: Formats::REST,
            file_extension: "rst",
            include_index: false,
            functions: |_| Arc::new(RestFunctions),
            options: TemplateOptions::default(),
        }
    }

    /// Section 1 manpages (`.1`).
    pub fn man() -> Self {
        TemplateWriter {
            format: Formats::MAN,
            file_extension: "1",
            include_index: false,
            functions: |_| Arc::new(ManFunctions),
            options: TemplateOptions::default(),
        }
    }

    fn template_name(&self, target: &str) -> String {
        format!("{}_{}.tmpl", self.format.name(), target)
    }

    /// Builds a registry holding this format's templates and helpers.
    fn registry(&self) -> Result<Handlebars<'static>> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut registry, (self.functions)(&self.options));

        let prefix = format!("{}_", self.format.name());
        match &self.options.templates {
            Some(TemplateSource::Embedded) => {
                for (name, content) in EMBEDDED_TEMPLATES {
                    if name.starts_with(&prefix) {
                        registry.register_template_string(name, content)?;
                    }
                }
            }
            Some(TemplateSource::Directory(dir)) => {
                let pattern = dir.join("**").join("*.tmpl");
                let pattern = pattern.to_str().ok_or_else(|| {
                    DocsError::Configuration(format!(
                        "template directory is not valid UTF-8: {:?}",
                        dir
                    ))
                })?;
                for entry in glob::glob(pattern)? {
                    let path = entry?;
                    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };
                    if name.starts_with(&prefix) {
                        let content = fs::read_to_string(&path)?;
                        registry.register_template_string(name, content)?;
                    }
                }
            }
            None => {
                return Err(DocsError::Configuration(
                    "invalid templates provided".to_string(),
                ))
            }
        }
        Ok(registry)
    }

    fn render_to_file<T: Serialize>(
        &self,
        registry: &Handlebars<'_>,
        template_name: &str,
        path: &Path,
        data: &T,
    ) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        registry.render_to_write(template_name, data, &mut out)?;
        out.flush()?;
        self.options
            .log(&format!("[{}] Wrote file {}", self.format, path.display()));
        Ok(())
    }

    /// Writes `command` and then, depth first, each of its subcommands.
    fn write_command(
        &self,
        registry: &Handlebars<'_>,
        template_name: &str,
        doc_root: &Path,
        doc: &Documentation,
        command: &Command,
    ) -> Result<()> {
        let path = doc_root.join(format!(
            "{}.{}",
            clean_path(&command.full_path),
            self.file_extension
        ));
        self.render_to_file(registry, template_name, &path, &CommandContext { command, doc })?;

        for subcommand in &command.subcommands {
            self.write_command(registry, template_name, doc_root, doc, subcommand)?;
        }
        Ok(())
    }

    fn write_commands(&self, registry: &Handlebars<'_>, doc_root: &Path, doc: &Documentation) -> Result<()> {
        let template_name = self.template_name("command");
        if !registry.has_template(&template_name) {
            self.options.log(&format!(
                "[{}] Skipping commands: no template found for {:?}",
                self.format, template_name
            ));
            return Ok(());
        }

        let root = &doc.root_command;
        let root_path = doc_root.join(format!("{}.{}", clean_path(&root.name), self.file_extension));
        self.render_to_file(
            registry,
            &template_name,
            &root_path,
            &CommandContext { command: root, doc },
        )?;

        for subcommand in &root.subcommands {
            self.write_command(registry, &template_name, doc_root, doc, subcommand)?;
        }
        Ok(())
    }

    fn write_index(&self, registry: &Handlebars<'_>, doc_root: &Path, doc: &Documentation) -> Result<()> {
        let template_name = self.template_name("index");
        if !registry.has_template(&template_name) {
            self.options.log(&format!(
                "[{}] Skipping index: no template found for {:?}",
                self.format, template_name
            ));
            return Ok(());
        }

        // a root command named "index" already owns index.{ext}
        let index_name = if doc.root_command.name == "index" {
            "README"
        } else {
            "index"
        };
        let index_path = doc_root.join(format!("{}.{}", index_name, self.file_extension));
        let mut commands = Vec::new();
        index_entries(&doc.root_command, 0, &mut commands);
        self.render_to_file(
            registry,
            &template_name,
            &index_path,
            &IndexContext { doc, commands },
        )
    }
}

impl Writer for TemplateWriter {
    fn write(&self, out_dir: &Path, doc: &Documentation) -> Result<()> {
        let registry = self.registry()?;

        let doc_root = out_dir.join(clean_path(&doc.root_command.name));
        fs::create_dir_all(&doc_root)?;

        self.write_commands(&registry, &doc_root, doc)?;
        if self.include_index {
            self.write_index(&registry, &doc_root, doc)?;
        }
        Ok(())
    }

    fn set_template_options(&mut self, options: TemplateOptions) {
        self.options = options;
    }
}
