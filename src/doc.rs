use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format of [`Documentation::generation_date`], e.g. `18-Oct-2026`.
pub const GENERATION_DATE_FORMAT: &str = "%-d-%b-%Y";

/// The top-level value handed to every writer: one full command tree plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generation_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auto_generation_tag: String,
    pub root_command: Command,
}

impl Documentation {
    /// Creates documentation for `root_command`, without a generation date.
    pub fn new(root_command: Command) -> Self {
        Documentation {
            root_command,
            ..Default::default()
        }
    }

    /// Sets the auto-generation tag rendered at the bottom of each page.
    pub fn with_auto_generation_tag(mut self, tag: &str) -> Self {
        self.auto_generation_tag = tag.to_string();
        self
    }

    /// Fills in today's generation date if none was set.
    pub fn init(&mut self) {
        if self.generation_date.is_empty() {
            self.generation_date = chrono::Local::now()
                .format(GENERATION_DATE_FORMAT)
                .to_string();
        }
    }
}

/// Name and description of a command's parent.
///
/// This is a copy of the parent's metadata, never a link back into the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentCommand {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_path: String,
}

/// One node of the command tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Command {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// The full usage line, e.g. `app sub [flags]`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggest_for: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub long: String,
    #[serde(rename = "groupID", skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub valid_args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arg_aliases: Vec<String>,
    /// Deprecation message; empty when the command is not deprecated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deprecated: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    pub hidden: bool,
    pub runnable: bool,
    /// Pre-rendered, column-aligned usage of the command's own flags.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_flag_usages: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentCommand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<Command>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherited_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persistent_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Space separated path from the root command, e.g. `app sub leaf`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_path: String,
}

/// One command-line option.
///
/// `inherited` and `persistent` are independent; a flag may be both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flag {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shorthand: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub def_value: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub no_opt_def_val: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deprecated: String,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shorthand_deprecated: String,
    #[serde(skip_serializing_if = "is_false")]
    pub inherited: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub persistent: bool,
    /// The flag's usage line as shown in help output.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_usage: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}
