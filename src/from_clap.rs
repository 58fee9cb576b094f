//! Conversion of a `clap` command tree into [`Command`] values.

use crate::doc::{Command, Documentation, Flag, ParentCommand};
use clap::{Arg, ArgAction};

/// Tag placed at the bottom of generated pages.
pub const AUTO_GENERATION_TAG: &str = "Auto-generated by cmddoc-rs";

/// Builds documentation for `root`, tagged and dated.
pub fn documentation_from_clap(root: &clap::Command, show_hidden: bool) -> Documentation {
    let mut doc = Documentation::new(command_from_clap(root, show_hidden))
        .with_auto_generation_tag(AUTO_GENERATION_TAG);
    doc.init();
    doc
}

/// Converts `cmd` and its subcommands. Hidden subcommands are skipped unless
/// `show_hidden` is set.
pub fn command_from_clap(cmd: &clap::Command, show_hidden: bool) -> Command {
    convert(cmd, None, &[], show_hidden)
}

fn convert(
    cmd: &clap::Command,
    parent: Option<ParentCommand>,
    inherited: &[Flag],
    show_hidden: bool,
) -> Command {
    let full_path = match &parent {
        Some(p) => format!("{} {}", p.full_path, cmd.get_name()),
        None => cmd.get_name().to_string(),
    };

    let options: Vec<&Arg> = cmd.get_arguments().filter(|a| !a.is_positional()).collect();
    let local_flags: Vec<Flag> = options.iter().map(|a| flag_from_arg(a)).collect();
    let persistent_flags: Vec<Flag> = options
        .iter()
        .filter(|a| a.is_global_set())
        .map(|a| Flag {
            persistent: true,
            ..flag_from_arg(a)
        })
        .collect();
    let inherited_flags: Vec<Flag> = inherited
        .iter()
        .filter(|f| !local_flags.iter().any(|l| l.name == f.name))
        .cloned()
        .collect();

    // globals of this command become inherited flags of every descendant
    let mut passed_down = inherited_flags.clone();
    passed_down.extend(persistent_flags.iter().map(|f| Flag {
        persistent: false,
        inherited: true,
        ..f.clone()
    }));

    let this_parent = ParentCommand {
        name: cmd.get_name().to_string(),
        short: styled(cmd.get_about()),
        full_path: full_path.clone(),
    };
    let subcommands = cmd
        .get_subcommands()
        .filter(|sub| show_hidden || !sub.is_hide_set())
        .map(|sub| convert(sub, Some(this_parent.clone()), &passed_down, show_hidden))
        .collect();

    Command {
        name: cmd.get_name().to_string(),
        usage: use_line(cmd, &full_path, !local_flags.is_empty() || !inherited_flags.is_empty()),
        aliases: cmd.get_visible_aliases().map(str::to_string).collect(),
        short: styled(cmd.get_about()),
        long: styled(cmd.get_long_about()),
        version: cmd.get_version().unwrap_or_default().to_string(),
        hidden: cmd.is_hide_set(),
        runnable: !cmd.is_subcommand_required_set(),
        raw_flag_usages: flag_usages(&local_flags),
        parent,
        subcommands,
        local_flags,
        inherited_flags,
        persistent_flags,
        full_path,
        ..Default::default()
    }
}

fn styled(text: Option<&clap::builder::StyledStr>) -> String {
    text.map(|s| s.to_string()).unwrap_or_default()
}

/// `app sub [flags] <ARG>`, listing positionals after the flags marker.
fn use_line(cmd: &clap::Command, full_path: &str, has_flags: bool) -> String {
    let mut line = full_path.to_string();
    if has_flags {
        line.push_str(" [flags]");
    }
    for positional in cmd.get_positionals().filter(|a| !a.is_hide_set()) {
        let name = value_name(positional);
        if positional.is_required_set() {
            line.push_str(&format!(" <{name}>"));
        } else {
            line.push_str(&format!(" [{name}]"));
        }
    }
    if cmd.has_subcommands() && cmd.is_subcommand_required_set() {
        line.push_str(" [command]");
    }
    line
}

fn value_name(arg: &Arg) -> String {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.to_string())
        .unwrap_or_else(|| arg.get_id().as_str().to_uppercase())
}

fn takes_value(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Set | ArgAction::Append)
}

fn flag_from_arg(arg: &Arg) -> Flag {
    let name = arg
        .get_long()
        .map(str::to_string)
        .unwrap_or_else(|| arg.get_id().as_str().to_string());
    let def_value = arg
        .get_default_values()
        .iter()
        .map(|v| v.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(",");
    let no_opt_def_val = match arg.get_action() {
        ArgAction::SetTrue => "true".to_string(),
        ArgAction::SetFalse => "false".to_string(),
        ArgAction::Count => "+1".to_string(),
        _ => String::new(),
    };

    let mut flag = Flag {
        name,
        shorthand: arg.get_short().map(String::from).unwrap_or_default(),
        usage: styled(arg.get_help()),
        def_value,
        no_opt_def_val,
        hidden: arg.is_hide_set(),
        ..Default::default()
    };
    flag.raw_usage = flag_usage(arg, &flag);
    flag
}

/// Renders one usage line in the style of `pflag`, with a tab between the
/// flag names and the description. Hidden flags render as an empty string.
fn flag_usage(arg: &Arg, flag: &Flag) -> String {
    if flag.hidden {
        return String::new();
    }

    let mut line = if flag.shorthand.is_empty() {
        format!("      --{}", flag.name)
    } else {
        format!("  -{}, --{}", flag.shorthand, flag.name)
    };

    let value = takes_value(arg);
    if value {
        line.push_str(&format!(" <{}>", value_name(arg)));
    }
    // a bare switch that stores false spells out the value it sets
    if let ArgAction::SetFalse = arg.get_action() {
        line.push_str(&format!("[={}]", flag.no_opt_def_val));
    }

    line.push('\t');
    line.push_str(&flag.usage);

    if !matches!(flag.def_value.as_str(), "" | "false" | "0" | "[]") {
        if value {
            line.push_str(&format!(" (default {:?})", flag.def_value));
        } else {
            line.push_str(&format!(" (default {})", flag.def_value));
        }
    }
    line
}

/// Aligns the descriptions of all visible flags into one column, three
/// spaces past the longest flag names.
fn flag_usages(flags: &[Flag]) -> String {
    let lines: Vec<(&str, &str)> = flags
        .iter()
        .filter(|f| !f.hidden)
        .filter_map(|f| f.raw_usage.split_once('\t'))
        .collect();
    let width = lines
        .iter()
        .map(|(names, _)| names.chars().count())
        .max()
        .unwrap_or(0);

    lines
        .iter()
        .map(|(names, usage)| {
            let padding = width - names.chars().count() + 3;
            format!("{names}{}{usage}", " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
