use crate::error::Result;
use crate::formats::Formats;
use crate::from_clap::documentation_from_clap;
use crate::options::Options;
use crate::writer;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

const OUT_DIR: &str = "out-dir";
const SHOW_HIDDEN: &str = "show-hidden";
const FORMATS: &str = "formats";

/// Builds the hidden documentation subcommand to add to a host application.
///
/// Unless user command options are disabled, the subcommand accepts
/// `--out-dir`, `--show-hidden` and `--formats`, defaulting to the values in
/// `options`.
pub fn docs_command(options: &Options) -> Command {
    let command = Command::new(options.command_name().to_string())
        .about("Generate documentation for this application")
        .hide(true);
    if options.disable_user_command_options() {
        return command;
    }

    let enabled: Vec<String> = options
        .formats()
        .enumerate()
        .into_iter()
        .map(Formats::name)
        .collect();
    let mut show_hidden = Arg::new(SHOW_HIDDEN)
        .long(SHOW_HIDDEN)
        .help("Also show hidden commands")
        .action(ArgAction::SetTrue);
    if options.show_hidden_commands() {
        show_hidden = show_hidden.default_value("true");
    }

    command
        .arg(
            Arg::new(OUT_DIR)
                .long(OUT_DIR)
                .value_name("DIR")
                .help("The target output directory")
                .default_value(options.out_dir().to_string_lossy().into_owned()),
        )
        .arg(show_hidden)
        .arg(
            Arg::new(FORMATS)
                .long(FORMATS)
                .value_name("FORMATS")
                .help(format!(
                    "A comma-separated list of formats to output. Allowed: [{}]",
                    enabled.join(",")
                ))
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_values(enabled),
        )
}

/// Keeps the requested formats that the application has enabled, logging
/// every request that is dropped.
pub fn select_formats<S: AsRef<str>>(requested: &[S], options: &Options) -> Formats {
    let template_options = options.template_options();
    let mut selected = Formats::empty();
    for request in requested {
        let request = request.as_ref();
        match Formats::from_name(request) {
            Some(format) if options.formats().is_set(format) => {
                selected.set(format);
            }
            Some(format) => template_options.log(&format!(
                "Skipping {} documentation because the application maintainers have not enabled this output format.",
                format.name()
            )),
            None => template_options.log(&format!(
                "Skipping {request} documentation because it is not currently supported."
            )),
        }
    }
    selected
}

/// Runs the documentation subcommand: applies the user's choices to
/// `options`, converts `root` and writes every selected format.
pub fn run_docs_command(root: &Command, matches: &ArgMatches, options: &Options) -> Result<()> {
    let run_options = if options.disable_user_command_options() {
        options.clone()
    } else {
        let out_dir = matches
            .get_one::<String>(OUT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| options.out_dir().to_path_buf());
        let show_hidden = matches.get_flag(SHOW_HIDDEN);
        let requested: Vec<&String> = matches
            .get_many::<String>(FORMATS)
            .map(|values| values.collect())
            .unwrap_or_default();
        let formats = select_formats(&requested, options);
        options.with_run_settings(formats, out_dir, show_hidden)?
    };

    let documentation = documentation_from_clap(root, run_options.show_hidden_commands());
    writer::write(documentation, &run_options)
}
