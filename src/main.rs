use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use cmddoc_rs::cli::{docs_command, run_docs_command};
use cmddoc_rs::formats::Formats;
use cmddoc_rs::get_format_names;
use cmddoc_rs::options::Options;
use cmddoc_rs::path::clean_path_with;
use cmddoc_rs::text::{hanging_indent, strip_ansi};
use tracing_subscriber::EnvFilter;

use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "cmddoc", author, version, about, long_about = None)]
struct Cli {
    /// List available output formats
    #[arg(short = 'l', long)]
    list_formats: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a command path into a file-system safe name
    Sanitize {
        /// Command path, e.g. "app sub"
        input: String,
        /// Replacement for each run of unsafe characters
        #[arg(short, long, default_value = "_")]
        replacement: String,
    },
    /// Wrap text from stdin with a hanging indent
    Wrap {
        /// Width of continuation-line indentation
        #[arg(long, default_value_t = 0)]
        hang: usize,
        /// Maximum line width
        #[arg(long, default_value_t = 80)]
        width: usize,
        /// Remove ANSI escape sequences before wrapping
        #[arg(long)]
        strip_ansi: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Options::builder()
        .formats(Formats::ORDER.into_iter().fold(Formats::empty(), |all, f| all | f))
        .build()?;
    let root = Cli::command().subcommand(docs_command(&options));
    let matches = root.clone().get_matches();

    if let Some(docs) = matches.subcommand_matches(options.command_name()) {
        run_docs_command(&root, docs, &options)?;
        return Ok(());
    }

    let cli = Cli::from_arg_matches(&matches)?;

    if cli.list_formats {
        println!("output formats:");
        println!("{}", get_format_names().join(" "));
        return Ok(());
    }

    match cli.command {
        Some(Commands::Sanitize { input, replacement }) => {
            println!("{}", clean_path_with(&input, &replacement));
        }
        Some(Commands::Wrap {
            hang,
            width,
            strip_ansi: strip,
        }) => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            if strip {
                input = strip_ansi(&input);
            }
            for line in input.lines() {
                println!("{}", hanging_indent(line, hang, width));
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
