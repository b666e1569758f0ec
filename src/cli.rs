//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::backends::cat::cat_file;
use crate::backends::filelist::read_file_list;
use crate::backends::list::{list_path, write_listing};
use crate::backends::output::open_output;
use crate::core::render::ListFormat;
use crate::core::sink::{Sink, SinkError};
use crate::core::util::display_name;
use crate::stages::{build_chain, DisplayOptions, NumberMode};

/// allcat - concatenate files to standard output, with cat's display modes.
#[derive(Parser, Debug)]
#[command(name = "allcat")]
#[command(
    author,
    version,
    about,
    long_about = r#"allcat concatenates its inputs to standard output (or --output).

With no FILE, or when FILE is -, standard input is read.

Display modes are applied as the bytes stream through, in any chunking:
- -E marks line ends with $
- -n/-b number all / non-empty lines
- -s squeezes runs of empty lines
- -v shows non-printable bytes in ^ and M- notation
- -T shows TAB as ^I

Examples:
    allcat notes.txt
    allcat -A binary.dat
    allcat -ns log.txt -o numbered.txt
    allcat -f inputs.txt
    allcat --list src
"#
)]
pub struct Cli {
    /// Files to concatenate.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Equivalent to -vET.
    #[arg(short = 'A', long)]
    pub show_all: bool,

    /// Number nonempty output lines, overrides -n.
    #[arg(short = 'b', long)]
    pub number_nonblank: bool,

    /// Equivalent to -vE.
    #[arg(short = 'e')]
    pub show_all_but_tabs: bool,

    /// Display $ at end of each line.
    #[arg(short = 'E', long)]
    pub show_ends: bool,

    /// Number all output lines.
    #[arg(short = 'n', long)]
    pub number: bool,

    /// Suppress repeated empty output lines.
    #[arg(short = 's', long)]
    pub squeeze_blank: bool,

    /// Equivalent to -vT.
    #[arg(short = 't')]
    pub show_all_but_ends: bool,

    /// Display TAB characters as ^I.
    #[arg(short = 'T', long)]
    pub show_tabs: bool,

    /// (ignored)
    #[arg(short = 'u', hide = true)]
    pub unbuffered: bool,

    /// Use ^ and M- notation, except for LFD and TAB.
    #[arg(short = 'v', long)]
    pub show_nonprinting: bool,

    /// Write output to FILE instead of standard output.
    #[arg(
        short,
        long,
        env = "ALLCAT_OUTPUT",
        default_value = "-",
        value_name = "FILE",
        long_help = "Write output to FILE instead of standard output.\n\n\
The file is created or truncated. '-' and /dev/stdout mean standard output."
    )]
    pub output: PathBuf,

    /// Read the list of inputs from FILE (one per line).
    #[arg(
        short = 'f',
        long = "files",
        value_name = "FILE",
        long_help = "Read the list of inputs from FILE, one name per line.\n\n\
Surrounding whitespace is trimmed and blank lines are skipped. The listed\n\
names are concatenated after any FILE arguments. May be given more than once."
    )]
    pub files: Vec<PathBuf>,

    /// List directories instead of catting them.
    #[arg(
        long,
        long_help = "List each FILE instead of concatenating it. A directory lists its\n\
entries, a file lists itself. Without FILE arguments the current directory is listed."
    )]
    pub list: bool,

    /// Listing format (table/jsonl/json).
    #[arg(
        long,
        env = "ALLCAT_LIST_FORMAT",
        default_value = "table",
        value_parser = ["table", "jsonl", "json"],
        value_name = "FORMAT"
    )]
    pub list_format: String,

    /// Quiet mode (only errors are logged).
    #[arg(short, long)]
    pub quiet: bool,

    /// More diagnostics on stderr; repeat for more.
    #[arg(
        long,
        action = ArgAction::Count,
        long_help = "Increase log verbosity on stderr: once for info, twice for debug,\n\
three times for trace. ALLCAT_LOG (e.g. ALLCAT_LOG=debug) overrides this."
    )]
    pub verbose: u8,
}

impl Cli {
    /// Resolve the alias flags into the set of enabled stages
    pub fn display_options(&self) -> DisplayOptions {
        let nonprinting = self.show_nonprinting
            || self.show_all
            || self.show_all_but_tabs
            || self.show_all_but_ends;

        DisplayOptions {
            show_ends: self.show_ends || self.show_all || self.show_all_but_tabs,
            number: NumberMode::from_flags(self.number, self.number_nonblank),
            squeeze_blank: self.squeeze_blank,
            show_nonprinting: nonprinting,
            show_tabs: self.show_tabs || self.show_all || self.show_all_but_ends,
        }
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Whether an error chain bottoms out in a closed pipe on the output
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(sink) = cause.downcast_ref::<SinkError>() {
            return sink.io_kind() == Some(io::ErrorKind::BrokenPipe);
        }
        cause
            .downcast_ref::<io::Error>()
            .map(|e| e.kind() == io::ErrorKind::BrokenPipe)
            .unwrap_or(false)
    })
}

/// Cat every input into `out`; returns how many inputs could not be read
fn cat_inputs(out: &mut dyn Sink, inputs: &[PathBuf]) -> Result<usize> {
    let mut failures = 0;

    for name in inputs {
        match cat_file(out, name) {
            Ok(_) => {}
            Err(e) if e.is_input_error() => {
                error!("{}", e);
                failures += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(failures)
}

/// List every input through `out`; returns how many inputs could not be listed
fn list_inputs(out: &mut dyn Sink, inputs: &[PathBuf], format: ListFormat) -> Result<usize> {
    let mut failures = 0;

    for name in inputs {
        let listing = match list_path(name) {
            Ok(listing) => listing,
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
                continue;
            }
        };
        debug!("{}: {} entries", display_name(name), listing.len());
        write_listing(out, &listing, format)?;
    }

    Ok(failures)
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.display_options();
    debug!(
        "display options: {}",
        serde_json::to_string(&opts).unwrap_or_default()
    );

    let mut failures = 0;
    let mut inputs = cli.inputs.clone();

    for list in &cli.files {
        match read_file_list(list) {
            Ok(names) => inputs.extend(names),
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
            }
        }
    }

    if inputs.is_empty() {
        inputs.push(PathBuf::from(if cli.list { "." } else { "-" }));
    }

    let mut out = build_chain(open_output(&cli.output)?, &opts);

    let result = if cli.list {
        let format: ListFormat = cli.list_format.parse().unwrap_or_default();
        list_inputs(&mut out, &inputs, format)
    } else {
        cat_inputs(&mut out, &inputs)
    };

    let closed = out.close().map_err(anyhow::Error::from);

    match result.and_then(|n| closed.map(|_| n)) {
        Ok(n) => failures += n,
        Err(e) if is_broken_pipe(&e) => {
            debug!("output closed early: {:#}", e);
            return Ok(());
        }
        Err(e) => return Err(e.context(format!("writing {}", display_name(&cli.output)))),
    }

    if failures > 0 {
        bail!("{} input(s) could not be read", failures);
    }

    Ok(())
}
