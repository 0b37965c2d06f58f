//! Command-line surface shared by adder binaries
//!
//! Fixed flags come from [`AdderArgs`]; one `--<key>` flag is generated for
//! every configuration option the adder declares.

use crate::adder::Adder;
use crate::config::{ConfigOption, ConfigValue};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, Parser};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

/// Flags every adder binary accepts
#[derive(Args, Debug, Clone, Default)]
pub struct AdderArgs {
    /// Answer configuration questions interactively instead of through flags
    #[arg(short, long)]
    pub interaction: bool,

    /// Project directory to modify (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for templates instead of the built-in ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Overwrite existing files without asking (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

/// Everything needed to run an adder
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub interactive: bool,
    pub directory: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub yes: bool,
    /// Option values given on the command line
    pub flags: HashMap<String, ConfigValue>,
}

impl RunArgs {
    pub fn new(args: AdderArgs, flags: HashMap<String, ConfigValue>) -> Self {
        Self {
            interactive: args.interaction,
            directory: args.directory,
            template_dir: args.template_dir,
            yes: args.yes,
            flags,
        }
    }
}

/// Parse the process arguments, exiting with clap's usage message on error
pub fn parse<C: Parser, A: Adder + ?Sized>(adder: &A) -> (C, HashMap<String, ConfigValue>) {
    try_parse_from(adder, std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Parse `itr` against `C` extended with the adder's option flags
pub fn try_parse_from<C, A, I, T>(
    adder: &A,
    itr: I,
) -> Result<(C, HashMap<String, ConfigValue>), clap::Error>
where
    C: Parser,
    A: Adder + ?Sized,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = command::<C, A>(adder);
    let matches = command.try_get_matches_from_mut(itr)?;

    let cli = C::from_arg_matches(&matches)?;
    let flags = option_flags(adder.configuration(), &matches)
        .map_err(|message| command.error(ErrorKind::InvalidValue, message))?;

    Ok((cli, flags))
}

fn option_arg(option: &ConfigOption) -> Arg {
    let arg = Arg::new(option.key)
        .long(option.key)
        .help(format!("{} [default: {}]", option.message, option.default))
        .action(ArgAction::Set);

    if option.question {
        // A bare `--key` means yes
        arg.value_name("BOOL")
            .num_args(0..=1)
            .default_missing_value("true")
    } else {
        arg.value_name("VALUE")
    }
}

fn option_flags(
    options: &[ConfigOption],
    matches: &ArgMatches,
) -> Result<HashMap<String, ConfigValue>, String> {
    let mut flags = HashMap::new();
    for option in options {
        if let Some(raw) = matches.get_one::<String>(option.key) {
            let value = option.parse_value(raw).map_err(|e| e.to_string())?;
            flags.insert(option.key.to_string(), value);
        }
    }
    Ok(flags)
}

/// The `C` command extended with one flag per configuration option
pub fn command<C: Parser, A: Adder + ?Sized>(adder: &A) -> Command {
    C::command().args(adder.configuration().iter().map(option_arg))
}
