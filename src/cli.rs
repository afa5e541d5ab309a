//! Command-line handling: one mode flag plus a save slot.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser};

/// Command-line arguments for the miner.
#[derive(Debug, Parser)]
#[command(
    name = "tui-miner",
    version,
    about = "Dig for ore, dodge falling rock, sell your haul on the surface",
    override_usage = "tui-miner [OPTION] [SAVE FILE N]"
)]
pub struct CliArgs {
    /// New game using save file N (prompts before overwriting an existing one)
    #[arg(short = 'n', value_name = "N", conflicts_with_all = ["load", "delete"])]
    pub new: Option<Slot>,

    /// Load save file N
    #[arg(short = 'l', value_name = "N", conflicts_with = "delete")]
    pub load: Option<Slot>,

    /// Delete save file N
    #[arg(short = 'd', value_name = "N")]
    pub delete: Option<Slot>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Usage,
    New(Slot),
    Load(Slot),
    Delete(Slot),
}

/// A save slot id: one or two ASCII digits, kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot(String);

impl Slot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("save file number \"{s}\" is not an integer"));
        }
        if s.len() > 2 {
            return Err(format!("save file number {s} is more than two digits"));
        }
        Ok(Slot(s.to_string()))
    }
}

/// Parse arguments (including the program name) into a [`Command`].
///
/// Help, version, a missing flag and an unknown flag all map to
/// [`Command::Usage`]; malformed slots, stray positional arguments and
/// conflicting flags are errors.
pub fn parse_command<I, T>(args: I) -> Result<Command, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let args = match CliArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Ok(Command::Usage),
                ErrorKind::UnknownArgument if is_unknown_flag(&err) => Ok(Command::Usage),
                _ => Err(err),
            }
        }
    };

    Ok(match (args.new, args.load, args.delete) {
        (Some(slot), _, _) => Command::New(slot),
        (_, Some(slot), _) => Command::Load(slot),
        (_, _, Some(slot)) => Command::Delete(slot),
        _ => Command::Usage,
    })
}

/// clap reports unknown flags and unexpected positionals with the same kind.
fn is_unknown_flag(err: &clap::Error) -> bool {
    matches!(
        err.get(ContextKind::InvalidArg),
        Some(ContextValue::String(arg)) if arg.starts_with('-')
    )
}

/// Long help text printed for [`Command::Usage`].
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}

/// Ask a yes/no question; only an answer starting with `y` or `Y` is a yes.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt} (y/n)? ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim_start().chars().next(), Some('y' | 'Y')))
}
