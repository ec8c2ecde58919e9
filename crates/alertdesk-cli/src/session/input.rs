//! Interactive input parsing.

use clap::Parser;

use crate::config::Command;

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Empty,
    /// Plain text to submit as an alert.
    Alert(String),
    /// A `/command` line.
    Command(Command),
    /// `/help`.
    Help,
    /// `/quit` or `/exit`.
    Quit,
}

/// Wrapper that lets clap parse a session line without a binary name.
#[derive(Debug, Parser)]
#[command(name = "alertdesk", no_binary_name = true, disable_help_flag = true)]
#[command(disable_help_subcommand = true)]
struct SessionLine {
    #[command(subcommand)]
    command: Command,
}

/// Parses a line typed into the session.
///
/// Lines starting with `/` are commands; everything else is alert text.
///
/// # Errors
///
/// Returns the clap error for malformed commands. Its rendered form is
/// suitable for showing to the user.
pub fn parse_line(line: &str) -> Result<Input, clap::Error> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        if line.is_empty() {
            return Ok(Input::Empty);
        }
        return Ok(Input::Alert(line.to_owned()));
    };

    let mut words = command.split_whitespace().peekable();
    match words.peek().copied() {
        Some("help") | None => Ok(Input::Help),
        Some("quit" | "exit") => Ok(Input::Quit),
        Some(_) => SessionLine::try_parse_from(words).map(|line| Input::Command(line.command)),
    }
}
