//! Line commands read from stdin. Song numbers are 1-based on the command
//! line and 0-based in [`Msg`].

use std::path::PathBuf;

use thiserror::Error;
use tunebatch_core::Msg;

pub const HELP: &str = "\
Commands:
  add <url>            queue a song (max 15)
  remove <n>           remove song n
  clear                remove all songs
  download             download all queued songs
  load <playlist-url>  fetch a playlist
  toggle <n>           include/exclude playlist song n
  all | none | invert  change the playlist selection
  download-playlist    download the selected playlist songs
  dest <path>          set the download location
  check                probe yt-dlp and FFmpeg
  show                 print the current lists
  help                 this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
    /// Stdin closed; the app exits once nothing is running.
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("Not a song number: {0}")]
    BadPosition(String),
}

/// Parse one input line; blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => Command::Dispatch(Msg::AddUrl(required(rest, "add", "a URL")?.to_string())),
        "remove" | "rm" => Command::Dispatch(Msg::RemoveJob(position(rest, "remove")?)),
        "clear" => Command::Dispatch(Msg::ClearJobs),
        "download" => Command::Dispatch(Msg::StartSongsRun),
        "load" => Command::Dispatch(Msg::LoadPlaylist(
            required(rest, "load", "a playlist URL")?.to_string(),
        )),
        "toggle" => Command::Dispatch(Msg::ToggleEntry(position(rest, "toggle")?)),
        "all" => Command::Dispatch(Msg::IncludeAll),
        "none" => Command::Dispatch(Msg::ExcludeAll),
        "invert" => Command::Dispatch(Msg::InvertSelection),
        "download-playlist" => Command::Dispatch(Msg::StartPlaylistRun),
        "dest" => Command::Dispatch(Msg::SetDestination(PathBuf::from(required(
            rest,
            "dest",
            "a folder path",
        )?))),
        "check" => Command::Dispatch(Msg::CheckDependencies),
        "show" | "list" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn position(rest: &str, command: &'static str) -> Result<usize, CommandError> {
    let raw = required(rest, command, "a song number")?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadPosition(raw.to_string())),
    }
}
