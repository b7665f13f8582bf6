//! Terminal command parsing and local file inspection.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use insight_core::{ActiveView, Msg, SelectedFile};

use super::ui::constants::HELP_TEXT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Navigate(ActiveView),
    Pick(PathBuf),
    Drop(Vec<PathBuf>),
    Analyze,
    Reset,
    Retry,
    Details(String),
    Help,
    Quit,
}

/// What the app loop should do with one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Dispatch(Msg),
    Status(String),
    Quit,
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "upload" | "u" => UiCommand::Navigate(ActiveView::Upload),
        "history" | "h" => UiCommand::Navigate(ActiveView::History),
        "pick" => {
            let path = unquote(rest);
            if path.is_empty() {
                return Err("Usage: pick <path>".to_string());
            }
            UiCommand::Pick(PathBuf::from(path))
        }
        "drop" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("Usage: drop <path> [<path>...]".to_string());
            }
            UiCommand::Drop(paths)
        }
        "analyze" | "a" => UiCommand::Analyze,
        "reset" | "remove" | "another" => UiCommand::Reset,
        "retry" | "r" => UiCommand::Retry,
        "details" => {
            if rest.is_empty() {
                return Err("Usage: details <id>".to_string());
            }
            UiCommand::Details(rest.to_string())
        }
        "help" | "?" => UiCommand::Help,
        "quit" | "q" | "exit" => UiCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
    };
    Ok(Some(command))
}

pub fn interpret(line: &str) -> Option<InputAction> {
    match parse_command(line) {
        Ok(Some(command)) => Some(command_action(command)),
        Ok(None) => None,
        Err(message) => Some(InputAction::Status(message)),
    }
}

fn command_action(command: UiCommand) -> InputAction {
    let msg = match command {
        UiCommand::Navigate(view) => Msg::Navigate(view),
        UiCommand::Pick(path) => match inspect_file(&path) {
            Ok(file) => Msg::FilePicked(file),
            Err(reason) => Msg::SelectionFailed { reason },
        },
        UiCommand::Drop(paths) => {
            match paths
                .iter()
                .map(|path| inspect_file(path))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(files) => Msg::FilesDropped(files),
                Err(reason) => Msg::SelectionFailed { reason },
            }
        }
        UiCommand::Analyze => Msg::AnalyzeClicked,
        UiCommand::Reset => Msg::ResetClicked,
        UiCommand::Retry => Msg::RetryClicked,
        UiCommand::Details(id) => Msg::ViewDetailsClicked { id },
        UiCommand::Help => return InputAction::Status(HELP_TEXT.to_string()),
        UiCommand::Quit => return InputAction::Quit,
    };
    InputAction::Dispatch(msg)
}

/// Builds a [`SelectedFile`] from a path on disk.
pub fn inspect_file(path: &Path) -> Result<SelectedFile, String> {
    let metadata =
        fs::metadata(path).map_err(|err| format!("Cannot read {}: {}", path.display(), err))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile {
        name,
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        content_type: content_type_for(path).to_string(),
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}
