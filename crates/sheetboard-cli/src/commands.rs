//! Line commands read from stdin while the dashboard runs.

use sheetboard_core::FilterField;
use thiserror::Error;

use crate::dashboard::Command;

pub const HELP: &str = "\
commands:
  type [value]       filter by issue type (no value: all)
  priority [value]   filter by priority (no value: all)
  status [value]     filter by status (no value: all)
  clear              clear all filters
  refresh            fetch now
  help               show this help
  quit               stop the dashboard";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Dispatch(Command),
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
}

/// Parse one stdin line. The filter value is the rest of the line, trimmed,
/// with case preserved.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Nothing);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "clear" => Ok(Input::Dispatch(Command::ClearFilters)),
        "refresh" => Ok(Input::Dispatch(Command::Tick)),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => {
            let field: FilterField = other
                .parse()
                .map_err(|_| InputError::Unknown(other.to_string()))?;
            let value = (!rest.is_empty()).then(|| rest.to_string());
            Ok(Input::Dispatch(Command::filter_changed(field, value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_commands() {
        assert_eq!(
            parse_line("type Bug"),
            Ok(Input::Dispatch(Command::IssueTypeChanged(Some("Bug".into()))))
        );
        assert_eq!(
            parse_line("priority   Critical  "),
            Ok(Input::Dispatch(Command::PriorityChanged(Some("Critical".into()))))
        );
        assert_eq!(
            parse_line("status In Progress"),
            Ok(Input::Dispatch(Command::StatusChanged(Some("In Progress".into()))))
        );
    }

    #[test]
    fn bare_filter_unsets() {
        assert_eq!(
            parse_line("status"),
            Ok(Input::Dispatch(Command::StatusChanged(None)))
        );
        assert_eq!(
            parse_line("type   "),
            Ok(Input::Dispatch(Command::IssueTypeChanged(None)))
        );
    }

    #[test]
    fn values_keep_case() {
        assert_eq!(
            parse_line("type feature request"),
            Ok(Input::Dispatch(Command::IssueTypeChanged(Some("feature request".into()))))
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_line("clear"), Ok(Input::Dispatch(Command::ClearFilters)));
        assert_eq!(parse_line("refresh"), Ok(Input::Dispatch(Command::Tick)));
        assert_eq!(parse_line("help"), Ok(Input::Help));
        assert_eq!(parse_line("quit"), Ok(Input::Quit));
        assert_eq!(parse_line("exit"), Ok(Input::Quit));
    }

    #[test]
    fn blank_is_nothing() {
        assert_eq!(parse_line(""), Ok(Input::Nothing));
        assert_eq!(parse_line("  \t"), Ok(Input::Nothing));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_line("sort date"),
            Err(InputError::Unknown("sort".into()))
        );
    }
}
