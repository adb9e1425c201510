//! Front-end commands and responses

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabletime_util::{SessionId, TableId};
use thiserror::Error;

use crate::{ArchiveReport, CurrentReport, ReasonCode, TableSnapshot};

/// A user action, as typed at the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Seat guests at a free table
    Occupy { table_id: TableId },
    /// Guests leave; bill the session
    Free { table_id: TableId },
    /// Occupy a free table or free an occupied one
    Toggle { table_id: TableId },
    /// Show every table's occupancy
    List,
    /// What everyone owes right now
    Current,
    /// Lifetime statistics
    Archive,
    Help,
    Quit,
}

/// Errors parsing a console line into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a table number")]
    MissingTableId { command: String },

    #[error("'{value}' is not a table number")]
    InvalidTableId { value: String },

    #[error("'{command}' takes no argument '{argument}'")]
    UnexpectedArgument { command: String, argument: String },
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Parse a console line. A bare table number toggles that table.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandParseError::Empty)?;
        let argument = words.next();

        if let Some(extra) = words.next() {
            return Err(CommandParseError::UnexpectedArgument {
                command: head.to_string(),
                argument: extra.to_string(),
            });
        }

        if head.chars().all(|c| c.is_ascii_digit()) {
            if let Some(arg) = argument {
                return Err(CommandParseError::UnexpectedArgument {
                    command: head.to_string(),
                    argument: arg.to_string(),
                });
            }
            return Ok(Command::Toggle {
                table_id: parse_table_id(head)?,
            });
        }

        let keyword = head.to_ascii_lowercase();
        let with_table = |make: fn(TableId) -> Command| -> Result<Command, CommandParseError> {
            let value = argument.ok_or_else(|| CommandParseError::MissingTableId {
                command: keyword.clone(),
            })?;
            Ok(make(parse_table_id(value)?))
        };
        let bare = |command: Command| -> Result<Command, CommandParseError> {
            match argument {
                Some(arg) => Err(CommandParseError::UnexpectedArgument {
                    command: keyword.clone(),
                    argument: arg.to_string(),
                }),
                None => Ok(command),
            }
        };

        match keyword.as_str() {
            "occupy" | "seat" => with_table(|table_id| Command::Occupy { table_id }),
            "free" | "release" => with_table(|table_id| Command::Free { table_id }),
            "toggle" | "t" => with_table(|table_id| Command::Toggle { table_id }),
            "list" | "ls" => bare(Command::List),
            "current" | "now" => bare(Command::Current),
            "archive" | "stats" => bare(Command::Archive),
            "help" | "?" => bare(Command::Help),
            "quit" | "exit" | "q" => bare(Command::Quit),
            _ => Err(CommandParseError::UnknownCommand(head.to_string())),
        }
    }
}

fn parse_table_id(value: &str) -> Result<TableId, CommandParseError> {
    value
        .parse::<u32>()
        .map(TableId::new)
        .map_err(|_| CommandParseError::InvalidTableId {
            value: value.to_string(),
        })
}

/// Result of executing a [`Command`] against the venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Occupied {
        table_id: TableId,
        session_id: SessionId,
        started_at: DateTime<Local>,
    },
    Freed {
        table_id: TableId,
        session_id: SessionId,
        minutes: u64,
        charge: f64,
    },
    Rejected {
        reason: ReasonCode,
    },
    Tables {
        tables: Vec<TableSnapshot>,
    },
    Current {
        report: CurrentReport,
    },
    Archive {
        report: ArchiveReport,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: u32) -> TableId {
        TableId::new(id)
    }

    #[test]
    fn parse_table_commands() {
        assert_eq!("occupy 3".parse::<Command>(), Ok(Command::Occupy { table_id: table(3) }));
        assert_eq!("FREE 2".parse::<Command>(), Ok(Command::Free { table_id: table(2) }));
        assert_eq!("  toggle   10 ".parse::<Command>(), Ok(Command::Toggle { table_id: table(10) }));
        assert_eq!("7".parse::<Command>(), Ok(Command::Toggle { table_id: table(7) }));
    }

    #[test]
    fn parse_report_commands() {
        assert_eq!("list".parse::<Command>(), Ok(Command::List));
        assert_eq!("current".parse::<Command>(), Ok(Command::Current));
        assert_eq!("Archive".parse::<Command>(), Ok(Command::Archive));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "occupy".parse::<Command>(),
            Err(CommandParseError::MissingTableId {
                command: "occupy".into()
            })
        );
        assert_eq!(
            "free -1".parse::<Command>(),
            Err(CommandParseError::InvalidTableId { value: "-1".into() })
        );
        assert_eq!(
            "list 3".parse::<Command>(),
            Err(CommandParseError::UnexpectedArgument {
                command: "list".into(),
                argument: "3".into()
            })
        );
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn response_serializes_with_type_tag() {
        let response = Response::Rejected {
            reason: ReasonCode::UnknownTable { table_id: table(99) },
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["type"], "rejected");
        assert_eq!(json["reason"]["code"], "unknown_table");
        assert_eq!(json["reason"]["table_id"], 99);
    }
}
