//! Reading event lists.
//!
//! Two formats are accepted:
//!
//! - **Text**: one event per line, `<label> <start> <end>`, whitespace
//!   separated. Blank lines are skipped.
//! - **JSON**: an array of `{"label": .., "start": .., "end": ..}` objects.
//!
//! Any malformed line or invalid event rejects the whole input.
//!
//! ```
//! use u_stage::input::parse_text;
//!
//! let events = parse_text("A 1 3\nB 2 5\n").unwrap();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].end, 5);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::Event;
use crate::validation::{validate_events, ValidationError};

/// Errors raised while reading an event list.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A text line is not `<label> <start> <end>`.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The JSON document is not an array of events.
    #[error("invalid JSON event list: {0}")]
    Json(#[from] serde_json::Error),

    /// The events parsed but failed validation.
    #[error("{} invalid event(s): {}", .0.len(), join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialized form of an event list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `<label> <start> <end>` per line.
    #[default]
    Text,
    /// JSON array of events.
    Json,
}

impl InputFormat {
    /// Guesses the format from a file extension (`.json` → JSON, else text).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown input format '{other}'")),
        }
    }
}

/// Parses the line-oriented text format.
///
/// Does not validate interval lengths; see [`load_events`].
pub fn parse_text(text: &str) -> Result<Vec<Event>, InputError> {
    let mut events = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 3 {
            return Err(InputError::Parse {
                line,
                reason: format!("expected '<label> <start> <end>', found {} field(s)", tokens.len()),
            });
        }

        let start = parse_time(tokens[1], line, "start")?;
        let end = parse_time(tokens[2], line, "end")?;
        events.push(Event::new(tokens[0], start, end));
    }

    Ok(events)
}

fn parse_time(token: &str, line: usize, field: &str) -> Result<i64, InputError> {
    token.parse::<i64>().map_err(|e| InputError::Parse {
        line,
        reason: format!("{field} time '{token}' is not an integer: {e}"),
    })
}

/// Parses a JSON array of events.
pub fn parse_json(text: &str) -> Result<Vec<Event>, InputError> {
    Ok(serde_json::from_str(text)?)
}

/// Parses `text` in the given format.
pub fn parse_events(text: &str, format: InputFormat) -> Result<Vec<Event>, InputError> {
    match format {
        InputFormat::Text => parse_text(text),
        InputFormat::Json => parse_json(text),
    }
}

/// Reads and parses an event file without validating it.
pub fn read_events(path: &Path, format: InputFormat) -> Result<Vec<Event>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let events = parse_events(&text, format)?;
    tracing::debug!(path = %path.display(), events = events.len(), "read event list");
    Ok(events)
}

/// Reads, parses and validates an event file.
pub fn load_events(path: &Path, format: InputFormat) -> Result<Vec<Event>, InputError> {
    let events = read_events(path, format)?;
    validate_events(&events).map_err(InputError::Invalid)?;
    Ok(events)
}

/// Renders events in the text format accepted by [`parse_text`].
pub fn to_text(events: &[Event]) -> String {
    events
        .iter()
        .map(|e| format!("{} {} {}\n", e.label, e.start, e.end))
        .collect()
}
