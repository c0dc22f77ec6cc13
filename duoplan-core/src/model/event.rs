use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A timed entry on a day's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Display string only, never parsed.
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Event fields as entered by a user, before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEvent {
    pub time: String,
    pub location: String,
    pub kind: EventKind,
    pub notes: Option<String>,
}

impl NewEvent {
    pub fn with_id(self, id: String) -> Event {
        Event {
            id,
            time: self.time,
            location: self.location,
            kind: self.kind,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Activity,
    Food,
    Other,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Activity => "activity",
            EventKind::Food => "food",
            EventKind::Other => "other",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "activity" => Ok(EventKind::Activity),
            "food" => Ok(EventKind::Food),
            "other" => Ok(EventKind::Other),
            _ => Err(format!(
                "Unknown event type '{}'. Expected activity, food or other",
                s
            )),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.location)
    }
}
