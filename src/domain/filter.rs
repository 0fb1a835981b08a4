// src/domain/filter.rs
use std::fmt;
use std::str::FromStr;

use crate::domain::{CategoryId, Note};

/// Which notes a status request asks the server for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    Active,
    Archived,
    All,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [
        StatusFilter::Active,
        StatusFilter::Archived,
        StatusFilter::All,
    ];

    /// Whether a note with this archived flag belongs under the filter.
    pub fn admits(&self, note: &Note) -> bool {
        match self {
            StatusFilter::Active => !note.archived,
            StatusFilter::Archived => note.archived,
            StatusFilter::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Archived => "archived",
            StatusFilter::All => "all",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(StatusFilter::Active),
            "archived" => Ok(StatusFilter::Archived),
            "all" => Ok(StatusFilter::All),
            other => Err(format!(
                "unknown status filter '{}', expected one of: active, archived, all",
                other
            )),
        }
    }
}

/// A single note list request. A category query ignores the status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteQuery {
    Status(StatusFilter),
    Category(CategoryId),
}
