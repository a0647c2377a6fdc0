use std::fmt;
use std::str::FromStr;

use crate::core::timestamp::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    End,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Start => "START",
            EventKind::End => "END",
        }
    }
}

impl FromStr for EventKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("start") {
            Ok(EventKind::Start)
        } else if trimmed.eq_ignore_ascii_case("end") {
            Ok(EventKind::End)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated row of the job log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub job_id: String,
    pub job_name: String,
    pub kind: EventKind,
    pub timestamp: Timestamp,
    /// 1-based line in the input file.
    pub line: u64,
}
