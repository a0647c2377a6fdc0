use std::io::{BufRead, BufReader, Read};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::debug;

use crate::core::error::{ParseError, ParseErrorReason};
use crate::core::event::{Event, EventKind};
use crate::core::timestamp::Timestamp;

/// Columns per row: timestamp, job name, event, job id.
pub const FIELDS_PER_ROW: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new<I, S>(line: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reads every non-blank line of a job log as one row of fields.
///
/// Each physical line is split on its own with quoting disabled, so a stray
/// `"` only spoils its own row. `line` is the physical 1-based line number.
/// Field counts are not checked here; that is a per-row concern of [`parse`].
pub fn read_rows<R: Read>(reader: R, has_header: bool) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line = 0u64;
    let mut header_pending = has_header;
    let mut rows = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;

        let text = String::from_utf8_lossy(&buf);
        let text = text.trim_end_matches(&['\r', '\n'][..]);
        if text.trim().is_empty() {
            debug!("Line {line}: empty, skipped");
            continue;
        }
        if header_pending {
            header_pending = false;
            debug!("Line {line}: header, skipped");
            continue;
        }

        rows.push(RawRow {
            line,
            fields: split_fields(text)?,
        });
    }

    Ok(rows)
}

fn split_fields(text: &str) -> Result<Vec<String>, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut record = ByteRecord::new();
    csv_reader.read_byte_record(&mut record)?;
    Ok(record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect())
}

/// Turns raw rows into events, collecting a [`ParseError`] for every row that
/// does not validate. Output order follows input order.
pub fn parse(rows: &[RawRow], base_date: NaiveDate) -> (Vec<Event>, Vec<ParseError>) {
    let mut events = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for row in rows {
        match parse_row(row, base_date) {
            Ok(event) => events.push(event),
            Err(reason) => errors.push(ParseError {
                row_index: row.line,
                reason,
            }),
        }
    }

    (events, errors)
}

pub fn parse_row(row: &RawRow, base_date: NaiveDate) -> Result<Event, ParseErrorReason> {
    if row.fields.len() != FIELDS_PER_ROW {
        return Err(ParseErrorReason::FieldCount {
            found: row.fields.len(),
            expected: FIELDS_PER_ROW,
        });
    }

    let ts_str = row.fields[0].trim();
    let job_name = row.fields[1].trim();
    let event = row.fields[2].trim();
    let job_id = row.fields[3].trim();

    let timestamp = Timestamp::parse(ts_str, base_date)
        .ok_or_else(|| ParseErrorReason::InvalidTimestamp(ts_str.to_string()))?;

    let kind = event
        .parse::<EventKind>()
        .map_err(|_| ParseErrorReason::UnknownEvent(event.to_string()))?;

    if job_id.is_empty() {
        return Err(ParseErrorReason::EmptyJobId);
    }

    Ok(Event {
        job_id: job_id.to_string(),
        job_name: job_name.to_string(),
        kind,
        timestamp,
        line: row.line,
    })
}
