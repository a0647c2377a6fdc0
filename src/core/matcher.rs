use std::collections::HashMap;
use std::fmt;

use crate::core::event::{Event, EventKind};
use crate::core::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnomalyKind {
    DuplicateStart,
    UnmatchedEnd,
    UnmatchedStart,
    NegativeRuntime,
}

impl AnomalyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyKind::DuplicateStart => "DuplicateStart",
            AnomalyKind::UnmatchedEnd => "UnmatchedEnd",
            AnomalyKind::UnmatchedStart => "UnmatchedStart",
            AnomalyKind::NegativeRuntime => "NegativeRuntime",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event pairing problem. `events` are in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyRecord {
    pub job_id: String,
    pub kind: AnomalyKind,
    pub events: Vec<Event>,
}

impl fmt::Display for AnomalyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for job {}", self.kind, self.job_id)?;
        for (idx, event) in self.events.iter().enumerate() {
            let sep = if idx == 0 { " (" } else { ", " };
            write!(f, "{sep}{} at {} line {}", event.kind, event.timestamp, event.line)?;
        }
        if !self.events.is_empty() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

struct PendingStart {
    seq: usize,
    event: Event,
}

/// Pairs START and END events by job id.
///
/// The first START for a job id wins; later STARTs before the END are
/// reported as [`AnomalyKind::DuplicateStart`] and otherwise ignored.
/// Jobs come out in the order their END was seen.
pub fn match_events<I>(events: I) -> (Vec<Job>, Vec<AnomalyRecord>)
where
    I: IntoIterator<Item = Event>,
{
    let mut pending: HashMap<String, PendingStart> = HashMap::new();
    let mut jobs = Vec::new();
    let mut anomalies = Vec::new();

    for (seq, event) in events.into_iter().enumerate() {
        match event.kind {
            EventKind::Start => {
                if let Some(first) = pending.get(&event.job_id) {
                    anomalies.push(AnomalyRecord {
                        job_id: event.job_id.clone(),
                        kind: AnomalyKind::DuplicateStart,
                        events: vec![first.event.clone(), event],
                    });
                } else {
                    pending.insert(event.job_id.clone(), PendingStart { seq, event });
                }
            }
            EventKind::End => match pending.remove(&event.job_id) {
                Some(PendingStart { event: start, .. }) => {
                    let job_name = if start.job_name.is_empty() {
                        event.job_name.clone()
                    } else {
                        start.job_name.clone()
                    };
                    let job = Job::new(
                        event.job_id.clone(),
                        job_name,
                        start.timestamp.clone(),
                        event.timestamp.clone(),
                    );
                    if job.is_negative() {
                        anomalies.push(AnomalyRecord {
                            job_id: event.job_id.clone(),
                            kind: AnomalyKind::NegativeRuntime,
                            events: vec![start, event],
                        });
                    }
                    jobs.push(job);
                }
                None => {
                    anomalies.push(AnomalyRecord {
                        job_id: event.job_id.clone(),
                        kind: AnomalyKind::UnmatchedEnd,
                        events: vec![event],
                    });
                }
            },
        }
    }

    let mut leftover: Vec<PendingStart> = pending.into_values().collect();
    leftover.sort_by_key(|p| p.seq);
    anomalies.extend(leftover.into_iter().map(|p| AnomalyRecord {
        job_id: p.event.job_id.clone(),
        kind: AnomalyKind::UnmatchedStart,
        events: vec![p.event],
    }));

    (jobs, anomalies)
}
