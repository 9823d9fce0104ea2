//! Text rendering and policy comparison for the console summary. Nothing
//! here performs I/O; the binary decides where the text goes.

use std::fmt::Write;

use crate::core::{Access, FaultLogEntry, SeekLogEntry, TimelineSegment};

/// Outcome of comparing two policies on a lower-is-better metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    LeftWins,
    RightWins,
    Tie,
}

pub fn compare<T: PartialOrd>(left: T, right: T) -> Verdict {
    if left < right {
        Verdict::LeftWins
    } else if right < left {
        Verdict::RightWins
    } else {
        Verdict::Tie
    }
}

/// Sentence naming the better of two policies, or declaring a tie.
pub fn verdict_line(verdict: Verdict, left: &str, right: &str) -> String {
    match verdict {
        Verdict::LeftWins => format!("{left} performs better in this case."),
        Verdict::RightWins => format!("{right} performs better in this case."),
        Verdict::Tie => "Both perform equally in this case.".to_string(),
    }
}

/// Two-line Gantt listing: process labels, then segment start times and the
/// final end time underneath.
///
/// ```text
/// | P1 | P2 | P3 |
/// 0    5    8    9
/// ```
pub fn gantt_listing(schedule: &[TimelineSegment]) -> String {
    let Some(last) = schedule.last() else {
        return String::from("(idle)\n");
    };

    let mut bars = String::new();
    let mut ticks = String::new();
    for seg in schedule {
        let cell = format!("| {} ", seg.process);
        let start = seg.start.to_string();
        // Keep a gap after wide start times so later columns stay aligned
        let width = cell.chars().count().max(start.len() + 1);
        let _ = write!(bars, "{cell:<width$}");
        let _ = write!(ticks, "{start:<width$}");
    }
    bars.push_str("|\n");
    let _ = writeln!(ticks, "{}", last.end);

    bars + &ticks
}

pub fn fault_line(entry: &FaultLogEntry) -> String {
    let kind = match entry.access {
        Access::Hit => "Hit  ",
        Access::Fault { .. } => "Fault",
    };
    format!("Page {}: {} -> {:?}", entry.page, kind, entry.frames)
}

pub fn seek_line(seek: &SeekLogEntry) -> String {
    format!("{} -> {} (move {})", seek.from, seek.to, seek.movement)
}
