//! Reads process definitions from a text file.
//!
//! Each line holds `pid arrival burst` separated by whitespace. Blank lines
//! and lines starting with `#` are skipped. Only the shape of a line is
//! checked here; domain rules are enforced by the scheduler.

use crate::scheduler::{Pid, ProcessDefinition, Ticks};
use std::{fmt, fs, io, path::Path};

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Malformed { line: usize, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

pub fn read_processes(path: impl AsRef<Path>) -> Result<Vec<ProcessDefinition>, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let definitions = parse_processes(&contents)?;
    log::debug!(
        "loaded {} process definitions from {}",
        definitions.len(),
        path.display()
    );
    Ok(definitions)
}

pub fn parse_processes(contents: &str) -> Result<Vec<ProcessDefinition>, LoadError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_number: usize, line: &str) -> Result<ProcessDefinition, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        line: line_number,
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[pid, arrival, burst] = fields.as_slice() else {
        return Err(malformed(format!("expected 3 fields, found {}", fields.len())));
    };

    let pid = pid
        .parse::<Pid>()
        .map_err(|_| malformed(format!("invalid process id {pid:?}")))?;
    let arrival = arrival
        .parse::<Ticks>()
        .map_err(|_| malformed(format!("invalid arrival time {arrival:?}")))?;
    let burst = burst
        .parse::<Ticks>()
        .map_err(|_| malformed(format!("invalid burst time {burst:?}")))?;

    Ok(ProcessDefinition::new(pid, arrival, burst))
}
