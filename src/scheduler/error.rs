use super::{process::ProcessState, Pid, Ticks};
use std::fmt;

/// Errors raised by a policy run. A failed run yields no timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    InvalidInput(InvalidInput),
    InvalidConfig(InvalidConfig),
    InvalidState(InvalidState),
}

/// Process definitions that violate the domain rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    ZeroPid,
    DuplicatePid(Pid),
    NonPositiveBurst { pid: Pid, burst: Ticks },
    NegativeArrival { pid: Pid, arrival: Ticks },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfig {
    NonPositiveQuantum(Ticks),
    NegativeContextSwitch(Ticks),
}

/// Internal inconsistencies. Reaching one of these means a policy is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidState {
    Unfinished(Pid),
    Transition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

impl From<InvalidInput> for SchedulerError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<InvalidConfig> for SchedulerError {
    fn from(err: InvalidConfig) -> Self {
        Self::InvalidConfig(err)
    }
}

impl From<InvalidState> for SchedulerError {
    fn from(err: InvalidState) -> Self {
        Self::InvalidState(err)
    }
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::InvalidConfig(err) => write!(f, "invalid config: {err}"),
            Self::InvalidState(err) => write!(f, "invalid state: {err}"),
        }
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPid => write!(f, "process id must be positive"),
            Self::DuplicatePid(pid) => write!(f, "duplicate process id {pid}"),
            Self::NonPositiveBurst { pid, burst } => {
                write!(f, "process {pid} has non-positive burst {burst}")
            }
            Self::NegativeArrival { pid, arrival } => {
                write!(f, "process {pid} has negative arrival {arrival}")
            }
        }
    }
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveQuantum(quantum) => {
                write!(f, "time quantum must be positive, got {quantum}")
            }
            Self::NegativeContextSwitch(cost) => {
                write!(f, "context switch cost must not be negative, got {cost}")
            }
        }
    }
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unfinished(pid) => write!(f, "process {pid} never finished"),
            Self::Transition { pid, from, to } => {
                write!(f, "process {pid} cannot move from {from:?} to {to:?}")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}
