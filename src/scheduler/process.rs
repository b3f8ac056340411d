use super::{
    error::{InvalidInput, InvalidState, SchedulerError},
    Pid, Ticks,
};
use std::collections::HashSet;

/// Input triple for one process, as read from a process file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessDefinition {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessDefinition {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
        }
    }
}

impl From<(Pid, Ticks, Ticks)> for ProcessDefinition {
    fn from((pid, arrival, burst): (Pid, Ticks, Ticks)) -> Self {
        Self::new(pid, arrival, burst)
    }
}

/// Checks the domain rules the engine relies on: positive unique ids,
/// non-negative arrivals and positive bursts.
pub fn validate_definitions(definitions: &[ProcessDefinition]) -> Result<(), SchedulerError> {
    check_domain(
        definitions
            .iter()
            .map(|definition| (definition.pid, definition.arrival, definition.burst)),
    )
}

/// Same checks as [`validate_definitions`], over records handed straight to
/// a policy.
pub fn validate_processes(processes: &[Process]) -> Result<(), SchedulerError> {
    check_domain(
        processes
            .iter()
            .map(|process| (process.pid, process.arrival, process.burst)),
    )
}

fn check_domain<I>(triples: I) -> Result<(), SchedulerError>
where
    I: ExactSizeIterator<Item = (Pid, Ticks, Ticks)>,
{
    let mut seen = HashSet::with_capacity(triples.len());
    for (pid, arrival, burst) in triples {
        if pid == 0 {
            return Err(InvalidInput::ZeroPid.into());
        }
        if !seen.insert(pid) {
            return Err(InvalidInput::DuplicatePid(pid).into());
        }
        if burst <= 0 {
            return Err(InvalidInput::NonPositiveBurst { pid, burst }.into());
        }
        if arrival < 0 {
            return Err(InvalidInput::NegativeArrival { pid, arrival }.into());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Unarrived,
    Ready,
    Running,
    Finished,
}

impl ProcessState {
    // Running -> Ready is a preemption, every other edge moves forward.
    fn can_become(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (Unarrived, Ready) | (Ready, Running) | (Running, Ready) | (Running, Finished)
        )
    }
}

/// A process record for a single policy run.
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    arrival: Ticks,
    burst: Ticks,
    remaining: Ticks,
    state: ProcessState,
    start: Option<Ticks>,
    finish: Option<Ticks>,
    waiting: Option<Ticks>,
    turnaround: Option<Ticks>,
}

impl Process {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            pid,
            arrival,
            burst,
            remaining: burst,
            state: ProcessState::Unarrived,
            start: None,
            finish: None,
            waiting: None,
            turnaround: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival(&self) -> Ticks {
        self.arrival
    }

    pub fn burst(&self) -> Ticks {
        self.burst
    }

    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn start(&self) -> Option<Ticks> {
        self.start
    }

    pub fn finish(&self) -> Option<Ticks> {
        self.finish
    }

    pub fn waiting(&self) -> Option<Ticks> {
        self.waiting
    }

    pub fn turnaround(&self) -> Option<Ticks> {
        self.turnaround
    }

    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Finished
    }

    /// Derives turnaround and waiting time from the finish time.
    ///
    /// Calling it again on the same record gives the same values.
    pub fn calculate_metrics(&mut self) -> Result<(), SchedulerError> {
        let finish = self.finish.ok_or(InvalidState::Unfinished(self.pid))?;
        let turnaround = finish - self.arrival;
        self.turnaround = Some(turnaround);
        self.waiting = Some(turnaround - self.burst);
        Ok(())
    }

    pub(super) fn admit(&mut self) -> Result<(), SchedulerError> {
        self.transition(ProcessState::Ready)
    }

    /// Puts the process on the CPU, recording the first dispatch time.
    pub(super) fn dispatch(&mut self, now: Ticks) -> Result<(), SchedulerError> {
        self.transition(ProcessState::Running)?;
        self.start.get_or_insert(now);
        log::trace!("t={now}: dispatch P{} (remaining {})", self.pid, self.remaining);
        Ok(())
    }

    /// Consumes `ticks` of CPU time. The caller never asks for more than
    /// what is left.
    pub(super) fn execute(&mut self, ticks: Ticks) {
        debug_assert!(self.state == ProcessState::Running);
        debug_assert!(ticks > 0 && ticks <= self.remaining);
        self.remaining -= ticks;
    }

    pub(super) fn preempt(&mut self, now: Ticks) -> Result<(), SchedulerError> {
        self.transition(ProcessState::Ready)?;
        log::trace!("t={now}: preempt P{} (remaining {})", self.pid, self.remaining);
        Ok(())
    }

    /// Marks the process finished. `finish` includes the context switch that
    /// follows its last slice.
    pub(super) fn retire(&mut self, finish: Ticks) -> Result<(), SchedulerError> {
        self.transition(ProcessState::Finished)?;
        self.finish = Some(finish);
        log::trace!("t={finish}: retire P{}", self.pid);
        Ok(())
    }

    fn transition(&mut self, next: ProcessState) -> Result<(), SchedulerError> {
        let allowed = match next {
            ProcessState::Ready if self.state == ProcessState::Running => self.remaining > 0,
            ProcessState::Finished => self.remaining == 0,
            _ => true,
        };
        if !allowed || !self.state.can_become(next) {
            return Err(InvalidState::Transition {
                pid: self.pid,
                from: self.state,
                to: next,
            }
            .into());
        }
        self.state = next;
        Ok(())
    }
}

impl From<&ProcessDefinition> for Process {
    fn from(definition: &ProcessDefinition) -> Self {
        Process::new(definition.pid, definition.arrival, definition.burst)
    }
}
