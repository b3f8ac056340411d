mod config;
mod display;
mod error;
mod fcfs;
mod process;
mod round_robin;
mod srt;
mod timeline;
mod viewer;

use std::{fmt, thread};

pub use config::SchedulerConfig;
pub use error::{InvalidConfig, InvalidInput, InvalidState, SchedulerError};
pub use fcfs::FcfsScheduler;
pub use process::{
    validate_definitions, validate_processes, Process, ProcessDefinition, ProcessState,
};
pub use round_robin::RoundRobinScheduler;
pub use srt::SrtScheduler;
pub use timeline::{Interval, Timeline};
pub use viewer::ScheduleViewer;

/// Logical time. Nothing here is measured against a wall clock.
pub type Ticks = i64;
pub type Pid = u32;

pub const DEFAULT_CONTEXT_SWITCH: Ticks = 1;
pub const DEFAULT_TIME_QUANTUM: Ticks = 4;

pub trait Scheduler {
    const NAME: &'static str;

    /// Runs every process to completion, returning the timeline and the
    /// clock value when the run ended. Records that break the domain rules
    /// are rejected before anything runs.
    fn schedule(&self, processes: &mut [Process]) -> Result<(Timeline, Ticks), SchedulerError>;

    /// Builds a fresh record set from `definitions`, schedules it and
    /// fills in the per-process metrics.
    fn simulate(&self, definitions: &[ProcessDefinition]) -> Result<Schedule, SchedulerError> {
        validate_definitions(definitions)?;
        let mut processes: Vec<Process> = definitions.iter().map(Process::from).collect();
        let (timeline, total_time) = self.schedule(&mut processes)?;
        for process in &mut processes {
            process.calculate_metrics()?;
        }

        let schedule = Schedule {
            policy: Self::NAME,
            processes,
            timeline,
            total_time,
        };
        log::info!(
            "{}: {} processes done at t={}, cpu utilization {:.2}%",
            Self::NAME,
            schedule.processes.len(),
            total_time,
            schedule.cpu_utilization()
        );
        Ok(schedule)
    }
}

/// Finalized output of one policy run.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub policy: &'static str,
    /// Records in arrival order, with metrics filled in.
    pub processes: Vec<Process>,
    pub timeline: Timeline,
    pub total_time: Ticks,
}

impl Schedule {
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn total_waiting(&self) -> Ticks {
        self.processes.iter().filter_map(Process::waiting).sum()
    }

    /// `(total_time - Σ waiting) / total_time * 100`. Zero for an empty run.
    pub fn cpu_utilization(&self) -> f64 {
        if self.total_time == 0 {
            return 0.0;
        }
        (self.total_time - self.total_waiting()) as f64 / self.total_time as f64 * 100.0
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(Process::waiting)
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(Process::turnaround)
    }

    fn average(&self, metric: fn(&Process) -> Option<Ticks>) -> f64 {
        if self.processes.is_empty() {
            return 0.0;
        }
        let total: Ticks = self.processes.iter().filter_map(metric).sum();
        total as f64 / self.processes.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    FirstComeFirstServed,
    ShortestRemainingTime,
    RoundRobin,
}

impl Policy {
    pub const ALL: [Policy; 3] = [
        Policy::FirstComeFirstServed,
        Policy::ShortestRemainingTime,
        Policy::RoundRobin,
    ];

    pub fn run(
        &self,
        definitions: &[ProcessDefinition],
        config: &SchedulerConfig,
    ) -> Result<Schedule, SchedulerError> {
        match self {
            Policy::FirstComeFirstServed => FcfsScheduler::new(config)?.simulate(definitions),
            Policy::ShortestRemainingTime => SrtScheduler::new(config)?.simulate(definitions),
            Policy::RoundRobin => RoundRobinScheduler::new(config)?.simulate(definitions),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::FirstComeFirstServed => write!(f, "FCFS"),
            Policy::ShortestRemainingTime => write!(f, "SRT"),
            Policy::RoundRobin => write!(f, "RR"),
        }
    }
}

/// Runs each policy on its own thread. Every run builds its own records, so
/// only the read-only definitions are shared.
pub fn simulate_all(
    policies: &[Policy],
    definitions: &[ProcessDefinition],
    config: &SchedulerConfig,
) -> Result<Vec<Schedule>, SchedulerError> {
    thread::scope(|scope| {
        let handles: Vec<_> = policies
            .iter()
            .map(|policy| scope.spawn(move || policy.run(definitions, config)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
