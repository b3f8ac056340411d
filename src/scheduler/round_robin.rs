use super::{
    validate_processes, Process, Scheduler, SchedulerConfig, SchedulerError, Ticks, Timeline,
};
use std::collections::VecDeque;

/// Preemptive round robin with a fixed quantum.
///
/// Processes that arrive while a slice runs are queued ahead of the process
/// that slice preempted.
pub struct RoundRobinScheduler {
    quantum: Ticks,
    context_switch: Ticks,
}

impl RoundRobinScheduler {
    pub fn new(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            quantum: config.time_quantum,
            context_switch: config.context_switch,
        })
    }

    // Moves every process that has arrived by `clock` to the tail of `ready`.
    fn admit_arrivals(
        processes: &mut [Process],
        next: &mut usize,
        clock: Ticks,
        ready: &mut VecDeque<usize>,
    ) -> Result<(), SchedulerError> {
        while *next < processes.len() && processes[*next].arrival() <= clock {
            processes[*next].admit()?;
            ready.push_back(*next);
            *next += 1;
        }
        Ok(())
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round-Robin Scheduling";

    fn schedule(&self, processes: &mut [Process]) -> Result<(Timeline, Ticks), SchedulerError> {
        validate_processes(processes)?;
        processes.sort_by_key(Process::arrival);

        let mut timeline = Timeline::new();
        let mut ready = VecDeque::with_capacity(processes.len());
        let mut clock = 0;
        let mut next = 0;

        while next < processes.len() || !ready.is_empty() {
            Self::admit_arrivals(processes, &mut next, clock, &mut ready)?;

            let Some(index) = ready.pop_front() else {
                let arrival = processes[next].arrival();
                log::debug!("t={clock}: cpu idle until {arrival}");
                clock = arrival;
                continue;
            };

            let process = &mut processes[index];
            process.dispatch(clock)?;
            let slice = process.remaining().min(self.quantum);
            process.execute(slice);
            timeline.push(clock, clock + slice, process.pid());
            clock += slice;

            if process.remaining() > 0 {
                process.preempt(clock)?;
                Self::admit_arrivals(processes, &mut next, clock, &mut ready)?;
                ready.push_back(index);
            } else {
                clock += self.context_switch;
                process.retire(clock)?;
            }
        }
        Ok((timeline, clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{
        FcfsScheduler, InvalidConfig, Interval, ProcessDefinition, Schedule,
    };

    fn definitions(triples: &[(u32, Ticks, Ticks)]) -> Vec<ProcessDefinition> {
        triples.iter().copied().map(ProcessDefinition::from).collect()
    }

    fn run(triples: &[(u32, Ticks, Ticks)], quantum: Ticks, context_switch: Ticks) -> Schedule {
        RoundRobinScheduler::new(&SchedulerConfig::new(context_switch, quantum))
            .unwrap()
            .simulate(&definitions(triples))
            .unwrap()
    }

    fn intervals(schedule: &Schedule) -> Vec<(Ticks, Ticks, u32)> {
        schedule
            .timeline
            .iter()
            .map(|&Interval { start, end, pid }| (start, end, pid))
            .collect()
    }

    #[test]
    fn alternates_slices() {
        let schedule = run(&[(1, 0, 5), (2, 1, 5)], 2, 0);
        assert_eq!(
            intervals(&schedule),
            vec![
                (0, 2, 1),
                (2, 4, 2),
                (4, 6, 1),
                (6, 8, 2),
                (8, 9, 1),
                (9, 10, 2)
            ]
        );
        // Run alone, P1 would have finished at 5.
        assert_eq!(schedule.process(1).and_then(Process::finish), Some(9));
        assert_eq!(schedule.process(2).and_then(Process::finish), Some(10));
    }

    #[test]
    fn arrivals_during_slice_go_before_preempted_process() {
        let schedule = run(&[(1, 0, 3), (2, 0, 3), (3, 1, 2)], 2, 0);
        assert_eq!(
            intervals(&schedule),
            vec![(0, 2, 1), (2, 4, 2), (4, 6, 3), (6, 7, 1), (7, 8, 2)]
        );
    }

    #[test]
    fn arrival_at_slice_end_goes_before_preempted_process() {
        // P2 arrives at t=2, the moment P1's first slice ends
        let schedule = run(&[(1, 0, 4), (2, 2, 2)], 2, 0);
        assert_eq!(
            intervals(&schedule),
            vec![(0, 2, 1), (2, 4, 2), (4, 6, 1)]
        );
        assert_eq!(schedule.process(2).and_then(Process::waiting), Some(0));
    }

    #[test]
    fn context_switch_only_after_completion() {
        let schedule = run(&[(1, 0, 3), (2, 0, 2)], 2, 1);
        assert_eq!(intervals(&schedule), vec![(0, 2, 1), (2, 4, 2), (5, 6, 1)]);
        assert_eq!(schedule.process(2).and_then(Process::finish), Some(5));
        assert_eq!(schedule.process(1).and_then(Process::finish), Some(7));
        assert_eq!(schedule.total_time, 7);
    }

    #[test]
    fn idle_until_next_arrival() {
        let schedule = run(&[(1, 0, 1), (2, 4, 3)], 2, 0);
        assert_eq!(intervals(&schedule), vec![(0, 1, 1), (4, 7, 2)]);
        assert_eq!(schedule.process(2).and_then(Process::start), Some(4));
    }

    #[test]
    fn large_quantum_matches_fcfs() {
        let defs = definitions(&[(1, 0, 5), (2, 1, 3), (3, 2, 8)]);
        let config = SchedulerConfig::new(1, 8);
        let rr = RoundRobinScheduler::new(&config).unwrap().simulate(&defs).unwrap();
        let fcfs = FcfsScheduler::new(&config).unwrap().simulate(&defs).unwrap();
        assert_eq!(rr.timeline, fcfs.timeline);
        assert_eq!(rr.total_time, fcfs.total_time);
    }

    #[test]
    fn rejects_non_positive_quantum() {
        for quantum in [0, -3] {
            assert_eq!(
                RoundRobinScheduler::new(&SchedulerConfig::new(1, quantum)).err(),
                Some(SchedulerError::InvalidConfig(
                    InvalidConfig::NonPositiveQuantum(quantum)
                ))
            );
        }
    }

    #[test]
    fn single_process() {
        let schedule = run(&[(1, 0, 7)], 3, 0);
        assert_eq!(intervals(&schedule), vec![(0, 7, 1)]);
        assert_eq!(schedule.processes[0].waiting(), Some(0));
    }
}
