use super::{
    validate_processes, Process, Scheduler, SchedulerConfig, SchedulerError, Ticks, Timeline,
};
use std::{cmp::Reverse, collections::BinaryHeap};

/// Preemptive shortest-remaining-time-first.
///
/// Ready processes sit in a min-heap keyed on `(remaining, index)`, where
/// `index` is the position in arrival order. Equal remaining times go to the
/// process that arrived first, so a new arrival never preempts on a tie.
///
/// A slice always ends at the next arrival, whether or not the newcomer is
/// shorter. When the running process wins the next pick it just continues,
/// and the timeline merges the two slices.
pub struct SrtScheduler {
    context_switch: Ticks,
}

impl SrtScheduler {
    pub fn new(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate_context_switch()?;
        Ok(Self {
            context_switch: config.context_switch,
        })
    }
}

impl Scheduler for SrtScheduler {
    const NAME: &'static str = "SRT Scheduling";

    fn schedule(&self, processes: &mut [Process]) -> Result<(Timeline, Ticks), SchedulerError> {
        validate_processes(processes)?;
        processes.sort_by_key(Process::arrival);

        let mut timeline = Timeline::new();
        let mut ready: BinaryHeap<Reverse<(Ticks, usize)>> = BinaryHeap::new();
        let mut clock = 0;
        // Index of the first process that has not arrived yet
        let mut next = 0;

        while next < processes.len() || !ready.is_empty() {
            while next < processes.len() && processes[next].arrival() <= clock {
                processes[next].admit()?;
                ready.push(Reverse((processes[next].remaining(), next)));
                next += 1;
            }

            let Some(Reverse((_, index))) = ready.pop() else {
                let arrival = processes[next].arrival();
                log::debug!("t={clock}: cpu idle until {arrival}");
                clock = arrival;
                continue;
            };

            let next_arrival = processes.get(next).map(Process::arrival);
            let process = &mut processes[index];
            process.dispatch(clock)?;

            let slice = match next_arrival {
                Some(arrival) => process.remaining().min(arrival - clock),
                None => process.remaining(),
            };
            process.execute(slice);
            timeline.push(clock, clock + slice, process.pid());
            clock += slice;

            if process.remaining() > 0 {
                process.preempt(clock)?;
                ready.push(Reverse((process.remaining(), index)));
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
    use crate::scheduler::{Interval, ProcessDefinition, Schedule};

    fn run(triples: &[(u32, Ticks, Ticks)], context_switch: Ticks) -> Schedule {
        let definitions: Vec<ProcessDefinition> =
            triples.iter().copied().map(ProcessDefinition::from).collect();
        SrtScheduler::new(&SchedulerConfig::default().with_context_switch(context_switch))
            .unwrap()
            .simulate(&definitions)
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
    fn shorter_arrival_preempts() {
        let schedule = run(&[(1, 0, 8), (2, 1, 4)], 0);
        assert_eq!(intervals(&schedule), vec![(0, 1, 1), (1, 5, 2), (5, 12, 1)]);
        assert_eq!(schedule.process(2).and_then(Process::finish), Some(5));
        assert_eq!(schedule.process(1).and_then(Process::finish), Some(12));
        assert_eq!(schedule.process(1).and_then(Process::start), Some(0));
    }

    #[test]
    fn equal_remaining_does_not_preempt() {
        let schedule = run(&[(1, 0, 4), (2, 1, 3)], 0);
        assert_eq!(intervals(&schedule), vec![(0, 4, 1), (4, 7, 2)]);
    }

    #[test]
    fn longer_arrival_does_not_preempt() {
        let schedule = run(&[(1, 0, 3), (2, 1, 9)], 0);
        assert_eq!(intervals(&schedule), vec![(0, 3, 1), (3, 12, 2)]);
    }

    #[test]
    fn picks_least_remaining_among_many() {
        let schedule = run(&[(1, 0, 10), (2, 2, 3), (3, 3, 1)], 0);
        assert_eq!(
            intervals(&schedule),
            vec![(0, 2, 1), (2, 3, 2), (3, 4, 3), (4, 6, 2), (6, 14, 1)]
        );
    }

    #[test]
    fn jumps_over_idle_time() {
        let schedule = run(&[(1, 0, 2), (2, 5, 1)], 0);
        assert_eq!(intervals(&schedule), vec![(0, 2, 1), (5, 6, 2)]);
        assert_eq!(schedule.total_time, 6);
    }

    #[test]
    fn context_switch_follows_each_completion() {
        let schedule = run(&[(1, 0, 2), (2, 0, 3)], 2);
        assert_eq!(intervals(&schedule), vec![(0, 2, 1), (4, 7, 2)]);
        assert_eq!(schedule.process(1).and_then(Process::finish), Some(4));
        assert_eq!(schedule.process(2).and_then(Process::finish), Some(9));
        assert_eq!(schedule.total_time, 9);
    }

    #[test]
    fn single_process() {
        let schedule = run(&[(1, 0, 5)], 0);
        assert_eq!(intervals(&schedule), vec![(0, 5, 1)]);
        assert_eq!(schedule.processes[0].waiting(), Some(0));
    }
}
