use super::{
    validate_processes, Process, Scheduler, SchedulerConfig, SchedulerError, Ticks, Timeline,
};

/// Non-preemptive: each process runs to completion in arrival order.
pub struct FcfsScheduler {
    context_switch: Ticks,
}

impl FcfsScheduler {
    pub fn new(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate_context_switch()?;
        Ok(Self {
            context_switch: config.context_switch,
        })
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS Scheduling";

    fn schedule(&self, processes: &mut [Process]) -> Result<(Timeline, Ticks), SchedulerError> {
        validate_processes(processes)?;
        // Stable, so equal arrivals keep their input order
        processes.sort_by_key(Process::arrival);

        let mut timeline = Timeline::new();
        let mut clock = 0;
        for process in processes.iter_mut() {
            if clock < process.arrival() {
                log::debug!("t={clock}: cpu idle until {}", process.arrival());
                clock = process.arrival();
            }
            process.admit()?;
            process.dispatch(clock)?;

            let burst = process.remaining();
            process.execute(burst);
            timeline.push(clock, clock + burst, process.pid());

            clock += burst + self.context_switch;
            process.retire(clock)?;
        }
        Ok((timeline, clock))
    }
}
