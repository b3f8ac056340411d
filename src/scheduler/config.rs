use super::{error::InvalidConfig, SchedulerError, Ticks, DEFAULT_CONTEXT_SWITCH, DEFAULT_TIME_QUANTUM};

/// Costs and limits shared by every policy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Charged once after each process completes, not per preemption.
    pub context_switch: Ticks,
    /// Slice length for round robin.
    pub time_quantum: Ticks,
}

impl SchedulerConfig {
    pub fn new(context_switch: Ticks, time_quantum: Ticks) -> Self {
        Self {
            context_switch,
            time_quantum,
        }
    }

    pub fn with_context_switch(self, context_switch: Ticks) -> Self {
        Self {
            context_switch,
            ..self
        }
    }

    pub fn with_time_quantum(self, time_quantum: Ticks) -> Self {
        Self {
            time_quantum,
            ..self
        }
    }

    /// Checks every field, as round robin needs.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        self.validate_context_switch()?;
        if self.time_quantum <= 0 {
            return Err(InvalidConfig::NonPositiveQuantum(self.time_quantum).into());
        }
        Ok(())
    }

    /// Checks only the context switch cost, for policies without a quantum.
    pub fn validate_context_switch(&self) -> Result<(), SchedulerError> {
        if self.context_switch < 0 {
            return Err(InvalidConfig::NegativeContextSwitch(self.context_switch).into());
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_SWITCH, DEFAULT_TIME_QUANTUM)
    }
}
