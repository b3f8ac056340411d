use std::io;

use super::{display::DisplayTerminal, Schedule, SchedulerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Quit,
    Next,
    Previous,
    None,
}

/// Index of the schedule to show after `event`, wrapping at both ends.
fn select(current: usize, count: usize, event: ViewerEvent) -> usize {
    if count == 0 {
        return 0;
    }
    match event {
        ViewerEvent::Next => (current + 1) % count,
        ViewerEvent::Previous => (current + count - 1) % count,
        ViewerEvent::Quit | ViewerEvent::None => current,
    }
}

/// Interactive viewer that pages through finished schedules.
pub struct ScheduleViewer {
    terminal: DisplayTerminal,
    schedules: Vec<Schedule>,
    config: SchedulerConfig,
    selected: usize,
}

impl ScheduleViewer {
    pub fn new(schedules: Vec<Schedule>, config: SchedulerConfig) -> io::Result<Self> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            schedules,
            config,
            selected: 0,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> io::Result<bool> {
        let count = self.schedules.len();
        if let Some(schedule) = self.schedules.get(self.selected) {
            self.terminal
                .draw(schedule, &self.config, (self.selected + 1, count))?;
        }

        match self.terminal.get_input() {
            ViewerEvent::Quit => return Ok(false),
            event => self.selected = select(self.selected, count, event),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps() {
        assert_eq!(select(2, 3, ViewerEvent::Next), 0);
        assert_eq!(select(0, 3, ViewerEvent::Previous), 2);
        assert_eq!(select(1, 3, ViewerEvent::None), 1);
        assert_eq!(select(0, 0, ViewerEvent::Next), 0);
    }
}
