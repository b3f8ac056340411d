use super::{Pid, Ticks};

/// One stretch of CPU time given to a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Ticks,
    pub end: Ticks,
    pub pid: Pid,
}

impl Interval {
    pub fn new(start: Ticks, end: Ticks, pid: Pid) -> Self {
        Self { start, end, pid }
    }

    pub fn len(&self) -> Ticks {
        self.end - self.start
    }
}

/// Execution intervals in the order the CPU ran them. Gaps between
/// intervals are idle time.
///
/// Back-to-back slices of the same process are stored as one interval, so a
/// process that keeps the CPU across a slice boundary shows up unbroken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, start: Ticks, end: Ticks, pid: Pid) {
        debug_assert!(start < end, "empty interval for P{pid}");
        debug_assert!(
            self.end().map_or(true, |last| last <= start),
            "interval for P{pid} overlaps the previous one"
        );
        match self.intervals.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.intervals.push(Interval::new(start, end, pid)),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// End of the last interval, if anything ran.
    pub fn end(&self) -> Option<Ticks> {
        self.intervals.last().map(|interval| interval.end)
    }

    /// Total CPU time spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.intervals.iter().map(Interval::len).sum()
    }

    /// Gaps during which no process ran, as `(start, end)` pairs. Time
    /// before the first interval counts as idle.
    pub fn idle_periods(&self) -> Vec<(Ticks, Ticks)> {
        let mut idle = Vec::new();
        let mut last_end = 0;
        for interval in &self.intervals {
            if interval.start > last_end {
                idle.push((last_end, interval.start));
            }
            last_end = interval.end;
        }
        idle
    }

    /// Intervals that belong to `pid`.
    pub fn slices_of(&self, pid: Pid) -> impl Iterator<Item = &Interval> {
        self.intervals
            .iter()
            .filter(move |interval| interval.pid == pid)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(intervals: &[(Ticks, Ticks, Pid)]) -> Timeline {
        let mut timeline = Timeline::new();
        for &(start, end, pid) in intervals {
            timeline.push(start, end, pid);
        }
        timeline
    }

    #[test]
    fn busy_time_sums_interval_lengths() {
        let timeline = timeline(&[(0, 3, 1), (4, 6, 2), (6, 7, 1)]);
        assert_eq!(timeline.busy_time(), 6);
        assert_eq!(timeline.end(), Some(7));
    }

    #[test]
    fn idle_periods_include_leading_gap() {
        let timeline = timeline(&[(2, 3, 1), (3, 5, 2), (8, 9, 3)]);
        assert_eq!(timeline.idle_periods(), vec![(0, 2), (5, 8)]);
    }

    #[test]
    fn empty_timeline() {
        let timeline = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
        assert_eq!(timeline.end(), None);
        assert_eq!(timeline.busy_time(), 0);
        assert!(timeline.idle_periods().is_empty());
    }

    #[test]
    fn contiguous_slices_of_one_process_merge() {
        let timeline = timeline(&[(0, 2, 1), (2, 4, 1), (5, 6, 1), (6, 7, 2)]);
        assert_eq!(timeline.len(), 3);
        assert_eq!(
            timeline.intervals(),
            &[
                Interval::new(0, 4, 1),
                Interval::new(5, 6, 1),
                Interval::new(6, 7, 2)
            ]
        );
        assert_eq!(timeline.busy_time(), 6);
    }

    #[test]
    fn slices_of_filters_by_pid() {
        let timeline = timeline(&[(0, 2, 1), (2, 4, 2), (4, 5, 1)]);
        let slices: Vec<Interval> = timeline.slices_of(1).copied().collect();
        assert_eq!(slices, vec![Interval::new(0, 2, 1), Interval::new(4, 5, 1)]);
    }
}
