//! Text output for finished schedules: the per-process results block and a
//! character Gantt chart with an idle lane.

use crate::scheduler::{Interval, Pid, Schedule, Ticks};
use std::fmt::Write;

pub const IDLE_LABEL: &str = "Idle";

fn ticks(value: Option<Ticks>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

/// Per-process finish, waiting and turnaround times followed by CPU
/// utilization and averages.
pub fn format_results(schedule: &Schedule) -> String {
    let mut out = String::from("Results:\n");
    for process in &schedule.processes {
        let _ = writeln!(
            out,
            "Process {}: Finish time = {}, Waiting time = {}, Turnaround time = {}",
            process.pid(),
            ticks(process.finish()),
            ticks(process.waiting()),
            ticks(process.turnaround()),
        );
    }
    let _ = writeln!(out, "CPU Utilization: {:.2}%", schedule.cpu_utilization());
    let _ = writeln!(out, "Average waiting time: {:.2}", schedule.average_waiting());
    let _ = writeln!(
        out,
        "Average turnaround time: {:.2}",
        schedule.average_turnaround()
    );
    out
}

/// One row of the chart. `pid` is `None` for the idle lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttLane {
    pub label: String,
    pub pid: Option<Pid>,
    pub cells: Vec<bool>,
}

/// Scales the timeline onto at most `width` columns. A column is marked when
/// any part of its time span belongs to the lane.
pub fn gantt_lanes(schedule: &Schedule, width: usize) -> Vec<GanttLane> {
    let end = match schedule.timeline.end() {
        Some(end) if width > 0 => end,
        _ => return Vec::new(),
    };
    let columns = width.min(end as usize);
    let column_of = |time: Ticks| (time as usize * columns / end as usize).min(columns - 1);
    let mark = |cells: &mut Vec<bool>, start: Ticks, stop: Ticks| {
        for column in column_of(start)..=column_of(stop - 1) {
            cells[column] = true;
        }
    };

    let mut lanes: Vec<GanttLane> = schedule
        .processes
        .iter()
        .map(|process| {
            let mut cells = vec![false; columns];
            for &Interval { start, end, .. } in schedule.timeline.slices_of(process.pid()) {
                mark(&mut cells, start, end);
            }
            GanttLane {
                label: format!("P{}", process.pid()),
                pid: Some(process.pid()),
                cells,
            }
        })
        .collect();

    let mut idle = vec![false; columns];
    for (start, stop) in schedule.timeline.idle_periods() {
        mark(&mut idle, start, stop);
    }
    lanes.push(GanttLane {
        label: IDLE_LABEL.to_owned(),
        pid: None,
        cells: idle,
    });
    lanes
}

/// Character chart, one lane per process plus the idle lane, and a time
/// axis from 0 to the end of the last interval.
pub fn format_gantt(schedule: &Schedule, width: usize) -> String {
    let lanes = gantt_lanes(schedule, width);
    let Some(columns) = lanes.first().map(|lane| lane.cells.len()) else {
        return String::from("(nothing ran)\n");
    };

    let mut out = String::new();
    for lane in &lanes {
        let fill = if lane.pid.is_some() { '█' } else { '░' };
        let cells: String = lane
            .cells
            .iter()
            .map(|&busy| if busy { fill } else { ' ' })
            .collect();
        let _ = writeln!(out, "{:>5} |{}|", lane.label, cells);
    }
    let end = schedule.timeline.end().unwrap_or_default();
    let _ = writeln!(out, "{:>5}  0{:>width$}", "", end, width = columns);
    out
}
