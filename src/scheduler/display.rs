use super::{viewer::ViewerEvent, Process, Schedule, SchedulerConfig, Ticks};
use crate::report::gantt_lanes;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

const LABEL_WIDTH: u16 = 6;

const LANE_COLORS: [Color; 8] = [
    Color::LightBlue,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightCyan,
    Color::LightRed,
    Color::Blue,
    Color::Magenta,
];

/// Rows taken by the Gantt block: one lane per process, the idle lane and
/// the borders.
fn chart_height(process_count: usize) -> u16 {
    u16::try_from(process_count)
        .unwrap_or(u16::MAX)
        .saturating_add(3)
}

fn cell(value: Option<Ticks>) -> Cell<'static> {
    Cell::from(value.map_or_else(|| "-".to_owned(), |value| value.to_string()))
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        log::warn!("failed to poll terminal events: {err}");
                        break;
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    /// Draws one schedule: a summary line, the Gantt chart and the metrics
    /// table. `position` is the 1-based index of the schedule and the count.
    pub fn draw(
        &mut self,
        schedule: &Schedule,
        config: &SchedulerConfig,
        position: (usize, usize),
    ) -> io::Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(chart_height(schedule.processes.len())),
                    Constraint::Min(5),
                ])
                .split(f.size());

            let summary = Paragraph::new(format!(
                "{} ({}/{}) | context switch {} | quantum {} | CPU utilization {:.2}% | ←/→ switch, q quit",
                schedule.policy,
                position.0,
                position.1,
                config.context_switch,
                config.time_quantum,
                schedule.cpu_utilization(),
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Policy")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(summary, chunks[0]);

            let width = chunks[1].width.saturating_sub(2 + LABEL_WIDTH) as usize;
            let lines: Vec<Spans> = gantt_lanes(schedule, width)
                .into_iter()
                .enumerate()
                .map(|(index, lane)| {
                    let (fill, color) = match lane.pid {
                        Some(_) => ('█', LANE_COLORS[index % LANE_COLORS.len()]),
                        None => ('░', Color::DarkGray),
                    };
                    let cells: String = lane
                        .cells
                        .iter()
                        .map(|&busy| if busy { fill } else { ' ' })
                        .collect();
                    Spans::from(vec![
                        Span::styled(
                            format!("{:>5} ", lane.label),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(cells, Style::default().fg(color)),
                    ])
                })
                .collect();

            let chart = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        "Gantt chart, t = 0..{}",
                        schedule.timeline.end().unwrap_or_default()
                    )),
            );

            f.render_widget(chart, chunks[1]);

            let items = schedule.processes.iter().map(|process: &Process| {
                Row::new(vec![
                    Cell::from(format!("P{}", process.pid()))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.arrival().to_string()),
                    Cell::from(process.burst().to_string()),
                    cell(process.start()),
                    cell(process.finish()),
                    cell(process.waiting()),
                    cell(process.turnaround()),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID",
                        "Arrival",
                        "Burst",
                        "Start",
                        "Finish",
                        "Waiting",
                        "Turnaround",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(6),
                    Constraint::Length(7),
                    Constraint::Length(8),
                    Constraint::Length(10),
                ])
                .block(
                    Block::default()
                        .title(format!(
                            "Metrics | avg waiting {:.2} | avg turnaround {:.2}",
                            schedule.average_waiting(),
                            schedule.average_turnaround()
                        ))
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[2]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> ViewerEvent {
        // Get the user's input and return a matching event
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => ViewerEvent::Quit,
                KeyCode::Right | KeyCode::Tab | KeyCode::Char('n') => ViewerEvent::Next,
                KeyCode::Left | KeyCode::Char('p') => ViewerEvent::Previous,
                _ => ViewerEvent::None,
            },
            Ok(_) => ViewerEvent::None,
            // The input thread is gone, nothing can reach us anymore
            Err(_) => ViewerEvent::Quit,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_height_saturates() {
        assert_eq!(chart_height(0), 3);
        assert_eq!(chart_height(4), 7);
        assert_eq!(chart_height(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(chart_height(1 << 20), u16::MAX);
    }
}
