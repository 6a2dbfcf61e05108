//! Rendering: transport bar, waveform chart, help bar.
//!
//! The chart redraws from the engine's installed buffer every frame, so
//! every install (manual regenerate or mutation tick) is visible at the
//! next frame.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use driftloop::playback::PlaybackState;
use driftloop::scheduler::ScheduleState;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(8),    // Waveform
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_transport(frame, chunks[0], app);
    render_waveform(frame, chunks[1], app);

    let help = Paragraph::new(
        " [Q] Quit  [Space] Play/Pause  [W] Wave  [←→] Pitch  [M] Mutation  [S] Mutate on/off  [↑↓] Amount  [ [ ] ] Gain  [E] Export",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" driftloop ").borders(Borders::ALL);

    let (play_symbol, play_label, play_color) = match app.engine().playback_state() {
        PlaybackState::Running => ("▶", "Playing", Color::Green),
        PlaybackState::Suspended => ("⏸", "Paused", Color::Yellow),
        PlaybackState::Stopped => ("■", "Stopped", Color::DarkGray),
    };

    let (mutate_label, mutate_color) = match app.engine().mutation_state() {
        ScheduleState::Active => ("mutating", Color::Magenta),
        ScheduleState::Idle => ("idle", Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_label),
            Style::default().fg(play_color),
        ),
        Span::styled(
            format!("{}  ", app.wave().name()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} ({})  ", app.mutation().name(), mutate_label),
            Style::default().fg(mutate_color),
        ),
        Span::styled(
            format!("amount {:+.0}  ", app.amount()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("gain {:.1}  ", app.gain()),
            Style::default().fg(Color::White),
        ),
        Span::styled(app.status().to_string(), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_waveform(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.engine().snapshot();

    // Frequency label derived from the installed loop, not the request.
    let title = match &snapshot {
        Some(buffer) => format!(" Waveform — {:.1} Hz ", buffer.frequency()),
        None => " Waveform ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let data: Vec<(f64, f64)> = snapshot
        .as_ref()
        .map(|buffer| {
            let samples = buffer.samples();
            samples
                .iter()
                .enumerate()
                .map(|(i, &sample)| (i as f64 / samples.len() as f64, sample as f64))
                .collect()
        })
        .unwrap_or_default();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
