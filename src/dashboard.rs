use crate::aggregate;
use crate::mood_entry::{mood_label, MoodEntry, NewMood, MOOD_SCALE};
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, ListState, Paragraph},
    Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthChar;

const REFRESH_INTERVAL: Duration = Duration::from_secs(2);
const RECENT_LIMIT: usize = 10;

pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(ApiClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn health(&self) -> bool {
        self.client
            .get(format!("{}/", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    pub fn fetch_moods(&self) -> Result<Vec<MoodEntry>> {
        let entries = self
            .client
            .get(format!("{}/moods", self.base_url))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(entries)
    }

    pub fn submit(&self, name: &str, mood: &str) -> Result<MoodEntry> {
        let stored = self
            .client
            .post(format!("{}/moods", self.base_url))
            .json(&NewMood::new(name, mood))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(stored)
    }
}

enum Notice {
    Info(String),
    Error(String),
}

pub struct DashboardState {
    entries: Vec<MoodEntry>,
    backend_up: bool,
    notice: Option<Notice>,
    name_input: String,
    selected_mood: usize,
}

impl DashboardState {
    fn new() -> Self {
        DashboardState {
            entries: Vec::new(),
            backend_up: false,
            notice: None,
            name_input: String::new(),
            selected_mood: 2,
        }
    }

    fn refresh(&mut self, client: &ApiClient) {
        self.backend_up = client.health();
        if !self.backend_up {
            return;
        }

        match client.fetch_moods() {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                self.backend_up = false;
                self.notice = Some(Notice::Error(format!("failed to load moods: {e}")));
            }
        }
    }

    fn submit(&mut self, client: &ApiClient) {
        if self.name_input.trim().is_empty() {
            self.notice = Some(Notice::Error("Please enter a name first".to_string()));
            return;
        }

        let mood = MOOD_SCALE[self.selected_mood];
        match client.submit(self.name_input.trim(), mood) {
            Ok(stored) => {
                self.notice = Some(Notice::Info(format!(
                    "Thanks {}! Your mood was saved.",
                    stored.name
                )));
                self.name_input.clear();
                self.refresh(client);
            }
            Err(e) => {
                self.notice = Some(Notice::Error(format!("failed to save mood: {e}")));
            }
        }
    }
}

pub struct DashboardUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl DashboardUi {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(DashboardUi { terminal })
    }

    pub fn display(&mut self, state: &DashboardState) -> Result<()> {
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(f.area());

            let title = Paragraph::new("Team Mood Tracker")
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);
            f.render_widget(title, chunks[0]);

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
                .split(chunks[1]);

            render_form(f, body[0], state);
            render_dashboard(f, body[1], state);

            let controls = Line::from(vec![
                Span::raw("Type your name, "),
                Span::styled("Up/Down", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to pick a mood, "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to submit, "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to quit"),
            ]);
            let controls_paragraph = Paragraph::new(controls)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center);
            f.render_widget(controls_paragraph, chunks[2]);
        })?;

        Ok(())
    }
}

impl Drop for DashboardUi {
    fn drop(&mut self) {
        disable_raw_mode().unwrap();
        stdout().execute(LeaveAlternateScreen).unwrap();
    }
}

fn render_form(f: &mut ratatui::Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Min(3),
            ]
            .as_ref(),
        )
        .split(area);

    let name_input = Paragraph::new(state.name_input.clone())
        .block(Block::default().borders(Borders::ALL).title("Your name"));
    f.render_widget(name_input, chunks[0]);

    let moods: Vec<ListItem> = MOOD_SCALE
        .iter()
        .map(|mood| ListItem::new(format!("{} {}", mood, mood_label(mood))))
        .collect();

    let mood_list = List::new(moods)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("How are you feeling?"),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    f.render_stateful_widget(
        mood_list,
        chunks[1],
        &mut ListState::default().with_selected(Some(state.selected_mood)),
    );

    let notice = match &state.notice {
        Some(Notice::Info(msg)) => Paragraph::new(msg.clone())
            .style(Style::default().fg(Color::Green))
            .wrap(ratatui::widgets::Wrap { trim: true }),
        Some(Notice::Error(msg)) => Paragraph::new(msg.clone())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: true }),
        None => Paragraph::new(""),
    };
    f.render_widget(notice, chunks[2]);
}

fn render_dashboard(f: &mut ratatui::Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(9),
                Constraint::Length(3),
                Constraint::Min(6),
            ]
            .as_ref(),
        )
        .split(area);

    let status = if state.backend_up {
        Paragraph::new("backend: ok").style(Style::default().fg(Color::Green))
    } else {
        Paragraph::new("backend: unreachable, retrying...").style(Style::default().fg(Color::Red))
    };
    f.render_widget(status, chunks[0]);

    if state.entries.is_empty() {
        let placeholder = Paragraph::new("No entries yet. Be the first!")
            .block(Block::default().borders(Borders::ALL).title("Moods"))
            .alignment(Alignment::Center);
        f.render_widget(placeholder, chunks[1]);
        return;
    }

    let counts = aggregate::count_by_mood(&state.entries);
    let bars: Vec<(&str, u64)> = MOOD_SCALE
        .iter()
        .filter_map(|mood| counts.get(*mood).map(|count| (*mood, *count as u64)))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Mood distribution"),
        )
        .data(bars.as_slice())
        .bar_width(4)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(chart, chunks[1]);

    let most_common = aggregate::most_common(&counts).unwrap_or_else(|| "-".to_string());
    let average = match aggregate::average_position(&state.entries, &MOOD_SCALE) {
        Ok(Some(avg)) => format!("{avg:.1}/{}", MOOD_SCALE.len() - 1),
        _ => "n/a".to_string(),
    };

    let stats = Line::from(vec![
        Span::raw(format!("Entries: {}", state.entries.len())),
        Span::raw("   "),
        Span::raw(format!("Most common: {most_common}")),
        Span::raw("   "),
        Span::raw(format!(
            "Participants: {}",
            aggregate::distinct_submitters(&state.entries)
        )),
        Span::raw("   "),
        Span::raw(format!("Average: {average}")),
    ]);
    let stats_paragraph = Paragraph::new(stats).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Statistics"),
    );
    f.render_widget(stats_paragraph, chunks[2]);

    let recent: Vec<ListItem> = aggregate::recent_first(&state.entries, RECENT_LIMIT)
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(Span::raw(format!(
                "[{}] {} {}",
                short_timestamp(&entry.timestamp),
                pad_to_width(&entry.name, 18),
                entry.mood
            ))))
        })
        .collect();

    let recent_list =
        List::new(recent).block(Block::default().borders(Borders::ALL).title("Latest entries"));
    f.render_widget(recent_list, chunks[3]);
}

fn short_timestamp(timestamp: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

// Truncate or pad to a fixed display width; emoji and other wide
// characters count as their rendered width.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    while used < width {
        out.push(' ');
        used += 1;
    }

    out
}

pub fn run(client: ApiClient) -> Result<()> {
    let mut ui = DashboardUi::new()?;
    let mut state = DashboardState::new();

    state.refresh(&client);
    let mut last_refresh = Instant::now();

    loop {
        ui.display(&state)?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Enter => state.submit(&client),
                    KeyCode::Up => state.selected_mood = state.selected_mood.saturating_sub(1),
                    KeyCode::Down => {
                        if state.selected_mood + 1 < MOOD_SCALE.len() {
                            state.selected_mood += 1;
                        }
                    }
                    KeyCode::Backspace => {
                        state.name_input.pop();
                    }
                    KeyCode::Char(c) => state.name_input.push(c),
                    _ => {}
                }
            }
        }

        if last_refresh.elapsed() >= REFRESH_INTERVAL {
            state.refresh(&client);
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
