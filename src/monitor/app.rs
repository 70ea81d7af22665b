//! Monitor TUI application.
//!
//! The main application struct, the two view state machines, and the event
//! loop for the `monitor` command.
//!
//! Each view owns its own [`Resource`]/[`Loader`] pair and fetch lifecycle;
//! there is no shared mutable state between them. A view issues exactly one
//! request when it is activated. Opening the detail screen for a different
//! run re-activates it from scratch; opening it for the run already shown
//! does nothing. Returning to the list re-activates the list view, which
//! fetches again.

use super::views::View;
use crate::client::RunsApi;
use crate::error::Result;
use crate::model::{
    duration_of, format_local_datetime, format_local_time, visual_for, Run, RunDetail, StatusTone,
};
use crate::resource::{Loader, Resource};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Color Constants
// ============================================================================

/// Cyan - primary branding color, used for headers and highlights
const COLOR_PRIMARY: Color = Color::Cyan;
/// Green - success tone
const COLOR_SUCCESS: Color = Color::Green;
/// Red - error tone
const COLOR_ERROR: Color = Color::Red;
/// Blue - neutral/info tone (running and unknown statuses)
const COLOR_INFO: Color = Color::Blue;
/// Gray - dimmed/secondary text
const COLOR_DIM: Color = Color::DarkGray;

/// Tick for the render loop; also how often settled fetches are applied.
const POLL_TICK: Duration = Duration::from_millis(100);

/// Map a status tone to its terminal color.
fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Success => COLOR_SUCCESS,
        StatusTone::Error => COLOR_ERROR,
        StatusTone::Info => COLOR_INFO,
    }
}

/// Build the renderable text for a log message, one line per source line.
///
/// Messages can span multiple lines; collapsing them would destroy
/// structured output like stack traces, so each line becomes its own row
/// line in the table cell.
fn message_text(message: &str) -> Text<'_> {
    Text::from(message.lines().map(Line::from).collect::<Vec<_>>())
}

// ============================================================================
// View state machines
// ============================================================================

/// Fetch-render state for the run list screen.
///
/// Activation (construction) issues a single request for the whole run
/// collection; the state machine then moves from `Loading` to `Ready` or
/// `Failed` and stays there until the view is re-activated.
pub struct RunListView {
    resource: Resource<Vec<Run>>,
    loader: Loader<Vec<Run>>,
    selected: usize,
}

impl RunListView {
    /// Activate the view, issuing its one fetch.
    pub fn new(api: Arc<dyn RunsApi>) -> Self {
        let mut loader = Loader::new();
        loader.start(move || api.list_runs());
        Self {
            resource: Resource::Loading,
            loader,
            selected: 0,
        }
    }

    /// Apply a settled fetch outcome, if one has arrived.
    pub fn poll(&mut self) {
        if let Some(outcome) = self.loader.poll() {
            self.resource = match outcome {
                Ok(runs) => Resource::Ready(runs),
                Err(message) => Resource::Failed(message),
            };
        }
    }

    pub fn resource(&self) -> &Resource<Vec<Run>> {
        &self.resource
    }

    /// The run the cursor is on, if any are loaded.
    pub fn selected_run(&self) -> Option<&Run> {
        self.resource.ready()?.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let max = self
            .resource
            .ready()
            .map(|runs| runs.len().saturating_sub(1))
            .unwrap_or(0);
        if self.selected < max {
            self.selected += 1;
        }
    }
}

/// Fetch-render state for one run's detail screen.
pub struct RunDetailView {
    run_id: i64,
    resource: Resource<RunDetail>,
    loader: Loader<RunDetail>,
    scroll: usize,
}

impl RunDetailView {
    /// Activate the view for `run_id`, issuing its one fetch.
    pub fn new(api: Arc<dyn RunsApi>, run_id: i64) -> Self {
        let mut loader = Loader::new();
        loader.start(move || api.run_detail(run_id));
        Self {
            run_id,
            resource: Resource::Loading,
            loader,
            scroll: 0,
        }
    }

    pub fn poll(&mut self) {
        if let Some(outcome) = self.loader.poll() {
            self.resource = match outcome {
                Ok(detail) => Resource::Ready(detail),
                Err(message) => Resource::Failed(message),
            };
        }
    }

    pub fn run_id(&self) -> i64 {
        self.run_id
    }

    pub fn resource(&self) -> &Resource<RunDetail> {
        &self.resource
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self
            .resource
            .ready()
            .map(|detail| detail.logs.len().saturating_sub(1))
            .unwrap_or(0);
        if self.scroll < max {
            self.scroll += 1;
        }
    }
}

// ============================================================================
// Application
// ============================================================================

/// The main monitor application state.
pub struct MonitorApp {
    api: Arc<dyn RunsApi>,
    list: RunListView,
    /// Present while the detail screen is open.
    detail: Option<RunDetailView>,
    should_quit: bool,
}

impl MonitorApp {
    /// Create the app and activate the run list view.
    pub fn new(api: Arc<dyn RunsApi>) -> Self {
        let list = RunListView::new(Arc::clone(&api));
        Self {
            api,
            list,
            detail: None,
            should_quit: false,
        }
    }

    /// Apply any settled fetches. Called once per event-loop tick.
    pub fn poll(&mut self) {
        self.list.poll();
        if let Some(detail) = &mut self.detail {
            detail.poll();
        }
    }

    /// The screen currently shown.
    pub fn current_view(&self) -> View {
        match &self.detail {
            Some(detail) => View::RunDetail {
                run_id: detail.run_id(),
            },
            None => View::RunList,
        }
    }

    pub fn list(&self) -> &RunListView {
        &self.list
    }

    pub fn detail(&self) -> Option<&RunDetailView> {
        self.detail.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Open the detail screen for `run_id`.
    ///
    /// A different id (or no detail open) activates a fresh view from
    /// `Loading`; the id already shown is a no-op and triggers no fetch.
    pub fn open_detail(&mut self, run_id: i64) {
        if self.detail.as_ref().map(RunDetailView::run_id) != Some(run_id) {
            self.detail = Some(RunDetailView::new(Arc::clone(&self.api), run_id));
        }
    }

    /// Close the detail screen and re-activate the list view.
    pub fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.list = RunListView::new(Arc::clone(&self.api));
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(detail) = &mut self.detail {
            match key {
                KeyCode::Esc => self.close_detail(),
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Up => detail.scroll_up(),
                KeyCode::Down => detail.scroll_down(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => self.list.move_up(),
            KeyCode::Down => self.list.move_down(),
            KeyCode::Enter => {
                if let Some(run) = self.list.selected_run() {
                    let id = run.id;
                    self.open_detail(id);
                }
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the UI to the terminal.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header with breadcrumb
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        match &self.detail {
            Some(detail) => self.render_detail(frame, chunks[1], detail),
            None => self.render_list(frame, chunks[1]),
        }
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let breadcrumb = Paragraph::new(Line::from(Span::styled(
            self.current_view().breadcrumb(),
            Style::default()
                .fg(COLOR_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(" runwatch "));
        frame.render_widget(breadcrumb, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.detail {
            Some(_) => " esc back · ↑/↓ scroll · q quit ",
            None => " ↑/↓ select · enter open · q quit ",
        };
        let footer = Paragraph::new(hints).style(Style::default().fg(COLOR_DIM));
        frame.render_widget(footer, area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        match self.list.resource() {
            Resource::Loading => {
                render_loading(frame, area, " Runs ", "Loading runs...");
            }
            Resource::Failed(message) => {
                render_failure(frame, area, " Runs ", &format!("Failed to load runs: {message}"));
            }
            Resource::Ready(runs) => self.render_run_table(frame, area, runs),
        }
    }

    fn render_run_table(&self, frame: &mut Frame, area: Rect, runs: &[Run]) {
        let header = Row::new(["", "ID", "Group", "Status", "Started", "Duration"]).style(
            Style::default()
                .fg(COLOR_PRIMARY)
                .add_modifier(Modifier::BOLD),
        );

        let rows = runs.iter().enumerate().map(|(i, run)| {
            let visual = visual_for(run.status);
            let selected = i == self.list.selected;
            let marker = if selected { "▶" } else { " " };
            let row_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(run.id.to_string()),
                Cell::from(run.group_name.as_str()),
                Cell::from(Span::styled(
                    visual.label,
                    Style::default().fg(tone_color(visual.tone)),
                )),
                Cell::from(format_local_datetime(&run.start_time)),
                Cell::from(duration_of(run)),
            ])
            .style(row_style)
        });

        let widths = [
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(19),
            Constraint::Length(9),
        ];
        let title = format!(" Runs ({}) ", runs.len());
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(table, area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &RunDetailView) {
        let title = format!(" Run #{} ", detail.run_id());
        match detail.resource() {
            Resource::Loading => {
                render_loading(frame, area, &title, "Loading run detail...");
            }
            Resource::Failed(message) => {
                render_failure(
                    frame,
                    area,
                    &title,
                    &format!("Failed to load run details: {message}"),
                );
            }
            Resource::Ready(data) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(5), Constraint::Min(0)])
                    .split(area);
                self.render_summary(frame, chunks[0], data, &title);
                self.render_logs(frame, chunks[1], data, detail.scroll);
            }
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, data: &RunDetail, title: &str) {
        let visual = visual_for(data.run.status);
        let lines = vec![
            Line::from(vec![
                Span::styled("Group:   ", Style::default().fg(COLOR_DIM)),
                Span::styled(data.run.group_name.as_str(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Status:  ", Style::default().fg(COLOR_DIM)),
                Span::styled(visual.label, Style::default().fg(tone_color(visual.tone))),
            ]),
            Line::from(vec![
                Span::styled("Started: ", Style::default().fg(COLOR_DIM)),
                Span::styled(
                    format_local_datetime(&data.run.start_time),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];
        let summary = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
        frame.render_widget(summary, area);
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect, data: &RunDetail, scroll: usize) {
        let header = Row::new(["Time", "Task", "Message"]).style(
            Style::default()
                .fg(COLOR_PRIMARY)
                .add_modifier(Modifier::BOLD),
        );

        let rows = data.logs.iter().skip(scroll).map(|log| {
            let text = message_text(&log.message);
            let height = text.lines.len().max(1) as u16;
            Row::new(vec![
                Cell::from(format_local_time(&log.timestamp)),
                Cell::from(log.task_name.as_str()),
                Cell::from(text),
            ])
            .height(height)
        });

        let widths = [
            Constraint::Length(8),
            Constraint::Length(16),
            Constraint::Min(30),
        ];
        let title = format!(" Logs ({}) ", data.logs.len());
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(table, area);
    }
}

fn render_loading(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message).style(Style::default().fg(COLOR_DIM)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, area);
}

fn render_failure(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(COLOR_ERROR))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Event loop
// ============================================================================

fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Run the monitor TUI until the user quits.
pub fn run_monitor(api: Arc<dyn RunsApi>) -> Result<()> {
    // Restore the terminal if a panic unwinds through the event loop.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = init_terminal()?;
    let mut app = MonitorApp::new(api);

    loop {
        app.poll();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_TICK)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release or repeat)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
