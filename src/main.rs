use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Frame, Terminal, layout::{Alignment, Constraint, Direction, Layout, Rect}, style::Modifier, text::{Line, Span}, widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs}};
use tracing_subscriber::EnvFilter;

use todogrid::application::todo_collection::{TodoCollection, TodoStore};
use todogrid::domain::todo::TodoDraft;
use todogrid::domain::validation::FieldPolicy;

mod theme;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let policy = FieldPolicy {
        require_due_date: env_flag("TODOGRID_REQUIRE_DUE_DATE", true),
        require_priority: env_flag("TODOGRID_REQUIRE_PRIORITY", true),
    };
    tracing::info!(?policy, "starting");
    // The collection lives exactly as long as this view; nothing persists.
    let store = TodoCollection::new(policy);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => default,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page { Home, Todos }

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode { Browse, Entry }

#[derive(Clone, Copy, PartialEq, Eq)]
enum ActiveField { Description, DueDate, Priority }

struct App<S: TodoStore> {
    store: S,
    page: Page,
    mode: Mode,
    selected: usize,
    table_state: TableState,
    field: ActiveField,
    draft_description: String,
    draft_due: String,
    draft_priority: String,
    notice: Option<String>,
    last_tick: Instant,
}

impl<S: TodoStore> App<S> {
    fn new(store: S) -> Self {
        Self {
            store,
            page: Page::Home,
            mode: Mode::Browse,
            selected: 0,
            table_state: TableState::default(),
            field: ActiveField::Description,
            draft_description: String::new(),
            draft_due: String::new(),
            draft_priority: String::new(),
            notice: None,
            last_tick: Instant::now(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.list().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= len { self.selected = len - 1; }
            self.table_state.select(Some(self.selected));
        }
    }

    fn clear_draft(&mut self) {
        self.draft_description.clear();
        self.draft_due.clear();
        self.draft_priority.clear();
        self.field = ActiveField::Description;
    }

    fn active_draft_field(&mut self) -> &mut String {
        match self.field {
            ActiveField::Description => &mut self.draft_description,
            ActiveField::DueDate => &mut self.draft_due,
            ActiveField::Priority => &mut self.draft_priority,
        }
    }

    /// Collects the draft fields, parses the date, and hands the draft to
    /// the store. Validation failures keep the form open with the draft
    /// intact; the message lands in the footer.
    fn submit_draft(&mut self) {
        let due = self.draft_due.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    self.notice = Some("due date must look like 2024-01-31".to_string());
                    return;
                }
            }
        };
        let priority = self.draft_priority.trim();
        let draft = TodoDraft {
            description: self.draft_description.clone(),
            due_date,
            priority: if priority.is_empty() { None } else { Some(priority.to_string()) },
        };
        match self.store.add(draft) {
            Ok(_) => {
                self.clear_draft();
                self.notice = None;
                self.mode = Mode::Browse;
                self.selected = 0;
                self.clamp_selection();
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn delete_selected(&mut self) {
        // Resolve the row to its id before mutating; deletion is addressed
        // by id so a stale row position can never remove the wrong entry.
        if let Some(entry) = self.store.list().get(self.selected) {
            let id = entry.id.clone();
            self.store.delete(&id);
            if self.selected > 0 { self.selected -= 1; }
            self.clamp_selection();
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(entry) = self.store.list().get(self.selected) {
            let id = entry.id.clone();
            self.store.toggle_complete(&id);
        }
    }
}

fn run_app<S: TodoStore>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, store: S) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut app = App::new(store);

    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        let timeout = tick_rate.saturating_sub(app.last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                match app.mode {
                    Mode::Browse => match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Tab => {
                            app.page = match app.page { Page::Home => Page::Todos, Page::Todos => Page::Home };
                            app.notice = None;
                        }
                        KeyCode::Up if app.page == Page::Todos => {
                            if app.selected > 0 { app.selected -= 1; }
                            app.clamp_selection();
                        }
                        KeyCode::Down if app.page == Page::Todos => {
                            let len = app.store.list().len();
                            if app.selected + 1 < len { app.selected += 1; }
                            app.clamp_selection();
                        }
                        KeyCode::Char('n') if app.page == Page::Todos => {
                            app.mode = Mode::Entry;
                            app.notice = None;
                            app.clear_draft();
                        }
                        KeyCode::Char('d') if app.page == Page::Todos => {
                            app.delete_selected();
                        }
                        KeyCode::Enter if app.page == Page::Todos => {
                            app.toggle_selected();
                        }
                        _ => {}
                    },
                    Mode::Entry => match key.code {
                        KeyCode::Esc => {
                            app.mode = Mode::Browse;
                            app.notice = None;
                            app.clear_draft();
                        }
                        KeyCode::Enter => app.submit_draft(),
                        KeyCode::Tab => {
                            app.field = match app.field {
                                ActiveField::Description => ActiveField::DueDate,
                                ActiveField::DueDate => ActiveField::Priority,
                                ActiveField::Priority => ActiveField::Description,
                            };
                        }
                        KeyCode::Backspace => { app.active_draft_field().pop(); }
                        KeyCode::Char(c) => app.active_draft_field().push(c),
                        _ => {}
                    },
                }
            }
        }
        if app.last_tick.elapsed() >= tick_rate {
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}

fn ui<S: TodoStore>(f: &mut Frame, app: &mut App<S>) {
    f.render_widget(Block::default().style(theme::base()), f.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(f.size());

    let tabs = Tabs::new(vec!["Home", "Todos"])
        .select(match app.page { Page::Home => 0, Page::Todos => 1 })
        .style(theme::base())
        .highlight_style(theme::selection())
        .divider("|")
        .block(Block::default().borders(Borders::ALL).border_style(theme::border(false)).title("todogrid"));
    f.render_widget(tabs, chunks[0]);

    match app.page {
        Page::Home => draw_home(f, chunks[1]),
        Page::Todos => draw_table(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_home(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to the todo board", theme::selection())),
        Line::from(""),
        Line::from("This is the home screen. Switch to the Todos tab to manage your list."),
    ];
    let home = Paragraph::new(text)
        .style(theme::base())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme::border(false)).title("home"));
    f.render_widget(home, area);
}

fn draw_table<S: TodoStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let header = Row::new(vec![
        Cell::from(Span::styled("Done", theme::border(true))),
        Cell::from(Span::styled("Description", theme::border(true))),
        Cell::from(Span::styled("Due", theme::border(true))),
        Cell::from(Span::styled("Priority", theme::border(true))),
    ])
    .height(1);

    let rows: Vec<Row> = app
        .store
        .list()
        .iter()
        .map(|entry| {
            let mark = if entry.completed { "[x]" } else { "[ ]" };
            let mut description_style = theme::base();
            if entry.completed {
                description_style = description_style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
            }
            let due = entry
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let priority = entry.priority.clone().unwrap_or_else(|| "-".to_string());
            let priority_style = theme::priority(&priority);
            Row::new(vec![
                Cell::from(mark),
                Cell::from(Span::styled(entry.description.clone(), description_style)),
                Cell::from(due),
                Cell::from(Span::styled(priority, priority_style)),
            ])
        })
        .collect();

    if app.store.list().is_empty() {
        app.table_state.select(None);
    } else {
        app.table_state.select(Some(app.selected));
    }

    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(55),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .style(theme::base())
        .highlight_style(theme::selection())
        .highlight_symbol(">> ")
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).border_style(theme::border(false)).title("todos"));
    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_footer<S: TodoStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    fn field_span<'a>(label: &'a str, value: &'a str, active: bool) -> Vec<Span<'a>> {
        let style = if active { theme::selection() } else { theme::base() };
        let cursor = if active { "_" } else { "" };
        vec![Span::styled(format!("{label}: {value}{cursor}"), style), Span::raw("  ")]
    }

    let (first, second) = match app.mode {
        Mode::Browse => {
            let hints = match app.page {
                Page::Home => "Tab: todos, q: quit".to_string(),
                Page::Todos => "n: new entry, Enter: toggle done, d: delete, Tab: home, q: quit".to_string(),
            };
            (Line::from(hints), status_line(app))
        }
        Mode::Entry => {
            let mut spans = Vec::new();
            spans.extend(field_span("Description", &app.draft_description, app.field == ActiveField::Description));
            spans.extend(field_span("Due date", &app.draft_due, app.field == ActiveField::DueDate));
            spans.extend(field_span("Priority", &app.draft_priority, app.field == ActiveField::Priority));
            (Line::from(spans), Line::from("Tab: next field, Enter: save, Esc: cancel"))
        }
    };

    let second = match &app.notice {
        Some(notice) => Line::from(Span::styled(notice.clone(), theme::error())),
        None => second,
    };

    let footer = Paragraph::new(vec![first, second])
        .style(theme::base())
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(app.mode == Mode::Entry))
            .title(match app.mode { Mode::Browse => "info", Mode::Entry => "new todo" }));
    f.render_widget(footer, area);
}

fn status_line<S: TodoStore>(app: &App<S>) -> Line<'static> {
    let total = app.store.list().len();
    let done = app.store.list().iter().filter(|e| e.completed).count();
    Line::from(format!("{total} todo(s), {done} done"))
}
