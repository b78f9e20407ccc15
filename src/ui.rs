use anyhow::Result;
use asset_listing::{
    parse_currency, Listable, ListableRecord, ListingController, NumericField, SearchDebouncer,
    TextField, ViewMode, VisibleSlice,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

const GRID_COLUMNS: usize = 3;
const IDLE_POLL: Duration = Duration::from_millis(500);
const CATEGORY_COLORS: [Color; 5] = [Color::Cyan, Color::Green, Color::Yellow, Color::Magenta, Color::Blue];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App<'a> {
    pub listing: ListingController<'a, ListableRecord>,
    pub state: TableState,
    pub input_mode: InputMode,
    /// What the user has typed; applied through the debouncer
    pub search_input: String,
    pub debouncer: SearchDebouncer,
    pub show_detail: bool,
}

impl<'a> App<'a> {
    pub fn new(listing: ListingController<'a, ListableRecord>) -> Self {
        let search_input = listing.criteria().search_query.clone();
        let mut app = Self {
            listing,
            state: TableState::default(),
            input_mode: InputMode::Normal,
            search_input,
            debouncer: SearchDebouncer::default(),
            show_detail: false,
        };
        app.reset_selection();
        app
    }

    fn reset_selection(&mut self) {
        if self.listing.visible().visible_records.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn selected_record(&self) -> Option<&'a ListableRecord> {
        let slice = self.listing.visible();
        self.state
            .selected()
            .and_then(|i| slice.visible_records.get(i).copied())
    }

    pub fn cycle_filter(&mut self) {
        let labels = self.listing.config().filter_predicate().labels();
        let next = next_label(&labels, &self.listing.criteria().active_filter);
        self.listing.set_filter(next);
        self.reset_selection();
    }

    pub fn cycle_sort(&mut self) {
        let labels = self.listing.config().sort_registry().labels();
        let next = next_label(&labels, &self.listing.criteria().sort_key);
        self.listing.set_sort_key(next);
        self.reset_selection();
    }

    pub fn next_page(&mut self) {
        self.listing.next_page();
        self.reset_selection();
    }

    pub fn previous_page(&mut self) {
        self.listing.previous_page();
        self.reset_selection();
    }

    pub fn toggle_view_mode(&mut self) {
        let mode = self.listing.criteria().view_mode.toggle();
        self.listing.set_view_mode(mode);
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.debouncer.push(self.search_input.clone(), Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.debouncer.push(self.search_input.clone(), Instant::now());
    }

    /// Apply a debounced query if one is due
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.apply_search(query);
        }
    }

    pub fn commit_search(&mut self) {
        if let Some(query) = self.debouncer.flush() {
            self.apply_search(query);
        }
        self.input_mode = InputMode::Normal;
    }

    fn apply_search(&mut self, query: String) {
        if query != self.listing.criteria().search_query {
            self.listing.set_search_query(query);
            self.reset_selection();
        }
    }

    pub fn next(&mut self) {
        let len = self.listing.visible().visible_records.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.listing.visible().visible_records.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

/// Label after `current`, wrapping; the first label when `current` is unknown
fn next_label(labels: &[&str], current: &str) -> String {
    let next = match labels.iter().position(|l| *l == current) {
        Some(i) => labels.get(i + 1).or_else(|| labels.first()),
        None => labels.first(),
    };
    next.map(|l| l.to_string()).unwrap_or_default()
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .debouncer
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.input_mode {
                    InputMode::Search => match key.code {
                        KeyCode::Enter | KeyCode::Esc => app.commit_search(),
                        KeyCode::Backspace => app.pop_search_char(),
                        KeyCode::Char(c) => app.push_search_char(c),
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('/') => app.input_mode = InputMode::Search,
                        KeyCode::Char('f') => app.cycle_filter(),
                        KeyCode::Char('s') => app.cycle_sort(),
                        KeyCode::Char('v') => app.toggle_view_mode(),
                        KeyCode::Enter => app.toggle_detail(),
                        KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
                        KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => app.previous_page(),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        _ => {}
                    },
                }
            }
        }

        app.tick(Instant::now());
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header: filters + sort/search
            Constraint::Min(0),    // Listing
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let slice = app.listing.visible();

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_listing(f, content_chunks[0], app, &slice);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_listing(f, chunks[1], app, &slice);
    }

    render_status_bar(f, chunks[2], app, &slice);
}

fn render_listing(f: &mut Frame, area: Rect, app: &mut App, slice: &VisibleSlice<'_, ListableRecord>) {
    match slice.view_mode {
        ViewMode::List => render_table(f, area, app, slice),
        ViewMode::Grid => render_grid(f, area, app, slice),
    }
}

/// Categories without a filter label render white
fn category_color(app: &App, category: &str) -> Color {
    app.listing
        .config()
        .filters
        .iter()
        .position(|opt| opt.category == category)
        .map(|i| CATEGORY_COLORS[i % CATEGORY_COLORS.len()])
        .unwrap_or(Color::White)
}

fn amount_color(raw: &str) -> Color {
    if parse_currency(raw) < 0.0 {
        Color::Red
    } else {
        Color::Green
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let criteria = app.listing.criteria();

    let mut filter_spans = vec![Span::styled("Filter: ", Style::default().fg(Color::DarkGray))];
    for (i, label) in app.listing.config().filter_predicate().labels().iter().enumerate() {
        if i > 0 {
            filter_spans.push(Span::raw(" │ "));
        }

        let style = if *label == criteria.active_filter {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        filter_spans.push(Span::styled(label.to_string(), style));
    }

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if app.input_mode == InputMode::Search { "▏" } else { "" };

    let sort_label = match app.listing.config().sort_registry().get(&criteria.sort_key) {
        Some(strategy) => format!("{} ({})", strategy.label, strategy.direction.as_str()),
        None => format!("{} (input order)", criteria.sort_key),
    };

    let option_spans = vec![
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(sort_label, Style::default().fg(Color::Cyan)),
        Span::raw("  |  "),
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", app.search_input, cursor), search_style),
        Span::raw("  |  "),
        Span::styled(
            format!("View: {}", criteria.view_mode.as_str()),
            Style::default().fg(Color::White),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(filter_spans), Line::from(option_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", app.listing.config().name)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App, slice: &VisibleSlice<'_, ListableRecord>) {
    let header_cells = ["ID", "Name", "Location", "Category", "Amount", "Rate", "Date"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = slice
        .visible_records
        .iter()
        .map(|record| {
            let amount = record.numeric_field(NumericField::Amount).unwrap_or("-");
            let cells = vec![
                Cell::from(record.id().to_string()),
                Cell::from(truncate(record.text_field(TextField::Name).unwrap_or(""), 32)),
                Cell::from(truncate(record.text_field(TextField::Location).unwrap_or(""), 24)),
                Cell::from(record.category().to_string())
                    .style(Style::default().fg(category_color(app, record.category()))),
                Cell::from(amount.to_string()).style(Style::default().fg(amount_color(amount))),
                Cell::from(record.numeric_field(NumericField::Rate).unwrap_or("-").to_string()),
                Cell::from(record.date_field().unwrap_or("-").to_string()),
            ];
            Row::new(cells).height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(34),
            Constraint::Length(26),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(24),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Listing "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_grid(f: &mut Frame, area: Rect, app: &App, slice: &VisibleSlice<'_, ListableRecord>) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Listing ");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    if slice.visible_records.is_empty() {
        let empty = Paragraph::new("No matching records").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
        return;
    }

    let row_count = slice.visible_records.len().div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(inner);

    for (row_index, chunk) in slice.visible_records.chunks(GRID_COLUMNS).enumerate() {
        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_areas[row_index]);

        for (col_index, record) in chunk.iter().enumerate() {
            let selected = app.state.selected() == Some(row_index * GRID_COLUMNS + col_index);
            render_card(f, card_areas[col_index], app, record, selected);
        }
    }
}

fn render_card(f: &mut Frame, area: Rect, app: &App, record: &ListableRecord, selected: bool) {
    let amount = record.numeric_field(NumericField::Amount).unwrap_or("-");
    let mut lines = vec![
        Line::from(Span::styled(
            record.text_field(TextField::Name).unwrap_or("").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            record.text_field(TextField::Location).unwrap_or("").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(amount.to_string(), Style::default().fg(amount_color(amount))),
            Span::raw("  "),
            Span::raw(record.numeric_field(NumericField::Rate).unwrap_or("").to_string()),
        ]),
    ];
    if let Some(date) = record.date_field() {
        lines.push(Line::from(Span::raw(date.to_string())));
    }

    let border = if selected { Color::Yellow } else { category_color(app, record.category()) };
    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} · {} ", record.id(), record.category())),
    );

    f.render_widget(card, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, slice: &VisibleSlice<'_, ListableRecord>) {
    let help = match app.input_mode {
        InputMode::Search => "Type to search | Enter/Esc: done",
        InputMode::Normal => "f: filter | s: sort | /: search | v: view | ←/→: page | Enter: detail | q: quit",
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(slice.caption(), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled(
            format!(
                "{} Page {} of {} {}",
                if slice.has_previous() { "◀" } else { " " },
                slice.current_page,
                slice.total_pages,
                if slice.has_next() { "▶" } else { " " },
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines = match app.selected_record() {
        Some(record) => {
            let mut lines = vec![
                detail_line("ID", record.id()),
                detail_line("Kind", record.kind_name()),
                detail_line("Category", record.category()),
            ];
            for field in [TextField::Name, TextField::Location, TextField::Description] {
                if let Some(value) = record.text_field(field).filter(|v| !v.is_empty()) {
                    lines.push(detail_line(field.as_str(), value));
                }
            }
            for field in NumericField::all() {
                if let Some(value) = record.numeric_field(field) {
                    lines.push(detail_line(field.as_str(), value));
                }
            }
            if let Some(date) = record.date_field() {
                lines.push(detail_line("date", date));
            }
            lines
        }
        None => vec![Line::from("No record selected")],
    };

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Detail "),
    );

    f.render_widget(detail, area);
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Yellow)),
        Span::raw(value.to_string()),
    ])
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_label_wraps() {
        let labels = ["All", "Deposits", "Fees"];
        assert_eq!(next_label(&labels, "All"), "Deposits");
        assert_eq!(next_label(&labels, "Fees"), "All");
        assert_eq!(next_label(&labels, "Unknown"), "All");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long address line", 10), "a very ...");
    }
}
