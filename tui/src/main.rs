//! rxcompare: interactive Ratatui browser
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  selection · sort · tried                                           │
//!   ├─── medicines ──────┬─── results ────────────────────────────────────┤
//!   │                    │                                                │
//!   ├─── insurance ──────┤                                                │
//!   │                    │                                                │
//!   ├────────────────────┴────────────────────────────────────────────────┤
//!   │  current selection / questionnaire / status                         │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! Runs against the bundled dataset.

use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use rxcompare_contracts::{
    coverage::CoverageStatus,
    pairing::Pairing,
    request::{ComparisonRequest, SortKey, SortOrder, TrialAnswer, TrialInput},
    view::{ComparisonView, TrialQuestion},
};
use rxcompare_core::{Comparator, DataStore};
use rxcompare_report::{dollars, render::coverage_cell};

// ── App state ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Medicines,
    Insurance,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Medicines => Focus::Insurance,
            Focus::Insurance => Focus::Results,
            Focus::Results => Focus::Medicines,
        }
    }
}

struct App {
    comparator: Comparator,
    medicines: Vec<String>,
    insurance: Vec<String>,

    focus: Focus,
    medicine_cursor: usize,
    insurance_cursor: usize,
    result_cursor: usize,

    selected_medicine: Option<String>,
    selected_insurance: Option<String>,
    sort_by: SortKey,
    order: SortOrder,
    tried: bool,

    /// Pending questionnaire prompt; `Some` while in trial mode.
    question: Option<TrialQuestion>,
    view: ComparisonView,
    status: String,
}

impl App {
    fn new(comparator: Comparator) -> Self {
        let medicines = comparator.store().medicine_names().to_vec();
        let insurance = comparator.store().insurance_names().to_vec();
        let view = comparator.compare(&ComparisonRequest::default());
        Self {
            comparator,
            medicines,
            insurance,
            focus: Focus::Medicines,
            medicine_cursor: 0,
            insurance_cursor: 0,
            result_cursor: 0,
            selected_medicine: None,
            selected_insurance: None,
            sort_by: SortKey::default(),
            order: SortOrder::default(),
            tried: false,
            question: None,
            view,
            status: String::from("Showing every pairing."),
        }
    }

    fn request(&self) -> ComparisonRequest {
        ComparisonRequest {
            tried: self.tried,
            sort_by: self.sort_by,
            order: self.order,
            ..ComparisonRequest::for_selection(self.selected_medicine.as_deref(), self.selected_insurance.as_deref())
        }
    }

    /// Re-run the comparison for the current selection.
    fn refresh(&mut self) {
        self.view = self.comparator.compare(&self.request());
        self.result_cursor = self.result_cursor.min(self.view.pairings.len().saturating_sub(1));
        self.status = format!("{} pairings.", self.view.pairings.len());
    }

    fn move_cursor(&mut self, down: bool) {
        let (cursor, len) = match self.focus {
            Focus::Medicines => (&mut self.medicine_cursor, self.medicines.len()),
            Focus::Insurance => (&mut self.insurance_cursor, self.insurance.len()),
            Focus::Results => (&mut self.result_cursor, self.view.pairings.len()),
        };
        if len == 0 {
            return;
        }
        *cursor = if down {
            (*cursor + 1).min(len - 1)
        } else {
            cursor.saturating_sub(1)
        };
    }

    /// Enter on a list selects the item under the cursor, or clears it when
    /// it is already selected.
    fn toggle_selection(&mut self) {
        match self.focus {
            Focus::Medicines => {
                let name = self.medicines.get(self.medicine_cursor).cloned();
                self.selected_medicine = if self.selected_medicine == name { None } else { name };
            }
            Focus::Insurance => {
                let name = self.insurance.get(self.insurance_cursor).cloned();
                self.selected_insurance = if self.selected_insurance == name { None } else { name };
            }
            Focus::Results => return,
        }
        self.refresh();
    }

    fn cycle_sort(&mut self) {
        self.sort_by = self.sort_by.next();
        self.refresh();
    }

    fn toggle_order(&mut self) {
        self.order = self.order.toggled();
        self.refresh();
    }

    fn toggle_tried(&mut self) {
        self.tried = !self.tried;
        self.refresh();
    }

    fn clear(&mut self) {
        self.selected_medicine = None;
        self.selected_insurance = None;
        self.tried = false;
        self.question = None;
        self.refresh();
    }

    fn start_trial(&mut self) {
        self.question = self.comparator.start_trial();
        match &self.question {
            Some(_) => self.status = String::from("Answer y or n. Esc leaves the questionnaire."),
            None => self.status = String::from("The trial sequence is empty."),
        }
    }

    fn answer_trial(&mut self, answer: TrialAnswer) {
        let Some(question) = self.question.take() else {
            return;
        };
        let request = ComparisonRequest {
            trial: Some(TrialInput {
                index: question.index,
                answer,
            }),
            ..self.request()
        };
        let view = self.comparator.compare(&request);

        if view.trial_question.is_some() {
            self.question = view.trial_question.clone();
            return;
        }

        self.selected_medicine = view.selected_medicine.clone();
        self.selected_insurance = view.selected_insurance.clone();
        self.status = match &self.selected_medicine {
            Some(m) => format!("Questionnaire picked {}.", m),
            None => String::from("Every medicine tried; showing all pairings."),
        };
        self.view = view;
        self.result_cursor = 0;
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // lists + results
            Constraint::Length(8), // details
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(outer_chunks[1]);

    let list_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(mid_chunks[0]);

    render_names(
        f,
        list_chunks[0],
        " Medicines ",
        &app.medicines,
        app.medicine_cursor,
        app.selected_medicine.as_deref(),
        app.focus == Focus::Medicines,
    );
    render_names(
        f,
        list_chunks[1],
        " Insurance ",
        &app.insurance,
        app.insurance_cursor,
        app.selected_insurance.as_deref(),
        app.focus == Focus::Insurance,
    );
    render_results(f, mid_chunks[1], app);
    render_details(f, outer_chunks[2], app);
    render_footer(f, outer_chunks[3], app);
}

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);

    let spans = vec![
        Span::styled("rxcompare    ", title_style),
        Span::styled("medicine: ", label),
        Span::styled(app.selected_medicine.as_deref().unwrap_or("any").to_string(), value),
        Span::styled("   insurance: ", label),
        Span::styled(app.selected_insurance.as_deref().unwrap_or("any").to_string(), value),
        Span::styled("   sort: ", label),
        Span::styled(format!("{} {}", app.sort_by.as_str(), app.order.as_str()), value),
        Span::styled("   tried: ", label),
        Span::styled(if app.tried { "yes" } else { "no" }, value),
    ];

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border(false)));
    f.render_widget(header, area);
}

fn render_names(
    f: &mut Frame,
    area: Rect,
    title: &str,
    names: &[String],
    cursor: usize,
    selected: Option<&str>,
    focused: bool,
) {
    let height = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(cursor, height);

    let items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, name)| {
            let marker = if selected == Some(name.as_str()) { "● " } else { "  " };
            let mut style = Style::default();
            if selected == Some(name.as_str()) {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if focused && i == cursor {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(Line::from(Span::styled(format!("{}{}", marker, name), style)))
        })
        .collect();

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border(focused));
    f.render_widget(List::new(items).block(block), area);
}

fn result_line(p: &Pairing) -> String {
    let flag = match p.is_higher_tier {
        Some(true) => " ↑tier",
        _ => "",
    };
    format!(
        "{:<16} {:<24} {:<10} {:>9} {:>10} {:>10} {:>10}{}",
        truncate(&p.medicine_name, 16),
        truncate(&p.insurance_name, 24),
        coverage_cell(p),
        dollars(Some(p.monthly_cost)),
        dollars(Some(p.annual_cost)),
        dollars(p.annual_savings),
        dollars(Some(p.unauth_annual)),
        flag,
    )
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Results;
    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
        format!(
            "{:<16} {:<24} {:<10} {:>9} {:>10} {:>10} {:>10}",
            "Medicine", "Insurance", "Covered", "Monthly", "Annual", "Savings", "No PA"
        ),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    )))];

    let height = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(app.result_cursor, height);

    for (i, p) in app.view.pairings.iter().enumerate().skip(offset).take(height) {
        let mut style = if p.is_cash() {
            Style::default().fg(Color::Yellow)
        } else if p.coverage_status() == CoverageStatus::Covered {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        if focused && i == app.result_cursor {
            style = style.bg(Color::DarkGray);
        }
        items.push(ListItem::new(Line::from(Span::styled(result_line(p), style))));
    }

    if app.view.pairings.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No pairings for this selection.",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let block = Block::default()
        .title(format!(" Results ({}) ", app.view.pairings.len()))
        .borders(Borders::ALL)
        .border_style(border(focused));
    f.render_widget(List::new(items).block(block), area);
}

fn render_details(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(q) = &app.question {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Question {} of {}: ", q.index + 1, app.view.trial_sequence.len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("Have you already tried {}?", q.medicine),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from("  [y] yes, ask about the next one    [n] no, compare it"));
    } else if let Some(current) = &app.view.current {
        let tier = current
            .coverage
            .as_ref()
            .and_then(|c| c.tier_level.clone())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!("{} with {}", current.medicine.name, current.insurance.name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "Covered: {}    Tier: {}    Deductible: {}",
            current.status.label(),
            tier,
            dollars(current.insurance.deductible),
        )));
        lines.push(Line::from(format!(
            "Estimated annual cost: {}    Monthly average: {}",
            dollars(Some(current.annual_cost)),
            dollars(Some(current.monthly_cost)),
        )));
    } else if let Some(p) = app.view.pairings.get(app.result_cursor) {
        lines.push(Line::from(Span::styled(
            format!("{} with {}", p.medicine_name, p.insurance_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "Uninsured baseline: {}/mo    Copay: {}    Monthly savings: {}",
            dollars(Some(p.full_monthly)),
            dollars(p.copay_amount),
            dollars(p.monthly_savings),
        )));
        if let Some(m) = &p.medicine {
            lines.push(Line::from(format!("{} · side effects: {}", m.kind, m.side_effects)));
        }
    }

    lines.push(Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::DarkGray),
    )));

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Details ")
                .borders(Borders::ALL)
                .border_style(border(false)),
        );
    f.render_widget(details, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);
    let spans: Vec<Span> = if app.question.is_some() {
        vec![
            Span::styled(" [y] ", key),
            Span::raw("Tried it  "),
            Span::styled("[n] ", key),
            Span::raw("Not yet  "),
            Span::styled("[Esc] ", key),
            Span::raw("Leave questionnaire"),
        ]
    } else {
        vec![
            Span::styled(" [Tab] ", key),
            Span::raw("Focus  "),
            Span::styled("[↑/↓] ", key),
            Span::raw("Move  "),
            Span::styled("[Enter] ", key),
            Span::raw("Select  "),
            Span::styled("[s] ", key),
            Span::raw("Sort  "),
            Span::styled("[o] ", key),
            Span::raw("Order  "),
            Span::styled("[t] ", key),
            Span::raw("Tried  "),
            Span::styled("[q] ", key),
            Span::raw("Questionnaire  "),
            Span::styled("[Esc] ", key),
            Span::raw("Clear  "),
            Span::styled("[x] ", key),
            Span::raw("Quit"),
        ]
    };

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border(false)));
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// First visible row so that `cursor` stays inside a window of `height` rows.
fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let comparator = rxcompare_ref_data::reference_comparator()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(comparator);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Ctrl-C quits from any mode.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        if app.question.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_trial(TrialAnswer::Yes),
                KeyCode::Char('n') | KeyCode::Char('N') => app.answer_trial(TrialAnswer::No),
                KeyCode::Esc => {
                    app.question = None;
                    app.status = String::from("Questionnaire cancelled.");
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('x') | KeyCode::Char('X') => break,
            KeyCode::Tab => app.focus = app.focus.next(),
            KeyCode::Up => app.move_cursor(false),
            KeyCode::Down => app.move_cursor(true),
            KeyCode::Enter => app.toggle_selection(),
            KeyCode::Char('s') => app.cycle_sort(),
            KeyCode::Char('o') => app.toggle_order(),
            KeyCode::Char('t') => app.toggle_tried(),
            KeyCode::Char('q') => app.start_trial(),
            KeyCode::Esc => app.clear(),
            _ => {}
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
