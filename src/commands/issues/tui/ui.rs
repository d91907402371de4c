use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Screen};
use crate::commands::issues::report::IssueReport;
use crate::commands::issues::table::{CellValue, ResultTable, TableView};

const TITLE: &str = "  JIRA Task Viewer";
const NO_ISSUES: &str = "  No issues found.";
const LOAD_FAILED: &str = "  Could not load issues.";
const CANCELLED: &str = "  Application cancelled.";
const IDLE_HINT: &str = "  Press Enter to load issues.";
/// Widest a table column may grow before its cells are clipped.
const MAX_COLUMN_WIDTH: usize = 40;
/// Warning lines shown at most; the rest are counted on one extra line.
const MAX_WARNING_LINES: usize = 3;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let warnings = warning_lines(&collect_warnings(app));
    let warning_height = warnings.len() as u16;

    let [title_area, input_area, body_area, warning_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(warning_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_title(frame, title_area);
    render_input(frame, input_area, app);
    render_body(frame, body_area, app);
    render_warnings(frame, warning_area, &warnings);
    render_help(frame, help_area, &app.screen);
}

fn collect_warnings(app: &App) -> Vec<String> {
    // Status first: it reacts to the last key and must not be cut off.
    let mut warnings: Vec<String> = app.status.iter().cloned().collect();
    if let Screen::Results(report) = &app.screen {
        warnings.extend(report.warnings().into_iter().map(str::to_string));
    }
    warnings
}

/// Formats at most `MAX_WARNING_LINES` warnings, plus a count of the hidden ones.
fn warning_lines(warnings: &[String]) -> Vec<String> {
    let mut lines: Vec<String> = warnings
        .iter()
        .take(MAX_WARNING_LINES)
        .map(|w| format!("  Warning: {w}"))
        .collect();
    let hidden = warnings.len().saturating_sub(MAX_WARNING_LINES);
    if hidden > 0 {
        lines.push(format!("  ... and {hidden} more (see log)"));
    }
    lines
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, area);
}

/// Renders the start-date field, with a placeholder while it is empty.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let editing = matches!(app.screen, Screen::Idle { .. });
    let text = if app.input.is_empty() {
        Span::styled(
            format!("MM/DD/YYYY, empty for {} days ago", app.lookback_days),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.input.as_str())
    };

    let border_color = if editing { Color::Cyan } else { Color::DarkGray };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Start date "),
    );
    frame.render_widget(input, area);

    if editing {
        let x = area.x + 1 + app.input.width() as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    match &app.screen {
        Screen::Idle { error: Some(error) } => {
            let line = Line::from(vec![
                Span::styled(
                    "  Error: ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.as_str(), Style::default().fg(Color::Red)),
            ]);
            frame.render_widget(Paragraph::new(line), area);
        }
        Screen::Idle { error: None } => {
            let hint = Paragraph::new(IDLE_HINT).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, area);
        }
        Screen::Cancelled => {
            let message = Paragraph::new(Span::styled(
                CANCELLED,
                Style::default().add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(message, area);
        }
        Screen::Results(IssueReport::FetchFailed(_)) => {
            let message = Paragraph::new(Span::styled(
                LOAD_FAILED,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(message, area);
        }
        Screen::Results(report) => match report.view() {
            Some(TableView::Table(table)) => {
                let widget = build_table(table);
                frame.render_stateful_widget(widget, area, &mut app.table_state);
            }
            Some(TableView::NoIssues) | None => {
                frame.render_widget(Paragraph::new(NO_ISSUES), area);
            }
        },
    }
}

fn build_table(table: &ResultTable) -> Table<'_> {
    let header = Row::new(table.headers().into_iter().map(Cell::from))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = table
        .rows()
        .map(|cells| Row::new(cells.into_iter().map(to_cell)))
        .collect();

    Table::new(rows, column_widths(table))
        .header(header)
        .column_spacing(2)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ")
}

fn to_cell(value: CellValue<'_>) -> Cell<'_> {
    match value {
        CellValue::Text(text) => Cell::from(text),
        CellValue::Link { text, .. } => Cell::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )),
    }
}

/// Width of each column: its widest cell, capped at `MAX_COLUMN_WIDTH`.
fn column_widths(table: &ResultTable) -> Vec<Constraint> {
    let mut widths: Vec<usize> = table.headers().iter().map(|h| h.width()).collect();
    for row in table.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            let text = match cell {
                CellValue::Text(text) | CellValue::Link { text, .. } => text,
            };
            *width = (*width).max(text.width());
        }
    }
    widths
        .into_iter()
        .map(|w| Constraint::Length(w.min(MAX_COLUMN_WIDTH) as u16))
        .collect()
}

fn render_warnings(frame: &mut Frame, area: Rect, lines: &[String]) {
    let lines: Vec<Line> = lines
        .iter()
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(Color::Yellow))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the help bar at the bottom.
fn render_help(frame: &mut Frame, area: Rect, screen: &Screen) {
    let keys: &[(&str, &str)] = match screen {
        Screen::Idle { .. } => &[("Enter", "submit"), ("Esc", "quit")],
        Screen::Results(_) => &[
            ("j/k", "move"),
            ("o", "open link"),
            ("r", "reset"),
            ("Esc", "quit"),
        ],
        Screen::Cancelled => &[],
    };

    let mut spans = vec![Span::raw("  ")];
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(format!(": {action}")));
    }

    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Renders the entire UI to a TestBackend for testing.
/// Returns the rendered output as a string.
#[cfg(test)]
fn render_to_string(app: &mut App, width: u16, height: u16) -> String {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut output = String::new();

    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        // Trim trailing whitespace and add newline
        let trimmed = output.trim_end_matches(' ');
        output.truncate(trimmed.len());
        output.push('\n');
    }

    if output.ends_with('\n') {
        output.pop();
    }

    output
}
