//! Rendering

use ratatui::{prelude::*, widgets::*};
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetState};

use crate::app::{Dashboard, Mode, NoticeKind, Overlay};
use crate::form::FormField;

pub fn draw(f: &mut Frame, app: &Dashboard, logger_state: &TuiWidgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Table
            Constraint::Length(8), // Logs
            Constraint::Length(1), // Key help
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_filters(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_logs(f, logger_state, chunks[3]);

    let help = match app.mode {
        Mode::Search => " Type to filter by name · Enter/Esc done",
        Mode::Browse => {
            " / name · d/D department · s status · a add · e edit · x delete · r refresh · q quit"
        }
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );

    if let Some(overlay) = &app.overlay {
        draw_overlay(f, overlay);
    }
}

fn draw_header(f: &mut Frame, app: &Dashboard, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " Employee Management Dashboard ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
    ];
    if app.pending_fetches > 0 {
        spans.push(Span::styled(" Loading... ", Style::default().fg(Color::Yellow)));
    } else {
        spans.push(Span::styled(
            format!(" {} employees ", app.employees.len()),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            notice.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn draw_filters(f: &mut Frame, app: &Dashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let searching = app.mode == Mode::Search && app.overlay.is_none();
    draw_input(
        f,
        &app.name_filter,
        " Search by name ",
        searching,
        chunks[0],
    );

    let department = app
        .department
        .map(|d| d.to_string())
        .unwrap_or_else(|| "All Departments".to_string());
    f.render_widget(
        Paragraph::new(department).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Department (d/D) "),
        ),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(app.status.label())
            .block(Block::default().borders(Borders::ALL).title(" Status (s) ")),
        chunks[2],
    );
}

fn draw_table(f: &mut Frame, app: &Dashboard, area: Rect) {
    let block = Block::default()
        .title(" Employees ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if app.employees.is_empty() {
        let empty = Paragraph::new("No employees found")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Name", "Department", "Role", "Salary", "Status"]).style(
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );
    let rows = app.employees.iter().map(|e| {
        Row::new(vec![
            Cell::from(e.name.clone()),
            Cell::from(e.department.to_string()),
            Cell::from(e.role.clone()),
            Cell::from(e.salary.to_string()),
            Cell::from(e.status.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(18),
            Constraint::Percentage(25),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(app.selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_logs(f: &mut Frame, logger_state: &TuiWidgetState, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Activity ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(logger_state);
    f.render_widget(logs, area);
}

fn draw_overlay(f: &mut Frame, overlay: &Overlay) {
    let area = centered_rect(60, 19, f.area());
    f.render_widget(Clear, area);

    let title = if overlay.editing.is_some() {
        " Edit Employee "
    } else {
        " Add Employee "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let form = &overlay.form;
    let label = |field: FormField| format!(" {} ", field.label());

    draw_input(
        f,
        &form.name,
        &label(FormField::Name),
        form.focus == FormField::Name,
        rows[0],
    );
    draw_choice(
        f,
        &label(FormField::Department),
        &form
            .department
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Select Department".to_string()),
        form.focus == FormField::Department,
        rows[1],
    );
    draw_input(
        f,
        &form.role,
        &label(FormField::Role),
        form.focus == FormField::Role,
        rows[2],
    );
    draw_input(
        f,
        &form.salary,
        &label(FormField::Salary),
        form.focus == FormField::Salary,
        rows[3],
    );
    draw_choice(
        f,
        &label(FormField::Status),
        form.status.as_str(),
        form.focus == FormField::Status,
        rows[4],
    );

    let submit = if overlay.editing.is_some() {
        "Update"
    } else {
        "Create"
    };
    f.render_widget(
        Paragraph::new(format!(
            "Tab/Shift-Tab move · ←/→ change · Enter {submit} · Esc cancel"
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center),
        rows[5],
    );
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn draw_input(f: &mut Frame, input: &Input, title: &str, focused: bool, area: Rect) {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let widget = Paragraph::new(input.value())
        .style(focus_style(focused))
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(widget, area);

    if focused {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn draw_choice(f: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let text = if focused {
        format!("< {value} >")
    } else {
        value.to_string()
    };
    f.render_widget(
        Paragraph::new(text)
            .style(focus_style(focused))
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

/// Rect of `percent_x` width and `height` rows, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Outcome;
    use ratatui::backend::TestBackend;
    use shared::{Department, Employee, EmployeeStatus};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_rows_and_overlay() {
        let mut app = Dashboard::new();
        let now = "2024-01-01T00:00:00Z".parse().unwrap();
        app.apply(Outcome::Fetched(Ok(vec![Employee {
            id: "1".into(),
            name: "Ann".into(),
            department: Department::HR,
            role: "Recruiter".into(),
            salary: 42000.0,
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        }])));

        let logger_state = TuiWidgetState::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &logger_state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Ann"));
        assert!(text.contains("Recruiter"));
        assert!(text.contains("All Departments"));

        app.open_overlay(None);
        terminal
            .draw(|f| draw(f, &app, &logger_state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Add Employee"));
        assert!(text.contains("Select Department"));
    }

    #[test]
    fn test_empty_table_message() {
        let app = Dashboard::new();
        let logger_state = TuiWidgetState::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &logger_state))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No employees found"));
    }
}
